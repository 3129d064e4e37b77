//! The task list: add, toggle, edit, and delete with a short undo window.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// How long a deleted task can be brought back.
pub const UNDO_WINDOW: Duration = Duration::from_secs(5);

static TASK_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl Task {
    fn new(text: String) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let seq = TASK_SEQ.fetch_add(1, Ordering::Relaxed);
        let mut hasher = DefaultHasher::new();
        (&text, nanos, seq).hash(&mut hasher);
        Self {
            id: format!("{:016x}", hasher.finish()),
            text,
            completed: false,
        }
    }
}

/// A deleted task kept around until its undo deadline passes.
pub struct StagedRemoval {
    pub task: Task,
    pub index: usize,
    pub deadline: Instant,
}

/// The task list. Every mutation is written straight back to disk; an
/// unwritable disk degrades to a session-only list rather than an error.
pub struct TaskStore {
    pub tasks: Vec<Task>,
    pub staged: Option<StagedRemoval>,
    path: Option<PathBuf>,
}

impl TaskStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            tasks: Vec::new(),
            staged: None,
            path,
        }
    }

    /// Loads the list from `path`. A missing or corrupt file starts empty.
    pub fn load(path: PathBuf) -> Self {
        let tasks = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str::<Vec<Task>>(&raw).ok())
            .unwrap_or_default();
        Self {
            tasks,
            staged: None,
            path: Some(path),
        }
    }

    fn save(&self) {
        let Some(path) = &self.path else { return };
        let Ok(raw) = serde_json::to_string_pretty(&self.tasks) else {
            return;
        };
        if let Err(e) = std::fs::write(path, raw) {
            tracing::warn!("could not save tasks: {e}");
        }
    }

    /// Appends a task. Whitespace-only text is rejected.
    pub fn add(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.tasks.push(Task::new(text.to_string()));
        self.save();
        true
    }

    pub fn toggle(&mut self, index: usize) {
        if let Some(task) = self.tasks.get_mut(index) {
            task.completed = !task.completed;
            self.save();
        }
    }

    /// Rewrites a task's text. Editing down to nothing deletes the task,
    /// with the same undo window as a plain delete.
    pub fn edit(&mut self, index: usize, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            self.remove(index);
            return;
        }
        if let Some(task) = self.tasks.get_mut(index) {
            task.text = text.to_string();
            self.save();
        }
    }

    /// Removes the task at `index` and stages it for undo. Staging a second
    /// removal forfeits the first.
    pub fn remove(&mut self, index: usize) {
        if index >= self.tasks.len() {
            return;
        }
        let task = self.tasks.remove(index);
        self.staged = Some(StagedRemoval {
            task,
            index,
            deadline: Instant::now() + UNDO_WINDOW,
        });
        self.save();
    }

    /// Puts the staged task back where it was, if the window is still open.
    pub fn undo(&mut self) -> bool {
        let Some(staged) = self.staged.take() else {
            return false;
        };
        if Instant::now() > staged.deadline {
            return false;
        }
        let index = staged.index.min(self.tasks.len());
        self.tasks.insert(index, staged.task);
        self.save();
        true
    }

    /// Drops the staged removal once its deadline passes.
    pub fn on_tick(&mut self) {
        if let Some(staged) = &self.staged {
            if Instant::now() > staged.deadline {
                self.staged = None;
            }
        }
    }

    /// Seconds left to undo, for the footer hint.
    pub fn undo_secs_left(&self) -> Option<u64> {
        let staged = self.staged.as_ref()?;
        let left = staged.deadline.saturating_duration_since(Instant::now());
        (left > Duration::ZERO).then(|| left.as_secs().max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> TaskStore {
        TaskStore::new(None)
    }

    #[test]
    fn add_rejects_blank_text() {
        let mut tasks = store();
        assert!(!tasks.add("   "));
        assert!(tasks.add("write a test"));
        assert_eq!(tasks.tasks.len(), 1);
        assert!(!tasks.tasks[0].completed);
    }

    #[test]
    fn toggle_flips_completion() {
        let mut tasks = store();
        tasks.add("a");
        tasks.toggle(0);
        assert!(tasks.tasks[0].completed);
        tasks.toggle(0);
        assert!(!tasks.tasks[0].completed);
    }

    #[test]
    fn editing_to_empty_deletes_with_undo() {
        let mut tasks = store();
        tasks.add("typo");
        tasks.edit(0, "   ");
        assert!(tasks.tasks.is_empty());
        assert!(tasks.staged.is_some());
        assert!(tasks.undo());
        assert_eq!(tasks.tasks[0].text, "typo");
    }

    #[test]
    fn undo_restores_at_the_original_index() {
        let mut tasks = store();
        tasks.add("first");
        tasks.add("second");
        tasks.add("third");
        tasks.remove(1);
        assert_eq!(tasks.tasks.len(), 2);
        assert!(tasks.undo());
        assert_eq!(tasks.tasks[1].text, "second");
        // Nothing staged any more, so a second undo is a no-op.
        assert!(!tasks.undo());
    }

    #[test]
    fn undo_after_the_deadline_fails() {
        let mut tasks = store();
        tasks.add("gone");
        tasks.remove(0);
        if let Some(staged) = &mut tasks.staged {
            staged.deadline = Instant::now() - Duration::from_secs(1);
        }
        tasks.on_tick();
        assert!(tasks.staged.is_none());
        assert!(!tasks.undo());
        assert!(tasks.tasks.is_empty());
    }

    #[test]
    fn second_removal_forfeits_the_first() {
        let mut tasks = store();
        tasks.add("one");
        tasks.add("two");
        tasks.remove(0);
        tasks.remove(0);
        assert!(tasks.undo());
        assert_eq!(tasks.tasks.len(), 1);
        assert_eq!(tasks.tasks[0].text, "two");
    }

    #[test]
    fn task_ids_are_unique() {
        let mut tasks = store();
        tasks.add("same text");
        tasks.add("same text");
        assert_ne!(tasks.tasks[0].id, tasks.tasks[1].id);
    }
}
