use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use reqwest::Client;
use tokio::sync::mpsc;

use crate::app::events::AppEvent;
use crate::app::{App, InputMode, InputState, PanelFocus};
use crate::playlist::{PlaylistError, TitleFetcher, VideoId};
use crate::ui::theme::{Theme, ACCENTS};
use crate::ui::utils::truncate;

pub fn handle_key(key: KeyEvent, app: &mut App, tx: &mpsc::Sender<AppEvent>, client: &Client) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Popups capture the keyboard while open.
    if app.input_state.is_some() {
        handle_input_popup(key, app, tx, client);
        return;
    }
    if app.theme_picker.is_some() {
        handle_theme_picker(key, app);
        return;
    }

    handle_normal_mode(key, app);
}

fn handle_normal_mode(key: KeyEvent, app: &mut App) {
    let keys = &app.keys;

    // Quit ('q')
    if keys.matches(key, &keys.quit) {
        // Close popups first, then quit (Neovim-style)
        if app.show_keyhints {
            app.show_keyhints = false;
        } else {
            app.is_running = false;
        }
        return;
    }

    // Keybinding help ('?')
    if keys.matches(key, &keys.toggle_keyhints) {
        app.show_keyhints = !app.show_keyhints;
        return;
    }
    if app.show_keyhints && key.code == KeyCode::Esc {
        app.show_keyhints = false;
        return;
    }

    // Theme picker ('t')
    if keys.matches(key, &keys.theme_picker) {
        let current = ACCENTS
            .iter()
            .position(|(name, _)| *name == app.theme.name)
            .unwrap_or(0);
        app.theme_picker = Some(current);
        return;
    }

    // Panel focus ('Tab')
    if keys.matches(key, &keys.focus_next) {
        app.focus = app.focus.next();
        return;
    }

    // Focus timer ('f' / 'F')
    if keys.matches(key, &keys.timer_toggle) {
        app.timer.toggle();
        if app.timer.remaining_secs == 0 {
            app.show_toast("↺ Session over - reset first");
        } else if app.timer.running {
            app.show_toast("▶ Focus session started");
        } else {
            app.show_toast("⏸ Focus session paused");
        }
        return;
    }
    if keys.matches(key, &keys.timer_reset) {
        app.timer.reset();
        let display = app.timer.display();
        app.show_toast(&format!("↺ Timer reset to {display}"));
        return;
    }

    // Play/Pause ('Space')
    if keys.matches(key, &keys.play_pause) {
        let playing = app.music.toggle_play_pause();
        if !notify_player_missing(app) {
            app.show_toast(if playing { "▶ Play" } else { "⏸ Pause" });
        }
        return;
    }

    // Next Track ('n')
    if keys.matches(key, &keys.next_track) {
        app.music.next();
        if !notify_player_missing(app) {
            app.show_toast("⏭ Next Track");
        }
        return;
    }

    // Prev Track ('p')
    if keys.matches(key, &keys.prev_track) {
        app.music.previous();
        if !notify_player_missing(app) {
            app.show_toast("⏮ Previous Track");
        }
        return;
    }

    // Volume Up ('+')
    if keys.matches(key, &keys.volume_up) {
        let v = app.music.volume_up();
        app.show_toast(&format!("🔊 Volume: {v}%"));
        return;
    }

    // Volume Down ('-')
    if keys.matches(key, &keys.volume_down) {
        let v = app.music.volume_down();
        app.show_toast(&format!("🔉 Volume: {v}%"));
        return;
    }

    // Mute ('m')
    if keys.matches(key, &keys.mute) {
        let muted = app.music.toggle_mute();
        app.show_toast(if muted { "🔇 Muted" } else { "🔊 Unmuted" });
        return;
    }

    // Shuffle ('z')
    if keys.matches(key, &keys.shuffle) {
        let on = app.music.toggle_shuffle();
        app.show_toast(if on { "🔀 Shuffle: ON" } else { "🔀 Shuffle: OFF" });
        return;
    }

    // Repeat ('x')
    if keys.matches(key, &keys.repeat) {
        let mode = app.music.cycle_repeat();
        app.show_toast(&format!("🔁 Repeat: {}", mode.label()));
        return;
    }

    // Video surface ('v')
    if keys.matches(key, &keys.toggle_video) {
        let hidden = app.music.toggle_video();
        app.show_toast(if hidden { "🙈 Video hidden" } else { "📺 Video shown" });
        return;
    }

    // Seek ('h' / 'l')
    if keys.matches(key, &keys.seek_backward) {
        seek_by(app, -5.0);
        return;
    }
    if keys.matches(key, &keys.seek_forward) {
        seek_by(app, 5.0);
        return;
    }

    match app.focus {
        PanelFocus::Music => handle_music_keys(key, app),
        PanelFocus::Tasks => handle_tasks_keys(key, app),
    }
}

fn handle_music_keys(key: KeyEvent, app: &mut App) {
    let keys = &app.keys;
    let len = app.music.tracks().len();

    if keys.matches(key, &keys.nav_down) || keys.matches(key, &keys.nav_down_alt) {
        if len > 0 {
            app.music_selected = (app.music_selected + 1).min(len - 1);
        }
        return;
    }
    if keys.matches(key, &keys.nav_up) || keys.matches(key, &keys.nav_up_alt) {
        app.music_selected = app.music_selected.saturating_sub(1);
        return;
    }

    // Bind the highlighted track ('Enter')
    if keys.matches(key, &keys.select) {
        let Some(track) = app.music.tracks().get(app.music_selected) else {
            return;
        };
        let title = truncate(&track.title, 28);
        app.music.select(app.music_selected);
        if !notify_player_missing(app) {
            app.show_toast(&format!("▶ {title}"));
        }
        return;
    }

    // Add a YouTube link ('a')
    if keys.matches(key, &keys.add) {
        app.input_state = Some(InputState::new(InputMode::AddTrack, "Add YouTube Link", ""));
        return;
    }

    // Remove the highlighted track ('d')
    if keys.matches(key, &keys.delete_item) {
        let Some(track) = app.music.tracks().get(app.music_selected) else {
            return;
        };
        let title = truncate(&track.title, 24);
        app.music.remove_track(app.music_selected);
        app.music_selected = app
            .music_selected
            .min(app.music.tracks().len().saturating_sub(1));
        app.show_toast(&format!("🗑 Removed: {title}"));
        return;
    }

    // Like ('L')
    if keys.matches(key, &keys.like) {
        match app.music.toggle_liked(app.music_selected) {
            Some(true) => app.show_toast("♥ Liked"),
            Some(false) => app.show_toast("♡ Unliked"),
            None => {}
        }
    }
}

fn handle_tasks_keys(key: KeyEvent, app: &mut App) {
    let keys = &app.keys;
    let len = app.tasks.tasks.len();

    if keys.matches(key, &keys.nav_down) || keys.matches(key, &keys.nav_down_alt) {
        if len > 0 {
            app.task_selected = (app.task_selected + 1).min(len - 1);
        }
        return;
    }
    if keys.matches(key, &keys.nav_up) || keys.matches(key, &keys.nav_up_alt) {
        app.task_selected = app.task_selected.saturating_sub(1);
        return;
    }

    // Toggle completion ('Enter')
    if keys.matches(key, &keys.select) {
        if app.task_selected < len {
            app.tasks.toggle(app.task_selected);
            let done = app.tasks.tasks[app.task_selected].completed;
            app.show_toast(if done { "✅ Completed" } else { "⬜ Reopened" });
        }
        return;
    }

    // Add ('a')
    if keys.matches(key, &keys.add) {
        app.input_state = Some(InputState::new(InputMode::AddTask, "Add Task", ""));
        return;
    }

    // Edit ('e')
    if keys.matches(key, &keys.edit_task) {
        let Some(task) = app.tasks.tasks.get(app.task_selected) else {
            return;
        };
        let text = task.text.clone();
        app.input_state = Some(InputState::new(
            InputMode::EditTask(app.task_selected),
            "Edit Task",
            &text,
        ));
        return;
    }

    // Delete with undo window ('d')
    if keys.matches(key, &keys.delete_item) {
        if app.task_selected < len {
            app.tasks.remove(app.task_selected);
            app.task_selected = app
                .task_selected
                .min(app.tasks.tasks.len().saturating_sub(1));
            app.show_toast("🗑 Task deleted · u to undo");
        }
        return;
    }

    // Undo ('u')
    if keys.matches(key, &keys.undo) {
        if app.tasks.undo() {
            app.show_toast("↩ Task restored");
        } else {
            app.show_toast("❌ Nothing to undo");
        }
    }
}

fn handle_theme_picker(key: KeyEvent, app: &mut App) {
    let keys = &app.keys;
    let Some(selected) = app.theme_picker else { return };
    let count = ACCENTS.len();

    if keys.matches(key, &keys.nav_down) || keys.matches(key, &keys.nav_down_alt) {
        app.theme_picker = Some((selected + 1) % count);
        return;
    }
    if keys.matches(key, &keys.nav_up) || keys.matches(key, &keys.nav_up_alt) {
        app.theme_picker = Some(selected.checked_sub(1).unwrap_or(count - 1));
        return;
    }
    if key.code == KeyCode::Enter {
        let (name, _) = ACCENTS[selected];
        app.theme = Theme::by_name(name);
        app.theme_picker = None;
        app.save_state();
        app.show_toast(&format!("◉ {} MODE ACTIVATED", name.to_uppercase()));
        return;
    }
    if key.code == KeyCode::Esc || keys.matches(key, &keys.theme_picker) {
        app.theme_picker = None;
    }
}

fn handle_input_popup(key: KeyEvent, app: &mut App, tx: &mpsc::Sender<AppEvent>, client: &Client) {
    match key.code {
        KeyCode::Esc => {
            app.input_state = None;
        }
        KeyCode::Backspace => {
            if let Some(input) = app.input_state.as_mut() {
                input.value.pop();
            }
        }
        KeyCode::Enter => {
            if let Some(input) = app.input_state.take() {
                submit_input(app, input, tx, client);
            }
        }
        KeyCode::Char(c) => {
            if let Some(input) = app.input_state.as_mut() {
                input.value.push(c);
            }
        }
        _ => {}
    }
}

fn submit_input(app: &mut App, input: InputState, tx: &mpsc::Sender<AppEvent>, client: &Client) {
    let value = input.value.trim().to_string();
    match input.mode {
        InputMode::AddTrack => match app.music.add_track(&value) {
            Ok(id) => {
                spawn_title_fetch(client.clone(), tx.clone(), id);
                app.music_selected = app.music.tracks().len().saturating_sub(1);
                if !notify_player_missing(app) {
                    app.show_toast("➕ Track added");
                }
            }
            // A previous add is still resolving; this one is dropped.
            Err(PlaylistError::AddInFlight) => {}
            Err(e) => {
                app.show_toast(&format!("❌ {e}"));
                // Keep the popup open so the link can be corrected.
                app.input_state = Some(InputState::new(
                    InputMode::AddTrack,
                    "Add YouTube Link",
                    &value,
                ));
            }
        },
        InputMode::AddTask => {
            if app.tasks.add(&value) {
                app.task_selected = app.tasks.tasks.len() - 1;
                app.show_toast("✅ Task added");
            } else {
                app.show_toast("❌ Task text cannot be empty");
            }
        }
        InputMode::EditTask(index) => {
            if value.is_empty() {
                // Editing to nothing deletes, with the usual undo window.
                app.tasks.edit(index, &value);
                app.task_selected = app
                    .task_selected
                    .min(app.tasks.tasks.len().saturating_sub(1));
                app.show_toast("🗑 Task deleted · u to undo");
            } else {
                app.tasks.edit(index, &value);
                app.show_toast("✏ Task updated");
            }
        }
    }
}

/// One-time toast when the playback backend is missing. Returns true when
/// the caller should skip its own success toast.
fn notify_player_missing(app: &mut App) -> bool {
    if !app.music.player_unavailable() {
        return false;
    }
    if !app.warned_no_player {
        app.warned_no_player = true;
        app.show_toast("❌ mpv not found - playback disabled");
    }
    true
}

fn seek_by(app: &mut App, delta_secs: f64) {
    let playback = app.music.playback();
    if playback.duration_secs <= 0.0 {
        return;
    }
    let fraction = ((playback.position_secs + delta_secs) / playback.duration_secs).clamp(0.0, 1.0);
    app.music.seek_to_fraction(fraction);
    app.show_toast(if delta_secs < 0.0 { "⏪ -5s" } else { "⏩ +5s" });
}

fn spawn_title_fetch(client: Client, tx: mpsc::Sender<AppEvent>, id: VideoId) {
    tokio::spawn(async move {
        let fetcher = TitleFetcher::new(client);
        let title = fetcher.fetch_title(&id).await;
        let _ = tx
            .send(AppEvent::TitleUpdate(id.as_str().to_string(), title))
            .await;
    });
}
