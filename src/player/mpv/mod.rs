use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use serde_json::json;

use super::traits::{PlayerEvent, PlayerHandle, PlayerSpawner, SpawnSettings};

static MPV_AVAILABLE: OnceCell<bool> = OnceCell::new();
static SOCKET_SEQ: AtomicU64 = AtomicU64::new(0);

/// Checks once per process whether the configured mpv binary runs at all.
/// Later calls return the cached answer.
pub fn probe(binary: &str) -> bool {
    *MPV_AVAILABLE.get_or_init(|| {
        let ok = Command::new(binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false);
        if ok {
            tracing::info!(binary, "mpv backend available");
        } else {
            tracing::warn!(binary, "mpv not found, playback disabled");
        }
        ok
    })
}

/// Lines mpv writes on its IPC socket. Command replies carry `error` and
/// `request_id`, asynchronous notifications carry `event`.
#[derive(Debug, Deserialize)]
struct IpcMessage {
    #[serde(default)]
    event: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

/// One mpv process playing a single YouTube URL, remote-controlled over its
/// JSON IPC socket.
///
/// The socket is connected lazily: mpv creates it shortly after spawn, so
/// commands sent in that window fail and are simply retried by the caller on
/// the next tick. All socket IO is non-blocking.
pub struct MpvPlayer {
    process: Child,
    socket_path: PathBuf,
    conn: Option<BufReader<UnixStream>>,
    observers_registered: bool,
    request_id: u64,
}

impl MpvPlayer {
    pub fn spawn(binary: &str, video_id: &str, settings: &SpawnSettings) -> Result<Self> {
        let seq = SOCKET_SEQ.fetch_add(1, Ordering::Relaxed);
        let socket_path = std::env::temp_dir().join(format!(
            "lockin-mpv-{}-{}.sock",
            std::process::id(),
            seq
        ));
        let url = format!("https://www.youtube.com/watch?v={video_id}");

        let process = Command::new(binary)
            .arg(format!("--input-ipc-server={}", socket_path.display()))
            .arg("--no-terminal")
            .arg("--really-quiet")
            // Pause at the end instead of exiting so we still observe
            // eof-reached and can restart the same instance.
            .arg("--keep-open=yes")
            .arg(format!("--volume={}", settings.volume))
            .arg(format!("--mute={}", if settings.muted { "yes" } else { "no" }))
            .arg(format!(
                "--vid={}",
                if settings.video_visible { "auto" } else { "no" }
            ))
            .arg(&url)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to spawn {binary}"))?;

        tracing::info!(video_id, pid = process.id(), "spawned mpv");

        Ok(Self {
            process,
            socket_path,
            conn: None,
            observers_registered: false,
            request_id: 0,
        })
    }

    /// Connect to the IPC socket if we have not yet, and register property
    /// observers on a fresh connection.
    fn ensure_conn(&mut self) -> Result<()> {
        if self.conn.is_none() {
            let stream = UnixStream::connect(&self.socket_path)
                .context("mpv control socket not ready")?;
            stream.set_nonblocking(true)?;
            self.conn = Some(BufReader::new(stream));
            self.observers_registered = false;
        }
        if !self.observers_registered {
            self.observers_registered = true;
            for (idx, prop) in ["time-pos", "duration", "eof-reached", "pause"]
                .iter()
                .enumerate()
            {
                let _ = self.send_command(json!(["observe_property", idx as u64 + 1, prop]));
            }
        }
        Ok(())
    }

    fn send_command(&mut self, command: serde_json::Value) -> Result<()> {
        self.ensure_conn()?;
        let conn = self.conn.as_mut().context("mpv socket not connected")?;
        self.request_id += 1;
        let msg = json!({ "command": command, "request_id": self.request_id });
        if let Err(e) = writeln!(conn.get_mut(), "{msg}") {
            // Dead socket; drop it so the next command reconnects.
            self.conn = None;
            return Err(e.into());
        }
        Ok(())
    }

    fn set_property(&mut self, name: &str, value: serde_json::Value) -> Result<()> {
        self.send_command(json!(["set_property", name, value]))
    }

    fn shutdown_process(&mut self) {
        let _ = self.send_command(json!(["quit"]));
        let _ = self.process.kill();
        let _ = self.process.wait();
        let _ = std::fs::remove_file(&self.socket_path);
        self.conn = None;
        tracing::debug!(socket = %self.socket_path.display(), "mpv torn down");
    }
}

impl PlayerHandle for MpvPlayer {
    fn play(&mut self) -> Result<()> {
        self.set_property("pause", json!(false))
    }

    fn pause(&mut self) -> Result<()> {
        self.set_property("pause", json!(true))
    }

    fn seek(&mut self, secs: f64) -> Result<()> {
        self.send_command(json!(["seek", secs, "absolute"]))
    }

    fn set_volume(&mut self, volume: u8) -> Result<()> {
        self.set_property("volume", json!(volume))
    }

    fn set_muted(&mut self, muted: bool) -> Result<()> {
        self.set_property("mute", json!(muted))
    }

    fn set_video_visible(&mut self, visible: bool) -> Result<()> {
        self.set_property("vid", json!(if visible { "auto" } else { "no" }))
    }

    fn drain_events(&mut self) -> Vec<PlayerEvent> {
        let mut events = Vec::new();
        if self.ensure_conn().is_err() {
            return events;
        }
        let Some(conn) = self.conn.as_mut() else {
            return events;
        };

        let mut disconnected = false;
        let mut line = String::new();
        loop {
            line.clear();
            match conn.read_line(&mut line) {
                // EOF: mpv went away. Drop the connection and let the
                // controller find out via silence.
                Ok(0) => {
                    disconnected = true;
                    break;
                }
                Ok(_) => {
                    let Ok(msg) = serde_json::from_str::<IpcMessage>(&line) else {
                        tracing::debug!(line = line.trim(), "unparseable mpv message");
                        continue;
                    };
                    match msg.event.as_deref() {
                        Some("property-change") => match msg.name.as_deref() {
                            Some("time-pos") => {
                                if let Some(v) = msg.data.as_ref().and_then(|d| d.as_f64()) {
                                    events.push(PlayerEvent::Position(v));
                                }
                            }
                            Some("duration") => {
                                if let Some(v) = msg.data.as_ref().and_then(|d| d.as_f64()) {
                                    events.push(PlayerEvent::Duration(v));
                                }
                            }
                            Some("eof-reached") => {
                                if msg.data.as_ref().and_then(|d| d.as_bool()) == Some(true) {
                                    events.push(PlayerEvent::Ended);
                                }
                            }
                            Some("pause") => match msg.data.as_ref().and_then(|d| d.as_bool()) {
                                Some(true) => events.push(PlayerEvent::Paused),
                                Some(false) => events.push(PlayerEvent::Playing),
                                None => {}
                            },
                            _ => {}
                        },
                        Some("end-file") => events.push(PlayerEvent::Ended),
                        _ => {}
                    }
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => break,
                Err(_) => break,
            }
        }
        if disconnected {
            self.conn = None;
        }
        events
    }

    fn shutdown(&mut self) {
        self.shutdown_process();
    }
}

impl Drop for MpvPlayer {
    fn drop(&mut self) {
        self.shutdown_process();
    }
}

/// Spawns [`MpvPlayer`] instances with a configurable binary name.
pub struct MpvSpawner {
    binary: String,
}

impl MpvSpawner {
    pub fn new(binary: String) -> Self {
        Self { binary }
    }
}

impl PlayerSpawner for MpvSpawner {
    fn available(&mut self) -> bool {
        probe(&self.binary)
    }

    fn spawn(&mut self, video_id: &str, settings: &SpawnSettings) -> Result<Box<dyn PlayerHandle>> {
        Ok(Box::new(MpvPlayer::spawn(&self.binary, video_id, settings)?))
    }
}
