use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use lockin::app::cli::Args;
use lockin::app::config::{AppConfig, UserConfig};
use lockin::app::events::AppEvent;
use lockin::app::{input_handler, App};
use lockin::player::MpvSpawner;
use lockin::tasks::TaskStore;
use lockin::ui;

/// File logging only: stdout belongs to the TUI.
fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let log_dir = AppConfig::get_log_dir();
    let _ = std::fs::create_dir_all(&log_dir);

    let file_appender = tracing_appender::rolling::daily(log_dir, "lockin.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lockin=info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .init();
    guard
}

/// Restore the terminal before the default panic output, or the
/// message lands inside the alternate screen and vanishes.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.generate_config {
        println!("{}", toml::to_string_pretty(&UserConfig::default())?);
        return Ok(());
    }

    let _log_guard = init_logging();
    install_panic_hook();

    // Load persisted state, then CLI flags win.
    let (mut user, mut state) = AppConfig::load();
    if let Some(v) = args.volume {
        state.volume = v.min(100);
    }
    if args.hidden {
        state.video_hidden = true;
    }
    if let Some(m) = args.focus_minutes {
        user.focus_minutes = m;
    }
    if let Some(bin) = args.mpv_binary {
        user.mpv_binary = bin;
    }

    // WINDOW TITLE 🏷️
    print!("\x1b]2;LOCK-IN\x07");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let spawner = MpvSpawner::new(user.mpv_binary.clone());
    let tasks = TaskStore::load(AppConfig::get_tasks_path());
    let mut app = App::new(user, state, tasks, Box::new(spawner));

    tracing::info!("session started");

    let (tx, mut rx) = mpsc::channel(100);

    // Global HTTP Client (Reused)
    let client = reqwest::Client::builder()
        .user_agent(concat!("lockin/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default();

    // 1. Input Event Task
    let tx_input = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if tx_input.send(AppEvent::Input(event)).await.is_err() {
                break;
            }
        }
    });

    // 2. Animation Tick Task ⚡
    let tx_tick = tx.clone();
    tokio::spawn(async move {
        // 60 FPS Update Rate (approx 16ms)
        let mut interval = tokio::time::interval(Duration::from_millis(16));
        loop {
            interval.tick().await;
            if tx_tick.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });

    // 3. Second Poll Task ⏱️ (focus timer + player events)
    let tx_poll = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        loop {
            interval.tick().await;
            if tx_poll.send(AppEvent::Poll).await.is_err() {
                break;
            }
        }
    });

    loop {
        terminal.draw(|f| ui::ui(f, &mut app))?;

        if let Some(event) = rx.recv().await {
            match event {
                AppEvent::Input(Event::Key(key)) => {
                    input_handler::handle_key(key, &mut app, &tx, &client);
                }
                AppEvent::Input(_) => {}
                AppEvent::TitleUpdate(id, title) => {
                    app.music.resolve_title(&id, title);
                }
                AppEvent::Tick => app.on_tick(),
                AppEvent::Poll => app.on_poll(),
            }
        }

        if !app.is_running {
            break;
        }
    }

    // Persist and stop the player before leaving the alternate screen.
    app.save_state();
    app.music.teardown();
    tracing::info!("session ended");

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
