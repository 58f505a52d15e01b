//! `Taskboard`: terminal task tracker.
//!
//! Loads saved tasks, fetches the assignable user roster in the background,
//! and runs the TUI. Configuration via CLI flags, environment variables, or
//! config file (`~/.config/taskboard/config.toml`).
//!
//! ```bash
//! cargo run --bin taskboard
//!
//! # Point at a different roster and data directory
//! cargo run --bin taskboard -- --roster-url http://127.0.0.1:8080/users \
//!     --data-dir /tmp/taskboard
//! ```

use std::io;
use std::path::Path;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_appender::non_blocking::WorkerGuard;

use taskboard::app::App;
use taskboard::config::{CliArgs, ClientConfig};
use taskboard::session::Session;
use taskboard::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // CLI args > env > config file > defaults.
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load configuration: {e}");
            ClientConfig::default()
        }
    };

    // Logs go to a file; the terminal belongs to ratatui.
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("taskboard starting");

    let session = match Session::open(&config) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error = %e, "failed to open session");
            eprintln!("Error: {e}");
            return Err(io::Error::other(e));
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &session, &config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskboard exiting");
    result
}

/// Initialize file-based logging.
///
/// Returns a [`WorkerGuard`] that must be held until shutdown so buffered
/// log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskboard.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop. The roster load keeps running on the runtime's
/// worker threads while this loop blocks on terminal input.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &Session,
    config: &ClientConfig,
) -> io::Result<()> {
    let mut app = App::new(session.store().clone())
        .with_search_debounce(config.search_debounce)
        .with_max_task_title_len(config.max_task_title_len);

    loop {
        // Settle the search text once its quiet period has elapsed.
        let now = Instant::now();
        app.tick(now);

        terminal.draw(|frame| ui::draw(frame, &app))?;

        if event::poll(app.poll_timeout(now, config.poll_timeout))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key_event(key, Instant::now());
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
