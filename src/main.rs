//! Hair Assessment TUI - multi-step hair-loss assessment form
//!
//! A Ratatui-based questionnaire that persists answers locally and
//! forwards leads to the LeadSquared CRM.

mod app;
mod config;
mod crm;
mod phone;
mod state;
mod storage;
mod ui;

use anyhow::Result;
use app::App;
use config::AppConfig;
use crm::LeadSubmitter;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use storage::{FileStore, KeyValueStore, MemoryStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE: &str = "hair-assessment.log";

/// How long to wait for in-flight lead requests on exit
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config);

    let storage: Box<dyn KeyValueStore> = match config.data_dir() {
        Some(dir) => match FileStore::open(&dir) {
            Ok(store) => {
                tracing::info!("Form state stored in {}", store.path().display());
                Box::new(store)
            }
            Err(e) => {
                tracing::warn!("Local storage unavailable, answers will not persist: {e}");
                Box::new(MemoryStore::new())
            }
        },
        None => {
            tracing::warn!("No data directory, answers will not persist");
            Box::new(MemoryStore::new())
        }
    };
    let submitter = LeadSubmitter::from_config(&config.crm)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(&config, storage, submitter);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    drain_dispatches(&mut app).await;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file in the data directory; stderr would corrupt the screen
fn init_logging(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hair_assessment_tui=info".into());

    let file = config.data_dir().and_then(|dir| {
        std::fs::create_dir_all(&dir).ok()?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(LOG_FILE))
            .ok()
    });

    match file {
        Some(file) => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        None => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // 16ms (~60fps) while a shake is running, 100ms otherwise
        let poll_duration = if app.is_animating() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_duration)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    // Global quit: Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }
                    app.handle_key(key);
                }
            }
        }

        app.tick();

        if app.should_quit() {
            return Ok(());
        }
    }
}

/// Give pending lead requests a chance to finish before the runtime shuts down
async fn drain_dispatches(app: &mut App) {
    let pending = std::mem::take(&mut app.dispatches);
    if pending.is_empty() {
        return;
    }
    tracing::debug!("Waiting for {} lead request(s)", pending.len());
    let wait = async {
        for handle in pending {
            let _ = handle.await;
        }
    };
    if tokio::time::timeout(DRAIN_TIMEOUT, wait).await.is_err() {
        tracing::warn!("Lead requests still pending after {DRAIN_TIMEOUT:?}, exiting");
    }
}
