//! Gallery - every tui-controls component in one order form
//!
//! Country: searchable single select with "add option"
//! Toppings: multi select with "select all"
//! Region: disabled dropdown with a tooltip
//!
//! Keys: Tab/Shift+Tab = move focus, Ctrl+S = submit, Ctrl+Q = quit.
//! Bindings can be overridden in `<config dir>/tui-controls/gallery.toml`.

mod action;
mod config;
mod reducer;
mod state;
mod ui;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tui_controls::{
    process_raw_event, spawn_event_poller, EventKind, LoggingMiddleware, RawEvent,
    StoreWithMiddleware,
};

use crate::action::AppAction;
use crate::config::{builtin_countries, load_config, load_items, GalleryConfig};
use crate::reducer::reducer;
use crate::state::AppState;
use crate::ui::GalleryUi;

#[derive(Parser, Debug)]
#[command(name = "gallery")]
#[command(about = "Dialog, dropdown, checkbox and tooltip demo for tui-controls")]
struct Args {
    /// Config file (default: <config dir>/tui-controls/gallery.toml)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// JSON array of country items
    #[arg(long)]
    items: Option<PathBuf>,

    /// Write logs here; RUST_LOG picks the level
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Logs go to a file only, the terminal belongs to the UI
fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gallery=debug,tui_controls_core=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;

    let config = load_config(args.config.as_deref())?;
    let countries = match &args.items {
        Some(path) => load_items(path)?,
        None => builtin_countries(),
    };
    tracing::info!(countries = countries.len(), "Starting gallery");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, config, countries).await;

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: GalleryConfig,
    countries: Vec<tui_controls::Item<u32>>,
) -> anyhow::Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppAction>();

    let state = AppState::new(countries);
    let mut ui = GalleryUi::new(config, &state);
    tracing::debug!(listeners = ui.registry().len(), "Components mounted");
    let mut store = StoreWithMiddleware::new(state, reducer, LoggingMiddleware::new());

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let cancel_token = CancellationToken::new();
    let _handle = spawn_event_poller(
        event_tx,
        Duration::from_millis(10),
        Duration::from_millis(16),
        cancel_token.clone(),
    );

    let mut should_render = true;

    loop {
        if should_render {
            terminal.draw(|frame| ui.render(frame, store.state()))?;
            should_render = false;
        }

        tokio::select! {
            Some(raw) = event_rx.recv() => {
                let event = process_raw_event(raw);
                // Components keep local state (open panels, hover), so any
                // event they saw may need a redraw
                should_render = !matches!(event, EventKind::Tick);
                for action in ui.handle_event(&event, store.state()) {
                    let _ = action_tx.send(action);
                }
            }

            Some(action) = action_rx.recv() => {
                if matches!(action, AppAction::Quit) {
                    cancel_token.cancel();
                    break;
                }
                should_render |= store.dispatch(action);
            }
        }
    }

    Ok(())
}
