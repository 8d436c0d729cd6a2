//! dexcard - Creature Lookup
//!
//! A terminal front-end that looks up a creature by name or number and shows
//! its artwork link, types, size, abilities and base stats as a card.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use dexcard::application::{App, LookupCompletion, LookupWorker};
use dexcard::domain::CardConfig;
use dexcard::infrastructure::{init_file_logging, HttpCreatureSource, DEFAULT_BASE_URL};
use dexcard::presentation::{render_ui, InputHandler, InputOutcome, TerminalView};

const TICK_RATE: Duration = Duration::from_millis(100);

#[derive(Debug, Parser)]
#[command(name = "dexcard")]
#[command(about = "Look up a creature by name or number and show its card")]
struct Cli {
    /// Name or number to search for on start-up
    query: Option<String>,

    /// Root of the creature endpoint; requests go to <BASE_URL>/<query>
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Append logs to this file (RUST_LOG sets the filter)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Entry point for the dexcard terminal front-end.
///
/// Sets up logging and the HTTP client, then the terminal, and runs the
/// event loop until the user quits.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_file_logging(path)
            .with_context(|| format!("failed to set up logging to {}", path.display()))?;
    }

    let source = HttpCreatureSource::new(cli.base_url.clone())
        .context("failed to build HTTP client")?;
    tracing::info!(base_url = source.base_url(), "starting dexcard");
    let (worker, completions) =
        LookupWorker::new(Arc::new(source), Arc::new(CardConfig::default()));

    let mut app = App::default();
    if let Some(query) = cli.query {
        app.input = query;
        app.move_cursor_end();
        if let Some(request) = app.submit_search() {
            worker.dispatch(request);
        }
    }

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &worker, &completions);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "event loop failed");
        eprintln!("{err:?}");
    }

    Ok(())
}

/// Main event loop.
///
/// Applies finished lookups, redraws, and feeds key presses to the input
/// handler. Polls with a short timeout so the loading spinner keeps moving
/// and completions are picked up while no key is pressed.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    worker: &LookupWorker,
    completions: &Receiver<LookupCompletion>,
) -> io::Result<()> {
    let mut view = TerminalView::default();

    loop {
        while let Ok(completion) = completions.try_recv() {
            app.complete_lookup(completion);
        }

        app.present(&mut view);
        terminal.draw(|f| render_ui(f, app, &view))?;

        if !event::poll(TICK_RATE)? {
            app.advance_tick();
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match InputHandler::handle_key_event(app, key.code, key.modifiers) {
                    InputOutcome::Quit => return Ok(()),
                    InputOutcome::Lookup(request) => worker.dispatch(request),
                    InputOutcome::Continue => {}
                }
            }
        }
    }
}
