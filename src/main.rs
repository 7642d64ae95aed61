use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use vichat::app::App;
use vichat::buffer::Buffer;
use vichat::ui;

#[derive(Parser)]
#[command(name = "vichat", about = "A chat composer with vi-style editing")]
struct Cli {
    /// Preload the draft from this file
    #[arg(long)]
    draft: Option<PathBuf>,

    /// Append every sent message to this file
    #[arg(long)]
    transcript: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Height of the draft box in rows
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..))]
    height: u16,
}

fn init_logging(path: &Path) -> Result<WorkerGuard> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("log path '{}' has no file name", path.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vichat=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))?;
    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // The guard flushes buffered log lines when main returns.
    let _log_guard = cli.log_file.as_deref().map(init_logging).transpose()?;

    let draft = match &cli.draft {
        Some(path) => Buffer::from_file(path)?,
        None => Buffer::new(),
    };
    let mut app = App::new(draft, cli.transcript);
    info!(height = cli.height, "composer started");

    // Set up terminal
    terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, cli.height);

    // Teardown runs even if the loop errored
    terminal::disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    info!(messages = app.transcript.len(), "composer closed");
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    draft_height: u16,
) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::draw(frame, app, draft_height))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }
    }
    Ok(())
}
