mod activity;
mod app;
mod bootstrap;
mod cli;
mod config;
mod grid;
mod logging;
mod runtime;
mod session_store;
mod store;
mod ui;

use anyhow::Result;
use app::App;
use chrono::Local;
use clap::Parser;
use cli::{Cli, Commands};
use crate::config::TimegridConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use session_store::CredentialStore;
use std::io;
use store::TimesheetStore;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let cfg = TimegridConfig::load()?;
    let _log_guard = logging::enable_logging(&logging::log_dir()?, &cfg.log_level)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let credentials = CredentialStore::default_location()?;
            let store = bootstrap::connect_sheets(&cfg, &credentials).await?;
            run_tui(&store).await
        }
        Commands::Dev => {
            println!("Running in dev mode with in-memory data.");
            run_tui(&bootstrap::dev_store()).await
        }
        Commands::Setup {
            key,
            spreadsheet_id,
        } => {
            let credentials = CredentialStore::default_location()?;
            bootstrap::setup(&key, &spreadsheet_id, cfg, &credentials).await
        }
        Commands::Reset => {
            let credentials = CredentialStore::default_location()?;
            bootstrap::reset(cfg, &credentials)
        }
        Commands::ConfigPath => {
            let path = TimegridConfig::config_path()?;
            TimegridConfig::ensure_exists(&path)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

async fn run_tui(store: &dyn TimesheetStore) -> Result<()> {
    let mut app = App::new(&Local::now(), store.label());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, store).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!("terminal session failed: {:?}", err);
    }
    if app.dirty {
        println!("Exited with unsaved changes.");
    }

    res
}
