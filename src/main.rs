mod api;
mod app;
mod components;
mod config;
mod error;
mod executor;
mod logging;
mod models;
mod tui;

use anyhow::{Context, Result};
use api::HttpUserApi;
use app::App;
use clap::Parser;
use components::accounts::Accounts;
use config::{Cli, Config};
use crossterm::terminal::{self, LeaveAlternateScreen};
use executor::Executor;
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use tui::Tui;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init_logging(&cli.log_file, &cli.log_level)?;
    let config = Config::from_cli(&cli);
    tracing::info!(base_url = %config.base_url, timeout = ?config.timeout, "configuration loaded");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let api = HttpUserApi::new(&config).context("Failed to build HTTP client")?;
    let (executor, results) = Executor::new(Arc::new(api), runtime.handle().clone());
    let mut app = App::new(Accounts::new(config.base_url.clone()), executor, results);

    let _guard = CleanupGuard;

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let mut tui = Tui::new(terminal);
    tui.init()?;

    let res = app.run(&mut tui);

    tui.exit()?;

    if let Err(e) = res {
        tracing::error!(error = %e, "application error");
        eprintln!("Application Error: {e}");
    }
    Ok(())
}

struct CleanupGuard;

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        // Ignore errors during cleanup
        let _ = terminal::disable_raw_mode();
        let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen);
    }
}
