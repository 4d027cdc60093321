//! moodcoach library root.
//! Exposes the CLI parser, the high-level run() function, and the internal
//! modules (catalogue, classifier, coach, history store, speech).

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod services;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::{Path, PathBuf};
use utils::path::expand_tilde;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, config_path: &Path) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, config_path),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg, config_path),
        Commands::Checkin { .. } => cli::commands::checkin::handle(&cli.command, cfg),
        Commands::History { .. } => cli::commands::history::handle(&cli.command, cfg),
        Commands::Mood { .. } => cli::commands::mood::handle(&cli.command, cfg),
        Commands::Goals { .. } => cli::commands::goals::handle(&cli.command, cfg),
        Commands::Done { .. } => cli::commands::done::handle(&cli.command, cfg),
        Commands::Session { .. } => cli::commands::session::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let config_path: PathBuf = cli
        .config
        .as_deref()
        .map(expand_tilde)
        .unwrap_or_else(Config::config_file);

    // config is loaded once and handed down
    let mut cfg = Config::load_from(&config_path)?;

    if let Some(custom) = &cli.history {
        cfg.history_file = custom.clone();
    }

    dispatch(&cli, &cfg, &config_path)
}
