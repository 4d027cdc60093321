use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::HistoryStore;
use crate::ui::messages::{info, success};
use crate::utils::path::expand_tilde;
use std::path::Path;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - an empty history file with its header row
pub fn handle(cli: &Cli, config_path: &Path) -> AppResult<()> {
    let cfg = Config::init_all(config_path, cli.history.clone(), cli.test)?;

    info("Initializing moodcoach…");
    if !cli.test {
        println!("📄 Config file : {}", config_path.display());
    }

    let store = HistoryStore::new(expand_tilde(&cfg.history_file));
    store.ensure_exists()?;
    println!("🗂️  History    : {}", store.path().display());

    success("moodcoach initialization completed!");
    Ok(())
}
