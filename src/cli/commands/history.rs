use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::views;
use crate::errors::AppResult;
use crate::store::HistoryStore;
use crate::ui::messages::header;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::History { limit } = cmd {
        let store = HistoryStore::new(expand_tilde(&cfg.history_file));
        let records = store.load()?;

        header("📈 Your Recent Check-ins");
        print!(
            "{}",
            views::render_recent(&records, limit.unwrap_or(cfg.recent_limit))
        );
    }
    Ok(())
}
