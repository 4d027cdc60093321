use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::{self, HistoryStore};
use crate::ui::messages::{info, success};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Done { ids, index } = cmd {
        let history = HistoryStore::new(expand_tilde(&cfg.history_file));

        let mut changed = 0;
        if !index.is_empty() {
            changed += history.mark_completed(index)?;
        }
        if !ids.is_empty() {
            let records = history.load()?;
            let resolved = store::resolve_ids(&records, ids)?;
            changed += history.mark_completed_ids(&resolved)?;
        }

        if changed == 0 {
            info("Those goals were already completed.");
        } else {
            success(format!("Nice work. {changed} goal(s) marked as completed."));
        }
    }
    Ok(())
}
