use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::views;
use crate::errors::{AppError, AppResult};
use crate::store::HistoryStore;
use crate::ui::messages::header;
use crate::utils::path::expand_tilde;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Mood { days } = cmd {
        let days = days.unwrap_or(cfg.mood_days);
        if days <= 0 {
            return Err(AppError::Config(format!("--days must be positive, got {days}")));
        }

        let store = HistoryStore::new(expand_tilde(&cfg.history_file));
        let records = store.load()?;

        header(format!("📊 Mood Overview (last {days} days)"));
        print!(
            "{}",
            views::render_mood(&records, days, Local::now().naive_local())
        );
    }
    Ok(())
}
