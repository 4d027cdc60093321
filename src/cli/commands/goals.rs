use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::views;
use crate::errors::AppResult;
use crate::store::HistoryStore;
use crate::ui::messages::header;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Goals { all } = cmd {
        let store = HistoryStore::new(expand_tilde(&cfg.history_file));
        let records = store.load()?;

        header("✅ Goal Completion");
        if *all {
            print!("{}", views::render_all_goals(&records));
        } else {
            print!("{}", views::render_pending(&records));
        }
    }
    Ok(())
}
