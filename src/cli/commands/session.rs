use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::{InputMode, Session};
use crate::errors::AppResult;
use std::io;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Session { voice, speak } = cmd {
        let mut session = Session::from_config(cfg)?;
        session.play_audio = *speak;
        if *voice {
            session.mode = InputMode::Voice;
        }

        session.print_overview()?;
        session.run(io::stdin().lock())?;
    }
    Ok(())
}
