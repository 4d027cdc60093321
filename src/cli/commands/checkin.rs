use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::{Session, print_outcome, report_transcript};
use crate::errors::AppResult;
use crate::services::speech::Transcript;
use crate::ui::messages::info;
use crate::utils::path::expand_tilde;

/// One-shot check-in: capture input, reflect, save, show goals.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkin { text, voice, speak } = cmd {
        let mut session = Session::from_config(cfg)?;
        session.play_audio = *speak;

        if let Some(path) = voice {
            info("Processing your audio...");
            let transcript = session.capture_voice_file(&expand_tilde(path))?;
            report_transcript(&transcript);
            if transcript == Transcript::NoSpeech {
                return Ok(());
            }
        } else if let Some(t) = text {
            session.set_text(t);
        }

        let outcome = session.submit()?;
        print_outcome(&outcome);

        println!();
        for row in &outcome.rows {
            println!("[{}] {}", row.short_id(), row.goal);
        }
        info("Mark a goal done with `moodcoach done <id>`.");
    }
    Ok(())
}
