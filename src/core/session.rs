//! One user's check-in session: components built once, plus the little bit
//! of state that has to survive between commands.

use crate::config::Config;
use crate::core::coach::{Coach, CoachResponse};
use crate::core::goals::suggest_goals;
use crate::core::views;
use crate::errors::{AppError, AppResult};
use crate::models::CheckinRecord;
use crate::services::classifier::EmotionModel;
use crate::services::llm::OllamaClient;
use crate::services::speech::{
    HttpRecognizer, HttpSynthesizer, SpeechError, SpeechToText, TextToSpeech, Transcript,
};
use crate::store::{self, HistoryStore};
use crate::ui::messages::{error, header, info, success, warning};
use crate::utils::formatting::italic;
use crate::utils::path::expand_tilde;
use chrono::Local;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info as trace_info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Text,
    Voice,
}

#[derive(Debug)]
pub enum AudioOutcome {
    Skipped,
    Written(PathBuf),
    Failed(SpeechError),
}

/// Everything produced by one submission.
#[derive(Debug)]
pub struct CheckinOutcome {
    pub emotion: String,
    pub goals: Vec<String>,
    pub response: CoachResponse,
    pub audio: AudioOutcome,
    pub rows: Vec<CheckinRecord>,
}

pub struct Session {
    model: EmotionModel,
    coach: Coach,
    recognizer: Box<dyn SpeechToText>,
    synthesizer: Box<dyn TextToSpeech>,
    store: HistoryStore,
    goals_per_checkin: usize,
    recent_limit: usize,
    mood_days: i64,

    pub mode: InputMode,
    pub play_audio: bool,
    user_text: String,
}

impl Session {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        model: EmotionModel,
        coach: Coach,
        recognizer: Box<dyn SpeechToText>,
        synthesizer: Box<dyn TextToSpeech>,
        store: HistoryStore,
        goals_per_checkin: usize,
        recent_limit: usize,
        mood_days: i64,
    ) -> Self {
        Self {
            model,
            coach,
            recognizer,
            synthesizer,
            store,
            goals_per_checkin,
            recent_limit,
            mood_days,
            mode: InputMode::Text,
            play_audio: false,
            user_text: String::new(),
        }
    }

    /// Wire up the HTTP-backed services described by `cfg`.
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        let model = EmotionModel::from_config(&cfg.classifier)?;
        let generator =
            OllamaClient::new(&cfg.llm).map_err(|e| AppError::Config(e.to_string()))?;
        let coach = Coach::new(Box::new(generator), cfg.llm.prompt_words, cfg.llm.max_words);
        let recognizer = HttpRecognizer::new(&cfg.speech)?;
        let synthesizer = HttpSynthesizer::new(&cfg.speech, &expand_tilde(&cfg.audio_file))?;
        let store = HistoryStore::new(expand_tilde(&cfg.history_file));

        Ok(Self::new(
            model,
            coach,
            Box::new(recognizer),
            Box::new(synthesizer),
            store,
            cfg.goals_per_checkin,
            cfg.recent_limit,
            cfg.mood_days,
        ))
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    pub fn set_text(&mut self, text: &str) {
        self.user_text = text.to_string();
    }

    /// Transcribe a recording. Recognised speech replaces the input buffer;
    /// anything else leaves it untouched.
    pub fn capture_voice(&mut self, audio_bytes: &[u8]) -> AppResult<Transcript> {
        let transcript = self.recognizer.transcribe(audio_bytes)?;
        if let Transcript::Text(t) = &transcript {
            self.user_text = t.clone();
        }
        Ok(transcript)
    }

    pub fn capture_voice_file(&mut self, path: &Path) -> AppResult<Transcript> {
        let bytes = fs::read(path)?;
        self.capture_voice(&bytes)
    }

    /// Classify, pick goals, compose, optionally speak, and persist.
    pub fn submit(&mut self) -> AppResult<CheckinOutcome> {
        if self.user_text.trim().is_empty() {
            return Err(AppError::EmptyInput);
        }
        let text = self.user_text.clone();

        let emotion = self.model.predict_emotion(&text)?;
        let goals = suggest_goals(&emotion, self.goals_per_checkin);
        let response = self.coach.build_coach_response(&text, &emotion, &goals);

        let audio = if self.play_audio {
            match self.synthesizer.speak(response.text()) {
                Ok(Some(path)) => AudioOutcome::Written(path),
                Ok(None) => AudioOutcome::Skipped,
                Err(e) => AudioOutcome::Failed(e),
            }
        } else {
            AudioOutcome::Skipped
        };

        let rows = self.store.append(&text, &emotion, &goals)?;
        trace_info!(%emotion, goals = rows.len(), fallback = response.is_fallback(), "check-in saved");

        Ok(CheckinOutcome {
            emotion,
            goals,
            response,
            audio,
            rows,
        })
    }

    /// Mark goals completed by (prefix of) id. Returns how many changed.
    pub fn complete(&self, ids: &[String]) -> AppResult<usize> {
        let records = self.store.load()?;
        let resolved = store::resolve_ids(&records, ids)?;
        self.store.mark_completed_ids(&resolved)
    }

    pub fn render_history(&self) -> AppResult<String> {
        let records = self.store.load()?;
        Ok(views::render_recent(&records, self.recent_limit))
    }

    pub fn render_mood(&self) -> AppResult<String> {
        let records = self.store.load()?;
        Ok(views::render_mood(
            &records,
            self.mood_days,
            Local::now().naive_local(),
        ))
    }

    pub fn render_pending(&self) -> AppResult<String> {
        let records = self.store.load()?;
        Ok(views::render_pending(&records))
    }

    /// Print the three history views, the way the page looks after a submit.
    pub fn print_overview(&self) -> AppResult<()> {
        header("📈 Your Recent Check-ins");
        print!("{}", self.render_history()?);
        header(format!("📊 Mood Overview (last {} days)", self.mood_days));
        print!("{}", self.render_mood()?);
        header("✅ Goal Completion");
        print!("{}", self.render_pending()?);
        Ok(())
    }

    /// Interactive loop over `input`. Returns on `/quit` or end of input.
    pub fn run<R: BufRead>(&mut self, input: R) -> AppResult<()> {
        info("Tell me how you feel, then /submit. Type /help for commands.");
        prompt(self.mode);

        for line in input.lines() {
            let line = line?;
            match SessionCommand::parse(&line) {
                SessionCommand::Quit => break,
                cmd => {
                    if let Err(e) = self.handle(cmd) {
                        error(e);
                    }
                }
            }
            prompt(self.mode);
        }

        println!();
        Ok(())
    }

    fn handle(&mut self, cmd: SessionCommand) -> AppResult<()> {
        match cmd {
            SessionCommand::Input(line) => match self.mode {
                InputMode::Text => {
                    self.user_text = line;
                    success("Got it. /submit when ready.");
                }
                InputMode::Voice => {
                    info("Processing your audio...");
                    let transcript = self.capture_voice_file(&expand_tilde(line.trim()))?;
                    report_transcript(&transcript);
                }
            },
            SessionCommand::Mode(mode) => {
                self.mode = mode;
                match mode {
                    InputMode::Text => info("Text mode: type how you are feeling."),
                    InputMode::Voice => info("Voice mode: enter the path of a WAV recording."),
                }
            }
            SessionCommand::Audio(on) => {
                self.play_audio = on;
                info(format!(
                    "Spoken responses {}.",
                    if on { "enabled" } else { "disabled" }
                ));
            }
            SessionCommand::Show => {
                if self.user_text.trim().is_empty() {
                    info("No input captured yet.");
                } else {
                    println!("Current input:\n{}", self.user_text);
                }
            }
            SessionCommand::Submit => match self.submit() {
                Ok(outcome) => {
                    print_outcome(&outcome);
                    self.print_overview()?;
                }
                Err(AppError::EmptyInput) => {
                    warning("Please provide what you feel (text or voice) before continuing.")
                }
                Err(e) => return Err(e),
            },
            SessionCommand::History => print!("{}", self.render_history()?),
            SessionCommand::Mood => print!("{}", self.render_mood()?),
            SessionCommand::Goals => print!("{}", self.render_pending()?),
            SessionCommand::Done(ids) => {
                if ids.is_empty() {
                    warning("Usage: /done <id> [<id>...]");
                } else {
                    let n = self.complete(&ids)?;
                    success(format!("Nice work. {n} goal(s) marked as completed."));
                }
            }
            SessionCommand::Help => print_help(),
            SessionCommand::Unknown(c) => warning(format!("Unknown command '{c}'. Try /help.")),
            SessionCommand::Empty | SessionCommand::Quit => {}
        }
        Ok(())
    }
}

/// A line typed into the interactive session.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Input(String),
    Mode(InputMode),
    Audio(bool),
    Show,
    Submit,
    History,
    Mood,
    Goals,
    Done(Vec<String>),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl SessionCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return SessionCommand::Empty;
        }
        if !trimmed.starts_with('/') {
            return SessionCommand::Input(trimmed.to_string());
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default().to_lowercase();
        let args: Vec<String> = parts.map(str::to_string).collect();
        let first = args.first().map(|a| a.to_lowercase());

        match (cmd.as_str(), first.as_deref()) {
            ("/mode", Some("text")) => SessionCommand::Mode(InputMode::Text),
            ("/mode", Some("voice")) => SessionCommand::Mode(InputMode::Voice),
            ("/audio", Some("on")) => SessionCommand::Audio(true),
            ("/audio", Some("off")) => SessionCommand::Audio(false),
            ("/show", _) => SessionCommand::Show,
            ("/submit", _) => SessionCommand::Submit,
            ("/history", _) => SessionCommand::History,
            ("/mood", _) => SessionCommand::Mood,
            ("/goals", _) => SessionCommand::Goals,
            ("/done", _) => SessionCommand::Done(args),
            ("/help", _) => SessionCommand::Help,
            ("/quit" | "/exit", _) => SessionCommand::Quit,
            _ => SessionCommand::Unknown(trimmed.to_string()),
        }
    }
}

fn prompt(mode: InputMode) {
    let tag = match mode {
        InputMode::Text => "text",
        InputMode::Voice => "voice",
    };
    print!("[{tag}] > ");
    let _ = io::stdout().flush();
}

pub fn report_transcript(transcript: &Transcript) {
    match transcript {
        Transcript::Text(t) => {
            success("Transcription:");
            println!("“{t}”");
        }
        Transcript::NoSpeech => warning(
            "I couldn’t understand that. Please try speaking a bit clearer or closer to the mic.",
        ),
    }
}

pub fn print_outcome(outcome: &CheckinOutcome) {
    header("Coach Response");
    println!("{}\n", outcome.response.text());
    println!("{}", italic(&format!("Detected emotion: {}", outcome.emotion)));

    match &outcome.audio {
        AudioOutcome::Written(path) => info(format!("Audio saved to {}", path.display())),
        AudioOutcome::Failed(e) => error(e),
        AudioOutcome::Skipped => {}
    }
}

fn print_help() {
    println!(
        "Commands:\n  \
         <text>          set your input (text mode) or a WAV path (voice mode)\n  \
         /mode text|voice switch input mode\n  \
         /audio on|off    speak the coach response\n  \
         /show            show the current input\n  \
         /submit          reflect and get goals\n  \
         /history         recent check-ins\n  \
         /mood            mood overview\n  \
         /goals           pending goals\n  \
         /done <id>...    mark goals completed\n  \
         /quit            leave"
    );
}
