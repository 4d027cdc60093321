use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Which backend answers `predict_emotion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierBackend {
    /// Remote text-classification model (Hugging Face inference style).
    Http,
    /// Offline keyword scorer, no network involved.
    Lexicon,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_url")]
    pub url: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
    /// Hard word ceiling applied to generated replies.
    #[serde(default = "default_max_words")]
    pub max_words: usize,
    /// Word budget written into the prompt. Kept apart from `max_words`.
    #[serde(default = "default_prompt_words")]
    pub prompt_words: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_backend")]
    pub backend: ClassifierBackend,
    #[serde(default = "default_classifier_url")]
    pub url: String,
    #[serde(default = "default_classifier_model")]
    pub model: String,
    #[serde(default = "default_classifier_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_asr_url")]
    pub asr_url: String,
    #[serde(default = "default_tts_url")]
    pub tts_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_tts_lang")]
    pub tts_lang: String,
    #[serde(default = "default_speech_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_history_file")]
    pub history_file: String,
    #[serde(default = "default_audio_file")]
    pub audio_file: String,
    #[serde(default = "default_goals_per_checkin")]
    pub goals_per_checkin: usize,
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    #[serde(default = "default_mood_days")]
    pub mood_days: i64,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
}

fn default_history_file() -> String {
    Config::config_dir()
        .join("history.csv")
        .to_string_lossy()
        .to_string()
}
fn default_audio_file() -> String {
    Config::config_dir()
        .join("coach_response.mp3")
        .to_string_lossy()
        .to_string()
}
fn default_goals_per_checkin() -> usize {
    2
}
fn default_recent_limit() -> usize {
    15
}
fn default_mood_days() -> i64 {
    7
}
fn default_llm_url() -> String {
    "http://localhost:11434/api/generate".to_string()
}
fn default_llm_model() -> String {
    "phi3".to_string()
}
fn default_llm_timeout() -> u64 {
    60
}
fn default_max_words() -> usize {
    90
}
fn default_prompt_words() -> usize {
    80
}
fn default_backend() -> ClassifierBackend {
    ClassifierBackend::Http
}
fn default_classifier_url() -> String {
    "http://localhost:8080/classify".to_string()
}
fn default_classifier_model() -> String {
    "j-hartmann/emotion-english-distilroberta-base".to_string()
}
fn default_classifier_timeout() -> u64 {
    30
}
fn default_asr_url() -> String {
    "http://localhost:6006/asr".to_string()
}
fn default_tts_url() -> String {
    "http://localhost:5004/tts".to_string()
}
fn default_language() -> String {
    "en-US".to_string()
}
fn default_tts_lang() -> String {
    "en".to_string()
}
fn default_speech_timeout() -> u64 {
    30
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            url: default_llm_url(),
            model: default_llm_model(),
            timeout_secs: default_llm_timeout(),
            max_words: default_max_words(),
            prompt_words: default_prompt_words(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            url: default_classifier_url(),
            model: default_classifier_model(),
            timeout_secs: default_classifier_timeout(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            asr_url: default_asr_url(),
            tts_url: default_tts_url(),
            language: default_language(),
            tts_lang: default_tts_lang(),
            timeout_secs: default_speech_timeout(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_file: default_history_file(),
            audio_file: default_audio_file(),
            goals_per_checkin: default_goals_per_checkin(),
            recent_limit: default_recent_limit(),
            mood_days: default_mood_days(),
            llm: LlmConfig::default(),
            classifier: ClassifierConfig::default(),
            speech: SpeechConfig::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("moodcoach")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".moodcoach")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("moodcoach.conf")
    }

    /// Load configuration from the default file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    /// Load configuration from an explicit path; a missing file means defaults.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.goals_per_checkin == 0 {
            return Err(AppError::Config(
                "goals_per_checkin must be at least 1".into(),
            ));
        }
        if self.mood_days <= 0 {
            return Err(AppError::Config("mood_days must be positive".into()));
        }
        if self.llm.max_words == 0 {
            return Err(AppError::Config("llm.max_words must be positive".into()));
        }
        Ok(())
    }

    /// Initialize configuration and history files.
    ///
    /// With `is_test` the config file is left alone and only the history file
    /// is created.
    pub fn init_all(
        config_path: &Path,
        history_override: Option<String>,
        is_test: bool,
    ) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let mut config = Config::default();
        if let Some(name) = history_override {
            let p = Path::new(&name);
            config.history_file = if p.is_absolute() {
                p.to_string_lossy().to_string()
            } else {
                dir.join(p).to_string_lossy().to_string()
            };
        }

        if !is_test {
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(config_path)?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(config)
    }
}
