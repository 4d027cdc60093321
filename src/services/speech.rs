//! Speech in and out.
//!
//! Recognition and synthesis both go to HTTP services. Failures come back as
//! a typed [`SpeechError`]; speech that simply could not be understood is a
//! normal [`Transcript::NoSpeech`].

use crate::config::SpeechConfig;
use crate::utils::audio;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech recognition error: {0}")]
    Recognition(String),

    #[error("could not read recording: {0}")]
    Audio(#[from] hound::Error),

    #[error("speech synthesis error: {0}")]
    Synthesis(String),

    #[error("could not write audio file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transcript {
    Text(String),
    /// Nothing recorded or nothing recognisable. Ask the user to retry.
    NoSpeech,
}

impl Transcript {
    pub fn text(&self) -> Option<&str> {
        match self {
            Transcript::Text(t) => Some(t),
            Transcript::NoSpeech => None,
        }
    }
}

pub trait SpeechToText {
    fn transcribe(&self, audio_bytes: &[u8]) -> Result<Transcript, SpeechError>;
}

pub trait TextToSpeech {
    /// Write spoken `text` to the configured file. Blank text writes nothing
    /// and returns `None`.
    fn speak(&self, text: &str) -> Result<Option<PathBuf>, SpeechError>;
}

fn http_client(timeout_secs: u64) -> Result<reqwest::blocking::Client, reqwest::Error> {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

// ---------------------------
// Recognition
// ---------------------------

#[derive(Serialize)]
struct AsrRequest<'a> {
    audio_b64: String,
    language: &'a str,
}

#[derive(Deserialize)]
struct AsrResponse {
    #[serde(default)]
    text: String,
}

pub struct HttpRecognizer {
    client: reqwest::blocking::Client,
    url: String,
    language: String,
}

impl HttpRecognizer {
    pub fn new(cfg: &SpeechConfig) -> Result<Self, SpeechError> {
        let client =
            http_client(cfg.timeout_secs).map_err(|e| SpeechError::Recognition(e.to_string()))?;
        Ok(Self {
            client,
            url: cfg.asr_url.clone(),
            language: cfg.language.clone(),
        })
    }
}

impl SpeechToText for HttpRecognizer {
    fn transcribe(&self, audio_bytes: &[u8]) -> Result<Transcript, SpeechError> {
        if audio_bytes.is_empty() {
            return Ok(Transcript::NoSpeech);
        }

        let mono = audio::decode_mono(audio_bytes)?;
        if mono.samples.is_empty() {
            return Ok(Transcript::NoSpeech);
        }
        let wav = audio::encode_wav(&mono)?;

        debug!(
            url = %self.url,
            seconds = mono.duration_secs(),
            bytes = wav.len(),
            "sending recording to speech recognition"
        );

        let resp = self
            .client
            .post(&self.url)
            .json(&AsrRequest {
                audio_b64: BASE64.encode(&wav),
                language: &self.language,
            })
            .send()
            .map_err(|e| SpeechError::Recognition(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(SpeechError::Recognition(format!("{status}: {body}")));
        }

        let parsed: AsrResponse = resp
            .json()
            .map_err(|e| SpeechError::Recognition(e.to_string()))?;

        let text = parsed.text.trim();
        if text.is_empty() {
            Ok(Transcript::NoSpeech)
        } else {
            Ok(Transcript::Text(text.to_string()))
        }
    }
}

// ---------------------------
// Synthesis
// ---------------------------

#[derive(Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    lang: &'a str,
}

pub struct HttpSynthesizer {
    client: reqwest::blocking::Client,
    url: String,
    lang: String,
    output: PathBuf,
}

impl HttpSynthesizer {
    pub fn new(cfg: &SpeechConfig, output: &Path) -> Result<Self, SpeechError> {
        let client =
            http_client(cfg.timeout_secs).map_err(|e| SpeechError::Synthesis(e.to_string()))?;
        Ok(Self {
            client,
            url: cfg.tts_url.clone(),
            lang: cfg.tts_lang.clone(),
            output: output.to_path_buf(),
        })
    }
}

impl TextToSpeech for HttpSynthesizer {
    fn speak(&self, text: &str) -> Result<Option<PathBuf>, SpeechError> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let resp = self
            .client
            .post(&self.url)
            .json(&TtsRequest {
                text,
                lang: &self.lang,
            })
            .send()
            .map_err(|e| SpeechError::Synthesis(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(SpeechError::Synthesis(format!("{status}: {body}")));
        }

        let bytes = resp
            .bytes()
            .map_err(|e| SpeechError::Synthesis(e.to_string()))?;

        if let Some(parent) = self.output.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.output, &bytes)?;

        info!(path = %self.output.display(), bytes = bytes.len(), "coach response audio written");
        Ok(Some(self.output.clone()))
    }
}
