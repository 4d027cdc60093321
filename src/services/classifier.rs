//! Emotion classification.
//!
//! `EmotionModel` owns one backend for the lifetime of the process. Blank
//! input never reaches the backend.

use crate::config::{ClassifierBackend, ClassifierConfig};
use crate::core::goals::FALLBACK_EMOTION;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmotionScore {
    pub label: String,
    pub score: f32,
}

/// Anything that can rank emotion labels for a piece of text.
pub trait EmotionClassifier {
    fn classify(&self, text: &str) -> AppResult<Vec<EmotionScore>>;
}

pub struct EmotionModel {
    backend: Box<dyn EmotionClassifier>,
}

impl EmotionModel {
    pub fn new(backend: Box<dyn EmotionClassifier>) -> Self {
        Self { backend }
    }

    pub fn from_config(cfg: &ClassifierConfig) -> AppResult<Self> {
        let backend: Box<dyn EmotionClassifier> = match cfg.backend {
            ClassifierBackend::Http => Box::new(HttpClassifier::new(cfg)?),
            ClassifierBackend::Lexicon => Box::new(LexiconClassifier),
        };
        info!(backend = ?cfg.backend, "emotion model ready");
        Ok(Self::new(backend))
    }

    /// Top-ranked label for `text`, lower-cased. Blank text is `neutral`.
    pub fn predict_emotion(&self, text: &str) -> AppResult<String> {
        if text.trim().is_empty() {
            return Ok(FALLBACK_EMOTION.to_string());
        }

        let scores = self.backend.classify(text)?;
        let best = scores
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .ok_or_else(|| AppError::Classifier("classifier returned no labels".into()))?;

        debug!(label = %best.label, score = best.score, "emotion predicted");
        Ok(best.label.to_lowercase())
    }
}

// ---------------------------
// HTTP backend
// ---------------------------

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
}

/// Inference servers answer either with one list per input or a flat list.
#[derive(Deserialize)]
#[serde(untagged)]
enum ClassifyResponse {
    Batched(Vec<Vec<EmotionScore>>),
    Flat(Vec<EmotionScore>),
}

/// Text-classification model served over HTTP
/// (`POST {"inputs": text}` → label scores).
pub struct HttpClassifier {
    client: reqwest::blocking::Client,
    url: String,
    model: String,
}

impl HttpClassifier {
    pub fn new(cfg: &ClassifierConfig) -> AppResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: cfg.url.clone(),
            model: cfg.model.clone(),
        })
    }
}

impl EmotionClassifier for HttpClassifier {
    fn classify(&self, text: &str) -> AppResult<Vec<EmotionScore>> {
        debug!(url = %self.url, model = %self.model, chars = text.len(), "classifying");

        let resp = self
            .client
            .post(&self.url)
            .json(&ClassifyRequest { inputs: text })
            .send()
            .map_err(|e| AppError::Classifier(format!("request to {} failed: {e}", self.url)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(AppError::Classifier(format!(
                "{} returned {status}: {body}",
                self.url
            )));
        }

        let parsed: ClassifyResponse = resp
            .json()
            .map_err(|e| AppError::Classifier(format!("unexpected response: {e}")))?;

        Ok(match parsed {
            ClassifyResponse::Batched(mut batches) if !batches.is_empty() => batches.swap_remove(0),
            ClassifyResponse::Batched(_) => Vec::new(),
            ClassifyResponse::Flat(scores) => scores,
        })
    }
}

// ---------------------------
// Offline backend
// ---------------------------

const LEXICON: &[(&str, &[&str])] = &[
    (
        "sadness",
        &[
            "sad", "down", "failed", "fail", "lonely", "alone", "cry", "crying", "tired",
            "hopeless", "miss", "lost", "depressed", "unhappy", "disappointed",
        ],
    ),
    (
        "joy",
        &[
            "happy", "great", "glad", "excited", "awesome", "love", "amazing", "proud", "good",
            "wonderful", "passed", "won", "grateful",
        ],
    ),
    (
        "anger",
        &[
            "angry", "mad", "furious", "annoyed", "hate", "irritated", "frustrated", "unfair",
            "rage", "pissed",
        ],
    ),
    (
        "fear",
        &[
            "afraid", "scared", "anxious", "worried", "worry", "nervous", "panic", "terrified",
            "fear", "stress", "stressed",
        ],
    ),
];

/// Keyword scorer over the catalogued emotions. Useful offline and in tests.
pub struct LexiconClassifier;

impl EmotionClassifier for LexiconClassifier {
    fn classify(&self, text: &str) -> AppResult<Vec<EmotionScore>> {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|w| !w.is_empty())
            .collect();

        let total = words.len().max(1) as f32;
        let mut scores: Vec<EmotionScore> = LEXICON
            .iter()
            .map(|(label, cues)| {
                let hits = words.iter().filter(|w| cues.contains(*w)).count();
                EmotionScore {
                    label: label.to_string(),
                    score: hits as f32 / total,
                }
            })
            .collect();

        // neutral wins ties at zero
        scores.push(EmotionScore {
            label: FALLBACK_EMOTION.to_string(),
            score: f32::MIN_POSITIVE,
        });
        Ok(scores)
    }
}
