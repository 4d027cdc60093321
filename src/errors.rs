//! Unified application error type.
//! All modules (store, core, services, cli) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

use crate::services::speech::SpeechError;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // History store
    // ---------------------------
    #[error("History file error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No history row at position {0}")]
    InvalidIndex(usize),

    #[error("No check-in goal with id '{0}'")]
    UnknownRecord(String),

    #[error("Id prefix '{0}' matches more than one goal, use more characters")]
    AmbiguousRecord(String),

    // ---------------------------
    // External services
    // ---------------------------
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Emotion classifier error: {0}")]
    Classifier(String),

    #[error("{0}")]
    Speech(#[from] SpeechError),

    // ---------------------------
    // Input
    // ---------------------------
    #[error("Please provide what you feel (text or voice) before continuing")]
    EmptyInput,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Invalid configuration file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type AppResult<T> = Result<T, AppError>;
