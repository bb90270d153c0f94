//! Error types for hoverspeak

use std::io;
use thiserror::Error;

/// Error reported by a speech backend
///
/// Every `Synth` call returns this. Callers inside the announcer log it
/// and carry on; it never reaches the host.
#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Speech engine not ready: {0}")]
    NotReady(String),

    #[error("Speech backend failed: {0}")]
    Backend(String),

    #[error("Speech I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Main error type for hoverspeak
#[derive(Error, Debug)]
pub enum HoverspeakError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Localization catalog error: {0}")]
    Catalog(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for hoverspeak operations
pub type Result<T> = std::result::Result<T, HoverspeakError>;

/// Result type alias for speech backend calls
pub type SpeechResult<T> = std::result::Result<T, SpeechError>;

