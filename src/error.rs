// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LandmarkError {
    #[error("expected 21 landmarks per hand, got {0}")]
    WrongLandmarkCount(usize),

    #[error("detector reports at most two hands, got {0}")]
    TooManyHands(usize),

    #[error("landmark {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

#[derive(Debug, Error)]
pub enum ActuatorError {
    #[error("input backend failed: {0}")]
    Backend(String),

    #[error("screen capture failed: {0}")]
    Capture(String),

    #[error("failed to save screenshot to {path}: {reason}")]
    Save { path: PathBuf, reason: String },
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read recording: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: malformed frame: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: {source}")]
    InvalidFrame {
        line: usize,
        #[source]
        source: LandmarkError,
    },
}
