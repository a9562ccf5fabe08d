// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OntoRankError {
    #[error("Unsupported graph kind: {0}")]
    InvalidGraphKind(String),

    #[error("Invalid personalization vector: {0}")]
    InvalidPersonalization(String),

    #[error("Start vector is invalid: {0}")]
    InvalidStartVector(String),

    #[error("Power iteration failed to converge in {iterations} iterations (error {error:e})")]
    ConvergenceFailure { iterations: usize, error: f64 },

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, OntoRankError>;

// Allow `?` on std::io::Error by converting to OntoRankError::Io with unknown path.
impl From<std::io::Error> for OntoRankError {
    fn from(source: std::io::Error) -> Self {
        OntoRankError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl From<serde_json::Error> for OntoRankError {
    fn from(e: serde_json::Error) -> Self {
        OntoRankError::Parse(e.to_string())
    }
}

impl From<toml::de::Error> for OntoRankError {
    fn from(e: toml::de::Error) -> Self {
        OntoRankError::Config(e.to_string())
    }
}
