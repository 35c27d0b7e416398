use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NgramForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Persist Error: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Malformed Input: {0}")]
    MalformedInput(String),

    #[error("Normalizer Error: {0}")]
    Normalizer(String),
}

pub type NfResult<T> = Result<T, NgramForgeError>;
