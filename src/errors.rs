//! Unified application error type.
//! All modules (core, store, cli, config) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // ---------------------------
    // Structural errors (always fatal, raised before any write)
    // ---------------------------
    #[error("Schema error: {context} is missing required columns: {}", .missing.join(", "))]
    Schema {
        context: String,
        missing: Vec<String>,
    },

    #[error(
        "Duplicate row identity in {snapshot} snapshot ({} ids): {}",
        .ids.len(),
        .ids.join(", ")
    )]
    DuplicateIdentity { snapshot: String, ids: Vec<String> },

    #[error("Missing source: {0}")]
    MissingSource(String),

    // ---------------------------
    // Input errors
    // ---------------------------
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn schema<S: Into<String>>(context: S, missing: Vec<String>) -> Self {
        AppError::Schema {
            context: context.into(),
            missing,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
