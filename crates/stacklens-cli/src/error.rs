//! Errors surfaced by the command-line tool.

use std::io;

use thiserror::Error;

use stacklens::StacklensError;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Stacklens(#[from] StacklensError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}
