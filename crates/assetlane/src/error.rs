//! Error types for the naming core

use std::io;
use thiserror::Error;

/// assetlane error type
#[derive(Error, Debug)]
pub enum NamingError {
    #[error("Cannot parse '{name}': expected at least {required} parts, found {found}")]
    Parse {
        name: String,
        required: usize,
        found: usize,
    },

    #[error("'{value}' does not match {prefix}<digits>")]
    Format { value: String, prefix: String },

    #[error("Invalid asset identity: {0}")]
    Validation(String),

    #[error("Invalid range token '{token}' in '{expression}'")]
    RangeSyntax { token: String, expression: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl NamingError {
    /// True for the outcomes a scan treats as "not an asset".
    pub fn is_not_an_asset(&self) -> bool {
        matches!(
            self,
            NamingError::Parse { .. } | NamingError::Format { .. } | NamingError::Validation(_)
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, NamingError>;
