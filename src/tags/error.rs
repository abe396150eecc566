// ABOUTME: Error types for merge tag option parsing
// ABOUTME: These never escape the resolver; malformed options fall back to defaults

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttributeError {
    #[error("Unterminated quoted value starting at position {position}")]
    UnterminatedQuote { position: usize },

    #[error("Attribute value without a name at position {position}")]
    MissingKey { position: usize },
}

pub type Result<T> = std::result::Result<T, AttributeError>;
