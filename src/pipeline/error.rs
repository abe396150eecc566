// ABOUTME: Error types for text pipeline operations
// ABOUTME: Defines specific error types for handler registration and rendering

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Handler '{name}' failed: {message}")]
    HandlerFailed { name: String, message: String },

    #[error("Handler already registered: {0}")]
    DuplicateHandler(String),

    #[error("Unknown handler: {0}")]
    UnknownHandler(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
