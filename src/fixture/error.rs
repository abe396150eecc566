// ABOUTME: Error types for fixture loading and validation
// ABOUTME: Defines specific error types for fixture module operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Failed to read fixture file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid fixture format: {0}")]
    InvalidFormat(String),

    #[error("Validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate step id: {id}")]
    DuplicateStep { id: u64 },

    #[error("Duplicate user id: {id}")]
    DuplicateUser { id: u64 },

    #[error("Entry sits on step {step} which is not defined")]
    UnknownEntryStep { step: u64 },

    #[error("Note {note} has malformed assignee key '{key}'. Expected 'type|id'")]
    InvalidAssigneeKey { note: u64, key: String },

    #[error("Step {step} lists assignee '{key}' more than once")]
    DuplicateAssignee { step: u64, key: String },
}

pub type Result<T> = std::result::Result<T, FixtureError>;
