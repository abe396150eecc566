// ABOUTME: Workflow note records attached to an entry
// ABOUTME: Defines notes and the step reference that links a note to a live step or step type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference from a note to the step that produced it.
///
/// Numeric references point at a live step of the entry's workflow; anything
/// else names a registered step type (e.g. `approval`, `workflow`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawStepRef", into = "RawStepRef")]
pub enum StepRef {
    Id(u64),
    Type(String),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawStepRef {
    Number(u64),
    Text(String),
}

impl From<RawStepRef> for StepRef {
    fn from(raw: RawStepRef) -> Self {
        match raw {
            RawStepRef::Number(id) => StepRef::Id(id),
            RawStepRef::Text(text) => StepRef::parse(&text),
        }
    }
}

impl From<StepRef> for RawStepRef {
    fn from(step_ref: StepRef) -> Self {
        match step_ref {
            StepRef::Id(id) => RawStepRef::Number(id),
            StepRef::Type(step_type) => RawStepRef::Text(step_type),
        }
    }
}

impl StepRef {
    /// Numeric strings become live step ids, everything else a step type.
    pub fn parse(text: &str) -> Self {
        match text.trim().parse::<u64>() {
            Ok(id) => StepRef::Id(id),
            Err(_) => StepRef::Type(text.to_string()),
        }
    }

    pub fn as_id(&self) -> Option<u64> {
        match self {
            StepRef::Id(id) => Some(*id),
            StepRef::Type(_) => None,
        }
    }

    /// Loose comparison against a filter value taken from tag options.
    pub fn matches(&self, filter: &str) -> bool {
        let filter = filter.trim();
        match self {
            StepRef::Id(id) => filter
                .parse::<f64>()
                .map(|value| value == *id as f64)
                .unwrap_or(false),
            StepRef::Type(step_type) => step_type == filter,
        }
    }
}

impl fmt::Display for StepRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepRef::Id(id) => write!(f, "{}", id),
            StepRef::Type(step_type) => write!(f, "{}", step_type),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub id: u64,
    pub date_created: DateTime<Utc>,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub assignee_key: Option<String>,
    pub step_id: StepRef,
    #[serde(default)]
    pub user_submitted: bool,
}

impl Note {
    pub fn new(id: u64, date_created: DateTime<Utc>, step_id: StepRef, value: &str) -> Self {
        Self {
            id,
            date_created,
            value: value.to_string(),
            assignee_key: None,
            step_id,
            user_submitted: false,
        }
    }

    pub fn by_assignee(mut self, assignee_key: &str) -> Self {
        self.assignee_key = Some(assignee_key.to_string());
        self
    }

    pub fn user_submitted(mut self) -> Self {
        self.user_submitted = true;
        self
    }

    /// The assignee key, treating an empty key as absent.
    pub fn assignee(&self) -> Option<&str> {
        self.assignee_key.as_deref().filter(|key| !key.is_empty())
    }
}
