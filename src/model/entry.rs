// ABOUTME: Form and entry data structures for a single form submission
// ABOUTME: Carries the creator and current workflow step used during merge tag resolution

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub id: u64,
    #[serde(default)]
    pub title: String,
}

impl Form {
    pub fn new(id: u64, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
        }
    }
}

/// One stored form submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub form_id: Option<u64>,
    #[serde(default)]
    pub created_by: Option<u64>,
    #[serde(default)]
    pub workflow_step: Option<u64>,
    #[serde(default)]
    pub fields: IndexMap<String, String>,
}

impl Entry {
    pub fn new(id: u64, form_id: u64) -> Self {
        Self {
            id: Some(id),
            form_id: Some(form_id),
            ..Self::default()
        }
    }

    pub fn with_creator(mut self, user_id: u64) -> Self {
        self.created_by = Some(user_id);
        self
    }

    pub fn with_step(mut self, step_id: u64) -> Self {
        self.workflow_step = Some(step_id);
        self
    }

    pub fn with_field(mut self, key: &str, value: &str) -> Self {
        self.fields.insert(key.to_string(), value.to_string());
        self
    }

    /// True when the entry carries no data at all.
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.form_id.is_none()
            && self.created_by.is_none()
            && self.workflow_step.is_none()
            && self.fields.is_empty()
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}
