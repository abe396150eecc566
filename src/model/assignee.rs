// ABOUTME: Workflow step assignee records
// ABOUTME: Participants (users, roles, email addresses) responsible for acting on a step

use serde::{Deserialize, Serialize};

/// Assignee type for individual users; only these carry a directory email.
pub const USER_ID_TYPE: &str = "user_id";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignee {
    #[serde(rename = "type")]
    pub assignee_type: String,
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "pending".to_string()
}

impl Assignee {
    pub fn new(assignee_type: &str, id: &str, display_name: &str) -> Self {
        Self {
            assignee_type: assignee_type.to_string(),
            id: id.to_string(),
            display_name: display_name.to_string(),
            status: default_status(),
        }
    }

    pub fn user(user_id: u64, display_name: &str) -> Self {
        Self::new(USER_ID_TYPE, &user_id.to_string(), display_name)
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    /// Key in `type|id` form, as stored on notes.
    pub fn key(&self) -> String {
        format!("{}|{}", self.assignee_type, self.id)
    }

    /// Split a `type|id` key into its parts.
    pub fn parse_key(key: &str) -> Option<(&str, &str)> {
        key.split_once('|')
            .filter(|(assignee_type, id)| !assignee_type.is_empty() && !id.is_empty())
    }

    pub fn is_user(&self) -> bool {
        self.assignee_type == USER_ID_TYPE
    }

    /// Directory user id for `user_id` assignees.
    pub fn user_id(&self) -> Option<u64> {
        if self.is_user() {
            self.id.trim().parse().ok()
        } else {
            None
        }
    }
}
