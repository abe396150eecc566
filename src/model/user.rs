// ABOUTME: Directory user records and the properties merge tags may read from them
// ABOUTME: Replaces dynamic property lookup with an explicit set of accessors

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Properties of a user that `{created_by:...}` can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserProperty {
    Roles,
    Email,
    DisplayName,
    Login,
    FirstName,
    LastName,
    Id,
}

impl FromStr for UserProperty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "roles" => Ok(UserProperty::Roles),
            "email" | "user_email" => Ok(UserProperty::Email),
            "display_name" | "nickname" => Ok(UserProperty::DisplayName),
            "login" | "user_login" => Ok(UserProperty::Login),
            "first_name" | "user_firstname" => Ok(UserProperty::FirstName),
            "last_name" | "user_lastname" => Ok(UserProperty::LastName),
            "ID" | "id" => Ok(UserProperty::Id),
            other => Err(format!("Unsupported user property: {}", other)),
        }
    }
}

impl User {
    pub fn new(id: u64, login: &str, email: &str) -> Self {
        Self {
            id,
            login: login.to_string(),
            email: email.to_string(),
            display_name: login.to_string(),
            ..Self::default()
        }
    }

    pub fn with_roles(mut self, roles: &[&str]) -> Self {
        self.roles = roles.iter().map(|role| role.to_string()).collect();
        self
    }

    pub fn with_display_name(mut self, display_name: &str) -> Self {
        self.display_name = display_name.to_string();
        self
    }

    /// Role names joined for display.
    pub fn roles_label(&self) -> String {
        self.roles.join(", ")
    }

    pub fn property(&self, property: UserProperty) -> String {
        match property {
            UserProperty::Roles => self.roles_label(),
            UserProperty::Email => self.email.clone(),
            UserProperty::DisplayName => self.display_name.clone(),
            UserProperty::Login => self.login.clone(),
            UserProperty::FirstName => self.first_name.clone(),
            UserProperty::LastName => self.last_name.clone(),
            UserProperty::Id => self.id.to_string(),
        }
    }
}
