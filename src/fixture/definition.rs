// ABOUTME: Fixture data structures and YAML parsing
// ABOUTME: Describes a form entry with its users, steps and notes, and builds collaborators from it

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;

use super::error::{FixtureError, Result};
use super::memory::{InMemoryDirectory, InMemoryNoteStore, InMemoryStepRegistry, StaticStep};
use super::validation::FixtureValidator;
use crate::model::{Assignee, Entry, Form, Note, User};
use crate::tags::{MergeTagResolver, RenderContext};

fn default_step_type() -> String {
    "approval".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub form: Form,
    pub entry: Entry,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub assignees: Vec<Assignee>,
    #[serde(default)]
    pub steps: Vec<StepDefinition>,
    #[serde(default)]
    pub step_types: Vec<StepTypeDefinition>,
    #[serde(default)]
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDefinition {
    pub id: u64,
    #[serde(rename = "type", default = "default_step_type")]
    pub step_type: String,
    pub label: String,
    #[serde(default)]
    pub assignees: Vec<Assignee>,
    #[serde(default)]
    pub variables: IndexMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepTypeDefinition {
    #[serde(rename = "type")]
    pub step_type: String,
    pub label: String,
}

/// Collaborators built from a fixture.
#[derive(Debug, Clone)]
pub struct FixtureServices {
    pub directory: Arc<InMemoryDirectory>,
    pub notes: Arc<InMemoryNoteStore>,
    pub steps: Arc<InMemoryStepRegistry>,
}

impl FixtureServices {
    pub fn resolver(&self) -> MergeTagResolver {
        MergeTagResolver::new(
            self.directory.clone(),
            self.notes.clone(),
            self.steps.clone(),
        )
    }
}

impl Fixture {
    /// Parse fixture from YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(FixtureError::IoError)?;
        Self::from_yaml(&content)
    }

    /// Parse fixture from YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let fixture: Fixture = serde_yaml::from_str(content).map_err(FixtureError::YamlError)?;
        fixture.validate_structure()?;
        Ok(fixture)
    }

    fn validate_structure(&self) -> Result<()> {
        if self.entry.is_empty() {
            return Err(FixtureError::InvalidFormat(
                "entry must carry at least an id or one field".to_string(),
            ));
        }

        if let Some(error) = FixtureValidator::new().structural_errors(self).into_iter().next() {
            return Err(FixtureError::ValidationError(error));
        }

        Ok(())
    }

    pub fn step(&self, id: u64) -> Option<&StepDefinition> {
        self.steps.iter().find(|step| step.id == id)
    }

    pub fn user(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn services(&self) -> FixtureServices {
        let mut directory = InMemoryDirectory::new();
        for user in &self.users {
            directory.add_user(user.clone());
        }
        for step in &self.steps {
            for assignee in &step.assignees {
                directory.add_assignee(assignee.clone());
            }
        }
        // Explicit directory entries win over what steps list.
        for assignee in &self.assignees {
            directory.add_assignee(assignee.clone());
        }

        let mut notes = InMemoryNoteStore::new();
        let entry_id = self.entry.id.unwrap_or_default();
        for note in &self.notes {
            notes.add_note(entry_id, note.clone());
        }

        let mut steps = InMemoryStepRegistry::new();
        for definition in &self.steps {
            steps.add_step(StaticStep {
                id: definition.id,
                step_type: definition.step_type.clone(),
                label: definition.label.clone(),
                assignees: definition.assignees.clone(),
                variables: definition.variables.clone(),
            });
        }
        for definition in &self.step_types {
            steps.add_step_type(&definition.step_type, &definition.label);
        }

        FixtureServices {
            directory: Arc::new(directory),
            notes: Arc::new(notes),
            steps: Arc::new(steps),
        }
    }

    pub fn render_context(&self) -> RenderContext {
        RenderContext::new(self.form.clone(), self.entry.clone())
    }

    /// Convert fixture back to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(FixtureError::YamlError)
    }
}

#[derive(Debug, Clone)]
pub struct FixtureParser;

impl FixtureParser {
    pub fn new() -> Self {
        Self
    }

    pub async fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Fixture> {
        let content = fs::read_to_string(path.as_ref())
            .await
            .map_err(FixtureError::IoError)?;
        self.parse_string(&content)
    }

    pub fn parse_string(&self, content: &str) -> Result<Fixture> {
        Fixture::from_yaml(content)
    }
}

impl Default for FixtureParser {
    fn default() -> Self {
        Self::new()
    }
}
