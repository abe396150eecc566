// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides fixture builders, recording collaborators and temp environments

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;

use mergeflow::fixture::{Fixture, StepDefinition, StepTypeDefinition};
use mergeflow::model::{Assignee, Entry, Form, Note, StepRef, User};
use mergeflow::services::{ChronoDateFormatter, Directory, NoteStore, StepRegistry, WorkflowStep};
use mergeflow::tags::{MergeTagResolver, RenderContext};

pub const TEST_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
}

pub struct TestFixtureBuilder {
    fixture: Fixture,
}

impl TestFixtureBuilder {
    pub fn new(entry_id: u64) -> Self {
        Self {
            fixture: Fixture {
                form: Form::new(1, "Expense Approval"),
                entry: Entry::new(entry_id, 1),
                users: Vec::new(),
                assignees: Vec::new(),
                steps: Vec::new(),
                step_types: Vec::new(),
                notes: Vec::new(),
            },
        }
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.fixture.users.push(user);
        self
    }

    pub fn created_by(mut self, user_id: u64) -> Self {
        self.fixture.entry.created_by = Some(user_id);
        self
    }

    pub fn on_step(mut self, step_id: u64) -> Self {
        self.fixture.entry.workflow_step = Some(step_id);
        self
    }

    pub fn add_step(mut self, id: u64, label: &str, assignees: Vec<Assignee>) -> Self {
        self.fixture.steps.push(StepDefinition {
            id,
            step_type: "approval".to_string(),
            label: label.to_string(),
            assignees,
            variables: Default::default(),
        });
        self
    }

    pub fn with_step_variable(mut self, step_id: u64, key: &str, value: &str) -> Self {
        if let Some(step) = self.fixture.steps.iter_mut().find(|s| s.id == step_id) {
            step.variables.insert(key.to_string(), value.to_string());
        }
        self
    }

    pub fn add_step_type(mut self, step_type: &str, label: &str) -> Self {
        self.fixture.step_types.push(StepTypeDefinition {
            step_type: step_type.to_string(),
            label: label.to_string(),
        });
        self
    }

    pub fn add_note(mut self, note: Note) -> Self {
        self.fixture.notes.push(note);
        self
    }

    pub fn build(self) -> Fixture {
        self.fixture
    }

    pub async fn write_to_file(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        fs::write(path, self.fixture.to_yaml()?).await?;
        Ok(())
    }
}

/// The expense-approval scenario most resolver tests share.
pub fn approval_fixture() -> Fixture {
    TestFixtureBuilder::new(10)
        .with_user(
            User::new(1, "alice", "alice@example.com")
                .with_display_name("Alice Smith")
                .with_roles(&["administrator", "editor"]),
        )
        .with_user(User::new(2, "bob", "bob@example.com").with_display_name("Bob Jones"))
        .created_by(1)
        .on_step(2)
        .add_step(
            2,
            "Manager Approval",
            vec![
                Assignee::user(2, "Bob Jones"),
                Assignee::new("role", "editor", "Editors").with_status("approved"),
            ],
        )
        .with_step_variable(2, "workflow_entry_link", "<a href=\"/entries/10\">View</a>")
        .add_step(3, "Finance Review", vec![Assignee::user(1, "Alice Smith")])
        .add_step_type("notification", "Notification")
        .add_note(Note::new(
            1,
            at(9),
            StepRef::Type("notification".to_string()),
            "Entry submitted",
        ))
        .add_note(
            Note::new(2, at(10), StepRef::Id(2), "Looks good\nApproved")
                .by_assignee("user_id|2")
                .user_submitted(),
        )
        .add_note(
            Note::new(3, at(11), StepRef::Id(3), "Paid <fast>")
                .by_assignee("user_id|1")
                .user_submitted(),
        )
        .add_note(Note::new(4, at(12), StepRef::Id(99), "Old step"))
        .build()
}

pub fn resolver_for(fixture: &Fixture) -> MergeTagResolver {
    fixture
        .services()
        .resolver()
        .with_date_formatter(Arc::new(ChronoDateFormatter::new(TEST_DATE_FORMAT)))
}

/// Resolve `text` once against a fresh context for `fixture`.
pub fn resolve(fixture: &Fixture, text: &str) -> String {
    let resolver = resolver_for(fixture);
    let mut context = fixture.render_context();
    resolver.replace_merge_tags(text, &mut context)
}

/// Counts every collaborator call so tests can assert none happened.
#[derive(Default)]
pub struct RecordingServices {
    pub calls: AtomicUsize,
}

impl RecordingServices {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl Directory for RecordingServices {
    fn user(&self, _id: u64) -> Option<User> {
        self.record();
        None
    }

    fn assignee(&self, _key: &str) -> Option<Assignee> {
        self.record();
        None
    }
}

impl NoteStore for RecordingServices {
    fn get_notes(&self, _entry: &Entry) -> Vec<Note> {
        self.record();
        Vec::new()
    }

    fn get_workflow_notes(&self, _entry_id: u64, _user_submitted_only: bool) -> Vec<Note> {
        self.record();
        Vec::new()
    }
}

impl StepRegistry for RecordingServices {
    fn step(&self, _id: u64) -> Option<Arc<dyn WorkflowStep>> {
        self.record();
        None
    }

    fn step_type(&self, _step_type: &str) -> Option<Arc<dyn WorkflowStep>> {
        self.record();
        None
    }
}

pub fn recording_resolver() -> (Arc<RecordingServices>, MergeTagResolver) {
    let services = Arc::new(RecordingServices::default());
    let resolver = MergeTagResolver::new(services.clone(), services.clone(), services.clone());
    (services, resolver)
}

pub fn recording_context() -> RenderContext {
    RenderContext::new(
        Form::new(1, "Form"),
        Entry::new(1, 1).with_creator(1).with_step(2),
    )
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn fixture_file(&self, name: &str) -> PathBuf {
        self.path().join(format!("{}.yaml", name))
    }

    pub fn template_file(&self, name: &str) -> PathBuf {
        self.path().join(format!("{}.html", name))
    }

    pub async fn create_fixture_file(&self, name: &str, builder: &TestFixtureBuilder) -> PathBuf {
        let fixture_file = self.fixture_file(name);
        builder
            .write_to_file(&fixture_file)
            .await
            .expect("Failed to write fixture file");
        fixture_file
    }

    pub async fn create_template_file(&self, name: &str, content: &str) -> PathBuf {
        let template_file = self.template_file(name);
        fs::write(&template_file, content)
            .await
            .expect("Failed to write template file");
        template_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approval_fixture_shape() {
        let fixture = approval_fixture();
        assert_eq!(fixture.entry.id, Some(10));
        assert_eq!(fixture.steps.len(), 2);
        assert_eq!(fixture.notes.len(), 4);
        assert_eq!(
            fixture.step(2).map(|s| s.variables.len()),
            Some(1)
        );
    }
}
