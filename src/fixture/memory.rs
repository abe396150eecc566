// ABOUTME: In-memory implementations of the resolver's collaborators
// ABOUTME: Backs the CLI and tests with directory, note, and step data held in maps

use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

use crate::model::{Assignee, Entry, Note, User, USER_ID_TYPE};
use crate::services::{Directory, NoteStore, StepRegistry, WorkflowStep};

#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    users: HashMap<u64, User>,
    assignees: HashMap<String, Assignee>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&mut self, user: User) {
        self.users.insert(user.id, user);
    }

    pub fn add_assignee(&mut self, assignee: Assignee) {
        self.assignees.insert(assignee.key(), assignee);
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.add_user(user);
        self
    }

    pub fn with_assignee(mut self, assignee: Assignee) -> Self {
        self.add_assignee(assignee);
        self
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

impl Directory for InMemoryDirectory {
    fn user(&self, id: u64) -> Option<User> {
        self.users.get(&id).cloned()
    }

    fn assignee(&self, key: &str) -> Option<Assignee> {
        if let Some(assignee) = self.assignees.get(key) {
            return Some(assignee.clone());
        }

        // Users double as assignees even when no step lists them.
        let (assignee_type, id) = Assignee::parse_key(key)?;
        if assignee_type != USER_ID_TYPE {
            return None;
        }
        let user_id: u64 = id.parse().ok()?;
        self.users
            .get(&user_id)
            .map(|user| Assignee::user(user.id, &user.display_name))
    }
}

/// Notes keyed by entry id, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNoteStore {
    notes: HashMap<u64, Vec<Note>>,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_note(&mut self, entry_id: u64, note: Note) {
        self.notes.entry(entry_id).or_default().push(note);
    }

    pub fn with_note(mut self, entry_id: u64, note: Note) -> Self {
        self.add_note(entry_id, note);
        self
    }
}

impl NoteStore for InMemoryNoteStore {
    fn get_notes(&self, entry: &Entry) -> Vec<Note> {
        entry
            .id
            .and_then(|id| self.notes.get(&id))
            .cloned()
            .unwrap_or_default()
    }

    /// Newest first, matching how workflow notes are listed for display.
    fn get_workflow_notes(&self, entry_id: u64, user_submitted_only: bool) -> Vec<Note> {
        let mut notes: Vec<Note> = self
            .notes
            .get(&entry_id)
            .map(|notes| {
                notes
                    .iter()
                    .filter(|note| !user_submitted_only || note.user_submitted)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        notes.sort_by(|a, b| b.date_created.cmp(&a.date_created));
        notes
    }
}

/// A step whose data is fixed at construction.
#[derive(Debug, Clone)]
pub struct StaticStep {
    pub id: u64,
    pub step_type: String,
    pub label: String,
    pub assignees: Vec<Assignee>,
    pub variables: IndexMap<String, String>,
}

impl StaticStep {
    pub fn new(id: u64, step_type: &str, label: &str) -> Self {
        Self {
            id,
            step_type: step_type.to_string(),
            label: label.to_string(),
            assignees: Vec::new(),
            variables: IndexMap::new(),
        }
    }

    pub fn with_assignee(mut self, assignee: Assignee) -> Self {
        self.assignees.push(assignee);
        self
    }

    pub fn with_variable(mut self, key: &str, value: &str) -> Self {
        self.variables.insert(key.to_string(), value.to_string());
        self
    }
}

impl WorkflowStep for StaticStep {
    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> String {
        self.label.clone()
    }

    fn step_type(&self) -> String {
        self.step_type.clone()
    }

    fn assignees(&self) -> Vec<Assignee> {
        self.assignees.clone()
    }

    fn replace_variables(&self, text: &str, _assignee: Option<&Assignee>) -> String {
        if !text.contains('{') {
            return text.to_string();
        }

        let mut text = text
            .replace("{workflow_step_label}", &self.label)
            .replace("{workflow_step_id}", &self.id.to_string());

        for (key, value) in &self.variables {
            text = text.replace(&format!("{{{}}}", key), value);
        }

        text
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStepRegistry {
    steps: IndexMap<u64, Arc<StaticStep>>,
    step_types: HashMap<String, Arc<StaticStep>>,
}

impl InMemoryStepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, step: StaticStep) {
        self.steps.insert(step.id, Arc::new(step));
    }

    /// Register a step type definition, used for notes that name a type.
    pub fn add_step_type(&mut self, step_type: &str, label: &str) {
        self.step_types.insert(
            step_type.to_string(),
            Arc::new(StaticStep::new(0, step_type, label)),
        );
    }

    pub fn with_step(mut self, step: StaticStep) -> Self {
        self.add_step(step);
        self
    }

    pub fn with_step_type(mut self, step_type: &str, label: &str) -> Self {
        self.add_step_type(step_type, label);
        self
    }

    pub fn step_ids(&self) -> Vec<u64> {
        self.steps.keys().copied().collect()
    }
}

impl StepRegistry for InMemoryStepRegistry {
    fn step(&self, id: u64) -> Option<Arc<dyn WorkflowStep>> {
        self.steps
            .get(&id)
            .map(|step| Arc::clone(step) as Arc<dyn WorkflowStep>)
    }

    fn step_type(&self, step_type: &str) -> Option<Arc<dyn WorkflowStep>> {
        self.step_types
            .get(step_type)
            .map(|step| Arc::clone(step) as Arc<dyn WorkflowStep>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StepRef;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_directory_falls_back_to_users_for_assignees() {
        let directory = InMemoryDirectory::new()
            .with_user(User::new(3, "jane", "jane@example.com").with_display_name("Jane Doe"))
            .with_assignee(Assignee::new("role", "editor", "Editors"));

        assert_eq!(
            directory.assignee("role|editor").map(|a| a.display_name),
            Some("Editors".to_string())
        );
        assert_eq!(
            directory.assignee("user_id|3").map(|a| a.display_name),
            Some("Jane Doe".to_string())
        );
        assert!(directory.assignee("user_id|4").is_none());
        assert!(directory.assignee("role|3").is_none());
    }

    #[test]
    fn test_workflow_notes_newest_first() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let store = InMemoryNoteStore::new()
            .with_note(1, Note::new(1, base, StepRef::Id(2), "first").user_submitted())
            .with_note(1, Note::new(2, base + Duration::hours(1), StepRef::Id(2), "system"))
            .with_note(
                1,
                Note::new(3, base + Duration::hours(2), StepRef::Id(2), "latest").user_submitted(),
            );

        let all = store.get_workflow_notes(1, false);
        assert_eq!(all.iter().map(|n| n.id).collect::<Vec<_>>(), vec![3, 2, 1]);

        let user_only = store.get_workflow_notes(1, true);
        assert_eq!(user_only.iter().map(|n| n.id).collect::<Vec<_>>(), vec![3, 1]);

        let timeline = store.get_notes(&Entry::new(1, 1));
        assert_eq!(timeline.iter().map(|n| n.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(store.get_notes(&Entry::default()).is_empty());
    }

    #[test]
    fn test_static_step_variables() {
        let step = StaticStep::new(5, "approval", "Manager Approval")
            .with_variable("workflow_entry_link", "<a href=\"/entry/1\">Entry</a>");

        let text = step.replace_variables(
            "{workflow_step_label} #{workflow_step_id}: {workflow_entry_link} {unknown}",
            None,
        );
        assert_eq!(
            text,
            "Manager Approval #5: <a href=\"/entry/1\">Entry</a> {unknown}"
        );
    }

    #[test]
    fn test_registry_lookups() {
        let registry = InMemoryStepRegistry::new()
            .with_step(StaticStep::new(2, "approval", "Review"))
            .with_step_type("approval", "Approval");

        assert_eq!(registry.step(2).map(|s| s.label()), Some("Review".to_string()));
        assert!(registry.step(3).is_none());
        assert_eq!(
            registry.step_type("approval").map(|s| s.label()),
            Some("Approval".to_string())
        );
        assert_eq!(
            registry
                .current_step(&crate::model::Form::default(), &Entry::new(1, 1).with_step(2))
                .map(|s| s.id()),
            Some(2)
        );
    }
}
