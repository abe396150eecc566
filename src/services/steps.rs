// ABOUTME: Workflow step and step registry interfaces
// ABOUTME: Steps expose labels, assignees and their own variable replacement

use std::sync::Arc;

use crate::model::{Assignee, Entry, Form};

pub trait WorkflowStep: Send + Sync {
    fn id(&self) -> u64;

    fn label(&self) -> String;

    fn step_type(&self) -> String;

    fn assignees(&self) -> Vec<Assignee>;

    fn assignee(&self, key: &str) -> Option<Assignee> {
        self.assignees()
            .into_iter()
            .find(|assignee| assignee.key() == key)
    }

    /// Replace step-specific variables in `text`.
    fn replace_variables(&self, text: &str, assignee: Option<&Assignee>) -> String;
}

pub trait StepRegistry: Send + Sync {
    /// Live step by numeric id.
    fn step(&self, id: u64) -> Option<Arc<dyn WorkflowStep>>;

    /// Registered step definition by type name.
    fn step_type(&self, step_type: &str) -> Option<Arc<dyn WorkflowStep>>;

    /// The step the entry currently sits on.
    fn current_step(&self, _form: &Form, entry: &Entry) -> Option<Arc<dyn WorkflowStep>> {
        entry.workflow_step.and_then(|id| self.step(id))
    }
}
