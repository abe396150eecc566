// ABOUTME: Note storage interface for workflow timelines
// ABOUTME: Returns notes in the order the underlying store keeps them

use crate::model::{Entry, Note};

pub trait NoteStore: Send + Sync {
    /// Full note history for an entry.
    fn get_notes(&self, entry: &Entry) -> Vec<Note>;

    /// Workflow notes for an entry id, optionally restricted to user-submitted ones.
    fn get_workflow_notes(&self, entry_id: u64, user_submitted_only: bool) -> Vec<Note>;
}
