// ABOUTME: Collaborator interfaces the merge tag resolver consumes
// ABOUTME: Directory, note store, step registry, workflow steps and date formatting

pub mod date;
pub mod directory;
pub mod notes;
pub mod steps;

pub use date::{ChronoDateFormatter, DateFormatter, DEFAULT_DATE_FORMAT};
pub use directory::Directory;
pub use notes::NoteStore;
pub use steps::{StepRegistry, WorkflowStep};
