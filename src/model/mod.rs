// ABOUTME: Read-only data model consumed by the merge tag resolver
// ABOUTME: Exports forms, entries, notes, step references, assignees and users

pub mod assignee;
pub mod entry;
pub mod note;
pub mod user;

pub use assignee::{Assignee, USER_ID_TYPE};
pub use entry::{Entry, Form};
pub use note::{Note, StepRef};
pub use user::{User, UserProperty};
