// ABOUTME: User and assignee lookup interface
// ABOUTME: Resolves entry creators and note authors to displayable records

use crate::model::{Assignee, User};

pub trait Directory: Send + Sync {
    fn user(&self, id: u64) -> Option<User>;

    /// Look up an assignee by its `type|id` key.
    fn assignee(&self, key: &str) -> Option<Assignee>;
}
