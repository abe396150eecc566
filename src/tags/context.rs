// ABOUTME: Per-request render context passed through every merge tag pass
// ABOUTME: Holds the form, entry, formatting flags and the single-slot current step cache

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::model::{Entry, Form};
use crate::services::{StepRegistry, WorkflowStep};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Text,
}

/// Formatting flags supplied by the host with each render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeFlags {
    pub url_encode: bool,
    pub esc_html: bool,
    pub nl2br: bool,
    pub format: OutputFormat,
}

/// Remembers the current step between renders for the same request.
///
/// The slot is refreshed whenever the entry's step id no longer matches the
/// cached step, and cleared when the entry has no step.
#[derive(Clone, Default)]
pub struct StepCache {
    current: Option<Arc<dyn WorkflowStep>>,
}

impl StepCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached_id(&self) -> Option<u64> {
        self.current.as_ref().map(|step| step.id())
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current_step(
        &mut self,
        registry: &dyn StepRegistry,
        form: &Form,
        entry: &Entry,
    ) -> Option<Arc<dyn WorkflowStep>> {
        let Some(step_id) = entry.workflow_step else {
            self.current = None;
            return None;
        };

        if self.cached_id() != Some(step_id) {
            debug!(
                "Refreshing current step: cached={:?}, entry step={}",
                self.cached_id(),
                step_id
            );
            self.current = registry.current_step(form, entry);
        }

        self.current.clone()
    }
}

impl fmt::Debug for StepCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepCache")
            .field("cached_id", &self.cached_id())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct RenderContext {
    pub request_id: String,
    pub form: Form,
    pub entry: Entry,
    pub flags: MergeFlags,
    pub step_cache: StepCache,
}

impl RenderContext {
    pub fn new(form: Form, entry: Entry) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            form,
            entry,
            flags: MergeFlags::default(),
            step_cache: StepCache::new(),
        }
    }

    pub fn with_flags(mut self, flags: MergeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Swap in a different entry while keeping the step cache.
    pub fn set_entry(&mut self, entry: Entry) {
        self.entry = entry;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Assignee;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NumberedStep(u64);

    impl WorkflowStep for NumberedStep {
        fn id(&self) -> u64 {
            self.0
        }
        fn label(&self) -> String {
            format!("Step {}", self.0)
        }
        fn step_type(&self) -> String {
            "approval".to_string()
        }
        fn assignees(&self) -> Vec<Assignee> {
            Vec::new()
        }
        fn replace_variables(&self, text: &str, _assignee: Option<&Assignee>) -> String {
            text.to_string()
        }
    }

    #[derive(Default)]
    struct CountingRegistry {
        lookups: AtomicUsize,
    }

    impl StepRegistry for CountingRegistry {
        fn step(&self, id: u64) -> Option<Arc<dyn WorkflowStep>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Some(Arc::new(NumberedStep(id)))
        }
        fn step_type(&self, _step_type: &str) -> Option<Arc<dyn WorkflowStep>> {
            None
        }
    }

    #[test]
    fn test_cache_reuses_matching_step() {
        let registry = CountingRegistry::default();
        let form = Form::new(1, "Form");
        let entry = Entry::new(1, 1).with_step(4);
        let mut cache = StepCache::new();

        assert_eq!(cache.current_step(&registry, &form, &entry).map(|s| s.id()), Some(4));
        assert_eq!(cache.current_step(&registry, &form, &entry).map(|s| s.id()), Some(4));
        assert_eq!(registry.lookups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cache_refreshes_on_step_change() {
        let registry = CountingRegistry::default();
        let form = Form::new(1, "Form");
        let mut cache = StepCache::new();

        cache.current_step(&registry, &form, &Entry::new(1, 1).with_step(4));
        let step = cache.current_step(&registry, &form, &Entry::new(1, 1).with_step(5));

        assert_eq!(step.map(|s| s.id()), Some(5));
        assert_eq!(cache.cached_id(), Some(5));
        assert_eq!(registry.lookups.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_cache_cleared_without_entry_step() {
        let registry = CountingRegistry::default();
        let form = Form::new(1, "Form");
        let mut cache = StepCache::new();

        cache.current_step(&registry, &form, &Entry::new(1, 1).with_step(4));
        assert!(cache.current_step(&registry, &form, &Entry::new(1, 1)).is_none());
        assert_eq!(cache.cached_id(), None);
    }
}
