// ABOUTME: Merge tag resolver that rewrites workflow tags in template text
// ABOUTME: Runs the created_by, timeline, note, assignee and step variable passes in order

use std::sync::Arc;
use tracing::{debug, trace};

use super::attributes::{parse_attributes, AttrValue, Attributes};
use super::context::RenderContext;
use crate::services::{
    ChronoDateFormatter, DateFormatter, Directory, NoteStore, StepRegistry, WorkflowStep,
};

pub const DEFAULT_WORKFLOW_LABEL: &str = "Workflow";

#[derive(Debug, Clone, PartialEq)]
pub struct ResolverSettings {
    /// Display name for timeline notes whose step can no longer be found.
    pub workflow_label: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            workflow_label: DEFAULT_WORKFLOW_LABEL.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct MergeTagResolver {
    pub(crate) directory: Arc<dyn Directory>,
    pub(crate) notes: Arc<dyn NoteStore>,
    pub(crate) steps: Arc<dyn StepRegistry>,
    pub(crate) dates: Arc<dyn DateFormatter>,
    pub(crate) settings: ResolverSettings,
}

impl MergeTagResolver {
    pub fn new(
        directory: Arc<dyn Directory>,
        notes: Arc<dyn NoteStore>,
        steps: Arc<dyn StepRegistry>,
    ) -> Self {
        Self {
            directory,
            notes,
            steps,
            dates: Arc::new(ChronoDateFormatter::default()),
            settings: ResolverSettings::default(),
        }
    }

    pub fn with_date_formatter(mut self, dates: Arc<dyn DateFormatter>) -> Self {
        self.dates = dates;
        self
    }

    pub fn with_settings(mut self, settings: ResolverSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Replace every supported merge tag in `text`.
    ///
    /// Unrecognised tags are left in place. Nothing here fails: missing
    /// data resolves to the unchanged tag or an empty replacement.
    pub fn replace_merge_tags(&self, text: &str, context: &mut RenderContext) -> String {
        if !text.contains('{') || context.entry.is_empty() {
            return text.to_string();
        }

        debug!(
            "Resolving merge tags for entry {:?} (request {})",
            context.entry.id, context.request_id
        );

        let text = self.replace_created_by(text, &context.entry);
        let text = self.replace_workflow_timeline(&text, &context.entry);

        let Some(step) = self.current_step(context) else {
            trace!("No current step; skipping step-specific tags");
            return text;
        };

        let text = self.replace_workflow_note(&text, &context.entry, step.as_ref());
        let text = self.replace_assignees(&text, step.as_ref());
        step.replace_variables(&text, None)
    }

    /// Current step for the context's entry, served from the context cache.
    pub fn current_step(&self, context: &mut RenderContext) -> Option<Arc<dyn WorkflowStep>> {
        context
            .step_cache
            .current_step(self.steps.as_ref(), &context.form, &context.entry)
    }

    /// Parse tag options, falling back to the defaults on malformed input.
    pub(crate) fn tag_options(
        &self,
        modifiers: Option<&str>,
        defaults: &[(&str, AttrValue)],
    ) -> Attributes {
        match parse_attributes(modifiers.unwrap_or_default(), defaults) {
            Ok(attributes) => attributes,
            Err(e) => {
                debug!("Ignoring malformed merge tag options: {}", e);
                Attributes::from_defaults(defaults)
            }
        }
    }
}
