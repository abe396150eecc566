// ABOUTME: Named text handlers run in registration order over template text
// ABOUTME: The merge tag resolver registers here instead of hooking a global filter

use tracing::{debug, warn};

use super::error::{PipelineError, Result};
use crate::tags::{MergeTagResolver, RenderContext};

/// Name the merge tag resolver is registered under.
pub const MERGE_TAGS_HANDLER: &str = "workflow_merge_tags";

pub type TransformError = Box<dyn std::error::Error + Send + Sync>;

pub trait TextTransform: Send + Sync {
    fn transform(
        &self,
        text: &str,
        context: &mut RenderContext,
    ) -> std::result::Result<String, TransformError>;
}

impl<F> TextTransform for F
where
    F: Fn(&str, &mut RenderContext) -> std::result::Result<String, TransformError> + Send + Sync,
{
    fn transform(
        &self,
        text: &str,
        context: &mut RenderContext,
    ) -> std::result::Result<String, TransformError> {
        self(text, context)
    }
}

impl TextTransform for MergeTagResolver {
    fn transform(
        &self,
        text: &str,
        context: &mut RenderContext,
    ) -> std::result::Result<String, TransformError> {
        Ok(self.replace_merge_tags(text, context))
    }
}

#[derive(Default)]
pub struct TextPipeline {
    handlers: Vec<(String, Box<dyn TextTransform>)>,
}

impl TextPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline with the merge tag resolver already registered
    pub fn with_merge_tags(resolver: MergeTagResolver) -> Self {
        let mut pipeline = Self::new();
        pipeline
            .handlers
            .push((MERGE_TAGS_HANDLER.to_string(), Box::new(resolver)));
        pipeline
    }

    /// Register a handler to run after those already registered
    pub fn register_handler<T>(&mut self, name: &str, handler: T) -> Result<()>
    where
        T: TextTransform + 'static,
    {
        if self.has_handler(name) {
            return Err(PipelineError::DuplicateHandler(name.to_string()));
        }
        self.handlers.push((name.to_string(), Box::new(handler)));
        Ok(())
    }

    pub fn unregister_handler(&mut self, name: &str) -> Result<()> {
        let position = self
            .handlers
            .iter()
            .position(|(handler_name, _)| handler_name == name)
            .ok_or_else(|| PipelineError::UnknownHandler(name.to_string()))?;
        self.handlers.remove(position);
        Ok(())
    }

    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.iter().any(|(handler_name, _)| handler_name == name)
    }

    pub fn handler_names(&self) -> Vec<&str> {
        self.handlers.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Check if a string contains anything that looks like a merge tag
    pub fn has_merge_tags(&self, text: &str) -> bool {
        text.find('{')
            .map(|start| text[start..].contains('}'))
            .unwrap_or(false)
    }

    /// Run every handler over `text` in registration order
    pub fn render(&self, text: &str, context: &mut RenderContext) -> Result<String> {
        let mut text = text.to_string();

        for (name, handler) in &self.handlers {
            text = handler.transform(&text, context).map_err(|e| {
                warn!("Text handler '{}' failed: {}", name, e);
                PipelineError::HandlerFailed {
                    name: name.clone(),
                    message: e.to_string(),
                }
            })?;
        }

        debug!(
            "Rendered {} characters through {} handlers (request {})",
            text.len(),
            self.handlers.len(),
            context.request_id
        );

        Ok(text)
    }
}
