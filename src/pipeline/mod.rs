// ABOUTME: Text-transform pipeline that hosts merge tag resolution
// ABOUTME: Provides named handler registration and ordered rendering of template text

pub mod error;
pub mod transform;

pub use error::{PipelineError, Result};
pub use transform::{TextPipeline, TextTransform, TransformError, MERGE_TAGS_HANDLER};
