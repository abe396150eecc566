// ABOUTME: Workflow merge tag resolution for notification and page templates
// ABOUTME: Exports the resolver, its per-request context and the option parser

pub mod assignees;
pub mod attributes;
pub mod context;
pub mod created_by;
pub mod error;
pub mod html;
pub mod patterns;
pub mod resolver;
pub mod timeline;
pub mod workflow_note;

pub use attributes::{parse_attributes, AttrValue, Attributes};
pub use context::{MergeFlags, OutputFormat, RenderContext, StepCache};
pub use error::{AttributeError, Result};
pub use html::{esc_html, nl2br};
pub use patterns::{find_tags, TagMatch, SUPPORTED_TAGS};
pub use resolver::{MergeTagResolver, ResolverSettings, DEFAULT_WORKFLOW_LABEL};
pub use workflow_note::NoteFilter;
