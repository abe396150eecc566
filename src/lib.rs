// ABOUTME: Main library module for the mergeflow merge tag resolver
// ABOUTME: Exports all core modules and provides the public API

pub mod cli;
pub mod fixture;
pub mod model;
pub mod pipeline;
pub mod services;
pub mod tags;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use fixture::{Fixture, FixtureParser};
pub use model::{Assignee, Entry, Form, Note, StepRef, User};
pub use pipeline::{TextPipeline, TextTransform};
pub use services::{DateFormatter, Directory, NoteStore, StepRegistry, WorkflowStep};
pub use tags::{MergeFlags, MergeTagResolver, RenderContext, ResolverSettings};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
