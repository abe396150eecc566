// ABOUTME: YAML fixtures describing an entry and its workflow surroundings
// ABOUTME: Exports fixture parsing, validation and in-memory collaborator implementations

pub mod definition;
pub mod error;
pub mod memory;
pub mod validation;

pub use error::{FixtureError, Result, ValidationError};
pub use definition::{Fixture, FixtureParser, FixtureServices, StepDefinition, StepTypeDefinition};
pub use memory::{InMemoryDirectory, InMemoryNoteStore, InMemoryStepRegistry, StaticStep};
pub use validation::{FixtureValidator, ValidationReport};
