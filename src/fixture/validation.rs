// ABOUTME: Fixture consistency checks beyond what YAML parsing enforces
// ABOUTME: Reports structural errors and warnings about data the resolver will degrade on

use std::collections::HashSet;

use super::definition::Fixture;
use super::error::ValidationError;
use crate::model::{Assignee, StepRef};

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
    pub is_valid: bool,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            is_valid: true,
        }
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

pub struct FixtureValidator {
    strict_mode: bool,
}

impl FixtureValidator {
    pub fn new() -> Self {
        Self { strict_mode: false }
    }

    /// In strict mode warnings also make the fixture invalid.
    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }

    pub fn validate(&self, fixture: &Fixture) -> ValidationReport {
        let mut report = ValidationReport::new();

        report.errors = self.structural_errors(fixture);
        self.check_references(fixture, &mut report);

        report.is_valid =
            report.errors.is_empty() && !(self.strict_mode && !report.warnings.is_empty());
        report
    }

    /// Problems that make a fixture unusable.
    pub fn structural_errors(&self, fixture: &Fixture) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let mut step_ids = HashSet::new();
        for step in &fixture.steps {
            if !step_ids.insert(step.id) {
                errors.push(ValidationError::DuplicateStep { id: step.id });
            }

            let mut keys = HashSet::new();
            for assignee in &step.assignees {
                let key = assignee.key();
                if !keys.insert(key.clone()) {
                    errors.push(ValidationError::DuplicateAssignee { step: step.id, key });
                }
            }
        }

        let mut user_ids = HashSet::new();
        for user in &fixture.users {
            if !user_ids.insert(user.id) {
                errors.push(ValidationError::DuplicateUser { id: user.id });
            }
        }

        for note in &fixture.notes {
            if let Some(key) = note.assignee() {
                if Assignee::parse_key(key).is_none() {
                    errors.push(ValidationError::InvalidAssigneeKey {
                        note: note.id,
                        key: key.to_string(),
                    });
                }
            }
        }

        errors
    }

    /// Dangling references the resolver tolerates but that usually signal a mistake.
    fn check_references(&self, fixture: &Fixture, report: &mut ValidationReport) {
        if let Some(step) = fixture.entry.workflow_step {
            if fixture.step(step).is_none() {
                report.warnings.push(format!(
                    "{}; step-specific tags will be left unresolved",
                    ValidationError::UnknownEntryStep { step }
                ));
            }
        }

        if let Some(creator) = fixture.entry.created_by {
            if fixture.user(creator).is_none() {
                report.warnings.push(format!(
                    "Entry creator {} is not a known user; created_by tags resolve to empty values",
                    creator
                ));
            }
        }

        let step_types: HashSet<&str> = fixture
            .step_types
            .iter()
            .map(|definition| definition.step_type.as_str())
            .collect();

        for note in &fixture.notes {
            match &note.step_id {
                StepRef::Id(id) if fixture.step(*id).is_none() => {
                    report.warnings.push(format!(
                        "Note {} references unknown step {}",
                        note.id, id
                    ));
                }
                StepRef::Type(step_type) if !step_types.contains(step_type.as_str()) => {
                    report.warnings.push(format!(
                        "Note {} references unregistered step type '{}'",
                        note.id, step_type
                    ));
                }
                _ => {}
            }

            if note.user_submitted && note.assignee().is_none() {
                report.warnings.push(format!(
                    "User-submitted note {} has no assignee key",
                    note.id
                ));
            }
        }
    }
}

impl Default for FixtureValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(yaml: &str) -> Fixture {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_clean_fixture_is_valid() {
        let fixture = fixture(
            r#"
entry: {id: 1, created_by: 1, workflow_step: 2}
users: [{id: 1, login: alice}]
steps: [{id: 2, label: Review}]
notes:
  - {id: 1, date_created: "2024-01-01T00:00:00Z", value: ok, step_id: 2, assignee_key: "user_id|1", user_submitted: true}
"#,
        );

        let report = FixtureValidator::new().validate(&fixture);
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_dangling_references_warn() {
        let fixture = fixture(
            r#"
entry: {id: 1, created_by: 9, workflow_step: 7}
notes:
  - {id: 1, date_created: "2024-01-01T00:00:00Z", value: a, step_id: 3}
  - {id: 2, date_created: "2024-01-01T00:00:00Z", value: b, step_id: approval, user_submitted: true}
"#,
        );

        let report = FixtureValidator::new().validate(&fixture);
        assert!(report.is_valid);
        assert_eq!(report.warnings.len(), 5);

        let strict = FixtureValidator::new().with_strict_mode(true).validate(&fixture);
        assert!(!strict.is_valid);
    }

    #[test]
    fn test_structural_errors() {
        let fixture = fixture(
            r#"
entry: {id: 1}
users: [{id: 1}, {id: 1}]
steps:
  - id: 2
    label: Review
    assignees:
      - {type: role, id: editor}
      - {type: role, id: editor}
notes:
  - {id: 4, date_created: "2024-01-01T00:00:00Z", value: a, step_id: 2, assignee_key: "bogus"}
"#,
        );

        let errors = FixtureValidator::new().structural_errors(&fixture);
        assert_eq!(
            errors,
            vec![
                ValidationError::DuplicateAssignee {
                    step: 2,
                    key: "role|editor".to_string()
                },
                ValidationError::DuplicateUser { id: 1 },
                ValidationError::InvalidAssigneeKey {
                    note: 4,
                    key: "bogus".to_string()
                },
            ]
        );
    }
}
