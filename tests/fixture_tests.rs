// ABOUTME: Integration tests for fixture loading and the text pipeline
// ABOUTME: Writes fixtures to disk, parses them back and renders through registered handlers

use mergeflow::fixture::{FixtureError, FixtureParser, FixtureValidator};
use mergeflow::pipeline::{TextPipeline, TransformError, MERGE_TAGS_HANDLER};
use mergeflow::tags::RenderContext;

mod common;
use common::{approval_fixture, resolver_for, TestEnvironment, TestFixtureBuilder};

#[tokio::test]
async fn test_fixture_file_round_trip() {
    let env = TestEnvironment::new();
    let builder = TestFixtureBuilder::new(8).created_by(1).on_step(2).add_step(
        2,
        "Review",
        Vec::new(),
    );

    let path = env.create_fixture_file("round_trip", &builder).await;
    let fixture = FixtureParser::new().parse_file(&path).await.unwrap();

    assert_eq!(fixture.entry.id, Some(8));
    assert_eq!(fixture.entry.workflow_step, Some(2));
    assert_eq!(fixture.step(2).map(|s| s.label.as_str()), Some("Review"));
}

#[tokio::test]
async fn test_missing_fixture_file() {
    let env = TestEnvironment::new();
    let result = FixtureParser::new()
        .parse_file(env.fixture_file("does_not_exist"))
        .await;
    assert!(matches!(result, Err(FixtureError::IoError(_))));
}

#[tokio::test]
async fn test_handwritten_fixture_renders() {
    let env = TestEnvironment::new();
    let path = env.fixture_file("handwritten");
    tokio::fs::write(
        &path,
        r#"
form: {id: 4, title: Purchase Order}
entry:
  id: 21
  form_id: 4
  created_by: 5
  workflow_step: 7
  fields:
    "1": "Laptop"
users:
  - {id: 5, login: dana, email: dana@example.com, display_name: Dana, roles: [buyer]}
  - {id: 6, login: eve, email: eve@example.com, display_name: Eve}
steps:
  - id: 7
    type: approval
    label: Budget Holder
    assignees:
      - {type: user_id, id: "6", display_name: Eve, status: pending}
notes:
  - id: 1
    date_created: "2024-05-02T08:15:00Z"
    value: "Within budget"
    step_id: 7
    assignee_key: "user_id|6"
    user_submitted: true
"#,
    )
    .await
    .unwrap();

    let fixture = FixtureParser::new().parse_file(&path).await.unwrap();
    let report = FixtureValidator::new().with_strict_mode(true).validate(&fixture);
    assert!(report.is_valid, "unexpected warnings: {:?}", report.warnings);

    let pipeline = TextPipeline::with_merge_tags(resolver_for(&fixture));
    let mut context = fixture.render_context();
    let rendered = pipeline
        .render(
            "{created_by:roles}|{assignees}|{workflow_note:step_id=7 display_name=true}",
            &mut context,
        )
        .unwrap();

    assert_eq!(
        rendered,
        "buyer|Eve, eve@example.com (pending)|<div class=\"gravityflow-note-header\">Eve</div><div class=\"gravityflow-note-value\">Within budget</div>"
    );
}

#[test]
fn test_pipeline_post_processing_handler() {
    let fixture = approval_fixture();
    let mut pipeline = TextPipeline::with_merge_tags(resolver_for(&fixture));
    pipeline
        .register_handler(
            "plain_text",
            |text: &str, context: &mut RenderContext| -> Result<String, TransformError> {
                if context.flags.nl2br {
                    Ok(text.replace('\n', "<br>"))
                } else {
                    Ok(text.to_string())
                }
            },
        )
        .unwrap();

    assert_eq!(pipeline.handler_names(), vec![MERGE_TAGS_HANDLER, "plain_text"]);

    let mut context = fixture.render_context();
    context.flags.nl2br = true;
    let rendered = pipeline
        .render("{assignees:status=false}", &mut context)
        .unwrap();
    assert_eq!(rendered, "Bob Jones, bob@example.com<br>Editors");
}
