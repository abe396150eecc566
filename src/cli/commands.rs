// ABOUTME: Command implementations for the mergeflow CLI
// ABOUTME: Handles execution of render, validate, and tags commands

use anyhow::Result;
use indexmap::IndexMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tracing::{info, warn};

use super::config::Config;
use crate::fixture::{Fixture, FixtureParser, FixtureValidator};
use crate::pipeline::TextPipeline;
use crate::tags::{MergeFlags, RenderContext, SUPPORTED_TAGS};

/// Per-invocation overrides for the render command.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub step: Option<u64>,
    pub fields: IndexMap<String, String>,
    pub flags: MergeFlags,
}

/// Build the pipeline and render `template` against `fixture`.
pub fn render_with_fixture(
    template: &str,
    fixture: &Fixture,
    options: &RenderOptions,
    config: &Config,
) -> Result<String> {
    let mut entry = fixture.entry.clone();
    if let Some(step) = options.step {
        entry.workflow_step = Some(step);
    }
    entry.fields.extend(options.fields.clone());

    let resolver = fixture
        .services()
        .resolver()
        .with_settings(config.resolver_settings())
        .with_date_formatter(Arc::new(config.date_formatter()));
    let pipeline = TextPipeline::with_merge_tags(resolver);

    let mut context = RenderContext::new(fixture.form.clone(), entry).with_flags(options.flags);
    let rendered = pipeline
        .render(template, &mut context)
        .map_err(|e| anyhow::anyhow!("Failed to render template: {}", e))?;

    Ok(rendered)
}

/// Render a template file against a fixture
pub async fn render_template(
    template_path: PathBuf,
    fixture_path: PathBuf,
    output: Option<PathBuf>,
    options: RenderOptions,
    config: &Config,
) -> Result<()> {
    info!(
        "Rendering {} with fixture {}",
        template_path.display(),
        fixture_path.display()
    );

    let template = fs::read_to_string(&template_path).await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to read template '{}': {}",
            template_path.display(),
            e
        )
    })?;

    let fixture = FixtureParser::new()
        .parse_file(&fixture_path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load fixture: {}", e))?;

    let rendered = render_with_fixture(&template, &fixture, &options, config)?;

    if let Some(output_path) = output {
        fs::write(&output_path, &rendered).await.map_err(|e| {
            anyhow::anyhow!(
                "Failed to write output file '{}': {}",
                output_path.display(),
                e
            )
        })?;
        info!("Rendered output written to: {}", output_path.display());
    } else {
        print!("{}", rendered);
    }

    Ok(())
}

/// Validate a fixture file
pub async fn validate_fixture(fixture_path: PathBuf, strict: bool, _config: &Config) -> Result<()> {
    info!("Validating fixture: {}", fixture_path.display());

    let fixture = FixtureParser::new()
        .parse_file(&fixture_path)
        .await
        .map_err(|e| anyhow::anyhow!("Fixture validation failed: {}", e))?;

    let report = FixtureValidator::new()
        .with_strict_mode(strict)
        .validate(&fixture);

    for warning in &report.warnings {
        warn!("{}", warning);
        println!("  warning: {}", warning);
    }

    if !report.is_valid {
        return Err(anyhow::anyhow!(
            "Fixture '{}' is invalid: {} errors, {} warnings",
            fixture_path.display(),
            report.errors.len(),
            report.warnings.len()
        ));
    }

    println!("✓ Fixture '{}' is valid", fixture_path.display());
    println!("  Steps: {}", fixture.steps.len());
    println!("  Notes: {}", fixture.notes.len());
    println!("  Users: {}", fixture.users.len());

    Ok(())
}

/// Print the merge tags the resolver handles
pub fn list_tags() -> Result<()> {
    println!("Supported merge tags:");
    for (name, usage) in SUPPORTED_TAGS {
        println!("  {:<20} {}", name, usage);
    }
    println!("Remaining tags are passed to the current step's variable replacement.");
    Ok(())
}
