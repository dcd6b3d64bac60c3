//! Terminal commands behind `pvfs project`, `pvfs outline` and `pvfs export`.
//!
//! Each command returns its output instead of printing it; the binary decides
//! where it goes.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::Config;
use crate::export::{ExportError, ExportFormat};
use crate::models::{self, parse_capacity, CapacityValue, KeyIndicators, ProjectInput, SectionLabel, ValidationErrors};
use crate::render::{render_indicators, render_table, render_tree};
use crate::report::{OutlineStore, ReportError};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidCapacity(&'static str),
    #[error("Invalid project: {0}")]
    InvalidProject(#[from] ValidationErrors),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

// ============================================================
// Projection
// ============================================================

/// Projection table followed by the key indicators.
pub fn projection_text(capacity: &str) -> Result<String, CommandError> {
    let capacity = parse_capacity(Some(&CapacityValue::Text(capacity.to_string())))
        .map_err(CommandError::InvalidCapacity)?;

    Ok(format!(
        "{}\n{}",
        render_table(&models::project(capacity)),
        render_indicators(&KeyIndicators::for_capacity(capacity))
    ))
}

// ============================================================
// Outline
// ============================================================

/// Generate a fresh outline and, when asked, run one expansion on it.
pub async fn build_outline(config: &Config, expand: bool) -> Result<Vec<SectionLabel>, ReportError> {
    let store = OutlineStore::new(config.expansion_delay);
    let sections = store.generate()?;
    if expand {
        return store.expand().await;
    }
    Ok(sections)
}

pub async fn outline_text(config: &Config, expand: bool) -> Result<String, CommandError> {
    let sections = build_outline(config, expand).await?;
    Ok(render_tree(&sections))
}

// ============================================================
// Export
// ============================================================

/// Validate the project, build its outline and write one document per format
/// into `out`, returning the written paths in format order.
pub async fn export_documents(
    config: &Config,
    input: &ProjectInput,
    formats: &[ExportFormat],
    expand: bool,
    out: &Path,
) -> Result<Vec<PathBuf>, CommandError> {
    let project = input.validate()?;
    let sections = build_outline(config, expand).await?;

    let mut paths = Vec::with_capacity(formats.len());
    for format in formats {
        let artifact = format.export(&project.project_name, &sections)?;
        paths.push(artifact.write_to(out)?);
    }

    tracing::info!(
        project = %project.project_name,
        documents = paths.len(),
        out = %out.display(),
        "Wrote report documents"
    );
    Ok(paths)
}
