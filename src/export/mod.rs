//! Document exporters for the report outline.
//!
//! Each format has a pure layout model (what goes where, at which heading
//! level) and a renderer that turns the model into file bytes. Exporters read
//! the outline; they never change it.

pub mod docx;
pub mod pdf;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::SectionLabel;

/// Title placed at the top of every exported document.
pub const REPORT_TITLE: &str = "Feasibility Study Report";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF rendering failed: {0}")]
    Pdf(String),
    #[error("DOCX rendering failed: {0}")]
    Docx(String),
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Pdf, ExportFormat::Docx];

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// Render the outline in this format, named after the project.
    pub fn export(
        &self,
        project_name: &str,
        sections: &[SectionLabel],
    ) -> Result<Artifact, ExportError> {
        let bytes = match self {
            Self::Pdf => pdf::render(&pdf::PageLayout::for_outline(sections))?,
            Self::Docx => docx::render(&docx::StyledDocument::for_outline(sections))?,
        };

        tracing::info!(
            format = self.extension(),
            sections = sections.len(),
            bytes = bytes.len(),
            "Exported report"
        );

        Ok(Artifact {
            filename: export_filename(project_name, *self),
            content_type: self.content_type(),
            bytes,
        })
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" | "word" => Ok(Self::Docx),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

/// `"<project name>_Feasibility_Study.<ext>"`
pub fn export_filename(project_name: &str, format: ExportFormat) -> String {
    format!("{}_Feasibility_Study.{}", project_name, format.extension())
}

/// A rendered document ready to be downloaded or saved.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// `Content-Disposition` value that makes browsers save the artifact.
    ///
    /// Header values must be visible ASCII, so anything else in the filename
    /// (including quotes and backslashes) is replaced with `_`.
    pub fn content_disposition(&self) -> String {
        let safe: String = self
            .filename
            .chars()
            .map(|c| match c {
                '"' | '\\' => '_',
                c if c.is_ascii_graphic() || c == ' ' => c,
                _ => '_',
            })
            .collect();
        format!("attachment; filename=\"{}\"", safe)
    }

    /// Save into `dir` and return the written path.
    ///
    /// Path separators in the filename are replaced so the artifact always
    /// lands directly inside `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let name: String = self
            .filename
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}
