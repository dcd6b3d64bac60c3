//! Styled DOCX export with a title and two heading levels.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, Style, StyleType};

use super::{ExportError, REPORT_TITLE};
use crate::models::SectionLabel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    Title,
    Heading1,
    Heading2,
}

impl HeadingLevel {
    /// Heading level of an outline section: nested sections are second level.
    pub fn for_section(section: &SectionLabel) -> Self {
        if section.depth() > 1 {
            Self::Heading2
        } else {
            Self::Heading1
        }
    }

    pub fn style_id(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Heading1 => "Heading1",
            Self::Heading2 => "Heading2",
        }
    }

    fn style_name(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Heading1 => "Heading 1",
            Self::Heading2 => "Heading 2",
        }
    }

    /// Font size in half-points.
    fn size(&self) -> usize {
        match self {
            Self::Title => 56,
            Self::Heading1 => 32,
            Self::Heading2 => 26,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyledParagraph {
    pub text: String,
    pub heading: HeadingLevel,
}

/// Paragraphs of the exported document, title first.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledDocument {
    pub paragraphs: Vec<StyledParagraph>,
}

impl StyledDocument {
    pub fn for_outline(sections: &[SectionLabel]) -> Self {
        let title = StyledParagraph {
            text: REPORT_TITLE.to_string(),
            heading: HeadingLevel::Title,
        };
        let body = sections.iter().map(|section| StyledParagraph {
            text: section.to_string(),
            heading: HeadingLevel::for_section(section),
        });

        Self {
            paragraphs: std::iter::once(title).chain(body).collect(),
        }
    }

    /// Paragraphs after the title.
    pub fn sections(&self) -> &[StyledParagraph] {
        self.paragraphs.get(1..).unwrap_or(&[])
    }
}

/// Pack the document into DOCX bytes.
pub fn render(document: &StyledDocument) -> Result<Vec<u8>, ExportError> {
    let mut docx = [
        HeadingLevel::Title,
        HeadingLevel::Heading1,
        HeadingLevel::Heading2,
    ]
    .into_iter()
    .fold(Docx::new(), |docx, level| {
        docx.add_style(
            Style::new(level.style_id(), StyleType::Paragraph)
                .name(level.style_name())
                .size(level.size())
                .bold(),
        )
    });

    for paragraph in &document.paragraphs {
        docx = docx.add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(paragraph.text.as_str()))
                .style(paragraph.heading.style_id()),
        );
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| ExportError::Docx(e.to_string()))?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_comes_first() {
        let document = StyledDocument::for_outline(&[]);
        assert_eq!(document.paragraphs.len(), 1);
        assert_eq!(document.paragraphs[0].heading, HeadingLevel::Title);
        assert_eq!(document.paragraphs[0].text, REPORT_TITLE);
        assert!(document.sections().is_empty());
    }

    #[test]
    fn nested_sections_use_second_level_headings() {
        let parent = SectionLabel::new("2. Project Overview");
        let child = parent.child(1);
        let document = StyledDocument::for_outline(&[parent, child]);

        let levels: Vec<HeadingLevel> = document.sections().iter().map(|p| p.heading).collect();
        assert_eq!(levels, vec![HeadingLevel::Heading1, HeadingLevel::Heading2]);
    }

    #[test]
    fn renders_a_zip_container() {
        let document = StyledDocument::for_outline(&[SectionLabel::new("1. Executive Summary")]);
        let bytes = render(&document).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
