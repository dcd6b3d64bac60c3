use pv_feasibility::export::docx::{HeadingLevel, StyledDocument};
use pv_feasibility::export::pdf::{PageLayout, TextKind, LINE_HEIGHT_MM};
use pv_feasibility::export::*;
use pv_feasibility::models::*;
use speculate2::speculate;
use std::io::{Cursor, Read};

/// Read one part of a DOCX package as text.
fn docx_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("Failed to open docx package");
    let mut part = archive.by_name(name).expect("Missing docx part");
    let mut xml = String::new();
    part.read_to_string(&mut xml).expect("Failed to read docx part");
    xml
}

fn pdf_page_count(bytes: &[u8]) -> usize {
    lopdf::Document::load_mem(bytes)
        .expect("Failed to parse pdf")
        .get_pages()
        .len()
}

fn numbered_outline(count: usize) -> Vec<SectionLabel> {
    (1..=count)
        .map(|i| SectionLabel::new(format!("{}. Section", i)))
        .collect()
}

speculate! {
    before {
        let generated = initial_outline();
        let expanded = expand_pass(&generated);
    }

    describe "formats" {
        it "parses format names from download paths" {
            assert_eq!("pdf".parse::<ExportFormat>().ok(), Some(ExportFormat::Pdf));
            assert_eq!("DOCX".parse::<ExportFormat>().ok(), Some(ExportFormat::Docx));
            assert_eq!("word".parse::<ExportFormat>().ok(), Some(ExportFormat::Docx));
            assert!(matches!(
                "txt".parse::<ExportFormat>(),
                Err(ExportError::UnknownFormat(name)) if name == "txt"
            ));
        }

        it "names files after the project" {
            assert_eq!(
                export_filename("Sunfield", ExportFormat::Pdf),
                "Sunfield_Feasibility_Study.pdf"
            );
            assert_eq!(
                export_filename("Sunfield", ExportFormat::Docx),
                "Sunfield_Feasibility_Study.docx"
            );
        }
    }

    describe "pdf layout" {
        it "places one line per section under the title" {
            let layout = PageLayout::for_outline(&expanded);
            let lines: Vec<&str> = layout.sections().map(|item| item.text.as_str()).collect();

            assert_eq!(lines.len(), expanded.len());
            assert_eq!(lines, expanded.iter().map(SectionLabel::as_str).collect::<Vec<_>>());

            let title = &layout.pages[0].items[0];
            assert_eq!(title.kind, TextKind::Title);
            assert_eq!(title.text, REPORT_TITLE);
        }

        it "fits an expanded outline on one page" {
            let layout = PageLayout::for_outline(&expanded);

            assert_eq!(layout.pages.len(), 1);
        }

        it "spaces consecutive lines evenly" {
            let layout = PageLayout::for_outline(&generated);
            let ys: Vec<f32> = layout.sections().map(|item| item.y_mm).collect();

            for pair in ys.windows(2) {
                assert!((pair[1] - pair[0] - LINE_HEIGHT_MM).abs() < 1e-3);
            }
        }

        it "starts a new page for long outlines" {
            let layout = PageLayout::for_outline(&numbered_outline(100));
            let per_page: Vec<usize> = layout
                .pages
                .iter()
                .map(|page| page.items.iter().filter(|i| i.kind == TextKind::Section).count())
                .collect();

            assert_eq!(per_page, vec![38, 39, 23]);
            assert_eq!(layout.sections().count(), 100);
        }
    }

    describe "docx layout" {
        it "opens with the title" {
            let document = StyledDocument::for_outline(&generated);

            assert_eq!(document.paragraphs[0].text, REPORT_TITLE);
            assert_eq!(document.paragraphs[0].heading, HeadingLevel::Title);
            assert_eq!(document.sections().len(), generated.len());
        }

        it "uses second-level headings for subsections" {
            let document = StyledDocument::for_outline(&expanded);
            let levels: Vec<HeadingLevel> = document.sections()[..4]
                .iter()
                .map(|paragraph| paragraph.heading)
                .collect();

            assert_eq!(
                levels,
                vec![
                    HeadingLevel::Heading1,
                    HeadingLevel::Heading2,
                    HeadingLevel::Heading2,
                    HeadingLevel::Heading2,
                ]
            );
            assert_eq!(
                document.sections().iter().filter(|p| p.heading == HeadingLevel::Heading1).count(),
                8
            );
        }
    }

    describe "artifacts" {
        it "renders a pdf document" {
            let artifact = ExportFormat::Pdf
                .export("Sunfield", &expanded)
                .expect("Failed to export pdf");

            assert_eq!(artifact.filename, "Sunfield_Feasibility_Study.pdf");
            assert_eq!(artifact.content_type, "application/pdf");
            assert!(artifact.bytes.starts_with(b"%PDF"));
        }

        it "renders a docx package" {
            let artifact = ExportFormat::Docx
                .export("Sunfield", &generated)
                .expect("Failed to export docx");

            assert_eq!(artifact.filename, "Sunfield_Feasibility_Study.docx");
            assert!(artifact.bytes.starts_with(b"PK"));
        }

        it "writes one docx paragraph per label with depth-based headings" {
            let artifact = ExportFormat::Docx
                .export("Sunfield", &expanded)
                .expect("Failed to export docx");
            let document = docx_part(&artifact.bytes, "word/document.xml");

            assert_eq!(document.matches("</w:p>").count(), expanded.len() + 1);
            assert_eq!(document.matches(r#"w:pStyle w:val="Title""#).count(), 1);
            assert_eq!(document.matches(r#"w:pStyle w:val="Heading1""#).count(), 8);
            assert_eq!(document.matches(r#"w:pStyle w:val="Heading2""#).count(), 24);
            assert!(document.contains("8. Conclusion and Recommendations.3 Subsection"));
        }

        it "defines each heading style once" {
            let artifact = ExportFormat::Docx
                .export("Sunfield", &generated)
                .expect("Failed to export docx");
            let styles = docx_part(&artifact.bytes, "word/styles.xml");

            for id in ["Title", "Heading1", "Heading2"] {
                assert_eq!(styles.matches(&format!(r#"w:styleId="{}""#, id)).count(), 1);
            }
        }

        it "paginates long outlines in the pdf" {
            let long = ExportFormat::Pdf
                .export("Sunfield", &numbered_outline(100))
                .expect("Failed to export pdf");
            let short = ExportFormat::Pdf
                .export("Sunfield", &expanded)
                .expect("Failed to export pdf");

            assert_eq!(pdf_page_count(&long.bytes), 3);
            assert_eq!(pdf_page_count(&short.bytes), 1);
        }

        it "does not change the outline it exports" {
            let before = expanded.clone();
            for format in ExportFormat::ALL {
                format.export("Sunfield", &expanded).expect("Failed to export");
            }

            assert_eq!(expanded, before);
        }

        it "writes into the target directory" {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let artifact = ExportFormat::Docx
                .export("North/South", &generated)
                .expect("Failed to export docx");

            let path = artifact.write_to(dir.path()).expect("Failed to write artifact");

            assert_eq!(path.parent(), Some(dir.path()));
            assert_eq!(
                path.file_name().and_then(|n| n.to_str()),
                Some("North_South_Feasibility_Study.docx")
            );
            assert_eq!(std::fs::read(&path).expect("Failed to read back"), artifact.bytes);
        }

        it "keeps the download header ascii" {
            let artifact = Artifact {
                filename: "Café \"Solar\"_Feasibility_Study.pdf".to_string(),
                content_type: ExportFormat::Pdf.content_type(),
                bytes: Vec::new(),
            };

            assert_eq!(
                artifact.content_disposition(),
                "attachment; filename=\"Caf_ _Solar__Feasibility_Study.pdf\""
            );
        }
    }
}
