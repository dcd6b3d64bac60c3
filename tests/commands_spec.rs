use pv_feasibility::commands::*;
use pv_feasibility::config::Config;
use pv_feasibility::export::ExportFormat;
use pv_feasibility::models::*;
use speculate2::speculate;

fn sunfield_input(capacity: &str) -> ProjectInput {
    ProjectInput {
        project_name: "Sunfield".to_string(),
        location: "Tucson, AZ, USA".to_string(),
        installed_capacity: Some(CapacityValue::Text(capacity.to_string())),
        start_date: "2025-03-01".to_string(),
    }
}

speculate! {
    before {
        let config = Config::for_testing();
    }

    describe "project" {
        it "prints the table and the indicators" {
            let text = projection_text("100").expect("Failed to project");

            assert_eq!(text.lines().filter(|l| l.ends_with("-$87,000,000")).count(), 1);
            assert!(text.contains("Initial Investment: $100,000,000"));
            assert!(text.contains("Payback Period: 8 years"));
        }

        it "rejects capacities the form would reject" {
            assert!(matches!(
                projection_text("-5"),
                Err(CommandError::InvalidCapacity("Installed capacity must be zero or greater"))
            ));
            assert!(matches!(
                projection_text("lots"),
                Err(CommandError::InvalidCapacity("Installed capacity must be a number"))
            ));
            assert!(matches!(projection_text("1e303"), Err(CommandError::InvalidCapacity(_))));
        }
    }

    describe "outline" {
        it "prints the generated sections flat" {
            let text = tokio_test::block_on(outline_text(&config, false)).expect("Failed to build outline");

            assert_eq!(text.lines().count(), 8);
            assert!(!text.contains("──"));
        }

        it "prints an expanded outline as a tree" {
            let text = tokio_test::block_on(outline_text(&config, true)).expect("Failed to build outline");

            assert_eq!(text.lines().count(), 32);
            assert!(text.contains("└── 8. Conclusion and Recommendations.3 Subsection"));
        }
    }

    describe "export" {
        it "writes one document per format" {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");

            let paths = tokio_test::block_on(export_documents(
                &config,
                &sunfield_input("100"),
                &ExportFormat::ALL,
                true,
                dir.path(),
            ))
            .expect("Failed to export");

            let names: Vec<String> = paths
                .iter()
                .filter_map(|p| p.file_name()?.to_str().map(String::from))
                .collect();
            assert_eq!(
                names,
                vec!["Sunfield_Feasibility_Study.pdf", "Sunfield_Feasibility_Study.docx"]
            );
            let pdf = std::fs::read(&paths[0]).expect("Failed to read pdf");
            assert!(pdf.starts_with(b"%PDF"));
            let docx = std::fs::read(&paths[1]).expect("Failed to read docx");
            assert!(docx.starts_with(b"PK"));
        }

        it "creates the output directory" {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let out = dir.path().join("reports").join("2025");

            let paths = tokio_test::block_on(export_documents(
                &config,
                &sunfield_input("12.5"),
                &[ExportFormat::Docx],
                false,
                &out,
            ))
            .expect("Failed to export");

            assert_eq!(paths.len(), 1);
            assert!(paths[0].starts_with(&out));
            assert!(paths[0].is_file());
        }

        it "writes nothing for an invalid project" {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let mut input = sunfield_input("");
            input.location = " ".to_string();

            let result = tokio_test::block_on(export_documents(
                &config,
                &input,
                &ExportFormat::ALL,
                false,
                dir.path(),
            ));

            match result {
                Err(CommandError::InvalidProject(errors)) => {
                    assert_eq!(errors.errors.len(), 2);
                    assert_eq!(errors.message_for(Field::Location), Some("Location is required"));
                }
                other => panic!("expected validation errors, got {:?}", other),
            }
            let written = std::fs::read_dir(dir.path()).expect("Failed to list dir").count();
            assert_eq!(written, 0);
        }
    }
}
