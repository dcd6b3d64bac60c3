use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pv_feasibility::api;
use pv_feasibility::commands::{self, CommandError};
use pv_feasibility::config::Config;
use pv_feasibility::export::ExportFormat;
use pv_feasibility::models::{CapacityValue, ProjectInput};
use pv_feasibility::state::AppState;

#[derive(Parser)]
#[command(name = "pvfs")]
#[command(about = "Feasibility study generator for photovoltaic projects")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the browser UI and JSON API
    Serve {
        /// Host to bind (overrides PVFS_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port for HTTP (overrides PVFS_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the financial projection for an installed capacity
    Project {
        /// Installed capacity in MW
        #[arg(short, long, allow_hyphen_values = true)]
        capacity: String,
    },
    /// Print the report outline as a tree
    Outline {
        /// Expand the outline before printing
        #[arg(short, long)]
        expand: bool,
    },
    /// Validate a project and write its report documents
    Export {
        /// Project name, used in the output filenames
        #[arg(long)]
        name: String,

        #[arg(long)]
        location: String,

        /// Installed capacity in MW
        #[arg(long)]
        capacity: String,

        #[arg(long)]
        start_date: String,

        #[arg(short, long, value_enum, default_value = "both")]
        format: FormatArg,

        /// Expand the outline before exporting
        #[arg(short, long)]
        expand: bool,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Pdf,
    Docx,
    Both,
}

impl FormatArg {
    fn formats(self) -> Vec<ExportFormat> {
        match self {
            Self::Pdf => vec![ExportFormat::Pdf],
            Self::Docx => vec![ExportFormat::Docx],
            Self::Both => ExportFormat::ALL.to_vec(),
        }
    }
}

/// Initialize tracing with output to stderr (for printing commands) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "pv_feasibility=debug,tower_http=debug".into()),
    );

    if use_stderr {
        // Printing commands keep stdout clean for their output
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn serve(mut config: Config, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    let state = AppState::new(&config);
    let app = api::create_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("PV feasibility server listening on http://{}", config.bind_address());

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = !matches!(cli.command, None | Some(Commands::Serve { .. }));
    init_tracing(use_stderr);

    let config = Config::from_env();

    match cli.command {
        Some(Commands::Serve { host, port }) => serve(config, host, port).await?,
        Some(Commands::Project { capacity }) => {
            print!("{}", commands::projection_text(&capacity)?);
        }
        Some(Commands::Outline { expand }) => {
            print!("{}", commands::outline_text(&config, expand).await?);
        }
        Some(Commands::Export {
            name,
            location,
            capacity,
            start_date,
            format,
            expand,
            out,
        }) => {
            let input = ProjectInput {
                project_name: name,
                location,
                installed_capacity: Some(CapacityValue::Text(capacity)),
                start_date,
            };
            let result =
                commands::export_documents(&config, &input, &format.formats(), expand, &out).await;
            match result {
                Ok(paths) => {
                    for path in paths {
                        println!("{}", path.display());
                    }
                }
                Err(CommandError::InvalidProject(errors)) => {
                    for error in &errors.errors {
                        eprintln!("{}: {}", error.field.as_str(), error.message);
                    }
                    anyhow::bail!("Invalid project: {}", errors);
                }
                Err(e) => return Err(e.into()),
            }
        }
        None => serve(config, None, None).await?,
    }

    Ok(())
}
