// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::core::{ConfigManager, FsOps, ResumeBackend, SectionKind, ServiceClient};
use crate::export::{from_json, to_json, write_export};
use crate::form_controller::FormController;
use crate::import_adapter::ImportAdapter;
use crate::session::Session;

#[derive(Parser)]
#[command(name = "resume-editor")]
#[command(about = "Edit a resume against the resume backend")]
pub struct ResumeCli {
    #[command(subcommand)]
    pub command: ResumeCommand,

    /// Backend base URL, overrides config.yaml and RESUME_BACKEND_URL
    #[arg(long, global = true)]
    pub backend_url: Option<String>,
}

#[derive(Subcommand)]
pub enum ResumeCommand {
    /// Check that the backend is up
    Ping,
    /// Print the stored resume as JSON
    Load,
    /// Store a resume JSON file in the backend
    Save { file: PathBuf },
    /// Upload a PDF or DOCX resume and print the parsed result
    Import { file: PathBuf },
    /// Ask for an enhanced version of a piece of text
    Enhance { section: SectionKind, text: String },
    /// Write the stored resume to resume.json
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Interactive editing session on stdin
    Session,
}

pub async fn handle_command(cli: ResumeCli, config: ConfigManager) -> Result<()> {
    let config = config.with_backend_url(cli.backend_url.clone());

    let client = Arc::new(
        ServiceClient::new(&config.backend_url, config.timeout_seconds)
            .context("Failed to create backend client")?,
    );
    info!("Using resume backend at {}", client.base_url());
    let backend: Arc<dyn ResumeBackend> = client.clone();
    let controller = FormController::new(backend.clone());
    let importer = ImportAdapter::new(backend);

    match cli.command {
        ResumeCommand::Ping => {
            let message = client.ping().await.context("Backend is not reachable")?;
            println!("✓ {}", message);
        }

        ResumeCommand::Load => {
            controller.load().await.context("Error loading resume")?;
            println!("{}", to_json(&controller.snapshot())?);
        }

        ResumeCommand::Save { file } => {
            let content = FsOps::read_file_safe(&file).await?;
            let resume = from_json(&content)
                .with_context(|| format!("{} is not a resume JSON file", file.display()))?;
            controller.replace(resume);
            controller
                .save()
                .await
                .context("Error saving resume. Please try again.")?;
            println!("✓ Resume saved successfully!");
        }

        ResumeCommand::Import { file } => {
            importer
                .import_path(&controller, &file)
                .await
                .context("Error uploading file. Please try again.")?;
            println!("{}", to_json(&controller.snapshot())?);
        }

        ResumeCommand::Enhance { section, text } => {
            let enhanced = controller
                .request_enhance(section, &text)
                .await
                .context("Error enhancing content. Please try again.")?;
            println!("{}", enhanced);
        }

        ResumeCommand::Export { out } => {
            let config = config.with_export_dir(out);
            controller.load().await.context("Error loading resume")?;
            let path = write_export(&controller.snapshot(), &config.export_dir).await?;
            println!("✓ Exported resume to {}", path.display());
        }

        ResumeCommand::Session => {
            // Start from whatever the backend has, like the form does on open
            if let Err(e) = controller.load().await {
                println!("⚠️  Could not load stored resume: {}", e);
            }

            let session = Session::new(&controller, &importer, config.export_dir.clone());
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            session
                .run(stdin, tokio::io::stdout())
                .await
                .context("Session I/O failed")?;
        }
    }

    Ok(())
}
