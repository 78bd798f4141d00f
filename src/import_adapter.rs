// src/import_adapter.rs
//! Resume import from an uploaded PDF or DOCX document

use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

use crate::core::backend::ResumeBackend;
use crate::core::FsOps;
use crate::error::{EditorError, Result};
use crate::form_controller::FormController;
use crate::types::ResumeModel;
use crate::utils::{preview, validate_file_extension};

pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx"];

pub struct ImportAdapter {
    backend: Arc<dyn ResumeBackend>,
}

impl ImportAdapter {
    pub fn new(backend: Arc<dyn ResumeBackend>) -> Self {
        Self { backend }
    }

    /// Send the document to the parsing service and map the answer onto a
    /// resume. Nothing is sent when the file name is not a PDF or DOCX.
    pub async fn parse(&self, file_name: &str, content: Vec<u8>) -> Result<ResumeModel> {
        validate_file_extension(file_name, SUPPORTED_EXTENSIONS)?;

        info!("Uploading {} ({} bytes) for parsing", file_name, content.len());
        let upload = self.backend.upload_resume(file_name, content).await?;

        if let Some(text) = &upload.extracted_text {
            info!("Parsing service extracted: {}", preview(text, 200));
        }

        match upload.resume {
            Some(resume) if upload.success => Ok(resume),
            _ => Err(EditorError::EmptyResponse(format!(
                "Parsing service returned no resume for {}",
                file_name
            ))),
        }
    }

    /// Replace the controller's whole resume with the parsed document.
    /// On any failure the current resume stays as it was.
    pub async fn import(
        &self,
        controller: &FormController,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<()> {
        // rejected before entering the loading phase
        validate_file_extension(file_name, SUPPORTED_EXTENSIONS).map_err(|e| {
            error!("Upload rejected: {}", e);
            e
        })?;

        let _loading = controller.begin_loading();
        match self.parse(file_name, content).await {
            Ok(resume) => {
                controller.replace(resume);
                info!("Imported resume from {}", file_name);
                Ok(())
            }
            Err(e) => {
                error!("Upload error for {}: {}", file_name, e);
                Err(e)
            }
        }
    }

    /// Read a document from disk, then import it
    pub async fn import_path(&self, controller: &FormController, path: &Path) -> Result<()> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| EditorError::UnsupportedFormat(path.display().to_string()))?
            .to_string();

        validate_file_extension(&file_name, SUPPORTED_EXTENSIONS)?;
        let content = FsOps::read_bytes(path).await?;
        self.import(controller, &file_name, content).await
    }
}
