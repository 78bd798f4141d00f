// src/core/backend.rs
//! Seam between the editor and the resume backend

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

use crate::error::Result;
use crate::types::{response::UploadResponse, ResumeModel};

/// Section label sent along with text to the enhancement service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Summary => "summary",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" => Ok(SectionKind::Summary),
            "experience" => Ok(SectionKind::Experience),
            "education" => Ok(SectionKind::Education),
            "skills" | "skill" => Ok(SectionKind::Skills),
            other => Err(format!(
                "Unknown section: {}. Use summary, experience, education or skills",
                other
            )),
        }
    }
}

/// Everything the editor needs from the outside world.
///
/// Carried by the controller as `Arc<dyn ResumeBackend>`; `ServiceClient` is
/// the HTTP implementation.
#[async_trait]
pub trait ResumeBackend: Send + Sync {
    async fn load_resume(&self) -> Result<ResumeModel>;

    async fn save_resume(&self, resume: &ResumeModel) -> Result<()>;

    /// Send a document to the parsing service
    async fn upload_resume(&self, file_name: &str, content: Vec<u8>) -> Result<UploadResponse>;

    /// Suggested replacement for `content`; never applied by the backend
    async fn enhance(&self, section: SectionKind, content: &str) -> Result<String>;
}
