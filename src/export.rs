// src/export.rs
//! JSON download of the current resume

use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::FsOps;
use crate::error::Result;
use crate::types::ResumeModel;

pub const EXPORT_FILE_NAME: &str = "resume.json";
pub const EXPORT_MIME: &str = "application/json";

/// Two-space indented JSON, the same layout a browser `JSON.stringify(.., 2)` gives
pub fn to_json(resume: &ResumeModel) -> Result<String> {
    Ok(serde_json::to_string_pretty(resume)?)
}

pub fn from_json(content: &str) -> Result<ResumeModel> {
    Ok(serde_json::from_str(content)?)
}

/// Write `resume.json` into `dir` and return its path
pub async fn write_export(resume: &ResumeModel, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(EXPORT_FILE_NAME);
    let json = to_json(resume)?;
    FsOps::write_file_safe(&path, &json).await?;

    info!(
        "Exported resume ({} bytes, {}) to {}",
        json.len(),
        EXPORT_MIME,
        path.display()
    );
    Ok(path)
}
