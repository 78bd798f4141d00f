// src/core/fs_ops.rs
//! File system operations used by import and export

use std::path::Path;
use tokio::fs;
use tracing::{error, info};

use crate::error::Result;

pub struct FsOps;

impl FsOps {
    /// Ensure directory exists
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await.map_err(|e| {
                error!("Failed to create directory {}: {}", path.display(), e);
                e
            })?;
            info!("Created directory: {}", path.display());
        }
        Ok(())
    }

    /// Write file, creating the parent directory when missing
    pub async fn write_file_safe(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir_exists(parent).await?;
            }
        }

        fs::write(path, content).await.map_err(|e| {
            error!("Failed to write file {}: {}", path.display(), e);
            e
        })?;

        info!("Written file: {}", path.display());
        Ok(())
    }

    /// Read a whole file as bytes
    pub async fn read_bytes(path: &Path) -> Result<Vec<u8>> {
        let content = fs::read(path).await.map_err(|e| {
            error!("Failed to read file {}: {}", path.display(), e);
            e
        })?;
        Ok(content)
    }

    pub async fn read_file_safe(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            error!("Failed to read file {}: {}", path.display(), e);
            e
        })?;
        Ok(content)
    }
}
