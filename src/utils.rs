// src/utils.rs
use crate::error::{EditorError, Result};

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Validate file name suffix against allowed extensions (without the dot).
/// The match is case-sensitive, as the parsing service's own check is.
pub fn validate_file_extension(filename: &str, allowed: &[&str]) -> Result<()> {
    let accepted = allowed
        .iter()
        .any(|ext| filename.ends_with(&format!(".{}", ext)));

    if !accepted {
        return Err(EditorError::UnsupportedFormat(filename.to_string()));
    }
    Ok(())
}

/// MIME type for an importable resume document
pub fn content_type_for(file_name: &str) -> Result<&'static str> {
    if file_name.ends_with(".pdf") {
        Ok(PDF_MIME)
    } else if file_name.ends_with(".docx") {
        Ok(DOCX_MIME)
    } else {
        Err(EditorError::UnsupportedFormat(file_name.to_string()))
    }
}

/// Shorten long backend text for log lines
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}
