use serde::{Deserialize, Serialize};

use crate::types::resume::ResumeModel;

// ===== Service Request/Response Types =====

#[derive(Debug, Serialize, Deserialize)]
pub struct EnhanceRequest {
    pub section: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EnhanceResponse {
    pub enhanced_content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    pub resume: Option<ResumeModel>,
    pub extracted_text: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SaveResponse {
    pub success: Option<bool>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}
