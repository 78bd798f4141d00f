// src/core/service_client.rs
//! HTTP client for the resume backend - JSON everywhere, multipart for uploads

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use tracing::{debug, error, info, trace};

use crate::core::backend::{ResumeBackend, SectionKind};
use crate::error::{EditorError, Result};
use crate::types::{
    response::{EnhanceRequest, EnhanceResponse, HealthResponse, SaveResponse, UploadResponse},
    ResumeModel,
};
use crate::utils::content_type_for;

const HEALTH_ENDPOINT: &str = "/";
const LOAD_ENDPOINT: &str = "/load-resume";
const SAVE_ENDPOINT: &str = "/save-resume";
const UPLOAD_ENDPOINT: &str = "/upload-resume";
const ENHANCE_ENDPOINT: &str = "/ai-enhance";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create new service client with configuration
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| {
                EditorError::TransportFailure(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Backend liveness probe
    pub async fn ping(&self) -> Result<String> {
        let url = self.url(HEALTH_ENDPOINT);
        trace!("Pinging resume backend: {}", url);

        let response = self.client.get(&url).send().await?;
        let health: HealthResponse = Self::check_status(response).await?.json().await?;
        Ok(health.message)
    }

    /// Turn a non-2xx response into a transport failure carrying the body
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        trace!("Response status: {}", status);

        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        error!("Resume backend error response: {}", error_text);
        Err(EditorError::TransportFailure(format!(
            "Service returned error status {}: {}",
            status, error_text
        )))
    }
}

#[async_trait]
impl ResumeBackend for ServiceClient {
    async fn load_resume(&self) -> Result<ResumeModel> {
        let url = self.url(LOAD_ENDPOINT);
        info!("Loading resume from {}", url);

        let response = self.client.get(&url).send().await?;
        let resume = Self::check_status(response).await?.json().await?;
        Ok(resume)
    }

    async fn save_resume(&self, resume: &ResumeModel) -> Result<()> {
        let url = self.url(SAVE_ENDPOINT);
        info!("Saving resume to {}", url);

        let response = self.client.post(&url).json(resume).send().await?;
        let response = Self::check_status(response).await?;

        // Body is informational only, some backends answer with nothing
        let text = response.text().await?;
        if let Ok(saved) = serde_json::from_str::<SaveResponse>(&text) {
            debug!(
                "Save acknowledged: success={:?} message={:?}",
                saved.success, saved.message
            );
        }
        Ok(())
    }

    async fn upload_resume(&self, file_name: &str, content: Vec<u8>) -> Result<UploadResponse> {
        let content_type = content_type_for(file_name)?;
        let url = self.url(UPLOAD_ENDPOINT);

        let part = Part::bytes(content)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| EditorError::TransportFailure(format!("Failed to create multipart: {}", e)))?;
        let form = Form::new().part("file", part);

        info!("Calling resume parsing service: {}", url);

        let response = self.client.post(&url).multipart(form).send().await?;
        let response_text = Self::check_status(response).await?.text().await?;
        debug!("Raw upload response: {}", response_text);

        let upload: UploadResponse = serde_json::from_str(&response_text).map_err(|e| {
            EditorError::EmptyResponse(format!(
                "Failed to parse upload response: {}. Raw response: {}",
                e, response_text
            ))
        })?;
        Ok(upload)
    }

    async fn enhance(&self, section: SectionKind, content: &str) -> Result<String> {
        let url = self.url(ENHANCE_ENDPOINT);
        let payload = EnhanceRequest {
            section: section.to_string(),
            content: content.to_string(),
        };

        trace!("Calling enhancement service: {} (section {})", url, section);

        let response = self.client.post(&url).json(&payload).send().await?;
        let enhanced: EnhanceResponse = Self::check_status(response).await?.json().await?;

        match enhanced.enhanced_content {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(EditorError::EmptyResponse(
                "enhanced_content missing from enhancement response".to_string(),
            )),
        }
    }
}
