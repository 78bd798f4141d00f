// src/testing.rs
//! In-memory backend for controller and import tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::core::backend::{ResumeBackend, SectionKind};
use crate::error::{EditorError, Result};
use crate::types::{response::UploadResponse, ResumeModel};

#[derive(Default)]
pub struct FakeBackend {
    stored: Mutex<ResumeModel>,
    parsed: Mutex<Option<ResumeModel>>,
    fail_persistence: AtomicBool,
    fail_upload: AtomicBool,
    fail_enhance: AtomicBool,
    enhance_gate: Mutex<Option<Arc<Notify>>>,
    enhance_calls: Mutex<Vec<(String, String)>>,
    uploads: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn store(&self, resume: ResumeModel) {
        *self.stored.lock().unwrap() = resume;
    }

    pub fn stored(&self) -> ResumeModel {
        self.stored.lock().unwrap().clone()
    }

    /// Resume returned by the next successful upload; `None` answers
    /// `success: false`
    pub fn parse_to(&self, resume: Option<ResumeModel>) {
        *self.parsed.lock().unwrap() = resume;
    }

    pub fn fail_persistence(&self, fail: bool) {
        self.fail_persistence.store(fail, Ordering::SeqCst);
    }

    pub fn fail_upload(&self, fail: bool) {
        self.fail_upload.store(fail, Ordering::SeqCst);
    }

    pub fn fail_enhance(&self, fail: bool) {
        self.fail_enhance.store(fail, Ordering::SeqCst);
    }

    /// Enhancement calls wait until the returned `Notify` fires
    pub fn gate_enhance(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.enhance_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn enhance_calls(&self) -> Vec<(String, String)> {
        self.enhance_calls.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    fn transport_down(&self, flag: &AtomicBool) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(EditorError::TransportFailure(
                "Service returned error status 500 Internal Server Error".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ResumeBackend for FakeBackend {
    async fn load_resume(&self) -> Result<ResumeModel> {
        self.transport_down(&self.fail_persistence)?;
        Ok(self.stored())
    }

    async fn save_resume(&self, resume: &ResumeModel) -> Result<()> {
        self.transport_down(&self.fail_persistence)?;
        self.store(resume.clone());
        Ok(())
    }

    async fn upload_resume(&self, file_name: &str, content: Vec<u8>) -> Result<UploadResponse> {
        self.uploads.lock().unwrap().push(file_name.to_string());
        self.transport_down(&self.fail_upload)?;

        let parsed = self.parsed.lock().unwrap().clone();
        Ok(UploadResponse {
            success: parsed.is_some(),
            resume: parsed,
            extracted_text: Some(String::from_utf8_lossy(&content).into_owned()),
        })
    }

    async fn enhance(&self, section: SectionKind, content: &str) -> Result<String> {
        self.enhance_calls
            .lock()
            .unwrap()
            .push((section.to_string(), content.to_string()));

        let gate = self.enhance_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.transport_down(&self.fail_enhance)?;
        Ok(format!("Enhanced: {}", content))
    }
}
