//! Resume editing client: a copy-on-write resume model, collection editing
//! with stable entry ids, and the HTTP binding to the resume backend that
//! stores, parses and enhances resumes.

pub mod cli;
pub mod core;
pub mod error;
pub mod export;
pub mod form_controller;
pub mod import_adapter;
pub mod session;
pub mod types;
pub mod utils;

#[cfg(test)]
mod testing;

pub use error::{EditorError, Result};
pub use form_controller::{EnhanceOutcome, EnhanceTarget, FormController, Phase, ResumeDraft};
pub use import_adapter::ImportAdapter;
pub use types::ResumeModel;
