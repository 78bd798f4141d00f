// src/core/mod.rs
//! Backend access, collection editing and configuration shared by the editor

pub mod backend;
pub mod collection;
pub mod config_manager;
pub mod fs_ops;
pub mod service_client;

pub use backend::{ResumeBackend, SectionKind};
pub use collection::{Collection, ItemId};
pub use config_manager::ConfigManager;
pub use fs_ops::FsOps;
pub use service_client::ServiceClient;
