// src/core/mod.rs
//! Configuration and the HTTP client for the analysis service

pub mod config_manager;
pub mod service_client;

pub use config_manager::ConfigManager;
pub use service_client::{ServiceClient, UploadResponse};
