// src/types/mod.rs
pub mod analysis;
pub mod response;

pub use analysis::{AnalysisResult, EducationRecord, RawExtraction};
