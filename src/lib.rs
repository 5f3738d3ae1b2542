//! Client for a résumé analysis service: upload, ingest the JSON result and
//! derive per-section views (categorized skills, keyword search, advice).

pub mod cli;
pub mod core;
pub mod error;
pub mod logging;
pub mod projector;
pub mod session;
pub mod shell;
pub mod types;
pub mod utils;

pub use error::AnalyzerError;
pub use projector::{categorize, ingest, keyword_search, split_tech_soft, Section};
pub use session::Session;
pub use types::AnalysisResult;
