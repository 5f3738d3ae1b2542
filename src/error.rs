// src/error.rs
//! Failure taxonomy for a single upload / trends attempt

use thiserror::Error;

pub const DEFAULT_APPLICATION_ERROR: &str = "Resume analysis failed";
pub const SERVER_UNREACHABLE: &str = "Unable to reach the analysis server.";
pub const TRENDS_UNAVAILABLE: &str = "Failed to fetch industry trends.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzerError {
    /// Rejected locally, nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// The request did not complete or the response was not trusted.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service answered with `status: "error"`.
    #[error("{0}")]
    Application(String),

    #[error("industry trends unavailable: {0}")]
    TrendsFetch(String),
}

impl AnalyzerError {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            AnalyzerError::Validation(msg) | AnalyzerError::Application(msg) => msg.clone(),
            AnalyzerError::Transport(_) => SERVER_UNREACHABLE.to_string(),
            AnalyzerError::TrendsFetch(_) => TRENDS_UNAVAILABLE.to_string(),
        }
    }
}

impl From<reqwest::Error> for AnalyzerError {
    fn from(err: reqwest::Error) -> Self {
        AnalyzerError::Transport(err.to_string())
    }
}
