// src/session/trends.rs
//! Industry-trends fetch lifecycle: Idle -> Fetching -> Loaded | Failed

use crate::projector::Section;
use crate::types::AnalysisResult;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TrendsState {
    #[default]
    Idle,
    Fetching,
    Loaded(String),
    /// Terminal until the result changes or the session is reset.
    Failed(String),
}

/// Handed out when a fetch should start; stale once the result changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendsTicket {
    pub(crate) generation: u64,
    pub skills: Vec<String>,
}

impl TrendsState {
    /// Whether selecting `section` must start a fetch for `result`.
    pub fn should_fetch(&self, section: Section, result: Option<&AnalysisResult>) -> bool {
        section == Section::Industry
            && *self == TrendsState::Idle
            && result.is_some_and(AnalysisResult::has_skills)
    }
}
