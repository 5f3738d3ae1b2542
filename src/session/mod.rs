// src/session/mod.rs
//! State held by the presentation shell between user actions
//!
//! Every request is tied to a generation number. Reset, a new file or a newer
//! upload advance the generation, and completions carrying an older ticket are
//! dropped instead of overwriting newer state.

pub mod trends;

use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::app_log;
use crate::error::AnalyzerError;
use crate::projector::{keyword_search, Section, ViewState};
use crate::types::AnalysisResult;
use crate::utils::{validate_file_extension, UPLOAD_EXTENSIONS};
pub use trends::{TrendsState, TrendsTicket};

/// Proof that an upload was started for a given generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    generation: u64,
    pub file: PathBuf,
}

#[derive(Debug)]
pub struct Session {
    id: Uuid,
    file: Option<PathBuf>,
    result: Option<AnalysisResult>,
    error: Option<AnalyzerError>,
    section: Section,
    search_query: String,
    trends: TrendsState,
    loading: bool,
    upload_generation: u64,
    trends_generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            file: None,
            result: None,
            error: None,
            section: Section::None,
            search_query: String::new(),
            trends: TrendsState::Idle,
            loading: false,
            upload_generation: 0,
            trends_generation: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&AnalyzerError> {
        self.error.as_ref()
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn trends(&self) -> &TrendsState {
        &self.trends
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Picking a new file discards the current result and any pending upload.
    pub fn select_file(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        app_log!(debug, session = %self.id, "Selected file {}", path.display());
        self.file = Some(path);
        self.error = None;
        self.invalidate_upload();
        self.replace_result(None);
    }

    /// Validate the selection and mark an upload as in flight.
    pub fn begin_upload(&mut self) -> Result<UploadTicket, AnalyzerError> {
        if self.loading {
            return Err(AnalyzerError::Validation(
                "An upload is already in progress".to_string(),
            ));
        }

        let file = match &self.file {
            Some(file) => file.clone(),
            None => {
                let err = AnalyzerError::Validation("Please select a PDF resume".to_string());
                self.error = Some(err.clone());
                return Err(err);
            }
        };

        let file_name = file.to_string_lossy();
        if let Err(e) = validate_file_extension(&file_name, UPLOAD_EXTENSIONS) {
            let err = AnalyzerError::Validation(e.to_string());
            self.error = Some(err.clone());
            return Err(err);
        }

        self.upload_generation += 1;
        self.loading = true;
        self.error = None;
        app_log!(
            info,
            session = %self.id,
            generation = self.upload_generation,
            "Upload started for {}",
            file.display()
        );

        Ok(UploadTicket {
            generation: self.upload_generation,
            file,
        })
    }

    /// Apply an upload outcome. Returns false when the ticket was superseded.
    pub fn complete_upload(
        &mut self,
        ticket: &UploadTicket,
        outcome: Result<AnalysisResult, AnalyzerError>,
    ) -> bool {
        if ticket.generation != self.upload_generation || !self.loading {
            app_log!(
                debug,
                session = %self.id,
                generation = ticket.generation,
                current = self.upload_generation,
                "Discarding stale upload response"
            );
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(result) => {
                app_log!(info, session = %self.id, "Upload completed");
                self.error = None;
                self.replace_result(Some(result));
            }
            Err(err) => {
                app_log!(warn, session = %self.id, "Upload failed: {}", err);
                self.error = Some(err);
                self.replace_result(None);
            }
        }
        true
    }

    /// Show a result that did not come from an upload (e.g. a saved response).
    pub fn load_result(&mut self, result: AnalysisResult) {
        app_log!(debug, session = %self.id, "Loaded result without upload");
        self.error = None;
        self.invalidate_upload();
        self.replace_result(Some(result));
    }

    /// Change the visible section; returns a ticket when trends must be fetched.
    pub fn select_section(&mut self, section: Section) -> Option<TrendsTicket> {
        self.section = section;

        if !self.trends.should_fetch(section, self.result.as_ref()) {
            return None;
        }

        let skills = self.result.as_ref()?.skills.clone();
        self.trends = TrendsState::Fetching;
        app_log!(
            info,
            session = %self.id,
            "Fetching industry trends for {} skills",
            skills.len()
        );
        Some(TrendsTicket {
            generation: self.trends_generation,
            skills,
        })
    }

    /// Apply a trends outcome. Returns false when the ticket is stale.
    pub fn complete_trends(
        &mut self,
        ticket: &TrendsTicket,
        outcome: Result<String, AnalyzerError>,
    ) -> bool {
        if ticket.generation != self.trends_generation || self.trends != TrendsState::Fetching {
            app_log!(debug, session = %self.id, "Discarding stale trends response");
            return false;
        }

        self.trends = match outcome {
            Ok(markdown) => TrendsState::Loaded(markdown),
            Err(err) => {
                app_log!(warn, session = %self.id, "Industry trends failed: {}", err);
                TrendsState::Failed(err.to_string())
            }
        };
        true
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Lines of the full text matching the current query.
    pub fn search_matches(&self) -> Vec<&str> {
        self.result
            .as_ref()
            .map(|result| keyword_search(result.full_text(), &self.search_query))
            .unwrap_or_default()
    }

    /// Back to a blank session; pending responses will be discarded.
    pub fn reset(&mut self) {
        app_log!(info, session = %self.id, "Session reset");
        self.file = None;
        self.error = None;
        self.search_query.clear();
        self.invalidate_upload();
        self.replace_result(None);
    }

    /// Current section followed by the service note, if any.
    pub fn render(&self) -> Option<String> {
        let result = self.result.as_ref()?;
        let state = ViewState {
            search_query: &self.search_query,
            trends: &self.trends,
        };

        let mut output = self.section.render(result, &state);
        if let Some(note) = result.note.as_deref().filter(|n| !n.trim().is_empty()) {
            output.push_str("\n\nNote: ");
            output.push_str(note);
        }
        Some(output)
    }

    fn invalidate_upload(&mut self) {
        self.upload_generation += 1;
        self.loading = false;
    }

    // Every result change resets the section and the trends lifecycle.
    fn replace_result(&mut self, result: Option<AnalysisResult>) {
        self.result = result;
        self.section = Section::None;
        self.search_query.clear();
        self.trends = TrendsState::Idle;
        self.trends_generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projector::ingest;
    use serde_json::json;

    fn analysis(skills: &[&str]) -> AnalysisResult {
        ingest(json!({ "name": "Ada", "skills": skills, "text_preview": "Rust\nGo" })).unwrap()
    }

    fn loaded_session() -> Session {
        let mut session = Session::new();
        session.select_file("cv.pdf");
        let ticket = session.begin_upload().unwrap();
        assert!(session.complete_upload(&ticket, Ok(analysis(&["Rust", "Teamwork"]))));
        session
    }

    #[test]
    fn test_upload_without_file_is_validation_error() {
        let mut session = Session::new();
        let err = session.begin_upload().unwrap_err();
        assert!(matches!(err, AnalyzerError::Validation(_)));
        assert_eq!(session.error(), Some(&err));
        assert!(!session.is_loading());
    }

    #[test]
    fn test_upload_rejects_non_pdf() {
        let mut session = Session::new();
        session.select_file("cv.docx");
        assert!(matches!(
            session.begin_upload(),
            Err(AnalyzerError::Validation(_))
        ));
    }

    #[test]
    fn test_second_upload_blocked_while_loading() {
        let mut session = Session::new();
        session.select_file("cv.pdf");
        session.begin_upload().unwrap();
        assert!(session.is_loading());
        assert!(session.begin_upload().is_err());
    }

    #[test]
    fn test_successful_upload_replaces_result_and_resets_section() {
        let mut session = loaded_session();
        session.select_section(Section::Skills);
        session.set_search_query("rust");

        let ticket = session.begin_upload().unwrap();
        assert!(session.complete_upload(&ticket, Ok(analysis(&["Python"]))));
        assert_eq!(session.result().unwrap().skills, vec!["Python"]);
        assert_eq!(session.section(), Section::None);
        assert_eq!(session.search_query(), "");
        assert_eq!(session.trends(), &TrendsState::Idle);
    }

    #[test]
    fn test_application_error_sets_error_and_no_result() {
        let mut session = Session::new();
        session.select_file("cv.pdf");
        let ticket = session.begin_upload().unwrap();
        let outcome = ingest(json!({ "status": "error", "error": "Unreadable PDF" }));
        assert!(session.complete_upload(&ticket, outcome));

        assert!(session.result().is_none());
        assert_eq!(session.error().unwrap().user_message(), "Unreadable PDF");
        assert!(!session.is_loading());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = loaded_session();
        session.select_section(Section::Industry);
        session.set_search_query("go");

        session.reset();

        assert!(session.file().is_none());
        assert!(session.result().is_none());
        assert!(session.error().is_none());
        assert_eq!(session.section(), Section::None);
        assert_eq!(session.search_query(), "");
        assert_eq!(session.trends(), &TrendsState::Idle);
        assert!(session.render().is_none());
    }

    #[test]
    fn test_reset_clears_error_state() {
        let mut session = Session::new();
        let _ = session.begin_upload();
        assert!(session.error().is_some());
        session.reset();
        assert!(session.error().is_none());
    }

    #[test]
    fn test_late_response_after_reset_is_discarded() {
        let mut session = Session::new();
        session.select_file("cv.pdf");
        let ticket = session.begin_upload().unwrap();
        session.reset();

        assert!(!session.complete_upload(&ticket, Ok(analysis(&["Rust"]))));
        assert!(session.result().is_none());
    }

    #[test]
    fn test_new_file_invalidates_pending_upload() {
        let mut session = Session::new();
        session.select_file("first.pdf");
        let first = session.begin_upload().unwrap();
        session.select_file("second.pdf");
        let second = session.begin_upload().unwrap();

        assert!(!session.complete_upload(&first, Ok(analysis(&["Old"]))));
        assert!(session.complete_upload(&second, Ok(analysis(&["New"]))));
        assert_eq!(session.result().unwrap().skills, vec!["New"]);
    }

    #[test]
    fn test_trends_fetched_once_per_result() {
        let mut session = loaded_session();

        let ticket = session.select_section(Section::Industry).expect("first fetch");
        assert_eq!(ticket.skills, vec!["Rust", "Teamwork"]);
        assert_eq!(session.trends(), &TrendsState::Fetching);

        // Toggling while in flight does not start another fetch.
        assert!(session.select_section(Section::Skills).is_none());
        assert!(session.select_section(Section::Industry).is_none());

        assert!(session.complete_trends(&ticket, Ok("# Trends".to_string())));
        for _ in 0..3 {
            assert!(session.select_section(Section::Career).is_none());
            assert!(session.select_section(Section::Industry).is_none());
        }
        assert_eq!(session.trends(), &TrendsState::Loaded("# Trends".to_string()));
    }

    #[test]
    fn test_failed_trends_are_terminal_until_new_result() {
        let mut session = loaded_session();
        let ticket = session.select_section(Section::Industry).unwrap();
        session.complete_trends(&ticket, Err(AnalyzerError::TrendsFetch("503".to_string())));
        assert!(matches!(session.trends(), TrendsState::Failed(_)));
        assert!(session.select_section(Section::Industry).is_none());

        let upload = session.begin_upload().unwrap();
        session.complete_upload(&upload, Ok(analysis(&["Go"])));
        assert!(session.select_section(Section::Industry).is_some());
    }

    #[test]
    fn test_trends_for_old_result_are_discarded() {
        let mut session = loaded_session();
        let stale = session.select_section(Section::Industry).unwrap();

        let upload = session.begin_upload().unwrap();
        session.complete_upload(&upload, Ok(analysis(&["Go"])));

        assert!(!session.complete_trends(&stale, Ok("old".to_string())));
        assert_eq!(session.trends(), &TrendsState::Idle);
    }

    #[test]
    fn test_no_trends_fetch_without_skills() {
        let mut session = Session::new();
        session.select_file("cv.pdf");
        let ticket = session.begin_upload().unwrap();
        session.complete_upload(&ticket, Ok(analysis(&[])));
        assert!(session.select_section(Section::Industry).is_none());
        assert_eq!(session.trends(), &TrendsState::Idle);
    }

    #[test]
    fn test_search_matches_follow_query() {
        let mut session = loaded_session();
        session.set_search_query("RUST");
        assert_eq!(session.search_matches(), vec!["Rust"]);
        session.set_search_query("");
        assert_eq!(session.search_matches(), vec!["Rust", "Go"]);
    }

    #[test]
    fn test_load_result_discards_pending_upload() {
        let mut session = Session::new();
        session.select_file("cv.pdf");
        let ticket = session.begin_upload().unwrap();
        session.load_result(analysis(&["Saved"]));

        assert!(!session.is_loading());
        assert!(!session.complete_upload(&ticket, Ok(analysis(&["Late"]))));
        assert_eq!(session.result().unwrap().skills, vec!["Saved"]);
    }

    #[test]
    fn test_render_appends_note() {
        let mut session = Session::new();
        session.select_file("cv.pdf");
        let ticket = session.begin_upload().unwrap();
        let result = ingest(json!({ "name": "Ada", "note": "Processed using local parser" })).unwrap();
        session.complete_upload(&ticket, Ok(result));
        session.select_section(Section::Personal);

        let rendered = session.render().unwrap();
        assert!(rendered.contains("Name: Ada"));
        assert!(rendered.ends_with("Note: Processed using local parser"));
    }
}
