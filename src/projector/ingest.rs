// src/projector/ingest.rs
//! Turns a service response body into an `AnalysisResult`

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::app_log;
use crate::error::{AnalyzerError, DEFAULT_APPLICATION_ERROR};
use crate::types::AnalysisResult;

pub fn ingest(body: Value) -> Result<AnalysisResult, AnalyzerError> {
    if body.get("status").and_then(Value::as_str) == Some("error") {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .filter(|msg| !msg.trim().is_empty())
            .unwrap_or(DEFAULT_APPLICATION_ERROR)
            .to_string();
        app_log!(info, "Service reported an analysis error: {}", message);
        return Err(AnalyzerError::Application(message));
    }

    let result: AnalysisResult = serde_json::from_value(body).map_err(|e| {
        app_log!(warn, "Analysis response has an unexpected shape: {}", e);
        AnalyzerError::Transport(format!("unexpected response shape: {}", e))
    })?;

    app_log!(
        debug,
        "Ingested result: {} skills, {} education records, {} suggestions",
        result.skills.len(),
        result.education.len(),
        result.career_suggestions.len()
    );
    Ok(result)
}

/// Split newline-delimited suggestions, dropping blank lines.
pub fn split_suggestions(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SuggestionsWire {
    Text(String),
    List(Vec<String>),
}

/// Serde hook: accepts a string, a list or null.
pub(crate) fn career_suggestions<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<SuggestionsWire>::deserialize(deserializer)? {
        Some(SuggestionsWire::Text(text)) => split_suggestions(&text),
        Some(SuggestionsWire::List(list)) => list,
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_suggestions_are_split() {
        let result = ingest(json!({ "career_suggestions": "Data Engineer\nML Researcher\n" })).unwrap();
        assert_eq!(result.career_suggestions, vec!["Data Engineer", "ML Researcher"]);
    }

    #[test]
    fn test_crlf_and_blank_lines_are_dropped() {
        assert_eq!(
            split_suggestions("A\r\n\r\n  B  \n\n"),
            vec!["A".to_string(), "B".to_string()]
        );
    }

    #[test]
    fn test_list_suggestions_pass_through() {
        let list = json!(["Backend Developer", "", "Cloud Engineer"]);
        let result = ingest(json!({ "career_suggestions": list })).unwrap();
        assert_eq!(result.career_suggestions, vec!["Backend Developer", "", "Cloud Engineer"]);
    }

    #[test]
    fn test_absent_or_null_suggestions_are_empty() {
        assert!(ingest(json!({})).unwrap().career_suggestions.is_empty());
        assert!(ingest(json!({ "career_suggestions": null }))
            .unwrap()
            .career_suggestions
            .is_empty());
    }

    #[test]
    fn test_error_status_surfaces_message() {
        let err = ingest(json!({ "status": "error", "error": "Unreadable PDF" })).unwrap_err();
        assert_eq!(err, AnalyzerError::Application("Unreadable PDF".to_string()));
    }

    #[test]
    fn test_error_status_without_message_uses_default() {
        let err = ingest(json!({ "status": "error" })).unwrap_err();
        assert_eq!(err, AnalyzerError::Application(DEFAULT_APPLICATION_ERROR.to_string()));
    }

    #[test]
    fn test_error_status_with_non_string_error_uses_default() {
        for error in [json!({ "code": 42 }), json!(["a", "b"]), json!(7), json!("  ")] {
            let err = ingest(json!({ "status": "error", "error": error })).unwrap_err();
            assert_eq!(err, AnalyzerError::Application(DEFAULT_APPLICATION_ERROR.to_string()));
        }
    }

    #[test]
    fn test_non_string_status_is_not_an_error() {
        let result = ingest(json!({ "status": 500, "error": { "code": 42 }, "name": "Ada" })).unwrap();
        assert_eq!(result.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_success_status_is_ingested() {
        let result = ingest(json!({ "status": "success", "name": "Ada", "skills": ["Rust"] })).unwrap();
        assert_eq!(result.name.as_deref(), Some("Ada"));
        assert_eq!(result.skills, vec!["Rust"]);
    }
}
