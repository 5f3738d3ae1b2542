// src/types/analysis.rs
//! Analysis payload as returned by the résumé analysis service

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::projector::ingest::career_suggestions;

// ===== Analysis Result =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "education_records")]
    pub education: Vec<EducationRecord>,
    /// Always a sequence once ingested, whatever shape the service sent.
    #[serde(default, deserialize_with = "career_suggestions")]
    pub career_suggestions: Vec<String>,
    #[serde(default)]
    pub ai_agent_career_advice: Option<String>,
    #[serde(default)]
    pub text_preview: Option<String>,
    /// Structured parser output passed through by the service; dropped if unreadable.
    #[serde(default, deserialize_with = "lenient_option")]
    pub affinda_raw: Option<RawExtraction>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub extraction_method: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationRecord {
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub grade: Option<String>,
}

// ===== Raw extraction (structured parser output) =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExtraction {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub certifications: Vec<Certification>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    #[serde(default)]
    pub job_title: Option<JobTitle>,
    #[serde(default)]
    pub organisation: Option<String>,
    #[serde(default)]
    pub dates: Option<DateRange>,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobTitle {
    #[serde(default)]
    pub raw: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Either a bare string or `{ "name": ... }` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CertificationWire")]
pub struct Certification {
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CertificationWire {
    Name(String),
    Entry {
        #[serde(default)]
        name: Option<String>,
    },
}

impl From<CertificationWire> for Certification {
    fn from(wire: CertificationWire) -> Self {
        match wire {
            CertificationWire::Name(name) => Certification { name: Some(name) },
            CertificationWire::Entry { name } => Certification { name },
        }
    }
}

/// Either a bare string (the project name) or a full entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProjectWire")]
pub struct Project {
    pub name: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProjectWire {
    Name(String),
    Entry {
        #[serde(default)]
        name: Option<String>,
        #[serde(default, deserialize_with = "lenient_list")]
        highlights: Vec<String>,
    },
}

impl From<ProjectWire> for Project {
    fn from(wire: ProjectWire) -> Self {
        match wire {
            ProjectWire::Name(name) => Project {
                name: Some(name),
                highlights: Vec::new(),
            },
            ProjectWire::Entry { name, highlights } => Project { name, highlights },
        }
    }
}

impl AnalysisResult {
    /// Full document text shared by the raw and search views.
    pub fn full_text(&self) -> &str {
        self.affinda_raw
            .as_ref()
            .and_then(|raw| raw.text.as_deref())
            .filter(|text| !text.is_empty())
            .or_else(|| self.text_preview.as_deref())
            .unwrap_or("")
    }

    pub fn has_skills(&self) -> bool {
        !self.skills.is_empty()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Items that do not fit `T` are dropped; a non-list becomes empty.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok().flatten())
}

// Some parser fallbacks send education as a single object; only a list is rendered.
fn education_records<'de, D>(deserializer: D) -> Result<Vec<EducationRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if !value.is_array() {
        return Ok(Vec::new());
    }
    serde_json::from_value(value).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_text_prefers_raw_extraction() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "text_preview": "preview",
            "affinda_raw": { "text": "full text" }
        }))
        .unwrap();
        assert_eq!(result.full_text(), "full text");
    }

    #[test]
    fn test_full_text_falls_back_to_preview_then_empty() {
        let preview: AnalysisResult = serde_json::from_value(json!({
            "text_preview": "preview",
            "affinda_raw": { "text": "" }
        }))
        .unwrap();
        assert_eq!(preview.full_text(), "preview");
        assert_eq!(AnalysisResult::default().full_text(), "");
    }

    #[test]
    fn test_null_collections_become_empty() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "skills": null,
            "education": { "college_name": "Not found", "degree": "Not found" },
            "affinda_raw": { "workExperience": null, "projects": [{ "name": "X", "highlights": null }] }
        }))
        .unwrap();
        assert!(result.skills.is_empty());
        assert!(result.education.is_empty());
        let raw = result.affinda_raw.unwrap();
        assert!(raw.work_experience.is_empty());
        assert!(raw.projects[0].highlights.is_empty());
    }

    #[test]
    fn test_string_certifications_and_projects_are_accepted() {
        let raw: RawExtraction = serde_json::from_value(json!({
            "certifications": ["AWS Certified Developer", { "name": "CKA" }],
            "projects": ["cvlens", { "name": "infra", "highlights": ["Terraform"] }]
        }))
        .unwrap();
        assert_eq!(raw.certifications[0].name.as_deref(), Some("AWS Certified Developer"));
        assert_eq!(raw.certifications[1].name.as_deref(), Some("CKA"));
        assert_eq!(raw.projects[0].name.as_deref(), Some("cvlens"));
        assert!(raw.projects[0].highlights.is_empty());
        assert_eq!(raw.projects[1].highlights, vec!["Terraform"]);
    }

    #[test]
    fn test_malformed_raw_items_are_dropped() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "name": "Ada",
            "affinda_raw": {
                "text": "Rust dev",
                "workExperience": [42, { "organisation": "Acme" }],
                "certifications": [7, "CKA"],
                "projects": "not a list"
            }
        }))
        .unwrap();
        let raw = result.affinda_raw.unwrap();
        assert_eq!(raw.work_experience.len(), 1);
        assert_eq!(raw.work_experience[0].organisation.as_deref(), Some("Acme"));
        assert_eq!(raw.certifications.len(), 1);
        assert!(raw.projects.is_empty());
    }

    #[test]
    fn test_unreadable_raw_extraction_is_dropped() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "name": "Ada",
            "text_preview": "preview",
            "affinda_raw": { "text": ["not", "a", "string"] }
        }))
        .unwrap();
        assert!(result.affinda_raw.is_none());
        assert_eq!(result.full_text(), "preview");
    }

    #[test]
    fn test_camel_case_work_experience() {
        let raw: RawExtraction = serde_json::from_value(json!({
            "workExperience": [{
                "jobTitle": { "raw": "Engineer" },
                "organisation": "Acme",
                "dates": { "startDate": "2020-01", "endDate": null },
                "jobDescription": "Built things"
            }]
        }))
        .unwrap();
        let exp = &raw.work_experience[0];
        assert_eq!(exp.job_title.as_ref().unwrap().raw.as_deref(), Some("Engineer"));
        assert_eq!(exp.dates.as_ref().unwrap().start_date.as_deref(), Some("2020-01"));
        assert_eq!(exp.dates.as_ref().unwrap().end_date, None);
    }
}
