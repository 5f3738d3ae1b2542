// src/projector/views.rs
//! Field projections with display placeholders. The result is never mutated.

use super::categorizer::{categorize, split_tech_soft, SkillCategory};
use super::markdown::render_markdown;
use super::search::keyword_search;
use crate::types::AnalysisResult;

pub const NOT_FOUND: &str = "Not found";
pub const NOT_AVAILABLE: &str = "Not available";
pub const UNKNOWN_DATE: &str = "?";
pub const NO_GRADE: &str = "N/A";

fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(placeholder)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalView<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
}

pub fn personal(result: &AnalysisResult) -> PersonalView<'_> {
    PersonalView {
        name: or_placeholder(result.name.as_deref(), NOT_FOUND),
        email: or_placeholder(result.email.as_deref(), NOT_FOUND),
        phone: or_placeholder(result.phone.as_deref(), NOT_FOUND),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EducationView<'a> {
    pub degree: &'a str,
    pub organization: &'a str,
    pub start_date: &'a str,
    pub end_date: &'a str,
    pub grade: &'a str,
}

/// Records in the order the service sent them; dates are not used for sorting.
pub fn education(result: &AnalysisResult) -> Vec<EducationView<'_>> {
    result
        .education
        .iter()
        .map(|edu| EducationView {
            degree: or_placeholder(edu.degree.as_deref(), "Degree"),
            organization: or_placeholder(edu.organization.as_deref(), "Institution"),
            start_date: or_placeholder(edu.start_date.as_deref(), UNKNOWN_DATE),
            end_date: or_placeholder(edu.end_date.as_deref(), UNKNOWN_DATE),
            grade: or_placeholder(edu.grade.as_deref(), NO_GRADE),
        })
        .collect()
}

// ===== Text renderers used by the section registry =====

pub fn render_personal(result: &AnalysisResult) -> String {
    let view = personal(result);
    format!(
        "Name: {}\nEmail: {}\nPhone: {}",
        view.name, view.email, view.phone
    )
}

pub fn render_skills(result: &AnalysisResult) -> String {
    if result.skills.is_empty() {
        return "No skills found".to_string();
    }

    let buckets = categorize(&result.skills);
    let mut lines = Vec::new();
    for category in SkillCategory::ALL {
        let items = buckets.bucket(category);
        if !items.is_empty() {
            lines.push(format!("{}:", category.label()));
            lines.extend(items.iter().map(|skill| format!("  - {}", skill)));
        }
    }
    if !buckets.unclassified.is_empty() {
        lines.push("Other:".to_string());
        lines.extend(buckets.unclassified.iter().map(|skill| format!("  - {}", skill)));
    }
    lines.join("\n")
}

pub fn render_tech_skills(result: &AnalysisResult) -> String {
    bullet_list(
        &split_tech_soft(&result.skills).technical,
        "No technical skills found.",
    )
}

pub fn render_soft_skills(result: &AnalysisResult) -> String {
    bullet_list(&split_tech_soft(&result.skills).soft, "No soft skills found.")
}

pub fn render_education(result: &AnalysisResult) -> String {
    let records = education(result);
    if records.is_empty() {
        return "No education records found.".to_string();
    }

    records
        .iter()
        .map(|edu| {
            format!(
                "{}\n{}\n{} - {}\nGrade: {}",
                edu.degree, edu.organization, edu.start_date, edu.end_date, edu.grade
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn render_career(result: &AnalysisResult) -> String {
    bullet_list(&result.career_suggestions, "No suggestions available.")
}

pub fn render_ai_advice(result: &AnalysisResult) -> String {
    match result.ai_agent_career_advice.as_deref() {
        Some(advice) if !advice.trim().is_empty() => render_markdown(advice),
        _ => "No AI advice available.".to_string(),
    }
}

pub fn render_search(result: &AnalysisResult, query: &str) -> String {
    let matches = keyword_search(result.full_text(), query);
    if matches.is_empty() {
        return "No matches found.".to_string();
    }
    matches
        .iter()
        .map(|line| format!("  - {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Section-wise output of the structured extraction, shown when no section is picked.
pub fn render_raw(result: &AnalysisResult) -> String {
    let raw = result.affinda_raw.clone().unwrap_or_default();
    let mut lines = vec![
        "Summary".to_string(),
        or_placeholder(raw.summary.as_deref(), NOT_AVAILABLE).to_string(),
        String::new(),
        "Work Experience".to_string(),
    ];

    if raw.work_experience.is_empty() {
        lines.push("No work experience found".to_string());
    }
    for exp in &raw.work_experience {
        let title = exp.job_title.as_ref().and_then(|t| t.raw.as_deref());
        let dates = exp.dates.clone().unwrap_or_default();
        lines.push(format!(
            "{} at {}",
            or_placeholder(title, "Role"),
            or_placeholder(exp.organisation.as_deref(), "Company")
        ));
        lines.push(format!(
            "{} - {}",
            or_placeholder(dates.start_date.as_deref(), "Start"),
            or_placeholder(dates.end_date.as_deref(), "End")
        ));
        if let Some(description) = exp.job_description.as_deref() {
            if !description.trim().is_empty() {
                lines.push(description.trim().to_string());
            }
        }
    }

    let certs: Vec<String> = raw
        .certifications
        .iter()
        .filter_map(|c| c.name.as_deref())
        .filter(|name| !name.trim().is_empty())
        .map(|name| name.trim().to_string())
        .collect();
    lines.push(String::new());
    lines.push("Certifications".to_string());
    lines.push(bullet_list(&certs, "No certifications listed"));

    let projects: Vec<String> = raw
        .projects
        .iter()
        .map(|p| {
            let name = or_placeholder(p.name.as_deref(), "Project");
            if p.highlights.is_empty() {
                name.to_string()
            } else {
                format!("{}: {}", name, p.highlights.join(", "))
            }
        })
        .collect();
    lines.push(String::new());
    lines.push("Projects".to_string());
    lines.push(bullet_list(&projects, "No projects found"));

    lines.join("\n")
}

fn bullet_list(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    items
        .iter()
        .map(|item| format!("  - {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}
