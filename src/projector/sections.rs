// src/projector/sections.rs
//! Data-driven section table: one entry per selectable view

use std::fmt;
use std::str::FromStr;

use super::markdown::render_markdown;
use super::views;
use crate::error::{AnalyzerError, TRENDS_UNAVAILABLE};
use crate::session::trends::TrendsState;
use crate::types::AnalysisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    /// Section-wise raw output.
    #[default]
    None,
    Personal,
    Skills,
    TechSkills,
    SoftSkills,
    Education,
    Career,
    AiAdvice,
    Industry,
    Search,
}

/// Per-session inputs a renderer may need besides the result.
#[derive(Debug, Clone, Copy)]
pub struct ViewState<'a> {
    pub search_query: &'a str,
    pub trends: &'a TrendsState,
}

pub struct SectionSpec {
    pub section: Section,
    pub key: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub render: fn(&AnalysisResult, &ViewState<'_>) -> String,
}

pub static SECTIONS: &[SectionSpec] = &[
    SectionSpec {
        section: Section::None,
        key: "raw",
        label: "Full Section-wise Data",
        icon: "🗂️",
        render: |result, _| views::render_raw(result),
    },
    SectionSpec {
        section: Section::Personal,
        key: "personal",
        label: "Personal Details",
        icon: "👤",
        render: |result, _| views::render_personal(result),
    },
    SectionSpec {
        section: Section::Skills,
        key: "skills",
        label: "Skills",
        icon: "🧠",
        render: |result, _| views::render_skills(result),
    },
    SectionSpec {
        section: Section::TechSkills,
        key: "tech-skills",
        label: "Technical Skills",
        icon: "💻",
        render: |result, _| views::render_tech_skills(result),
    },
    SectionSpec {
        section: Section::SoftSkills,
        key: "soft-skills",
        label: "Soft Skills",
        icon: "🤝",
        render: |result, _| views::render_soft_skills(result),
    },
    SectionSpec {
        section: Section::Education,
        key: "education",
        label: "Education",
        icon: "🎓",
        render: |result, _| views::render_education(result),
    },
    SectionSpec {
        section: Section::Career,
        key: "career",
        label: "Career Suggestions",
        icon: "💼",
        render: |result, _| views::render_career(result),
    },
    SectionSpec {
        section: Section::AiAdvice,
        key: "ai-advice",
        label: "AI Career Advice",
        icon: "🤖",
        render: |result, _| views::render_ai_advice(result),
    },
    SectionSpec {
        section: Section::Industry,
        key: "industry",
        label: "Industry Trends",
        icon: "📈",
        render: render_industry,
    },
    SectionSpec {
        section: Section::Search,
        key: "search",
        label: "Keyword Search Results",
        icon: "🔎",
        render: |result, state| views::render_search(result, state.search_query),
    },
];

fn render_industry(result: &AnalysisResult, state: &ViewState<'_>) -> String {
    match state.trends {
        TrendsState::Loaded(markdown) => render_markdown(markdown),
        TrendsState::Failed(_) => TRENDS_UNAVAILABLE.to_string(),
        TrendsState::Fetching => "Fetching industry trends...".to_string(),
        TrendsState::Idle if !result.has_skills() => {
            "No skills found to look up industry trends.".to_string()
        }
        TrendsState::Idle => "Industry trends not loaded yet.".to_string(),
    }
}

impl Section {
    pub fn spec(self) -> &'static SectionSpec {
        SECTIONS
            .iter()
            .find(|spec| spec.section == self)
            .unwrap_or(&SECTIONS[0])
    }

    pub fn key(self) -> &'static str {
        self.spec().key
    }

    /// Heading plus body for this section.
    pub fn render(self, result: &AnalysisResult, state: &ViewState<'_>) -> String {
        let spec = self.spec();
        format!("{} {}\n\n{}", spec.icon, spec.label, (spec.render)(result, state))
    }
}

impl FromStr for Section {
    type Err = AnalyzerError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let key = key.trim().to_lowercase();
        if key.is_empty() || key == "none" {
            return Ok(Section::None);
        }
        SECTIONS
            .iter()
            .find(|spec| spec.key == key)
            .map(|spec| spec.section)
            .ok_or_else(|| {
                let known: Vec<&str> = SECTIONS.iter().map(|s| s.key).collect();
                AnalyzerError::Validation(format!(
                    "Unknown section '{}'. Use one of: {}",
                    key,
                    known.join(", ")
                ))
            })
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
