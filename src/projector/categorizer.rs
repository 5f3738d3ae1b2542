// src/projector/categorizer.rs
//! Keyword classifier for the flat skill list
//!
//! Categories are checked in a fixed order and the first keyword list with a
//! substring hit wins. Reordering `SkillCategory::ALL` reclassifies skills.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SkillCategory {
    Frontend,
    Backend,
    Programming,
    OtherTech,
    SoftSkills,
}

const FRONTEND_KEYWORDS: &[&str] = &["react", "html", "css", "javascript", "vue", "angular"];

const BACKEND_KEYWORDS: &[&str] = &[
    "node",
    "express",
    "django",
    "flask",
    "spring",
    "sql",
    "mongodb",
    "postgresql",
    "api",
];

const PROGRAMMING_KEYWORDS: &[&str] = &[
    "python",
    "java",
    "typescript",
    "c++",
    "c#",
    "golang",
    "rust",
    "kotlin",
    "swift",
    "scala",
    "ruby",
];

const OTHER_TECH_KEYWORDS: &[&str] = &[
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "git",
    "linux",
    "cloud",
    "machine learning",
    "data science",
    "tensorflow",
    "pytorch",
];

pub const SOFT_SKILL_KEYWORDS: &[&str] = &[
    "communication",
    "leadership",
    "teamwork",
    "adaptability",
    "problem-solving",
    "time management",
    "critical thinking",
    "creativity",
    "decision making",
    "empathy",
];

impl SkillCategory {
    /// Precedence order.
    pub const ALL: [SkillCategory; 5] = [
        SkillCategory::Frontend,
        SkillCategory::Backend,
        SkillCategory::Programming,
        SkillCategory::OtherTech,
        SkillCategory::SoftSkills,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            SkillCategory::Frontend => FRONTEND_KEYWORDS,
            SkillCategory::Backend => BACKEND_KEYWORDS,
            SkillCategory::Programming => PROGRAMMING_KEYWORDS,
            SkillCategory::OtherTech => OTHER_TECH_KEYWORDS,
            SkillCategory::SoftSkills => SOFT_SKILL_KEYWORDS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SkillCategory::Frontend => "Frontend",
            SkillCategory::Backend => "Backend",
            SkillCategory::Programming => "Programming",
            SkillCategory::OtherTech => "Other Tech",
            SkillCategory::SoftSkills => "Soft Skills",
        }
    }

    /// First category matching the skill, if any.
    pub fn classify(skill: &str) -> Option<SkillCategory> {
        let normalized = normalize(skill);
        Self::ALL
            .into_iter()
            .find(|category| contains_any(&normalized, category.keywords()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategorizedSkills {
    pub frontend: Vec<String>,
    pub backend: Vec<String>,
    pub programming: Vec<String>,
    pub other_tech: Vec<String>,
    pub soft_skills: Vec<String>,
    pub unclassified: Vec<String>,
}

impl CategorizedSkills {
    pub fn bucket(&self, category: SkillCategory) -> &[String] {
        match category {
            SkillCategory::Frontend => &self.frontend,
            SkillCategory::Backend => &self.backend,
            SkillCategory::Programming => &self.programming,
            SkillCategory::OtherTech => &self.other_tech,
            SkillCategory::SoftSkills => &self.soft_skills,
        }
    }

    fn bucket_mut(&mut self, category: Option<SkillCategory>) -> &mut Vec<String> {
        match category {
            Some(SkillCategory::Frontend) => &mut self.frontend,
            Some(SkillCategory::Backend) => &mut self.backend,
            Some(SkillCategory::Programming) => &mut self.programming,
            Some(SkillCategory::OtherTech) => &mut self.other_tech,
            Some(SkillCategory::SoftSkills) => &mut self.soft_skills,
            None => &mut self.unclassified,
        }
    }

    pub fn total(&self) -> usize {
        SkillCategory::ALL
            .iter()
            .map(|c| self.bucket(*c).len())
            .sum::<usize>()
            + self.unclassified.len()
    }
}

/// Partition skills into the five categories, keeping input order per bucket.
pub fn categorize(skills: &[String]) -> CategorizedSkills {
    let mut buckets = CategorizedSkills::default();
    for skill in skills {
        buckets
            .bucket_mut(SkillCategory::classify(skill))
            .push(skill.clone());
    }
    buckets
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TechSoftSplit {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
}

/// Coarse two-way split used by the tech/soft views. Independent of `categorize`.
pub fn split_tech_soft(skills: &[String]) -> TechSoftSplit {
    let (soft, technical): (Vec<String>, Vec<String>) = skills
        .iter()
        .cloned()
        .partition(|skill| contains_any(&normalize(skill), SOFT_SKILL_KEYWORDS));
    TechSoftSplit { technical, soft }
}

fn normalize(skill: &str) -> String {
    skill.trim().to_lowercase()
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}
