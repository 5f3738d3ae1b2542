// src/projector/mod.rs
//! Read-only projections derived from an analysis result

pub mod categorizer;
pub mod ingest;
pub mod markdown;
pub mod search;
pub mod sections;
pub mod views;

pub use categorizer::{categorize, split_tech_soft, CategorizedSkills, SkillCategory, TechSoftSplit};
pub use ingest::ingest;
pub use search::keyword_search;
pub use sections::{Section, SectionSpec, ViewState, SECTIONS};
