//! Skill extraction, scoring, gap analysis, ranking and planning

pub mod analyzer;
pub mod gap_analyzer;
pub mod importance;
pub mod planner;
pub mod ranker;
pub mod similarity;
pub mod skill_extractor;
pub mod taxonomy;
pub mod text;
pub mod training;
