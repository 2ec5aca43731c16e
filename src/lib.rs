//! Skill gap analysis library
//!
//! Extracts skills from resumes and job descriptions, scores importance-weighted
//! gaps, ranks candidates and schedules time-boxed development plans.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod requests;

pub use config::Config;
pub use error::{Result, SkillGapError};
pub use processing::analyzer::{CandidateComparison, SkillGapEngine};
pub use processing::gap_analyzer::GapReport;
pub use processing::planner::DevelopmentPlanReport;
pub use requests::SkillGapRequest;
