//! JSON request records for the three engine operations and their validation

use crate::error::{Result, SkillGapError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_TIMEFRAME_WEEKS: i64 = 12;

fn default_timeframe() -> i64 {
    DEFAULT_TIMEFRAME_WEEKS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeSkillGapRequest {
    #[serde(default)]
    pub candidate_resume: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub candidate_id: Option<String>,
    #[serde(default)]
    pub job_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareCandidatesRequest {
    #[serde(default)]
    pub candidate_resumes: BTreeMap<String, String>,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentPlanRequest {
    #[serde(default)]
    pub candidate_resume: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default = "default_timeframe")]
    pub timeframe_weeks: i64,
}

/// A request tagged with the operation it invokes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum SkillGapRequest {
    AnalyzeSkillGap(AnalyzeSkillGapRequest),
    CompareCandidatesForJob(CompareCandidatesRequest),
    GenerateSkillDevelopmentPlan(DevelopmentPlanRequest),
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SkillGapError::Validation(format!("'{}' is required", field)));
    }
    Ok(())
}

impl AnalyzeSkillGapRequest {
    pub fn validate(&self) -> Result<()> {
        require_text("candidate_resume", &self.candidate_resume)?;
        require_text("job_description", &self.job_description)
    }
}

impl CompareCandidatesRequest {
    pub fn validate(&self) -> Result<()> {
        if self.candidate_resumes.is_empty() {
            return Err(SkillGapError::Validation(
                "'candidate_resumes' must contain at least one candidate".to_string(),
            ));
        }

        for (id, resume) in &self.candidate_resumes {
            if id.trim().is_empty() {
                return Err(SkillGapError::Validation("Candidate ids must not be blank".to_string()));
            }
            require_text(&format!("candidate_resumes.{}", id), resume)?;
        }

        require_text("job_description", &self.job_description)
    }
}

impl DevelopmentPlanRequest {
    pub fn validate(&self) -> Result<()> {
        require_text("candidate_resume", &self.candidate_resume)?;
        require_text("job_description", &self.job_description)?;
        self.timeframe().map(|_| ())
    }

    /// The timeframe as an unsigned week count
    pub fn timeframe(&self) -> Result<u32> {
        u32::try_from(self.timeframe_weeks).map_err(|_| {
            SkillGapError::Validation(format!(
                "'timeframe_weeks' must be a non-negative integer, got {}",
                self.timeframe_weeks
            ))
        })
    }
}

impl SkillGapRequest {
    /// Parse a request; malformed JSON is a validation failure
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| SkillGapError::Validation(format!("Invalid request: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            SkillGapRequest::AnalyzeSkillGap(req) => req.validate(),
            SkillGapRequest::CompareCandidatesForJob(req) => req.validate(),
            SkillGapRequest::GenerateSkillDevelopmentPlan(req) => req.validate(),
        }
    }

    pub fn operation(&self) -> &'static str {
        match self {
            SkillGapRequest::AnalyzeSkillGap(_) => "analyze_skill_gap",
            SkillGapRequest::CompareCandidatesForJob(_) => "compare_candidates_for_job",
            SkillGapRequest::GenerateSkillDevelopmentPlan(_) => "generate_skill_development_plan",
        }
    }
}
