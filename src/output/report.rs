//! Report envelope wrapping engine results with generation metadata

use crate::processing::analyzer::CandidateComparison;
use crate::processing::gap_analyzer::GapReport;
use crate::processing::planner::DevelopmentPlanReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An engine result ready for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEnvelope {
    pub metadata: ReportMetadata,
    pub body: ReportBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum ReportBody {
    GapAnalysis(GapReport),
    CandidateComparison(CandidateComparison),
    DevelopmentPlan(DevelopmentPlanReport),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: DateTime<Utc>,

    pub tool_version: String,

    /// Input files the report was built from
    pub sources: Vec<String>,

    pub similarity_backend: String,

    pub processing_time_ms: u64,
}

/// Qualitative band for a 0-100 match score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    VeryGood,
    Good,
    Fair,
    BelowAverage,
    Poor,
}

impl ScoreBand {
    pub fn from_percentage(score: f64) -> Self {
        match score {
            s if s >= 90.0 => ScoreBand::Excellent,
            s if s >= 80.0 => ScoreBand::VeryGood,
            s if s >= 70.0 => ScoreBand::Good,
            s if s >= 60.0 => ScoreBand::Fair,
            s if s >= 50.0 => ScoreBand::BelowAverage,
            _ => ScoreBand::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::VeryGood => "Very Good",
            ScoreBand::Good => "Good",
            ScoreBand::Fair => "Fair",
            ScoreBand::BelowAverage => "Below Average",
            ScoreBand::Poor => "Poor",
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Candidate covers nearly every required skill",
            ScoreBand::VeryGood => "Strong fit with minor gaps",
            ScoreBand::Good => "Solid fit; a few skills need development",
            ScoreBand::Fair => "Partial fit; targeted training recommended",
            ScoreBand::BelowAverage => "Significant gaps in required skills",
            ScoreBand::Poor => "Most required skills are missing",
        }
    }
}

impl ReportEnvelope {
    pub fn new(body: ReportBody, sources: Vec<String>, similarity_backend: &str, processing_time_ms: u64) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                sources,
                similarity_backend: similarity_backend.to_string(),
                processing_time_ms,
            },
            body,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.body {
            ReportBody::GapAnalysis(_) => "Skill Gap Analysis",
            ReportBody::CandidateComparison(_) => "Candidate Comparison",
            ReportBody::DevelopmentPlan(_) => "Skill Development Plan",
        }
    }

    /// Headline score on the 0-100 scale, where one applies
    pub fn headline_score(&self) -> Option<f64> {
        match &self.body {
            ReportBody::GapAnalysis(report) => Some(report.match_percentage),
            ReportBody::CandidateComparison(comparison) => {
                comparison.ranked_candidates.first().map(|c| c.match_score)
            }
            ReportBody::DevelopmentPlan(_) => None,
        }
    }

    pub fn generated_at_display(&self) -> String {
        self.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_percentage(100.0), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_percentage(89.99), ScoreBand::VeryGood);
        assert_eq!(ScoreBand::from_percentage(60.0), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_percentage(0.0), ScoreBand::Poor);
        assert_eq!(ScoreBand::BelowAverage.label(), "Below Average");
    }
}
