//! Orders candidates for a single job by their gap reports

use crate::processing::gap_analyzer::GapReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary row for one candidate; scores on the 0-100 scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub candidate_id: String,
    pub match_score: f64,
    pub skill_gap_score: f64,
    pub missing_critical_skills_count: usize,
    pub missing_skills_count: usize,
    pub additional_skills_count: usize,
}

impl RankedCandidate {
    fn from_report(candidate_id: &str, report: &GapReport) -> Self {
        Self {
            candidate_id: candidate_id.to_string(),
            match_score: report.match_percentage,
            skill_gap_score: report.gap_percentage,
            missing_critical_skills_count: report.missing_critical_skills_count,
            missing_skills_count: report.missing_skills_count,
            additional_skills_count: report.additional_skills_count,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateRanker;

impl CandidateRanker {
    pub fn new() -> Self {
        Self
    }

    /// Highest match score first; equal scores put fewer missing critical
    /// skills first, then fall back to candidate id order.
    pub fn rank(&self, reports: &BTreeMap<String, GapReport>) -> Vec<RankedCandidate> {
        let mut ranked: Vec<RankedCandidate> = reports
            .iter()
            .map(|(id, report)| RankedCandidate::from_report(id, report))
            .collect();

        ranked.sort_by(|a, b| {
            b.match_score
                .total_cmp(&a.match_score)
                .then_with(|| a.missing_critical_skills_count.cmp(&b.missing_critical_skills_count))
        });
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(match_percentage: f64, missing_critical: usize) -> GapReport {
        GapReport {
            candidate_id: None,
            job_id: None,
            overall_match_score: match_percentage / 100.0,
            skill_gap_score: 1.0 - match_percentage / 100.0,
            match_percentage,
            gap_percentage: 100.0 - match_percentage,
            candidate_skills: Vec::new(),
            job_skills: Vec::new(),
            candidate_skills_count: 0,
            job_skills_count: 0,
            matched_skills_count: 0,
            missing_skills_count: missing_critical,
            additional_skills_count: 0,
            critical_skills_count: missing_critical,
            missing_critical_skills_count: missing_critical,
            critical_skills: Vec::new(),
            matched_skills: Vec::new(),
            missing_skills: Vec::new(),
            additional_skills: Vec::new(),
            training_recommendations: Vec::new(),
            skill_gap_by_domain: Vec::new(),
        }
    }

    #[test]
    fn test_tie_broken_by_missing_critical() {
        let mut reports = BTreeMap::new();
        reports.insert("candidate-2".to_string(), report(80.0, 1));
        reports.insert("candidate-1".to_string(), report(80.0, 0));

        let ranked = CandidateRanker::new().rank(&reports);
        assert_eq!(ranked[0].candidate_id, "candidate-1");
        assert_eq!(ranked[1].candidate_id, "candidate-2");
    }

    #[test]
    fn test_higher_score_wins_regardless_of_critical() {
        let mut reports = BTreeMap::new();
        reports.insert("a".to_string(), report(55.0, 0));
        reports.insert("b".to_string(), report(90.0, 2));
        reports.insert("c".to_string(), report(70.0, 0));

        let ids: Vec<String> = CandidateRanker::new()
            .rank(&reports)
            .into_iter()
            .map(|r| r.candidate_id)
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_full_ties_keep_id_order() {
        let mut reports = BTreeMap::new();
        reports.insert("zed".to_string(), report(40.0, 1));
        reports.insert("amy".to_string(), report(40.0, 1));

        let ranked = CandidateRanker::new().rank(&reports);
        assert_eq!(ranked[0].candidate_id, "amy");
    }

    #[test]
    fn test_empty_input() {
        assert!(CandidateRanker::new().rank(&BTreeMap::new()).is_empty());
    }
}
