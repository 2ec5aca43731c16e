//! Greedy scheduling of missing skills into a fixed number of weeks

use crate::processing::gap_analyzer::{round2, GapReport, MissingSkill};
use crate::processing::training::{TrainingCatalog, TrainingResources};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One scheduled block of training; weeks are 1-based and inclusive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentPlanEntry {
    pub skill: String,
    pub importance: f64,
    pub start_week: f64,
    pub end_week: f64,
    pub duration_weeks: f64,
    pub is_critical: bool,
    pub is_partial_training: bool,
    pub resources: TrainingResources,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentPlanReport {
    pub candidate_id: Option<String>,
    pub job_id: Option<String>,
    pub total_missing_skills: usize,
    pub total_learning_time_required: f64,
    pub timeframe_available: u32,
    pub skills_covered: usize,
    pub skills_not_covered: usize,
    pub development_plan: Vec<DevelopmentPlanEntry>,
    pub skill_gap_score_before: f64,
    pub estimated_skill_gap_score_after: f64,
    pub critical_skills_covered: usize,
    pub critical_skills_not_covered: usize,
}

impl DevelopmentPlanReport {
    pub fn weeks_scheduled(&self) -> f64 {
        self.development_plan.iter().map(|e| e.duration_weeks).sum()
    }
}

struct Candidate<'a> {
    skill: &'a MissingSkill,
    weeks: f64,
    priority: f64,
}

pub struct DevelopmentPlanner {
    catalog: Arc<TrainingCatalog>,
}

impl DevelopmentPlanner {
    pub fn new(catalog: Arc<TrainingCatalog>) -> Self {
        Self { catalog }
    }

    /// Weeks needed for a skill, scaled up with its importance
    pub fn adjusted_weeks(&self, skill: &MissingSkill) -> f64 {
        self.catalog.base_weeks(&skill.skill) * (0.8 + 0.4 * skill.importance)
    }

    pub fn plan(&self, report: &GapReport, timeframe_weeks: u32) -> DevelopmentPlanReport {
        let missing = &report.missing_skills;
        let total_critical = missing.iter().filter(|m| m.is_critical).count();

        let mut candidates: Vec<Candidate> = missing
            .iter()
            .map(|skill| Candidate {
                skill,
                weeks: self.adjusted_weeks(skill),
                priority: skill.importance * if skill.is_critical { 1.5 } else { 1.0 },
            })
            .collect();
        let total_learning_time_required: f64 = candidates.iter().map(|c| c.weeks).sum();

        let mut development_plan = Vec::new();
        if timeframe_weeks == 0 {
            log::warn!("Timeframe of 0 weeks; no training can be scheduled");
        } else if missing.is_empty() {
            log::info!("No missing skills; nothing to schedule");
        } else {
            // stable: equal priorities keep report order
            candidates.sort_by(|a, b| b.priority.total_cmp(&a.priority));
            development_plan = self.schedule(&candidates, f64::from(timeframe_weeks));
        }

        let estimated_skill_gap_score_after = estimate_gap_after(report, &development_plan);
        let critical_skills_covered = development_plan.iter().filter(|e| e.is_critical).count();

        log::info!(
            "Development plan covers {} of {} missing skills in {} weeks",
            development_plan.len(),
            missing.len(),
            timeframe_weeks
        );

        DevelopmentPlanReport {
            candidate_id: report.candidate_id.clone(),
            job_id: report.job_id.clone(),
            total_missing_skills: missing.len(),
            total_learning_time_required,
            timeframe_available: timeframe_weeks,
            skills_covered: development_plan.len(),
            skills_not_covered: missing.len() - development_plan.len(),
            skill_gap_score_before: report.skill_gap_score,
            estimated_skill_gap_score_after,
            critical_skills_covered,
            critical_skills_not_covered: total_critical - critical_skills_covered,
            development_plan,
        }
    }

    fn schedule(&self, candidates: &[Candidate], budget: f64) -> Vec<DevelopmentPlanEntry> {
        let mut entries = Vec::new();
        let mut remaining = budget;
        let mut next_week = 1.0;

        for candidate in candidates {
            let skill = candidate.skill;
            let (duration, partial) = if candidate.weeks <= remaining {
                (candidate.weeks, false)
            } else if remaining > 0.0 && skill.is_critical {
                (remaining, true)
            } else {
                log::debug!(
                    "Skipping '{}': needs {:.1} weeks, {:.1} left",
                    skill.skill,
                    candidate.weeks,
                    remaining
                );
                continue;
            };

            entries.push(DevelopmentPlanEntry {
                skill: skill.skill.clone(),
                importance: skill.importance,
                start_week: next_week,
                end_week: next_week + duration - 1.0,
                duration_weeks: duration,
                is_critical: skill.is_critical,
                is_partial_training: partial,
                resources: self.catalog.resources(&skill.skill),
            });

            next_week += duration;
            remaining -= duration;
            if partial {
                break;
            }
        }

        entries
    }
}

impl Default for DevelopmentPlanner {
    fn default() -> Self {
        Self::new(Arc::new(TrainingCatalog::builtin()))
    }
}

/// Shrink the gap score in proportion to the missing importance that gets trained
fn estimate_gap_after(report: &GapReport, plan: &[DevelopmentPlanEntry]) -> f64 {
    let current = report.skill_gap_score;
    let total = report.missing_importance();
    if total <= 0.0 || plan.is_empty() {
        return current;
    }

    let developed: f64 = plan.iter().map(|e| e.importance).sum();
    if developed >= total {
        0.0
    } else {
        round2(current * (1.0 - developed / total))
    }
}
