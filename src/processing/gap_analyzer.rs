//! Importance-weighted gap analysis between candidate and job skill sets

use crate::config::AnalysisConfig;
use crate::processing::importance::ImportanceMap;
use crate::processing::similarity::SimilarityScorer;
use crate::processing::taxonomy::TaxonomyIndex;
use crate::processing::training::{TrainingCatalog, TrainingResources};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A job skill satisfied by a sufficiently similar candidate skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub job_skill: String,
    pub candidate_skill: String,
    pub similarity: f64,
    pub importance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingSkill {
    pub skill: String,
    pub importance: f64,
    pub is_critical: bool,
}

/// A candidate skill no job skill claimed, with its closest job skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalSkill {
    pub skill: String,
    pub best_related_job_skill: Option<String>,
    pub similarity: f64,
    pub relevance: f64,
}

/// Per-domain rollup on the 0-100 scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainGap {
    pub domain: String,
    pub required: usize,
    pub matched: usize,
    pub match_score: f64,
    pub gap_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecommendation {
    pub skill: String,
    pub importance: f64,
    pub is_critical: bool,
    pub resources: TrainingResources,
}

/// Result of comparing one candidate against one job.
///
/// `overall_match_score` and `skill_gap_score` are fractions in `[0, 1]`;
/// the `*_percentage` fields are the same values on the 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapReport {
    pub candidate_id: Option<String>,
    pub job_id: Option<String>,
    pub overall_match_score: f64,
    pub skill_gap_score: f64,
    pub match_percentage: f64,
    pub gap_percentage: f64,
    pub candidate_skills: Vec<String>,
    pub job_skills: Vec<String>,
    pub candidate_skills_count: usize,
    pub job_skills_count: usize,
    pub matched_skills_count: usize,
    pub missing_skills_count: usize,
    pub additional_skills_count: usize,
    pub critical_skills_count: usize,
    pub missing_critical_skills_count: usize,
    pub critical_skills: Vec<String>,
    pub matched_skills: Vec<SkillMatch>,
    pub missing_skills: Vec<MissingSkill>,
    pub additional_skills: Vec<AdditionalSkill>,
    pub training_recommendations: Vec<TrainingRecommendation>,
    pub skill_gap_by_domain: Vec<DomainGap>,
}

impl GapReport {
    pub fn with_ids(mut self, candidate_id: Option<String>, job_id: Option<String>) -> Self {
        self.candidate_id = candidate_id;
        self.job_id = job_id;
        self
    }

    pub fn missing_importance(&self) -> f64 {
        self.missing_skills.iter().map(|m| m.importance).sum()
    }
}

pub struct GapAnalyzer {
    similarity_threshold: f64,
    critical_threshold: f64,
    default_importance: f64,
    taxonomy: Arc<TaxonomyIndex>,
    scorer: Arc<dyn SimilarityScorer>,
    catalog: Arc<TrainingCatalog>,
}

impl GapAnalyzer {
    pub fn new(
        config: &AnalysisConfig,
        taxonomy: Arc<TaxonomyIndex>,
        scorer: Arc<dyn SimilarityScorer>,
    ) -> Self {
        Self {
            similarity_threshold: config.similarity_threshold,
            critical_threshold: config.critical_threshold,
            default_importance: config.default_importance,
            taxonomy,
            scorer,
            catalog: Arc::new(TrainingCatalog::builtin()),
        }
    }

    pub fn with_catalog(mut self, catalog: Arc<TrainingCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn critical_threshold(&self) -> f64 {
        self.critical_threshold
    }

    pub fn scorer(&self) -> &dyn SimilarityScorer {
        self.scorer.as_ref()
    }

    /// Match every job skill against its single best candidate skill.
    ///
    /// The matching is greedy per job skill: two job skills may both be
    /// satisfied by the same candidate skill.
    pub fn analyze(
        &self,
        candidate_skills: &[String],
        job_skills: &[String],
        importance: &ImportanceMap,
    ) -> GapReport {
        let candidate_skills = dedup_labels(candidate_skills);
        let job_skills = dedup_labels(job_skills);

        if job_skills.is_empty() {
            log::warn!("No job skills to analyze; report will show a full gap");
        }
        if candidate_skills.is_empty() {
            log::warn!("Candidate has no recognised skills; every job skill is missing");
        }

        let importance_of = |skill: &str| importance.get_or(skill, self.default_importance);

        let critical_skills: Vec<String> = job_skills
            .iter()
            .filter(|s| importance_of(s.as_str()) >= self.critical_threshold)
            .cloned()
            .collect();

        let mut matched = Vec::new();
        let mut missing = Vec::new();

        for job_skill in &job_skills {
            let (best, similarity) = self.best_match(job_skill, &candidate_skills);
            let weight = importance_of(job_skill.as_str());

            match best {
                Some(candidate_skill) if similarity >= self.similarity_threshold => {
                    log::debug!(
                        "'{}' matched by '{}' ({:.2})",
                        job_skill,
                        candidate_skill,
                        similarity
                    );
                    matched.push(SkillMatch {
                        job_skill: job_skill.clone(),
                        candidate_skill: candidate_skill.to_string(),
                        similarity,
                        importance: weight,
                    });
                }
                _ => {
                    log::debug!("'{}' missing (best similarity {:.2})", job_skill, similarity);
                    missing.push(MissingSkill {
                        skill: job_skill.clone(),
                        importance: weight,
                        is_critical: weight >= self.critical_threshold,
                    });
                }
            }
        }

        let mut additional: Vec<AdditionalSkill> = candidate_skills
            .iter()
            .filter(|c| !matched.iter().any(|m: &SkillMatch| &m.candidate_skill == *c))
            .map(|candidate_skill| {
                let (best, similarity) = self.best_match(candidate_skill, &job_skills);
                let weight = best.map_or(self.default_importance, importance_of);
                AdditionalSkill {
                    skill: candidate_skill.clone(),
                    best_related_job_skill: best.map(str::to_string),
                    similarity,
                    relevance: similarity * weight,
                }
            })
            .collect();

        let total_importance: f64 = job_skills.iter().map(|s| importance_of(s.as_str())).sum();
        let matched_importance: f64 = matched.iter().map(|m| m.importance * m.similarity).sum();
        let overall_match_score = if job_skills.is_empty() || total_importance <= 0.0 {
            0.0
        } else {
            (matched_importance / total_importance).clamp(0.0, 1.0)
        };
        let skill_gap_score = round2(1.0 - overall_match_score);

        let skill_gap_by_domain = self.domain_rollup(&job_skills, &matched);
        let training_recommendations = self.training_recommendations(&missing);

        matched.sort_by(|a, b| b.importance.total_cmp(&a.importance));
        missing.sort_by(|a, b| b.importance.total_cmp(&a.importance));
        additional.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));

        let missing_critical_skills_count = missing.iter().filter(|m| m.is_critical).count();

        GapReport {
            candidate_id: None,
            job_id: None,
            overall_match_score,
            skill_gap_score,
            match_percentage: round2(overall_match_score * 100.0),
            gap_percentage: round2((1.0 - overall_match_score) * 100.0),
            candidate_skills_count: candidate_skills.len(),
            job_skills_count: job_skills.len(),
            matched_skills_count: matched.len(),
            missing_skills_count: missing.len(),
            additional_skills_count: additional.len(),
            critical_skills_count: critical_skills.len(),
            missing_critical_skills_count,
            candidate_skills,
            job_skills,
            critical_skills,
            matched_skills: matched,
            missing_skills: missing,
            additional_skills: additional,
            training_recommendations,
            skill_gap_by_domain,
        }
    }

    // Highest-similarity target; ties keep the earliest
    fn best_match<'a>(&self, skill: &str, targets: &'a [String]) -> (Option<&'a str>, f64) {
        let mut best = None;
        let mut best_similarity = 0.0;
        for target in targets {
            let similarity = self.scorer.similarity(skill, target);
            if similarity > best_similarity {
                best_similarity = similarity;
                best = Some(target.as_str());
            }
        }
        (best, best_similarity)
    }

    fn domain_rollup(&self, job_skills: &[String], matched: &[SkillMatch]) -> Vec<DomainGap> {
        self.taxonomy
            .domains()
            .iter()
            .map(|domain| {
                let in_domain = |skill: &str| self.taxonomy.domain_of(skill) == Some(domain.name.as_str());
                let required = job_skills.iter().filter(|s| in_domain(s.as_str())).count();
                let matched = matched.iter().filter(|m| in_domain(m.job_skill.as_str())).count();

                let (match_score, gap_score) = if required > 0 {
                    let score = round2(matched as f64 / required as f64 * 100.0);
                    (score, round2(100.0 - score))
                } else {
                    (0.0, 0.0)
                };

                DomainGap {
                    domain: domain.name.clone(),
                    required,
                    matched,
                    match_score,
                    gap_score,
                }
            })
            .collect()
    }

    fn training_recommendations(&self, missing: &[MissingSkill]) -> Vec<TrainingRecommendation> {
        let mut recommendations: Vec<TrainingRecommendation> = missing
            .iter()
            .map(|m| TrainingRecommendation {
                skill: m.skill.clone(),
                importance: m.importance,
                is_critical: m.is_critical,
                resources: self.catalog.resources(&m.skill),
            })
            .collect();

        recommendations.sort_by(|a, b| {
            b.is_critical
                .cmp(&a.is_critical)
                .then_with(|| b.importance.total_cmp(&a.importance))
        });
        recommendations
    }
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// First spelling wins; comparison ignores case
fn dedup_labels(labels: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    labels
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty() && seen.insert(l.to_lowercase()))
        .map(str::to_string)
        .collect()
}
