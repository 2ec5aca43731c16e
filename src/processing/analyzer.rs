//! Skill gap engine tying extraction, importance, gap analysis, ranking and planning together

use crate::config::{Config, SimilarityBackend};
use crate::error::{Result, SkillGapError};
use crate::processing::gap_analyzer::{GapAnalyzer, GapReport};
use crate::processing::importance::{HeuristicImportance, ImportanceEstimator, ImportanceMap};
use crate::processing::planner::{DevelopmentPlanReport, DevelopmentPlanner};
use crate::processing::ranker::{CandidateRanker, RankedCandidate};
use crate::processing::similarity::{LookupSimilarity, SimilarityScorer};
use crate::processing::skill_extractor::SkillExtractor;
use crate::processing::taxonomy::TaxonomyIndex;
use crate::processing::training::TrainingCatalog;
use crate::requests::SkillGapRequest;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// Outcome of ranking several candidates against one job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateComparison {
    pub job_skills: Vec<String>,
    pub critical_skills: Vec<String>,
    pub candidate_count: usize,
    pub ranked_candidates: Vec<RankedCandidate>,
    pub detailed_analyses: BTreeMap<String, GapReport>,
}

/// Job-side analysis shared by every candidate compared against the same posting
#[derive(Debug, Clone)]
struct JobProfile {
    skills: Vec<String>,
    importance: ImportanceMap,
}

/// Entry point for the three skill gap operations.
///
/// All tables are read-only after construction, so one engine can serve
/// any number of concurrent calls behind an `Arc`.
pub struct SkillGapEngine {
    taxonomy: Arc<TaxonomyIndex>,
    extractor: SkillExtractor,
    importance: Arc<dyn ImportanceEstimator>,
    analyzer: GapAnalyzer,
    ranker: CandidateRanker,
    planner: DevelopmentPlanner,
    critical_threshold: f64,
}

impl SkillGapEngine {
    pub fn new(
        config: &Config,
        taxonomy: Arc<TaxonomyIndex>,
        scorer: Arc<dyn SimilarityScorer>,
    ) -> Result<Self> {
        config.validate()?;

        let catalog = Arc::new(
            TrainingCatalog::builtin().with_default_weeks(config.planning.default_learning_weeks),
        );
        let extractor = SkillExtractor::new(Arc::clone(&taxonomy))?;
        let analyzer = GapAnalyzer::new(&config.analysis, Arc::clone(&taxonomy), scorer)
            .with_catalog(Arc::clone(&catalog));

        Ok(Self {
            taxonomy,
            extractor,
            importance: Arc::new(HeuristicImportance::new(config.analysis.default_importance)),
            analyzer,
            ranker: CandidateRanker::new(),
            planner: DevelopmentPlanner::new(catalog),
            critical_threshold: config.analysis.critical_threshold,
        })
    }

    /// Build the taxonomy and similarity backend the configuration asks for
    pub fn from_config(config: &Config) -> Result<Self> {
        let taxonomy = match &config.taxonomy.path {
            Some(path) => {
                log::info!("Loading skill taxonomy from {}", path.display());
                TaxonomyIndex::from_toml_file(path)?
            }
            None => TaxonomyIndex::builtin(),
        };
        log::debug!(
            "Taxonomy has {} skills across {} domains",
            taxonomy.skill_count(),
            taxonomy.domains().len()
        );

        let scorer = Self::scorer_from_config(config)?;
        Self::new(config, Arc::new(taxonomy), scorer)
    }

    fn scorer_from_config(config: &Config) -> Result<Arc<dyn SimilarityScorer>> {
        match config.similarity.backend {
            SimilarityBackend::Lookup => Ok(Arc::new(
                LookupSimilarity::builtin().with_default(config.analysis.default_similarity),
            )),
            #[cfg(feature = "embeddings")]
            SimilarityBackend::Embedding => Ok(Arc::new(
                crate::processing::similarity::EmbeddingSimilarity::load(&config.similarity.embedding_model)?,
            )),
            #[cfg(not(feature = "embeddings"))]
            SimilarityBackend::Embedding => Err(SkillGapError::Configuration(
                "The embedding similarity backend requires building with the `embeddings` feature".to_string(),
            )),
        }
    }

    /// Replace the heuristic importance estimator
    pub fn with_importance_estimator(mut self, estimator: Arc<dyn ImportanceEstimator>) -> Self {
        self.importance = estimator;
        self
    }

    pub fn taxonomy(&self) -> &TaxonomyIndex {
        &self.taxonomy
    }

    pub fn extractor(&self) -> &SkillExtractor {
        &self.extractor
    }

    pub fn similarity_backend(&self) -> &str {
        self.analyzer.scorer().name()
    }

    fn job_profile(&self, job_description: &str) -> JobProfile {
        let skills = self.extractor.extract(job_description).labels();
        let importance = ImportanceMap::from_job(self.importance.as_ref(), &skills, job_description);
        JobProfile { skills, importance }
    }

    fn critical_skills(&self, job: &JobProfile) -> Vec<String> {
        job.skills
            .iter()
            .filter(|s| job.importance.get_or(s.as_str(), 0.0) >= self.critical_threshold)
            .cloned()
            .collect()
    }

    fn analyze_against(
        &self,
        candidate_resume: &str,
        job: &JobProfile,
        candidate_id: Option<String>,
        job_id: Option<String>,
    ) -> GapReport {
        let candidate_skills = self.extractor.extract(candidate_resume).labels();
        self.analyzer
            .analyze(&candidate_skills, &job.skills, &job.importance)
            .with_ids(candidate_id, job_id)
    }

    /// Compare one resume against one job description
    pub fn analyze_skill_gap(
        &self,
        candidate_resume: &str,
        job_description: &str,
        candidate_id: Option<&str>,
        job_id: Option<&str>,
    ) -> GapReport {
        let start_time = Instant::now();
        log::info!(
            "Analyzing skill gap for candidate {} and job {}",
            candidate_id.unwrap_or("-"),
            job_id.unwrap_or("-")
        );

        let job = self.job_profile(job_description);
        let report = self.analyze_against(
            candidate_resume,
            &job,
            candidate_id.map(str::to_string),
            job_id.map(str::to_string),
        );

        log::info!(
            "Skill gap analysis finished in {:.2?}: match {:.2}%, {} missing ({} critical)",
            start_time.elapsed(),
            report.match_percentage,
            report.missing_skills_count,
            report.missing_critical_skills_count
        );
        report
    }

    /// Analyze every candidate against the same job and rank them
    pub fn compare_candidates_for_job(
        &self,
        candidate_resumes: &BTreeMap<String, String>,
        job_description: &str,
    ) -> CandidateComparison {
        log::info!("Comparing {} candidates for one job", candidate_resumes.len());

        let job = self.job_profile(job_description);
        let reports = candidate_resumes
            .iter()
            .map(|(id, resume)| (id.clone(), self.analyze_against(resume, &job, Some(id.clone()), None)))
            .collect();

        self.build_comparison(&job, reports)
    }

    /// Same result as [`compare_candidates_for_job`](Self::compare_candidates_for_job),
    /// with each candidate analyzed on tokio's blocking pool
    pub async fn compare_candidates_concurrent(
        self: Arc<Self>,
        candidate_resumes: BTreeMap<String, String>,
        job_description: String,
    ) -> Result<CandidateComparison> {
        log::info!(
            "Comparing {} candidates for one job on the blocking pool",
            candidate_resumes.len()
        );

        let job = Arc::new(self.job_profile(&job_description));
        let mut tasks = JoinSet::new();

        for (id, resume) in candidate_resumes {
            let engine = Arc::clone(&self);
            let job = Arc::clone(&job);
            tasks.spawn_blocking(move || {
                let report = engine.analyze_against(&resume, &job, Some(id.clone()), None);
                (id, report)
            });
        }

        let mut reports = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            let (id, report) = joined.map_err(|e| {
                log::error!("Candidate analysis task failed: {}", e);
                SkillGapError::Computation(format!("Candidate analysis task failed: {}", e))
            })?;
            reports.insert(id, report);
        }

        Ok(self.build_comparison(&job, reports))
    }

    fn build_comparison(&self, job: &JobProfile, reports: BTreeMap<String, GapReport>) -> CandidateComparison {
        let ranked_candidates = self.ranker.rank(&reports);

        match ranked_candidates.first() {
            Some(best) => log::info!(
                "Candidate comparison finished; best candidate {} at {:.2}%",
                best.candidate_id,
                best.match_score
            ),
            None => log::warn!("Candidate comparison finished with no candidates"),
        }

        CandidateComparison {
            job_skills: job.skills.clone(),
            critical_skills: self.critical_skills(job),
            candidate_count: reports.len(),
            ranked_candidates,
            detailed_analyses: reports,
        }
    }

    /// Schedule the candidate's missing skills into `timeframe_weeks`
    pub fn generate_skill_development_plan(
        &self,
        candidate_resume: &str,
        job_description: &str,
        timeframe_weeks: u32,
    ) -> DevelopmentPlanReport {
        log::info!("Generating a {}-week skill development plan", timeframe_weeks);
        let report = self.analyze_skill_gap(candidate_resume, job_description, None, None);
        self.planner.plan(&report, timeframe_weeks)
    }

    /// Validate a request, run it, and return the JSON-ready result
    pub fn handle(&self, request: &SkillGapRequest) -> Result<serde_json::Value> {
        let operation = request.operation();
        request.validate().map_err(|e| {
            log::warn!("Rejected {} request: {}", operation, e);
            e
        })?;

        let value = match request {
            SkillGapRequest::AnalyzeSkillGap(req) => serde_json::to_value(self.analyze_skill_gap(
                &req.candidate_resume,
                &req.job_description,
                req.candidate_id.as_deref(),
                req.job_id.as_deref(),
            )),
            SkillGapRequest::CompareCandidatesForJob(req) => serde_json::to_value(
                self.compare_candidates_for_job(&req.candidate_resumes, &req.job_description),
            ),
            SkillGapRequest::GenerateSkillDevelopmentPlan(req) => {
                serde_json::to_value(self.generate_skill_development_plan(
                    &req.candidate_resume,
                    &req.job_description,
                    req.timeframe()?,
                ))
            }
        };

        value.map_err(|e| {
            log::error!("Failed to serialize {} result: {}", operation, e);
            SkillGapError::from(e)
        })
    }
}
