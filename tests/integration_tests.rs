//! Integration tests for the skill gap analyzer

use skill_gap::config::{Config, OutputFormat};
use skill_gap::input::DocumentLoader;
use skill_gap::output::formatter::ReportGenerator;
use skill_gap::output::report::{ReportBody, ReportEnvelope};
use skill_gap::processing::analyzer::SkillGapEngine;
use skill_gap::processing::gap_analyzer::{round2, GapAnalyzer, GapReport};
use skill_gap::processing::importance::ImportanceMap;
use skill_gap::processing::planner::DevelopmentPlanner;
use skill_gap::processing::ranker::CandidateRanker;
use skill_gap::processing::similarity::{LookupSimilarity, SimilarityScorer};
use skill_gap::processing::taxonomy::TaxonomyIndex;
use skill_gap::requests::SkillGapRequest;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

const RESUME_TXT: &str = "tests/fixtures/sample_resume.txt";
const RESUME_MD: &str = "tests/fixtures/sample_resume.md";
const JOB_TXT: &str = "tests/fixtures/job_description.txt";

fn engine() -> SkillGapEngine {
    SkillGapEngine::from_config(&Config::default()).unwrap()
}

fn analyzer() -> GapAnalyzer {
    GapAnalyzer::new(
        &Config::default().analysis,
        Arc::new(TaxonomyIndex::builtin()),
        Arc::new(LookupSimilarity::builtin()),
    )
}

fn labels(skills: &[&str]) -> Vec<String> {
    skills.iter().map(|s| s.to_string()).collect()
}

async fn fixture_texts() -> (String, String) {
    let mut loader = DocumentLoader::new();
    let resume = loader.load_text(Path::new(RESUME_TXT)).await.unwrap();
    let job = loader.load_text(Path::new(JOB_TXT)).await.unwrap();
    (resume, job)
}

fn assert_report_invariants(report: &GapReport) {
    let mut covered: Vec<&str> = report
        .matched_skills
        .iter()
        .map(|m| m.job_skill.as_str())
        .chain(report.missing_skills.iter().map(|m| m.skill.as_str()))
        .collect();
    covered.sort_unstable();
    let mut job: Vec<&str> = report.job_skills.iter().map(String::as_str).collect();
    job.sort_unstable();
    assert_eq!(covered, job, "matched and missing must partition the job skills");

    assert!((0.0..=1.0).contains(&report.overall_match_score));
    assert_eq!(report.skill_gap_score, round2(1.0 - report.overall_match_score));
    for m in &report.matched_skills {
        assert!(m.similarity >= Config::default().analysis.similarity_threshold);
    }
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut loader = DocumentLoader::new();
    let text = loader.load_text(Path::new(RESUME_TXT)).await.unwrap();

    assert!(text.contains("Jane Smith"));
    assert!(text.contains("Backend Engineer"));
    assert!(text.contains("Kubernetes"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut loader = DocumentLoader::new();
    let text = loader.load_text(Path::new(RESUME_MD)).await.unwrap();

    assert!(text.contains("Jane Smith"));
    assert!(text.contains("Terraform"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_markdown_and_text_resumes_extract_same_skills() {
    let mut loader = DocumentLoader::new();
    let txt = loader.load_text(Path::new(RESUME_TXT)).await.unwrap();
    let md = loader.load_text(Path::new(RESUME_MD)).await.unwrap();

    let engine = engine();
    assert_eq!(engine.extractor().extract(&txt), engine.extractor().extract(&md));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut loader = DocumentLoader::new();
    let path = Path::new(RESUME_TXT);

    let first = loader.load_text(path).await.unwrap();
    assert_eq!(loader.cache_size(), 1);

    let second = loader.load_text(path).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(loader.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut loader = DocumentLoader::new();
    assert!(loader.load_text(Path::new("tests/fixtures/unsupported.xyz")).await.is_err());
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut loader = DocumentLoader::new();
    assert!(loader.load_text(Path::new("tests/fixtures/missing.txt")).await.is_err());
}

#[tokio::test]
async fn test_fixture_analysis() {
    let (resume, job) = fixture_texts().await;
    let report = engine().analyze_skill_gap(&resume, &job, Some("jane"), Some("backend"));

    assert_report_invariants(&report);
    assert_eq!(report.critical_skills, vec!["Python", "Kubernetes"]);
    assert_eq!(report.missing_skills.len(), 1);
    assert_eq!(report.missing_skills[0].skill, "AWS");
    assert!(!report.missing_skills[0].is_critical);
    assert_eq!(report.missing_critical_skills_count, 0);
    assert!(report.candidate_skills.iter().any(|s| s == "Leadership"));
    assert!(report.additional_skills.iter().any(|a| a.skill == "Java"));
}

#[test]
fn test_scenario_weighted_match() {
    let importance = ImportanceMap::from_pairs([("Python", 0.9), ("AWS", 0.6)]);
    let report = analyzer().analyze(&labels(&["Python"]), &labels(&["Python", "AWS"]), &importance);

    assert_eq!(report.matched_skills.len(), 1);
    assert_eq!(report.matched_skills[0].job_skill, "Python");
    assert_eq!(report.missing_skills.len(), 1);
    assert_eq!(report.missing_skills[0].skill, "AWS");
    assert!((report.overall_match_score - 0.6).abs() < 1e-9);
    assert_eq!(report.skill_gap_score, 0.4);
    assert_report_invariants(&report);
}

#[tokio::test]
async fn test_empty_job_description() {
    let (resume, _) = fixture_texts().await;
    let report = engine().analyze_skill_gap(&resume, "", None, None);

    assert!(report.job_skills.is_empty());
    assert_eq!(report.overall_match_score, 0.0);
    assert_eq!(report.skill_gap_score, 1.0);
    assert_eq!(report.gap_percentage, 100.0);
    assert!(report.matched_skills.is_empty());
    assert!(report.missing_skills.is_empty());
}

#[tokio::test]
async fn test_zero_week_plan() {
    let (resume, job) = fixture_texts().await;
    let plan = engine().generate_skill_development_plan(&resume, &job, 0);

    assert_eq!(plan.total_missing_skills, 1);
    assert!(plan.development_plan.is_empty());
    assert_eq!(plan.skills_covered, 0);
    assert_eq!(plan.estimated_skill_gap_score_after, plan.skill_gap_score_before);
}

#[test]
fn test_ranking_tie_prefers_fewer_missing_critical_skills() {
    let importance = ImportanceMap::from_pairs([
        ("Python", 0.9),
        ("Java", 0.9),
        ("SQL", 0.45),
        ("Docker", 0.45),
        ("AWS", 0.6),
        ("Terraform", 0.6),
        ("Azure", 0.6),
    ]);
    let job = labels(&["Python", "Java", "SQL", "Docker", "AWS", "Terraform", "Azure"]);
    let analyzer = analyzer();

    // missing SQL and Docker, neither critical
    let no_critical_gap = analyzer.analyze(&labels(&["Python", "Java", "AWS", "Terraform", "Azure"]), &job, &importance);
    // missing Python, which is critical
    let critical_gap = analyzer.analyze(
        &labels(&["Java", "SQL", "Docker", "AWS", "Terraform", "Azure"]),
        &job,
        &importance,
    );
    assert_eq!(no_critical_gap.match_percentage, 80.0);
    assert_eq!(critical_gap.match_percentage, 80.0);

    let mut reports = BTreeMap::new();
    reports.insert("a_critical_gap".to_string(), critical_gap);
    reports.insert("b_no_critical_gap".to_string(), no_critical_gap);

    let ranked = CandidateRanker::new().rank(&reports);
    assert_eq!(ranked[0].candidate_id, "b_no_critical_gap");
    assert_eq!(ranked[0].missing_critical_skills_count, 0);
    assert_eq!(ranked[1].missing_critical_skills_count, 1);
}

#[test]
fn test_oversized_critical_skill_gets_partial_entry() {
    let importance = ImportanceMap::from_pairs([("AWS", 0.9)]);
    let report = analyzer().analyze(&[], &labels(&["AWS"]), &importance);
    assert!(report.missing_skills[0].is_critical);

    let plan = DevelopmentPlanner::default().plan(&report, 4);
    assert_eq!(plan.development_plan.len(), 1);

    let entry = &plan.development_plan[0];
    assert_eq!(entry.skill, "AWS");
    assert!(entry.is_partial_training);
    assert_eq!(entry.start_week, 1.0);
    assert_eq!(entry.end_week, 4.0);
    assert_eq!(entry.duration_weeks, 4.0);
    assert_eq!(plan.critical_skills_covered, 1);
}

#[test]
fn test_plan_entries_stay_within_timeframe() {
    let job = "Required Python. Must have AWS. Docker, Kubernetes, Terraform, Java, SQL and TypeScript.";
    let engine = engine();

    for weeks in [1, 5, 12, 26, 52] {
        let plan = engine.generate_skill_development_plan("Marketing", job, weeks);
        let entries = &plan.development_plan;

        for pair in entries.windows(2) {
            assert!(pair[1].start_week > pair[0].end_week, "entries overlap");
        }
        if let Some(last) = entries.last() {
            assert!(last.end_week <= f64::from(weeks) + 1e-9);
        }
        assert!(plan.weeks_scheduled() <= f64::from(weeks) + 1e-9);
        assert_eq!(plan.skills_covered + plan.skills_not_covered, plan.total_missing_skills);
        assert!(entries.iter().filter(|e| e.is_partial_training).count() <= 1);
    }
}

#[tokio::test]
async fn test_analysis_is_deterministic() {
    let (resume, job) = fixture_texts().await;
    let engine = engine();

    let first = serde_json::to_string(&engine.analyze_skill_gap(&resume, &job, None, None)).unwrap();
    let second = serde_json::to_string(&engine.analyze_skill_gap(&resume, &job, None, None)).unwrap();
    assert_eq!(first, second);

    let first_plan = serde_json::to_string(&engine.generate_skill_development_plan(&resume, &job, 8)).unwrap();
    let second_plan = serde_json::to_string(&engine.generate_skill_development_plan(&resume, &job, 8)).unwrap();
    assert_eq!(first_plan, second_plan);
}

#[test]
fn test_adding_a_job_skill_never_lowers_the_score() {
    let importance = ImportanceMap::from_pairs([("Python", 1.0), ("AWS", 0.9), ("Docker", 0.6), ("SQL", 0.6)]);
    let job = labels(&["Python", "AWS", "Docker", "SQL"]);
    let analyzer = analyzer();

    let mut candidate = Vec::new();
    let mut previous = analyzer.analyze(&candidate, &job, &importance).overall_match_score;
    for skill in ["SQL", "AWS", "Docker", "Python"] {
        candidate.push(skill.to_string());
        let score = analyzer.analyze(&candidate, &job, &importance).overall_match_score;
        assert!(score >= previous);
        previous = score;
    }
    assert!((previous - 1.0).abs() < 1e-9);
}

#[test]
fn test_similarity_symmetric_and_reflexive() {
    let scorer = LookupSimilarity::builtin();
    for (a, b) in [("AWS", "Cloud"), ("Docker", "DevOps"), ("Python", "Marketing")] {
        assert_eq!(scorer.similarity(a, b), scorer.similarity(b, a));
        assert_eq!(scorer.similarity(a, a), 1.0);
    }
    assert_eq!(scorer.similarity("python", "Python"), 1.0);
}

#[tokio::test]
async fn test_concurrent_comparison_matches_sequential() {
    let (resume, job) = fixture_texts().await;
    let engine = Arc::new(engine());

    let mut resumes = BTreeMap::new();
    resumes.insert("jane".to_string(), resume);
    resumes.insert("sam".to_string(), "Marketing lead with SEO and CRM".to_string());
    resumes.insert("lee".to_string(), "Python and AWS".to_string());

    let sequential = engine.compare_candidates_for_job(&resumes, &job);
    let concurrent = Arc::clone(&engine)
        .compare_candidates_concurrent(resumes, job)
        .await
        .unwrap();

    assert_eq!(sequential, concurrent);
    assert_eq!(concurrent.candidate_count, 3);
    assert_eq!(concurrent.ranked_candidates[0].candidate_id, "jane");
    assert_eq!(concurrent.ranked_candidates[2].candidate_id, "sam");
}

#[test]
fn test_json_request_round_trip_through_engine() {
    let request = SkillGapRequest::from_json(
        r#"{
            "operation": "analyze_skill_gap",
            "candidate_resume": "Python developer",
            "job_description": "Required Python",
            "candidate_id": "c-1"
        }"#,
    )
    .unwrap();

    let value = engine().handle(&request).unwrap();
    assert_eq!(value["candidate_id"], "c-1");
    assert_eq!(value["match_percentage"], 100.0);
    assert_eq!(value["missing_skills_count"], 0);
}

#[test]
fn test_json_request_with_negative_timeframe_is_rejected() {
    let request = SkillGapRequest::from_json(
        r#"{
            "operation": "generate_skill_development_plan",
            "candidate_resume": "Python",
            "job_description": "AWS",
            "timeframe_weeks": -3
        }"#,
    )
    .unwrap();

    assert!(engine().handle(&request).unwrap_err().is_validation());
}

#[tokio::test]
async fn test_json_report_envelope() {
    let (resume, job) = fixture_texts().await;
    let engine = engine();
    let report = engine.analyze_skill_gap(&resume, &job, None, None);

    let envelope = ReportEnvelope::new(
        ReportBody::GapAnalysis(report.clone()),
        vec![RESUME_TXT.to_string(), JOB_TXT.to_string()],
        engine.similarity_backend(),
        3,
    );
    let rendered = ReportGenerator::new().generate_report(&envelope, &OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(value["body"]["kind"], "gap_analysis");
    assert_eq!(value["body"]["result"]["match_percentage"], report.match_percentage);
    assert_eq!(value["metadata"]["sources"][0], RESUME_TXT);
}
