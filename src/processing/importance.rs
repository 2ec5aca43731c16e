//! How critical each skill is to a particular job description

use crate::processing::text;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scores a skill's importance to a job in `[0, 1]`
pub trait ImportanceEstimator: Send + Sync {
    fn importance(&self, skill: &str, job_text: &str) -> f64;
}

/// Frequency plus "required"-style phrasing, saturating at 1.0
#[derive(Debug, Clone)]
pub struct HeuristicImportance {
    default_importance: f64,
}

impl HeuristicImportance {
    pub fn new(default_importance: f64) -> Self {
        Self {
            default_importance: default_importance.clamp(0.0, 1.0),
        }
    }

    fn is_required(skill: &str, job_text: &str) -> bool {
        let patterns = [
            format!("required {}", skill),
            format!("{} required", skill),
            format!("mandatory {}", skill),
            format!("{} mandatory", skill),
            format!("must have {}", skill),
            format!("essential {}", skill),
        ];
        patterns.iter().any(|p| text::contains_phrase(job_text, p))
    }
}

impl Default for HeuristicImportance {
    fn default() -> Self {
        Self::new(0.3)
    }
}

impl ImportanceEstimator for HeuristicImportance {
    fn importance(&self, skill: &str, job_text: &str) -> f64 {
        let job_text = text::normalize(job_text);
        let skill = text::normalize(skill);

        let count = text::count_phrase(&job_text, &skill);
        if count == 0 {
            return self.default_importance;
        }

        let required = if Self::is_required(&skill, &job_text) { 0.3 } else { 0.0 };
        (0.5 + 0.1 * count as f64 + required).min(1.0)
    }
}

/// Job skill label -> importance, fixed once built
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImportanceMap {
    scores: BTreeMap<String, f64>,
}

impl ImportanceMap {
    /// Score every job skill against the job description
    pub fn from_job<E>(estimator: &E, job_skills: &[String], job_text: &str) -> Self
    where
        E: ImportanceEstimator + ?Sized,
    {
        let scores = job_skills
            .iter()
            .map(|skill| {
                let score = estimator.importance(skill, job_text);
                log::debug!("Importance of '{}': {:.2}", skill, score);
                (skill.clone(), score)
            })
            .collect();
        Self { scores }
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        pairs.into_iter().collect()
    }

    pub fn get(&self, skill: &str) -> Option<f64> {
        self.scores.get(skill).copied()
    }

    pub fn get_or(&self, skill: &str, default: f64) -> f64 {
        self.get(skill).unwrap_or(default)
    }

    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ImportanceMap {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Self {
            scores: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.clamp(0.0, 1.0)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmentioned_skill_uses_default() {
        let estimator = HeuristicImportance::default();
        assert_eq!(estimator.importance("Rust", "We write Python services"), 0.3);
        assert_eq!(estimator.importance("Rust", ""), 0.3);
    }

    #[test]
    fn test_frequency_raises_importance() {
        let estimator = HeuristicImportance::default();
        let once = estimator.importance("Python", "Python developer");
        let twice = estimator.importance("Python", "Python developer writing python daily");
        assert!((once - 0.6).abs() < 1e-9);
        assert!((twice - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_required_phrasing() {
        let estimator = HeuristicImportance::default();
        let cases = [
            "Required Python experience",
            "python required",
            "Mandatory python",
            "Python mandatory for this role",
            "Must have Python",
            "Essential python knowledge",
        ];
        for job in cases {
            let score = estimator.importance("Python", job);
            assert!((score - 0.9).abs() < 1e-9, "{}: {}", job, score);
        }
    }

    #[test]
    fn test_saturates_at_one() {
        let estimator = HeuristicImportance::default();
        let job = "Must have AWS. AWS, AWS, AWS and more AWS.";
        assert_eq!(estimator.importance("AWS", job), 1.0);
    }

    #[test]
    fn test_importance_map() {
        let skills = vec!["Python".to_string(), "AWS".to_string()];
        let map = ImportanceMap::from_job(&HeuristicImportance::default(), &skills, "Required Python.");
        assert!((map.get("Python").unwrap() - 0.9).abs() < 1e-9);
        assert_eq!(map.get("AWS"), Some(0.3));
        assert_eq!(map.get("Go"), None);
        assert_eq!(map.get_or("Go", 0.3), 0.3);
        assert!((map.total() - 1.2).abs() < 1e-9);

        let pairs = ImportanceMap::from_pairs([("Python", 0.9), ("AWS", 1.4)]);
        assert_eq!(pairs.get("AWS"), Some(1.0));
        assert_eq!(pairs.len(), 2);
    }
}
