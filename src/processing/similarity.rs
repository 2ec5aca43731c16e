//! Skill-to-skill similarity scoring

use std::collections::HashMap;

#[cfg(feature = "embeddings")]
use crate::error::{Result, SkillGapError};
#[cfg(feature = "embeddings")]
use model2vec_rs::model::StaticModel;
#[cfg(feature = "embeddings")]
use std::path::Path;

/// Semantic closeness of two skill labels.
///
/// Implementations must return values in `[0, 1]`, be symmetric, and return
/// `1.0` for labels that are equal ignoring case.
pub trait SimilarityScorer: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// Short backend name used in logs and reports
    fn name(&self) -> &str;
}

const RELATED_SKILLS: &[(&str, &str, f64)] = &[
    ("python", "programming", 0.85),
    ("java", "programming", 0.82),
    ("javascript", "programming", 0.80),
    ("machine learning", "data science", 0.90),
    ("deep learning", "machine learning", 0.88),
    ("tensorflow", "deep learning", 0.85),
    ("pytorch", "deep learning", 0.84),
    ("aws", "cloud", 0.87),
    ("azure", "cloud", 0.86),
    ("docker", "devops", 0.83),
    ("kubernetes", "devops", 0.82),
    ("communication", "soft skills", 0.88),
    ("leadership", "management", 0.86),
    ("teamwork", "collaboration", 0.90),
    ("sql", "database", 0.85),
    ("nosql", "database", 0.82),
    ("marketing", "business", 0.84),
    ("sales", "business", 0.83),
    ("finance", "business", 0.82),
];

/// Symmetric table of known related pairs with a low fallback for everything else
#[derive(Debug, Clone)]
pub struct LookupSimilarity {
    pairs: HashMap<(String, String), f64>,
    default_score: f64,
}

impl LookupSimilarity {
    pub fn builtin() -> Self {
        Self::with_pairs(RELATED_SKILLS.iter().map(|(a, b, s)| (*a, *b, *s)))
    }

    pub fn with_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, f64)>,
    {
        let pairs = pairs
            .into_iter()
            .map(|(a, b, score)| (Self::key(a, b), score.clamp(0.0, 1.0)))
            .collect();

        Self {
            pairs,
            default_score: 0.3,
        }
    }

    /// Score returned for pairs the table does not know
    pub fn with_default(mut self, default_score: f64) -> Self {
        self.default_score = default_score.clamp(0.0, 1.0);
        self
    }

    // order-independent key so lookups work both ways round
    fn key(a: &str, b: &str) -> (String, String) {
        let a = a.trim().to_lowercase();
        let b = b.trim().to_lowercase();
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl Default for LookupSimilarity {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SimilarityScorer for LookupSimilarity {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        if a.trim().eq_ignore_ascii_case(b.trim()) {
            return 1.0;
        }

        self.pairs
            .get(&Self::key(a, b))
            .copied()
            .unwrap_or(self.default_score)
    }

    fn name(&self) -> &str {
        "lookup"
    }
}

/// Cosine similarity between Model2Vec embeddings of the two labels
#[cfg(feature = "embeddings")]
pub struct EmbeddingSimilarity {
    model: StaticModel,
    model_name: String,
}

#[cfg(feature = "embeddings")]
impl EmbeddingSimilarity {
    /// Load a model from a local directory or a Hugging Face repo id
    pub fn load(repo_or_path: &str) -> Result<Self> {
        log::info!("Loading Model2Vec embedding model from: {}", repo_or_path);

        let model = StaticModel::from_pretrained(Path::new(repo_or_path), None, None, None)
            .map_err(|e| SkillGapError::Embedding(format!("Failed to load model: {}", e)))?;

        Ok(Self {
            model,
            model_name: repo_or_path.to_string(),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(feature = "embeddings")]
impl SimilarityScorer for EmbeddingSimilarity {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        if a.trim().eq_ignore_ascii_case(b.trim()) {
            return 1.0;
        }

        let left = self.model.encode_single(&a.to_lowercase());
        let right = self.model.encode_single(&b.to_lowercase());
        cosine_similarity(&left, &right).clamp(0.0, 1.0)
    }

    fn name(&self) -> &str {
        "embedding"
    }
}

/// Cosine of two vectors; zero for empty, mismatched, or zero-norm input
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        f64::from(dot / (norm_a * norm_b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflexive() {
        let scorer = LookupSimilarity::builtin();
        for label in ["Python", "AWS", "Emotional Intelligence", "Cobol"] {
            assert_eq!(scorer.similarity(label, label), 1.0);
            assert_eq!(scorer.similarity(label, &label.to_uppercase()), 1.0);
        }
    }

    #[test]
    fn test_symmetric_and_bounded() {
        let scorer = LookupSimilarity::builtin();
        let labels = ["Python", "programming", "Deep Learning", "Machine Learning", "AWS", "Rust"];
        for a in labels {
            for b in labels {
                let ab = scorer.similarity(a, b);
                assert_eq!(ab, scorer.similarity(b, a), "{} vs {}", a, b);
                assert!((0.0..=1.0).contains(&ab));
            }
        }
    }

    #[test]
    fn test_known_pairs_and_default() {
        let scorer = LookupSimilarity::builtin();
        assert_eq!(scorer.similarity("Deep Learning", "Machine Learning"), 0.88);
        assert_eq!(scorer.similarity("cloud", "AWS"), 0.87);
        assert_eq!(scorer.similarity("Python", "AWS"), 0.3);
    }

    #[test]
    fn test_custom_table() {
        let scorer = LookupSimilarity::with_pairs([("Rust", "C++", 0.8), ("Go", "Rust", 1.7)])
            .with_default(0.1);
        assert_eq!(scorer.similarity("c++", "rust"), 0.8);
        assert_eq!(scorer.similarity("rust", "go"), 1.0);
        assert_eq!(scorer.similarity("Rust", "Python"), 0.1);
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }
}
