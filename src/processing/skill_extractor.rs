//! Skill extraction from free text using the taxonomy plus derived-term rules

use crate::error::{Result, SkillGapError};
use crate::processing::taxonomy::{Skill, TaxonomyIndex};
use crate::processing::text;
use aho_corasick::AhoCorasick;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// De-duplicated skills found in one document, in taxonomy order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSet {
    skills: Vec<Skill>,
}

impl SkillSet {
    pub fn labels(&self) -> Vec<String> {
        self.skills.iter().map(|s| s.name.clone()).collect()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.skills.iter().any(|s| s.name.eq_ignore_ascii_case(label))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// A skill implied by surrounding vocabulary rather than named outright.
/// Every pattern in `all_of` must match somewhere in the text.
struct DerivedRule {
    skill: &'static str,
    all_of: Vec<Regex>,
}

pub struct SkillExtractor {
    taxonomy: Arc<TaxonomyIndex>,
    matcher: AhoCorasick,
    patterns: Vec<Skill>,
    derived_rules: Vec<DerivedRule>,
}

impl SkillExtractor {
    pub fn new(taxonomy: Arc<TaxonomyIndex>) -> Result<Self> {
        let patterns: Vec<Skill> = taxonomy.skills().collect();
        let needles: Vec<String> = patterns.iter().map(|s| s.name.to_lowercase()).collect();

        // Standard match kind so overlapping labels are all reported
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&needles)
            .map_err(|e| SkillGapError::Computation(format!("Failed to build skill matcher: {}", e)))?;

        let derived_rules = Self::default_derived_rules()?;

        Ok(Self {
            taxonomy,
            matcher,
            patterns,
            derived_rules,
        })
    }

    fn default_derived_rules() -> Result<Vec<DerivedRule>> {
        let rule = |skill: &'static str, patterns: &[&str]| -> Result<DerivedRule> {
            let all_of = patterns
                .iter()
                .map(|p| {
                    Regex::new(p).map_err(|e| {
                        SkillGapError::Computation(format!("Invalid derived-term pattern '{}': {}", p, e))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(DerivedRule { skill, all_of })
        };

        Ok(vec![
            rule("Data Analysis", &[r"\b(?:data analysis|analytics)\b"])?,
            rule("Machine Learning", &[r"\b(?:machine learning|ml|ai)\b"])?,
            // prefix match: "teams", "leading", "leader" all count
            rule("Leadership", &[r"\bteam", r"\blead"])?,
        ])
    }

    /// Extract canonical skills from free text; empty text yields an empty set
    pub fn extract(&self, text: &str) -> SkillSet {
        let normalized = text::normalize(text);
        if normalized.is_empty() {
            return SkillSet::default();
        }

        let mut found: Vec<Skill> = Vec::new();
        let mut push = |skill: &Skill| {
            if !found.iter().any(|s| s.name == skill.name) {
                found.push(skill.clone());
            }
        };

        for mat in self.matcher.find_overlapping_iter(&normalized) {
            if text::is_word_bounded(&normalized, mat.start(), mat.end()) {
                push(&self.patterns[mat.pattern().as_usize()]);
            }
        }

        for rule in &self.derived_rules {
            if rule.all_of.iter().all(|re| re.is_match(&normalized)) {
                // derived skills only count when the taxonomy knows them
                if let Some(skill) = self.taxonomy.canonical(rule.skill) {
                    push(&skill);
                }
            }
        }

        found.sort_by_key(|s| self.taxonomy.ordinal(&s.name));
        log::debug!(
            "Extracted {} skills: {:?}",
            found.len(),
            found.iter().map(|s| s.name.as_str()).collect::<Vec<_>>()
        );

        SkillSet { skills: found }
    }

    pub fn taxonomy(&self) -> &TaxonomyIndex {
        &self.taxonomy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> SkillExtractor {
        SkillExtractor::new(Arc::new(TaxonomyIndex::builtin())).unwrap()
    }

    #[test]
    fn test_taxonomy_terms_are_found() {
        let skills = extractor().extract("Experienced in python, Docker and Google Cloud; some C++.");
        let labels = skills.labels();
        assert_eq!(labels, vec!["Python", "C++", "Google Cloud", "Docker"]);
    }

    #[test]
    fn test_whole_word_matching() {
        let skills = extractor().extract("JavaScript developer working with NoSQL stores");
        assert!(skills.contains("JavaScript"));
        assert!(skills.contains("NoSQL"));
        assert!(!skills.contains("Java"));
        assert!(!skills.contains("SQL"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let skills = extractor().extract("Python python PYTHON and more Python");
        assert_eq!(skills.len(), 1);
    }

    #[test]
    fn test_derived_terms() {
        let ex = extractor();
        assert!(ex.extract("Built analytics dashboards").contains("Data Analysis"));
        assert!(ex.extract("Shipped ML features to production").contains("Machine Learning"));
        assert!(ex.extract("Applied AI research").contains("Machine Learning"));
        assert!(ex.extract("Leading a team of five").contains("Leadership"));
        assert!(!ex.extract("Individual contributor on the team").contains("Leadership"));
        assert!(!ex.extract("Maintained html pages").contains("Machine Learning"));
    }

    #[test]
    fn test_empty_text_yields_empty_set() {
        let ex = extractor();
        assert!(ex.extract("").is_empty());
        assert!(ex.extract("   \n\t ").is_empty());
    }

    #[test]
    fn test_phrase_split_across_lines() {
        let skills = extractor().extract("Deep\nLearning and Machine   Learning");
        assert!(skills.contains("Deep Learning"));
        assert!(skills.contains("Machine Learning"));
    }

    #[test]
    fn test_derived_skill_requires_taxonomy_entry() {
        let taxonomy = TaxonomyIndex::from_domains(vec![("lang", vec!["Rust"])]).unwrap();
        let ex = SkillExtractor::new(Arc::new(taxonomy)).unwrap();
        let skills = ex.extract("Rust and analytics, team lead");
        assert_eq!(skills.labels(), vec!["Rust"]);
    }
}
