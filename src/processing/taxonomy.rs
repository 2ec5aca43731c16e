//! Static skill taxonomy: domain -> ordered canonical skill labels

use crate::error::{Result, SkillGapError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A canonical skill label and the taxonomy domain it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub domain: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDomain {
    pub name: String,
    pub skills: Vec<String>,
}

/// Read-only after construction; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TaxonomyIndex {
    domains: Vec<SkillDomain>,
    // lowercase label -> (domain index, position within domain)
    by_label: HashMap<String, (usize, usize)>,
}

#[derive(Debug, Deserialize)]
struct TaxonomyFile {
    domains: toml::Table,
}

impl TaxonomyIndex {
    /// Build an index from ordered (domain, labels) pairs
    pub fn from_domains<I, D, S>(domains: I) -> Result<Self>
    where
        I: IntoIterator<Item = (D, Vec<S>)>,
        D: Into<String>,
        S: Into<String>,
    {
        let mut ordered = Vec::new();
        let mut by_label = HashMap::new();

        for (domain_idx, (domain, labels)) in domains.into_iter().enumerate() {
            let name: String = domain.into();
            if name.trim().is_empty() {
                return Err(SkillGapError::Computation(
                    "Malformed taxonomy: blank domain name".to_string(),
                ));
            }

            let mut skills = Vec::new();
            for label in labels {
                let label: String = label.into();
                let label = label.trim().to_string();
                if label.is_empty() {
                    return Err(SkillGapError::Computation(format!(
                        "Malformed taxonomy: blank skill label in domain '{}'",
                        name
                    )));
                }

                let key = label.to_lowercase();
                if let Some((other, _)) = by_label.get(&key) {
                    let first = ordered
                        .get(*other)
                        .map(|d: &SkillDomain| d.name.as_str())
                        .unwrap_or(name.as_str());
                    return Err(SkillGapError::Computation(format!(
                        "Malformed taxonomy: skill '{}' listed more than once (domains '{}' and '{}')",
                        label, first, name
                    )));
                }

                by_label.insert(key, (domain_idx, skills.len()));
                skills.push(label);
            }

            ordered.push(SkillDomain { name, skills });
        }

        Ok(Self {
            domains: ordered,
            by_label,
        })
    }

    /// Load a taxonomy file with a `[domains]` table of `name = ["Skill", ...]`
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: TaxonomyFile = toml::from_str(content)
            .map_err(|e| SkillGapError::Computation(format!("Malformed taxonomy file: {}", e)))?;

        let mut domains = Vec::new();
        for (name, value) in file.domains {
            let labels = value
                .as_array()
                .ok_or_else(|| {
                    SkillGapError::Computation(format!(
                        "Malformed taxonomy: domain '{}' must be a list of labels",
                        name
                    ))
                })?
                .iter()
                .map(|v| {
                    v.as_str().map(str::to_string).ok_or_else(|| {
                        SkillGapError::Computation(format!(
                            "Malformed taxonomy: non-string label in domain '{}'",
                            name
                        ))
                    })
                })
                .collect::<Result<Vec<String>>>()?;
            domains.push((name, labels));
        }

        Self::from_domains(domains)
    }

    /// The default taxonomy shipped with the analyzer
    pub fn builtin() -> Self {
        let domains: Vec<(&str, Vec<&str>)> = vec![
            (
                "programming",
                vec![
                    "Python", "JavaScript", "Java", "C++", "C#", "Ruby", "PHP", "Swift", "Kotlin",
                    "TypeScript", "Go", "Rust", "Scala", "R", "MATLAB", "SQL", "NoSQL", "HTML", "CSS",
                ],
            ),
            (
                "data_science",
                vec![
                    "Machine Learning", "Deep Learning", "NLP", "Computer Vision", "Data Mining",
                    "Statistical Analysis", "Data Visualization", "Big Data", "A/B Testing",
                    "Predictive Modeling", "Feature Engineering", "TensorFlow", "PyTorch", "Keras",
                    "scikit-learn", "pandas", "NumPy", "SciPy",
                ],
            ),
            (
                "cloud",
                vec![
                    "AWS", "Azure", "Google Cloud", "Docker", "Kubernetes", "Serverless",
                    "Microservices", "DevOps", "CI/CD", "Infrastructure as Code", "Terraform",
                    "CloudFormation", "Ansible", "Chef", "Puppet",
                ],
            ),
            (
                "soft_skills",
                vec![
                    "Communication", "Leadership", "Teamwork", "Problem Solving", "Critical Thinking",
                    "Time Management", "Adaptability", "Creativity", "Emotional Intelligence",
                    "Conflict Resolution", "Negotiation", "Presentation Skills", "Project Management",
                ],
            ),
            (
                "business",
                vec![
                    "Marketing", "Sales", "Finance", "Accounting", "HR", "Operations", "Strategy",
                    "Business Development", "Product Management", "Customer Success", "UX/UI Design",
                    "Market Research", "Data Analysis", "SEO", "SEM", "Content Marketing", "CRM",
                ],
            ),
        ];

        Self::from_domains(domains).expect("Built-in taxonomy is well-formed")
    }

    pub fn domains(&self) -> &[SkillDomain] {
        &self.domains
    }

    pub fn domain(&self, name: &str) -> Option<&SkillDomain> {
        self.domains.iter().find(|d| d.name.eq_ignore_ascii_case(name))
    }

    /// Domain of a label, case-insensitive
    pub fn domain_of(&self, label: &str) -> Option<&str> {
        self.by_label
            .get(&label.to_lowercase())
            .map(|(domain_idx, _)| self.domains[*domain_idx].name.as_str())
    }

    /// Canonical spelling of a label, case-insensitive
    pub fn canonical(&self, label: &str) -> Option<Skill> {
        self.by_label.get(&label.to_lowercase()).map(|(d, s)| Skill {
            name: self.domains[*d].skills[*s].clone(),
            domain: self.domains[*d].name.clone(),
        })
    }

    /// Stable sort key: taxonomy order, unknown labels last
    pub fn ordinal(&self, label: &str) -> (usize, usize) {
        self.by_label
            .get(&label.to_lowercase())
            .copied()
            .unwrap_or((usize::MAX, usize::MAX))
    }

    /// Every skill in taxonomy order
    pub fn skills(&self) -> impl Iterator<Item = Skill> + '_ {
        self.domains.iter().flat_map(|domain| {
            domain.skills.iter().map(move |name| Skill {
                name: name.clone(),
                domain: domain.name.clone(),
            })
        })
    }

    pub fn skill_count(&self) -> usize {
        self.by_label.len()
    }
}

impl Default for TaxonomyIndex {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_taxonomy() {
        let taxonomy = TaxonomyIndex::builtin();
        assert_eq!(taxonomy.domains().len(), 5);
        assert_eq!(taxonomy.domains()[0].name, "programming");
        assert_eq!(taxonomy.skill_count(), 82);
        assert_eq!(taxonomy.domain_of("python"), Some("programming"));
        assert_eq!(taxonomy.domain_of("CI/CD"), Some("cloud"));
        assert_eq!(taxonomy.domain_of("Cobol"), None);
    }

    #[test]
    fn test_canonical_lookup_is_case_insensitive() {
        let taxonomy = TaxonomyIndex::builtin();
        let skill = taxonomy.canonical("MACHINE learning").unwrap();
        assert_eq!(skill.name, "Machine Learning");
        assert_eq!(skill.domain, "data_science");
    }

    #[test]
    fn test_duplicate_label_is_malformed() {
        let result = TaxonomyIndex::from_domains(vec![
            ("a", vec!["Python", "SQL"]),
            ("b", vec!["sql"]),
        ]);
        assert!(matches!(result, Err(SkillGapError::Computation(_))));
    }

    #[test]
    fn test_blank_label_is_malformed() {
        let result = TaxonomyIndex::from_domains(vec![("a", vec!["Python", "  "])]);
        assert!(matches!(result, Err(SkillGapError::Computation(_))));
    }

    #[test]
    fn test_from_toml() {
        let taxonomy = TaxonomyIndex::from_toml_str(
            r#"
[domains]
languages = ["Rust", "Haskell"]
ops = ["Nix"]
"#,
        )
        .unwrap();
        assert_eq!(taxonomy.skill_count(), 3);
        assert_eq!(taxonomy.domain_of("nix"), Some("ops"));
        assert!(TaxonomyIndex::from_toml_str("[domains]\nbad = 3").is_err());
    }
}
