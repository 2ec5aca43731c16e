//! Learning-time estimates and training resources per skill

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const LEARNING_WEEKS: &[(&str, f64)] = &[
    // Programming
    ("Python", 6.0),
    ("JavaScript", 8.0),
    ("Java", 10.0),
    ("C++", 12.0),
    ("C#", 8.0),
    ("Ruby", 6.0),
    ("PHP", 6.0),
    ("Swift", 8.0),
    ("Kotlin", 8.0),
    ("TypeScript", 4.0),
    ("Go", 6.0),
    ("Rust", 10.0),
    ("Scala", 8.0),
    ("R", 6.0),
    ("SQL", 4.0),
    ("NoSQL", 4.0),
    ("HTML", 2.0),
    ("CSS", 4.0),
    // Data science
    ("Machine Learning", 12.0),
    ("Deep Learning", 10.0),
    ("NLP", 8.0),
    ("Computer Vision", 10.0),
    ("Data Mining", 8.0),
    ("Statistical Analysis", 6.0),
    ("Data Visualization", 4.0),
    ("Big Data", 8.0),
    ("TensorFlow", 6.0),
    ("PyTorch", 6.0),
    ("Keras", 4.0),
    ("scikit-learn", 4.0),
    ("pandas", 3.0),
    ("NumPy", 3.0),
    // Cloud
    ("AWS", 8.0),
    ("Azure", 8.0),
    ("Google Cloud", 8.0),
    ("Docker", 4.0),
    ("Kubernetes", 6.0),
    ("Serverless", 4.0),
    ("Microservices", 6.0),
    ("DevOps", 10.0),
    ("CI/CD", 6.0),
    // Soft skills
    ("Communication", 6.0),
    ("Leadership", 10.0),
    ("Teamwork", 4.0),
    ("Problem Solving", 8.0),
    ("Critical Thinking", 8.0),
    ("Time Management", 4.0),
    ("Adaptability", 6.0),
    ("Creativity", 8.0),
    ("Emotional Intelligence", 10.0),
    // Business
    ("Marketing", 8.0),
    ("Sales", 8.0),
    ("Finance", 10.0),
    ("Accounting", 12.0),
    ("HR", 8.0),
    ("Operations", 10.0),
    ("Strategy", 12.0),
    ("Business Development", 10.0),
    ("Product Management", 10.0),
    ("UX/UI Design", 8.0),
];

const GENERIC_PLATFORMS: &[&str] = &["Coursera", "Udemy", "LinkedIn Learning", "edX", "Pluralsight"];

/// Courses, books and practice ideas for one skill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingResources {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub courses: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub books: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,
    /// Free-form range such as "4-8 weeks"
    pub estimated_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approach: Option<String>,
}

impl TrainingResources {
    pub fn is_generic(&self) -> bool {
        self.suggestion.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct TrainingCatalog {
    learning_weeks: HashMap<String, f64>,
    resources: HashMap<String, TrainingResources>,
    default_weeks: f64,
}

impl TrainingCatalog {
    pub fn builtin() -> Self {
        let learning_weeks = LEARNING_WEEKS
            .iter()
            .map(|(skill, weeks)| (skill.to_lowercase(), *weeks))
            .collect();

        let resources = Self::builtin_resources()
            .into_iter()
            .map(|(skill, res)| (skill.to_lowercase(), res))
            .collect();

        Self {
            learning_weeks,
            resources,
            default_weeks: 6.0,
        }
    }

    /// Weeks assumed for skills missing from the table
    pub fn with_default_weeks(mut self, weeks: f64) -> Self {
        if weeks > 0.0 {
            self.default_weeks = weeks;
        }
        self
    }

    pub fn base_weeks(&self, skill: &str) -> f64 {
        self.learning_weeks
            .get(&skill.to_lowercase())
            .copied()
            .unwrap_or(self.default_weeks)
    }

    /// Resources for a skill, falling back to a generic suggestion
    pub fn resources(&self, skill: &str) -> TrainingResources {
        self.resources
            .get(&skill.to_lowercase())
            .cloned()
            .unwrap_or_else(|| TrainingResources {
                platforms: strings(GENERIC_PLATFORMS),
                estimated_time: "4-12 weeks".to_string(),
                suggestion: Some(format!(
                    "Look for {} courses on platforms such as Coursera, Udemy or LinkedIn Learning",
                    skill
                )),
                approach: Some(
                    "Start with introductory courses, then consolidate with hands-on projects".to_string(),
                ),
                ..Default::default()
            })
    }

    fn builtin_resources() -> Vec<(&'static str, TrainingResources)> {
        vec![
            (
                "Python",
                TrainingResources {
                    courses: strings(&[
                        "Python for Data Science and Machine Learning Bootcamp",
                        "Complete Python Bootcamp",
                    ]),
                    platforms: strings(&["Coursera", "Udemy", "DataCamp"]),
                    books: strings(&["Python Crash Course", "Automate the Boring Stuff with Python"]),
                    projects: strings(&["Build a personal portfolio website", "Create a data analysis tool"]),
                    estimated_time: "4-8 weeks".to_string(),
                    ..Default::default()
                },
            ),
            (
                "JavaScript",
                TrainingResources {
                    courses: strings(&[
                        "Modern JavaScript From The Beginning",
                        "JavaScript: Understanding the Weird Parts",
                    ]),
                    platforms: strings(&["Udemy", "Frontend Masters", "freeCodeCamp"]),
                    books: strings(&["Eloquent JavaScript", "You Don't Know JS"]),
                    projects: strings(&["Build an interactive web application", "Create a browser game"]),
                    estimated_time: "6-10 weeks".to_string(),
                    ..Default::default()
                },
            ),
            (
                "Machine Learning",
                TrainingResources {
                    courses: strings(&["Machine Learning by Andrew Ng", "Machine Learning A-Z"]),
                    platforms: strings(&["Coursera", "Udemy", "edX"]),
                    books: strings(&[
                        "Hands-On Machine Learning with Scikit-Learn and TensorFlow",
                        "Pattern Recognition and Machine Learning",
                    ]),
                    projects: strings(&[
                        "Build a recommendation system",
                        "Create a predictive model for a real dataset",
                    ]),
                    estimated_time: "10-16 weeks".to_string(),
                    ..Default::default()
                },
            ),
            (
                "AWS",
                TrainingResources {
                    courses: strings(&["AWS Certified Solutions Architect", "AWS Certified Developer"]),
                    platforms: strings(&["A Cloud Guru", "AWS Training", "Pluralsight"]),
                    books: strings(&[
                        "AWS Certified Solutions Architect Study Guide",
                        "Amazon Web Services in Action",
                    ]),
                    projects: strings(&["Deploy a scalable web application", "Build a serverless API"]),
                    estimated_time: "8-12 weeks".to_string(),
                    ..Default::default()
                },
            ),
            (
                "Leadership",
                TrainingResources {
                    courses: strings(&["Leadership Development Program", "People Management Skills"]),
                    platforms: strings(&["LinkedIn Learning", "Coursera", "edX"]),
                    books: strings(&["Leaders Eat Last", "The 7 Habits of Highly Effective People"]),
                    projects: strings(&["Lead a team project", "Mentor junior colleagues"]),
                    estimated_time: "4-8 weeks".to_string(),
                    ..Default::default()
                },
            ),
            (
                "Data Analysis",
                TrainingResources {
                    courses: strings(&["Data Analysis with Python", "SQL for Data Analysis"]),
                    platforms: strings(&["Coursera", "DataCamp", "Udacity"]),
                    estimated_time: "6-10 weeks".to_string(),
                    ..Default::default()
                },
            ),
        ]
    }
}

impl Default for TrainingCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_weeks() {
        let catalog = TrainingCatalog::builtin();
        assert_eq!(catalog.base_weeks("Python"), 6.0);
        assert_eq!(catalog.base_weeks("machine learning"), 12.0);
        assert_eq!(catalog.base_weeks("HTML"), 2.0);
        assert_eq!(catalog.base_weeks("Cobol"), 6.0);
        assert_eq!(catalog.with_default_weeks(3.0).base_weeks("Cobol"), 3.0);
    }

    #[test]
    fn test_known_resources() {
        let catalog = TrainingCatalog::builtin();
        let aws = catalog.resources("AWS");
        assert!(!aws.is_generic());
        assert_eq!(aws.estimated_time, "8-12 weeks");
        assert_eq!(aws.books.len(), 2);

        let analysis = catalog.resources("Data Analysis");
        assert!(analysis.books.is_empty());
        assert_eq!(analysis.estimated_time, "6-10 weeks");
    }

    #[test]
    fn test_generic_resources() {
        let res = TrainingCatalog::builtin().resources("Terraform");
        assert!(res.is_generic());
        assert_eq!(res.estimated_time, "4-12 weeks");
        assert_eq!(res.platforms.len(), 5);
        assert!(res.suggestion.unwrap().contains("Terraform"));
    }
}
