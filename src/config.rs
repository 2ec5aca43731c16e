//! Configuration management for the skill gap analyzer

use crate::error::{Result, SkillGapError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub planning: PlanningConfig,
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
    #[serde(default)]
    pub similarity: SimilarityConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum similarity for a candidate skill to satisfy a job skill
    pub similarity_threshold: f64,
    /// Importance at or above which a job skill is critical
    pub critical_threshold: f64,
    /// Importance used for skills the job text never mentions
    pub default_importance: f64,
    /// Similarity used for unrelated skill pairs
    pub default_similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningConfig {
    pub default_timeframe_weeks: u32,
    pub default_learning_weeks: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// Optional TOML file replacing the built-in taxonomy
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityConfig {
    pub backend: SimilarityBackend,
    pub embedding_model: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityBackend {
    Lookup,
    Embedding,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            backend: SimilarityBackend::Lookup,
            embedding_model: "minishlab/potion-base-8M".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig {
                similarity_threshold: 0.75,
                critical_threshold: 0.85,
                default_importance: 0.3,
                default_similarity: 0.3,
            },
            planning: PlanningConfig {
                default_timeframe_weeks: 12,
                default_learning_weeks: 6.0,
            },
            taxonomy: TaxonomyConfig::default(),
            similarity: SimilarityConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            SkillGapError::Configuration(format!("Failed to parse config {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SkillGapError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skill-gap")
            .join("config.toml")
    }

    /// Reject values that would break the scoring invariants
    pub fn validate(&self) -> Result<()> {
        let unit_fields = [
            ("analysis.similarity_threshold", self.analysis.similarity_threshold),
            ("analysis.critical_threshold", self.analysis.critical_threshold),
            ("analysis.default_importance", self.analysis.default_importance),
            ("analysis.default_similarity", self.analysis.default_similarity),
        ];

        for (name, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(SkillGapError::Configuration(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if !(self.planning.default_learning_weeks > 0.0) {
            return Err(SkillGapError::Configuration(format!(
                "planning.default_learning_weeks must be positive, got {}",
                self.planning.default_learning_weeks
            )));
        }

        Ok(())
    }
}
