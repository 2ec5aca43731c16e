//! CLI interface for the skill gap analyzer

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "skill-gap")]
#[command(about = "Skill gap analysis between resumes and job descriptions")]
#[command(
    long_about = "Extract skills from resumes and job descriptions, measure importance-weighted gaps, rank candidates and plan time-boxed skill development"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Rendering options shared by the analysis commands
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format: console, json, markdown, html (defaults to the configured format)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Include additional skills, domain breakdown and training resources
    #[arg(short, long)]
    pub detailed: bool,

    /// Save output to file
    #[arg(short, long)]
    pub save: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze the skill gap between one resume and one job description
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Identifier recorded in the report for the candidate
        #[arg(long)]
        candidate_id: Option<String>,

        /// Identifier recorded in the report for the job
        #[arg(long)]
        job_id: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Rank several candidates against one job description
    Compare {
        /// Path to job description file (PDF, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Candidate as ID=PATH; repeat for each candidate
        #[arg(short = 'C', long = "candidate", required = true, value_parser = parse_candidate)]
        candidates: Vec<(String, PathBuf)>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Build a week-by-week development plan for one candidate
    Plan {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Weeks available for training (defaults to the configured timeframe)
        #[arg(short, long)]
        weeks: Option<u32>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Execute a JSON request file and print the JSON result
    Run {
        /// Path to a request with an "operation" field
        #[arg(short, long)]
        request: PathBuf,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// List the skill taxonomy
    Taxonomy {
        /// Show only this domain
        #[arg(short, long)]
        domain: Option<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

/// Parse a `ID=PATH` candidate argument
pub fn parse_candidate(value: &str) -> Result<(String, PathBuf), String> {
    let (id, path) = value
        .split_once('=')
        .ok_or_else(|| format!("Expected ID=PATH, got '{}'", value))?;

    let id = id.trim();
    let path = path.trim();
    if id.is_empty() || path.is_empty() {
        return Err(format!("Expected ID=PATH, got '{}'", value));
    }

    Ok((id.to_string(), PathBuf::from(path)))
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
