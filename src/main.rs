//! skill-gap: skill gap analysis, candidate ranking and development planning

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use skill_gap::cli::{self, Cli, Commands, ConfigAction, OutputArgs};
use skill_gap::config::{Config, OutputFormat};
use skill_gap::error::{Result, SkillGapError};
use skill_gap::input::DocumentLoader;
use skill_gap::output::formatter::{save_report_to_file, ReportGenerator};
use skill_gap::output::report::{ReportBody, ReportEnvelope};
use skill_gap::processing::analyzer::SkillGapEngine;
use skill_gap::requests::SkillGapRequest;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Instant;

const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "markdown"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(if e.is_validation() { 2 } else { 1 });
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn check_document(path: &Path, role: &str) -> Result<()> {
    cli::validate_file_extension(path, DOCUMENT_EXTENSIONS)
        .map_err(|e| SkillGapError::UnsupportedFormat(format!("{} file {}: {}", role, path.display(), e)))
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            candidate_id,
            job_id,
            output,
        } => {
            check_document(&resume, "Resume")?;
            check_document(&job, "Job description")?;

            let engine = SkillGapEngine::from_config(&config)?;
            let start_time = Instant::now();

            let mut loader = DocumentLoader::new();
            let resume_text = loader.load_text(&resume).await?;
            let job_text = loader.load_text(&job).await?;

            let report = engine.analyze_skill_gap(
                &resume_text,
                &job_text,
                candidate_id.as_deref(),
                job_id.as_deref(),
            );

            let envelope = ReportEnvelope::new(
                ReportBody::GapAnalysis(report),
                vec![display_path(&resume), display_path(&job)],
                engine.similarity_backend(),
                elapsed_ms(start_time),
            );
            emit(&envelope, &output, &config)?;
        }

        Commands::Compare { job, candidates, output } => {
            check_document(&job, "Job description")?;
            for (id, path) in &candidates {
                check_document(path, &format!("Candidate '{}'", id))?;
            }

            let engine = Arc::new(SkillGapEngine::from_config(&config)?);
            let start_time = Instant::now();

            let mut loader = DocumentLoader::new();
            let job_text = loader.load_text(&job).await?;
            let resumes = load_candidates(&mut loader, &candidates).await?;

            let comparison = Arc::clone(&engine)
                .compare_candidates_concurrent(resumes, job_text)
                .await?;

            let mut sources = vec![display_path(&job)];
            sources.extend(candidates.iter().map(|(_, path)| display_path(path)));

            let envelope = ReportEnvelope::new(
                ReportBody::CandidateComparison(comparison),
                sources,
                engine.similarity_backend(),
                elapsed_ms(start_time),
            );
            emit(&envelope, &output, &config)?;
        }

        Commands::Plan {
            resume,
            job,
            weeks,
            output,
        } => {
            check_document(&resume, "Resume")?;
            check_document(&job, "Job description")?;

            let engine = SkillGapEngine::from_config(&config)?;
            let start_time = Instant::now();
            let weeks = weeks.unwrap_or(config.planning.default_timeframe_weeks);

            let mut loader = DocumentLoader::new();
            let resume_text = loader.load_text(&resume).await?;
            let job_text = loader.load_text(&job).await?;

            let plan = engine.generate_skill_development_plan(&resume_text, &job_text, weeks);

            let envelope = ReportEnvelope::new(
                ReportBody::DevelopmentPlan(plan),
                vec![display_path(&resume), display_path(&job)],
                engine.similarity_backend(),
                elapsed_ms(start_time),
            );
            emit(&envelope, &output, &config)?;
        }

        Commands::Run { request, save } => {
            let content = tokio::fs::read_to_string(&request).await?;
            let request = SkillGapRequest::from_json(&content)?;
            info!("Running {} request", request.operation());

            let engine = SkillGapEngine::from_config(&config)?;
            let result = engine.handle(&request)?;
            let rendered = serde_json::to_string_pretty(&result)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)?;
                    println!("💾 Result saved to: {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Taxonomy { domain } => {
            let engine = SkillGapEngine::from_config(&config)?;
            let taxonomy = engine.taxonomy();

            let domains: Vec<_> = match &domain {
                Some(name) => vec![taxonomy.domain(name).ok_or_else(|| {
                    SkillGapError::Validation(format!("Unknown skill domain: {}", name))
                })?],
                None => taxonomy.domains().iter().collect(),
            };

            println!("📚 Skill taxonomy ({} skills)\n", taxonomy.skill_count());
            for d in domains {
                println!("{} ({})", d.name, d.skills.len());
                println!("  {}\n", d.skills.join(", "));
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Similarity threshold: {:.2}", config.analysis.similarity_threshold);
                println!("Critical threshold: {:.2}", config.analysis.critical_threshold);
                println!("Default importance: {:.2}", config.analysis.default_importance);
                println!("Default similarity: {:.2}", config.analysis.default_similarity);
                println!("Default timeframe: {} weeks", config.planning.default_timeframe_weeks);
                println!("Default learning time: {} weeks", config.planning.default_learning_weeks);
                println!(
                    "Taxonomy: {}",
                    config
                        .taxonomy
                        .path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "built-in".to_string())
                );
                println!("Similarity backend: {:?}", config.similarity.backend);
                println!("Output format: {:?}", config.output.format);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save()?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }
        },
    }

    Ok(())
}

async fn load_candidates(
    loader: &mut DocumentLoader,
    candidates: &[(String, PathBuf)],
) -> Result<BTreeMap<String, String>> {
    let progress = ProgressBar::new(candidates.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut resumes = BTreeMap::new();
    for (id, path) in candidates {
        progress.set_message(format!("loading {}", id));
        let text = loader.load_text(path).await?;
        if resumes.insert(id.clone(), text).is_some() {
            progress.abandon();
            return Err(SkillGapError::Validation(format!("Candidate id '{}' given more than once", id)));
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(resumes)
}

fn emit(envelope: &ReportEnvelope, args: &OutputArgs, config: &Config) -> Result<()> {
    let format = match &args.output {
        Some(format) => cli::parse_output_format(format).map_err(SkillGapError::Validation)?,
        None => config.output.format,
    };
    let use_colors = config.output.color_output && args.save.is_none() && format == OutputFormat::Console;

    let generator = ReportGenerator::with_options(
        use_colors,
        args.detailed || config.output.detailed,
        true,
        true,
        true,
    );
    let rendered = generator.generate_report(envelope, &format)?;

    match &args.save {
        Some(path) => {
            save_report_to_file(&rendered, path)?;
            println!("💾 Report saved to: {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
