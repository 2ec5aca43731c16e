//! Rendering of report envelopes as console text, JSON, Markdown or HTML

use crate::config::OutputFormat;
use crate::error::{Result, SkillGapError};
use crate::output::report::{ReportBody, ReportEnvelope, ScoreBand};
use crate::processing::analyzer::CandidateComparison;
use crate::processing::gap_analyzer::GapReport;
use crate::processing::planner::DevelopmentPlanReport;
use crate::processing::training::TrainingResources;
use askama::Template;
use colored::{Color, Colorize};
use std::fmt::Write as _;
use std::path::Path;

/// Trait for formatting report envelopes
pub trait OutputFormatter {
    fn format_report(&self, report: &ReportEnvelope) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and score badges
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .score-badge {
            display: inline-block;
            padding: 8px 16px;
            border-radius: 20px;
            font-weight: bold;
            color: white;
            margin-left: 10px;
        }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .section { margin: 25px 0; }
        .section h2 {
            color: #007acc;
            border-bottom: 2px solid #e9ecef;
            padding-bottom: 10px;
        }
        table { border-collapse: collapse; width: 100%; margin: 10px 0; }
        th, td { border: 1px solid #dee2e6; padding: 6px 10px; text-align: left; }
        th { background: #f1f3f5; }
        .critical { color: #dc3545; font-weight: bold; }
        .partial { color: #b8860b; }
        .metadata {
            background: #e9ecef;
            padding: 15px;
            border-radius: 6px;
            margin-top: 30px;
            font-size: 0.9em;
            color: #6c757d;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>{{ title }}</h1>
            <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>
        </div>

        {% if has_score %}
        <div class="section">
            <h2>Summary</h2>
            <h3>Match Score: {{ score }}% <span class="score-badge {{ score_class }}">{{ score_label }}</span></h3>
            <p><strong>Verdict:</strong> {{ verdict }}</p>
        </div>
        {% endif %}

        {{ body_html | safe }}

        <div class="metadata">
            <p><strong>Generated by skill-gap v{{ version }}</strong></p>
            <p><strong>Similarity backend:</strong> {{ similarity_backend }}</p>
            <p><strong>Sources:</strong> {{ sources }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    title: String,
    generated_at: String,
    processing_time: u64,
    has_score: bool,
    score: String,
    score_class: String,
    score_label: String,
    verdict: String,
    body_html: String,
    version: String,
    similarity_backend: String,
    sources: String,
}

fn format_weeks(weeks: f64) -> String {
    if weeks.fract().abs() < f64::EPSILON {
        format!("{:.0}", weeks)
    } else {
        format!("{:.1}", weeks)
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            3 => "▒",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Yellow,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let band = ScoreBand::from_percentage(score);
        let color = match band {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::VeryGood => Color::BrightGreen,
            ScoreBand::Good => Color::Yellow,
            ScoreBand::Fair => Color::BrightYellow,
            ScoreBand::BelowAverage => Color::Red,
            ScoreBand::Poor => Color::BrightRed,
        };
        let badge = band.label().to_uppercase();

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn critical_tag(&self, is_critical: bool) -> String {
        if is_critical {
            format!(" {}", self.colorize("[CRITICAL]", Color::Red))
        } else {
            String::new()
        }
    }

    fn format_resources(&self, out: &mut String, resources: &TrainingResources) {
        if !resources.courses.is_empty() {
            let _ = writeln!(out, "      Courses: {}", resources.courses.join("; "));
        }
        if !resources.platforms.is_empty() {
            let _ = writeln!(out, "      Platforms: {}", resources.platforms.join(", "));
        }
        if !resources.books.is_empty() {
            let _ = writeln!(out, "      Books: {}", resources.books.join("; "));
        }
        if !resources.projects.is_empty() {
            let _ = writeln!(out, "      Projects: {}", resources.projects.join("; "));
        }
        if let Some(suggestion) = &resources.suggestion {
            let _ = writeln!(out, "      {}", suggestion);
        }
        let _ = writeln!(out, "      Estimated time: {}", resources.estimated_time);
    }

    fn format_gap(&self, out: &mut String, report: &GapReport) {
        if report.candidate_id.is_some() || report.job_id.is_some() {
            let _ = writeln!(
                out,
                "Candidate: {} | Job: {}",
                report.candidate_id.as_deref().unwrap_or("-"),
                report.job_id.as_deref().unwrap_or("-")
            );
        }

        out.push_str(&self.format_header("Summary", 2));
        let _ = writeln!(
            out,
            "Match Score: {:.2}% {}",
            report.match_percentage,
            self.format_score_badge(report.match_percentage)
        );
        let _ = writeln!(out, "Skill Gap: {:.2}%", report.gap_percentage);
        let _ = writeln!(
            out,
            "Verdict: {}",
            self.colorize(ScoreBand::from_percentage(report.match_percentage).verdict(), Color::Cyan)
        );
        let _ = writeln!(
            out,
            "Job skills: {} | Matched: {} | Missing: {} ({} critical) | Additional: {}",
            report.job_skills_count,
            report.matched_skills_count,
            report.missing_skills_count,
            report.missing_critical_skills_count,
            report.additional_skills_count
        );

        if !report.matched_skills.is_empty() {
            out.push_str(&self.format_header("✅ Matched Skills", 3));
            for m in &report.matched_skills {
                let via = if m.job_skill.eq_ignore_ascii_case(&m.candidate_skill) {
                    String::new()
                } else {
                    format!(" via {}", m.candidate_skill)
                };
                let _ = writeln!(
                    out,
                    "  • {}{} (similarity {:.2}, importance {:.2})",
                    self.colorize(&m.job_skill, Color::Green),
                    via,
                    m.similarity,
                    m.importance
                );
            }
        }

        if !report.missing_skills.is_empty() {
            out.push_str(&self.format_header("❌ Missing Skills", 3));
            for m in &report.missing_skills {
                let _ = writeln!(
                    out,
                    "  • {} (importance {:.2}){}",
                    self.colorize(&m.skill, Color::Yellow),
                    m.importance,
                    self.critical_tag(m.is_critical)
                );
            }
        }

        if !self.detailed {
            return;
        }

        if !report.additional_skills.is_empty() {
            out.push_str(&self.format_header("➕ Additional Skills", 3));
            for a in &report.additional_skills {
                let related = a
                    .best_related_job_skill
                    .as_deref()
                    .map(|s| format!(", closest to {}", s))
                    .unwrap_or_default();
                let _ = writeln!(out, "  • {} (relevance {:.2}{})", a.skill, a.relevance, related);
            }
        }

        let domains: Vec<_> = report.skill_gap_by_domain.iter().filter(|d| d.required > 0).collect();
        if !domains.is_empty() {
            out.push_str(&self.format_header("Skill Gap by Domain", 3));
            for d in domains {
                let _ = writeln!(
                    out,
                    "  {:<14} {}/{} matched  {:>6.2}% match  {:>6.2}% gap",
                    d.domain, d.matched, d.required, d.match_score, d.gap_score
                );
            }
        }

        if !report.training_recommendations.is_empty() {
            out.push_str(&self.format_header("📚 Training Recommendations", 3));
            for rec in &report.training_recommendations {
                let _ = writeln!(out, "  • {}{}", rec.skill, self.critical_tag(rec.is_critical));
                self.format_resources(out, &rec.resources);
            }
        }
    }

    fn format_comparison(&self, out: &mut String, comparison: &CandidateComparison) {
        let _ = writeln!(out, "Job skills: {}", join_or_none(&comparison.job_skills));
        let _ = writeln!(out, "Critical skills: {}", join_or_none(&comparison.critical_skills));

        out.push_str(&self.format_header("🏆 Ranking", 2));
        for (i, c) in comparison.ranked_candidates.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>2}. {:<20} {:>6.2}% {}  missing: {} ({} critical)  additional: {}",
                i + 1,
                c.candidate_id,
                c.match_score,
                self.format_score_badge(c.match_score),
                c.missing_skills_count,
                c.missing_critical_skills_count,
                c.additional_skills_count
            );
        }

        if self.detailed {
            for c in &comparison.ranked_candidates {
                if let Some(report) = comparison.detailed_analyses.get(&c.candidate_id) {
                    out.push_str(&self.format_header(&format!("Candidate {}", c.candidate_id), 2));
                    self.format_gap(out, report);
                }
            }
        }
    }

    fn format_plan(&self, out: &mut String, plan: &DevelopmentPlanReport) {
        out.push_str(&self.format_header("Summary", 2));
        let _ = writeln!(
            out,
            "Missing skills: {} | Covered: {} | Not covered: {}",
            plan.total_missing_skills, plan.skills_covered, plan.skills_not_covered
        );
        let _ = writeln!(
            out,
            "Learning time required: {} weeks | Available: {} weeks",
            format_weeks(plan.total_learning_time_required),
            plan.timeframe_available
        );
        let _ = writeln!(
            out,
            "Critical skills covered: {} | Not covered: {}",
            plan.critical_skills_covered, plan.critical_skills_not_covered
        );
        let _ = writeln!(
            out,
            "Skill gap: {:.2} -> {}",
            plan.skill_gap_score_before,
            self.colorize(&format!("{:.2}", plan.estimated_skill_gap_score_after), Color::Green)
        );

        out.push_str(&self.format_header("🗓️ Schedule", 2));
        if plan.development_plan.is_empty() {
            let _ = writeln!(out, "Nothing scheduled.");
        }
        for entry in &plan.development_plan {
            let partial = if entry.is_partial_training {
                format!(" {}", self.colorize("[PARTIAL]", Color::Yellow))
            } else {
                String::new()
            };
            let _ = writeln!(
                out,
                "  Weeks {:>5} - {:<5} {} ({} weeks){}{}",
                format_weeks(entry.start_week),
                format_weeks(entry.end_week),
                self.colorize(&entry.skill, Color::Cyan),
                format_weeks(entry.duration_weeks),
                self.critical_tag(entry.is_critical),
                partial
            );
            if self.detailed {
                self.format_resources(out, &entry.resources);
            }
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ReportEnvelope) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header(&format!("📊 {}", report.title().to_uppercase()), 1));
        let _ = writeln!(
            output,
            "Generated: {} | Processing time: {}ms",
            report.generated_at_display(),
            report.metadata.processing_time_ms
        );

        match &report.body {
            ReportBody::GapAnalysis(gap) => self.format_gap(&mut output, gap),
            ReportBody::CandidateComparison(comparison) => self.format_comparison(&mut output, comparison),
            ReportBody::DevelopmentPlan(plan) => self.format_plan(&mut output, plan),
        }

        output.push('\n');
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ReportEnvelope) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(score: f64) -> &'static str {
        match ScoreBand::from_percentage(score) {
            ScoreBand::Excellent => "🟢 Excellent",
            ScoreBand::VeryGood => "🟡 Very Good",
            ScoreBand::Good => "🟠 Good",
            ScoreBand::Fair => "🔴 Fair",
            ScoreBand::BelowAverage => "🔴 Below Average",
            ScoreBand::Poor => "🔴 Poor",
        }
    }

    fn format_gap(out: &mut String, report: &GapReport, heading: &str) {
        let _ = writeln!(out, "{} Summary\n", heading);
        let _ = writeln!(
            out,
            "**Match Score:** {:.2}% {}\n",
            report.match_percentage,
            Self::markdown_score_badge(report.match_percentage)
        );
        let _ = writeln!(out, "**Skill Gap:** {:.2}%\n", report.gap_percentage);
        let _ = writeln!(out, "**Critical skills:** {}\n", join_or_none(&report.critical_skills));

        if !report.matched_skills.is_empty() {
            let _ = writeln!(out, "{} ✅ Matched Skills\n", heading);
            out.push_str("| Job Skill | Candidate Skill | Similarity | Importance |\n");
            out.push_str("|-----------|-----------------|------------|------------|\n");
            for m in &report.matched_skills {
                let _ = writeln!(
                    out,
                    "| {} | {} | {:.2} | {:.2} |",
                    m.job_skill, m.candidate_skill, m.similarity, m.importance
                );
            }
            out.push('\n');
        }

        if !report.missing_skills.is_empty() {
            let _ = writeln!(out, "{} ❌ Missing Skills\n", heading);
            out.push_str("| Skill | Importance | Critical |\n");
            out.push_str("|-------|------------|----------|\n");
            for m in &report.missing_skills {
                let _ = writeln!(
                    out,
                    "| {} | {:.2} | {} |",
                    m.skill,
                    m.importance,
                    if m.is_critical { "🚨 yes" } else { "no" }
                );
            }
            out.push('\n');
        }

        if !report.additional_skills.is_empty() {
            let _ = writeln!(out, "{} ➕ Additional Skills\n", heading);
            for a in &report.additional_skills {
                let _ = writeln!(out, "- **{}** (relevance {:.2})", a.skill, a.relevance);
            }
            out.push('\n');
        }

        let domains: Vec<_> = report.skill_gap_by_domain.iter().filter(|d| d.required > 0).collect();
        if !domains.is_empty() {
            let _ = writeln!(out, "{} Skill Gap by Domain\n", heading);
            out.push_str("| Domain | Required | Matched | Match % | Gap % |\n");
            out.push_str("|--------|----------|---------|---------|-------|\n");
            for d in domains {
                let _ = writeln!(
                    out,
                    "| {} | {} | {} | {:.2} | {:.2} |",
                    d.domain, d.required, d.matched, d.match_score, d.gap_score
                );
            }
            out.push('\n');
        }

        if !report.training_recommendations.is_empty() {
            let _ = writeln!(out, "{} 📚 Training Recommendations\n", heading);
            for rec in &report.training_recommendations {
                let critical = if rec.is_critical { " 🚨" } else { "" };
                let _ = writeln!(
                    out,
                    "- **{}**{} ({}): {}",
                    rec.skill,
                    critical,
                    rec.resources.estimated_time,
                    Self::resource_summary(&rec.resources)
                );
            }
            out.push('\n');
        }
    }

    fn resource_summary(resources: &TrainingResources) -> String {
        if let Some(suggestion) = &resources.suggestion {
            return suggestion.clone();
        }
        let mut parts = Vec::new();
        if !resources.courses.is_empty() {
            parts.push(format!("courses: {}", resources.courses.join("; ")));
        }
        if !resources.platforms.is_empty() {
            parts.push(format!("platforms: {}", resources.platforms.join(", ")));
        }
        parts.join(" | ")
    }

    fn format_comparison(out: &mut String, comparison: &CandidateComparison) {
        let _ = writeln!(out, "**Job skills:** {}\n", join_or_none(&comparison.job_skills));
        let _ = writeln!(out, "**Critical skills:** {}\n", join_or_none(&comparison.critical_skills));

        out.push_str("## 🏆 Ranking\n\n");
        out.push_str("| Rank | Candidate | Match % | Gap % | Missing | Missing Critical | Additional |\n");
        out.push_str("|------|-----------|---------|-------|---------|------------------|------------|\n");
        for (i, c) in comparison.ranked_candidates.iter().enumerate() {
            let _ = writeln!(
                out,
                "| {} | {} | {:.2} | {:.2} | {} | {} | {} |",
                i + 1,
                c.candidate_id,
                c.match_score,
                c.skill_gap_score,
                c.missing_skills_count,
                c.missing_critical_skills_count,
                c.additional_skills_count
            );
        }
        out.push('\n');

        for c in &comparison.ranked_candidates {
            if let Some(report) = comparison.detailed_analyses.get(&c.candidate_id) {
                let _ = writeln!(out, "## Candidate `{}`\n", c.candidate_id);
                Self::format_gap(out, report, "###");
            }
        }
    }

    fn format_plan(out: &mut String, plan: &DevelopmentPlanReport) {
        out.push_str("## Summary\n\n");
        let _ = writeln!(
            out,
            "- **Missing skills:** {} ({} covered, {} not covered)",
            plan.total_missing_skills, plan.skills_covered, plan.skills_not_covered
        );
        let _ = writeln!(
            out,
            "- **Learning time required:** {} weeks of {} available",
            format_weeks(plan.total_learning_time_required),
            plan.timeframe_available
        );
        let _ = writeln!(
            out,
            "- **Critical skills:** {} covered, {} not covered",
            plan.critical_skills_covered, plan.critical_skills_not_covered
        );
        let _ = writeln!(
            out,
            "- **Skill gap:** {:.2} → {:.2}\n",
            plan.skill_gap_score_before, plan.estimated_skill_gap_score_after
        );

        out.push_str("## 🗓️ Schedule\n\n");
        if plan.development_plan.is_empty() {
            out.push_str("_Nothing scheduled._\n\n");
            return;
        }
        out.push_str("| Weeks | Skill | Duration | Critical | Partial | Estimated Time |\n");
        out.push_str("|-------|-------|----------|----------|---------|----------------|\n");
        for e in &plan.development_plan {
            let _ = writeln!(
                out,
                "| {}-{} | {} | {} | {} | {} | {} |",
                format_weeks(e.start_week),
                format_weeks(e.end_week),
                e.skill,
                format_weeks(e.duration_weeks),
                if e.is_critical { "yes" } else { "no" },
                if e.is_partial_training { "yes" } else { "no" },
                e.resources.estimated_time
            );
        }
        out.push('\n');
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ReportEnvelope) -> Result<String> {
        let mut output = String::new();
        let _ = writeln!(output, "# 📊 {}\n", report.title());

        if self.include_metadata {
            let _ = writeln!(
                output,
                "**Generated:** {} | **Processing Time:** {}ms | **Similarity:** {}\n",
                report.generated_at_display(),
                report.metadata.processing_time_ms,
                report.metadata.similarity_backend
            );
            if !report.metadata.sources.is_empty() {
                let sources: Vec<String> = report.metadata.sources.iter().map(|s| format!("`{}`", s)).collect();
                let _ = writeln!(output, "**Sources:** {}\n", sources.join(", "));
            }
        }

        match &report.body {
            ReportBody::GapAnalysis(gap) => Self::format_gap(&mut output, gap, "##"),
            ReportBody::CandidateComparison(comparison) => Self::format_comparison(&mut output, comparison),
            ReportBody::DevelopmentPlan(plan) => Self::format_plan(&mut output, plan),
        }

        output.push_str("---\n*Generated by skill-gap v");
        output.push_str(&report.metadata.tool_version);
        output.push_str("*\n");
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

/// Minimal escaping for text placed inside pre-rendered HTML fragments
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn score_class(score: f64) -> &'static str {
        match ScoreBand::from_percentage(score) {
            ScoreBand::Excellent => "score-excellent",
            ScoreBand::VeryGood | ScoreBand::Good => "score-good",
            ScoreBand::Fair => "score-fair",
            ScoreBand::BelowAverage | ScoreBand::Poor => "score-poor",
        }
    }

    fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
        let mut html = String::from("<table><tr>");
        for h in headers {
            let _ = write!(html, "<th>{}</th>", h);
        }
        html.push_str("</tr>");
        for row in rows {
            html.push_str("<tr>");
            for cell in row {
                let _ = write!(html, "<td>{}</td>", cell);
            }
            html.push_str("</tr>");
        }
        html.push_str("</table>");
        html
    }

    fn section(title: &str, content: &str) -> String {
        format!("<div class=\"section\"><h2>{}</h2>{}</div>\n", title, content)
    }

    fn gap_html(report: &GapReport) -> String {
        let mut html = String::new();

        let matched = report
            .matched_skills
            .iter()
            .map(|m| {
                vec![
                    escape_html(&m.job_skill),
                    escape_html(&m.candidate_skill),
                    format!("{:.2}", m.similarity),
                    format!("{:.2}", m.importance),
                ]
            })
            .collect();
        html.push_str(&Self::section(
            "✅ Matched Skills",
            &Self::table(&["Job Skill", "Candidate Skill", "Similarity", "Importance"], matched),
        ));

        let missing = report
            .missing_skills
            .iter()
            .map(|m| {
                let critical = if m.is_critical {
                    "<span class=\"critical\">critical</span>".to_string()
                } else {
                    String::new()
                };
                vec![escape_html(&m.skill), format!("{:.2}", m.importance), critical]
            })
            .collect();
        html.push_str(&Self::section(
            "❌ Missing Skills",
            &Self::table(&["Skill", "Importance", ""], missing),
        ));

        let domains = report
            .skill_gap_by_domain
            .iter()
            .filter(|d| d.required > 0)
            .map(|d| {
                vec![
                    escape_html(&d.domain),
                    d.required.to_string(),
                    d.matched.to_string(),
                    format!("{:.2}%", d.match_score),
                    format!("{:.2}%", d.gap_score),
                ]
            })
            .collect();
        html.push_str(&Self::section(
            "Skill Gap by Domain",
            &Self::table(&["Domain", "Required", "Matched", "Match", "Gap"], domains),
        ));

        if !report.training_recommendations.is_empty() {
            let mut list = String::from("<ul>");
            for rec in &report.training_recommendations {
                let platforms = escape_html(&rec.resources.platforms.join(", "));
                let _ = write!(
                    list,
                    "<li><strong>{}</strong> ({}) {}</li>",
                    escape_html(&rec.skill),
                    escape_html(&rec.resources.estimated_time),
                    platforms
                );
            }
            list.push_str("</ul>");
            html.push_str(&Self::section("📚 Training Recommendations", &list));
        }

        html
    }

    fn comparison_html(comparison: &CandidateComparison) -> String {
        let rows = comparison
            .ranked_candidates
            .iter()
            .enumerate()
            .map(|(i, c)| {
                vec![
                    (i + 1).to_string(),
                    escape_html(&c.candidate_id),
                    format!("{:.2}%", c.match_score),
                    c.missing_skills_count.to_string(),
                    c.missing_critical_skills_count.to_string(),
                ]
            })
            .collect();

        let mut html = format!(
            "<p><strong>Job skills:</strong> {}</p><p><strong>Critical skills:</strong> {}</p>",
            escape_html(&join_or_none(&comparison.job_skills)),
            escape_html(&join_or_none(&comparison.critical_skills))
        );
        html.push_str(&Self::table(
            &["Rank", "Candidate", "Match", "Missing", "Missing Critical"],
            rows,
        ));
        Self::section("🏆 Ranking", &html)
    }

    fn plan_html(plan: &DevelopmentPlanReport) -> String {
        let summary = format!(
            "<p>{} of {} missing skills covered in {} weeks. Skill gap {:.2} → {:.2}.</p>",
            plan.skills_covered,
            plan.total_missing_skills,
            plan.timeframe_available,
            plan.skill_gap_score_before,
            plan.estimated_skill_gap_score_after
        );

        let rows = plan
            .development_plan
            .iter()
            .map(|e| {
                let mut skill = escape_html(&e.skill);
                if e.is_critical {
                    skill = format!("<span class=\"critical\">{}</span>", skill);
                }
                let partial = if e.is_partial_training {
                    "<span class=\"partial\">partial</span>".to_string()
                } else {
                    String::new()
                };
                vec![
                    format!("{}-{}", format_weeks(e.start_week), format_weeks(e.end_week)),
                    skill,
                    format_weeks(e.duration_weeks),
                    partial,
                ]
            })
            .collect();

        Self::section(
            "🗓️ Schedule",
            &format!("{}{}", summary, Self::table(&["Weeks", "Skill", "Duration", ""], rows)),
        )
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &ReportEnvelope) -> Result<String> {
        let body_html = match &report.body {
            ReportBody::GapAnalysis(gap) => Self::gap_html(gap),
            ReportBody::CandidateComparison(comparison) => Self::comparison_html(comparison),
            ReportBody::DevelopmentPlan(plan) => Self::plan_html(plan),
        };

        let score = report.headline_score();
        let band = score.map(ScoreBand::from_percentage);

        let template = HtmlTemplate {
            include_styles: self.include_styles,
            title: report.title().to_string(),
            generated_at: report.generated_at_display(),
            processing_time: report.metadata.processing_time_ms,
            has_score: score.is_some(),
            score: score.map(|s| format!("{:.2}", s)).unwrap_or_default(),
            score_class: score.map(Self::score_class).unwrap_or_default().to_string(),
            score_label: band.map(|b| b.label()).unwrap_or_default().to_string(),
            verdict: band.map(|b| b.verdict()).unwrap_or_default().to_string(),
            body_html,
            version: report.metadata.tool_version.clone(),
            similarity_backend: report.metadata.similarity_backend.clone(),
            sources: report.metadata.sources.join(", "),
        };

        template
            .render()
            .map_err(|e| SkillGapError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &ReportEnvelope, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, source_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(source_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_skill_gap{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::analyzer::SkillGapEngine;

    fn gap_envelope() -> ReportEnvelope {
        let engine = SkillGapEngine::from_config(&Config::default()).unwrap();
        let report = engine.analyze_skill_gap(
            "Python and Docker",
            "Required Python. Must have AWS. Kubernetes is a plus.",
            Some("c-1"),
            None,
        );
        ReportEnvelope::new(ReportBody::GapAnalysis(report), vec!["cv.txt".to_string()], "lookup", 3)
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false, true).format_report(&gap_envelope()).unwrap();
        assert!(output.contains("SKILL GAP ANALYSIS"));
        assert!(output.contains("Missing Skills"));
        assert!(output.contains("AWS (importance 0.90) [CRITICAL]"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_json_round_trips() {
        let output = JsonFormatter::new(true).format_report(&gap_envelope()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["body"]["kind"], "gap_analysis");
        assert_eq!(value["body"]["result"]["candidate_id"], "c-1");
        assert_eq!(value["metadata"]["similarity_backend"], "lookup");
    }

    #[test]
    fn test_markdown_tables() {
        let output = MarkdownFormatter::new(true).format_report(&gap_envelope()).unwrap();
        assert!(output.starts_with("# 📊 Skill Gap Analysis"));
        assert!(output.contains("| Job Skill | Candidate Skill | Similarity | Importance |"));
        assert!(output.contains("`cv.txt`"));
    }

    #[test]
    fn test_html_render() {
        let output = HtmlFormatter::new(false).format_report(&gap_envelope()).unwrap();
        assert!(output.contains("<title>Skill Gap Analysis</title>"));
        assert!(output.contains("<td>AWS</td>"));
        assert!(!output.contains("<style>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<C#> & \"Go\""), "&lt;C#&gt; &amp; &quot;Go&quot;");
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(&OutputFormat::Markdown, "resumes/jane.pdf", false),
            "jane_skill_gap.md"
        );
        assert!(suggest_filename(&OutputFormat::Html, "jane.txt", true).ends_with(".html"));
    }
}
