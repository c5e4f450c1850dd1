//! Argument parsing, the analysis pipeline, and report rendering for the
//! `seolens` binary.

use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::info;
use url::Url;

use seolens_core::url_utils::normalize_page_url;
use seolens_core::{
    AdviceRequest, Advisor, Category, PageData, PageDataProvider, ScoreReport, Suggestions,
    recommend, score,
};

pub const APP_NAME: &str = "seolens";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DEFAULT_INDUSTRY: &str = "General";

#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub url: String,
    pub industry: String,
    pub json: bool,
    pub advice: bool,
    pub save_target: Option<PathBuf>,
}

#[derive(Debug, PartialEq)]
pub enum CliCommand {
    Run(CliOptions),
    Help,
    Version,
}

pub fn parse_arguments(args: &[String]) -> Result<CliCommand> {
    if args.is_empty() {
        return Ok(CliCommand::Help);
    }

    let mut url: Option<String> = None;
    let mut industry: Option<String> = None;
    let mut json = false;
    let mut advice = true;
    let mut save_target: Option<PathBuf> = None;
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if matches!(arg.as_str(), "-h" | "--help") {
            return Ok(CliCommand::Help);
        }

        if matches!(arg.as_str(), "-v" | "--version") {
            return Ok(CliCommand::Version);
        }

        if matches!(arg.as_str(), "-j" | "--json") {
            json = true;
            i += 1;
            continue;
        }

        if arg == "--no-advice" {
            advice = false;
            i += 1;
            continue;
        }

        if let Some(value) = arg.strip_prefix("--industry=") {
            industry = Some(parse_industry(value, industry.is_some())?);
            i += 1;
            continue;
        }

        if matches!(arg.as_str(), "-i" | "--industry") {
            let value = args
                .get(i + 1)
                .filter(|next| !next.starts_with('-'))
                .ok_or_else(|| anyhow!("{arg} requires a value"))?;
            industry = Some(parse_industry(value, industry.is_some())?);
            i += 2;
            continue;
        }

        if let Some(value) = arg
            .strip_prefix("--save=")
            .or_else(|| arg.strip_prefix("-s="))
        {
            if save_target.is_some() {
                return Err(anyhow!("--save specified multiple times"));
            }
            save_target = Some(save_path(value));
            i += 1;
            continue;
        }

        if matches!(arg.as_str(), "-s" | "--save") {
            if save_target.is_some() {
                return Err(anyhow!("--save specified multiple times"));
            }
            // A following bare word is the path only once the URL is known
            let next_is_path = url.is_some()
                && args
                    .get(i + 1)
                    .is_some_and(|next| !next.starts_with('-'));

            if next_is_path {
                save_target = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            } else {
                save_target = Some(PathBuf::from("."));
                i += 1;
            }

            continue;
        }

        if arg.starts_with('-') {
            return Err(anyhow!("unknown flag: {arg}"));
        }

        if url.is_none() {
            url = Some(arg.clone());
        } else {
            return Err(anyhow!("unexpected additional argument: {}", arg));
        }

        i += 1;
    }

    let url = url.ok_or_else(|| anyhow!("missing <url> argument"))?;

    Ok(CliCommand::Run(CliOptions {
        url,
        industry: industry.unwrap_or_else(|| DEFAULT_INDUSTRY.to_string()),
        json,
        advice,
        save_target,
    }))
}

fn parse_industry(value: &str, already_set: bool) -> Result<String> {
    if already_set {
        return Err(anyhow!("--industry specified multiple times"));
    }
    let value = value.trim();
    if value.is_empty() {
        return Err(anyhow!("--industry must not be empty"));
    }
    Ok(value.to_string())
}

fn save_path(value: &str) -> PathBuf {
    if value.is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(value)
    }
}

pub fn print_help() {
    println!("{APP_NAME} - On-page SEO scoring with content suggestions");
    println!("Usage: {APP_NAME} [OPTIONS] <URL>\n");
    println!("Options:");
    println!("  -i, --industry <NAME>   Industry used for suggestions (default: {DEFAULT_INDUSTRY})");
    println!("  -j, --json              Print the report as JSON");
    println!("      --no-advice         Skip content suggestions");
    println!("  -s, --save [PATH]       Save the text report to a .md file");
    println!("  -v, --version           Show version information");
    println!("  -h, --help              Show this help message");
    println!();
    println!("Environment:");
    println!("  GEMINI_API_KEY          Enables AI suggestions (templates are used otherwise)");
    println!("  RUST_LOG                Log filter (default: seolens=info)");
}

pub fn print_version() {
    println!("{APP_NAME} {VERSION}");
}

/// Everything produced for one URL
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub url: String,
    pub industry: String,
    pub page: PageData,
    pub report: ScoreReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Suggestions>,
}

/// Fetch, score, and (for low scores) ask for suggestions.
///
/// Never fails: fetch errors become the report's only issue, advisor errors
/// fall back to templates.
pub async fn analyze<P, A>(provider: &P, advisor: Option<&A>, options: &CliOptions) -> Analysis
where
    P: PageDataProvider,
    A: Advisor + Sync,
{
    let page = PageData::from(provider.fetch(&options.url).await);
    let report = score(&page);
    info!(url = %options.url, score = report.score, "scored page");

    let suggestions = match page.attributes() {
        Some(attrs) if options.advice && report.needs_advice() => {
            let request = AdviceRequest::new(&options.industry, attrs, &report.issues);
            Some(recommend(advisor, &request).await)
        }
        _ => None,
    };

    Analysis {
        url: page
            .attributes()
            .map(|attrs| attrs.url.clone())
            .unwrap_or_else(|| options.url.clone()),
        industry: options.industry.clone(),
        page,
        report,
        suggestions,
    }
}

const DIVIDER: &str = "─────────────────────────────────────────────────────────────";
const LABEL_WIDTH: usize = 16;

fn push_section_header(buf: &mut String, icon: &str, title: &str) {
    let _ = writeln!(buf, "{DIVIDER}");
    let _ = writeln!(buf, "{icon} {title}");
    let _ = writeln!(buf, "{DIVIDER}");
}

fn push_key_value(buf: &mut String, label: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    let _ = writeln!(buf, "• {:<width$} : {}", label, value, width = LABEL_WIDTH);
}

fn push_lines(buf: &mut String, lines: &[String]) {
    for line in lines {
        let _ = writeln!(buf, "  {line}");
    }
    let _ = writeln!(buf);
}

fn push_list(buf: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(buf, "{heading}:");
    for (index, item) in items.iter().enumerate() {
        let _ = writeln!(buf, "  {}. {item}", index + 1);
    }
    let _ = writeln!(buf);
}

/// Plain-text report with divider-framed sections
pub fn render_report(analysis: &Analysis) -> String {
    let report = &analysis.report;
    let mut output = String::new();

    push_section_header(
        &mut output,
        "📊",
        &format!("SEO Score: {}/100 ({})", report.score, grade(report.score)),
    );
    push_key_value(&mut output, "URL", &analysis.url);
    push_key_value(&mut output, "Industry", &analysis.industry);
    if let Some(attrs) = analysis.page.attributes() {
        push_key_value(&mut output, "Status", &attrs.status_code.to_string());
        push_key_value(&mut output, "Load Time", &format!("{:.2}s", attrs.load_time));
        push_key_value(&mut output, "Page Size", &format!("{:.1} KB", attrs.page_size_kb));
        push_key_value(&mut output, "Word Count", &attrs.word_count.to_string());
    }
    let _ = writeln!(&mut output);

    if analysis.page.attributes().is_some() {
        push_section_header(&mut output, "📈", "Category Breakdown");
        for category in Category::ALL {
            push_key_value(
                &mut output,
                category.label(),
                &format!(
                    "{}/{} ({}%)",
                    report.category_scores.get(category),
                    category.max_points(),
                    report.category_percentages.get(category)
                ),
            );
        }
        let _ = writeln!(&mut output);
    }

    if !report.strengths.is_empty() {
        push_section_header(
            &mut output,
            "💪",
            &format!("Strengths ({})", report.strengths.len()),
        );
        push_lines(&mut output, &report.strengths);
    }

    if !report.issues.is_empty() {
        push_section_header(
            &mut output,
            "🔧",
            &format!("Issues ({})", report.issues.len()),
        );
        push_lines(&mut output, &report.issues);
    }

    if let Some(suggestions) = analysis.suggestions.as_ref() {
        push_section_header(&mut output, "💡", "Suggestions");
        push_key_value(&mut output, "Title", &suggestions.optimized_title);
        push_key_value(
            &mut output,
            "Meta Description",
            &suggestions.optimized_meta_description,
        );
        push_key_value(&mut output, "H1", &suggestions.improved_h1);
        let _ = writeln!(&mut output);
        push_list(&mut output, "Content Outline", &suggestions.content_outline);
        push_list(&mut output, "Target Keywords", &suggestions.keywords);
        push_list(&mut output, "Blog Topics", &suggestions.blog_topics);
    }

    output
}

pub fn render_json(analysis: &Analysis) -> Result<String> {
    serde_json::to_string_pretty(analysis).context("failed to serialize report")
}

fn grade(score: u32) -> &'static str {
    match score {
        90.. => "excellent",
        70..=89 => "good",
        50..=69 => "needs work",
        _ => "poor",
    }
}

/// Write `contents` to the save target and return the final path.
pub fn save_output(base: &Path, url: &str, contents: &str) -> Result<PathBuf> {
    let output_path = build_output_path(base, normalize_page_url(url).ok().as_ref());
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory {}", parent.display()))?;
    }

    fs::write(&output_path, contents.as_bytes())
        .with_context(|| format!("failed to write output file {}", output_path.display()))?;

    Ok(output_path)
}

pub fn build_output_path(base: &Path, url: Option<&Url>) -> PathBuf {
    let has_md_extension = base
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));

    if has_md_extension {
        base.to_path_buf()
    } else {
        base.join(url.map_or_else(|| "report.md".to_string(), derive_output_filename))
    }
}

pub fn derive_output_filename(url: &Url) -> String {
    let host = url.host_str().unwrap_or("page");
    let mut path_component = url.path().trim_matches('/').replace('/', "_");
    if path_component.is_empty() {
        path_component = "index".to_string();
    }

    let mut parts = vec![sanitize_for_filename(host), sanitize_for_filename(&path_component)];

    if let Some(query) = url.query().filter(|q| !q.is_empty()) {
        parts.push(sanitize_for_filename(query));
    }

    format!("{}.md", parts.join("__"))
}

fn sanitize_for_filename(input: &str) -> String {
    input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
