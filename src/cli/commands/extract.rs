use anyhow::{Context, Result};
use console::{Emoji, style};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::normalize;
use crate::output::{self, ExtractionReport};
use crate::parser::{DocumentFormat, UploadedDocument};

static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
static PAPER: Emoji<'_, '_> = Emoji("📄 ", "");
static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK] ");
static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
static DISK: Emoji<'_, '_> = Emoji("💾 ", "");

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    format: OutputFormat,
    stdout: bool,
) -> Result<()> {
    let config = Config::load()?;

    if stdout {
        let report = extract_report(&file, &config)?;
        match format {
            OutputFormat::Text => println!("{}", report.text),
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?
            ),
        }
        return Ok(());
    }

    println!();
    println!(
        "{}",
        style(" SkillGap - Extract & Clean ").bold().reverse()
    );
    println!();
    println!("{}Source: {}", PAPER, style(file.display()).cyan());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template(&format!("{}{{spinner:.green}} {{msg}}", LOOKING_GLASS))
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Extracting and cleaning text...");

    let report = extract_report(&file, &config);
    spinner.finish_and_clear();
    let report = report?;

    println!(
        "{}File parsed successfully: {}",
        CHECK,
        style(&report.source).green().bold()
    );
    if report.text.is_empty() {
        println!(
            "{}{}",
            WARN,
            style(empty_text_notice(&report.source)).yellow()
        );
    }
    println!(
        "  {} Characters: {} {} Words: {}",
        style("•").cyan(),
        style(report.characters).green().bold(),
        style("•").cyan(),
        style(report.words).green().bold()
    );

    let target = match output {
        Some(path) => path,
        None => {
            let dir = config.output_dir(output_dir);
            let path = dir.join(&report.download_name);
            match format {
                OutputFormat::Text => path,
                OutputFormat::Json => path.with_extension("json"),
            }
        }
    };

    match format {
        OutputFormat::Text => output::write_text(&target, &report.text)?,
        OutputFormat::Json => output::write_json(&report, &target)?,
    }
    info!(path = %target.display(), %format, "cleaned text saved");

    println!();
    println!("{}Saved to {}", DISK, style(target.display()).cyan());
    println!();

    Ok(())
}

/// Read, extract and clean a document from disk.
///
/// Extraction errors surface unchanged so the user sees the one-line cause.
pub(crate) fn extract_report(file: &Path, config: &Config) -> Result<ExtractionReport> {
    let document = UploadedDocument::from_path(file)?;
    let raw = document.extract()?;
    let cleaned = normalize::clean(&raw);

    let is_pdf = matches!(
        DocumentFormat::from_name(&document.name),
        Ok(DocumentFormat::Pdf)
    );
    if cleaned.is_empty() && is_pdf {
        warn!(name = %document.name, "pdf yielded no extractable text on any page");
    }

    let download_name = output::download_name(&document.name, &config.output.prefix);
    Ok(ExtractionReport::new(&document.name, download_name, cleaned))
}

/// What to tell the user when a document produced no text. Only a PDF hints
/// at scanned pages; other formats had nothing to extract in the first place.
fn empty_text_notice(source: &str) -> &'static str {
    match DocumentFormat::from_name(source) {
        Ok(DocumentFormat::Pdf) => "No extractable text found (scanned or image-only document?)",
        _ => "No text found in document",
    }
}
