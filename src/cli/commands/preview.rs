use anyhow::Result;
use console::{Emoji, style};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::commands::extract::extract_report;
use crate::config::Config;
use crate::output;

static PAPER: Emoji<'_, '_> = Emoji("📄 ", "");
static BROWSER: Emoji<'_, '_> = Emoji("🌐 ", "");
static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK] ");
static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");

pub fn run(file: PathBuf, max_chars: Option<usize>, no_open: bool) -> Result<()> {
    println!();
    println!(
        "{}",
        style(" SkillGap - Cleaned Text Preview ").bold().reverse()
    );
    println!();

    let config = Config::load()?;
    let max_chars = max_chars.unwrap_or(config.preview.max_chars);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template(&format!("{}{{spinner:.green}} {{msg}}", PAPER))
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Extracting and cleaning text...");

    let report = extract_report(&file, &config);
    spinner.finish_and_clear();
    let report = report?;

    println!(
        "{}Loaded {} ({} characters, {} words)",
        CHECK,
        style(&report.source).green().bold(),
        style(report.characters).green().bold(),
        style(report.words).green().bold()
    );

    let html = output::render_preview_html(&report, max_chars);

    let stem = report.source.split('.').next().unwrap_or_default();
    let html_path = std::env::temp_dir().join(format!("skillgap_preview_{}.html", stem));

    let mut file = std::fs::File::create(&html_path)?;
    file.write_all(html.as_bytes())?;

    if !no_open {
        open_in_browser(&html_path);
        println!();
        println!("{}Preview opened in browser", BROWSER);
    }

    println!();
    println!(
        "{}File: {}",
        SPARKLE,
        style(html_path.display()).cyan().underlined()
    );

    Ok(())
}

fn open_in_browser(path: &std::path::Path) {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(path).spawn().ok();
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(path).spawn().ok();
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", path.to_str().unwrap_or("")])
            .spawn()
            .ok();
    }
}
