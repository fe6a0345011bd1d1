use anyhow::{Context, Result};
use console::{Emoji, style};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::normalize::{self, TextStats};
use crate::output;

static CLIPBOARD: Emoji<'_, '_> = Emoji("📋 ", "");
static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK] ");
static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
static DISK: Emoji<'_, '_> = Emoji("💾 ", "");

pub fn run(
    text: Option<String>,
    output: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    stdout: bool,
) -> Result<()> {
    let config = Config::load()?;

    let text = match text {
        Some(text) => text,
        None => read_stdin(!stdout)?,
    };

    // Blank input produces nothing, same as leaving the text box empty
    if text.trim().is_empty() {
        if !stdout {
            println!(
                "{}{}",
                WARN,
                style("Nothing to clean. Paste a job description to continue.").yellow()
            );
        }
        return Ok(());
    }

    let cleaned = normalize::clean(&text);

    if stdout {
        println!("{}", cleaned);
        return Ok(());
    }

    let stats = TextStats::of(&cleaned);
    let target = output.unwrap_or_else(|| {
        config
            .output_dir(output_dir)
            .join(&config.output.paste_file_name)
    });
    output::write_text(&target, &cleaned)?;
    info!(path = %target.display(), "cleaned pasted text saved");

    println!();
    println!("{}Cleaned job description", CHECK);
    println!(
        "  {} Characters: {} {} Words: {}",
        style("•").cyan(),
        style(stats.characters).green().bold(),
        style("•").cyan(),
        style(stats.words).green().bold()
    );
    println!();
    println!("{}Saved to {}", DISK, style(target.display()).cyan());
    println!();

    Ok(())
}

fn read_stdin(show_prompt: bool) -> Result<String> {
    let mut stdin = io::stdin();
    if show_prompt && stdin.is_terminal() {
        println!(
            "{}Paste the job description below, then press {} to finish:",
            CLIPBOARD,
            style("Ctrl-D").yellow()
        );
        println!();
    }

    let mut buffer = String::new();
    stdin
        .read_to_string(&mut buffer)
        .context("Failed to read text from stdin")?;
    Ok(buffer)
}
