mod cli;
mod config;
mod error;
mod normalize;
mod output;
mod parser;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing - only show warnings by default, use RUST_LOG=debug for more detail
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => {
            cli::commands::init::run(force)?;
        }
        Commands::Extract {
            file,
            output,
            output_dir,
            format,
            stdout,
        } => {
            cli::commands::extract::run(file, output, output_dir, format, stdout)?;
        }
        Commands::Paste {
            text,
            output,
            output_dir,
            stdout,
        } => {
            cli::commands::paste::run(text, output, output_dir, stdout)?;
        }
        Commands::Preview {
            file,
            max_chars,
            no_open,
        } => {
            cli::commands::preview::run(file, max_chars, no_open)?;
        }
    }

    Ok(())
}
