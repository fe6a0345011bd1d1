pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "skillgap")]
#[command(author = "SkillGap Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract and clean text from resumes and job descriptions", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration file
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long, default_value = "false")]
        force: bool,
    },

    /// Extract and clean the text of a PDF, DOCX or TXT document
    #[command(long_about = "Extract and clean the text of a PDF, DOCX or TXT document.\n\n\
        The format is chosen from the file suffix. PDF text is read page by page,\n\
        DOCX paragraph text is read from the document body, and TXT files are\n\
        decoded as UTF-8. All whitespace runs are collapsed to single spaces.\n\n\
        The cleaned text is saved as parsed_<name>.txt in the output directory\n\
        unless --output or --stdout is given.")]
    Extract {
        /// Document to extract (.pdf, .docx, .txt)
        #[arg(required = true)]
        file: PathBuf,

        /// Write the result to this path instead of the output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for generated files
        #[arg(long, env = "SKILLGAP_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Print only the result to stdout and write no file
        #[arg(long, default_value = "false")]
        stdout: bool,
    },

    /// Clean pasted text such as a job description
    Paste {
        /// Text to clean (read from stdin when omitted)
        #[arg(short, long)]
        text: Option<String>,

        /// Write the result to this path instead of the output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for generated files
        #[arg(long, env = "SKILLGAP_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// Print only the cleaned text to stdout and write no file
        #[arg(long, default_value = "false")]
        stdout: bool,
    },

    /// Render an HTML preview of a document's cleaned text
    Preview {
        /// Document to preview (.pdf, .docx, .txt)
        #[arg(required = true)]
        file: PathBuf,

        /// Maximum characters shown in the preview
        #[arg(long)]
        max_chars: Option<usize>,

        /// Do not open the preview in a browser
        #[arg(long, default_value = "false")]
        no_open: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
