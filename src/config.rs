use anyhow::{Context, Result, bail};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;
use tracing::debug;

/// `${NAME}` or `$NAME`
static ENV_VAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)")
        .expect("valid env var regex")
});

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory cleaned text files are written to
    #[serde(default = "default_output_dir")]
    pub dir: String,
    /// Prepended to the original file's stem to name its download
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// File name for cleaned pasted text
    #[serde(default = "default_paste_file_name")]
    pub paste_file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_prefix() -> String {
    "parsed_".to_string()
}

fn default_paste_file_name() -> String {
    "cleaned_job_description.txt".to_string()
}

fn default_max_chars() -> usize {
    6000
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            prefix: default_prefix(),
            paste_file_name: default_paste_file_name(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
        }
    }
}

impl Config {
    /// Get the configuration directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("skillgap");
        Ok(config_dir)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, falling back to defaults when none exists
    pub fn load() -> Result<Self> {
        let config_path = match Self::config_path() {
            Ok(path) => path,
            Err(e) => {
                debug!("no config directory ({e}), using defaults");
                return Ok(Self::default());
            }
        };

        if !config_path.exists() {
            debug!(path = %config_path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file at {}", config_path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.expand_env_vars()?;
        Ok(config)
    }

    /// Expand environment variable references in path-like values
    fn expand_env_vars(&mut self) -> Result<()> {
        self.output.dir = expand_env_vars_in(&self.output.dir, |name| std::env::var(name).ok())
            .context("Invalid output.dir")?;
        Ok(())
    }

    /// Output directory, with an explicit override taking precedence
    pub fn output_dir(&self, override_dir: Option<PathBuf>) -> PathBuf {
        override_dir.unwrap_or_else(|| PathBuf::from(&self.output.dir))
    }
}

/// Replace every `${VAR}` / `$VAR` in `value` using `lookup`.
///
/// References can appear anywhere (`$HOME/resumes`). An unset variable is an
/// error rather than an empty string, so a typo never turns into `/resumes`.
fn expand_env_vars_in(value: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    let mut missing = None;
    let expanded = ENV_VAR_RE.replace_all(value, |caps: &Captures| {
        let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        lookup(name).unwrap_or_else(|| {
            missing.get_or_insert_with(|| name.to_string());
            String::new()
        })
    });

    if let Some(name) = missing {
        bail!("environment variable {name} is not set");
    }
    Ok(expanded.into_owned())
}
