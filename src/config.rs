//! Configuration management for rsed
//!
//! rsed stores configuration in ~/.rsed/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// rsed configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print results to stdout when no file is written
    #[serde(default = "default_print")]
    pub print: Option<bool>,

    /// Show diff reports for replaced lines on stderr
    #[serde(default = "default_show_diff")]
    pub show_diff: Option<bool>,

    /// Diff coloring: "auto", "always" or "never"
    #[serde(default = "default_color")]
    pub color: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            print: Some(true),
            show_diff: Some(true),
            color: Some("auto".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write a debug log to ~/.rsed/rsed.log
    #[serde(default = "default_debug")]
    pub debug: Option<bool>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { debug: Some(false) }
    }
}

// Default functions for serde
fn default_print() -> Option<bool> { Some(true) }
fn default_show_diff() -> Option<bool> { Some(true) }
fn default_color() -> Option<String> { Some("auto".to_string()) }
fn default_debug() -> Option<bool> { Some(false) }

impl Config {
    pub fn print(&self) -> bool {
        self.output.print.unwrap_or(true)
    }

    pub fn show_diff(&self) -> bool {
        self.output.show_diff.unwrap_or(true)
    }

    pub fn debug(&self) -> bool {
        self.logging.debug.unwrap_or(false)
    }

    /// Resolve the color mode, `auto_detected` deciding the "auto" case
    pub fn use_color(&self, auto_detected: bool) -> bool {
        match self.output.color.as_deref() {
            Some("always") => true,
            Some("never") => false,
            _ => auto_detected,
        }
    }
}

/// Get the rsed home directory (~/.rsed)
pub fn rsed_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home_dir.join(".rsed"))
}

/// Get the configuration file path
pub fn config_file_path() -> Result<PathBuf> {
    let config_dir = rsed_dir()?;
    fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create config directory: {}", config_dir.display()))?;

    Ok(config_dir.join("config.toml"))
}

/// Get the default configuration file content with comments
fn get_default_config_content() -> &'static str {
    r#"# rsed Configuration File
#
# Values set here control how results and diffs are shown.

[output]
# Print results to stdout when not writing to a file (default: true)
# Set to false to only see diff reports and write confirmations.
print = true

# Show a diff for every line changed by --replace, on stderr (default: true)
show_diff = true

# Diff coloring: "auto" (default), "always" or "never"
# "auto" disables color when NO_COLOR is set or stderr is not a terminal.
color = "auto"

[logging]
# Write a debug log to ~/.rsed/rsed.log (default: false)
# The RSED_DEBUG environment variable enables it for a single run.
debug = false
"#
}

/// Save the default commented configuration file
fn save_default_config(config_path: &Path) -> Result<()> {
    fs::write(config_path, get_default_config_content())
        .with_context(|| format!("Failed to write default config file: {}", config_path.display()))?;

    Ok(())
}

/// Load configuration from file, creating default if needed
///
/// If the config file doesn't exist, creates it with defaults and returns them.
/// If the config file is not valid TOML, recreates it with defaults.
/// Invalid values are reported as an error and the file is left alone.
pub fn load_config() -> Result<Config> {
    load_config_from(&config_file_path()?)
}

fn load_config_from(config_path: &Path) -> Result<Config> {
    if !config_path.exists() {
        save_default_config(config_path)?;
    }

    let config_str = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    let config: Config = match toml::from_str(&config_str) {
        Ok(config) => config,
        Err(_) => {
            // Config is malformed, recreate with defaults
            save_default_config(config_path)?;
            return Ok(Config::default());
        }
    };

    validate_config(&config)
        .with_context(|| format!("Invalid config file: {}", config_path.display()))?;
    Ok(config)
}

/// Validate configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(mode) = &config.output.color {
        if !["auto", "always", "never"].contains(&mode.as_str()) {
            anyhow::bail!("Invalid color: {} (must be 'auto', 'always', or 'never')", mode);
        }
    }

    Ok(())
}
