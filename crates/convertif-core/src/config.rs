//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::units::ConversionCategory;

/// Top-level convertif configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertifConfig {
    /// Output directory for grading reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Category for sheets that don't declare one.
    #[serde(default)]
    pub default_category: Option<ConversionCategory>,
    /// Default report format: text, json, markdown, all.
    #[serde(default = "default_format")]
    pub format: String,
    /// Exit with a failure status when any answer is incorrect.
    #[serde(default)]
    pub fail_on_incorrect: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./convertif-results")
}
fn default_format() -> String {
    "text".to_string()
}

impl Default for ConvertifConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            default_category: None,
            format: default_format(),
            fail_on_incorrect: false,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied through as-is and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `convertif.toml` in the current directory
/// 2. `~/.config/convertif/config.toml`
///
/// Environment variable override: `CONVERTIF_OUTPUT_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<ConvertifConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("convertif.toml");
        if local.exists() {
            Some(local)
        } else {
            config_dir()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ConvertifConfig::default(),
    };

    if let Ok(dir) = std::env::var("CONVERTIF_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }

    Ok(config)
}

/// Parse a config document, resolving `${VAR}` references in `output_dir`.
pub fn parse_config(content: &str) -> Result<ConvertifConfig> {
    let mut config: ConvertifConfig = toml::from_str(content)?;
    config.output_dir = PathBuf::from(resolve_env_vars(&config.output_dir.to_string_lossy()));
    Ok(config)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("convertif"))
}
