//! Client configuration and backend factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::http::{HttpBackend, DEFAULT_RESULT_PATH, DEFAULT_START_PATH};

/// Environment variable that overrides `base_url`.
pub const BASE_URL_ENV: &str = "TYPEQUIZ_BASE_URL";

/// Top-level typequiz configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Root URL of the quiz server.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the question batch endpoint.
    #[serde(default = "default_start_path")]
    pub start_path: String,
    /// Path of the result endpoint.
    #[serde(default = "default_result_path")]
    pub result_path: String,
    /// Optional client-side request timeout. Unset means the transport default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}
fn default_start_path() -> String {
    DEFAULT_START_PATH.to_string()
}
fn default_result_path() -> String {
    DEFAULT_RESULT_PATH.to_string()
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            start_path: default_start_path(),
            result_path: default_result_path(),
            request_timeout_secs: None,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied verbatim and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `typequiz.toml` in the current directory
/// 2. `~/.config/typequiz/config.toml`
///
/// `TYPEQUIZ_BASE_URL` overrides the configured base URL.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("typequiz.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            toml::from_str::<QuizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizConfig::default(),
    };

    if let Ok(url) = std::env::var(BASE_URL_ENV) {
        if !url.trim().is_empty() {
            config.base_url = url;
        }
    }

    config.base_url = resolve_env_vars(&config.base_url);
    config.start_path = resolve_env_vars(&config.start_path);
    config.result_path = resolve_env_vars(&config.result_path);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("typequiz"))
}

/// Create the HTTP backend described by `config`.
pub fn create_backend(config: &QuizConfig) -> Result<HttpBackend> {
    anyhow::ensure!(
        config.base_url.starts_with("http://") || config.base_url.starts_with("https://"),
        "base_url must start with http:// or https://, got '{}'",
        config.base_url
    );
    HttpBackend::from_config(config)
}
