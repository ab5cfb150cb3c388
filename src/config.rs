//! TOML configuration.
//!
//! Every component receives the pieces of [`Config`] it needs at construction;
//! nothing reads global state. See `config/pdfscout.example.toml` for a full
//! example.

use anyhow::{bail, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::download::validate_filename;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Endpoints of the remote file-hosting API.
#[derive(Debug, Deserialize, Clone)]
pub struct RemoteConfig {
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,
    /// Base download endpoint; the file identifier is appended as `?file_id=`.
    #[serde(default = "default_download_url")]
    pub download_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            catalog_url: default_catalog_url(),
            download_url: default_download_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_catalog_url() -> String {
    "https://hamed78.pythonanywhere.com/list_files".to_string()
}
fn default_download_url() -> String {
    "https://hamed78.pythonanywhere.com/download_file".to_string()
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_connect_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
    /// Used by `POST /download` when the request omits `filename`.
    #[serde(default = "default_filename")]
    pub default_filename: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
            default_filename: default_filename(),
        }
    }
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("downloads")
}
fn default_filename() -> String {
    "downloaded_file.pdf".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            include_globs: default_include_globs(),
            snippet_chars: default_snippet_chars(),
        }
    }
}

fn default_include_globs() -> Vec<String> {
    vec!["*.pdf".to_string()]
}
fn default_snippet_chars() -> usize {
    500
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

impl Config {
    /// All-defaults configuration, used when no config file is present.
    pub fn minimal() -> Self {
        Self::default()
    }
}

impl SearchConfig {
    pub fn build_globset(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.include_globs {
            builder.add(
                Glob::new(pattern)
                    .with_context(|| format!("invalid search.include_globs pattern: {}", pattern))?,
            );
        }
        Ok(builder.build()?)
    }
}

/// Reads and validates a config file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// Loads `path` if it exists, otherwise falls back to [`Config::minimal`].
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::info!(
            path = %path.display(),
            "config file not found, using defaults"
        );
        Ok(Config::minimal())
    }
}

pub fn validate(config: &Config) -> Result<()> {
    check_url("remote.catalog_url", &config.remote.catalog_url)?;
    check_url("remote.download_url", &config.remote.download_url)?;

    if config.remote.timeout_secs == 0 {
        bail!("remote.timeout_secs must be > 0");
    }
    if config.remote.connect_timeout_secs == 0 {
        bail!("remote.connect_timeout_secs must be > 0");
    }

    if config.storage.download_dir.as_os_str().is_empty() {
        bail!("storage.download_dir must not be empty");
    }
    if let Err(e) = validate_filename(&config.storage.default_filename) {
        bail!("storage.default_filename is invalid: {}", e);
    }

    if config.search.snippet_chars == 0 {
        bail!("search.snippet_chars must be > 0");
    }
    config.search.build_globset()?;

    if config.server.bind.trim().is_empty() {
        bail!("server.bind must not be empty");
    }

    Ok(())
}

fn check_url(field: &str, value: &str) -> Result<()> {
    let url = reqwest::Url::parse(value).with_context(|| format!("{} is not a valid URL", field))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => bail!("{} must use http or https, got '{}'", field, other),
    }
}
