// File: src/config.rs
// Purpose: Configuration parsing from regform.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "regform.toml";

/// First path segments already routed by the app
const RESERVED_PREFIXES: [&str; 2] = ["static", "submit"];

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub upload: UploadConfig,

    #[serde(default)]
    pub form: FormConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

/// Photo upload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Directory stored photos are written to (default: "uploads")
    #[serde(default = "default_upload_dir")]
    pub dir: PathBuf,

    /// URL prefix the upload directory is served under (default: "uploads")
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,

    /// Largest accepted photo in bytes (default: 2 MiB)
    #[serde(default = "default_max_photo_bytes")]
    pub max_photo_bytes: u64,

    /// Largest accepted request body in bytes (default: 8 MiB)
    ///
    /// Kept above `max_photo_bytes` so an oversize photo still reaches the
    /// size check instead of failing the whole request.
    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,
}

/// Registration form configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Directory with css/, js/ and the wasm pkg/ (default: "static")
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Options offered in the course select
    #[serde(default = "default_courses")]
    pub courses: Vec<String>,
}

// Default values
fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_public_prefix() -> String {
    "uploads".to_string()
}

fn default_max_photo_bytes() -> u64 {
    2 * 1024 * 1024
}

fn default_max_request_bytes() -> usize {
    8 * 1024 * 1024
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_courses() -> Vec<String> {
    [
        "Computer Science",
        "Information Technology",
        "Electronics",
        "Mechanical",
        "Civil",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            public_prefix: default_public_prefix(),
            max_photo_bytes: default_max_photo_bytes(),
            max_request_bytes: default_max_request_bytes(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
            courses: default_courses(),
        }
    }
}

impl UploadConfig {
    /// `public_prefix` without leading or trailing slashes
    pub fn url_prefix(&self) -> &str {
        self.public_prefix.trim_matches('/')
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        config.check()?;

        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.upload.url_prefix().is_empty() {
            anyhow::bail!("upload.public_prefix must not be empty");
        }
        let first_segment = self.upload.url_prefix().split('/').next().unwrap_or("");
        if RESERVED_PREFIXES.contains(&first_segment) {
            anyhow::bail!(
                "upload.public_prefix {:?} collides with the /{} route",
                self.upload.public_prefix,
                first_segment
            );
        }
        if self.upload.max_request_bytes as u64 <= self.upload.max_photo_bytes {
            anyhow::bail!(
                "upload.max_request_bytes ({}) must exceed upload.max_photo_bytes ({})",
                self.upload.max_request_bytes,
                self.upload.max_photo_bytes
            );
        }
        Ok(())
    }
}
