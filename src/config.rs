//! Application configuration.
//!
//! Values are resolved with priority: config.toml > environment (.env) > default.

use serde::Deserialize;
use std::path::PathBuf;

use crate::paths;

// ==================== Server Configuration ====================

/// Default server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Default server port
pub const SERVER_PORT: u16 = 5001;

// ==================== Session Configuration ====================

/// Session lifetime in hours (1 week)
pub const SESSION_DURATION_HOURS: i64 = 24 * 7;

// ==================== Account Rules ====================

pub const MIN_USERNAME_LEN: usize = 3;

pub const MIN_PASSWORD_LEN: usize = 6;

// ==================== Practice Configuration ====================

/// Words drawn for a practice set when the caller does not pick any
pub const DEFAULT_PRACTICE_SIZE: usize = 5;

/// Which private words an anonymous caller sees
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnonymousVisibility {
    /// Every account's private words (historical behavior)
    #[default]
    AllPrivate,
    /// Only the shared dictionary
    SharedOnly,
}

impl AnonymousVisibility {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "all_private" => Some(Self::AllPrivate),
            "shared_only" => Some(Self::SharedOnly),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSettings {
    pub anonymous_visibility: AnonymousVisibility,
    pub practice_size: usize,
}

impl Default for WordSettings {
    fn default() -> Self {
        Self {
            anonymous_visibility: AnonymousVisibility::default(),
            practice_size: DEFAULT_PRACTICE_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_addr: String,
    pub server_port: u16,
    pub data_dir: PathBuf,
    pub words: WordSettings,
}

impl Settings {
    /// Get the full server bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_addr, self.server_port)
    }
}

// ==================== config.toml ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    server: Option<ServerConfig>,
    storage: Option<StorageConfig>,
    words: Option<WordsConfig>,
}

#[derive(Debug, Deserialize)]
struct ServerConfig {
    addr: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct StorageConfig {
    data_dir: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WordsConfig {
    anonymous_visibility: Option<AnonymousVisibility>,
    practice_size: Option<usize>,
}

/// Load settings from config.toml, the environment and defaults
pub fn load() -> Settings {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let file = std::fs::read_to_string("config.toml").ok();
    resolve(file.as_deref(), |key| std::env::var(key).ok())
}

/// Resolve settings from optional config.toml contents and an env lookup
pub fn resolve(config_toml: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Settings {
    let file = match config_toml.map(toml::from_str::<ConfigFile>) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            tracing::warn!("Ignoring malformed config.toml: {}", e);
            ConfigFile::default()
        }
        None => ConfigFile::default(),
    };

    let server_addr = file
        .server
        .as_ref()
        .and_then(|s| s.addr.clone())
        .or_else(|| env("SERVER_ADDR"))
        .unwrap_or_else(|| SERVER_ADDR.to_string());

    let server_port = file
        .server
        .as_ref()
        .and_then(|s| s.port)
        .or_else(|| env("PORT").and_then(|p| p.parse().ok()))
        .unwrap_or(SERVER_PORT);

    let data_dir = file
        .storage
        .and_then(|s| s.data_dir)
        .or_else(|| env("DATA_DIR"))
        .unwrap_or_else(|| paths::DEFAULT_DATA_DIR.to_string());

    let anonymous_visibility = file
        .words
        .as_ref()
        .and_then(|w| w.anonymous_visibility)
        .or_else(|| env("ANONYMOUS_VISIBILITY").and_then(|v| AnonymousVisibility::from_str(&v)))
        .unwrap_or_default();

    let practice_size = file
        .words
        .as_ref()
        .and_then(|w| w.practice_size)
        .or_else(|| env("PRACTICE_SIZE").and_then(|v| v.parse().ok()))
        .unwrap_or(DEFAULT_PRACTICE_SIZE);

    tracing::info!("Using data directory: {}", data_dir);

    Settings {
        server_addr,
        server_port,
        data_dir: PathBuf::from(data_dir),
        words: WordSettings {
            anonymous_visibility,
            practice_size,
        },
    }
}
