use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::{matcher::DEFAULT_PARALLEL_THRESHOLD, DEFAULT_TOP_K};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub directory: DirectorySettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Where candidate providers come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryKind {
    Static,
    Remote,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectorySettings {
    #[serde(default = "default_directory_kind")]
    pub kind: DirectoryKind,
    /// TOML file with `[[providers]]` tables, used by the static directory
    #[serde(default = "default_providers_path")]
    pub providers_path: String,
    /// Base URL of the remote provider directory
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    #[serde(default = "default_directory_timeout")]
    pub timeout_secs: u64,
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            kind: default_directory_kind(),
            providers_path: default_providers_path(),
            endpoint: None,
            api_key: None,
            timeout_secs: default_directory_timeout(),
        }
    }
}

fn default_directory_kind() -> DirectoryKind { DirectoryKind::Static }
fn default_providers_path() -> String { "config/providers.toml".to_string() }
fn default_directory_timeout() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_secs: default_cache_ttl(),
            capacity: default_cache_capacity(),
        }
    }
}

fn default_cache_enabled() -> bool { true }
fn default_cache_ttl() -> u64 { 60 }
fn default_cache_capacity() -> u64 { 256 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,
    #[serde(default = "default_max_top_k")]
    pub max_top_k: usize,
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
    /// Overall budget for one match call, including scoring
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Size of the rayon scoring pool; all cores when unset
    pub worker_threads: Option<usize>,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_top_k: default_top_k(),
            max_top_k: default_max_top_k(),
            parallel_threshold: default_parallel_threshold(),
            timeout_ms: default_timeout_ms(),
            worker_threads: None,
        }
    }
}

fn default_top_k() -> usize { DEFAULT_TOP_K }
fn default_max_top_k() -> usize { 100 }
fn default_parallel_threshold() -> usize { DEFAULT_PARALLEL_THRESHOLD }
fn default_timeout_ms() -> u64 { 2000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with AUDIT_MATCH)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., AUDIT_MATCH__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("AUDIT_MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
