// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub paths: PathsConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Site configuration - identity and routing policy of the hosted application
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Root URL injected as the base-href and for `{RootURL$}`
    pub root_url: String,
    /// Fully-qualified domain name for `{MyFQDN$}`
    pub fqdn: String,
    /// Inserted directly after `<title>`
    pub title_prefix: String,
    /// Inserted directly before `</title>`
    pub title_suffix: String,
    /// Whether the auth gate is active
    pub auth_required: bool,
    /// Whether the API entry segment dispatches into the API subsystem
    pub api_available: bool,
    /// First path segment reserved for the API subsystem
    pub api_name: String,
    /// Handler id resolved in the framework namespace for the login flow
    pub login_handler: String,
}

/// Filesystem layout of the hosted application and the shared framework views
#[derive(Debug, Deserialize, Clone)]
pub struct PathsConfig {
    /// Application directory holding `template/`, `protected/` and `public/`
    pub app_root: String,
    /// Shared framework view directory (templates and resources)
    pub framework_view: String,
}

impl PathsConfig {
    /// Base directory for template and `{Bind$...}` resource lookups
    pub fn view_root(&self) -> PathBuf {
        PathBuf::from(&self.app_root)
    }

    pub fn protected_dir(&self) -> PathBuf {
        PathBuf::from(&self.app_root).join("protected")
    }

    pub fn public_dir(&self) -> PathBuf {
        PathBuf::from(&self.app_root).join("public")
    }

    pub fn framework_view_dir(&self) -> PathBuf {
        PathBuf::from(&self.framework_view)
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
}
