// Configuration module entry point
// Manages application configuration and runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, PathsConfig, PerformanceConfig, ServerConfig, SiteConfig};

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("WEFT"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("site.root_url", "http://127.0.0.1:8080/")?
            .set_default("site.fqdn", "127.0.0.1")?
            .set_default("site.title_prefix", "")?
            .set_default("site.title_suffix", "")?
            .set_default("site.auth_required", false)?
            .set_default("site.api_available", false)?
            .set_default("site.api_name", "api")?
            .set_default("site.login_handler", "login")?
            .set_default("paths.app_root", "app")?
            .set_default("paths.framework_view", "view")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::load_from("no-such-config-file").expect("defaults load");
        assert_eq!(config.site.api_name, "api");
        assert_eq!(config.site.login_handler, "login");
        assert!(!config.site.auth_required);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_path_helpers() {
        let config = Config::load_from("no-such-config-file").expect("defaults load");
        assert!(config.paths.protected_dir().ends_with("app/protected"));
        assert!(config.paths.public_dir().ends_with("app/public"));
        assert!(config.paths.view_root().ends_with("app"));
    }
}
