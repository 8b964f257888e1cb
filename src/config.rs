use crate::error::{ProxyError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The KiriminAja international API root all requests are forwarded to.
pub const DEFAULT_BASE_URL: &str = "https://kiriminaja.com/intl-api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_port() -> u16 {
    3000
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProxyConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ProxyError::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Search standard locations for a config file, falling back to the
    /// built-in defaults when none exists. The proxy has a fixed upstream
    /// and no credentials, so running without a config file is the normal
    /// case.
    /// Priority: CLI arg > CWD > XDG config > home dir > defaults
    pub fn find_and_load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::load(path);
        }

        for candidate in config_search_paths() {
            if candidate.exists() {
                tracing::info!(path = %candidate.display(), "Loading config");
                return Self::load(&candidate);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Timeout applied to every outbound call via the shared HTTP client.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.timeout_secs)
    }
}

fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // CWD
    paths.push(PathBuf::from("kiriminaja-proxy.toml"));

    // XDG / platform config dir
    if cfg!(target_os = "macos") {
        if let Some(home) = dirs_path() {
            paths.push(
                home.join("Library")
                    .join("Application Support")
                    .join("kiriminaja-proxy")
                    .join("config.toml"),
            );
        }
    } else {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(
                PathBuf::from(xdg)
                    .join("kiriminaja-proxy")
                    .join("config.toml"),
            );
        }
        if let Some(home) = dirs_path() {
            paths.push(
                home.join(".config")
                    .join("kiriminaja-proxy")
                    .join("config.toml"),
            );
        }
    }

    // Home directory fallback
    if let Some(home) = dirs_path() {
        paths.push(home.join(".kiriminaja-proxy.toml"));
    }

    paths
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(
            f,
            r#"
port = 8080

[upstream]
base_url = "http://localhost:9999/intl-api"
timeout_secs = 3
"#
        )
        .unwrap();

        let config = ProxyConfig::load(f.path()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.upstream.base_url, "http://localhost:9999/intl-api");
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "port = 4000").unwrap();

        let config = ProxyConfig::load(f.path()).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.upstream.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.upstream.timeout_secs, 15);
    }

    #[test]
    fn test_defaults() {
        let config = ProxyConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.upstream.base_url, "https://kiriminaja.com/intl-api");
        assert_eq!(config.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let err = ProxyConfig::find_and_load(Some(Path::new("/nonexistent/proxy.toml")))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
