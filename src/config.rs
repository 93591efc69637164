use crate::error::{ProxyError, Result};
use serde::Deserialize;
use std::env;
use std::fs;

/// Default NIM API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://integrate.api.nvidia.com/v1";

const DEFAULT_PORT: u16 = 10000;

#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    pub server: ServerConfig,
    pub nim: NimConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NimConfig {
    /// Bearer credential for the NIM API. May be empty, in which case
    /// upstream rejections (401) pass through to the caller verbatim.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ProxyConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse::<u16>()
            .map_err(|e| ProxyError::ConfigError(format!("Invalid PORT value: {}", e)))?;

        let api_key = env::var("NVIDIA_API_KEY").unwrap_or_default();

        let base_url = env::var("NIM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(ProxyConfig {
            server: ServerConfig { port },
            nim: NimConfig { api_key, base_url },
        })
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ProxyError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let mut config: ProxyConfig = toml::from_str(&contents)
            .map_err(|e| ProxyError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        // Allow environment variables to override file config
        if let Ok(api_key) = env::var("NVIDIA_API_KEY") {
            config.nim.api_key = api_key;
        }

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.nim.base_url.is_empty() {
            return Err(ProxyError::ConfigError("Base URL is empty".to_string()));
        }

        if self.nim.base_url.ends_with('/') {
            return Err(ProxyError::ConfigError(
                "Base URL must not end with a slash".to_string(),
            ));
        }

        Ok(())
    }

    /// Socket address the listener binds to.
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let valid_config = ProxyConfig {
            server: ServerConfig { port: 10000 },
            nim: NimConfig {
                api_key: "test-key".to_string(),
                base_url: DEFAULT_BASE_URL.to_string(),
            },
        };

        assert!(valid_config.validate().is_ok());

        let invalid_config = ProxyConfig {
            server: ServerConfig { port: 10000 },
            nim: NimConfig {
                api_key: "test-key".to_string(),
                base_url: String::new(),
            },
        };

        assert!(invalid_config.validate().is_err());

        let trailing_slash = ProxyConfig {
            server: ServerConfig { port: 10000 },
            nim: NimConfig {
                api_key: "test-key".to_string(),
                base_url: "https://integrate.api.nvidia.com/v1/".to_string(),
            },
        };

        assert!(trailing_slash.validate().is_err());
    }

    #[test]
    fn test_empty_api_key_is_valid() {
        // The proxy still forwards without a credential; the upstream's own
        // 401 passes through.
        let config = ProxyConfig {
            server: ServerConfig { port: 10000 },
            nim: NimConfig {
                api_key: String::new(),
                base_url: DEFAULT_BASE_URL.to_string(),
            },
        };

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_defaults() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [server]

            [nim]
            api_key = "file-key"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 10000);
        assert_eq!(config.nim.api_key, "file-key");
        assert_eq!(config.nim.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_listen_addr() {
        let config = ProxyConfig {
            server: ServerConfig { port: 8080 },
            nim: NimConfig {
                api_key: String::new(),
                base_url: DEFAULT_BASE_URL.to_string(),
            },
        };

        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
    }
}
