//! Configuration module for payplug-notify.
//!
//! Handles loading configuration from a TOML file and CLI arguments, and
//! turns the `[payplug]` section into a ready-to-use [`Session`].

pub mod file;

use crate::config::file::{FileConfig, PayPlugConfig, ServerConfig};
use payplug_sdk::{ApiConfig, Session};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("invalid payplug settings: {0}")]
    Session(#[from] payplug_sdk::Error),
}

/// Loaded configuration result containing all parts.
#[derive(Debug)]
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub payplug: PayPlugConfig,
}

impl LoadedConfig {
    /// Build the session used to verify notifications.
    pub fn build_session(&self) -> Result<Session, ConfigError> {
        let payplug = &self.payplug;

        let mut session = match &payplug.ca_bundle {
            Some(path) => Session::from_ca_file(&payplug.secret_key, path)?,
            None => Session::new(&payplug.secret_key),
        };
        if let Some(base_url) = &payplug.base_url {
            let api = ApiConfig::new(base_url).map_err(payplug_sdk::Error::from)?;
            session = session.with_api_config(api);
        }
        if let Some(version) = &payplug.api_version {
            session = session.with_api_version(version);
        }
        if let Some(secs) = payplug.timeout_secs {
            session = session.with_timeout(Duration::from_secs(secs));
        }
        Ok(session)
    }
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file
    /// 2. Apply CLI overrides
    /// 3. Validate the configuration
    /// 4. Resolve a relative `ca_bundle` against the config file's directory
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        let mut file_config: FileConfig = toml::from_str(&config_content)?;

        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }

        self.validate(&file_config)?;

        if let Some(ca_bundle) = &mut file_config.payplug.ca_bundle {
            if ca_bundle.is_relative() {
                if let Some(dir) = self.config_path.parent() {
                    *ca_bundle = dir.join(&*ca_bundle);
                }
            }
        }

        Ok(LoadedConfig {
            server: file_config.server,
            payplug: file_config.payplug,
        })
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        let payplug = &config.payplug;
        if payplug.secret_key.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "payplug.secret_key must not be empty".to_string(),
            ));
        }
        if payplug.timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError(
                "payplug.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if let Some(base_url) = &payplug.base_url {
            ApiConfig::new(base_url).map_err(|e| {
                ConfigError::ValidationError(format!("payplug.base_url is invalid: {e}"))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("payplug-notify-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("payplug-notify.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_applies_listen_override() {
        let path = write_config(
            "override",
            r#"
[server]
listen = "127.0.0.1:3000"

[payplug]
secret_key = "sk_test_abc"
"#,
        );
        let listen: SocketAddr = "127.0.0.1:9999".parse().unwrap();
        let loaded = ConfigLoader::new(&path, Some(listen)).load().unwrap();
        assert_eq!(loaded.server.listen, listen);
    }

    #[test]
    fn test_empty_secret_key_is_rejected() {
        let path = write_config(
            "empty-key",
            r#"
[payplug]
secret_key = "  "
"#,
        );
        let err = ConfigLoader::new(&path, None).load().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let path = write_config(
            "zero-timeout",
            r#"
[payplug]
secret_key = "sk_test_abc"
timeout_secs = 0
"#,
        );
        let err = ConfigLoader::new(&path, None).load().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_base_url_with_query_is_rejected() {
        let path = write_config(
            "base-url-query",
            r#"
[payplug]
secret_key = "sk_test_abc"
base_url = "http://127.0.0.1:4010/v1?tenant=a"
"#,
        );
        let err = ConfigLoader::new(&path, None).load().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = ConfigLoader::new("/nonexistent/payplug-notify.toml", None)
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_relative_ca_bundle_is_resolved_and_checked() {
        let path = write_config(
            "ca-bundle",
            r#"
[payplug]
secret_key = "sk_test_abc"
ca_bundle = "missing-cacert.pem"
"#,
        );
        let loaded = ConfigLoader::new(&path, None).load().unwrap();
        let ca_bundle = loaded.payplug.ca_bundle.clone().unwrap();
        assert!(ca_bundle.is_absolute());
        assert!(ca_bundle.ends_with("missing-cacert.pem"));

        let err = loaded.build_session().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Session(payplug_sdk::Error::Configuration(_))
        ));
    }

    #[test]
    fn test_build_session_applies_settings() {
        let path = write_config(
            "session",
            r#"
[payplug]
secret_key = "sk_test_abc"
api_version = "2019-08-06"
base_url = "http://127.0.0.1:4010/v1/"
timeout_secs = 5
"#,
        );
        let session = ConfigLoader::new(&path, None)
            .load()
            .unwrap()
            .build_session()
            .unwrap();
        assert_eq!(session.api_version(), Some("2019-08-06"));
        assert_eq!(
            session.api_config().base_url().as_str(),
            "http://127.0.0.1:4010/v1/"
        );
    }
}
