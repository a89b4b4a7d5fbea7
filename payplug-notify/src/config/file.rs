//! TOML file configuration structures.
//!
//! These structs directly map to the `payplug-notify.toml` file format.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub payplug: PayPlugConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// Credentials and transport settings used to verify notifications.
#[derive(Clone, Deserialize)]
pub struct PayPlugConfig {
    /// Secret API key (`sk_test_...` or `sk_live_...`).
    pub secret_key: String,
    /// Pinned API version, e.g. `2019-08-06`.
    pub api_version: Option<String>,
    /// PEM bundle replacing the system root certificates.
    pub ca_bundle: Option<PathBuf>,
    /// Versioned API root. Defaults to production.
    pub base_url: Option<String>,
    /// Per-request deadline when verifying a notification.
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for PayPlugConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayPlugConfig")
            .field("secret_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("ca_bundle", &self.ca_bundle)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"

[payplug]
secret_key = "sk_test_abc"
api_version = "2019-08-06"
ca_bundle = "certs/cacert.pem"
base_url = "https://api.payplug.com/v1"
timeout_secs = 30
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 3000);
        assert_eq!(config.payplug.secret_key, "sk_test_abc");
        assert_eq!(config.payplug.api_version.as_deref(), Some("2019-08-06"));
        assert_eq!(
            config.payplug.ca_bundle,
            Some(PathBuf::from("certs/cacert.pem"))
        );
        assert_eq!(config.payplug.timeout_secs, Some(30));
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
[payplug]
secret_key = "sk_test_abc"
"#,
        )
        .unwrap();
        assert_eq!(config.server.listen, default_listen_addr());
        assert!(config.payplug.api_version.is_none());
        assert!(config.payplug.base_url.is_none());
    }

    #[test]
    fn test_missing_payplug_section_is_rejected() {
        let result: Result<FileConfig, _> = toml::from_str(
            r#"
[server]
listen = "127.0.0.1:3000"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_hides_secret_key() {
        let config: FileConfig = toml::from_str(
            r#"
[payplug]
secret_key = "sk_live_do_not_print"
"#,
        )
        .unwrap();
        assert!(!format!("{config:?}").contains("sk_live_do_not_print"));
    }
}
