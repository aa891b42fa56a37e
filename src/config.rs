//! Transport configuration.
//!
//! The original v1 client read credentials and flags from ambient global
//! state; here they are an explicit value the caller injects per client.
//! Passwords are held as [`SecretString`] so they never leak through
//! `Debug` output or logs.

use secrecy::SecretString;
use serde::Deserialize;

/// Session credentials for the v1 API.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
    pub proxy_username: String,
    pub proxy_password: SecretString,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        proxy_username: impl Into<String>,
        proxy_password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
            proxy_username: proxy_username.into(),
            proxy_password: SecretString::from(proxy_password.into()),
        }
    }
}

/// Configuration for the v1 transport.
#[derive(Debug, Clone, Deserialize)]
pub struct TransportConfig {
    pub credentials: Credentials,
    /// When true, the proxy basic-auth value is sent in the standard
    /// `authorization` header. Off by default: that header is left free
    /// for the caller's own reverse-proxy layer.
    #[serde(default)]
    pub proxy_authorization: bool,
}

impl TransportConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            proxy_authorization: false,
        }
    }

    pub fn with_proxy_authorization(mut self, enabled: bool) -> Self {
        self.proxy_authorization = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_passwords() {
        let creds = Credentials::new("alice", "secret", "proxy-alice", "proxy-secret");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("secret"), "password leaked: {debug}");
        assert!(debug.contains("alice"));
    }

    #[test]
    fn proxy_authorization_defaults_off() {
        let config: TransportConfig = serde_json::from_value(serde_json::json!({
            "credentials": {
                "username": "alice",
                "password": "pw",
                "proxy_username": "p-alice",
                "proxy_password": "p-pw"
            }
        }))
        .unwrap();
        assert!(!config.proxy_authorization);
    }
}
