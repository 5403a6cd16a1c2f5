//! Environment configuration for building a [`Client`].

use std::fmt;
use std::time::Duration;

use gitprovider::{ClientOptions, GitProviderResult};
use thiserror::Error;
use tracing::debug;

use crate::client::{Client, DEFAULT_DOMAIN, new_client};

pub const ENV_TOKEN: &str = "GITEA_TOKEN";
pub const ENV_DOMAIN: &str = "GITEA_DOMAIN";
pub const ENV_DESTRUCTIVE: &str = "GITEA_ENABLE_DESTRUCTIVE_API_CALLS";
pub const ENV_TIMEOUT_SECS: &str = "GITEA_HTTP_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GITEA_TOKEN is required")]
    MissingToken,

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Settings for a Gitea client, usually read from the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct GiteaConfig {
    /// Personal access token.
    pub token: String,
    /// Gitea domain, e.g. `gitea.com` or `http://localhost:3000`.
    pub domain: String,
    pub enable_destructive_api_calls: bool,
    pub timeout_secs: u64,
}

impl GiteaConfig {
    /// Loads `.env` if present, then reads the `GITEA_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the settings through `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(ENV_TOKEN)
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let domain = lookup(ENV_DOMAIN)
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DOMAIN.into());

        let enable_destructive_api_calls = match lookup(ENV_DESTRUCTIVE) {
            Some(value) => parse_bool(ENV_DESTRUCTIVE, &value)?,
            None => false,
        };

        let timeout_secs = match lookup(ENV_TIMEOUT_SECS) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: ENV_TIMEOUT_SECS,
                    value,
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let config = Self {
            token,
            domain,
            enable_destructive_api_calls,
            timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: ENV_TIMEOUT_SECS,
                value: "0".into(),
            });
        }
        Ok(())
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions::new()
            .with_domain(self.domain.clone())
            .with_destructive_api_calls(self.enable_destructive_api_calls)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    pub fn build_client(&self) -> GitProviderResult<Client> {
        new_client(&self.token, self.client_options())
    }
}

impl fmt::Debug for GiteaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GiteaConfig")
            .field("token", &"<redacted>")
            .field("domain", &self.domain)
            .field(
                "enable_destructive_api_calls",
                &self.enable_destructive_api_calls,
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitprovider::prelude::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn token_is_required() {
        assert_eq!(
            GiteaConfig::from_lookup(lookup(&[])).unwrap_err(),
            ConfigError::MissingToken
        );
        assert_eq!(
            GiteaConfig::from_lookup(lookup(&[(ENV_TOKEN, "  ")])).unwrap_err(),
            ConfigError::MissingToken
        );
    }

    #[test]
    fn defaults_apply() {
        let config = GiteaConfig::from_lookup(lookup(&[(ENV_TOKEN, "secret")])).unwrap();
        assert_eq!(config.domain, DEFAULT_DOMAIN);
        assert!(!config.enable_destructive_api_calls);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn reads_all_variables() {
        let config = GiteaConfig::from_lookup(lookup(&[
            (ENV_TOKEN, "secret"),
            (ENV_DOMAIN, "git.example.com"),
            (ENV_DESTRUCTIVE, "Yes"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();

        assert_eq!(config.domain, "git.example.com");
        assert!(config.enable_destructive_api_calls);

        let options = config.client_options();
        assert_eq!(options.domain.as_deref(), Some("git.example.com"));
        assert!(options.destructive_api_calls_enabled());
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn rejects_malformed_values() {
        let err = GiteaConfig::from_lookup(lookup(&[
            (ENV_TOKEN, "secret"),
            (ENV_DESTRUCTIVE, "maybe"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: ENV_DESTRUCTIVE, .. }));

        let err = GiteaConfig::from_lookup(lookup(&[
            (ENV_TOKEN, "secret"),
            (ENV_TIMEOUT_SECS, "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: ENV_TIMEOUT_SECS, .. }));
    }

    #[test]
    fn debug_output_hides_token() {
        let config = GiteaConfig::from_lookup(lookup(&[(ENV_TOKEN, "top-secret")])).unwrap();
        assert!(!format!("{config:?}").contains("top-secret"));
    }

    #[test]
    fn builds_client_for_configured_domain() {
        let config = GiteaConfig::from_lookup(lookup(&[
            (ENV_TOKEN, "secret"),
            (ENV_DOMAIN, "http://localhost:3000"),
        ]))
        .unwrap();
        let client = config.build_client().unwrap();
        assert_eq!(client.supported_domain(), "http://localhost:3000");
    }
}
