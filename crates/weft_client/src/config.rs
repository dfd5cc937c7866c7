//! Client configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use weft_error::ConfigError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Prefix of environment variables overriding file settings (`WEFT_BASE_URL`, ...).
pub const ENV_PREFIX: &str = "WEFT";

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Connection settings for the search service.
///
/// # Examples
///
/// ```
/// use weft_client::ClientConfigBuilder;
///
/// let config = ClientConfigBuilder::default()
///     .base_url("http://localhost:8080")
///     .build()
///     .expect("valid config");
/// assert_eq!(*config.timeout_secs(), 30);
/// assert!(config.token().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ClientConfig {
    /// Base URL of the search service (e.g. "https://api.example.com/v1")
    base_url: String,
    /// Bearer token sent with every request
    #[serde(default)]
    #[builder(default)]
    token: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    #[builder(default = "DEFAULT_TIMEOUT_SECS")]
    timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from an optional TOML file, then `WEFT_*`
    /// environment variables, which take precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if no
    /// `base_url` is configured.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_base_url(path, None)
    }

    /// Like [`ClientConfig::load`], with `base_url` taking precedence over
    /// both the file and the environment when given.
    ///
    /// The other settings still come from the file and environment, and a
    /// file that cannot be read or parsed is still an error.
    pub fn load_with_base_url(
        path: Option<&Path>,
        base_url: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let load_error =
            |e: config::ConfigError| ConfigError::new(format!("Failed to load client configuration: {}", e));

        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX));
        if let Some(url) = base_url {
            builder = builder.set_override("base_url", url).map_err(load_error)?;
        }

        let config: Self = builder
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(load_error)?;

        if config.base_url.trim().is_empty() {
            return Err(ConfigError::invalid_setting("base_url", "must not be empty"));
        }

        tracing::debug!(
            base_url = %config.base_url,
            has_token = config.token.is_some(),
            timeout_secs = config.timeout_secs,
            "Loaded client configuration"
        );
        Ok(config)
    }

    /// Endpoint the search requests are posted to.
    pub fn search_url(&self) -> String {
        format!("{}/search", self.base_url.trim_end_matches('/'))
    }
}
