//! Configuration structures for FPC clients.
//!
//! [`FpcClientConfig`] names the API endpoint and the credentials used at
//! login. It can be built in code or deserialized from any serde format the
//! caller already uses.

use crate::session::deserialize_secret;
use crate::Error;
use secrecy::SecretString;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Path prefix under which the API is served on an FPC host.
pub const API_PATH_PREFIX: &str = "/fpc/api";

/// Configuration for an FPC client instance.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FpcClientConfig {
    /// API base URL (e.g. `https://fpc.example.com/fpc/api`)
    #[validate(url)]
    pub base_url: String,

    /// Login user name
    #[validate(length(min = 1))]
    pub username: String,

    /// Login password
    #[serde(deserialize_with = "deserialize_secret")]
    pub password: SecretString,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Optional path to custom CA certificate
    #[serde(default)]
    pub tls_ca_cert: Option<PathBuf>,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

// FPC appliances ship with self-signed certificates.
const fn default_tls_verify() -> bool {
    false
}

const fn default_request_timeout_secs() -> u64 {
    30
}

impl FpcClientConfig {
    /// Create a new client configuration from a full base URL.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The API base URL, including the `/fpc/api` prefix
    /// * `username` - Login user name
    /// * `password` - Login password
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or validation fails.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, Error> {
        let config = Self {
            base_url: base_url.into(),
            username: username.into(),
            password: SecretString::from(password.into()),
            tls_verify: default_tls_verify(),
            tls_ca_cert: None,
            request_timeout_secs: default_request_timeout_secs(),
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Create a configuration for the standard API location on `hostname`,
    /// `https://<hostname>/fpc/api`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting URL is invalid or validation fails.
    pub fn for_host(
        hostname: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, Error> {
        Self::new(
            format!("https://{hostname}{API_PATH_PREFIX}"),
            username,
            password,
        )
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set custom CA certificate path.
    #[must_use]
    pub fn with_ca_cert(mut self, path: PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parse the base URL into the form used for joining endpoint paths.
    ///
    /// The returned URL always ends with `/` so that relative paths land
    /// under the API prefix rather than replacing its last segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed or cannot carry a path.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::ConfigError(format!("Invalid base URL: {e}")))?;

        if url.cannot_be_a_base() {
            return Err(Error::ConfigError(format!(
                "Base URL `{}` cannot carry endpoint paths",
                self.base_url
            )));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }
}
