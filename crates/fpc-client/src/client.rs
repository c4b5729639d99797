//! Asynchronous FPC client.
//!
//! [`FpcClient`] wraps a [`SessionClient`]. The endpoint methods live in the
//! resource modules of this crate, each as an `impl FpcClient` block.

use crate::Result;
use fpc_core::client::{ClientConfig, SessionClient, SessionClientBuilder};
use fpc_core::config::FpcClientConfig;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

const USER_AGENT: &str = concat!("fpc-client/", env!("CARGO_PKG_VERSION"));

/// Builder for [`FpcClient`].
#[derive(Debug, Clone)]
pub struct FpcClientBuilder {
    inner: SessionClientBuilder,
}

impl FpcClientBuilder {
    /// Create a builder from the client configuration.
    #[must_use]
    pub fn new(config: FpcClientConfig) -> Self {
        Self {
            inner: SessionClientBuilder::new(config).with_user_agent(USER_AGENT),
        }
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.inner = self.inner.with_http_config(config);
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.inner = self.inner.with_user_agent(user_agent);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<FpcClient> {
        let inner = self.inner.build()?;
        Ok(FpcClient { inner })
    }
}

/// Asynchronous client for the FPC management API.
///
/// Call [`login`](Self::login) before any endpoint method; without a session
/// they fail with [`fpc_core::Error::NotAuthenticated`].
#[derive(Clone)]
pub struct FpcClient {
    inner: SessionClient,
}

impl FpcClient {
    /// Construct a client directly from the configuration.
    ///
    /// # Errors
    ///
    /// See [`FpcClientBuilder::build`].
    pub fn new(config: FpcClientConfig) -> Result<Self> {
        FpcClientBuilder::new(config).build()
    }

    /// Start a builder pre-populated with the provided configuration.
    #[must_use]
    pub fn builder(config: FpcClientConfig) -> FpcClientBuilder {
        FpcClientBuilder::new(config)
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    /// Access the underlying session client, e.g. for endpoints this crate
    /// does not wrap.
    #[must_use]
    pub fn session(&self) -> &SessionClient {
        &self.inner
    }

    /// Returns true once a session token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.is_authenticated()
    }

    /// Log in with the configured credentials.
    ///
    /// # Errors
    ///
    /// See [`SessionClient::login`].
    pub async fn login(&self) -> Result<()> {
        self.inner.login().await
    }

    /// Invalidate the session and return the raw status code.
    ///
    /// # Errors
    ///
    /// See [`SessionClient::logout`].
    pub async fn logout(&self) -> Result<StatusCode> {
        self.inner.logout().await
    }

    pub(crate) async fn get_json<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        self.inner.send_json::<(), R>(Method::GET, path, None).await
    }

    pub(crate) async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.inner.send_json(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn post_status<B>(&self, path: &str, body: Option<&B>) -> Result<StatusCode>
    where
        B: Serialize + ?Sized,
    {
        self.inner.send_status(Method::POST, path, body).await
    }
}
