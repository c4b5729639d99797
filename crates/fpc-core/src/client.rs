//! HTTP client configuration and the session-aware request primitive.
//!
//! [`SessionClient`] owns the connection pool, the credentials and the
//! session token. Every endpoint call in the workspace goes through
//! [`SessionClient::request`].

use crate::config::FpcClientConfig;
use crate::session::{
    Credentials, LoginResponse, SessionState, SessionToken, LOGIN_PATH, LOGOUT_PATH,
    SESSION_HEADER,
};
use crate::{Error, Result};
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{Client, ClientBuilder, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;
use validator::Validate;

const USER_AGENT: &str = concat!("fpc-core/", env!("CARGO_PKG_VERSION"));

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

// Connection pool settings

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// HTTP client configuration.
///
/// Configures timeouts, connection pooling and compression for the
/// underlying `reqwest` client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// TCP connect timeout
    pub connect_timeout: Duration,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Enable response compression
    pub enable_compression: bool,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_compression: true,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`SessionClient`].
#[derive(Debug, Clone)]
pub struct SessionClientBuilder {
    config: FpcClientConfig,
    http_config: ClientConfig,
    user_agent: String,
}

impl SessionClientBuilder {
    /// Create a new builder from a [`FpcClientConfig`].
    #[must_use]
    pub fn new(config: FpcClientConfig) -> Self {
        Self {
            config,
            http_config: ClientConfig::new(),
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Override the HTTP client configuration used when building the client.
    ///
    /// The request timeout always comes from [`FpcClientConfig`].
    #[must_use]
    pub fn with_http_config(mut self, http_config: ClientConfig) -> Self {
        self.http_config = http_config;
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Finalise the builder and create the [`SessionClient`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the CA certificate
    /// cannot be loaded, or the HTTP client cannot be constructed.
    pub fn build(self) -> Result<SessionClient> {
        self.config.validate()?;
        let base_url = self.config.parse_base_url()?;

        let mut http_config = self.http_config;
        http_config.timeout = self.config.timeout();

        let mut builder = ClientBuilder::new()
            .user_agent(self.user_agent)
            .timeout(http_config.timeout)
            .connect_timeout(http_config.connect_timeout)
            .pool_idle_timeout(http_config.pool_idle_timeout)
            .pool_max_idle_per_host(http_config.pool_max_idle_per_host)
            .gzip(http_config.enable_compression)
            .cookie_store(true);

        if !self.config.tls_verify {
            warn!("TLS verification disabled for FPC client");
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ca_cert) = &self.config.tls_ca_cert {
            debug!("loading FPC CA certificate from {}", ca_cert.display());
            let bytes = std::fs::read(ca_cert).map_err(|err| {
                Error::ConfigError(format!(
                    "Failed to read FPC CA certificate {}: {err}",
                    ca_cert.display()
                ))
            })?;
            let cert = reqwest::Certificate::from_pem(&bytes)
                .map_err(|err| Error::ConfigError(format!("Invalid FPC CA certificate: {err}")))?;
            builder = builder.add_root_certificate(cert);
        }

        let http = builder.build().map_err(|err| {
            Error::ConfigError(format!("Failed to build FPC HTTP client: {err}"))
        })?;

        Ok(SessionClient {
            http,
            base_url,
            credentials: Credentials::new(self.config.username, self.config.password),
            session: SessionState::new(),
        })
    }
}

/// Session-aware HTTP client for the FPC API.
///
/// Clones share the connection pool and the session token, so a single
/// [`login`](Self::login) authenticates all of them.
#[derive(Clone)]
pub struct SessionClient {
    http: Client,
    base_url: Url,
    credentials: Credentials,
    session: SessionState,
}

impl SessionClient {
    /// Construct a client directly from the configuration.
    ///
    /// # Errors
    ///
    /// See [`SessionClientBuilder::build`].
    pub fn new(config: FpcClientConfig) -> Result<Self> {
        SessionClientBuilder::new(config).build()
    }

    /// Start a builder pre-populated with the provided configuration.
    #[must_use]
    pub fn builder(config: FpcClientConfig) -> SessionClientBuilder {
        SessionClientBuilder::new(config)
    }

    /// Return the base URL, always ending in `/`.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Return the login user name.
    #[must_use]
    pub fn username(&self) -> &str {
        self.credentials.username()
    }

    /// Returns true once [`login`](Self::login) has stored a session token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_active()
    }

    /// Exchange the configured credentials for a session token.
    ///
    /// Sends `{"user", "password"}` to `/login` and stores the `fpc-sid`
    /// value from the response body. Subsequent requests carry it in the
    /// `fpc-sid` header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthenticationFailed`] if the API rejects the
    /// credentials or its response carries no session id (including a body
    /// that is not JSON), and a network error variant if the API cannot be
    /// reached.
    pub async fn login(&self) -> Result<()> {
        info!(user = %self.credentials.username(), "logging in to FPC");

        let body = self.credentials.login_request();
        let response = self
            .dispatch(Method::POST, LOGIN_PATH, Some(&body), None)
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response_text(response).await;
            warn!(%status, "FPC login rejected");
            return Err(Error::AuthenticationFailed(format!(
                "login returned {status}: {message}"
            )));
        }

        let bytes = response.bytes().await?;
        let login: LoginResponse = serde_json::from_slice(&bytes).map_err(|err| {
            Error::AuthenticationFailed(format!("login response is not valid JSON: {err}"))
        })?;

        let session_id = login
            .session_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                Error::AuthenticationFailed("login response did not include fpc-sid".to_string())
            })?;

        self.session.set(SessionToken::new(session_id))?;
        info!("FPC session established");
        Ok(())
    }

    /// Invalidate the session on the server.
    ///
    /// Returns the raw status code. The local token is dropped only when the
    /// server answers with a success status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] without a session, or a network
    /// error variant if the request cannot be sent.
    pub async fn logout(&self) -> Result<StatusCode> {
        let response = self.request::<()>(Method::POST, LOGOUT_PATH, None).await?;
        let status = response.status();

        if status.is_success() {
            self.session.clear()?;
            info!("FPC session closed");
        } else {
            warn!(%status, "FPC logout not accepted");
        }

        Ok(status)
    }

    /// Send an authenticated request and return the raw response.
    ///
    /// `path` is resolved under the base URL, with or without a leading `/`.
    /// A body, when given, is sent as JSON. The status code is not checked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] if no session token is held (no
    /// request is sent), or a network error variant on transport failure.
    pub async fn request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let token = self.session.token()?.ok_or(Error::NotAuthenticated)?;
        self.dispatch(method, path, body, Some(&token)).await
    }

    /// Send an authenticated request and decode a JSON response.
    ///
    /// # Errors
    ///
    /// As [`request`](Self::request), plus a status-mapped error for non-2xx
    /// responses and [`Error::ParseError`] for bodies that do not decode.
    pub async fn send_json<B, R>(&self, method: Method, path: &str, body: Option<&B>) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = error_for_status(self.request(method, path, body).await?).await?;
        let bytes = response.bytes().await?;

        serde_json::from_slice::<R>(&bytes).map_err(|err| {
            Error::ParseError(format!("Failed to parse response for `{path}`: {err}"))
        })
    }

    /// Send an authenticated request and return its success status code.
    ///
    /// # Errors
    ///
    /// As [`request`](Self::request), plus a status-mapped error for non-2xx
    /// responses.
    pub async fn send_status<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<StatusCode>
    where
        B: Serialize + ?Sized,
    {
        let response = error_for_status(self.request(method, path, body).await?).await?;
        Ok(response.status())
    }

    /// Resolve an endpoint path against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if the path cannot be joined.
    pub fn endpoint_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| Error::InvalidEndpoint(format!("Invalid FPC path `{path}`: {err}")))
    }

    async fn dispatch<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&SessionToken>,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint_url(path)?;
        debug!(%method, %url, "sending FPC request");

        let mut request = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json");

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(token.expose()).map_err(|_| {
                Error::InvalidRequest("session token is not a valid header value".to_string())
            })?;
            value.set_sensitive(true);
            request = request.header(SESSION_HEADER, value);
        }

        if let Some(payload) = body {
            request = request.json(payload);
        }

        request.send().await.map_err(|err| {
            let error = Error::from(err);
            if error.should_log() {
                warn!(path, %error, "FPC request failed");
            }
            error
        })
    }
}

/// Map a non-success HTTP status to the matching [`Error`] variant.
#[must_use]
pub fn map_status_to_error(status: StatusCode, text: String) -> Error {
    match status {
        StatusCode::NOT_FOUND => Error::NotFound(text),
        StatusCode::BAD_REQUEST => Error::BadRequest(text),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Error::AuthenticationFailed(format!("FPC rejected the session: {text}"))
        }
        StatusCode::CONFLICT => Error::Conflict(text),
        StatusCode::TOO_MANY_REQUESTS
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => {
            Error::ServiceUnavailable(format!("FPC temporarily unavailable: {text}"))
        }
        status if status.is_server_error() => {
            Error::ServiceUnavailable(format!("FPC server error {status}: {text}"))
        }
        _ => Error::HttpError(format!("FPC error {status}: {text}")),
    }
}

async fn error_for_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response_text(response).await;
    Err(map_status_to_error(status, message))
}

async fn response_text(response: Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string())
}
