//! Error types for FPC API operations.
//!
//! Every fallible call in this workspace returns [`Result`]. Network failures
//! keep the text of the underlying error so callers can report it.

use thiserror::Error;

/// Main error type for FPC API operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The API host could not be reached
    #[error("Error connecting to the API: {0}")]
    ConnectionFailed(String),

    /// Operation timed out
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Request failed for a reason not covered by the other variants
    #[error("Unknown request error: {0}")]
    RequestFailed(String),

    /// Login was rejected or the session was refused
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// An authenticated call was attempted without a session token
    #[error("Not authenticated: call login() first")]
    NotAuthenticated,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request with details
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Conflict error
    #[error("Conflict: {0}")]
    Conflict(String),

    /// API is unavailable or returned a server error
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Failed to parse an API response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Specialized result type for FPC API operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConnectionFailed(_) => "CONNECTION_FAILED",
            Self::Timeout(_) => "TIMEOUT",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::RequestFailed(_) => "REQUEST_FAILED",
            Self::AuthenticationFailed(_) => "AUTHENTICATION_FAILED",
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Conflict(_) => "CONFLICT",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::ParseError(_) => "PARSE_ERROR",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if this error should be logged as a serious error.
    #[must_use]
    pub const fn should_log(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::Timeout(_)
                | Self::RequestFailed(_)
                | Self::InternalError(_)
                | Self::ConfigError(_)
        )
    }

    /// Returns true if the error came from the network layer rather than from
    /// an HTTP status or a local check.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout(_) | Self::HttpError(_) | Self::RequestFailed(_)
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else if err.is_status() || err.is_request() || err.is_redirect() {
            Self::HttpError(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}
