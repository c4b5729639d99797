//! Session credentials and token storage.
//!
//! A session starts empty. [`SessionState::set`] stores the token returned by
//! the login handshake and every clone of the owning client sees it.

use crate::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::{Arc, RwLock};

/// Header carrying the session token on authenticated requests.
pub const SESSION_HEADER: &str = "fpc-sid";

/// Login endpoint path.
pub const LOGIN_PATH: &str = "login";

/// Logout endpoint path.
pub const LOGOUT_PATH: &str = "logout";

/// Credentials exchanged for a session token at login.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    /// Create credentials from a user name and password.
    #[must_use]
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// Login user name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Login password.
    #[must_use]
    pub const fn password(&self) -> &SecretString {
        &self.password
    }

    pub(crate) fn login_request(&self) -> LoginRequest<'_> {
        LoginRequest {
            user: &self.username,
            password: self.password.expose_secret(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub(crate) user: &'a str,
    pub(crate) password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(rename = "fpc-sid")]
    pub(crate) session_id: Option<String>,
}

/// Opaque token issued at login.
#[derive(Debug, Clone)]
pub struct SessionToken(SecretString);

impl SessionToken {
    /// Wrap a raw session identifier.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Expose the raw token for use in a request header.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

/// Shared, in-memory session state.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    token: Arc<RwLock<Option<SessionToken>>>,
}

impl SessionState {
    /// Create an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the token returned by login, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the session lock is poisoned.
    pub fn set(&self, token: SessionToken) -> Result<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| Error::InternalError("session lock poisoned".to_string()))?;
        *guard = Some(token);
        Ok(())
    }

    /// Drop the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the session lock is poisoned.
    pub fn clear(&self) -> Result<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| Error::InternalError("session lock poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }

    /// Return a copy of the current token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the session lock is poisoned.
    pub fn token(&self) -> Result<Option<SessionToken>> {
        self.token
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| Error::InternalError("session lock poisoned".to_string()))
    }

    /// Returns true if a token is held.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.token.read().map(|guard| guard.is_some()).unwrap_or(false)
    }
}

/// Serialize a secret as a plain string.
///
/// For request payloads that must carry a password, e.g.
/// `#[serde(serialize_with = "fpc_core::session::serialize_secret")]`.
///
/// # Errors
///
/// Propagates the serializer's error.
pub fn serialize_secret<S>(
    secret: &SecretString,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}

/// Deserialize a plain string into a secret.
///
/// # Errors
///
/// Fails if the value is not a string.
pub fn deserialize_secret<'de, D>(deserializer: D) -> std::result::Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

/// Deserialize an optional string into an optional secret.
///
/// Use together with `#[serde(default)]` so absent fields become `None`.
///
/// # Errors
///
/// Fails if the value is neither a string nor null.
pub fn deserialize_optional_secret<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|value| value.map(SecretString::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_payload() {
        let credentials = Credentials::new("admin", SecretString::from("secret".to_string()));
        let body = serde_json::to_value(credentials.login_request()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"user": "admin", "password": "secret"})
        );
    }

    #[test]
    fn test_login_response_parsing() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"fpc-sid": "abc123", "message": "ok"}"#).unwrap();
        assert_eq!(response.session_id.as_deref(), Some("abc123"));

        let response: LoginResponse = serde_json::from_str(r#"{"message": "denied"}"#).unwrap();
        assert!(response.session_id.is_none());
    }

    #[test]
    fn test_session_state_lifecycle() {
        let state = SessionState::new();
        assert!(!state.is_active());
        assert!(state.token().unwrap().is_none());

        state.set(SessionToken::new("abc123")).unwrap();
        assert!(state.is_active());
        assert_eq!(state.token().unwrap().unwrap().expose(), "abc123");

        state.clear().unwrap();
        assert!(!state.is_active());
    }

    #[test]
    fn test_session_state_shared_between_clones() {
        let state = SessionState::new();
        let clone = state.clone();
        state.set(SessionToken::new("shared")).unwrap();
        assert!(clone.is_active());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let token = SessionToken::new("abc123");
        assert!(!format!("{token:?}").contains("abc123"));

        let credentials = Credentials::new("admin", SecretString::from("hunter2".to_string()));
        let debug = format!("{credentials:?}");
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_deserialize_optional_secret() {
        #[derive(Deserialize)]
        struct Stored {
            #[serde(default, deserialize_with = "deserialize_optional_secret")]
            password: Option<SecretString>,
        }

        let stored: Stored = serde_json::from_str(r#"{"password": "pa55"}"#).unwrap();
        assert_eq!(stored.password.unwrap().expose_secret(), "pa55");

        let stored: Stored = serde_json::from_str(r#"{"password": null}"#).unwrap();
        assert!(stored.password.is_none());

        let stored: Stored = serde_json::from_str("{}").unwrap();
        assert!(stored.password.is_none());
    }

    #[test]
    fn test_serialize_secret() {
        #[derive(Serialize)]
        struct Payload {
            #[serde(serialize_with = "serialize_secret")]
            password: SecretString,
        }

        let payload = Payload {
            password: SecretString::from("pa55".to_string()),
        };
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"password":"pa55"}"#
        );
    }
}
