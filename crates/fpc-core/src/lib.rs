//! # fpc-core
//!
//! Session handling and shared types for the FPC management API.
//!
//! This crate provides error handling, configuration, typed identifiers and
//! the session-aware HTTP client that every endpoint call is built on.
//!
//! ## Modules
//!
//! - [`error`] - Error types, error codes and conversions from library errors
//! - [`config`] - Endpoint and credential configuration
//! - [`client`] - HTTP tuning, login/logout, the request primitive and HTTP status mapping
//! - [`session`] - Credentials and session token storage
//! - [`ids`] - Strongly-typed resource identifiers

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod ids;
pub mod session;

// Re-export commonly used types
pub use client::{ClientConfig, SessionClient, SessionClientBuilder};
pub use config::FpcClientConfig;
pub use error::{Error, Result};
