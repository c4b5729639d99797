//! # fpc-client
//!
//! Client for the FPC management API.
//!
//! [`FpcClient`] logs in once and then exposes every endpoint as an async
//! method. Identifiers are typed (see [`fpc_core::ids`]) and responses are
//! decoded into the models in [`models`], or returned as raw JSON where the
//! API does not fix a shape.
//!
//! ## Example
//!
//! ```no_run
//! use fpc_client::{FpcClient, FpcClientConfig};
//!
//! # async fn example() -> fpc_client::Result<()> {
//! let config = FpcClientConfig::for_host("fpc.example.com", "admin", "secret")?;
//! let client = FpcClient::new(config)?;
//! client.login().await?;
//!
//! for customer in client.list_customers().await? {
//!     println!("{:?} {:?}", customer.customer_id, customer.customer_name);
//! }
//!
//! client.logout().await?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod client;
pub mod models;

mod customers;
mod fortimanagers;
mod sites;
mod system;

pub use client::{FpcClient, FpcClientBuilder};
pub use fpc_core::config::FpcClientConfig;
pub use fpc_core::ids;
pub use fpc_core::Error;

/// Result alias used by every endpoint method.
pub type Result<T> = fpc_core::Result<T>;
