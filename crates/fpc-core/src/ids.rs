//! Strongly-typed identifiers for FPC resources.
//!
//! The API addresses every resource by a numeric id. Wrapping each kind in
//! its own type stops a site id from being passed where a customer id is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Macro to generate strongly-typed numeric identifier types.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $doc:expr) => {
        $(#[$meta])*
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier from its raw value.
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw numeric value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Parses an identifier from a string.
            ///
            /// # Errors
            ///
            /// Returns an error if the string is not an unsigned integer.
            pub fn parse_str(input: &str) -> Result<Self> {
                input
                    .trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| Error::InvalidRequest(format!(
                        "invalid {}: `{input}`",
                        stringify!($name)
                    )))
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse_str(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(CustomerId, "Customer identifier");
id_type!(SiteId, "Customer site identifier");
id_type!(WifiNetworkId, "Wi-Fi network identifier");
id_type!(FortiManagerId, "FortiManager identifier");
id_type!(RoleId, "Role identifier");
id_type!(UserId, "Customer user identifier");
id_type!(CountryId, "Country identifier");
id_type!(AdomAssignmentId, "Customer ADOM assignment identifier");
