//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `RouteId` where a `BankEntryId` is expected.
//! Ships are identified by an external string (IMO number or fleet code), wrapped in `ShipId`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(RouteId, "Unique identifier for a ship-year route record.");
typed_id!(BankEntryId, "Unique identifier for a banking ledger entry.");

/// Longest accepted ship identifier.
pub const SHIP_ID_MAX_LEN: usize = 64;

/// Reasons a ship identifier is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShipIdError {
    /// Identifier is empty after trimming.
    #[error("ship id must not be empty")]
    Empty,
    /// Identifier exceeds [`SHIP_ID_MAX_LEN`].
    #[error("ship id must be at most {SHIP_ID_MAX_LEN} characters")]
    TooLong,
    /// Identifier contains control characters.
    #[error("ship id contains control characters")]
    InvalidCharacters,
}

/// Stable external ship identifier.
///
/// Always trimmed and non-empty. Ordering is plain string ordering, which the
/// pool allocator relies on for tie-breaks.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ShipId(String);

impl ShipId {
    /// Validates and wraps a ship identifier.
    ///
    /// # Errors
    ///
    /// Returns `ShipIdError` if the identifier is empty, too long, or contains
    /// control characters.
    pub fn parse(raw: &str) -> Result<Self, ShipIdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ShipIdError::Empty);
        }
        if trimmed.chars().count() > SHIP_ID_MAX_LEN {
            return Err(ShipIdError::TooLong);
        }
        if trimmed.chars().any(char::is_control) {
            return Err(ShipIdError::InvalidCharacters);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper, returning the identifier.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ShipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ShipId {
    type Err = ShipIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ShipId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ShipId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
