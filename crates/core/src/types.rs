//! Core identifier and enum types
//!
//! This module defines the foundational types:
//! - SiteId: tenant identifier, the first segment of every index key
//! - RecordId: listing or category identifier, unique per site
//! - DocKind: which index family (listing or category) a structure belongs to
//! - ListingStatus: publication state of a listing
//!
//! Identifiers are validated on construction so that no identifier can
//! contain the key separator and reach into another site's namespace.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key segment separator used by [`crate::KeySpace`]
pub const KEY_SEPARATOR: char = ':';

/// Check that `raw` can be embedded in a store key as one segment
///
/// `kind` names the value in the error message.
pub fn validate_segment(kind: &str, raw: &str) -> Result<()> {
    if raw.is_empty() {
        return Err(Error::InvalidKey(format!("{} must not be empty", kind)));
    }
    if raw.contains(KEY_SEPARATOR) || raw.chars().any(char::is_whitespace) {
        return Err(Error::InvalidKey(format!(
            "{} '{}' contains a separator or whitespace",
            kind, raw
        )));
    }
    Ok(())
}

macro_rules! key_segment_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap an identifier
            ///
            /// # Errors
            /// Returns `Error::InvalidKey` if the identifier is empty or
            /// contains `:` or whitespace.
            pub fn new(raw: impl Into<String>) -> Result<Self> {
                let raw = raw.into();
                validate_segment($label, &raw)?;
                Ok(Self(raw))
            }

            /// Borrow the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(raw: String) -> Result<Self> {
                Self::new(raw)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

key_segment_id!(
    /// Tenant identifier
    ///
    /// Every index key starts with the owning site's id, so two sites never
    /// share a posting, facet, term-set or summary structure.
    SiteId,
    "site id"
);

key_segment_id!(
    /// Listing or category identifier, unique within a site
    RecordId,
    "record id"
);

/// Index family a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    /// Directory listings
    Listing,
    /// Listing categories
    Category,
}

impl DocKind {
    /// Key segment for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            DocKind::Listing => "listing",
            DocKind::Category => "category",
        }
    }
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publication state of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    /// Not yet visible to visitors
    Draft,
    /// Live on the site
    #[default]
    Published,
    /// Retired but retained
    Archived,
}

impl ListingStatus {
    /// Facet value for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Draft => "draft",
            ListingStatus::Published => "published",
            ListingStatus::Archived => "archived",
        }
    }
}

impl FromStr for ListingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(ListingStatus::Draft),
            "published" => Ok(ListingStatus::Published),
            "archived" => Ok(ListingStatus::Archived),
            other => Err(Error::InvalidKey(format!("unknown listing status '{}'", other))),
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
