//! Item identifiers: the application namespace and the tags derived
//! from it.
//!
//! The namespace is supplied by the caller (a bundle or package
//! identifier, for example) rather than resolved from ambient process
//! state, so tag construction stays deterministic and testable.

use std::fmt;

use crate::errors::{CredStoreError, Result};

/// Application identity under which item tags are minted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace(String);

impl Namespace {
    /// Validate and wrap an application identity.
    ///
    /// An empty or whitespace-only identity cannot namespace anything
    /// and is rejected with `InvalidNamespace`.
    pub fn new(identity: impl Into<String>) -> Result<Self> {
        let identity = identity.into();
        if identity.trim().is_empty() {
            return Err(CredStoreError::InvalidNamespace(identity));
        }
        Ok(Self(identity))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully-qualified identifier for one stored item.
///
/// Derived as `"{namespace}.keys.{key}"` so every application addresses
/// a stable, collision-free slice of the backend's tag space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag(String);

impl Tag {
    /// Derive the tag for `key` within `namespace`.
    pub fn new(namespace: &Namespace, key: &str) -> Self {
        Self(format!("{}.keys.{}", namespace.as_str(), key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Encode the tag into the byte form stored by the backend.
    ///
    /// The backend's attribute encoding cannot represent an interior NUL
    /// byte (or an empty tag), so those fail with `TagFailed` instead of
    /// producing a tag that cannot round-trip.
    pub(crate) fn encode(&self) -> Result<Vec<u8>> {
        if self.0.is_empty() || self.0.bytes().any(|b| b == 0) {
            return Err(CredStoreError::TagFailed);
        }
        Ok(self.0.as_bytes().to_vec())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
