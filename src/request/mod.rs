//! Backend-neutral attribute requests.
//!
//! A [`Request`] is a sparse map from attribute key to typed value.
//! Sparse means absent-is-absent: an empty string, an unset policy, or
//! an off flag is never inserted, so the backend only ever sees
//! attributes that carry information.  The same shape doubles as the
//! attribute map a backend returns for a matched item.
//!
//! Requests are built fresh for every operation and never cached.  Byte
//! attributes (the payload and the tag) are wiped when a request is
//! dropped.

mod build;

pub use build::{build_add_request, build_match_all_request, build_match_request};

use std::collections::BTreeMap;

use zeroize::Zeroize;

use crate::item::StorageClass;
use crate::settings::Accessibility;

/// Attribute keys a request or result item may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttrKey {
    /// Storage bucket the request targets.
    Class,
    /// Fully-qualified item tag, as bytes.
    ApplicationTag,
    /// Opaque payload bytes.
    ValueData,
    /// Account (username) attribute.
    Account,
    /// Service or server attribute.
    Server,
    /// Human-readable item label.
    Label,
    /// Accessibility policy token.
    Accessible,
    /// Cross-device synchronization flag.
    Synchronizable,
    /// Hidden-from-listings flag.
    Invisible,
    /// How many items a match may return.
    MatchLimit,
    /// Ask the backend to return item attributes.
    ReturnAttributes,
    /// Ask the backend to return payload data.
    ReturnData,
}

/// A typed attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Str(String),
    Bytes(Vec<u8>),
    Bool(bool),
    Class(StorageClass),
    Access(Accessibility),
    Limit(MatchLimit),
}

/// How many items a match request may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchLimit {
    One,
    All,
}

/// A sparse attribute map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Request {
    attrs: BTreeMap<AttrKey, AttrValue>,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute, returning the updated request.
    pub fn with(mut self, key: AttrKey, value: AttrValue) -> Self {
        self.attrs.insert(key, value);
        self
    }

    /// Insert a string attribute only when it is non-empty.
    pub fn with_nonempty_str(self, key: AttrKey, value: &str) -> Self {
        if value.is_empty() {
            self
        } else {
            self.with(key, AttrValue::Str(value.to_string()))
        }
    }

    /// Insert a boolean attribute only when the flag is on.
    pub fn with_flag(self, key: AttrKey, set: bool) -> Self {
        if set {
            self.with(key, AttrValue::Bool(true))
        } else {
            self
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn get(&self, key: AttrKey) -> Option<&AttrValue> {
        self.attrs.get(&key)
    }

    pub fn contains(&self, key: AttrKey) -> bool {
        self.attrs.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AttrKey, &AttrValue)> {
        self.attrs.iter()
    }

    /// The string value under `key`, when present and a string.
    pub fn str_value(&self, key: AttrKey) -> Option<&str> {
        match self.attrs.get(&key) {
            Some(AttrValue::Str(value)) => Some(value),
            _ => None,
        }
    }

    /// The byte value under `key`, when present and bytes.
    pub fn bytes_value(&self, key: AttrKey) -> Option<&[u8]> {
        match self.attrs.get(&key) {
            Some(AttrValue::Bytes(value)) => Some(value),
            _ => None,
        }
    }

    /// The storage class, when the class attribute is present.
    pub fn class_value(&self) -> Option<StorageClass> {
        match self.attrs.get(&AttrKey::Class) {
            Some(AttrValue::Class(class)) => Some(*class),
            _ => None,
        }
    }

    /// The match limit, when one is present.
    pub fn limit(&self) -> Option<MatchLimit> {
        match self.attrs.get(&AttrKey::MatchLimit) {
            Some(AttrValue::Limit(limit)) => Some(*limit),
            _ => None,
        }
    }

    /// Whether a boolean attribute is present and on.
    pub fn flag(&self, key: AttrKey) -> bool {
        matches!(self.attrs.get(&key), Some(AttrValue::Bool(true)))
    }
}

impl Drop for Request {
    fn drop(&mut self) {
        // Payload and tag bytes may hold secret material.
        for value in self.attrs.values_mut() {
            if let AttrValue::Bytes(bytes) = value {
                bytes.zeroize();
            }
        }
    }
}
