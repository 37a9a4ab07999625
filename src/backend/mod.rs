//! The secure-store backend contract.
//!
//! This crate never talks to a platform store directly; it composes
//! requests and hands them to a [`SecureStoreBackend`].  Platform
//! integrations implement the trait; the bundled [`MemoryBackend`]
//! serves tests and environments without a platform service.

mod memory;

pub use memory::MemoryBackend;

use crate::request::Request;

/// Outcome of one backend operation.
///
/// Mirrors the status space of platform secure stores: a handful of
/// statuses get dedicated handling in the store facade, and an
/// open-ended bucket carries the raw code for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStatus {
    Success,
    /// An item with the same identifying attributes already exists.
    DuplicateItem,
    /// No item matched the query.
    NotFound,
    /// The secure store service cannot be reached.
    Unavailable,
    /// Any other non-success platform status.
    Other(i32),
}

impl BackendStatus {
    /// The platform's numeric code for this status.
    pub fn raw_code(self) -> i32 {
        match self {
            BackendStatus::Success => 0,
            BackendStatus::DuplicateItem => -25299,
            BackendStatus::NotFound => -25300,
            BackendStatus::Unavailable => -25291,
            BackendStatus::Other(code) => code,
        }
    }

    /// Classify a raw platform status code.
    pub fn from_raw(code: i32) -> Self {
        match code {
            0 => BackendStatus::Success,
            -25299 => BackendStatus::DuplicateItem,
            -25300 => BackendStatus::NotFound,
            -25291 => BackendStatus::Unavailable,
            other => BackendStatus::Other(other),
        }
    }

    pub fn is_success(self) -> bool {
        self == BackendStatus::Success
    }
}

/// What a match returned.
///
/// Platform stores hand back a single attribute map when one item
/// matched and a list otherwise; callers must cope with both shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// A single matched item.
    Item(Request),
    /// Zero or more matched items.
    Items(Vec<Request>),
}

/// A secure-storage service that executes attribute requests.
///
/// Implementations only execute raw primitives.  Create-or-update
/// semantics, status mapping, and result decoding live in the store
/// facade, so a backend never needs to understand the error taxonomy.
pub trait SecureStoreBackend {
    /// Store a new item described by an add request.
    fn add(&self, request: &Request) -> BackendStatus;

    /// Apply `changes` to the items matched by `query`.
    fn update_matching(&self, query: &Request, changes: &Request) -> BackendStatus;

    /// Return the items matched by `query`.
    fn copy_matching(&self, query: &Request) -> (BackendStatus, Option<MatchResult>);

    /// Remove the items matched by `query`.
    fn delete(&self, query: &Request) -> BackendStatus;
}

// One backend instance can serve several stores.
impl<B: SecureStoreBackend + ?Sized> SecureStoreBackend for &B {
    fn add(&self, request: &Request) -> BackendStatus {
        (**self).add(request)
    }

    fn update_matching(&self, query: &Request, changes: &Request) -> BackendStatus {
        (**self).update_matching(query, changes)
    }

    fn copy_matching(&self, query: &Request) -> (BackendStatus, Option<MatchResult>) {
        (**self).copy_matching(query)
    }

    fn delete(&self, query: &Request) -> BackendStatus {
        (**self).delete(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_codes_round_trip() {
        for status in [
            BackendStatus::Success,
            BackendStatus::DuplicateItem,
            BackendStatus::NotFound,
            BackendStatus::Unavailable,
            BackendStatus::Other(-34018),
        ] {
            assert_eq!(BackendStatus::from_raw(status.raw_code()), status);
        }
    }

    #[test]
    fn only_success_is_success() {
        assert!(BackendStatus::Success.is_success());
        assert!(!BackendStatus::NotFound.is_success());
        assert!(!BackendStatus::Other(1).is_success());
    }
}
