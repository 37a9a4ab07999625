//! An in-process backend for tests and environments without a platform
//! secure store.
//!
//! Matching follows the platform model: a query matches an item when
//! every non-meta attribute in the query equals the stored attribute.
//! Stored payload bytes are wiped when an item is replaced or removed
//! (requests zeroize their byte attributes on drop).

use std::sync::Mutex;

use super::{BackendStatus, MatchResult, SecureStoreBackend};
use crate::request::{AttrKey, MatchLimit, Request};

/// Keys that describe the match itself rather than the stored item.
const META_KEYS: [AttrKey; 3] = [
    AttrKey::MatchLimit,
    AttrKey::ReturnAttributes,
    AttrKey::ReturnData,
];

/// An in-memory [`SecureStoreBackend`].
#[derive(Debug, Default)]
pub struct MemoryBackend {
    items: Mutex<Vec<Request>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items across all storage classes.
    pub fn item_count(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }
}

impl SecureStoreBackend for MemoryBackend {
    fn add(&self, request: &Request) -> BackendStatus {
        let mut items = match self.items.lock() {
            Ok(items) => items,
            Err(_) => return BackendStatus::Unavailable,
        };

        if items.iter().any(|item| same_identity(request, item)) {
            return BackendStatus::DuplicateItem;
        }

        items.push(strip_meta(request));
        BackendStatus::Success
    }

    fn update_matching(&self, query: &Request, changes: &Request) -> BackendStatus {
        let mut items = match self.items.lock() {
            Ok(items) => items,
            Err(_) => return BackendStatus::Unavailable,
        };

        let mut updated = false;
        for item in items.iter_mut() {
            if !matches_query(query, item) {
                continue;
            }
            let merged = merge(item, changes);
            *item = merged;
            updated = true;
        }

        if updated {
            BackendStatus::Success
        } else {
            BackendStatus::NotFound
        }
    }

    fn copy_matching(&self, query: &Request) -> (BackendStatus, Option<MatchResult>) {
        let items = match self.items.lock() {
            Ok(items) => items,
            Err(_) => return (BackendStatus::Unavailable, None),
        };

        let mut matched: Vec<Request> = items
            .iter()
            .filter(|item| matches_query(query, item))
            .map(|item| project(query, item))
            .collect();

        if matched.is_empty() {
            return (BackendStatus::NotFound, None);
        }

        if query.limit() == Some(MatchLimit::All) {
            return (BackendStatus::Success, Some(MatchResult::Items(matched)));
        }
        let first = matched.swap_remove(0);
        (BackendStatus::Success, Some(MatchResult::Item(first)))
    }

    fn delete(&self, query: &Request) -> BackendStatus {
        let mut items = match self.items.lock() {
            Ok(items) => items,
            Err(_) => return BackendStatus::Unavailable,
        };

        let before = items.len();
        items.retain(|item| !matches_query(query, item));

        if items.len() == before {
            BackendStatus::NotFound
        } else {
            BackendStatus::Success
        }
    }
}

/// Identity of an item is its storage class plus application tag.
fn same_identity(request: &Request, item: &Request) -> bool {
    item.get(AttrKey::Class) == request.get(AttrKey::Class)
        && item.get(AttrKey::ApplicationTag) == request.get(AttrKey::ApplicationTag)
}

/// Whether every non-meta attribute of `query` equals the stored one.
///
/// The payload is never a match criterion.
fn matches_query(query: &Request, item: &Request) -> bool {
    query.iter().all(|(key, value)| {
        if META_KEYS.contains(key) || *key == AttrKey::ValueData {
            return true;
        }
        item.get(*key) == Some(value)
    })
}

/// Copy of `request` without the match-meta keys.
fn strip_meta(request: &Request) -> Request {
    request
        .iter()
        .filter(|(key, _)| !META_KEYS.contains(key))
        .fold(Request::new(), |acc, (key, value)| {
            acc.with(*key, value.clone())
        })
}

/// Stored item overlaid with the non-meta attributes of `changes`.
fn merge(item: &Request, changes: &Request) -> Request {
    changes
        .iter()
        .filter(|(key, _)| !META_KEYS.contains(key))
        .fold(item.clone(), |acc, (key, value)| {
            acc.with(*key, value.clone())
        })
}

/// Project a stored item into the shape a query asked for: attributes
/// only when requested, payload only when requested.
fn project(query: &Request, item: &Request) -> Request {
    item.iter().fold(Request::new(), |acc, (key, value)| {
        let wanted = if *key == AttrKey::ValueData {
            query.flag(AttrKey::ReturnData)
        } else {
            query.flag(AttrKey::ReturnAttributes)
        };
        if wanted {
            acc.with(*key, value.clone())
        } else {
            acc
        }
    })
}
