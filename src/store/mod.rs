//! The store facade: typed operations over a secure-store backend.
//!
//! [`CredStore`] binds a backend, an item kind, a settings value, and a
//! namespace.  Every operation builds one request, performs one backend
//! round-trip, and maps the outcome through the error taxonomy.  The
//! only fallback in the crate lives in [`CredStore::set`], which retries
//! a duplicate-rejected create as an update.
//!
//! Operations are synchronous and hold no state across calls.  Nothing
//! here serializes concurrent writers to the same tag; callers that need
//! at-most-one-writer semantics per identifier must coordinate
//! externally.

use tracing::debug;
use zeroize::Zeroizing;

use crate::backend::{BackendStatus, MatchResult, SecureStoreBackend};
use crate::errors::{CredStoreError, Result, RetrieveError, StoreError, UpdateError};
use crate::item::{ItemType, Payload};
use crate::request::{
    build_add_request, build_match_all_request, build_match_request, AttrKey,
};
use crate::settings::StoreSettings;
use crate::tag::{Namespace, Tag};

/// A typed credential store bound to one item kind and one settings
/// value.
///
/// The instance holds only immutable configuration plus the backend
/// handle, so distinct stores can run concurrently without coordination.
pub struct CredStore<B> {
    backend: B,
    item: ItemType,
    settings: StoreSettings,
    namespace: Namespace,
}

impl<B: SecureStoreBackend> CredStore<B> {
    /// Create a store.  All operations on the instance use the given
    /// item kind, settings, and namespace.
    pub fn new(backend: B, item: ItemType, settings: StoreSettings, namespace: Namespace) -> Self {
        Self {
            backend,
            item,
            settings,
            namespace,
        }
    }

    fn tag(&self, key: &str) -> Tag {
        Tag::new(&self.namespace, key)
    }

    /// Store a new item under `key`.
    ///
    /// Fails with a duplicate-item cause when the item already exists;
    /// use [`CredStore::set`] for create-or-update semantics.
    pub fn create<P: Payload>(&self, value: &P, key: &str) -> Result<()> {
        let payload = value.to_bytes()?;
        let request = build_add_request(&self.item, &self.settings, &self.tag(key), payload)?;

        debug!(key, "adding item");
        match self.backend.add(&request) {
            BackendStatus::Success => Ok(()),
            BackendStatus::Unavailable => Err(CredStoreError::BackendUnavailable),
            status => Err(CredStoreError::StoreFailed(StoreError::from(status))),
        }
    }

    /// Replace the payload of an existing item.
    pub fn update<P: Payload>(&self, value: &P, key: &str) -> Result<()> {
        let tag = self.tag(key);
        let query = build_match_request(&self.item, &self.settings, &tag)?;
        let changes = build_add_request(&self.item, &self.settings, &tag, value.to_bytes()?)?;

        debug!(key, "updating item");
        match self.backend.update_matching(&query, &changes) {
            BackendStatus::Success => Ok(()),
            BackendStatus::Unavailable => Err(CredStoreError::BackendUnavailable),
            status => Err(CredStoreError::UpdateFailed(UpdateError::from(status))),
        }
    }

    /// Create the item, or update it when it already exists.
    ///
    /// The fallback triggers only on the duplicate-item store failure;
    /// every other error propagates unchanged, as does any failure from
    /// the fallback update itself.
    pub fn set<P: Payload>(&self, value: &P, key: &str) -> Result<()> {
        match self.create(value, key) {
            Err(CredStoreError::StoreFailed(StoreError::DuplicateItem)) => {
                debug!(key, "item exists, falling back to update");
                self.update(value, key)
            }
            outcome => outcome,
        }
    }

    /// Retrieve the value stored under `key`.
    ///
    /// A missing item is `NotFound`; an item whose payload cannot be
    /// decoded into `P` is `InvalidPayloadData`.  The two are never
    /// conflated.
    pub fn get<P: Payload>(&self, key: &str) -> Result<P> {
        let query = build_match_request(&self.item, &self.settings, &self.tag(key))?;

        debug!(key, "retrieving item");
        let (status, result) = self.backend.copy_matching(&query);
        match status {
            BackendStatus::Success => {}
            BackendStatus::NotFound => return Err(CredStoreError::NotFound),
            BackendStatus::Unavailable => return Err(CredStoreError::BackendUnavailable),
            status => return Err(CredStoreError::RetrieveFailed(RetrieveError::from(status))),
        }

        let attrs = match result {
            Some(MatchResult::Item(attrs)) => attrs,
            _ => return Err(CredStoreError::InvalidItemShape),
        };

        let payload = attrs
            .bytes_value(AttrKey::ValueData)
            .ok_or(CredStoreError::InvalidPayloadData)?;
        let payload = Zeroizing::new(payload.to_vec());

        P::from_bytes(&payload).ok_or(CredStoreError::InvalidPayloadData)
    }

    /// Remove the item stored under `key`.
    pub fn delete(&self, key: &str) -> Result<()> {
        let query = build_match_request(&self.item, &self.settings, &self.tag(key))?;

        debug!(key, "deleting item");
        match self.backend.delete(&query) {
            BackendStatus::Success => Ok(()),
            status => Err(CredStoreError::StoreFailed(StoreError::from(status))),
        }
    }
}

/// Enumerate every item of `item`'s kind visible under `settings`.
///
/// Not bound to any single identifier, so it takes the backend directly
/// instead of living on a store instance.  Both single-item and
/// multi-item backend results are accepted; each raw item is populated
/// into a variant of `item`'s shape and items missing a required
/// attribute are skipped.  An empty list is a valid outcome, but a
/// backend "not found" status still fails the whole call.
pub fn get_all<B: SecureStoreBackend>(
    backend: &B,
    item: &ItemType,
    settings: &StoreSettings,
) -> Result<Vec<ItemType>> {
    let query = build_match_all_request(item, settings);

    debug!(class = ?item.storage_class(), "enumerating items");
    let (status, result) = backend.copy_matching(&query);
    match status {
        BackendStatus::Success => {}
        BackendStatus::NotFound => return Err(CredStoreError::NotFound),
        BackendStatus::Unavailable => return Err(CredStoreError::BackendUnavailable),
        status => return Err(CredStoreError::RetrieveFailed(RetrieveError::from(status))),
    }

    let raw_items = match result {
        Some(MatchResult::Items(items)) => items,
        Some(MatchResult::Item(attrs)) => vec![attrs],
        None => return Err(CredStoreError::InvalidItemShape),
    };

    Ok(raw_items
        .iter()
        .filter_map(|attrs| item.from_attributes(attrs))
        .collect())
}
