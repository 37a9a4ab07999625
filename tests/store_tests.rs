//! Integration tests for the credstore store facade.

use credstore::{
    get_all, AttrKey, AttrValue, BackendStatus, CredStore, CredStoreError, ItemType,
    MatchResult, MemoryBackend, Namespace, Request, RetrieveError, SecureStoreBackend,
    StoreError, StoreSettings, UpdateError,
};

fn namespace() -> Namespace {
    Namespace::new("com.example.test").expect("valid namespace")
}

fn credentials() -> ItemType {
    ItemType::Credentials {
        username: "alice".to_string(),
        server: Some("example.com".to_string()),
    }
}

/// Helper: a credentials store labeled "svc" over the given backend.
fn credentials_store(backend: &MemoryBackend) -> CredStore<&MemoryBackend> {
    CredStore::new(backend, credentials(), StoreSettings::new("svc"), namespace())
}

/// Helper: a key-material store over the given backend.
fn key_store(backend: &MemoryBackend) -> CredStore<&MemoryBackend> {
    CredStore::new(backend, ItemType::Key, StoreSettings::new("svc"), namespace())
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[test]
fn set_then_get_round_trips_strings() {
    let backend = MemoryBackend::new();
    let store = credentials_store(&backend);

    store.set(&"hunter2".to_string(), "k1").expect("set");
    let value: String = store.get("k1").expect("get");
    assert_eq!(value, "hunter2");
}

#[test]
fn set_then_get_round_trips_raw_bytes() {
    let backend = MemoryBackend::new();
    let store = key_store(&backend);

    let key_material = vec![0u8, 1, 2, 0xff, 0xfe];
    store.set(&key_material, "signing-key").expect("set");
    let value: Vec<u8> = store.get("signing-key").expect("get");
    assert_eq!(value, key_material);
}

// ---------------------------------------------------------------------------
// Create, update, and the upsert fallback
// ---------------------------------------------------------------------------

#[test]
fn set_falls_back_to_update_for_existing_items() {
    let backend = MemoryBackend::new();
    let store = credentials_store(&backend);

    store.create(&"v1".to_string(), "k1").expect("create");
    store.set(&"v2".to_string(), "k1").expect("set over existing");

    let value: String = store.get("k1").expect("get");
    assert_eq!(value, "v2");
}

#[test]
fn create_reports_duplicate_and_keeps_the_original() {
    let backend = MemoryBackend::new();
    let store = credentials_store(&backend);

    store.create(&"v1".to_string(), "k1").expect("first create");
    let err = store.create(&"v2".to_string(), "k1").unwrap_err();
    assert!(matches!(
        err,
        CredStoreError::StoreFailed(StoreError::DuplicateItem)
    ));

    let value: String = store.get("k1").expect("get");
    assert_eq!(value, "v1");
}

#[test]
fn update_on_a_missing_item_carries_the_raw_status() {
    let backend = MemoryBackend::new();
    let store = credentials_store(&backend);

    let err = store.update(&"v1".to_string(), "nope").unwrap_err();
    assert!(matches!(
        err,
        CredStoreError::UpdateFailed(UpdateError::Status(-25300))
    ));
}

// ---------------------------------------------------------------------------
// Delete and not-found
// ---------------------------------------------------------------------------

#[test]
fn get_after_delete_is_not_found() {
    let backend = MemoryBackend::new();
    let store = credentials_store(&backend);

    store.set(&"v1".to_string(), "k1").expect("set");
    store.delete("k1").expect("delete");

    let err = store.get::<String>("k1").unwrap_err();
    assert!(matches!(err, CredStoreError::NotFound));
}

#[test]
fn get_on_an_unknown_key_is_not_found() {
    let backend = MemoryBackend::new();
    let store = credentials_store(&backend);

    let err = store.get::<String>("never-stored").unwrap_err();
    assert!(matches!(err, CredStoreError::NotFound));
}

#[test]
fn delete_on_a_missing_item_carries_the_raw_status() {
    let backend = MemoryBackend::new();
    let store = credentials_store(&backend);

    let err = store.delete("nope").unwrap_err();
    assert!(matches!(
        err,
        CredStoreError::StoreFailed(StoreError::Status(-25300))
    ));
}

// ---------------------------------------------------------------------------
// Payload decoding
// ---------------------------------------------------------------------------

#[test]
fn undecodable_payload_is_invalid_data_not_missing() {
    let backend = MemoryBackend::new();
    let store = key_store(&backend);

    // Valid bytes, but not valid UTF-8.
    store.set(&vec![0xffu8, 0xfe], "k1").expect("set");

    let err = store.get::<String>("k1").unwrap_err();
    assert!(matches!(err, CredStoreError::InvalidPayloadData));
}

// ---------------------------------------------------------------------------
// Enumeration
// ---------------------------------------------------------------------------

#[test]
fn stored_credentials_appear_in_enumeration() {
    let backend = MemoryBackend::new();
    let store = credentials_store(&backend);

    store.set(&"hunter2".to_string(), "k1").expect("set");
    let value: String = store.get("k1").expect("get");
    assert_eq!(value, "hunter2");

    let items = get_all(&backend, &credentials(), &StoreSettings::new("svc")).expect("get_all");
    assert_eq!(items.len(), 1);
    match &items[0] {
        ItemType::Credentials { username, server } => {
            assert_eq!(username, "alice");
            assert_eq!(server.as_deref(), Some("example.com"));
        }
        other => panic!("expected credentials, got {other:?}"),
    }
}

#[test]
fn enumeration_is_scoped_by_label() {
    let backend = MemoryBackend::new();
    let svc = credentials_store(&backend);
    let other = CredStore::new(
        &backend,
        credentials(),
        StoreSettings::new("other"),
        namespace(),
    );

    svc.set(&"v1".to_string(), "k1").expect("set svc");
    other.set(&"v2".to_string(), "k2").expect("set other");

    let items = get_all(&backend, &credentials(), &StoreSettings::new("svc")).expect("get_all");
    assert_eq!(items.len(), 1);
}

#[test]
fn enumeration_of_an_empty_class_is_not_found() {
    let backend = MemoryBackend::new();

    let err = get_all(&backend, &credentials(), &StoreSettings::new("svc")).unwrap_err();
    assert!(matches!(err, CredStoreError::NotFound));
}

// ---------------------------------------------------------------------------
// Backend shape and failure injection
// ---------------------------------------------------------------------------

/// Backend that reports the service as unreachable for every call.
struct UnavailableBackend;

impl SecureStoreBackend for UnavailableBackend {
    fn add(&self, _request: &Request) -> BackendStatus {
        BackendStatus::Unavailable
    }

    fn update_matching(&self, _query: &Request, _changes: &Request) -> BackendStatus {
        BackendStatus::Unavailable
    }

    fn copy_matching(&self, _query: &Request) -> (BackendStatus, Option<MatchResult>) {
        (BackendStatus::Unavailable, None)
    }

    fn delete(&self, _query: &Request) -> BackendStatus {
        BackendStatus::Unavailable
    }
}

/// Backend that answers every match with a canned result.
struct CannedBackend {
    result: MatchResult,
}

impl SecureStoreBackend for CannedBackend {
    fn add(&self, _request: &Request) -> BackendStatus {
        BackendStatus::Other(-1)
    }

    fn update_matching(&self, _query: &Request, _changes: &Request) -> BackendStatus {
        BackendStatus::Other(-1)
    }

    fn copy_matching(&self, _query: &Request) -> (BackendStatus, Option<MatchResult>) {
        (BackendStatus::Success, Some(self.result.clone()))
    }

    fn delete(&self, _query: &Request) -> BackendStatus {
        BackendStatus::Other(-1)
    }
}

fn canned_store(backend: &CannedBackend) -> CredStore<&CannedBackend> {
    CredStore::new(backend, credentials(), StoreSettings::new("svc"), namespace())
}

#[test]
fn an_unavailable_backend_is_a_distinct_error() {
    let store = CredStore::new(
        UnavailableBackend,
        credentials(),
        StoreSettings::new("svc"),
        namespace(),
    );

    assert!(matches!(
        store.create(&"v1".to_string(), "k1").unwrap_err(),
        CredStoreError::BackendUnavailable
    ));
    assert!(matches!(
        store.update(&"v1".to_string(), "k1").unwrap_err(),
        CredStoreError::BackendUnavailable
    ));
    assert!(matches!(
        store.get::<String>("k1").unwrap_err(),
        CredStoreError::BackendUnavailable
    ));
}

#[test]
fn other_statuses_surface_through_the_failing_operation() {
    let backend = CannedBackend {
        result: MatchResult::Items(vec![]),
    };
    let store = canned_store(&backend);

    assert!(matches!(
        store.create(&"v1".to_string(), "k1").unwrap_err(),
        CredStoreError::StoreFailed(StoreError::Status(-1))
    ));
    assert!(matches!(
        store.update(&"v1".to_string(), "k1").unwrap_err(),
        CredStoreError::UpdateFailed(UpdateError::Status(-1))
    ));
}

#[test]
fn get_rejects_a_list_shaped_result() {
    let backend = CannedBackend {
        result: MatchResult::Items(vec![Request::new()]),
    };
    let store = canned_store(&backend);

    let err = store.get::<String>("k1").unwrap_err();
    assert!(matches!(err, CredStoreError::InvalidItemShape));
}

#[test]
fn get_rejects_an_item_without_a_payload() {
    let attrs = Request::new().with(AttrKey::Account, AttrValue::Str("alice".into()));
    let backend = CannedBackend {
        result: MatchResult::Item(attrs),
    };
    let store = canned_store(&backend);

    let err = store.get::<String>("k1").unwrap_err();
    assert!(matches!(err, CredStoreError::InvalidPayloadData));
}

#[test]
fn enumeration_skips_items_missing_required_attributes() {
    // One malformed item (no account attribute) next to one well-formed.
    let malformed = Request::new().with(AttrKey::Server, AttrValue::Str("example.com".into()));
    let well_formed = Request::new()
        .with(AttrKey::Account, AttrValue::Str("alice".into()))
        .with(AttrKey::Server, AttrValue::Str("example.com".into()));

    let backend = CannedBackend {
        result: MatchResult::Items(vec![malformed, well_formed]),
    };

    let items = get_all(&backend, &credentials(), &StoreSettings::new("svc")).expect("get_all");
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0],
        ItemType::Credentials {
            username: "alice".to_string(),
            server: Some("example.com".to_string()),
        }
    );
}

#[test]
fn enumeration_accepts_a_single_item_result() {
    let attrs = Request::new().with(AttrKey::Account, AttrValue::Str("alice".into()));
    let backend = CannedBackend {
        result: MatchResult::Item(attrs),
    };

    let items = get_all(&backend, &credentials(), &StoreSettings::new("svc")).expect("get_all");
    assert_eq!(items.len(), 1);
}

#[test]
fn enumeration_accepts_an_empty_list_as_a_valid_result() {
    let backend = CannedBackend {
        result: MatchResult::Items(vec![]),
    };

    let items = get_all(&backend, &credentials(), &StoreSettings::new("svc")).expect("get_all");
    assert!(items.is_empty());
}

#[test]
fn retrieve_failures_carry_the_raw_status() {
    struct FailingBackend;

    impl SecureStoreBackend for FailingBackend {
        fn add(&self, _request: &Request) -> BackendStatus {
            BackendStatus::Other(-34018)
        }

        fn update_matching(&self, _query: &Request, _changes: &Request) -> BackendStatus {
            BackendStatus::Other(-34018)
        }

        fn copy_matching(&self, _query: &Request) -> (BackendStatus, Option<MatchResult>) {
            (BackendStatus::Other(-34018), None)
        }

        fn delete(&self, _query: &Request) -> BackendStatus {
            BackendStatus::Other(-34018)
        }
    }

    let store = CredStore::new(
        FailingBackend,
        credentials(),
        StoreSettings::new("svc"),
        namespace(),
    );

    let err = store.get::<String>("k1").unwrap_err();
    assert!(matches!(
        err,
        CredStoreError::RetrieveFailed(RetrieveError::Status(-34018))
    ));
}
