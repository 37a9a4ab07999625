//! Typed secure-credential storage over pluggable secure-store
//! backends.
//!
//! The crate models secret kinds as a closed [`ItemType`] set, composes
//! backend-neutral attribute requests from an item kind, an immutable
//! [`StoreSettings`] value, and a caller-supplied [`Namespace`], and
//! maps the backend's opaque status codes into a structured error
//! taxonomy.  Storage itself is delegated to a [`SecureStoreBackend`];
//! the bundled [`MemoryBackend`] serves tests and environments without
//! a platform service.
//!
//! ```
//! use credstore::{CredStore, ItemType, MemoryBackend, Namespace, StoreSettings};
//!
//! # fn main() -> credstore::Result<()> {
//! let backend = MemoryBackend::new();
//! let store = CredStore::new(
//!     &backend,
//!     ItemType::Credentials {
//!         username: "alice".into(),
//!         server: None,
//!     },
//!     StoreSettings::new("my-service"),
//!     Namespace::new("com.example.app")?,
//! );
//!
//! store.set(&"hunter2".to_string(), "login")?;
//! let password: String = store.get("login")?;
//! assert_eq!(password, "hunter2");
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod errors;
pub mod item;
pub mod request;
pub mod settings;
pub mod store;
pub mod tag;

pub use backend::{BackendStatus, MatchResult, MemoryBackend, SecureStoreBackend};
pub use errors::{CredStoreError, Result, RetrieveError, StoreError, UpdateError};
pub use item::{ItemType, Payload, StorageClass};
pub use request::{AttrKey, AttrValue, MatchLimit, Request};
pub use settings::{Accessibility, StoreSettings};
pub use store::{get_all, CredStore};
pub use tag::{Namespace, Tag};
