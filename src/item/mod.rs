//! The closed set of secret kinds and how each maps onto the backend.
//!
//! Every consumer dispatches over [`ItemType`] with an exhaustive match;
//! there is no open-ended type inspection anywhere.  Each variant
//! deterministically selects its storage class and the attributes it
//! contributes to a request.

mod payload;

pub use payload::Payload;

use crate::request::{AttrKey, Request};

/// Backend storage bucket a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageClass {
    /// Generic secrets and service-scoped account credentials.
    GenericPassword,
    /// Network-service credentials.
    InternetPassword,
    /// Raw key material.
    Key,
}

/// The kind of secret an item holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemType {
    /// Account credential scoped to a service name.
    Credentials {
        username: String,
        server: Option<String>,
    },
    /// Network-service credential. A separate backend bucket from
    /// `Credentials`, otherwise structurally identical.
    InternetCredentials {
        username: String,
        server: Option<String>,
    },
    /// Unscoped generic secret.
    Password,
    /// Raw cryptographic key material, stored as opaque bytes.
    Key,
}

impl ItemType {
    /// The backend bucket this kind belongs to.
    pub fn storage_class(&self) -> StorageClass {
        match self {
            ItemType::Credentials { .. } => StorageClass::GenericPassword,
            ItemType::InternetCredentials { .. } => StorageClass::InternetPassword,
            ItemType::Password => StorageClass::GenericPassword,
            ItemType::Key => StorageClass::Key,
        }
    }

    /// The account name, for kinds that carry one.
    pub fn username(&self) -> Option<&str> {
        match self {
            ItemType::Credentials { username, .. }
            | ItemType::InternetCredentials { username, .. } => Some(username),
            ItemType::Password | ItemType::Key => None,
        }
    }

    /// The service or server name, for kinds that carry one.
    pub fn server(&self) -> Option<&str> {
        match self {
            ItemType::Credentials { server, .. }
            | ItemType::InternetCredentials { server, .. } => server.as_deref(),
            ItemType::Password | ItemType::Key => None,
        }
    }

    /// Backend attribute keys meaningful for this kind's storage class.
    ///
    /// Informational only: useful for diagnostics, never enforced when
    /// a request is built.
    pub fn relevant_attributes(&self) -> &'static [AttrKey] {
        match self {
            ItemType::Credentials { .. } | ItemType::InternetCredentials { .. } => &[
                AttrKey::ApplicationTag,
                AttrKey::Account,
                AttrKey::Server,
                AttrKey::Label,
                AttrKey::ValueData,
            ],
            ItemType::Password => &[AttrKey::ApplicationTag, AttrKey::Label, AttrKey::ValueData],
            ItemType::Key => &[AttrKey::ApplicationTag, AttrKey::ValueData],
        }
    }

    /// Rebuild a variant of this shape from a backend attribute map.
    ///
    /// Credential shapes require the account attribute and pick up the
    /// server attribute when present. `Password` and `Key` carry no
    /// per-item fields, so any attribute map populates them. Returns
    /// `None` when a required attribute is missing, which lets
    /// enumeration skip the item instead of failing.
    pub fn from_attributes(&self, attrs: &Request) -> Option<ItemType> {
        match self {
            ItemType::Credentials { .. } => {
                let username = attrs.str_value(AttrKey::Account)?.to_string();
                let server = attrs.str_value(AttrKey::Server).map(str::to_string);
                Some(ItemType::Credentials { username, server })
            }
            ItemType::InternetCredentials { .. } => {
                let username = attrs.str_value(AttrKey::Account)?.to_string();
                let server = attrs.str_value(AttrKey::Server).map(str::to_string);
                Some(ItemType::InternetCredentials { username, server })
            }
            ItemType::Password => Some(ItemType::Password),
            ItemType::Key => Some(ItemType::Key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::AttrValue;

    fn credentials(username: &str, server: Option<&str>) -> ItemType {
        ItemType::Credentials {
            username: username.to_string(),
            server: server.map(str::to_string),
        }
    }

    #[test]
    fn storage_classes_are_fixed_per_kind() {
        assert_eq!(
            credentials("alice", None).storage_class(),
            StorageClass::GenericPassword
        );
        assert_eq!(
            ItemType::InternetCredentials {
                username: "alice".into(),
                server: None
            }
            .storage_class(),
            StorageClass::InternetPassword
        );
        assert_eq!(ItemType::Password.storage_class(), StorageClass::GenericPassword);
        assert_eq!(ItemType::Key.storage_class(), StorageClass::Key);
    }

    #[test]
    fn password_and_key_carry_no_account_fields() {
        assert_eq!(ItemType::Password.username(), None);
        assert_eq!(ItemType::Password.server(), None);
        assert_eq!(ItemType::Key.username(), None);
        assert_eq!(ItemType::Key.server(), None);
    }

    #[test]
    fn relevant_attributes_include_server_only_for_credentials() {
        assert!(credentials("alice", None)
            .relevant_attributes()
            .contains(&AttrKey::Server));
        assert!(!ItemType::Password
            .relevant_attributes()
            .contains(&AttrKey::Server));
    }

    #[test]
    fn populating_credentials_requires_the_account_attribute() {
        let shape = credentials("", None);

        let missing_account =
            Request::new().with(AttrKey::Server, AttrValue::Str("example.com".into()));
        assert_eq!(shape.from_attributes(&missing_account), None);

        let complete = Request::new()
            .with(AttrKey::Account, AttrValue::Str("alice".into()))
            .with(AttrKey::Server, AttrValue::Str("example.com".into()));
        assert_eq!(
            shape.from_attributes(&complete),
            Some(credentials("alice", Some("example.com")))
        );
    }

    #[test]
    fn populating_password_and_key_is_shape_only() {
        let empty = Request::new();
        assert_eq!(ItemType::Password.from_attributes(&empty), Some(ItemType::Password));
        assert_eq!(ItemType::Key.from_attributes(&empty), Some(ItemType::Key));
    }
}
