//! Pure construction of add and match requests.
//!
//! Each builder starts from the fields that identify the operation and
//! layers the item-kind and settings contributions on top.  Layering is
//! commutative per key, so step order never matters; what matters is
//! that empty or unset values never make it into the map.  Tag encoding
//! is the only fallible step and runs before anything else.

use crate::errors::Result;
use crate::item::ItemType;
use crate::request::{AttrKey, AttrValue, MatchLimit, Request};
use crate::settings::StoreSettings;
use crate::tag::Tag;

/// Build the request that stores a new item.
///
/// The payload is the only field unique to this request kind; the rest
/// comes from the item kind and the settings.
pub fn build_add_request(
    item: &ItemType,
    settings: &StoreSettings,
    tag: &Tag,
    payload: Vec<u8>,
) -> Result<Request> {
    let tag_bytes = tag.encode()?;

    let request = Request::new()
        .with(AttrKey::ApplicationTag, AttrValue::Bytes(tag_bytes))
        .with(AttrKey::ValueData, AttrValue::Bytes(payload));

    Ok(apply_settings(apply_item(request, item), settings))
}

/// Build the request that locates a single item by tag.
///
/// Asks the backend to return both attributes and payload data.  The
/// payload field itself is an output of this request kind, never an
/// input.
pub fn build_match_request(
    item: &ItemType,
    settings: &StoreSettings,
    tag: &Tag,
) -> Result<Request> {
    let tag_bytes = tag.encode()?;

    let request = Request::new()
        .with(AttrKey::ApplicationTag, AttrValue::Bytes(tag_bytes))
        .with(AttrKey::MatchLimit, AttrValue::Limit(MatchLimit::One))
        .with(AttrKey::ReturnAttributes, AttrValue::Bool(true))
        .with(AttrKey::ReturnData, AttrValue::Bool(true));

    Ok(apply_settings(apply_item(request, item), settings))
}

/// Build the request that enumerates every item of one kind.
///
/// Scoped by storage class and label only.  Payload data is not
/// requested: enumeration returns attributes, never secrets in bulk.
pub fn build_match_all_request(item: &ItemType, settings: &StoreSettings) -> Request {
    Request::new()
        .with(AttrKey::MatchLimit, AttrValue::Limit(MatchLimit::All))
        .with(AttrKey::ReturnAttributes, AttrValue::Bool(true))
        .with(AttrKey::Class, AttrValue::Class(item.storage_class()))
        .with_nonempty_str(AttrKey::Label, settings.label())
}

/// Layer the storage class and the account/server attributes the item
/// kind carries.
fn apply_item(request: Request, item: &ItemType) -> Request {
    let request = request.with(AttrKey::Class, AttrValue::Class(item.storage_class()));

    let request = match item.username() {
        Some(username) => request.with_nonempty_str(AttrKey::Account, username),
        None => request,
    };

    match item.server() {
        Some(server) => request.with_nonempty_str(AttrKey::Server, server),
        None => request,
    }
}

/// Layer the label, accessibility policy, and flags from the settings.
fn apply_settings(request: Request, settings: &StoreSettings) -> Request {
    let request = request.with_nonempty_str(AttrKey::Label, settings.label());

    let request = match settings.policy() {
        Some(policy) => request.with(AttrKey::Accessible, AttrValue::Access(policy)),
        None => request,
    };

    request
        .with_flag(AttrKey::Synchronizable, settings.is_synchronizable())
        .with_flag(AttrKey::Invisible, settings.is_invisible())
}
