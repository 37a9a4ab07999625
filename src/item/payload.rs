//! Conversion between caller values and opaque payload bytes.

use crate::errors::Result;

/// A value that can be stored as an item payload.
///
/// Implementations convert to and from the opaque byte payload kept by
/// the backend.  `from_bytes` returns `None` when the bytes do not form
/// a valid value of the type; the store surfaces that as a decode
/// failure, which is deliberately distinct from a missing item.
pub trait Payload: Sized {
    /// Encode the value into payload bytes.
    fn to_bytes(&self) -> Result<Vec<u8>>;

    /// Decode a value from payload bytes.
    fn from_bytes(bytes: &[u8]) -> Option<Self>;
}

impl Payload for Vec<u8> {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.clone())
    }

    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        Some(bytes.to_vec())
    }
}

impl Payload for String {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.as_bytes().to_vec())
    }

    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        std::str::from_utf8(bytes).ok().map(str::to_string)
    }
}
