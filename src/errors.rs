use thiserror::Error;

use crate::backend::BackendStatus;

/// All errors that can occur in credstore.
#[derive(Debug, Error)]
pub enum CredStoreError {
    // --- Backend operation errors ---
    #[error("Failed to store the item: {0}")]
    StoreFailed(StoreError),

    #[error("Failed to retrieve the item: {0}")]
    RetrieveFailed(RetrieveError),

    #[error("Failed to update the item: {0}")]
    UpdateFailed(UpdateError),

    #[error("Item not found in the secure store")]
    NotFound,

    #[error("The secure store backend is unavailable")]
    BackendUnavailable,

    // --- Identifier errors ---
    #[error("\"{0}\" is not a valid application namespace")]
    InvalidNamespace(String),

    #[error("Unable to encode the item tag")]
    TagFailed,

    // --- Result decoding errors ---
    #[error("The backend returned an unexpected result shape")]
    InvalidItemShape,

    #[error("Unable to decode the stored payload")]
    InvalidPayloadData,
}

/// Cause reported by the backend for a failed store or delete.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("the item already exists")]
    DuplicateItem,

    #[error("the backend returned status {0}")]
    Status(i32),
}

impl From<BackendStatus> for StoreError {
    fn from(status: BackendStatus) -> Self {
        match status {
            BackendStatus::DuplicateItem => StoreError::DuplicateItem,
            status => StoreError::Status(status.raw_code()),
        }
    }
}

/// Cause reported by the backend for a failed retrieve.
#[derive(Debug, Error)]
pub enum RetrieveError {
    #[error("the backend returned status {0}")]
    Status(i32),
}

impl From<BackendStatus> for RetrieveError {
    fn from(status: BackendStatus) -> Self {
        RetrieveError::Status(status.raw_code())
    }
}

/// Cause reported by the backend for a failed update.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("the item already exists")]
    DuplicateItem,

    #[error("the backend returned status {0}")]
    Status(i32),
}

impl From<BackendStatus> for UpdateError {
    fn from(status: BackendStatus) -> Self {
        match status {
            BackendStatus::DuplicateItem => UpdateError::DuplicateItem,
            status => UpdateError::Status(status.raw_code()),
        }
    }
}

/// Convenience type alias for credstore results.
pub type Result<T> = std::result::Result<T, CredStoreError>;
