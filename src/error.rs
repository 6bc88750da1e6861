//! Unified error type for store and collection operations.

use crate::document::CollectionName;

/// Things that can go wrong when reading or mutating the document.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The backing file exists but can't be read or doesn't hold a valid
    /// document. Fatal at startup: serving an empty document over corrupt data
    /// would hide the damage.
    StorageUnavailable(String),
    /// Writing or renaming the new document failed. The mutation was rejected
    /// and the previous document is still current.
    PersistenceFailed(String),
    /// No entity with this id exists in the collection.
    NotFound {
        /// Collection that was searched.
        collection: CollectionName,
        /// Id that wasn't there.
        id: u64,
    },
    /// The collection name isn't one of `team`, `faqs`, `projects`.
    UnknownCollection(String),
    /// Malformed request input (non-object payload, bad id, bad JSON).
    Invalid(String),
}

impl Error {
    /// HTTP status the error maps to when surfaced over the API.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Error::StorageUnavailable(_) => 503,
            Error::PersistenceFailed(_) => 500,
            Error::NotFound { .. } | Error::UnknownCollection(_) => 404,
            Error::Invalid(_) => 400,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::StorageUnavailable(msg) => write!(f, "storage unavailable: {msg}"),
            Error::PersistenceFailed(msg) => write!(f, "persistence failed: {msg}"),
            Error::NotFound { collection, id } => write!(f, "no entity {id} in {collection}"),
            Error::UnknownCollection(name) => write!(f, "unknown collection `{name}`"),
            Error::Invalid(msg) => write!(f, "invalid request: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Result alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
