//! Crash-safe JSON document store for site content, with collection CRUD.
//!
//! One JSON file holds three collections (`team`, `faqs`, `projects`). The
//! [`DocumentStore`] serializes every write and replaces the file atomically;
//! [`CollectionService`] layers create/read/update/delete on top.
//!
//! ```rust,no_run
//! use content_store::{CollectionName, CollectionService, DocumentStore};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let store = Arc::new(DocumentStore::open("data.json").unwrap());
//! let service = CollectionService::new(store);
//! let member = service.create(CollectionName::Team, json!({ "name": "A" })).unwrap();
//! assert_eq!(service.get(CollectionName::Team, member.id).unwrap(), member);
//! ```
//!
//! **Single-process only.** Two processes writing the same file will clobber
//! each other.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod persist;
pub mod serializer;
pub mod service;
pub mod store;

pub use document::{Collection, CollectionName, Document, Entity, Fields};
pub use error::{Error, Result};
pub use service::CollectionService;
pub use store::{DocumentStore, DocumentStoreBuilder};
