//! Collection-scoped CRUD on top of [`DocumentStore`].

use crate::document::{CollectionName, Entity, Fields};
use crate::error::{Error, Result};
use crate::store::DocumentStore;
use log::info;
use serde_json::Value;
use std::sync::Arc;

/// CRUD operations for the `team`, `faqs` and `projects` collections.
///
/// Cheap to clone; all clones share one store. Every write is one
/// [`DocumentStore::try_mutate`] call, so id assignment and the
/// read-modify-write of a collection can't race.
#[derive(Debug, Clone)]
pub struct CollectionService {
    store: Arc<DocumentStore>,
}

impl CollectionService {
    /// Wrap a shared store.
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }

    /// All entities of `collection`, in insertion order.
    #[must_use]
    pub fn list(&self, collection: CollectionName) -> Vec<Entity> {
        self.store.load().collection(collection).entities().to_vec()
    }

    /// The entity with `id`, or [`Error::NotFound`].
    pub fn get(&self, collection: CollectionName, id: u64) -> Result<Entity> {
        self.store
            .load()
            .collection(collection)
            .get(id)
            .cloned()
            .ok_or(Error::NotFound { collection, id })
    }

    /// Append a new entity built from `fields` and return it with its id.
    /// Any `id` in the payload is ignored. Fails with
    /// [`Error::PersistenceFailed`] if the collection has run out of ids.
    pub fn create(&self, collection: CollectionName, fields: Value) -> Result<Entity> {
        let fields = into_fields(fields)?;
        let entity = self.store.try_mutate(|doc| {
            doc.collection_mut(collection)
                .insert(fields)
                .cloned()
                .ok_or_else(|| {
                    Error::PersistenceFailed(format!("{collection}: no ids left to assign"))
                })
        })?;
        info!("{collection}: created {}", entity.id);
        Ok(entity)
    }

    /// Replace the fields of entity `id`. The id itself never changes.
    pub fn update(&self, collection: CollectionName, id: u64, fields: Value) -> Result<Entity> {
        let fields = into_fields(fields)?;
        let entity = self.store.try_mutate(|doc| {
            doc.collection_mut(collection)
                .replace(id, fields)
                .cloned()
                .ok_or(Error::NotFound { collection, id })
        })?;
        info!("{collection}: updated {id}");
        Ok(entity)
    }

    /// Remove entity `id`. Removing a missing id succeeds and writes nothing.
    pub fn delete(&self, collection: CollectionName, id: u64) -> Result<()> {
        if self.store.load().collection(collection).get(id).is_none() {
            return Ok(());
        }
        let removed = self
            .store
            .try_mutate(|doc| Ok(doc.collection_mut(collection).remove(id).is_some()))?;
        if removed {
            info!("{collection}: deleted {id}");
        }
        Ok(())
    }
}

fn into_fields(value: Value) -> Result<Fields> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::Invalid(format!(
            "expected a JSON object, got {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
