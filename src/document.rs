//! The persisted document and the records inside it.
//!
//! On disk the document is one JSON object:
//!
//! ```json
//! { "team": [{ "id": 1, "name": "A" }], "faqs": [], "projects": [] }
//! ```
//!
//! Missing collections load as empty. Unknown top-level keys are carried
//! through untouched so a save never drops data this crate doesn't model.

use crate::error::Error;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::str::FromStr;

/// Field map of an entity, minus its id.
pub type Fields = Map<String, Value>;

/// One of the three named collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    /// Team members.
    Team,
    /// Frequently asked questions.
    Faqs,
    /// Portfolio projects.
    Projects,
}

impl CollectionName {
    /// Every collection, in document order.
    pub const ALL: [CollectionName; 3] = [
        CollectionName::Team,
        CollectionName::Faqs,
        CollectionName::Projects,
    ];

    /// The key used on disk and in URLs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CollectionName::Team => "team",
            CollectionName::Faqs => "faqs",
            CollectionName::Projects => "projects",
        }
    }
}

impl std::fmt::Display for CollectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "team" => Ok(CollectionName::Team),
            "faqs" => Ok(CollectionName::Faqs),
            "projects" => Ok(CollectionName::Projects),
            other => Err(Error::UnknownCollection(other.to_string())),
        }
    }
}

/// A record with a system-assigned id. Everything else is opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Assigned at creation, never changed or reused.
    pub id: u64,
    /// Business fields, stored in the order they were supplied.
    #[serde(flatten)]
    pub fields: Fields,
}

/// Ordered sequence of entities plus the highest id handed out so far.
///
/// Serializes as a bare JSON array. `last_id` is not persisted: it is seeded
/// from the largest id present when the collection is loaded, and only ever
/// grows afterwards.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Vec<Entity>")]
pub struct Collection {
    entities: Vec<Entity>,
    last_id: u64,
}

impl Collection {
    /// Entities in insertion order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// `true` when the collection holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Highest id assigned in this collection (0 if none yet).
    #[must_use]
    pub fn last_id(&self) -> u64 {
        self.last_id
    }

    /// Look up an entity by id.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Append a new entity with the next id and return it.
    ///
    /// Returns `None`, leaving the collection untouched, once the id space is
    /// exhausted (the last id handed out was `u64::MAX`).
    pub fn insert(&mut self, mut fields: Fields) -> Option<&Entity> {
        let id = self.last_id.checked_add(1)?;
        fields.remove("id");
        self.last_id = id;
        let idx = self.entities.len();
        self.entities.push(Entity { id, fields });
        Some(&self.entities[idx])
    }

    /// Replace the fields of entity `id`, keeping its id and position.
    /// Returns `None` if there is no such entity.
    pub fn replace(&mut self, id: u64, mut fields: Fields) -> Option<&Entity> {
        fields.remove("id");
        let entity = self.entities.iter_mut().find(|e| e.id == id)?;
        entity.fields = fields;
        Some(entity)
    }

    /// Remove entity `id`, returning it if it was present.
    pub fn remove(&mut self, id: u64) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }
}

// Equality is about content; the id high-water mark is process-local.
impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        self.entities == other.entities
    }
}

impl TryFrom<Vec<Entity>> for Collection {
    type Error = String;

    fn try_from(entities: Vec<Entity>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(entities.len());
        for e in &entities {
            if !seen.insert(e.id) {
                return Err(format!("duplicate id {}", e.id));
            }
        }
        let last_id = entities.iter().map(|e| e.id).max().unwrap_or(0);
        Ok(Self { entities, last_id })
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entities.serialize(serializer)
    }
}

/// The whole persisted state: three collections and any foreign keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Team members.
    #[serde(default)]
    pub team: Collection,
    /// FAQ entries.
    #[serde(default)]
    pub faqs: Collection,
    /// Projects.
    #[serde(default)]
    pub projects: Collection,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Document {
    /// Borrow a collection by name.
    #[must_use]
    pub fn collection(&self, name: CollectionName) -> &Collection {
        match name {
            CollectionName::Team => &self.team,
            CollectionName::Faqs => &self.faqs,
            CollectionName::Projects => &self.projects,
        }
    }

    /// Mutably borrow a collection by name.
    pub fn collection_mut(&mut self, name: CollectionName) -> &mut Collection {
        match name {
            CollectionName::Team => &mut self.team,
            CollectionName::Faqs => &mut self.faqs,
            CollectionName::Projects => &mut self.projects,
        }
    }

    /// Top-level keys other than the three collections, as read from disk.
    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}
