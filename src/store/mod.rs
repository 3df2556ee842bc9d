//! Entity Store - partitioned key-value storage with optimistic concurrency.
//!
//! Rows are addressed by `(table, partition, row)`. Every successful create or
//! update hands back a fresh [`ETag`], and an update must present the token it
//! last saw for the row or it is rejected with
//! [`StoreError::ConcurrencyConflict`].
//!
//! ## Example
//!
//! ```ignore
//! use gift_registry::{InMemoryEntityStore, TableEntity, TablesExt};
//!
//! #[derive(Serialize, Deserialize, Clone, TableEntity)]
//! #[table(partition = "event")]
//! struct Event {
//!     #[table(row)]
//!     pub name: String,
//!     pub description: String,
//! }
//!
//! let store = InMemoryEntityStore::new();
//! let created = store.table::<Event>("Events").create(&event)?;
//! let loaded = store.table::<Event>("Events").get("event", "Birthday")?;
//! store.table::<Event>("Events").update(&changed, &created.etag)?;
//! ```

mod entity_store;
mod in_memory;
mod table;

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Trait for types that can be stored as rows of a table.
pub trait TableEntity: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Partition key. Rows sharing a partition can be listed together.
    fn partition_key(&self) -> &str;

    /// Row key, unique within the partition.
    fn row_key(&self) -> &str;
}

/// Opaque version token for a stored row.
///
/// A new value is minted on every successful write; the only meaningful
/// operation on it is equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ETag(String);

impl ETag {
    /// Mint a fresh token.
    pub fn generate() -> Self {
        Self(format!("W/\"{}\"", Uuid::new_v4()))
    }

    /// Wrap a token received from elsewhere (e.g. a client echoing it back).
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ETag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An entity paired with the version token it was read or written with.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub data: T,
    pub etag: ETag,
}

impl<T> Versioned<T> {
    pub fn new(data: T, etag: ETag) -> Self {
        Self { data, etag }
    }

    pub fn into_inner(self) -> T {
        self.data
    }

    /// Transform the payload while keeping the version token.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Versioned<U> {
        Versioned {
            data: f(self.data),
            etag: self.etag,
        }
    }
}

/// Full address of a row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityKey {
    pub table: String,
    pub partition: String,
    pub row: String,
}

impl EntityKey {
    pub fn new(table: &str, partition: &str, row: &str) -> Self {
        Self {
            table: table.to_string(),
            partition: partition.to_string(),
            row: row.to_string(),
        }
    }

    pub fn of<E: TableEntity>(table: &str, entity: &E) -> Self {
        Self::new(table, entity.partition_key(), entity.row_key())
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.table, self.partition, self.row)
    }
}

/// Error type for entity store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No row at the given key.
    #[error("entity not found: {0}")]
    NotFound(EntityKey),
    /// A create targeted an occupied key.
    #[error("entity already exists: {0}")]
    AlreadyExists(EntityKey),
    /// The presented version token no longer matches the stored one.
    #[error("concurrency conflict on {key} (expected etag {expected}, actual {actual})")]
    ConcurrencyConflict {
        key: EntityKey,
        expected: ETag,
        actual: ETag,
    },
    /// Serialization/deserialization error.
    #[error("entity serialization error: {0}")]
    Serde(String),
    /// Storage-level error.
    #[error("entity storage error: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}

pub use entity_store::EntityStore;
pub use in_memory::InMemoryEntityStore;
pub use table::{Table, TablesExt};
