//! InMemoryEntityStore - BTreeMap-backed entity store for testing and development.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{ETag, EntityKey, EntityStore, StoreError, TableEntity, Versioned};

type StorageKey = (String, String, String);

/// Internal stored representation of a row.
struct StoredRow {
    bytes: Vec<u8>,
    etag: ETag,
}

impl StoredRow {
    fn decode<E: TableEntity>(&self) -> Result<Versioned<E>, StoreError> {
        let data: E = serde_json::from_slice(&self.bytes)?;
        Ok(Versioned::new(data, self.etag.clone()))
    }
}

/// In-memory entity store backed by an ordered map.
///
/// Rows are kept serialized, so every read hands out an independent copy.
/// Ordering by `(table, partition, row)` lets partition queries run as a
/// range scan. Clone-friendly via Arc; clones share storage.
#[derive(Clone)]
pub struct InMemoryEntityStore {
    storage: Arc<RwLock<BTreeMap<StorageKey, StoredRow>>>,
}

impl Default for InMemoryEntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEntityStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Number of rows across all tables.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.read()?.is_empty())
    }

    fn make_key(table: &str, partition: &str, row: &str) -> StorageKey {
        (table.to_string(), partition.to_string(), row.to_string())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<StorageKey, StoredRow>>, StoreError> {
        self.storage
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<StorageKey, StoredRow>>, StoreError> {
        self.storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }
}

impl EntityStore for InMemoryEntityStore {
    fn get_entity<E: TableEntity>(
        &self,
        table: &str,
        partition: &str,
        row: &str,
    ) -> Result<Option<Versioned<E>>, StoreError> {
        let storage = self.read()?;
        storage
            .get(&Self::make_key(table, partition, row))
            .map(StoredRow::decode)
            .transpose()
    }

    fn create_entity<E: TableEntity>(
        &self,
        table: &str,
        entity: &E,
    ) -> Result<Versioned<E>, StoreError> {
        let key = Self::make_key(table, entity.partition_key(), entity.row_key());
        let bytes = serde_json::to_vec(entity)?;

        let mut storage = self.write()?;
        if storage.contains_key(&key) {
            return Err(StoreError::AlreadyExists(EntityKey::of(table, entity)));
        }

        let etag = ETag::generate();
        storage.insert(
            key,
            StoredRow {
                bytes,
                etag: etag.clone(),
            },
        );

        Ok(Versioned::new(entity.clone(), etag))
    }

    fn update_entity<E: TableEntity>(
        &self,
        table: &str,
        entity: &E,
        etag: &ETag,
    ) -> Result<Versioned<E>, StoreError> {
        let key = Self::make_key(table, entity.partition_key(), entity.row_key());
        let bytes = serde_json::to_vec(entity)?;

        let mut storage = self.write()?;
        let stored = storage
            .get_mut(&key)
            .ok_or_else(|| StoreError::NotFound(EntityKey::of(table, entity)))?;

        if &stored.etag != etag {
            tracing::trace!(
                table,
                partition = entity.partition_key(),
                row = entity.row_key(),
                "rejecting write with stale etag"
            );
            return Err(StoreError::ConcurrencyConflict {
                key: EntityKey::of(table, entity),
                expected: etag.clone(),
                actual: stored.etag.clone(),
            });
        }

        let new_etag = ETag::generate();
        stored.bytes = bytes;
        stored.etag = new_etag.clone();

        Ok(Versioned::new(entity.clone(), new_etag))
    }

    fn delete_entity(&self, table: &str, partition: &str, row: &str) -> Result<bool, StoreError> {
        let mut storage = self.write()?;
        Ok(storage
            .remove(&Self::make_key(table, partition, row))
            .is_some())
    }

    fn list_all<E: TableEntity>(&self, table: &str) -> Result<Vec<Versioned<E>>, StoreError> {
        let storage = self.read()?;
        storage
            .iter()
            .filter(|((t, _, _), _)| t == table)
            .map(|(_, stored)| stored.decode())
            .collect()
    }

    fn query_partition<E: TableEntity>(
        &self,
        table: &str,
        partition: &str,
    ) -> Result<Vec<Versioned<E>>, StoreError> {
        let storage = self.read()?;
        storage
            .range(Self::make_key(table, partition, "")..)
            .take_while(|((t, p, _), _)| t == table && p == partition)
            .map(|(_, stored)| stored.decode())
            .collect()
    }
}
