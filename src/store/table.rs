//! Table - Typed, table-bound accessor over an entity store.

use std::marker::PhantomData;

use super::{ETag, EntityStore, StoreError, TableEntity, Versioned};

/// Typed view of one table of an [`EntityStore`].
pub struct Table<'a, S, E> {
    store: &'a S,
    name: &'a str,
    _marker: PhantomData<E>,
}

impl<'a, S: EntityStore, E: TableEntity> Table<'a, S, E> {
    pub fn new(store: &'a S, name: &'a str) -> Self {
        Self {
            store,
            name,
            _marker: PhantomData,
        }
    }

    /// Table name.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Get a row by key.
    pub fn get(&self, partition: &str, row: &str) -> Result<Option<Versioned<E>>, StoreError> {
        self.store.get_entity(self.name, partition, row)
    }

    /// Insert a new row. Fails if the key is occupied.
    pub fn create(&self, entity: &E) -> Result<Versioned<E>, StoreError> {
        self.store.create_entity(self.name, entity)
    }

    /// Replace a row, guarded by its version token.
    pub fn update(&self, entity: &E, etag: &ETag) -> Result<Versioned<E>, StoreError> {
        self.store.update_entity(self.name, entity, etag)
    }

    /// Delete a row. Returns true if it existed.
    pub fn delete(&self, partition: &str, row: &str) -> Result<bool, StoreError> {
        self.store.delete_entity(self.name, partition, row)
    }

    /// Every row in the table.
    pub fn list_all(&self) -> Result<Vec<Versioned<E>>, StoreError> {
        self.store.list_all(self.name)
    }

    /// Every row in one partition.
    pub fn partition(&self, partition: &str) -> Result<Vec<Versioned<E>>, StoreError> {
        self.store.query_partition(self.name, partition)
    }
}

/// Extension trait for typed table access on any EntityStore.
pub trait TablesExt: EntityStore + Sized {
    /// Get a typed accessor for the named table.
    fn table<'a, E: TableEntity>(&'a self, name: &'a str) -> Table<'a, Self, E> {
        Table::new(self, name)
    }
}

impl<S: EntityStore> TablesExt for S {}
