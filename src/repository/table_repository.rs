//! TableRepository - existence checks and version-token bookkeeping shared by
//! every entity repository.

use std::marker::PhantomData;

use super::error::RepositoryError;
use crate::store::{EntityStore, StoreError, Table, TableEntity, TablesExt, Versioned};

/// Generic repository for one entity type stored in one table.
///
/// Adds the domain semantics on top of the raw store: absence is `None`
/// rather than an error, creates are pre-checked for duplicates, and
/// updates and deletes re-read the row first so a stale caller sees
/// `NotFound` rather than a raw store failure.
#[derive(Clone)]
pub struct TableRepository<S, E> {
    store: S,
    table: String,
    entity: &'static str,
    _marker: PhantomData<E>,
}

impl<S: EntityStore, E: TableEntity> TableRepository<S, E> {
    /// `entity` names the type in error messages ("Event", "Gift item", ...).
    pub fn new(store: S, table: impl Into<String>, entity: &'static str) -> Self {
        Self {
            store,
            table: table.into(),
            entity,
            _marker: PhantomData,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn table(&self) -> Table<'_, S, E> {
        self.store.table(&self.table)
    }

    fn not_found(&self, id: &str) -> RepositoryError {
        RepositoryError::NotFound {
            entity: self.entity,
            id: id.to_string(),
        }
    }

    fn classify(&self, err: StoreError) -> RepositoryError {
        match err {
            StoreError::NotFound(key) => self.not_found(&key.row),
            StoreError::AlreadyExists(key) => RepositoryError::AlreadyExists {
                entity: self.entity,
                id: key.row,
            },
            StoreError::ConcurrencyConflict { key, .. } => {
                tracing::warn!(table = %self.table, row = %key.row, "write rejected: stale etag");
                RepositoryError::ConcurrencyConflict {
                    entity: self.entity,
                    id: key.row,
                }
            }
            other => RepositoryError::Store(other),
        }
    }

    /// Get an entity by key. Absence is `Ok(None)`.
    pub fn get(&self, partition: &str, row: &str) -> Result<Option<Versioned<E>>, RepositoryError> {
        Ok(self.table().get(partition, row)?)
    }

    /// Get an entity by key, treating absence as `NotFound`.
    pub fn require(&self, partition: &str, row: &str) -> Result<Versioned<E>, RepositoryError> {
        self.get(partition, row)?
            .ok_or_else(|| self.not_found(row))
    }

    /// Insert a new entity.
    ///
    /// Duplicates are reported as `AlreadyExists` whether the pre-check or
    /// the store itself catches them.
    pub fn create(&self, entity: E) -> Result<Versioned<E>, RepositoryError> {
        if self
            .get(entity.partition_key(), entity.row_key())?
            .is_some()
        {
            return Err(RepositoryError::AlreadyExists {
                entity: self.entity,
                id: entity.row_key().to_string(),
            });
        }

        let created = self.table().create(&entity).map_err(|e| self.classify(e))?;
        tracing::debug!(
            table = %self.table,
            partition = entity.partition_key(),
            row = entity.row_key(),
            "entity created"
        );
        Ok(created)
    }

    /// Write back an entity that was read earlier, guarded by the token it
    /// was read with.
    pub fn update(&self, entity: Versioned<E>) -> Result<Versioned<E>, RepositoryError> {
        let Versioned { data, etag } = entity;
        self.require(data.partition_key(), data.row_key())?;

        let updated = self.table().update(&data, &etag).map_err(|e| self.classify(e))?;
        tracing::debug!(
            table = %self.table,
            partition = data.partition_key(),
            row = data.row_key(),
            "entity updated"
        );
        Ok(updated)
    }

    /// Delete an entity. Returns false if it was already gone.
    pub fn delete(&self, partition: &str, row: &str) -> Result<bool, RepositoryError> {
        if self.get(partition, row)?.is_none() {
            return Ok(false);
        }

        let deleted = self.table().delete(partition, row)?;
        tracing::debug!(table = %self.table, partition, row, deleted, "entity deleted");
        Ok(deleted)
    }

    /// Every entity under one parent key.
    pub fn list_partition(&self, partition: &str) -> Result<Vec<Versioned<E>>, RepositoryError> {
        Ok(self.table().partition(partition)?)
    }

    /// Every entity in the table.
    pub fn list_all(&self) -> Result<Vec<Versioned<E>>, RepositoryError> {
        Ok(self.table().list_all()?)
    }
}
