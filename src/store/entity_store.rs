//! EntityStore - Abstract partitioned key-value storage.

use super::{ETag, StoreError, TableEntity, Versioned};

/// Abstract partitioned key-value storage with optimistic concurrency.
///
/// Every operation is a single atomic round trip against one row (or one
/// scan). The `Table` wrapper provides a typed, table-bound view with short
/// method names.
pub trait EntityStore: Send + Sync {
    /// Get a row by key. Returns None if absent.
    fn get_entity<E: TableEntity>(
        &self,
        table: &str,
        partition: &str,
        row: &str,
    ) -> Result<Option<Versioned<E>>, StoreError>;

    /// Insert a new row. Fails with `AlreadyExists` if the key is occupied.
    fn create_entity<E: TableEntity>(
        &self,
        table: &str,
        entity: &E,
    ) -> Result<Versioned<E>, StoreError>;

    /// Replace an existing row if its stored token still equals `etag`.
    ///
    /// Fails with `NotFound` when the row is gone and `ConcurrencyConflict`
    /// when the token is stale.
    fn update_entity<E: TableEntity>(
        &self,
        table: &str,
        entity: &E,
        etag: &ETag,
    ) -> Result<Versioned<E>, StoreError>;

    /// Delete a row unconditionally. Returns true if it existed.
    fn delete_entity(&self, table: &str, partition: &str, row: &str) -> Result<bool, StoreError>;

    /// Every row in the table, in unspecified order.
    fn list_all<E: TableEntity>(&self, table: &str) -> Result<Vec<Versioned<E>>, StoreError>;

    /// Every row sharing `partition`.
    ///
    /// Defaults to a full scan filtered client-side; backends with a native
    /// range query should override it. Both must return the same set.
    fn query_partition<E: TableEntity>(
        &self,
        table: &str,
        partition: &str,
    ) -> Result<Vec<Versioned<E>>, StoreError> {
        Ok(self
            .list_all::<E>(table)?
            .into_iter()
            .filter(|row| row.data.partition_key() == partition)
            .collect())
    }
}
