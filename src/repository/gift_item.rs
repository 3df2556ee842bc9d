use crate::model::GiftItem;
use crate::store::{EntityStore, Versioned};

use super::{RepositoryError, TableRepository};

/// Gift items, partitioned by gift list id.
#[derive(Clone)]
pub struct GiftItemRepository<S> {
    inner: TableRepository<S, GiftItem>,
}

impl<S: EntityStore> GiftItemRepository<S> {
    pub fn new(store: S, table: impl Into<String>) -> Self {
        Self {
            inner: TableRepository::new(store, table, "Gift item"),
        }
    }

    pub fn get(
        &self,
        gift_list_id: &str,
        id: &str,
    ) -> Result<Option<Versioned<GiftItem>>, RepositoryError> {
        self.inner.get(gift_list_id, id)
    }

    pub fn create(&self, item: GiftItem) -> Result<Versioned<GiftItem>, RepositoryError> {
        self.inner.create(item)
    }

    pub fn update(&self, item: Versioned<GiftItem>) -> Result<Versioned<GiftItem>, RepositoryError> {
        self.inner.update(item)
    }

    pub fn delete(&self, gift_list_id: &str, id: &str) -> Result<bool, RepositoryError> {
        self.inner.delete(gift_list_id, id)
    }

    pub fn get_by_gift_list(
        &self,
        gift_list_id: &str,
    ) -> Result<Vec<Versioned<GiftItem>>, RepositoryError> {
        self.inner.list_partition(gift_list_id)
    }
}
