use crate::model::GiftList;
use crate::store::{EntityStore, Versioned};

use super::{RepositoryError, TableRepository};

/// Gift lists, partitioned by event name.
#[derive(Clone)]
pub struct GiftListRepository<S> {
    inner: TableRepository<S, GiftList>,
}

impl<S: EntityStore> GiftListRepository<S> {
    pub fn new(store: S, table: impl Into<String>) -> Self {
        Self {
            inner: TableRepository::new(store, table, "Gift list"),
        }
    }

    pub fn get(
        &self,
        event_name: &str,
        id: &str,
    ) -> Result<Option<Versioned<GiftList>>, RepositoryError> {
        self.inner.get(event_name, id)
    }

    /// Locate a list when only its id is known.
    ///
    /// Ids are unique across events, so this scans the whole table.
    pub fn find_by_id(&self, id: &str) -> Result<Option<Versioned<GiftList>>, RepositoryError> {
        Ok(self
            .inner
            .list_all()?
            .into_iter()
            .find(|list| list.data.id == id))
    }

    pub fn create(&self, list: GiftList) -> Result<Versioned<GiftList>, RepositoryError> {
        self.inner.create(list)
    }

    pub fn update(&self, list: Versioned<GiftList>) -> Result<Versioned<GiftList>, RepositoryError> {
        self.inner.update(list)
    }

    pub fn delete(&self, event_name: &str, id: &str) -> Result<bool, RepositoryError> {
        self.inner.delete(event_name, id)
    }

    pub fn get_by_event(&self, event_name: &str) -> Result<Vec<Versioned<GiftList>>, RepositoryError> {
        self.inner.list_partition(event_name)
    }

    pub fn get_by_event_and_owner(
        &self,
        event_name: &str,
        owner_id: &str,
    ) -> Result<Vec<Versioned<GiftList>>, RepositoryError> {
        Ok(self
            .get_by_event(event_name)?
            .into_iter()
            .filter(|list| list.data.is_owned_by(owner_id))
            .collect())
    }
}
