use crate::model::{Event, EVENT_PARTITION};
use crate::store::{EntityStore, Versioned};

use super::{RepositoryError, TableRepository};

/// Events, keyed by name alone.
#[derive(Clone)]
pub struct EventRepository<S> {
    inner: TableRepository<S, Event>,
}

impl<S: EntityStore> EventRepository<S> {
    pub fn new(store: S, table: impl Into<String>) -> Self {
        Self {
            inner: TableRepository::new(store, table, "Event"),
        }
    }

    pub fn get(&self, name: &str) -> Result<Option<Versioned<Event>>, RepositoryError> {
        self.inner.get(EVENT_PARTITION, name)
    }

    pub fn exists(&self, name: &str) -> Result<bool, RepositoryError> {
        Ok(self.get(name)?.is_some())
    }

    pub fn create(&self, event: Event) -> Result<Versioned<Event>, RepositoryError> {
        self.inner.create(event)
    }

    pub fn update(&self, event: Versioned<Event>) -> Result<Versioned<Event>, RepositoryError> {
        self.inner.update(event)
    }

    pub fn delete(&self, name: &str) -> Result<bool, RepositoryError> {
        self.inner.delete(EVENT_PARTITION, name)
    }

    pub fn get_all(&self) -> Result<Vec<Versioned<Event>>, RepositoryError> {
        self.inner.list_partition(EVENT_PARTITION)
    }
}
