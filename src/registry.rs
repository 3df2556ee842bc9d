//! Wiring: one store, three repositories, three services.

use crate::config::Config;
use crate::repository::{EventRepository, GiftItemRepository, GiftListRepository};
use crate::service::{EventService, GiftItemService, GiftListService};
use crate::store::{EntityStore, InMemoryEntityStore};

/// The assembled core. The store is built (or handed in) once and shared by
/// clone with every repository; there is no lazily-created global client.
#[derive(Clone)]
pub struct GiftRegistry<S> {
    store: S,
    events: EventService<S>,
    gift_lists: GiftListService<S>,
    gift_items: GiftItemService<S>,
}

impl GiftRegistry<InMemoryEntityStore> {
    /// Build over a fresh in-memory store.
    pub fn from_config(config: &Config) -> Self {
        Self::with_store(InMemoryEntityStore::new(), config)
    }
}

impl<S: EntityStore + Clone> GiftRegistry<S> {
    pub fn with_store(store: S, config: &Config) -> Self {
        let tables = &config.tables;
        let event_repo = EventRepository::new(store.clone(), tables.events.clone());
        let list_repo = GiftListRepository::new(store.clone(), tables.gift_lists.clone());
        let item_repo = GiftItemRepository::new(store.clone(), tables.gift_items.clone());

        tracing::debug!(
            events = %tables.events,
            gift_lists = %tables.gift_lists,
            gift_items = %tables.gift_items,
            "gift registry wired"
        );

        Self {
            events: EventService::new(event_repo.clone()),
            gift_lists: GiftListService::new(list_repo.clone(), event_repo, item_repo.clone()),
            gift_items: GiftItemService::new(item_repo, list_repo),
            store,
        }
    }

    pub fn events(&self) -> &EventService<S> {
        &self.events
    }

    pub fn gift_lists(&self) -> &GiftListService<S> {
        &self.gift_lists
    }

    pub fn gift_items(&self) -> &GiftItemService<S> {
        &self.gift_items
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
