// Lets the derive macros name this crate as `gift_registry::...` from inside it.
extern crate self as gift_registry;

pub mod config;
mod model;
mod registry;
mod repository;
pub mod service;
mod store;
pub mod telemetry;

pub use config::{Config, TableConfig};
pub use model::{
    Caller, CreateEventRequest, CreateGiftItemRequest, CreateGiftListRequest, Event, GiftItem,
    GiftList, Reservation, ReservationError, UpdateEventRequest, UpdateGiftItemRequest,
    UpdateGiftListRequest, EVENT_PARTITION,
};
pub use registry::GiftRegistry;
pub use repository::{
    EventRepository, GiftItemRepository, GiftListRepository, RepositoryError, TableRepository,
};
pub use service::{
    EventService, GiftItemService, GiftListService, ServiceError, ServiceResult,
};
pub use store::{
    ETag, EntityKey, EntityStore, InMemoryEntityStore, StoreError, Table, TableEntity, TablesExt,
    Versioned,
};

// Derive macro for `TableEntity`
pub use gift_registry_macros::TableEntity;
