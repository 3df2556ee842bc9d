//! Domain entities and the request payloads that create or change them.

mod caller;
mod event;
mod gift_item;
mod gift_list;
mod requests;

pub use caller::Caller;
pub use event::{Event, EVENT_PARTITION};
pub use gift_item::{GiftItem, Reservation, ReservationError};
pub use gift_list::GiftList;
pub use requests::{
    CreateEventRequest, CreateGiftItemRequest, CreateGiftListRequest, UpdateEventRequest,
    UpdateGiftItemRequest, UpdateGiftListRequest,
};

use uuid::Uuid;

/// Generate a fresh row id for lists and items.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}
