//! Domain services: validation, authorization and the reservation engine.
//!
//! Each service holds the repositories it needs and takes the acting user
//! explicitly on every call. Nothing is cached between calls.
//!
//! ## Quick Start
//!
//! ```ignore
//! use gift_registry::{Caller, Config, CreateEventRequest, GiftRegistry};
//!
//! let registry = GiftRegistry::from_config(&Config::default());
//! let ann = Caller::new("u1", "Ann");
//!
//! registry.events().create(
//!     CreateEventRequest { name: "Birthday".into(), description: "".into(), event_date: None },
//!     &ann,
//! )?;
//! ```

mod error;
mod event_service;
mod gift_item_service;
mod gift_list_service;
pub mod validation;

pub use error::{ServiceError, ServiceResult};
pub use event_service::EventService;
pub use gift_item_service::GiftItemService;
pub use gift_list_service::GiftListService;
