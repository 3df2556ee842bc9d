mod error;
mod event;
mod gift_item;
mod gift_list;
mod table_repository;

pub use error::RepositoryError;
pub use event::EventRepository;
pub use gift_item::GiftItemRepository;
pub use gift_list::GiftListRepository;
pub use table_repository::TableRepository;
