use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{new_id, Caller, CreateGiftListRequest};
use crate::TableEntity;

/// A participant's wish list for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TableEntity)]
pub struct GiftList {
    #[table(row)]
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub owner_name: String,
    #[table(partition)]
    pub event_name: String,
    pub created_at: DateTime<Utc>,
    /// Cached number of items. Repaired on item listing when it drifts.
    pub item_count: u32,
}

impl GiftList {
    pub fn new(request: CreateGiftListRequest, owner: &Caller) -> Self {
        Self {
            id: new_id(),
            name: request.name.trim().to_string(),
            owner_id: owner.user_id.clone(),
            owner_name: owner.display_name.clone(),
            event_name: request.event_name,
            created_at: Utc::now(),
            item_count: 0,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}
