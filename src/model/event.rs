use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Caller, CreateEventRequest, UpdateEventRequest};
use crate::TableEntity;

/// Shared partition of the events table. Must match the derive attribute.
pub const EVENT_PARTITION: &str = "event";

/// An occasion gifts are collected for. The name is its identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TableEntity)]
#[table(partition = "event")]
pub struct Event {
    #[table(row)]
    pub name: String,
    pub description: String,
    pub event_date: Option<DateTime<Utc>>,
    pub created_by: String,
    pub created_by_name: String,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn new(request: CreateEventRequest, creator: &Caller) -> Self {
        Self {
            name: request.name.trim().to_string(),
            description: request.description,
            event_date: request.event_date,
            created_by: creator.user_id.clone(),
            created_by_name: creator.display_name.clone(),
            created_at: Utc::now(),
        }
    }

    /// Name and creator are fixed at creation; only these fields move.
    pub fn apply(&mut self, update: UpdateEventRequest) {
        self.description = update.description;
        self.event_date = update.event_date;
    }

    pub fn is_created_by(&self, user_id: &str) -> bool {
        self.created_by == user_id
    }
}
