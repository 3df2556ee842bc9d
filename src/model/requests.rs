//! Request payloads. Shape checks (required fields, formats) happen upstream;
//! the services re-check only what their invariants depend on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub event_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub description: String,
    #[serde(default)]
    pub event_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGiftListRequest {
    pub name: String,
    pub event_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateGiftListRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGiftItemRequest {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub url: Option<String>,
    pub gift_list_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateGiftItemRequest {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub url: Option<String>,
    pub quantity: u32,
}
