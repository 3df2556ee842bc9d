//! Configuration management.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;

pub const EVENTS_TABLE_VAR: &str = "GIFT_REGISTRY_EVENTS_TABLE";
pub const GIFT_LISTS_TABLE_VAR: &str = "GIFT_REGISTRY_GIFT_LISTS_TABLE";
pub const GIFT_ITEMS_TABLE_VAR: &str = "GIFT_REGISTRY_GIFT_ITEMS_TABLE";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Table names in the entity store
    pub tables: TableConfig,
    /// Default tracing filter (trace, debug, info, warn, error or a directive list)
    pub log_filter: String,
}

/// Table names, one per entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub events: String,
    pub gift_lists: String,
    pub gift_items: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            events: "Events".to_string(),
            gift_lists: "GiftLists".to_string(),
            gift_items: "GiftItems".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tables: TableConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup, falling back to the
    /// defaults for missing or blank values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        Self {
            tables: TableConfig {
                events: value(EVENTS_TABLE_VAR, defaults.tables.events),
                gift_lists: value(GIFT_LISTS_TABLE_VAR, defaults.tables.gift_lists),
                gift_items: value(GIFT_ITEMS_TABLE_VAR, defaults.tables.gift_items),
            },
            log_filter: value(LOG_FILTER_VAR, defaults.log_filter),
        }
    }
}
