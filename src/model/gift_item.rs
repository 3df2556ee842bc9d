use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{new_id, Caller, CreateGiftItemRequest, UpdateGiftItemRequest};
use crate::TableEntity;

/// One user's claim on some quantity of a gift item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub user_id: String,
    pub display_name: String,
    pub quantity: u32,
}

/// Why a reservation change was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    #[error("gift item is fully reserved ({reserved} of {quantity})")]
    FullyReserved { reserved: u32, quantity: u32 },
    #[error("user {0} has no reservation on this gift item")]
    NoReservation(String),
}

/// A wanted gift on a list, with the reservations made against it.
///
/// The reservation collection is the single source of truth; totals and the
/// fully-reserved flag are computed from it on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TableEntity)]
pub struct GiftItem {
    #[table(row)]
    pub id: String,
    #[table(partition)]
    pub gift_list_id: String,
    pub name: String,
    pub description: String,
    pub url: Option<String>,
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

impl GiftItem {
    pub fn new(request: CreateGiftItemRequest) -> Self {
        Self {
            id: new_id(),
            gift_list_id: request.gift_list_id,
            name: request.name.trim().to_string(),
            description: request.description,
            url: request.url,
            quantity: request.quantity,
            created_at: Utc::now(),
            reservations: Vec::new(),
        }
    }

    /// Overwrite the editable fields. Id, list and reservations are kept,
    /// and the new quantity may fall below what is already reserved.
    pub fn apply(&mut self, update: UpdateGiftItemRequest) {
        self.name = update.name.trim().to_string();
        self.description = update.description;
        self.url = update.url;
        self.quantity = update.quantity;
    }

    pub fn total_reserved(&self) -> u32 {
        self.reservations.iter().map(|r| r.quantity).sum()
    }

    pub fn is_fully_reserved(&self) -> bool {
        self.total_reserved() >= self.quantity
    }

    /// Units still unclaimed. Zero when overbooked.
    pub fn remaining(&self) -> u32 {
        self.quantity.saturating_sub(self.total_reserved())
    }

    pub fn reservation_for(&self, user_id: &str) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.user_id == user_id)
    }

    pub fn is_reserved_by(&self, user_id: &str) -> bool {
        self.reservation_for(user_id).is_some()
    }

    /// Read-only view of the earliest reservation, for callers that only
    /// show a single "reserved by" name.
    pub fn first_reservation(&self) -> Option<&Reservation> {
        self.reservations.first()
    }

    /// Claim one more unit for `caller`. Returns the caller's new quantity.
    pub fn reserve(&mut self, caller: &Caller) -> Result<u32, ReservationError> {
        let reserved = self.total_reserved();
        if reserved >= self.quantity {
            return Err(ReservationError::FullyReserved {
                reserved,
                quantity: self.quantity,
            });
        }

        match self
            .reservations
            .iter_mut()
            .find(|r| r.user_id == caller.user_id)
        {
            Some(existing) => {
                existing.quantity += 1;
                Ok(existing.quantity)
            }
            None => {
                self.reservations.push(Reservation {
                    user_id: caller.user_id.clone(),
                    display_name: caller.display_name.clone(),
                    quantity: 1,
                });
                Ok(1)
            }
        }
    }

    /// Give back one unit held by `user_id`. Returns what the user still
    /// holds; the record is dropped when that reaches zero.
    pub fn unreserve(&mut self, user_id: &str) -> Result<u32, ReservationError> {
        let index = self
            .reservations
            .iter()
            .position(|r| r.user_id == user_id)
            .ok_or_else(|| ReservationError::NoReservation(user_id.to_string()))?;

        let remaining = self.reservations[index].quantity.saturating_sub(1);
        if remaining == 0 {
            self.reservations.remove(index);
        } else {
            self.reservations[index].quantity = remaining;
        }

        Ok(remaining)
    }

    /// Drop reservation data from this copy. Stored data is unaffected.
    pub fn hide_reservations(&mut self) {
        self.reservations.clear();
    }
}
