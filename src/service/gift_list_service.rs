//! Gift lists: owner-only edits, per-event listings.

use tracing::instrument;

use super::error::{ServiceError, ServiceResult};
use super::validation::{require_caller, require_key, require_name};
use crate::model::{Caller, CreateGiftListRequest, GiftList, UpdateGiftListRequest};
use crate::repository::{EventRepository, GiftItemRepository, GiftListRepository};
use crate::store::{EntityStore, Versioned};

#[derive(Clone)]
pub struct GiftListService<S> {
    lists: GiftListRepository<S>,
    events: EventRepository<S>,
    items: GiftItemRepository<S>,
}

impl<S: EntityStore> GiftListService<S> {
    pub fn new(
        lists: GiftListRepository<S>,
        events: EventRepository<S>,
        items: GiftItemRepository<S>,
    ) -> Self {
        Self {
            lists,
            events,
            items,
        }
    }

    /// Create a list owned by `caller` under an existing event.
    #[instrument(skip_all, fields(event = %request.event_name, user = %caller.user_id))]
    pub fn create(
        &self,
        request: CreateGiftListRequest,
        caller: &Caller,
    ) -> ServiceResult<GiftList> {
        require_caller(&caller.user_id)?;
        require_name("Gift list name", &request.name)?;
        require_key("Event name", &request.event_name)?;

        if !self.events.exists(&request.event_name)? {
            return Err(ServiceError::not_found(format!(
                "Event '{}' not found",
                request.event_name
            )));
        }

        let created = self.lists.create(GiftList::new(request, caller))?.into_inner();
        tracing::info!(list = %created.id, "gift list created");
        Ok(created)
    }

    pub fn get(&self, event_name: &str, id: &str) -> ServiceResult<Option<GiftList>> {
        Ok(self.lists.get(event_name, id)?.map(|list| list.into_inner()))
    }

    fn owned_list(
        &self,
        event_name: &str,
        id: &str,
        user_id: &str,
    ) -> ServiceResult<Option<Versioned<GiftList>>> {
        let Some(list) = self.lists.get(event_name, id)? else {
            return Ok(None);
        };

        if !list.data.is_owned_by(user_id) {
            tracing::warn!(list = %id, "rejected change by non-owner");
            return Err(ServiceError::validation(
                "Only the owner of a gift list can change it",
            ));
        }

        Ok(Some(list))
    }

    /// Rename a list. Only the owner may do this.
    #[instrument(skip_all, fields(event = %event_name, list = %id, user = %user_id))]
    pub fn update(
        &self,
        event_name: &str,
        id: &str,
        request: UpdateGiftListRequest,
        user_id: &str,
    ) -> ServiceResult<GiftList> {
        require_caller(user_id)?;
        require_name("Gift list name", &request.name)?;

        let mut list = self
            .owned_list(event_name, id, user_id)?
            .ok_or_else(|| ServiceError::not_found(format!("Gift list '{}' not found", id)))?;

        list.data.name = request.name.trim().to_string();
        let updated = self.lists.update(list)?.into_inner();
        tracing::info!("gift list updated");
        Ok(updated)
    }

    /// Delete a list and then, best-effort, its items. Returns false if the
    /// list did not exist. Only the owner may do this.
    #[instrument(skip_all, fields(event = %event_name, list = %id, user = %user_id))]
    pub fn delete(&self, event_name: &str, id: &str, user_id: &str) -> ServiceResult<bool> {
        require_caller(user_id)?;

        if self.owned_list(event_name, id, user_id)?.is_none() {
            return Ok(false);
        }

        let deleted = self.lists.delete(event_name, id)?;
        if deleted {
            tracing::info!("gift list deleted");
            self.delete_items_of(id);
        }
        Ok(deleted)
    }

    fn delete_items_of(&self, list_id: &str) {
        let items = match self.items.get_by_gift_list(list_id) {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(error = %err, "could not load items of deleted gift list");
                return;
            }
        };

        for item in items {
            if let Err(err) = self.items.delete(list_id, &item.data.id) {
                tracing::warn!(item = %item.data.id, error = %err, "could not delete orphaned gift item");
            }
        }
    }

    pub fn list_by_event(&self, event_name: &str) -> ServiceResult<Vec<GiftList>> {
        Ok(self
            .lists
            .get_by_event(event_name)?
            .into_iter()
            .map(|list| list.into_inner())
            .collect())
    }

    /// The caller's own lists for an event.
    pub fn list_by_event_and_owner(
        &self,
        event_name: &str,
        owner_id: &str,
    ) -> ServiceResult<Vec<GiftList>> {
        Ok(self
            .lists
            .get_by_event_and_owner(event_name, owner_id)?
            .into_iter()
            .map(|list| list.into_inner())
            .collect())
    }

    /// Everyone else's lists for an event.
    pub fn list_by_event_excluding_owner(
        &self,
        event_name: &str,
        owner_id: &str,
    ) -> ServiceResult<Vec<GiftList>> {
        Ok(self
            .list_by_event(event_name)?
            .into_iter()
            .filter(|list| !list.is_owned_by(owner_id))
            .collect())
    }
}
