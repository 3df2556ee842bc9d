//! Gift items and the reservation engine.
//!
//! Owners manage items but never see who reserved what: every read path
//! strips reservation data when the viewer owns the list. Reservations are
//! written with the version token from the read that produced them, so of
//! two racing reserve/unreserve calls only the first commits; the second is
//! rejected and must be resubmitted from a fresh read.
//!
//! Each list caches its item count. Item create/delete adjust it with a
//! second, independent write; item listing recomputes it and repairs drift.

use tracing::instrument;

use super::error::{ServiceError, ServiceResult};
use super::validation::{
    check_description, check_url, require_caller, require_key, require_name, require_quantity,
};
use crate::model::{
    Caller, CreateGiftItemRequest, GiftItem, GiftList, UpdateGiftItemRequest,
};
use crate::repository::{GiftItemRepository, GiftListRepository};
use crate::store::{EntityStore, Versioned};

#[derive(Clone)]
pub struct GiftItemService<S> {
    items: GiftItemRepository<S>,
    lists: GiftListRepository<S>,
}

/// Strip reservations from an item shown to the list owner.
fn masked_for(viewer_id: &str, list: &GiftList, mut item: GiftItem) -> GiftItem {
    if list.is_owned_by(viewer_id) {
        item.hide_reservations();
    }
    item
}

impl<S: EntityStore> GiftItemService<S> {
    pub fn new(items: GiftItemRepository<S>, lists: GiftListRepository<S>) -> Self {
        Self { items, lists }
    }

    fn parent_list(&self, gift_list_id: &str) -> ServiceResult<Versioned<GiftList>> {
        self.lists.find_by_id(gift_list_id)?.ok_or_else(|| {
            ServiceError::not_found(format!("Gift list '{}' not found", gift_list_id))
        })
    }

    fn require_owner(list: &GiftList, user_id: &str, action: &str) -> ServiceResult<()> {
        if !list.is_owned_by(user_id) {
            tracing::warn!(list = %list.id, "rejected item change by non-owner");
            return Err(ServiceError::validation(format!(
                "Only the owner of the gift list can {}",
                action
            )));
        }
        Ok(())
    }

    fn existing_item(
        &self,
        gift_list_id: &str,
        id: &str,
    ) -> ServiceResult<Versioned<GiftItem>> {
        self.items
            .get(gift_list_id, id)?
            .ok_or_else(|| ServiceError::not_found(format!("Gift item '{}' not found", id)))
    }

    /// Apply `delta` to a list's cached item count.
    ///
    /// Runs after the item write has committed and never fails the caller;
    /// a lost count update is repaired on the next listing.
    fn adjust_item_count(&self, list: &GiftList, delta: i32) {
        let result = self
            .lists
            .get(&list.event_name, &list.id)
            .and_then(|current| match current {
                Some(mut current) => {
                    current.data.item_count = current.data.item_count.saturating_add_signed(delta);
                    self.lists.update(current).map(Some)
                }
                None => Ok(None),
            });

        if let Err(err) = result {
            tracing::warn!(list = %list.id, delta, error = %err, "gift list item count not adjusted");
        }
    }

    /// Correct a list's cached count if it disagrees with `actual`.
    fn repair_item_count(&self, list: Versioned<GiftList>, actual: usize) {
        let actual = u32::try_from(actual).unwrap_or(u32::MAX);
        if list.data.item_count == actual {
            return;
        }

        tracing::warn!(
            list = %list.data.id,
            cached = list.data.item_count,
            actual,
            "repairing drifted gift list item count"
        );
        let mut list = list;
        list.data.item_count = actual;
        if let Err(err) = self.lists.update(list) {
            tracing::warn!(error = %err, "gift list item count repair failed");
        }
    }

    /// Add an item to a list. Only the list owner may do this.
    #[instrument(skip_all, fields(list = %request.gift_list_id, user = %caller.user_id))]
    pub fn create(&self, request: CreateGiftItemRequest, caller: &Caller) -> ServiceResult<GiftItem> {
        require_caller(&caller.user_id)?;
        require_key("Gift list id", &request.gift_list_id)?;
        require_name("Gift item name", &request.name)?;
        check_description(&request.description)?;
        check_url(request.url.as_deref())?;
        require_quantity(request.quantity)?;

        let list = self.parent_list(&request.gift_list_id)?.into_inner();
        Self::require_owner(&list, &caller.user_id, "add items")?;

        let created = self.items.create(GiftItem::new(request))?.into_inner();
        tracing::info!(item = %created.id, "gift item created");
        self.adjust_item_count(&list, 1);
        Ok(created)
    }

    /// Fetch one item as seen by `viewer_id`.
    pub fn get(
        &self,
        gift_list_id: &str,
        id: &str,
        viewer_id: &str,
    ) -> ServiceResult<Option<GiftItem>> {
        let list = self.parent_list(gift_list_id)?.into_inner();
        let Some(item) = self.items.get(gift_list_id, id)? else {
            return Ok(None);
        };

        Ok(Some(masked_for(viewer_id, &list, item.into_inner())))
    }

    /// Edit an item. Reservations and identity are preserved, and the new
    /// quantity is not checked against what is already reserved.
    #[instrument(skip_all, fields(list = %gift_list_id, item = %id, user = %user_id))]
    pub fn update(
        &self,
        gift_list_id: &str,
        id: &str,
        request: UpdateGiftItemRequest,
        user_id: &str,
    ) -> ServiceResult<GiftItem> {
        require_caller(user_id)?;
        require_name("Gift item name", &request.name)?;
        check_description(&request.description)?;
        check_url(request.url.as_deref())?;
        require_quantity(request.quantity)?;

        let list = self.parent_list(gift_list_id)?.into_inner();
        Self::require_owner(&list, user_id, "edit items")?;

        let mut item = self.existing_item(gift_list_id, id)?;
        item.data.apply(request);
        let updated = self.items.update(item)?.into_inner();
        tracing::info!("gift item updated");

        Ok(masked_for(user_id, &list, updated))
    }

    /// Remove an item. Returns false if it did not exist.
    #[instrument(skip_all, fields(list = %gift_list_id, item = %id, user = %user_id))]
    pub fn delete(&self, gift_list_id: &str, id: &str, user_id: &str) -> ServiceResult<bool> {
        require_caller(user_id)?;

        let list = self.parent_list(gift_list_id)?.into_inner();
        Self::require_owner(&list, user_id, "delete items")?;

        let deleted = self.items.delete(gift_list_id, id)?;
        if deleted {
            tracing::info!("gift item deleted");
            self.adjust_item_count(&list, -1);
        }
        Ok(deleted)
    }

    /// All items on a list as seen by `viewer_id`. Also repairs the list's
    /// cached item count.
    pub fn list_by_gift_list(
        &self,
        gift_list_id: &str,
        viewer_id: &str,
    ) -> ServiceResult<Vec<GiftItem>> {
        let list = self.parent_list(gift_list_id)?;
        let items = self.items.get_by_gift_list(gift_list_id)?;

        let view = list.data.clone();
        self.repair_item_count(list, items.len());
        Ok(items
            .into_iter()
            .map(|item| masked_for(viewer_id, &view, item.into_inner()))
            .collect())
    }

    /// Claim one unit of an item for `caller`.
    #[instrument(skip_all, fields(list = %gift_list_id, item = %id, user = %caller.user_id))]
    pub fn reserve(
        &self,
        gift_list_id: &str,
        id: &str,
        caller: &Caller,
    ) -> ServiceResult<GiftItem> {
        require_caller(&caller.user_id)?;

        let list = self.parent_list(gift_list_id)?.into_inner();
        if list.is_owned_by(&caller.user_id) {
            tracing::warn!("rejected reservation on own list");
            return Err(ServiceError::validation(
                "You cannot reserve items on your own gift list",
            ));
        }

        let mut item = self.existing_item(gift_list_id, id)?;
        let held = item.data.reserve(caller)?;

        let saved = self
            .items
            .update(item)
            .map_err(ServiceError::from_reservation_write)?
            .into_inner();
        tracing::info!(held, total = saved.total_reserved(), "gift item reserved");
        Ok(saved)
    }

    /// Give back one unit previously reserved by `user_id`.
    #[instrument(skip_all, fields(list = %gift_list_id, item = %id, user = %user_id))]
    pub fn unreserve(&self, gift_list_id: &str, id: &str, user_id: &str) -> ServiceResult<GiftItem> {
        require_caller(user_id)?;

        let list = self.parent_list(gift_list_id)?.into_inner();
        let mut item = self.existing_item(gift_list_id, id)?;
        let held = item.data.unreserve(user_id)?;

        let saved = self
            .items
            .update(item)
            .map_err(ServiceError::from_reservation_write)?
            .into_inner();
        tracing::info!(held, total = saved.total_reserved(), "gift item unreserved");

        Ok(masked_for(user_id, &list, saved))
    }

    /// Every item under an event's lists that `user_id` holds a reservation on.
    pub fn list_reserved_by_event_and_user(
        &self,
        event_name: &str,
        user_id: &str,
    ) -> ServiceResult<Vec<GiftItem>> {
        require_caller(user_id)?;

        let mut reserved = Vec::new();
        for list in self.lists.get_by_event(event_name)? {
            reserved.extend(
                self.items
                    .get_by_gift_list(&list.data.id)?
                    .into_iter()
                    .map(|item| item.into_inner())
                    .filter(|item| item.is_reserved_by(user_id))
                    .map(|item| masked_for(user_id, &list.data, item)),
            );
        }
        Ok(reserved)
    }
}
