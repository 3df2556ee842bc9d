//! Events: creation, lookup, creator-only edits.

use tracing::instrument;

use super::error::{ServiceError, ServiceResult};
use super::validation::{check_description, require_caller, require_key, require_name};
use crate::model::{Caller, CreateEventRequest, Event, UpdateEventRequest};
use crate::repository::EventRepository;
use crate::store::EntityStore;

#[derive(Clone)]
pub struct EventService<S> {
    events: EventRepository<S>,
}

impl<S: EntityStore> EventService<S> {
    pub fn new(events: EventRepository<S>) -> Self {
        Self { events }
    }

    /// Create an event. The name must not be taken.
    #[instrument(skip_all, fields(event = %request.name, user = %caller.user_id))]
    pub fn create(&self, request: CreateEventRequest, caller: &Caller) -> ServiceResult<Event> {
        require_caller(&caller.user_id)?;
        require_name("Event name", &request.name)?;
        check_description(&request.description)?;

        let event = Event::new(request, caller);
        if self.events.exists(&event.name)? {
            return Err(ServiceError::validation(format!(
                "An event named '{}' already exists",
                event.name
            )));
        }

        let created = self.events.create(event)?.into_inner();
        tracing::info!("event created");
        Ok(created)
    }

    pub fn get(&self, name: &str) -> ServiceResult<Option<Event>> {
        Ok(self.events.get(name)?.map(|event| event.into_inner()))
    }

    /// Change description and date. Only the creator may do this.
    #[instrument(skip_all, fields(event = %name, user = %user_id))]
    pub fn update(
        &self,
        name: &str,
        request: UpdateEventRequest,
        user_id: &str,
    ) -> ServiceResult<Event> {
        require_caller(user_id)?;
        require_key("Event name", name)?;
        check_description(&request.description)?;

        let mut event = self
            .events
            .get(name)?
            .ok_or_else(|| ServiceError::not_found(format!("Event '{}' not found", name)))?;

        if !event.data.is_created_by(user_id) {
            tracing::warn!("rejected edit by non-creator");
            return Err(ServiceError::validation(
                "Only the creator of an event can edit it",
            ));
        }

        event.data.apply(request);
        let updated = self.events.update(event)?.into_inner();
        tracing::info!("event updated");
        Ok(updated)
    }

    /// Delete an event. Returns false if it did not exist.
    ///
    /// Any identified caller may delete; there is no creator check here.
    #[instrument(skip_all, fields(event = %name, user = %user_id))]
    pub fn delete(&self, name: &str, user_id: &str) -> ServiceResult<bool> {
        require_caller(user_id)?;
        require_key("Event name", name)?;

        let deleted = self.events.delete(name)?;
        if deleted {
            tracing::info!("event deleted");
        }
        Ok(deleted)
    }

    pub fn list_all(&self) -> ServiceResult<Vec<Event>> {
        Ok(self
            .events
            .get_all()?
            .into_iter()
            .map(|event| event.into_inner())
            .collect())
    }
}
