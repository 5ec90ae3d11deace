use std::sync::Arc;

use tokio::sync::watch;

use super::StoreError;
use crate::api::CalendarApi;
use crate::calendar::{CalendarEvent, EventId};

/// Event list of the calendar currently on screen.
///
/// Local state changes only after the backend confirms a mutation. When two
/// requests race, whichever response arrives last is applied last.
pub struct EventStore {
    api: Arc<dyn CalendarApi>,
    events: watch::Sender<Vec<CalendarEvent>>,
}

impl EventStore {
    pub fn new(api: Arc<dyn CalendarApi>) -> Self {
        let (events, _) = watch::channel(Vec::new());
        Self { api, events }
    }

    pub fn events(&self) -> Vec<CalendarEvent> {
        self.events.borrow().clone()
    }

    pub fn find(&self, id: &EventId) -> Option<CalendarEvent> {
        self.events.borrow().iter().find(|e| &e.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<CalendarEvent>> {
        self.events.subscribe()
    }

    pub fn clear(&self) {
        self.events.send_if_modified(|events| {
            let changed = !events.is_empty();
            events.clear();
            changed
        });
    }

    pub async fn get_events(&self, calendar_id: &str) -> Result<(), StoreError> {
        let events = self.api.fetch_events(calendar_id).await?;
        tracing::debug!("Loaded {} events for calendar {}", events.len(), calendar_id);
        self.events.send_replace(events);
        Ok(())
    }

    /// Appends the event the backend stored, which carries the server id.
    /// Without a usable echo the list is reloaded so no provisional id is
    /// ever kept.
    pub async fn create_event(
        &self,
        event: CalendarEvent,
        calendar_id: &str,
    ) -> Result<CalendarEvent, StoreError> {
        event.validate().map_err(|e| StoreError::new(e.to_string()))?;

        let Some(stored) = self.api.create_event(calendar_id, &event).await? else {
            tracing::warn!("Create response had no usable event, reloading calendar {}", calendar_id);
            self.get_events(calendar_id).await?;
            let reloaded = self.events.borrow().iter().rev().find(|e| e.same_slot(&event)).cloned();
            return Ok(reloaded.unwrap_or(event));
        };

        self.events.send_modify(|events| events.push(stored.clone()));
        Ok(stored)
    }

    /// Replaces the entry with the same id. The backend echo drops the color,
    /// so the submitted event is what gets stored.
    pub async fn update_event(
        &self,
        event: CalendarEvent,
        calendar_id: &str,
    ) -> Result<(), StoreError> {
        event.validate().map_err(|e| StoreError::new(e.to_string()))?;

        self.api.update_event(calendar_id, &event).await?;

        self.events.send_if_modified(|events| {
            match events.iter_mut().find(|existing| existing.id == event.id) {
                Some(existing) => {
                    *existing = event;
                    true
                }
                None => {
                    tracing::debug!("Updated event {} is not loaded locally", event.id);
                    false
                }
            }
        });
        Ok(())
    }

    pub async fn delete_event(&self, event_id: &EventId, calendar_id: &str) -> Result<(), StoreError> {
        self.api.delete_event(calendar_id, event_id).await?;

        self.events.send_if_modified(|events| {
            let before = events.len();
            events.retain(|event| &event.id != event_id);
            events.len() != before
        });
        Ok(())
    }
}
