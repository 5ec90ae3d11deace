use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ApiError, BackendClient};
use crate::calendar::{CalendarEvent, EventId};

#[derive(Debug, Serialize)]
struct NewEventPayload<'a> {
    title: &'a str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    color: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateEventPayload<'a> {
    id: &'a EventId,
    title: &'a str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    color: &'a str,
}

#[derive(Debug, Deserialize)]
struct EventBody {
    #[serde(default)]
    event: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct EventListBody {
    #[serde(default)]
    event: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalendarApi: Send + Sync {
    async fn fetch_events(&self, calendar_id: &str) -> Result<Vec<CalendarEvent>, ApiError>;

    /// Returns the stored event when the backend echoes it back.
    async fn create_event(
        &self,
        calendar_id: &str,
        event: &CalendarEvent,
    ) -> Result<Option<CalendarEvent>, ApiError>;

    async fn update_event(
        &self,
        calendar_id: &str,
        event: &CalendarEvent,
    ) -> Result<Option<CalendarEvent>, ApiError>;

    async fn delete_event(&self, calendar_id: &str, event_id: &EventId) -> Result<(), ApiError>;
}

fn events_path(calendar_id: &str) -> String {
    format!("/calendars/{}/events", urlencoding::encode(calendar_id))
}

fn event_path(calendar_id: &str, event_id: &EventId) -> String {
    format!(
        "{}/{}",
        events_path(calendar_id),
        urlencoding::encode(event_id.as_str())
    )
}

fn decode_event(value: serde_json::Value) -> Option<CalendarEvent> {
    let event: CalendarEvent = match serde_json::from_value(value) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Skipping malformed event: {}", e);
            return None;
        }
    };

    match event.validate() {
        Ok(()) => Some(event),
        Err(e) => {
            tracing::warn!("Skipping event {}: {}", event.id, e);
            None
        }
    }
}

#[async_trait]
impl CalendarApi for BackendClient {
    async fn fetch_events(&self, calendar_id: &str) -> Result<Vec<CalendarEvent>, ApiError> {
        tracing::info!("Fetching events for calendar {}", calendar_id);

        let request = self.client.get(self.url(&events_path(calendar_id)));
        let body: EventListBody = self.execute(request, "Fetch events").await?;

        let events: Vec<CalendarEvent> = body
            .event
            .unwrap_or_default()
            .into_iter()
            .filter_map(decode_event)
            .collect();

        tracing::info!("Fetched {} events successfully", events.len());
        Ok(events)
    }

    async fn create_event(
        &self,
        calendar_id: &str,
        event: &CalendarEvent,
    ) -> Result<Option<CalendarEvent>, ApiError> {
        let payload = NewEventPayload {
            title: &event.title,
            start: event.start,
            end: event.end,
            color: &event.color,
        };

        tracing::info!("Creating event: {} on {}", event.title, event.start);
        tracing::debug!("POST {} with payload: {:?}", events_path(calendar_id), payload);

        let request = self
            .client
            .post(self.url(&events_path(calendar_id)))
            .json(&payload);
        let body: EventBody = self.execute(request, "Create event").await?;

        let created = body.event.and_then(decode_event);
        if let Some(created) = &created {
            tracing::info!("Event created successfully with ID: {}", created.id);
        }
        Ok(created)
    }

    async fn update_event(
        &self,
        calendar_id: &str,
        event: &CalendarEvent,
    ) -> Result<Option<CalendarEvent>, ApiError> {
        let payload = UpdateEventPayload {
            id: &event.id,
            title: &event.title,
            start: event.start,
            end: event.end,
            color: &event.color,
        };
        let path = event_path(calendar_id, &event.id);

        tracing::info!("Updating event {}: {}", event.id, event.title);
        tracing::debug!("PUT {} with payload: {:?}", path, payload);

        let request = self.client.put(self.url(&path)).json(&payload);
        let body: EventBody = self.execute(request, "Update event").await?;

        tracing::info!("Event {} updated successfully", event.id);
        Ok(body.event.and_then(decode_event))
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &EventId) -> Result<(), ApiError> {
        tracing::info!("Deleting event {}", event_id);

        let request = self.client.delete(self.url(&event_path(calendar_id, event_id)));
        let body: MessageBody = self.execute(request, "Delete event").await?;

        tracing::info!(
            "Event {} deleted: {}",
            event_id,
            body.message.as_deref().unwrap_or("ok")
        );
        Ok(())
    }
}
