use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EventError {
    #[error("Start time must be before end time ({start} > {end})")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("Invalid date: {0}")]
    InvalidDate(NaiveDate),
}

/// Identity of a calendar event.
///
/// The backend hands out unsigned integers while locally created events carry
/// a provisional UUID until the server answers, so the id is kept as text and
/// converted at the wire boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn provisional() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_provisional(&self) -> bool {
        Uuid::parse_str(&self.0).is_ok()
    }

    fn as_number(&self) -> Option<u64> {
        if self.0.chars().all(|c| c.is_ascii_digit()) {
            self.0.parse().ok()
        } else {
            None
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for EventId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for EventId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_number() {
            Some(number) => serializer.serialize_u64(number),
            None => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(number) => EventId::from(number),
            RawId::Text(text) => EventId(text),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub color: String,
}

impl CalendarEvent {
    pub fn new(
        id: EventId,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        color: impl Into<String>,
    ) -> Result<Self, EventError> {
        let event = Self {
            id,
            title: title.into(),
            start,
            end,
            color: color.into(),
        };
        event.validate()?;
        Ok(event)
    }

    pub fn validate(&self) -> Result<(), EventError> {
        if self.start > self.end {
            return Err(EventError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns a copy moved by whole days, keeping the duration.
    pub fn shifted_by_days(&self, days: i64) -> Self {
        let offset = Duration::days(days);
        Self {
            start: self.start + offset,
            end: self.end + offset,
            ..self.clone()
        }
    }

    pub fn with_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, EventError> {
        let moved = Self {
            start,
            end,
            ..self.clone()
        };
        moved.validate()?;
        Ok(moved)
    }

    /// Same title and range, ignoring id and color.
    pub fn same_slot(&self, other: &CalendarEvent) -> bool {
        self.title == other.title && self.start == other.start && self.end == other.end
    }

    /// Whether the event covers any part of `date`. An event ending exactly at
    /// midnight does not spill into the next day.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        let Some(day_start) = date.and_hms_opt(0, 0, 0).map(|d| d.and_utc()) else {
            return false;
        };
        let day_end = day_start + Duration::days(1);

        if self.start == self.end {
            return self.start >= day_start && self.start < day_end;
        }
        self.start < day_end && self.end > day_start
    }
}
