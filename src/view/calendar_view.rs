use chrono::{DateTime, Days, Local, Months, NaiveDate, Utc};

use crate::calendar::{CalendarEvent, EventError, EventId, generate_hex_color};
use crate::store::{EventStore, StoreError};

/// Day-grid selection. `end` is exclusive: picking a single day `d` gives
/// `d..d+1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedDates {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SelectedDates {
    /// Builds the exclusive range covering both days, in either order.
    pub fn spanning(a: NaiveDate, b: NaiveDate) -> Option<Self> {
        let (first, last) = if a <= b { (a, b) } else { (b, a) };
        Some(Self {
            start: first,
            end: last.checked_add_days(Days::new(1))?,
        })
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    fn to_utc(self) -> Result<(DateTime<Utc>, DateTime<Utc>), EventError> {
        let start = midnight_utc(self.start)?;
        let end = midnight_utc(self.end)?;
        Ok((start, end))
    }
}

fn midnight_utc(date: NaiveDate) -> Result<DateTime<Utc>, EventError> {
    date.and_hms_opt(0, 0, 0)
        .map(|d| d.and_utc())
        .ok_or(EventError::InvalidDate(date))
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    SelectingRange { anchor: NaiveDate },
    CreateModalOpen { dates: SelectedDates, title: String },
    DeleteModalOpen { event_id: EventId },
    /// Keyboard drag: the event is previewed `offset_days` away from its
    /// stored position until dropped.
    Dragging { event_id: EventId, offset_days: i64 },
}

/// What a create submission did.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created(CalendarEvent),
    /// A precondition was missing; the modal closed without a request.
    Skipped,
}

pub struct CalendarView {
    calendar_id: Option<String>,
    pub phase: Phase,
    pub cursor: NaiveDate,
    pub selected_event_index: usize,
}

impl CalendarView {
    pub fn new() -> Self {
        Self {
            calendar_id: None,
            phase: Phase::Idle,
            cursor: Local::now().date_naive(),
            selected_event_index: 0,
        }
    }

    pub fn calendar_id(&self) -> Option<&str> {
        self.calendar_id.as_deref()
    }

    /// Points the view at a calendar and loads its events. Without an id no
    /// request is made and the list is emptied.
    pub async fn open(
        &mut self,
        calendar_id: Option<String>,
        store: &EventStore,
    ) -> Result<(), StoreError> {
        self.calendar_id = calendar_id.filter(|id| !id.trim().is_empty());
        self.phase = Phase::Idle;
        self.selected_event_index = 0;

        match &self.calendar_id {
            Some(id) => store.get_events(id).await,
            None => {
                store.clear();
                Ok(())
            }
        }
    }

    pub fn move_cursor_days(&mut self, days: i64) {
        let moved = if days >= 0 {
            self.cursor.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.cursor.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(date) = moved {
            self.cursor = date;
            self.selected_event_index = 0;
        }
    }

    pub fn move_cursor_months(&mut self, months: i32) {
        let moved = if months >= 0 {
            self.cursor.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.cursor.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        if let Some(date) = moved {
            self.cursor = date;
            self.selected_event_index = 0;
        }
    }

    pub fn jump_to_today(&mut self) {
        self.cursor = Local::now().date_naive();
        self.selected_event_index = 0;
    }

    pub fn events_on(&self, store: &EventStore, date: NaiveDate) -> Vec<CalendarEvent> {
        let mut events: Vec<CalendarEvent> = store
            .events()
            .into_iter()
            .filter(|event| event.occurs_on(date))
            .collect();
        events.sort_by_key(|event| event.start);
        events
    }

    pub fn selected_event(&self, store: &EventStore) -> Option<CalendarEvent> {
        self.events_on(store, self.cursor)
            .into_iter()
            .nth(self.selected_event_index)
    }

    pub fn cycle_event_selection(&mut self, store: &EventStore) {
        let count = self.events_on(store, self.cursor).len();
        self.selected_event_index = if count == 0 {
            0
        } else {
            (self.selected_event_index + 1) % count
        };
    }

    pub fn begin_selection(&mut self) {
        if self.phase == Phase::Idle {
            self.phase = Phase::SelectingRange {
                anchor: self.cursor,
            };
        }
    }

    pub fn selection(&self) -> Option<SelectedDates> {
        match &self.phase {
            Phase::SelectingRange { anchor } => SelectedDates::spanning(*anchor, self.cursor),
            Phase::CreateModalOpen { dates, .. } => Some(*dates),
            _ => None,
        }
    }

    /// Ends a range selection at the cursor and opens the create modal.
    pub fn finish_selection(&mut self) {
        if let Some(dates) = self.selection() {
            self.select_range(dates);
        }
    }

    pub fn select_range(&mut self, dates: SelectedDates) {
        self.phase = Phase::CreateModalOpen {
            dates,
            title: String::new(),
        };
    }

    pub fn create_title_mut(&mut self) -> Option<&mut String> {
        match &mut self.phase {
            Phase::CreateModalOpen { title, .. } => Some(title),
            _ => None,
        }
    }

    pub fn cancel_create(&mut self) {
        if matches!(
            self.phase,
            Phase::CreateModalOpen { .. } | Phase::SelectingRange { .. }
        ) {
            self.phase = Phase::Idle;
        }
    }

    /// Closes the create modal, creating the event when a title, a range and
    /// a calendar are all present.
    pub async fn submit_create(&mut self, store: &EventStore) -> Result<CreateOutcome, StoreError> {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        let Phase::CreateModalOpen { dates, title } = phase else {
            self.phase = phase;
            return Ok(CreateOutcome::Skipped);
        };

        let title = title.trim();
        let Some(calendar_id) = self.calendar_id.as_deref() else {
            tracing::debug!("No calendar open, dropping new event");
            return Ok(CreateOutcome::Skipped);
        };
        if title.is_empty() {
            tracing::debug!("Empty title, dropping new event");
            return Ok(CreateOutcome::Skipped);
        }

        let (start, end) = dates.to_utc().map_err(|e| StoreError::new(e.to_string()))?;
        let event = CalendarEvent::new(EventId::provisional(), title, start, end, generate_hex_color())
            .map_err(|e| StoreError::new(e.to_string()))?;

        store
            .create_event(event, calendar_id)
            .await
            .map(CreateOutcome::Created)
    }

    pub fn click_event(&mut self, event_id: EventId) {
        self.phase = Phase::DeleteModalOpen { event_id };
    }

    pub fn cancel_delete(&mut self) {
        if matches!(self.phase, Phase::DeleteModalOpen { .. }) {
            self.phase = Phase::Idle;
        }
    }

    pub async fn confirm_delete(&mut self, store: &EventStore) -> Result<(), StoreError> {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        let Phase::DeleteModalOpen { event_id } = phase else {
            self.phase = phase;
            return Ok(());
        };
        let Some(calendar_id) = self.calendar_id.as_deref() else {
            return Ok(());
        };

        store.delete_event(&event_id, calendar_id).await?;
        self.selected_event_index = 0;
        Ok(())
    }

    pub fn begin_drag(&mut self, event_id: EventId) {
        self.phase = Phase::Dragging {
            event_id,
            offset_days: 0,
        };
    }

    pub fn nudge_drag(&mut self, days: i64) {
        if let Phase::Dragging { offset_days, .. } = &mut self.phase {
            *offset_days += days;
            self.move_cursor_days(days);
        }
    }

    pub fn cancel_drag(&mut self) {
        if let Phase::Dragging { offset_days, .. } = self.phase {
            self.phase = Phase::Idle;
            self.move_cursor_days(-offset_days);
        }
    }

    /// Drops a dragged event at its previewed position.
    pub async fn drop_event(&mut self, store: &EventStore) -> Result<(), StoreError> {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        let Phase::Dragging { event_id, offset_days } = phase else {
            self.phase = phase;
            return Ok(());
        };
        if offset_days == 0 {
            return Ok(());
        }
        let Some(event) = store.find(&event_id) else {
            tracing::debug!("Dragged event {} is gone", event_id);
            return Ok(());
        };

        let moved = event.shifted_by_days(offset_days);
        self.reschedule(&event_id, moved.start, moved.end, store).await
    }

    /// Sends `event_id` with a new time range to the backend.
    pub async fn reschedule(
        &mut self,
        event_id: &EventId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        store: &EventStore,
    ) -> Result<(), StoreError> {
        let Some(calendar_id) = self.calendar_id.as_deref() else {
            return Ok(());
        };
        let Some(event) = store.find(event_id) else {
            return Ok(());
        };

        let updated = event
            .with_range(start, end)
            .map_err(|e| StoreError::new(e.to_string()))?;
        store.update_event(updated, calendar_id).await
    }

    pub fn dragged_event_preview(&self, store: &EventStore) -> Option<CalendarEvent> {
        match &self.phase {
            Phase::Dragging { event_id, offset_days } => store
                .find(event_id)
                .map(|event| event.shifted_by_days(*offset_days)),
            _ => None,
        }
    }
}

impl Default for CalendarView {
    fn default() -> Self {
        Self::new()
    }
}
