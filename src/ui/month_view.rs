use chrono::{Datelike, NaiveDate};

use crate::calendar::CalendarEvent;
use crate::view::SelectedDates;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_cursor: bool,
    pub is_today: bool,
    pub in_selection: bool,
    pub is_current_month: bool,
    /// Colors of the events on this day, in start order.
    pub event_colors: Vec<String>,
}

impl DayCell {
    pub fn has_events(&self) -> bool {
        !self.event_colors.is_empty()
    }
}

/// Inputs for one month grid.
pub struct GridState<'a> {
    pub cursor: NaiveDate,
    pub today: NaiveDate,
    pub selection: Option<SelectedDates>,
    pub events: &'a [CalendarEvent],
}

/// Lays out the month containing the cursor as Monday-first weeks, padded
/// with days of the neighbouring months.
pub fn calculate_layout(state: &GridState<'_>) -> MonthLayout {
    let year = state.cursor.year();
    let month = state.cursor.month();

    let Some(first_day) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return MonthLayout { year, month, weeks: Vec::new() };
    };

    let days_before = u64::from(first_day.weekday().num_days_from_monday());
    let Some(mut current) = first_day.checked_sub_days(chrono::Days::new(days_before)) else {
        return MonthLayout { year, month, weeks: Vec::new() };
    };

    let mut weeks = Vec::new();
    loop {
        let mut week = Week { days: Vec::with_capacity(7) };
        for _ in 0..7 {
            week.days.push(day_cell(state, current, month));
            let Some(next) = current.succ_opt() else { break };
            current = next;
        }
        weeks.push(week);
        // `current` is now the Monday after the week just laid out.
        if current.month() != month || weeks.len() >= 6 {
            break;
        }
    }

    MonthLayout { year, month, weeks }
}

fn day_cell(state: &GridState<'_>, date: NaiveDate, month: u32) -> DayCell {
    let mut events: Vec<&CalendarEvent> = state
        .events
        .iter()
        .filter(|event| event.occurs_on(date))
        .collect();
    events.sort_by_key(|event| event.start);

    DayCell {
        date,
        is_cursor: date == state.cursor,
        is_today: date == state.today,
        in_selection: state.selection.is_some_and(|s| s.contains(date)),
        is_current_month: date.month() == month,
        event_colors: events.into_iter().map(|event| event.color.clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::EventId;
    use chrono::Weekday;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn event_on(id: &str, day: NaiveDate) -> CalendarEvent {
        let start = day.and_hms_opt(10, 0, 0).unwrap().and_utc();
        CalendarEvent::new(EventId::new(id), "Event", start, start + chrono::Duration::hours(1), "#ff0000")
            .unwrap()
    }

    fn grid(cursor: NaiveDate, events: &[CalendarEvent]) -> MonthLayout {
        calculate_layout(&GridState {
            cursor,
            today: date(2000, 1, 1),
            selection: None,
            events,
        })
    }

    #[test]
    fn month_layout_has_correct_year_and_month() {
        let layout = grid(date(2025, 1, 15), &[]);

        assert_eq!(layout.year, 2025);
        assert_eq!(layout.month, 1);
    }

    #[test]
    fn each_week_has_seven_days_starting_monday() {
        let layout = grid(date(2025, 1, 15), &[]);

        for week in &layout.weeks {
            assert_eq!(week.days.len(), 7);
            assert_eq!(week.days[0].date.weekday(), Weekday::Mon);
        }
    }

    #[test]
    fn january_2025_spans_five_weeks() {
        let layout = grid(date(2025, 1, 15), &[]);

        assert_eq!(layout.weeks.len(), 5);
        assert_eq!(layout.weeks[0].days[0].date, date(2024, 12, 30));
        assert_eq!(layout.weeks[4].days[6].date, date(2025, 2, 2));
    }

    #[test]
    fn month_ending_on_sunday_adds_no_extra_week() {
        // August 2025 ends on a Sunday.
        let layout = grid(date(2025, 8, 10), &[]);

        assert_eq!(layout.weeks.last().unwrap().days[6].date, date(2025, 8, 31));
    }

    #[test]
    fn cursor_date_is_marked_once() {
        let layout = grid(date(2025, 1, 15), &[]);

        let cursor_cells: Vec<_> = layout
            .weeks
            .iter()
            .flat_map(|w| &w.days)
            .filter(|c| c.is_cursor)
            .collect();

        assert_eq!(cursor_cells.len(), 1);
        assert_eq!(cursor_cells[0].date, date(2025, 1, 15));
    }

    #[test]
    fn cells_with_events_carry_their_colors() {
        let events = vec![event_on("1", date(2025, 1, 10))];

        let layout = grid(date(2025, 1, 15), &events);

        let cell = layout
            .weeks
            .iter()
            .flat_map(|w| &w.days)
            .find(|c| c.date == date(2025, 1, 10))
            .unwrap();
        assert!(cell.has_events());
        assert_eq!(cell.event_colors, vec!["#ff0000"]);
    }

    #[test]
    fn selection_marks_exclusive_range() {
        let selection = SelectedDates::spanning(date(2025, 1, 6), date(2025, 1, 7));
        let layout = calculate_layout(&GridState {
            cursor: date(2025, 1, 7),
            today: date(2025, 1, 1),
            selection,
            events: &[],
        });

        let selected: Vec<_> = layout
            .weeks
            .iter()
            .flat_map(|w| &w.days)
            .filter(|c| c.in_selection)
            .map(|c| c.date)
            .collect();

        assert_eq!(selected, vec![date(2025, 1, 6), date(2025, 1, 7)]);
    }

    #[test]
    fn previous_month_days_marked_as_not_current() {
        let layout = grid(date(2025, 1, 15), &[]);

        assert!(!layout.weeks[0].days[0].is_current_month);
    }
}
