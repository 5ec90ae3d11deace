pub mod color;
pub mod event;

pub use color::{generate_hex_color, parse_hex_color};
pub use event::{CalendarEvent, EventError, EventId};
