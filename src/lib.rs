pub mod api;
pub mod app;
pub mod calendar;
pub mod input;
pub mod storage;
pub mod store;
pub mod ui;
pub mod view;

pub use app::{Action, AppContext, AppState, Focus, Screen, Status};
pub use calendar::{CalendarEvent, EventId};
pub use store::{AuthStore, EventStore, SessionIdentity};
