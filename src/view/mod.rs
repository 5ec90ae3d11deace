pub mod accordion;
pub mod auth_form;
pub mod calendar_view;

pub use accordion::{pages_accordion, Accordion, AccordionItem, AccordionRow, Icon, PageEntry};
pub use auth_form::{AuthField, AuthForm, AuthMode, CodeForm, CODE_LENGTH};
pub use calendar_view::{CalendarView, CreateOutcome, Phase, SelectedDates};
