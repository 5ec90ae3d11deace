mod auth_screen;
mod dialogs;
mod month_grid;
mod presentation;
mod session;
mod sidebar;

pub use session::run_tui;
