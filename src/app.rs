use std::sync::Arc;

use crate::api::{ApiError, BackendClient};
use crate::storage::config::Config;
use crate::storage::session::{FileSessionStorage, SessionStorage};
use crate::store::{AuthResponse, AuthStore, EventStore, StoreError, VerifyResponse};
use crate::ui::theme::Theme;
use crate::view::{
    pages_accordion, Accordion, AuthForm, AuthMode, CalendarView, CodeForm, CreateOutcome,
    PageEntry, CODE_LENGTH,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Auth,
    Verify,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Calendar,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

impl Status {
    pub fn message(&self) -> &str {
        match self {
            Status::Info(message) | Status::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error(_))
    }
}

/// Work a key press asks for that needs the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    SubmitAuth,
    SendVerificationCode,
    SubmitVerificationCode,
    OpenCalendar(String),
    SubmitCreate,
    DropEvent,
    ConfirmDelete,
    Reload,
    SignOut,
}

/// Shared services handed to every screen.
pub struct AppContext {
    pub config: Config,
    pub auth: Arc<AuthStore>,
    pub events: Arc<EventStore>,
}

impl AppContext {
    pub fn new(config: Config, auth: Arc<AuthStore>, events: Arc<EventStore>) -> Self {
        Self {
            config,
            auth,
            events,
        }
    }

    /// Wires both stores to the configured backend and the per-session
    /// storage directory.
    pub fn connect(config: Config) -> Result<Self, ApiError> {
        let storage: Arc<dyn SessionStorage> = Arc::new(FileSessionStorage::for_current_session(
            config.session.storage_dir.as_deref(),
        ));
        let client = Arc::new(BackendClient::new(&config.api)?.with_session_storage(storage.clone()));
        tracing::info!("Using backend at {}", client.base_url());

        let auth = Arc::new(AuthStore::new(client.clone(), storage));
        let events = Arc::new(EventStore::new(client));
        Ok(Self::new(config, auth, events))
    }
}

pub struct AppState {
    pub screen: Screen,
    pub focus: Focus,
    pub auth_form: AuthForm,
    pub code_form: CodeForm,
    pub accordion: Accordion<PageEntry>,
    pub calendar: CalendarView,
    pub status: Option<Status>,
    pub theme: Theme,
    pub should_quit: bool,
    initial_calendar: Option<String>,
}

impl AppState {
    pub fn new(ctx: &AppContext) -> Self {
        let screen = if ctx.auth.is_authenticated() {
            Screen::Main
        } else {
            Screen::Auth
        };

        Self {
            screen,
            focus: Focus::Sidebar,
            auth_form: AuthForm::new(),
            code_form: CodeForm::new(),
            accordion: pages_accordion(&ctx.config.ui.calendars),
            calendar: CalendarView::new(),
            status: None,
            theme: Theme::get_by_name(&ctx.config.ui.theme),
            should_quit: false,
            initial_calendar: ctx.config.initial_calendar(None),
        }
    }

    /// A calendar picked on the command line replaces the configured default.
    pub fn with_initial_calendar(mut self, calendar_id: Option<String>) -> Self {
        if let Some(id) = calendar_id.filter(|id| !id.trim().is_empty()) {
            self.initial_calendar = Some(id);
        }
        self
    }

    /// Loads the first calendar when a restored session skips the sign-in
    /// screen.
    pub async fn start(&mut self, ctx: &AppContext) {
        if self.screen == Screen::Main {
            self.enter_main(ctx).await;
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.status = Some(Status::Info(message.into()));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.status = Some(Status::Error(message.into()));
    }

    pub async fn dispatch(&mut self, action: Action, ctx: &AppContext) {
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::SubmitAuth => self.submit_auth(ctx).await,
            Action::SendVerificationCode => self.send_code(ctx).await,
            Action::SubmitVerificationCode => self.submit_code(ctx).await,
            Action::OpenCalendar(id) => self.open_calendar(Some(id), ctx).await,
            Action::SubmitCreate => match self.calendar.submit_create(&ctx.events).await {
                Ok(CreateOutcome::Created(event)) => self.info(format!("Created \"{}\"", event.title)),
                Ok(CreateOutcome::Skipped) => {}
                Err(e) => self.report(e, ctx),
            },
            Action::DropEvent => match self.calendar.drop_event(&ctx.events).await {
                Ok(()) => self.status = None,
                Err(e) => self.report(e, ctx),
            },
            Action::ConfirmDelete => match self.calendar.confirm_delete(&ctx.events).await {
                Ok(()) => self.info("Event deleted"),
                Err(e) => self.report(e, ctx),
            },
            Action::Reload => {
                let current = self.calendar.calendar_id().map(str::to_string);
                self.open_calendar(current, ctx).await;
            }
            Action::SignOut => {
                self.sign_out(ctx);
                self.info("Signed out");
            }
        }
    }

    async fn submit_auth(&mut self, ctx: &AppContext) {
        if !self.auth_form.is_complete() {
            self.error("Email and password are required");
            return;
        }

        let user = self.auth_form.user();
        match self.auth_form.mode {
            AuthMode::Login => {
                let response = ctx.auth.login(&user).await;
                if self.accept_auth(response) {
                    self.info(format!("Signed in as {}", user.email));
                    self.enter_main(ctx).await;
                }
            }
            AuthMode::Register => {
                let response = ctx.auth.register(&user).await;
                if self.accept_auth(response) {
                    self.screen = Screen::Verify;
                    self.code_form.clear();
                    self.send_code(ctx).await;
                }
            }
        }
    }

    fn accept_auth(&mut self, response: AuthResponse) -> bool {
        match response.error {
            None => {
                self.auth_form.password.clear();
                true
            }
            Some(error) => {
                self.error(error);
                false
            }
        }
    }

    async fn send_code(&mut self, ctx: &AppContext) {
        match ctx.auth.send_verification_code().await {
            VerifyResponse::Message(message) => self.info(message),
            VerifyResponse::Error(error) => self.error(error),
        }
    }

    async fn submit_code(&mut self, ctx: &AppContext) {
        if !self.code_form.is_complete() {
            self.error(format!("Enter all {CODE_LENGTH} digits"));
            return;
        }

        match ctx.auth.verify_code(&self.code_form.digits()).await {
            VerifyResponse::Message(message) => {
                self.info(message);
                self.enter_main(ctx).await;
            }
            VerifyResponse::Error(error) => {
                self.error(error);
                self.code_form.clear();
            }
        }
    }

    async fn enter_main(&mut self, ctx: &AppContext) {
        self.screen = Screen::Main;
        let initial = self.initial_calendar.clone();
        self.open_calendar(initial, ctx).await;
    }

    async fn open_calendar(&mut self, calendar_id: Option<String>, ctx: &AppContext) {
        let has_calendar = calendar_id.is_some();
        match self.calendar.open(calendar_id, &ctx.events).await {
            Ok(()) if has_calendar => self.focus = Focus::Calendar,
            Ok(()) => self.focus = Focus::Sidebar,
            Err(e) => self.report(e, ctx),
        }
    }

    /// Returns to the sign-in screen with nothing of the old session left.
    fn sign_out(&mut self, ctx: &AppContext) {
        ctx.auth.sign_out();
        ctx.events.clear();
        self.calendar = CalendarView::new();
        self.auth_form.password.clear();
        self.code_form.clear();
        self.focus = Focus::Sidebar;
        self.screen = Screen::Auth;
    }

    fn report(&mut self, err: StoreError, ctx: &AppContext) {
        if err.session_expired {
            tracing::info!("Backend refused the session: {}", err.error);
            self.sign_out(ctx);
            self.error(format!("Session expired, please sign in again ({})", err.error));
            return;
        }
        self.error(err.error);
    }
}
