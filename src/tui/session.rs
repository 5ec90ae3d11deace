use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use lifesync::{
    app::{Action, AppContext, AppState},
    input,
};

use crate::tui::presentation::ui;

const INPUT_POLL: Duration = Duration::from_millis(250);

pub async fn run_tui(ctx: &AppContext, initial_calendar: Option<String>) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppState::new(ctx).with_initial_calendar(initial_calendar);

    terminal.draw(|f| ui(f, &app, ctx)).ok();
    app.start(ctx).await;

    let res = run_app(&mut terminal, &mut app, ctx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("Terminal session ended with error: {}", err);
        eprintln!("Error: {err}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    ctx: &AppContext,
) -> io::Result<()> {
    let mut identity = ctx.auth.subscribe();
    let mut events = ctx.events.subscribe();
    let mut redraw = true;

    loop {
        // Store changes mark the view stale; key presses always repaint.
        if identity.has_changed().unwrap_or(false) || events.has_changed().unwrap_or(false) {
            identity.borrow_and_update();
            events.borrow_and_update();
            redraw = true;
        }
        if redraw {
            terminal.draw(|f| ui(f, app, ctx))?;
            redraw = false;
        }

        if !event::poll(INPUT_POLL)? {
            continue;
        }
        let key = match event::read()? {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => key,
            TermEvent::Resize(..) => {
                redraw = true;
                continue;
            }
            _ => continue,
        };

        redraw = true;
        let action = if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            Action::Quit
        } else {
            input::handle_key(key.code, app, &ctx.events)
        };

        if action != Action::None {
            tracing::debug!("Dispatching {:?}", action);
        }
        app.dispatch(action, ctx).await;

        if app.should_quit {
            return Ok(());
        }
    }
}
