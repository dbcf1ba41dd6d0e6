// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interactive terminal front-end.
//!
//! Keys are read on a blocking thread and forwarded over a channel; the async loop races
//! them against [`Session::step`] and a redraw tick so timers fire while the user is idle.

use std::error::Error;
use std::io;
use std::thread;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::session::{runtime_now, Session};
use crate::store::Action;

mod chrome;
mod theme;

use theme::TuiTheme;

const KEY_POLL_INTERVAL: Duration = Duration::from_millis(250);
/// Redraw cadence; fast enough for the row cascade to read as motion.
const FRAME_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Search,
    Grid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyCommand {
    Dispatch(Action),
    FocusSearch,
    FocusGrid,
    Quit,
    Ignore,
}

/// Runs the interactive terminal UI until the user quits.
pub async fn run(session: Session) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(session, TuiTheme);
    let mut keys = spawn_key_reader();
    let mut frames = tokio::time::interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    while !app.should_quit {
        terminal.draw(|frame| app.draw(frame))?;

        tokio::select! {
            key = keys.recv() => match key {
                Some(Ok(key)) => app.handle_key(key),
                Some(Err(err)) => return Err(err.into()),
                None => app.should_quit = true,
            },
            Some(event) = app.session.step(), if app.session.has_pending_work() => {
                tracing::trace!(?event, "session stepped");
            }
            _ = frames.tick() => {}
        }
    }

    app.session.teardown();
    Ok(())
}

fn spawn_key_reader() -> mpsc::UnboundedReceiver<io::Result<KeyEvent>> {
    let (tx, rx) = mpsc::unbounded_channel();
    thread::spawn(move || loop {
        match event::poll(KEY_POLL_INTERVAL) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(Ok(key)).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    let _ = tx.send(Err(err));
                    break;
                }
            },
            Ok(false) => {
                if tx.is_closed() {
                    break;
                }
            }
            Err(err) => {
                let _ = tx.send(Err(err));
                break;
            }
        }
    });
    rx
}

struct App {
    session: Session,
    theme: TuiTheme,
    focus: Focus,
    should_quit: bool,
}

impl App {
    fn new(session: Session, theme: TuiTheme) -> Self {
        Self {
            session,
            theme,
            focus: Focus::Search,
            should_quit: false,
        }
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let snapshot = self.session.store().snapshot(runtime_now());
        chrome::draw(frame, &snapshot, self.focus, &self.theme);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let query = self.session.store().filter().raw_query();
        match command_for_key(self.focus, query, key) {
            KeyCommand::Dispatch(action) => {
                let selecting = matches!(action, Action::SelectHighlighted);
                self.session.dispatch(action);
                if selecting && self.session.store().workflow().is_loading() {
                    self.focus = Focus::Grid;
                }
            }
            KeyCommand::FocusSearch => {
                self.focus = Focus::Search;
                self.session.dispatch(Action::OpenDropdown);
            }
            KeyCommand::FocusGrid => {
                self.focus = Focus::Grid;
                self.session.dispatch(Action::CloseDropdown);
            }
            KeyCommand::Quit => self.should_quit = true,
            KeyCommand::Ignore => {}
        }
    }
}

fn command_for_key(focus: Focus, query: &str, key: KeyEvent) -> KeyCommand {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => KeyCommand::Quit,
            KeyCode::Char('l') => KeyCommand::Dispatch(Action::Clear),
            KeyCode::Char('u') if focus == Focus::Search => {
                KeyCommand::Dispatch(Action::QueryChanged(String::new()))
            }
            _ => KeyCommand::Ignore,
        };
    }

    match (focus, key.code) {
        (Focus::Search, KeyCode::Tab | KeyCode::BackTab) => KeyCommand::FocusGrid,
        (Focus::Grid, KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('/')) => {
            KeyCommand::FocusSearch
        }
        (Focus::Search, KeyCode::Char(ch)) => {
            KeyCommand::Dispatch(Action::QueryChanged(format!("{query}{ch}")))
        }
        (Focus::Search, KeyCode::Backspace) => {
            let mut next = query.to_owned();
            if next.pop().is_none() {
                return KeyCommand::Ignore;
            }
            KeyCommand::Dispatch(Action::QueryChanged(next))
        }
        (Focus::Search, KeyCode::Down) => KeyCommand::Dispatch(Action::MoveHighlight(1)),
        (Focus::Search, KeyCode::Up) => KeyCommand::Dispatch(Action::MoveHighlight(-1)),
        (Focus::Search, KeyCode::Enter) => KeyCommand::Dispatch(Action::SelectHighlighted),
        (Focus::Search, KeyCode::Esc) => KeyCommand::Dispatch(Action::CloseDropdown),
        (Focus::Grid, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('e')) => {
            KeyCommand::Dispatch(Action::ToggleExpanded)
        }
        (Focus::Grid, KeyCode::Char('x')) => KeyCommand::Dispatch(Action::Clear),
        (Focus::Grid, KeyCode::Char('d')) => KeyCommand::Dispatch(Action::DismissLatest),
        (Focus::Grid, KeyCode::Char('q') | KeyCode::Esc) => KeyCommand::Quit,
        _ => KeyCommand::Ignore,
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}
