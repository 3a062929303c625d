//! Event intake: blocks on terminal events and reacts to resize and quit.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use wirecube_core::Surface;

/// The events the renderer distinguishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Resize { cols: u16, rows: u16 },
    Key(KeyEvent),
    /// Mouse, paste and focus events
    Other,
}

impl From<Event> for InputEvent {
    fn from(event: Event) -> Self {
        match event {
            Event::Resize(cols, rows) => InputEvent::Resize { cols, rows },
            Event::Key(key) => InputEvent::Key(key),
            _ => InputEvent::Other,
        }
    }
}

/// Esc or Ctrl+C, on press only
pub fn is_quit(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// A blocking source of discrete input events
pub trait EventSource {
    fn next_event(&mut self) -> io::Result<InputEvent>;
}

/// Reads events from the terminal's event queue
#[derive(Debug, Default)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn next_event(&mut self) -> io::Result<InputEvent> {
        event::read().map(InputEvent::from)
    }
}

/// Service events until a quit key arrives.
///
/// Resize events resync the surface. On quit the surface is cleared and
/// finalized before returning; the caller decides how the process ends.
pub fn run_event_loop<S, E>(surface: &S, events: &mut E) -> io::Result<()>
where
    S: Surface + ?Sized,
    E: EventSource + ?Sized,
{
    loop {
        match events.next_event()? {
            InputEvent::Resize { cols, rows } => {
                log::debug!("resize to {}x{}", cols, rows);
                surface.sync();
            }
            InputEvent::Key(key) if is_quit(&key) => {
                log::info!("quit requested");
                surface.clear();
                surface.fini();
                return Ok(());
            }
            InputEvent::Key(_) | InputEvent::Other => {}
        }
    }
}
