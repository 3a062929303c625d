//! Crossterm-backed display surface with a diffing commit.
//!
//! The back buffer receives cell writes from the frame driver; `show`
//! writes only the runs that changed since the previous commit. All state
//! sits behind one mutex so the event thread can resync or finalize while
//! the render thread draws.

use crossterm::{
    cursor,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    queue,
    style::{self, Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};
use std::thread;
use wirecube_core::{CellCoord, CellStyle, Color, Surface};

use crate::buffer::{for_each_changed_run, Cell, FrameBuffer};

/// A character-cell surface on a terminal (or any writer in headless mode)
pub struct TerminalScreen<W: Write = Stdout> {
    state: Mutex<ScreenState<W>>,
    finalized: AtomicBool,
    /// Whether this screen switched the host terminal into raw mode
    owns_terminal: bool,
}

struct ScreenState<W> {
    out: W,
    back: FrameBuffer,
    front: FrameBuffer,
    base: CellStyle,
    full_redraw: bool,
}

impl TerminalScreen<Stdout> {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor,
    /// mouse capture and bracketed paste.
    pub fn init(base: CellStyle) -> io::Result<Self> {
        let size = terminal::size()?;
        terminal::enable_raw_mode()?;

        let screen = Self::build(io::stdout(), size, base, true);
        if let Err(e) = screen.enter() {
            screen.fini();
            return Err(e);
        }

        log::debug!("terminal screen initialized at {}x{}", size.0, size.1);
        Ok(screen)
    }

    fn enter(&self) -> io::Result<()> {
        let mut state = self.lock();
        queue!(
            state.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            EnableMouseCapture,
            EnableBracketedPaste,
            terminal::Clear(ClearType::All)
        )?;
        state.out.flush()
    }
}

impl<W: Write> TerminalScreen<W> {
    /// A screen that renders into `out` at a fixed size without touching
    /// the host terminal.
    pub fn with_writer(out: W, size: (u16, u16), base: CellStyle) -> Self {
        Self::build(out, size, base, false)
    }

    fn build(out: W, (cols, rows): (u16, u16), base: CellStyle, owns_terminal: bool) -> Self {
        let blank = Cell::blank(base);
        Self {
            state: Mutex::new(ScreenState {
                out,
                back: FrameBuffer::new(cols, rows, blank),
                front: FrameBuffer::new(cols, rows, blank),
                base,
                full_redraw: true,
            }),
            finalized: AtomicBool::new(false),
            owns_terminal,
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized.load(Ordering::SeqCst)
    }

    /// Consume the screen and hand back its writer
    pub fn into_inner(self) -> W {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .out
    }

    // A panic while drawing must not keep the terminal from being restored.
    fn lock(&self) -> MutexGuard<'_, ScreenState<W>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write> Surface for TerminalScreen<W> {
    fn size(&self) -> (u16, u16) {
        self.lock().back.size()
    }

    fn put(&self, at: CellCoord, glyph: char, style: CellStyle) {
        if self.is_finalized() {
            return;
        }
        self.lock().back.set(at, Cell { ch: glyph, style });
    }

    fn clear(&self) {
        let mut state = self.lock();
        let blank = Cell::blank(state.base);
        state.back.clear(blank);
    }

    fn show(&self) -> io::Result<()> {
        let mut state = self.lock();
        if self.is_finalized() {
            return Ok(());
        }
        state.commit()
    }

    fn sync(&self) {
        let mut state = self.lock();
        let size = if self.owns_terminal {
            terminal::size().unwrap_or_else(|e| {
                log::warn!("failed to query terminal size: {}", e);
                state.back.size()
            })
        } else {
            state.back.size()
        };
        log::debug!("resync at {}x{}", size.0, size.1);
        state.resize(size);
    }

    fn fini(&self) {
        if self.finalized.swap(true, Ordering::SeqCst) {
            return;
        }
        // Holding the lock lets an in-flight commit finish first. A
        // panicking thread may already hold it, so it only tries.
        let mut guard = if thread::panicking() {
            match self.state.try_lock() {
                Ok(state) => Some(state),
                Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
                Err(TryLockError::WouldBlock) => None,
            }
        } else {
            Some(self.lock())
        };

        if self.owns_terminal {
            let restored = match guard.as_mut() {
                Some(state) => restore_terminal(&mut state.out),
                None => restore_terminal(&mut io::stdout()),
            };
            if let Err(e) = restored {
                log::warn!("failed to restore terminal: {}", e);
            }
        }
        drop(guard);
        log::debug!("terminal screen finalized");
    }
}

impl<W: Write> ScreenState<W> {
    fn resize(&mut self, (cols, rows): (u16, u16)) {
        let blank = Cell::blank(self.base);
        self.back.resize(cols, rows, blank);
        self.front.resize(cols, rows, blank);
        self.full_redraw = true;
    }

    fn commit(&mut self) -> io::Result<()> {
        if self.full_redraw || self.front.size() != self.back.size() {
            self.redraw_all()?;
            self.full_redraw = false;
        } else {
            self.redraw_changed()?;
        }
        self.front.clone_from(&self.back);
        self.out.flush()
    }

    fn redraw_all(&mut self) -> io::Result<()> {
        queue!(self.out, terminal::Clear(ClearType::All))?;
        let mut current = None;
        for y in 0..self.back.height() {
            queue!(self.out, cursor::MoveTo(0, y))?;
            print_cells(&mut self.out, self.back.row(y), &mut current)?;
        }
        queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))
    }

    fn redraw_changed(&mut self) -> io::Result<()> {
        let out = &mut self.out;
        let back = &self.back;
        let mut current = None;

        for_each_changed_run(&self.front, back, |x, y, len| {
            let start = usize::from(x);
            let cells = &back.row(y)[start..start + usize::from(len)];
            queue!(out, cursor::MoveTo(x, y))?;
            print_cells(&mut *out, cells, &mut current)
        })?;

        if current.is_some() {
            queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn print_cells<W: Write>(
    out: &mut W,
    cells: &[Cell],
    current: &mut Option<CellStyle>,
) -> io::Result<()> {
    for cell in cells {
        if *current != Some(cell.style) {
            queue!(
                out,
                SetForegroundColor(to_crossterm(cell.style.fg)),
                SetBackgroundColor(to_crossterm(cell.style.bg))
            )?;
            *current = Some(cell.style);
        }
        queue!(out, Print(cell.ch))?;
    }
    Ok(())
}

fn restore_terminal<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(
        out,
        ResetColor,
        SetAttribute(Attribute::Reset),
        DisableBracketedPaste,
        DisableMouseCapture,
        terminal::EnableLineWrap,
        cursor::Show,
        terminal::LeaveAlternateScreen
    )?;
    out.flush()?;
    terminal::disable_raw_mode()
}

/// The basic colors map onto the first eight ANSI entries
pub fn to_crossterm(color: Color) -> style::Color {
    match color {
        Color::Reset => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::White,
        Color::Grey => style::Color::Grey,
        Color::Rgb { r, g, b } => style::Color::Rgb { r, g, b },
    }
}
