#![forbid(unsafe_code)]

//! Terminal session guard and frame output.
//!
//! [`TerminalSession`] enters raw mode and the alternate screen on creation
//! and restores the terminal on drop, including during panic unwinding.
//! Cleanup runs in reverse order of enabling.

use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::{cursor, queue, terminal};
use elide::{Buffer, CellAttrs, CellContent, Size};
use tracing::info;

use crate::app::DemoEvent;

/// Owns raw mode, the alternate screen, and optional mouse capture.
#[derive(Debug)]
pub struct TerminalSession {
    alternate_screen_enabled: bool,
    mouse_enabled: bool,
}

impl TerminalSession {
    /// Enter raw mode and the alternate screen, hide the cursor, and enable
    /// mouse capture when `mouse` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode or a terminal mode cannot be enabled.
    pub fn new(mouse: bool) -> io::Result<Self> {
        install_panic_hook();

        terminal::enable_raw_mode()?;
        info!("terminal raw mode enabled");

        let mut session = Self {
            alternate_screen_enabled: false,
            mouse_enabled: false,
        };
        let mut stdout = io::stdout();

        crossterm::execute!(stdout, terminal::EnterAlternateScreen)?;
        session.alternate_screen_enabled = true;

        if mouse {
            crossterm::execute!(stdout, crossterm::event::EnableMouseCapture)?;
            session.mouse_enabled = true;
            info!("mouse capture enabled");
        }

        crossterm::execute!(stdout, cursor::Hide)?;
        Ok(session)
    }

    /// Current terminal size.
    pub fn size(&self) -> io::Result<Size> {
        terminal::size().map(Size::from)
    }

    /// Wait up to `timeout` for input and translate it.
    ///
    /// Returns `Ok(None)` on timeout or for input the demo ignores.
    pub fn next_event(&self, timeout: Duration) -> io::Result<Option<DemoEvent>> {
        if !crossterm::event::poll(timeout)? {
            return Ok(None);
        }
        Ok(map_event(crossterm::event::read()?))
    }

    /// Write a full frame.
    pub fn present(&self, buf: &Buffer) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        write_frame(&mut stdout, buf)?;
        stdout.flush()
    }

    fn cleanup(&mut self) {
        let mut stdout = io::stdout();

        if self.mouse_enabled {
            let _ = crossterm::execute!(stdout, crossterm::event::DisableMouseCapture);
            self.mouse_enabled = false;
            info!("mouse capture disabled");
        }

        let _ = crossterm::execute!(stdout, cursor::Show);

        if self.alternate_screen_enabled {
            let _ = crossterm::execute!(stdout, terminal::LeaveAlternateScreen);
            self.alternate_screen_enabled = false;
        }

        let _ = terminal::disable_raw_mode();
        info!("terminal raw mode disabled");

        let _ = stdout.flush();
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = crossterm::execute!(stdout, crossterm::event::DisableMouseCapture);
    let _ = crossterm::execute!(stdout, cursor::Show);
    let _ = crossterm::execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = stdout.flush();
}

/// Translate a crossterm event into a demo event.
#[must_use]
pub fn map_event(event: Event) -> Option<DemoEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(DemoEvent::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(DemoEvent::Quit)
            }
            KeyCode::Char('+' | '=') | KeyCode::Right => Some(DemoEvent::Widen),
            KeyCode::Char('-') | KeyCode::Left => Some(DemoEvent::Narrow),
            KeyCode::Char(']') | KeyCode::Down => Some(DemoEvent::Taller),
            KeyCode::Char('[') | KeyCode::Up => Some(DemoEvent::Shorter),
            _ => None,
        },
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Down(_) | MouseEventKind::Drag(_) => {
                Some(DemoEvent::Hover {
                    x: mouse.column,
                    y: mouse.row,
                })
            }
            _ => None,
        },
        Event::Resize(width, height) => Some(DemoEvent::Resize(Size::new(width, height))),
        _ => None,
    }
}

/// Queue every row of `buf` onto `out`, switching attributes only when they
/// change.
pub fn write_frame(out: &mut impl Write, buf: &Buffer) -> io::Result<()> {
    for y in 0..buf.height() {
        queue!(out, cursor::MoveTo(0, y), SetAttribute(Attribute::Reset))?;
        let mut current = CellAttrs::empty();
        for x in 0..buf.width() {
            let Some(cell) = buf.get(x, y) else {
                continue;
            };
            if cell.attrs != current {
                queue!(out, SetAttribute(Attribute::Reset))?;
                for (flag, attribute) in [
                    (CellAttrs::BOLD, Attribute::Bold),
                    (CellAttrs::DIM, Attribute::Dim),
                    (CellAttrs::UNDERLINE, Attribute::Underlined),
                    (CellAttrs::REVERSE, Attribute::Reverse),
                ] {
                    if cell.attrs.contains(flag) {
                        queue!(out, SetAttribute(attribute))?;
                    }
                }
                current = cell.attrs;
            }
            match &cell.content {
                CellContent::Grapheme(grapheme) => queue!(out, Print(grapheme))?,
                CellContent::Empty => queue!(out, Print(' '))?,
                CellContent::Continuation => {}
            }
        }
    }
    queue!(out, SetAttribute(Attribute::Reset))
}
