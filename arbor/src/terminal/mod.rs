use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent},
    execute, queue,
    style::{Attribute, Color as CtColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::buffer::Buffer;
use crate::error::Result;
use crate::event::Event;
use crate::text::char_width;
use crate::types::Rgb;

/// Raw-mode alternate screen that presents [`Buffer`]s.
///
/// Only cells that changed since the previous `present` are written.
/// Dropping the terminal restores the original screen.
pub struct Terminal {
    stdout: io::Stdout,
    previous: Buffer,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;
        log::info!("[terminal] entered alternate screen {width}x{height}");

        Ok(Self {
            stdout,
            // Zero-sized so the first present repaints every cell.
            previous: Buffer::new(0, 0),
        })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    /// Waits up to `timeout` (forever if `None`) for input and returns every
    /// event that was pending. Events without a counterpart are dropped.
    pub fn poll(&self, timeout: Option<Duration>) -> Result<Vec<Event>> {
        let mut raw: Vec<CrosstermEvent> = Vec::new();

        match timeout {
            Some(dur) => {
                if event::poll(dur)? {
                    raw.push(event::read()?);
                }
            }
            None => raw.push(event::read()?),
        }
        if !raw.is_empty() {
            while event::poll(Duration::ZERO)? {
                raw.push(event::read()?);
            }
        }

        Ok(raw.iter().filter_map(Event::from_crossterm).collect())
    }

    /// Writes the cells of `buffer` that differ from the last presented one.
    /// The first frame and any frame after a size change repaint everything.
    pub fn present(&mut self, buffer: &Buffer) -> Result<()> {
        let full = buffer.width() != self.previous.width()
            || buffer.height() != self.previous.height();
        if full {
            queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        }
        let previous = std::mem::replace(&mut self.previous, buffer.clone());
        self.flush_diff(buffer, &previous, full)
    }

    fn flush_diff(&mut self, current: &Buffer, previous: &Buffer, full: bool) -> Result<()> {
        let mut last_x = u16::MAX;
        let mut last_y = u16::MAX;
        let mut last_char_width: u16 = 1;
        let mut last_fg = Rgb::new(255, 255, 255);
        let mut last_bg = Rgb::new(0, 0, 0);
        let mut last_dim = false;

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;

        let cells: Vec<_> = if full {
            (0..current.height())
                .flat_map(|y| (0..current.width()).map(move |x| (x, y)))
                .filter_map(|(x, y)| current.get(x, y).map(|cell| (x, y, cell)))
                .collect()
        } else {
            current.diff(previous).collect()
        };

        for (x, y, cell) in cells {
            if cell.wide_continuation {
                continue;
            }

            if y != last_y || x != last_x.wrapping_add(last_char_width) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }

            if cell.fg != last_fg {
                queue!(self.stdout, SetForegroundColor(rgb(cell.fg)))?;
                last_fg = cell.fg;
            }
            if cell.bg != last_bg {
                queue!(self.stdout, SetBackgroundColor(rgb(cell.bg)))?;
                last_bg = cell.bg;
            }

            if cell.dim != last_dim {
                let intensity = if cell.dim {
                    Attribute::Dim
                } else {
                    Attribute::NormalIntensity
                };
                queue!(self.stdout, SetAttribute(intensity))?;
                last_dim = cell.dim;
            }

            write!(self.stdout, "{}", cell.char)?;

            last_x = x;
            last_y = y;
            last_char_width = char_width(cell.char).max(1) as u16;
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        Ok(())
    }
}

fn rgb(color: Rgb) -> CtColor {
    CtColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
