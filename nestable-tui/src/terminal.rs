use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal,
};

use crate::grid::fit;

/// Attributes applied to a whole line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub bold: bool,
    pub dim: bool,
    pub reverse: bool,
    pub underline: bool,
}

/// One screen line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub style: Style,
}

impl Line {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

pub struct Terminal {
    stdout: io::Stdout,
    size: (u16, u16),
    previous: Vec<Line>,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        Ok(Self {
            stdout,
            size: terminal::size()?,
            previous: Vec::new(),
        })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll(&self, timeout: Option<Duration>) -> io::Result<Vec<CrosstermEvent>> {
        let mut events = Vec::new();

        let has_event = match timeout {
            Some(dur) => event::poll(dur)?,
            None => {
                // Block until event
                events.push(event::read()?);
                return Ok(events);
            }
        };

        if has_event {
            events.push(event::read()?);
            // Drain any additional pending events
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }
        }

        Ok(events)
    }

    /// Draw `lines` from the top of the screen, rewriting only lines that
    /// changed since the last frame.
    pub fn draw(&mut self, lines: &[Line]) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        if (width, height) != self.size {
            queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
            self.size = (width, height);
            self.previous.clear();
        }

        let blank = Line::default();
        let mut frame = Vec::with_capacity(usize::from(height));
        for y in 0..height {
            let line = lines.get(usize::from(y)).unwrap_or(&blank);
            let line = Line::new(fit(&line.text, width), line.style);
            if self.previous.get(usize::from(y)) != Some(&line) {
                self.write_line(y, &line)?;
            }
            frame.push(line);
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        self.previous = frame;
        Ok(())
    }

    fn write_line(&mut self, y: u16, line: &Line) -> io::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(0, y),
            SetAttribute(Attribute::Reset)
        )?;
        if line.style.bold {
            queue!(self.stdout, SetAttribute(Attribute::Bold))?;
        }
        if line.style.dim {
            queue!(self.stdout, SetAttribute(Attribute::Dim))?;
        }
        if line.style.reverse {
            queue!(self.stdout, SetAttribute(Attribute::Reverse))?;
        }
        if line.style.underline {
            queue!(self.stdout, SetAttribute(Attribute::Underlined))?;
        }
        queue!(self.stdout, Print(&line.text))
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
