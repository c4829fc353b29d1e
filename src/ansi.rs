use std::fmt;
use std::io::{self, Write};

use anyhow::{bail, Result};

use crate::backend::{ConsoleBackend, Coord};

/// ANSI/VT escape-sequence backend for non-Windows terminals. The attribute
/// and cursor state are mirrored locally since a plain terminal offers no
/// way to query them back.
pub struct AnsiConsole {
    attribute: u16,
    cursor_visible: bool,
}

impl AnsiConsole {
    pub fn new() -> Self {
        Self {
            attribute: 15,
            cursor_visible: true,
        }
    }

    /// Maps a 16-color console attribute to the matching SGR foreground
    /// code. The intensity bit selects the bright range (90..=97).
    fn sgr(attribute: u16) -> u16 {
        const BASE: [u16; 8] = [30, 34, 32, 36, 31, 35, 33, 37];
        let code = BASE[(attribute & 0x7) as usize];
        if attribute & 0x8 != 0 {
            code + 60
        } else {
            code
        }
    }

    fn emit(sequence: fmt::Arguments<'_>) -> Result<()> {
        let mut stdout = io::stdout();
        stdout.write_fmt(sequence)?;
        stdout.flush()?;
        Ok(())
    }
}

impl Default for AnsiConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleBackend for AnsiConsole {
    fn attach(&mut self) -> Result<()> {
        // Stdout already is the terminal.
        Ok(())
    }

    fn detach(&mut self) -> Result<()> {
        Self::emit(format_args!("\x1b[0m"))
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        Self::emit(format_args!("\x1b]0;{}\x07", title))
    }

    fn attribute(&self) -> Result<u16> {
        Ok(self.attribute)
    }

    fn set_attribute(&mut self, attribute: u16) -> Result<()> {
        Self::emit(format_args!("\x1b[{}m", Self::sgr(attribute)))?;
        self.attribute = attribute;
        Ok(())
    }

    fn buffer_size(&self) -> Result<Coord> {
        bail!("buffer size is not queryable over escape sequences");
    }

    fn fill(&mut self, character: char, length: u32, origin: Coord) -> Result<()> {
        self.set_cursor_position(origin)?;
        let mut stdout = io::stdout();
        for _ in 0..length {
            write!(stdout, "{}", character)?;
        }
        stdout.flush()?;
        Ok(())
    }

    fn set_cursor_position(&mut self, position: Coord) -> Result<()> {
        Self::emit(format_args!(
            "\x1b[{};{}H",
            position.y + 1,
            position.x + 1
        ))
    }

    fn cursor_visible(&self) -> Result<bool> {
        Ok(self.cursor_visible)
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        Self::emit(format_args!(
            "\x1b[?25{}",
            if visible { 'h' } else { 'l' }
        ))?;
        self.cursor_visible = visible;
        Ok(())
    }

    fn write(&mut self, text: fmt::Arguments<'_>) -> Result<()> {
        let mut stdout = io::stdout();
        stdout.write_fmt(text)?;
        stdout.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        Self::emit(format_args!("\x1b[2J\x1b[H"))
    }
}

#[cfg(test)]
mod tests {
    use serial_test::parallel;

    use super::*;

    #[test]
    #[parallel]
    fn sgr_maps_the_dark_range() {
        assert_eq!(AnsiConsole::sgr(0), 30); // black
        assert_eq!(AnsiConsole::sgr(1), 34); // blue
        assert_eq!(AnsiConsole::sgr(4), 31); // red
        assert_eq!(AnsiConsole::sgr(6), 33); // orange
        assert_eq!(AnsiConsole::sgr(7), 37); // light gray
    }

    #[test]
    #[parallel]
    fn sgr_maps_the_bright_range() {
        assert_eq!(AnsiConsole::sgr(10), 92); // light green
        assert_eq!(AnsiConsole::sgr(11), 96); // light cyan
        assert_eq!(AnsiConsole::sgr(12), 91); // light red
        assert_eq!(AnsiConsole::sgr(15), 97); // white
    }
}
