use std::fmt;

use anyhow::Result;

/// A console buffer coordinate. Matches the Win32 COORD shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Coord {
    pub x: i16,
    pub y: i16,
}

/// Capability interface over the OS console. The dispatch core only talks
/// to this trait; failures are absorbed one layer up, in [`crate::Logger`].
pub trait ConsoleBackend {
    /// Allocates/attaches a console and redirects stdout into it.
    fn attach(&mut self) -> Result<()>;

    /// Releases the stdout redirection and detaches the console.
    fn detach(&mut self) -> Result<()>;

    fn set_title(&mut self, title: &str) -> Result<()>;

    fn attribute(&self) -> Result<u16>;

    fn set_attribute(&mut self, attribute: u16) -> Result<()>;

    fn buffer_size(&self) -> Result<Coord>;

    fn fill(&mut self, character: char, length: u32, origin: Coord) -> Result<()>;

    fn set_cursor_position(&mut self, position: Coord) -> Result<()>;

    fn cursor_visible(&self) -> Result<bool>;

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()>;

    fn write(&mut self, text: fmt::Arguments<'_>) -> Result<()>;

    /// Overwrites the whole buffer with spaces and homes the cursor.
    /// Does nothing if the buffer size cannot be queried.
    fn clear(&mut self) -> Result<()> {
        let size = self.buffer_size()?;
        let origin = Coord::default();
        self.fill(' ', size.x as u32 * size.y as u32, origin)?;
        self.set_cursor_position(origin)
    }
}

#[cfg(windows)]
pub type NativeBackend = crate::win32::Win32Console;

#[cfg(not(windows))]
pub type NativeBackend = crate::ansi::AnsiConsole;
