use std::fmt;
use std::io::{self, Write};

use anyhow::Result;
use windows::Win32::{
    Foundation::{CloseHandle, HANDLE},
    Storage::FileSystem::{
        CreateFileW, FILE_FLAGS_AND_ATTRIBUTES, FILE_GENERIC_WRITE, FILE_SHARE_READ,
        FILE_SHARE_WRITE, OPEN_EXISTING,
    },
    System::Console::{
        AllocConsole, FillConsoleOutputCharacterW, FreeConsole, GetConsoleCursorInfo,
        GetConsoleScreenBufferInfo, GetStdHandle, SetConsoleCursorInfo, SetConsoleCursorPosition,
        SetConsoleTextAttribute, SetConsoleTitleW, SetStdHandle, CONSOLE_CHARACTER_ATTRIBUTES,
        CONSOLE_CURSOR_INFO, CONSOLE_SCREEN_BUFFER_INFO, COORD, STD_OUTPUT_HANDLE,
    },
};

use crate::backend::{ConsoleBackend, Coord};

/// Win32 console backend. The console device itself belongs to the OS;
/// only the CONOUT$ redirection handle is owned here.
pub struct Win32Console {
    output: HANDLE,
    conout: Option<HANDLE>,
}

impl Win32Console {
    pub fn new() -> Self {
        let output = unsafe { GetStdHandle(STD_OUTPUT_HANDLE) }.unwrap_or_default();
        Self {
            output,
            conout: None,
        }
    }

    fn screen_buffer_info(&self) -> Result<CONSOLE_SCREEN_BUFFER_INFO> {
        let mut info = CONSOLE_SCREEN_BUFFER_INFO::default();
        unsafe {
            GetConsoleScreenBufferInfo(self.output, &mut info).ok()?;
        }
        Ok(info)
    }

    fn cursor_info(&self) -> Result<CONSOLE_CURSOR_INFO> {
        let mut info = CONSOLE_CURSOR_INFO::default();
        unsafe {
            GetConsoleCursorInfo(self.output, &mut info).ok()?;
        }
        Ok(info)
    }
}

impl Default for Win32Console {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleBackend for Win32Console {
    fn attach(&mut self) -> Result<()> {
        unsafe {
            // Fails if the process already has a console; the caller
            // treats that as "nothing to do".
            AllocConsole().ok()?;

            let conout = CreateFileW(
                "CONOUT$",
                FILE_GENERIC_WRITE,
                FILE_SHARE_READ | FILE_SHARE_WRITE,
                None,
                OPEN_EXISTING,
                FILE_FLAGS_AND_ATTRIBUTES::default(),
                None,
            )?;

            if let Err(error) = SetStdHandle(STD_OUTPUT_HANDLE, conout).ok() {
                CloseHandle(conout);
                return Err(error.into());
            }

            self.conout = Some(conout);
            self.output = conout;
        }
        Ok(())
    }

    fn detach(&mut self) -> Result<()> {
        if let Some(conout) = self.conout.take() {
            unsafe {
                CloseHandle(conout).ok()?;
                FreeConsole().ok()?;
            }
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        unsafe {
            SetConsoleTitleW(title).ok()?;
        }
        Ok(())
    }

    fn attribute(&self) -> Result<u16> {
        Ok(self.screen_buffer_info()?.wAttributes.0)
    }

    fn set_attribute(&mut self, attribute: u16) -> Result<()> {
        unsafe {
            SetConsoleTextAttribute(self.output, CONSOLE_CHARACTER_ATTRIBUTES(attribute)).ok()?;
        }
        Ok(())
    }

    fn buffer_size(&self) -> Result<Coord> {
        let size = self.screen_buffer_info()?.dwSize;
        Ok(Coord {
            x: size.X,
            y: size.Y,
        })
    }

    fn fill(&mut self, character: char, length: u32, origin: Coord) -> Result<()> {
        let mut written = 0;
        unsafe {
            FillConsoleOutputCharacterW(
                self.output,
                character as u16,
                length,
                COORD {
                    X: origin.x,
                    Y: origin.y,
                },
                &mut written,
            )
            .ok()?;
        }
        Ok(())
    }

    fn set_cursor_position(&mut self, position: Coord) -> Result<()> {
        unsafe {
            SetConsoleCursorPosition(
                self.output,
                COORD {
                    X: position.x,
                    Y: position.y,
                },
            )
            .ok()?;
        }
        Ok(())
    }

    fn cursor_visible(&self) -> Result<bool> {
        Ok(self.cursor_info()?.bVisible.as_bool())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        let mut info = self.cursor_info()?;
        info.bVisible = visible.into();
        unsafe {
            SetConsoleCursorInfo(self.output, &info).ok()?;
        }
        Ok(())
    }

    fn write(&mut self, text: fmt::Arguments<'_>) -> Result<()> {
        let mut stdout = io::stdout();
        stdout.write_fmt(text)?;
        stdout.flush()?;
        Ok(())
    }
}
