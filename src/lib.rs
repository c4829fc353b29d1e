//! Color console logger: severity-to-color dispatch over a small console
//! backend trait, with a Win32 implementation and an ANSI one.
//!
//! Build-time switches are Cargo features: `auto-console` (allocate a
//! console at construction), `global` (shared instance, macros, `log`
//! facade), and `disabled` (every operation compiles to a no-op).

#[cfg(not(windows))]
mod ansi;
pub mod backend;
#[cfg(feature = "global")]
pub mod facade;
#[cfg(feature = "global")]
mod global;
pub mod logger;
pub mod severity;
#[cfg(windows)]
mod win32;

#[cfg(not(windows))]
pub use ansi::AnsiConsole;
pub use backend::{ConsoleBackend, Coord, NativeBackend};
#[cfg(feature = "global")]
pub use global::console;
pub use logger::Logger;
pub use severity::Severity;
#[cfg(windows)]
pub use win32::Win32Console;
