use std::sync::{Mutex, MutexGuard};

use lazy_static::lazy_static;

use crate::Logger;

lazy_static! {
    static ref CONSOLE: Mutex<Logger> = Mutex::new(Logger::new(None));
}

/// The process-wide logger. The mutex serializes the color-set/write/reset
/// sequence across threads.
pub fn console() -> MutexGuard<'static, Logger> {
    CONSOLE.lock().unwrap()
}

/// Writes a line through the global console in the default color.
#[macro_export]
macro_rules! clog {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::console().log(::core::format_args!($fmt $(, $arg)*))
    };
}

/// Severity-tagged report through the global console.
#[macro_export]
macro_rules! report {
    ($severity:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::console().report($severity, ::core::format_args!($fmt $(, $arg)*))
    };
}

#[macro_export]
macro_rules! cinfo {
    ($($arg:tt)+) => { $crate::report!($crate::Severity::INFO, $($arg)+) };
}

#[macro_export]
macro_rules! cwarn {
    ($($arg:tt)+) => { $crate::report!($crate::Severity::WARN, $($arg)+) };
}

#[macro_export]
macro_rules! cerror {
    ($($arg:tt)+) => { $crate::report!($crate::Severity::ERROR, $($arg)+) };
}

#[macro_export]
macro_rules! csuccess {
    ($($arg:tt)+) => { $crate::report!($crate::Severity::SUCCESS, $($arg)+) };
}

/// Error report carrying the call site, either through the global console
/// or an explicit logger.
#[macro_export]
macro_rules! log_error_at {
    () => {
        $crate::console().report(
            $crate::Severity::ERROR,
            ::core::format_args!("{} -> {}\n", ::core::module_path!(), ::core::line!()),
        )
    };
    ($logger:expr) => {
        $logger.report(
            $crate::Severity::ERROR,
            ::core::format_args!("{} -> {}\n", ::core::module_path!(), ::core::line!()),
        )
    };
}
