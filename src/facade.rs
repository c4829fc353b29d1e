use log::{Level, LevelFilter, SetLoggerError};

use crate::{console, Severity};

static FACADE: Facade = Facade;

struct Facade;

impl log::Log for Facade {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        let severity = match record.level() {
            Level::Error => Severity::ERROR,
            Level::Warn => Severity::WARN,
            Level::Info => Severity::INFO,
            Level::Debug => Severity::LightGray,
            Level::Trace => Severity::DarkGray,
        };
        console().report(
            severity,
            format_args!(
                "[{}:{}] {}\n",
                record.file().unwrap_or("<unknown>"),
                record.line().unwrap_or(0),
                record.args()
            ),
        );
    }

    fn flush(&self) {}
}

/// Routes the standard `log` macros through the global console.
pub fn init() -> Result<(), SetLoggerError> {
    log::set_logger(&FACADE)?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}
