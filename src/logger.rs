use std::fmt;
use std::time::SystemTime;

use crate::backend::{ConsoleBackend, NativeBackend};
use crate::severity::Severity;

/// Translates severity + format arguments into colored console text and
/// manages the console lifecycle. Backend failures are silently absorbed;
/// the worst case is absent output.
pub struct Logger<B: ConsoleBackend = NativeBackend> {
    backend: B,
    attached: bool,
    timestamp: bool,
}

impl Logger<NativeBackend> {
    pub fn new(title: Option<&str>) -> Self {
        Self::with_backend(NativeBackend::new(), title)
    }
}

impl<B: ConsoleBackend> Logger<B> {
    pub fn with_backend(backend: B, title: Option<&str>) -> Self {
        let mut logger = Self {
            backend,
            attached: false,
            timestamp: false,
        };

        #[cfg(all(feature = "auto-console", not(feature = "disabled")))]
        {
            logger.attached = logger.backend.attach().is_ok();
        }

        if let Some(title) = title {
            let _ = logger.backend.set_title(title);
        }

        logger
    }

    /// Detaches the console. Idempotent; also runs on drop.
    pub fn destroy(&mut self) {
        #[cfg(not(feature = "disabled"))]
        if std::mem::take(&mut self.attached) {
            let _ = self.backend.detach();
        }
    }

    pub fn set_color(&mut self, severity: Severity) {
        #[cfg(not(feature = "disabled"))]
        let _ = self.backend.set_attribute(severity.attribute());
        #[cfg(feature = "disabled")]
        let _ = severity;
    }

    fn reset_color(&mut self) {
        self.set_color(Severity::White);
    }

    pub fn clear(&mut self) {
        #[cfg(not(feature = "disabled"))]
        let _ = self.backend.clear();
    }

    /// Writes in the default color, no title.
    pub fn log(&mut self, body: fmt::Arguments<'_>) {
        self.dispatch(Severity::White, None, body);
    }

    /// Writes the whole line in the severity color.
    pub fn log_with(&mut self, severity: Severity, body: fmt::Arguments<'_>) {
        self.dispatch(severity, None, body);
    }

    /// Writes `[title]` in the severity color, then the body in the
    /// default color.
    pub fn log_with_title(&mut self, severity: Severity, title: &str, body: fmt::Arguments<'_>) {
        self.dispatch(severity, Some(title), body);
    }

    /// [`Self::log_with_title`] with the severity's short symbol as the title.
    pub fn report(&mut self, severity: Severity, body: fmt::Arguments<'_>) {
        self.dispatch(severity, Some(severity.symbol()), body);
    }

    pub fn toggle_timestamp(&mut self) {
        #[cfg(not(feature = "disabled"))]
        {
            self.timestamp = !self.timestamp;
        }
    }

    pub fn timestamp_enabled(&self) -> bool {
        self.timestamp
    }

    pub fn show_cursor(&mut self, visible: bool) {
        #[cfg(not(feature = "disabled"))]
        if self.backend.cursor_visible().is_ok() {
            let _ = self.backend.set_cursor_visible(visible);
        }
        #[cfg(feature = "disabled")]
        let _ = visible;
    }

    // Ordering is load-bearing: the timestamp and title render in the
    // severity color, the body in default white.
    fn dispatch(&mut self, severity: Severity, title: Option<&str>, body: fmt::Arguments<'_>) {
        #[cfg(not(feature = "disabled"))]
        {
            self.set_color(severity);

            if self.timestamp {
                let _ = self.backend.write(format_args!("{}| ", time_of_day()));
            }

            if let Some(title) = title {
                let _ = self.backend.write(format_args!("[{}] ", title));
                self.reset_color();
            }

            let _ = self.backend.write(body);
            self.reset_color();
        }
        #[cfg(feature = "disabled")]
        let _ = (severity, title, body);
    }
}

impl<B: ConsoleBackend> Drop for Logger<B> {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Current wall-clock time as `HH:MM:SS`.
fn time_of_day() -> String {
    let stamp = humantime::format_rfc3339_seconds(SystemTime::now()).to_string();
    stamp[11..19].to_string()
}

#[cfg(test)]
mod tests {
    use serial_test::parallel;

    use super::*;
    use crate::backend::mock::{MockBackend, Op};
    use crate::backend::Coord;

    fn logger() -> Logger<MockBackend> {
        let mut logger = Logger::with_backend(MockBackend::default(), None);
        logger.backend.ops.clear();
        logger
    }

    #[cfg(not(feature = "disabled"))]
    mod enabled {
        use super::*;

        const WHITE: u16 = 15;

        #[test]
        #[parallel]
        fn plain_log_uses_default_color() {
            let mut logger = logger();
            logger.log(format_args!("hello\n"));
            assert_eq!(
                logger.backend.ops,
                vec![
                    Op::SetAttribute(WHITE),
                    Op::Write("hello\n".to_string()),
                    Op::SetAttribute(WHITE),
                ]
            );
        }

        #[test]
        #[parallel]
        fn severity_log_sets_and_resets_color() {
            let mut logger = logger();
            logger.log_with(Severity::ERROR, format_args!("boom\n"));
            assert_eq!(
                logger.backend.ops,
                vec![
                    Op::SetAttribute(Severity::ERROR.attribute()),
                    Op::Write("boom\n".to_string()),
                    Op::SetAttribute(WHITE),
                ]
            );
        }

        #[test]
        #[parallel]
        fn title_renders_in_severity_color_before_the_body() {
            let mut logger = logger();
            logger.log_with_title(Severity::WARN, "power", format_args!("sag\n"));
            assert_eq!(
                logger.backend.ops,
                vec![
                    Op::SetAttribute(Severity::WARN.attribute()),
                    Op::Write("[power] ".to_string()),
                    Op::SetAttribute(WHITE),
                    Op::Write("sag\n".to_string()),
                    Op::SetAttribute(WHITE),
                ]
            );
        }

        #[test]
        #[parallel]
        fn report_selects_the_severity_symbol() {
            let cases = [
                (Severity::INFO, "[i] "),
                (Severity::WARN, "[!] "),
                (Severity::ERROR, "[-] "),
                (Severity::SUCCESS, "[+] "),
                (Severity::Magenta, "[>] "),
            ];
            for (severity, rendered) in cases {
                let mut logger = logger();
                logger.report(severity, format_args!("x"));
                assert_eq!(logger.backend.ops[1], Op::Write(rendered.to_string()));
            }
        }

        #[test]
        #[parallel]
        fn timestamp_prefix_has_the_time_of_day_shape() {
            let mut logger = logger();
            logger.toggle_timestamp();
            logger.log(format_args!("x"));
            match &logger.backend.ops[1] {
                Op::Write(prefix) => {
                    assert_eq!(prefix.len(), 10); // "HH:MM:SS| "
                    assert!(prefix.ends_with("| "));
                }
                other => panic!("expected a timestamp write, got {:?}", other),
            }
        }

        #[test]
        #[parallel]
        fn toggling_the_timestamp_twice_turns_it_back_off() {
            let mut logger = logger();
            logger.toggle_timestamp();
            logger.toggle_timestamp();
            assert!(!logger.timestamp_enabled());
            logger.log(format_args!("x"));
            // No timestamp write between color set and body.
            assert_eq!(logger.backend.ops[1], Op::Write("x".to_string()));
        }

        #[test]
        #[parallel]
        fn clear_fills_the_buffer_and_homes_the_cursor() {
            let mut logger = logger();
            logger.clear();
            assert_eq!(
                logger.backend.ops,
                vec![
                    Op::Fill {
                        character: ' ',
                        length: 80 * 25,
                        origin: Coord::default(),
                    },
                    Op::SetCursorPosition(Coord::default()),
                ]
            );
        }

        #[test]
        #[parallel]
        fn clear_is_a_no_op_when_the_size_query_fails() {
            let mut logger = logger();
            logger.backend.buffer_size = None;
            logger.clear();
            assert!(logger.backend.ops.is_empty());
        }

        #[test]
        #[parallel]
        fn show_cursor_applies_the_visibility_flag() {
            let mut logger = logger();
            logger.show_cursor(false);
            assert_eq!(logger.backend.ops, vec![Op::SetCursorVisible(false)]);
        }

        #[test]
        #[parallel]
        fn show_cursor_is_a_no_op_when_the_state_query_fails() {
            let mut logger = logger();
            logger.backend.fail_cursor_query = true;
            logger.show_cursor(false);
            assert!(logger.backend.ops.is_empty());
        }

        #[test]
        #[parallel]
        fn set_color_round_trips_every_raw_value() {
            let mut logger = logger();
            for raw in 0..16 {
                logger.set_color(Severity::from_raw(raw));
                assert_eq!(logger.backend.attribute().unwrap(), raw);
            }
            logger.set_color(Severity::from_raw(42));
            assert_eq!(logger.backend.attribute().unwrap(), WHITE);
        }

        #[test]
        #[parallel]
        fn title_is_applied_at_construction() {
            let logger = Logger::with_backend(MockBackend::default(), Some("probe"));
            assert!(logger
                .backend
                .ops
                .contains(&Op::SetTitle("probe".to_string())));
        }

        #[cfg(feature = "auto-console")]
        #[test]
        #[parallel]
        fn destroy_detaches_exactly_once() {
            let mut logger = Logger::with_backend(MockBackend::default(), None);
            logger.destroy();
            logger.destroy();
            assert_eq!(logger.backend.ops, vec![Op::Attach, Op::Detach]);
        }
    }

    #[cfg(feature = "disabled")]
    mod disabled {
        use super::*;

        #[test]
        #[parallel]
        fn no_operation_touches_the_backend() {
            let mut logger = logger();
            logger.log(format_args!("x"));
            logger.log_with(Severity::ERROR, format_args!("x"));
            logger.log_with_title(Severity::WARN, "t", format_args!("x"));
            logger.report(Severity::INFO, format_args!("x"));
            logger.set_color(Severity::Red);
            logger.clear();
            logger.show_cursor(false);
            logger.toggle_timestamp();
            logger.destroy();
            assert!(logger.backend.ops.is_empty());
        }
    }
}
