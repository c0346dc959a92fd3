//! Kernel logging macros
//!
//! Format into any `core::fmt::Write` sink: a [`TextScreen`](crate::TextScreen),
//! a serial port, or a test `String`. Formatting failures are dropped;
//! a log line must never take the caller down with it.

use core::fmt;

/// Log severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

impl LogLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Writes formatted text to a sink
#[macro_export]
macro_rules! kprint {
    ($sink:expr, $($arg:tt)*) => {
        {
            use core::fmt::Write as _;
            let _ = write!($sink, $($arg)*);
        }
    };
}

/// Writes formatted text and a newline to a sink
#[macro_export]
macro_rules! kprintln {
    ($sink:expr) => {
        {
            use core::fmt::Write as _;
            let _ = writeln!($sink);
        }
    };
    ($sink:expr, $($arg:tt)*) => {
        {
            use core::fmt::Write as _;
            let _ = writeln!($sink, $($arg)*);
        }
    };
}

/// Writes a `[LEVEL] message` line to a sink
///
/// ```
/// use console_vga::{klog, LogLevel};
///
/// let mut out = String::new();
/// klog!(out, LogLevel::Warn, "cursor at {}", 2000);
/// assert_eq!(out, "[WARN] cursor at 2000\n");
/// ```
#[macro_export]
macro_rules! klog {
    ($sink:expr, $level:expr, $($arg:tt)*) => {
        {
            use core::fmt::Write as _;
            let _ = write!($sink, "[{}] ", $level);
            let _ = writeln!($sink, $($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::CursorPorts;
    use crate::grid::{Position, GRID_BYTES};
    use crate::testing::SimCrtc;
    use crate::TextScreen;
    use hal::RamTextBuffer;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Info.to_string(), "INFO");
        assert_eq!(LogLevel::Error.to_string(), "ERROR");
    }

    #[test]
    fn test_macros_into_string() {
        let mut out = String::new();
        kprint!(out, "{}+{}", 1, 2);
        kprintln!(out, "={}", 3);
        kprintln!(out);
        klog!(out, LogLevel::Info, "screen ready");

        assert_eq!(out, "1+2=3\n\n[INFO] screen ready\n");
    }

    #[test]
    fn test_klog_to_screen() {
        let mut screen =
            TextScreen::new(RamTextBuffer::new(GRID_BYTES), SimCrtc::new(CursorPorts::VGA))
                .unwrap();
        screen.clear();

        klog!(screen, LogLevel::Error, "disk {}", 0);
        kprintln!(screen, "next");

        let row0: Vec<u8> = (0..14)
            .map(|col| screen.read_cell(Position::new(col, 0).unwrap()).0)
            .collect();
        assert_eq!(&row0, b"[ERROR] disk 0");
        assert_eq!(screen.read_cell(Position::new(0, 1).unwrap()).0, b'n');
        assert_eq!(
            screen.cursor_position().unwrap(),
            Some(Position::new(0, 2).unwrap())
        );
    }
}
