use std::io::Write;
use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    Stderr,
}

pub struct Logger {
    prefix: Option<String>,
    target: LogTarget,
}

impl Logger {
    fn new(prefix: Option<String>, target: LogTarget) -> Self {
        Self { prefix, target }
    }

    fn format(&self, file: &str, line: u32, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        match self.prefix {
            Some(ref prefix) => {
                format!("[{}][{}][{}:{}] {}", timestamp, prefix, file_name, line, message)
            }
            None => format!("[{}][{}:{}] {}", timestamp, file_name, line, message),
        }
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        let formatted = self.format(file, line, message);
        // Write failures are ignored.
        let _ = match self.target {
            LogTarget::Stdout => writeln!(std::io::stdout(), "{}", formatted),
            LogTarget::Stderr => writeln!(std::io::stderr(), "{}", formatted),
        };
    }
}

pub fn init_logger(prefix: Option<String>, target: LogTarget) {
    LOGGER.get_or_init(|| Logger::new(prefix, target));
}

/// Messages logged before `init_logger` are discarded; library code logs
/// unconditionally and the binary decides whether anything is printed.
pub fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(file!(), line!(), &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_strips_directories_from_file_name() {
        let logger = Logger::new(None, LogTarget::Stderr);
        let formatted = logger.format("common/src/games/tictactoe/game_state.rs", 42, "hello");
        assert!(formatted.ends_with("[game_state.rs:42] hello"));
    }

    #[test]
    fn test_format_includes_prefix() {
        let logger = Logger::new(Some("Game".to_string()), LogTarget::Stdout);
        let formatted = logger.format("main.rs", 7, "started");
        assert!(formatted.contains("[Game][main.rs:7] started"));
    }
}
