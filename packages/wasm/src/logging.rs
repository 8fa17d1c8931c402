//! Browser console sink for the `log` facade.
//!
//! Core modules log through `log` macros only. In the browser, `install`
//! routes records to `console.*` by level; native builds never install a
//! logger, so logging there is a no-op.

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::error::MindmapError;

/// Forwards `log` records to `web_sys::console`.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = format!("[{}] {}", record.target(), record.args());
        emit(record.level(), &message);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, message: &str) {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    let value = JsValue::from_str(message);
    match level {
        Level::Error => console::error_1(&value),
        Level::Warn => console::warn_1(&value),
        Level::Info => console::info_1(&value),
        Level::Debug | Level::Trace => console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, _message: &str) {}

/// Install the console logger. Safe to call more than once.
pub fn install(level: LevelFilter) {
    // A second call finds the logger already set; only the level changes
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Parse a level name as accepted by `setLogLevel`.
pub fn parse_level(name: &str) -> Result<LevelFilter, MindmapError> {
    name.trim()
        .parse::<LevelFilter>()
        .map_err(|_| MindmapError::InvalidLogLevel(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN ").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::Off);
        assert!(parse_level("loud").is_err());
    }
}
