//! Browser logging. `tracing` events fall through to the `log` facade when no
//! subscriber is installed, and `console_log` forwards those to devtools.

use super::config::{AppConfig, LogLevel};

pub fn init(config: &AppConfig) {
    console_error_panic_hook::set_once();

    let level = match config.log_level {
        LogLevel::Error => log::Level::Error,
        LogLevel::Warn => log::Level::Warn,
        LogLevel::Info => log::Level::Info,
        LogLevel::Debug => log::Level::Debug,
        LogLevel::Trace => log::Level::Trace,
    };

    // A second init (hot reload) keeps the first logger.
    let _ = console_log::init_with_level(level);
}
