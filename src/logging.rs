// Logging macros that only emit in debug builds. Arguments are still
// type-checked in release so nothing goes unused.

#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            log::debug!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            log::info!($($arg)*);
        }
    };
}

/// Sets up `env_logger` on stderr. `RUST_LOG` overrides the `warn` default.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}
