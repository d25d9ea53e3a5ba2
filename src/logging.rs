// Diagnostic logging: env_logger setup plus trace macros that compile away in release builds.
// Round events for the player go to the game log (see event_log), not here.

use chrono::Local;
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

/// Install the global logger. `RUST_LOG` overrides the default filter.
///
/// With a trace file everything at `debug` and above is appended there.
/// Without one, diagnostics go to stderr, which is silenced by default while
/// the full-screen UI owns the terminal.
pub fn init(trace_file: Option<&Path>, terminal_ui: bool) -> io::Result<()> {
    let default_filter = match (trace_file, terminal_ui) {
        (Some(_), _) => "debug",
        (None, true) => "off",
        (None, false) => "warn",
    };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{} {:<5} {}] {}",
            Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Some(path) = trace_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    // A second init (e.g. from tests) keeps the first logger.
    let _ = builder.try_init();
    Ok(())
}
