//! `log` backend printing records through a shared console.
//!
//! Records are formatted as `[LEVEL] target: message` and buffered like any
//! other console output. The console itself logs overflow and deferred
//! flushes at trace level; those records are dropped while the console is
//! busy instead of recursing into it.

use core::sync::atomic::{AtomicBool, Ordering};

use log::{LevelFilter, Log, Metadata, Record};

use crate::context::ExecContext;
use crate::shared::SharedConsole;
use crate::transport::Transport;

/// Logger writing to a device-lifetime [`SharedConsole`].
pub struct ConsoleLogger<T: 'static, X: 'static, const C: usize> {
    console: &'static SharedConsole<T, X, C>,
    max_level: LevelFilter,
    /// Set while a record is being written, to stop recursive logging.
    busy: AtomicBool,
}

impl<T: 'static, X: 'static, const C: usize> ConsoleLogger<T, X, C> {
    pub const fn new(console: &'static SharedConsole<T, X, C>, max_level: LevelFilter) -> Self {
        Self {
            console,
            max_level,
            busy: AtomicBool::new(false),
        }
    }

    pub fn max_level(&self) -> LevelFilter {
        self.max_level
    }
}

impl<T, X, const C: usize> Log for ConsoleLogger<T, X, C>
where
    T: Transport + Send + 'static,
    X: ExecContext + Send + 'static,
{
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        if self.busy.swap(true, Ordering::Acquire) {
            return;
        }

        self.console.print_fmt(format_args!(
            "[{}] {}: {}\n",
            record.level(),
            record.target(),
            record.args()
        ));

        self.busy.store(false, Ordering::Release);
    }

    fn flush(&self) {
        self.console.flush();
    }
}

/// Install `logger` as the global `log` backend.
///
/// Does nothing if a logger is already set.
pub fn init<T, X, const C: usize>(logger: &'static ConsoleLogger<T, X, C>)
where
    T: Transport + Send + 'static,
    X: ExecContext + Send + 'static,
{
    match log::set_logger(logger) {
        Ok(()) => {
            log::set_max_level(logger.max_level());
        }
        Err(_) => {
            // Logger already set
        }
    }
}
