//! Cortex-M wiring for the semihosting console.
//!
//! Provides the one device-lifetime [`CONSOLE`], the handler-mode query it
//! flushes with, `dprint!`/`dprintln!`, and a `log` backend on top.
//!
//! # Hardware Setup
//!
//! ```text
//! target ──SWD──▶ probe ──▶ openocd (semihosting enabled) ──▶ stderr
//! ```
//!
//! **WARNING**: with the `semihosting` feature every flush executes
//! `bkpt 0xAB`. Without a debugger attached that halts the core for good.
//! Build production images without the feature; output is then discarded.
//!
//! # Usage
//!
//! ```ignore
//! semicon_cortexm::init(log::LevelFilter::Info);
//! semicon_cortexm::dprintln!("boot, vbat={}", 3.7);
//!
//! loop {
//!     // Interrupt handlers may print; only thread mode flushes
//!     semicon_cortexm::flush();
//! }
//! ```

#![no_std]

mod context;
mod macros;

pub use context::HandlerMode;

use log::LevelFilter;
use semicon_core::consts::OUTPUT_BUFFER_SIZE;
use semicon_core::{Console, ConsoleLogger, Flush, SharedConsole};

#[cfg(feature = "semihosting")]
pub type DeviceTransport = semicon_core::Semihosting;
#[cfg(not(feature = "semihosting"))]
pub type DeviceTransport = semicon_core::Discard;

#[cfg(feature = "semihosting")]
const TRANSPORT: DeviceTransport = semicon_core::Semihosting;
#[cfg(not(feature = "semihosting"))]
const TRANSPORT: DeviceTransport = semicon_core::Discard;

pub type DeviceConsole = SharedConsole<DeviceTransport, HandlerMode, OUTPUT_BUFFER_SIZE>;

/// Console shared by thread mode and every interrupt handler.
pub static CONSOLE: DeviceConsole = SharedConsole::new(Console::new(TRANSPORT, HandlerMode));

static LOGGER: ConsoleLogger<DeviceTransport, HandlerMode, OUTPUT_BUFFER_SIZE> =
    ConsoleLogger::new(&CONSOLE, LevelFilter::Trace);

/// Route the `log` crate to [`CONSOLE`], keeping records up to `max_level`.
///
/// Call once, early in `main`, before anything logs.
pub fn init(max_level: LevelFilter) {
    semicon_core::logger::init(&LOGGER);
    log::set_max_level(max_level);
}

/// Flush pending console output. Deferred when called from a handler.
pub fn flush() -> Flush {
    CONSOLE.flush()
}

/// Append `bytes` to the console as a hex dump.
pub fn dump(bytes: &[u8]) {
    CONSOLE.dump(bytes);
}

/// Turn console output on or off at runtime.
pub fn set_log_enabled(enabled: bool) {
    if enabled {
        CONSOLE.enable_log();
    } else {
        CONSOLE.disable_log();
    }
}

/// Switch between buffered and direct output. Turning buffering off flushes first.
pub fn set_buffer_enabled(enabled: bool) {
    if enabled {
        CONSOLE.enable_buffer();
    } else {
        CONSOLE.disable_buffer();
    }
}
