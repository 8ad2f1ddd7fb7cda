//! # semicon-core
//!
//! Buffered debug console for targets that talk to their debugger through
//! semihosting instead of a UART.
//!
//! ```text
//! print/dump ──▶ OutputBuffer ──flush──▶ Link ──▶ Transport ──▶ debugger
//!                 (drop+mark)    (thread    (log     (bkpt 0xAB)
//!                                 context)   gate)
//! ```
//!
//! Nothing here allocates. A [`Console`] owns its buffer and flags; wrap it
//! in a [`SharedConsole`] to print from interrupt handlers as well.

#![cfg_attr(not(test), no_std)]

pub mod buffer;
pub mod config;
pub mod console;
pub mod consts;
pub mod context;
pub mod flush;
pub mod format;
pub mod logger;
pub mod output;
pub mod radio;
pub mod semihost;
pub mod shared;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use buffer::{Append, OutputBuffer, Stats};
pub use config::ConsoleConfig;
pub use console::Console;
pub use context::{ExecContext, IrqFlag, ThreadMode};
pub use flush::{Flush, FlushController};
pub use logger::ConsoleLogger;
pub use output::DebugOutput;
pub use radio::Radio;
pub use semihost::Semihosting;
pub use shared::SharedConsole;
pub use transport::{Discard, Link, Transport, TransportError};
