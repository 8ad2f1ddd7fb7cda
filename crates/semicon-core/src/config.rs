//! Console configuration.

use crate::consts::DEBUGGER_STDERR;

/// Start-up settings for a [`Console`](crate::console::Console).
///
/// Capacity is not here: it is the `C` const generic of the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Logging starts enabled.
    pub log_enabled: bool,
    /// Output is buffered until flushed.
    pub buffer_enabled: bool,
    /// Try a flush before dropping buffered output on overflow.
    pub auto_flush: bool,
    /// Emit `\r\n` for every `\n` instead of a bare `\n`.
    pub crlf: bool,
    /// Host file handle written to.
    pub handle: u32,
}

impl ConsoleConfig {
    pub const DEFAULT: Self = Self {
        log_enabled: true,
        buffer_enabled: true,
        auto_flush: cfg!(feature = "auto-flush"),
        crlf: false,
        handle: DEBUGGER_STDERR,
    };
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
