//! Console facade - the one entry point callers print through.
//!
//! Text goes through [`Console::write_char`], which applies the newline and
//! silence rules. Hex output and dumps go straight into the buffer.

use core::fmt;

use crate::buffer::Stats;
use crate::config::ConsoleConfig;
use crate::consts::OUTPUT_BUFFER_SIZE;
use crate::context::ExecContext;
use crate::flush::{Flush, FlushController};
use crate::format::{self, Fixed2};
use crate::output::DebugOutput;
use crate::transport::Transport;

/// Buffered debug console over transport `T`.
pub struct Console<T, X, const C: usize = OUTPUT_BUFFER_SIZE> {
    flusher: FlushController<T, X, C>,
    silenced: bool,
    mid_line: bool,
    crlf: bool,
}

impl<T: Transport, X: ExecContext, const C: usize> Console<T, X, C> {
    /// Console with the default configuration
    pub const fn new(transport: T, context: X) -> Self {
        Self::with_config(transport, context, ConsoleConfig::DEFAULT)
    }

    pub const fn with_config(transport: T, context: X, config: ConsoleConfig) -> Self {
        Self {
            flusher: FlushController::new(transport, context, config),
            silenced: false,
            mid_line: false,
            crlf: config.crlf,
        }
    }

    /// Output one character. Returns `c` unchanged, even when silenced.
    ///
    /// `\r` is never buffered. `\n` ends the current line.
    pub fn write_char(&mut self, c: u8) -> u8 {
        if self.silenced || c == b'\r' {
            return c;
        }
        if c == b'\n' {
            self.mid_line = false;
            if self.crlf {
                self.flusher.append(b"\r\n");
                return c;
            }
        } else {
            self.mid_line = true;
        }
        self.flusher.append(&[c]);
        c
    }

    pub fn print(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_char(b);
        }
    }

    pub fn print_fmt(&mut self, args: fmt::Arguments<'_>) {
        let _ = fmt::Write::write_fmt(self, args);
    }

    /// Append `v` as two hex digits.
    pub fn print_hex(&mut self, v: u8) {
        if self.silenced {
            return;
        }
        self.flusher.append(&format::hex(v));
    }

    /// Append `bytes` as hex, each followed by a space.
    pub fn dump(&mut self, bytes: &[u8]) {
        if self.silenced {
            return;
        }
        for &b in bytes {
            self.flusher.append(&format::dump_cell(b));
        }
    }

    /// Print `f` with two truncated decimal places.
    pub fn print_float(&mut self, f: f32) {
        self.print_fmt(format_args!("{}", Fixed2(f)));
    }

    pub fn flush(&mut self) -> Flush {
        self.flusher.flush()
    }

    pub fn enable_log(&mut self) {
        self.flusher.enable_log();
    }

    pub fn disable_log(&mut self) {
        self.flusher.disable_log();
    }

    pub fn is_log_enabled(&self) -> bool {
        self.flusher.is_log_enabled()
    }

    pub fn enable_buffer(&mut self) {
        self.flusher.enable_buffer();
    }

    /// Flush what is pending and switch to unbuffered output.
    pub fn disable_buffer(&mut self) -> Flush {
        self.flusher.disable_buffer()
    }

    pub fn is_buffer_enabled(&self) -> bool {
        self.flusher.is_buffer_enabled()
    }

    /// Silence all output. Buffered bytes stay where they are.
    pub fn set_silenced(&mut self, silenced: bool) {
        self.silenced = silenced;
    }

    pub fn is_silenced(&self) -> bool {
        self.silenced
    }

    /// True when the last character written was not a newline
    pub fn is_mid_line(&self) -> bool {
        self.mid_line
    }

    pub fn pending(&self) -> usize {
        self.flusher.pending()
    }

    pub fn buffered(&self) -> &[u8] {
        self.flusher.buffered()
    }

    pub fn capacity(&self) -> usize {
        self.flusher.capacity()
    }

    pub fn stats(&self) -> Stats {
        self.flusher.stats()
    }

    pub fn reset_stats(&mut self) {
        self.flusher.reset_stats();
    }

    pub fn context(&self) -> &X {
        self.flusher.context()
    }

    pub fn transport(&self) -> &T {
        self.flusher.transport()
    }

    pub fn transport_mut(&mut self) -> &mut T {
        self.flusher.transport_mut()
    }
}

impl<T: Transport, X: ExecContext, const C: usize> fmt::Write for Console<T, X, C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s);
        Ok(())
    }
}

impl<T: Transport, X: ExecContext, const C: usize> DebugOutput for Console<T, X, C> {
    fn print(&mut self, s: &str) {
        Console::print(self, s);
    }

    fn dump(&mut self, bytes: &[u8]) {
        Console::dump(self, bytes);
    }
}
