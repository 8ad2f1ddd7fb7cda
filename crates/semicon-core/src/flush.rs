//! Flush Controller - moves buffered output to the transport.
//!
//! # Rules
//!
//! - Flushing with logging disabled empties the buffer: nothing could ever
//!   receive those bytes.
//! - Flushing from an interrupt handler is deferred. The trap is slow and may
//!   wait on the debugger, so it only ever runs from thread context.
//! - A flush hands the whole buffer over once and then clears it. Failed
//!   writes are not retried.

use crate::buffer::{Append, OutputBuffer, Stats};
use crate::config::ConsoleConfig;
use crate::consts::OUTPUT_BUFFER_SIZE;
use crate::context::ExecContext;
use crate::transport::{Link, Transport, TransportError};

/// Result of a [`FlushController::flush`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Flush {
    /// Logging is off; buffered bytes were discarded.
    Disabled,
    /// Nothing to send.
    Empty,
    /// Called from an interrupt handler; bytes kept for later.
    Deferred,
    /// Buffer handed to the transport.
    Sent,
    /// Transport refused the bytes; they are gone.
    Failed(TransportError),
}

/// Owns the output buffer and decides when it reaches the transport.
pub struct FlushController<T, X, const C: usize = OUTPUT_BUFFER_SIZE> {
    buffer: OutputBuffer<C>,
    link: Link<T>,
    context: X,
    buffer_enabled: bool,
    auto_flush: bool,
}

impl<T: Transport, X: ExecContext, const C: usize> FlushController<T, X, C> {
    pub const fn new(transport: T, context: X, config: ConsoleConfig) -> Self {
        Self {
            buffer: OutputBuffer::new(),
            link: Link::new(transport, config.handle, config.log_enabled),
            context,
            buffer_enabled: config.buffer_enabled,
            auto_flush: config.auto_flush,
        }
    }

    /// Queue `bytes` for the transport.
    ///
    /// With buffering off the bytes go straight to the transport, except in
    /// interrupt context where they are buffered until the next flush.
    /// Anything still buffered is sent before a direct write, so output
    /// keeps its append order.
    pub fn append(&mut self, bytes: &[u8]) -> Append {
        if !self.buffer_enabled && !self.context.in_interrupt() {
            if !self.buffer.is_empty() {
                self.flush();
            }
            let _ = self.link.write(bytes);
            return Append::Bypassed;
        }

        if self.auto_flush && bytes.len() < C && self.buffer.is_full_for(bytes.len()) {
            self.flush();
        }
        self.buffer.append(bytes)
    }

    /// Send everything buffered to the transport.
    pub fn flush(&mut self) -> Flush {
        if !self.link.is_enabled() {
            self.buffer.clear();
            return Flush::Disabled;
        }
        if self.buffer.is_empty() {
            return Flush::Empty;
        }
        if self.context.in_interrupt() {
            log::trace!("flush deferred, {} bytes pending", self.buffer.len());
            return Flush::Deferred;
        }

        let result = self.link.write(self.buffer.as_bytes());
        self.buffer.clear();
        match result {
            Ok(()) => Flush::Sent,
            Err(err) => Flush::Failed(err),
        }
    }

    pub fn enable_log(&mut self) {
        self.link.set_enabled(true);
    }

    pub fn disable_log(&mut self) {
        self.link.set_enabled(false);
    }

    pub fn is_log_enabled(&self) -> bool {
        self.link.is_enabled()
    }

    pub fn enable_buffer(&mut self) {
        self.buffer_enabled = true;
    }

    /// Flush pending output, then stop buffering.
    pub fn disable_buffer(&mut self) -> Flush {
        let flushed = self.flush();
        self.buffer_enabled = false;
        flushed
    }

    pub fn is_buffer_enabled(&self) -> bool {
        self.buffer_enabled
    }

    /// Number of bytes waiting for a flush
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Bytes waiting for a flush, oldest first
    pub fn buffered(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    pub fn capacity(&self) -> usize {
        C
    }

    pub fn stats(&self) -> Stats {
        self.buffer.stats()
    }

    pub fn reset_stats(&mut self) {
        self.buffer.reset_stats();
    }

    pub fn context(&self) -> &X {
        &self.context
    }

    pub fn transport(&self) -> &T {
        self.link.transport()
    }

    pub fn transport_mut(&mut self) -> &mut T {
        self.link.transport_mut()
    }
}
