//! Transport seam between the console and whatever carries bytes to the host.

use core::fmt;

use crate::consts::DEBUGGER_STDERR;

/// Why a write did not reach the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Logging is disabled; nothing was sent.
    Disabled,
    /// No trap mechanism on this target.
    Unsupported,
    /// Nobody is listening on the other side.
    Detached,
    /// The host reported this many bytes as not written.
    Incomplete(usize),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("logging disabled"),
            Self::Unsupported => f.write_str("no debug trap on this target"),
            Self::Detached => f.write_str("debugger detached"),
            Self::Incomplete(n) => write!(f, "{} bytes not written", n),
        }
    }
}

impl core::error::Error for TransportError {}

/// Platform-specific debug output.
pub trait Transport {
    /// Hand `bytes` to the host on file `handle`.
    fn write(&mut self, handle: u32, bytes: &[u8]) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write(&mut self, handle: u32, bytes: &[u8]) -> Result<(), TransportError> {
        (**self).write(handle, bytes)
    }
}

/// Transport that accepts and throws away everything.
///
/// Used in builds where the real trap must not be compiled in.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl Transport for Discard {
    fn write(&mut self, _handle: u32, _bytes: &[u8]) -> Result<(), TransportError> {
        Ok(())
    }
}

/// A transport together with the logging gate and target handle.
pub struct Link<T> {
    transport: T,
    handle: u32,
    enabled: bool,
}

impl<T: Transport> Link<T> {
    pub const fn new(transport: T, handle: u32, enabled: bool) -> Self {
        Self { transport, handle, enabled }
    }

    /// Write through the transport unless logging is off.
    ///
    /// Zero-length writes succeed without reaching the transport.
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        if !self.enabled {
            return Err(TransportError::Disabled);
        }
        if bytes.is_empty() {
            return Ok(());
        }
        self.transport.write(self.handle, bytes)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn handle(&self) -> u32 {
        self.handle
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}

impl<T: Transport + Default> Default for Link<T> {
    fn default() -> Self {
        Self::new(T::default(), DEBUGGER_STDERR, true)
    }
}
