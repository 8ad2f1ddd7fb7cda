//! Compile-time constants shared by the console and its transports.

/// Default output buffer capacity in bytes.
///
/// Large enough that interrupt handlers can log a few lines between
/// thread-context flushes.
pub const OUTPUT_BUFFER_SIZE: usize = 2048;

/// Text that replaces the buffered bytes when the buffer overflows.
pub const DROPPED_MARKER: &[u8] = b"[DROPPED]";

/// Debugger file handle for its stderr stream.
pub const DEBUGGER_STDERR: u32 = 2;

/// Largest payload a single radio receive can return.
pub const TRANSFER_SIZE: usize = 32;
