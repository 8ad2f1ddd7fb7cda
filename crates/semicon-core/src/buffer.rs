//! Output Buffer - fixed-capacity byte accumulator for pending console output
//!
//! Holds bytes not yet handed to the transport. When a message does not fit,
//! everything buffered so far is thrown away and replaced by a short marker,
//! on the assumption that the newest output is worth more than old output
//! nobody has flushed.

use heapless::Vec;

use crate::consts::{DROPPED_MARKER, OUTPUT_BUFFER_SIZE};

/// What happened to a message handed to [`OutputBuffer::append`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Append {
    /// Message appended after the existing content.
    Stored,
    /// Buffer was full: old content replaced by the marker, message appended after it.
    Marked,
    /// Message can never fit (`len >= C`); buffer untouched.
    TooLarge,
    /// Buffer was full and even marker + message does not fit; only the marker remains.
    Lost,
    /// Buffering is off: handed straight to the transport.
    Bypassed,
}

/// Overflow counters, readable and resettable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stats {
    /// Number of drop-and-mark events.
    pub marked: u32,
    /// Number of messages discarded outright (too large or lost).
    pub rejected: u32,
}

/// Byte buffer with capacity `C`.
///
/// The length always stays strictly below `C`: a message is only accepted
/// when `len + n < C`.
pub struct OutputBuffer<const C: usize = OUTPUT_BUFFER_SIZE> {
    data: Vec<u8, C>,
    stats: Stats,
}

impl<const C: usize> OutputBuffer<C> {
    /// Create a new empty buffer
    pub const fn new() -> Self {
        Self {
            data: Vec::new(),
            stats: Stats { marked: 0, rejected: 0 },
        }
    }

    /// Total capacity in bytes
    pub const fn capacity(&self) -> usize {
        C
    }

    /// Number of buffered bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Buffered bytes in append order
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// True when `n` more bytes would hit the capacity
    pub fn is_full_for(&self, n: usize) -> bool {
        self.data.len() + n >= C
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = Stats::default();
    }

    /// Append `bytes`, applying the drop-and-mark policy if the buffer is full.
    pub fn append(&mut self, bytes: &[u8]) -> Append {
        if bytes.len() >= C {
            self.stats.rejected = self.stats.rejected.wrapping_add(1);
            return Append::TooLarge;
        }

        let mut outcome = Append::Stored;
        if self.is_full_for(bytes.len()) {
            self.mark_dropped();
            outcome = Append::Marked;

            if self.is_full_for(bytes.len()) {
                self.stats.rejected = self.stats.rejected.wrapping_add(1);
                return Append::Lost;
            }
        }

        // Cannot fail: the length checks above keep len + n below C
        if self.data.extend_from_slice(bytes).is_err() {
            self.stats.rejected = self.stats.rejected.wrapping_add(1);
            return Append::Lost;
        }
        outcome
    }

    /// Replace the whole content with the dropped marker.
    fn mark_dropped(&mut self) {
        log::trace!("output buffer full, dropping {} bytes", self.data.len());
        self.data.clear();
        let marker = &DROPPED_MARKER[..DROPPED_MARKER.len().min(C.saturating_sub(1))];
        let _ = self.data.extend_from_slice(marker);
        self.stats.marked = self.stats.marked.wrapping_add(1);
    }
}

impl<const C: usize> Default for OutputBuffer<C> {
    fn default() -> Self {
        Self::new()
    }
}
