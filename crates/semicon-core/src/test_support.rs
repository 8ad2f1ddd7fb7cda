//! Helpers shared by unit tests.

use crate::transport::{Transport, TransportError};

/// Transport recording every write; optionally failing them.
#[derive(Default)]
pub struct Capture {
    pub writes: Vec<(u32, Vec<u8>)>,
    pub fail_with: Option<TransportError>,
}

impl Capture {
    /// Everything written, concatenated
    pub fn sent(&self) -> Vec<u8> {
        self.writes.iter().flat_map(|(_, bytes)| bytes.iter().copied()).collect()
    }
}

impl Transport for Capture {
    fn write(&mut self, handle: u32, bytes: &[u8]) -> Result<(), TransportError> {
        self.writes.push((handle, bytes.to_vec()));
        match self.fail_with {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
