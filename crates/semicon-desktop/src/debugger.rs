//! Host-side stand-in for a debugger servicing semihosting writes.
//!
//! Every write lands on a channel read by the TUI. The attachment flag is
//! shared so the TUI can pull the probe out from under the console.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;

use semicon_core::{Transport, TransportError};

/// One SYS_WRITE as the debugger saw it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostWrite {
    pub handle: u32,
    pub bytes: Vec<u8>,
}

pub struct HostDebugger {
    tx: Sender<HostWrite>,
    attached: Arc<AtomicBool>,
}

impl HostDebugger {
    pub fn new(tx: Sender<HostWrite>) -> Self {
        Self {
            tx,
            attached: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Shared attachment flag; clear it to simulate pulling the probe.
    pub fn attachment(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.attached)
    }
}

impl Transport for HostDebugger {
    fn write(&mut self, handle: u32, bytes: &[u8]) -> Result<(), TransportError> {
        if !self.attached.load(Ordering::Relaxed) {
            return Err(TransportError::Detached);
        }
        self.tx
            .send(HostWrite {
                handle,
                bytes: bytes.to_vec(),
            })
            .map_err(|_| TransportError::Detached)
    }
}
