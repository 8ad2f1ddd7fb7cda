//! ARM semihosting transport.
//!
//! The target executes `bkpt 0xAB` with an operation number in r0 and the
//! address of an argument block in r1. An attached debugger intercepts the
//! breakpoint, services the request and resumes the core with the result in
//! r0.
//!
//! **WARNING**: without a debugger attached the breakpoint never returns.
//! Never ship an image that issues semihosting traps.

use crate::transport::{Transport, TransportError};

/// SYS_WRITE: write a buffer to a host file handle.
pub const SYS_WRITE: usize = 0x05;

/// Argument block for SYS_WRITE: `{handle, address, length}`.
pub fn write_block(handle: u32, bytes: &[u8]) -> [usize; 3] {
    [handle as usize, bytes.as_ptr() as usize, bytes.len()]
}

/// Issue a semihosting trap. Returns `None` when the target has no trap.
///
/// # Safety
///
/// `args` must point to a block laid out as `op` requires, valid (together
/// with any memory it references) for the duration of the call.
#[cfg(all(target_arch = "arm", target_os = "none"))]
#[inline(always)]
pub unsafe fn call(op: usize, args: *const usize) -> Option<isize> {
    let mut r0 = op;
    // SAFETY: caller upholds the argument block contract; the debugger only
    // reads memory through r1 for SYS_WRITE.
    unsafe {
        core::arch::asm!(
            "bkpt #0xab",
            inout("r0") r0,
            in("r1") args,
            options(nostack, preserves_flags),
        );
    }
    Some(r0 as isize)
}

/// Issue a semihosting trap. Returns `None` when the target has no trap.
///
/// # Safety
///
/// Same contract as the ARM variant; this target never dereferences `args`.
#[cfg(not(all(target_arch = "arm", target_os = "none")))]
#[inline(always)]
pub unsafe fn call(_op: usize, _args: *const usize) -> Option<isize> {
    None
}

/// Transport that writes through semihosting SYS_WRITE.
#[derive(Debug, Default, Clone, Copy)]
pub struct Semihosting;

impl Transport for Semihosting {
    fn write(&mut self, handle: u32, bytes: &[u8]) -> Result<(), TransportError> {
        if bytes.is_empty() {
            return Ok(());
        }
        let block = write_block(handle, bytes);
        // SAFETY: `block` and `bytes` both outlive the trap.
        match unsafe { call(SYS_WRITE, block.as_ptr()) } {
            None => Err(TransportError::Unsupported),
            Some(0) => Ok(()),
            // SYS_WRITE answers with the number of bytes it did not write
            Some(n) if n > 0 => Err(TransportError::Incomplete(n as usize)),
            Some(_) => Err(TransportError::Incomplete(bytes.len())),
        }
    }
}
