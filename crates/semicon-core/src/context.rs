//! Execution context queries.

use core::sync::atomic::{AtomicBool, Ordering};

/// Tells the flush path whether it is running inside an interrupt handler.
pub trait ExecContext {
    fn in_interrupt(&self) -> bool;
}

impl<X: ExecContext + ?Sized> ExecContext for &X {
    fn in_interrupt(&self) -> bool {
        (**self).in_interrupt()
    }
}

/// Context for code that never runs from a handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadMode;

impl ExecContext for ThreadMode {
    fn in_interrupt(&self) -> bool {
        false
    }
}

/// Interrupt flag raised and lowered by the handlers themselves.
///
/// For targets without a hardware query, and for simulating handlers on a host.
#[derive(Debug, Default)]
pub struct IrqFlag {
    active: AtomicBool,
}

impl IrqFlag {
    pub const fn new() -> Self {
        Self { active: AtomicBool::new(false) }
    }

    /// Enter interrupt handler
    pub fn enter(&self) {
        self.active.store(true, Ordering::Release);
    }

    /// Exit interrupt handler
    pub fn exit(&self) {
        self.active.store(false, Ordering::Release);
    }
}

impl ExecContext for IrqFlag {
    fn in_interrupt(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_irq_flag_follows_enter_exit() {
        let flag = IrqFlag::new();
        assert!(!flag.in_interrupt());
        flag.enter();
        assert!(flag.in_interrupt());
        assert!((&flag).in_interrupt());
        flag.exit();
        assert!(!flag.in_interrupt());
    }
}
