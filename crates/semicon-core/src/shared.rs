//! Console shared between thread context and interrupt handlers.
//!
//! Every operation runs inside a critical section, so an interrupt can never
//! land in the middle of an append. Flushes run the transport inside the
//! critical section too. For semihosting that costs nothing extra: the core
//! is halted while the debugger services the trap.

use core::cell::RefCell;
use core::fmt;

use critical_section::Mutex;

use crate::console::Console;
use crate::consts::OUTPUT_BUFFER_SIZE;
use crate::context::ExecContext;
use crate::flush::Flush;
use crate::output::DebugOutput;
use crate::transport::Transport;

pub struct SharedConsole<T, X, const C: usize = OUTPUT_BUFFER_SIZE> {
    inner: Mutex<RefCell<Console<T, X, C>>>,
}

impl<T: Transport, X: ExecContext, const C: usize> SharedConsole<T, X, C> {
    pub const fn new(console: Console<T, X, C>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(console)),
        }
    }

    /// Run `f` on the console inside a critical section.
    ///
    /// Returns `None` when the console is already borrowed further up the
    /// stack (a log record emitted while printing, for example); that output
    /// is dropped.
    pub fn with<R>(&self, f: impl FnOnce(&mut Console<T, X, C>) -> R) -> Option<R> {
        critical_section::with(|cs| {
            let mut console = self.inner.borrow(cs).try_borrow_mut().ok()?;
            Some(f(&mut console))
        })
    }

    pub fn write_char(&self, c: u8) -> u8 {
        self.with(|console| console.write_char(c)).unwrap_or(c)
    }

    pub fn print(&self, s: &str) {
        self.with(|console| console.print(s));
    }

    pub fn print_fmt(&self, args: fmt::Arguments<'_>) {
        self.with(|console| console.print_fmt(args));
    }

    pub fn print_hex(&self, v: u8) {
        self.with(|console| console.print_hex(v));
    }

    pub fn dump(&self, bytes: &[u8]) {
        self.with(|console| console.dump(bytes));
    }

    pub fn print_float(&self, f: f32) {
        self.with(|console| console.print_float(f));
    }

    /// Flush; reports `Deferred` when the console is busy.
    pub fn flush(&self) -> Flush {
        self.with(|console| console.flush()).unwrap_or(Flush::Deferred)
    }

    pub fn enable_log(&self) {
        self.with(|console| console.enable_log());
    }

    pub fn disable_log(&self) {
        self.with(|console| console.disable_log());
    }

    pub fn enable_buffer(&self) {
        self.with(|console| console.enable_buffer());
    }

    pub fn disable_buffer(&self) -> Flush {
        self.with(|console| console.disable_buffer()).unwrap_or(Flush::Deferred)
    }

    pub fn set_silenced(&self, silenced: bool) {
        self.with(|console| console.set_silenced(silenced));
    }

    pub fn is_mid_line(&self) -> bool {
        self.with(|console| console.is_mid_line()).unwrap_or(false)
    }
}

impl<T: Transport, X: ExecContext, const C: usize> DebugOutput for &SharedConsole<T, X, C> {
    fn print(&mut self, s: &str) {
        SharedConsole::print(self, s);
    }

    fn dump(&mut self, bytes: &[u8]) {
        SharedConsole::dump(self, bytes);
    }
}

impl<T: Transport, X: ExecContext, const C: usize> fmt::Write for &SharedConsole<T, X, C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        SharedConsole::print(self, s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{IrqFlag, ThreadMode};
    use crate::test_support::Capture;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_print_and_flush() {
        let shared: SharedConsole<Capture, ThreadMode, 64> =
            SharedConsole::new(Console::new(Capture::default(), ThreadMode));
        shared.print("temp ");
        shared.print_float(21.5);
        shared.write_char(b'\n');

        assert_eq!(shared.flush(), Flush::Sent);
        let sent = shared.with(|console| console.transport().sent()).unwrap();
        assert_eq!(sent, b"temp 21.50\n");
    }

    #[test]
    fn test_nested_use_is_dropped_not_panicking() {
        let shared: SharedConsole<Capture, ThreadMode, 64> =
            SharedConsole::new(Console::new(Capture::default(), ThreadMode));

        let inner = shared.with(|console| {
            console.print("outer");
            shared.print("inner");
            shared.with(|_| ())
        });
        assert_eq!(inner, Some(None));
        assert_eq!(shared.with(|console| console.pending()), Some(5));
    }

    #[test]
    fn test_concurrent_appends_are_never_torn() {
        static IRQ: IrqFlag = IrqFlag::new();
        let shared: Arc<SharedConsole<Capture, &'static IrqFlag, 8192>> =
            Arc::new(SharedConsole::new(Console::new(Capture::default(), &IRQ)));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    let line = [b'a' + i as u8; 8];
                    for _ in 0..50 {
                        shared.with(|console| console.dump(&line));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let buffered = shared.with(|console| console.buffered().to_vec()).unwrap();
        assert_eq!(buffered.len(), 4 * 50 * 8 * 3);
        // Every dump landed as one contiguous run of its own byte
        for chunk in buffered.chunks(24) {
            assert!(chunk.chunks(3).all(|cell| cell == &chunk[..3]));
        }
    }

    #[test]
    fn test_flush_from_simulated_handler_is_deferred() {
        static IRQ: IrqFlag = IrqFlag::new();
        let shared: SharedConsole<Capture, &'static IrqFlag, 64> =
            SharedConsole::new(Console::new(Capture::default(), &IRQ));

        IRQ.enter();
        shared.print("tick\n");
        assert_eq!(shared.flush(), Flush::Deferred);
        IRQ.exit();

        assert_eq!(shared.with(|console| console.pending()), Some(5));
        assert_eq!(shared.flush(), Flush::Sent);
    }
}
