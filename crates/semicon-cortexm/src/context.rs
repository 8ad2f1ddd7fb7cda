use cortex_m::peripheral::scb::VectActive;
use cortex_m::peripheral::SCB;
use semicon_core::ExecContext;

/// Reads the active exception number: anything but thread mode is a handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct HandlerMode;

impl ExecContext for HandlerMode {
    fn in_interrupt(&self) -> bool {
        SCB::vect_active() != VectActive::ThreadMode
    }
}
