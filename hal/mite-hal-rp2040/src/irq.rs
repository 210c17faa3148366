//! PRIMASK global interrupt control

use cortex_m::register::primask;
use mite_hal::{InterruptControl, IrqState};

/// Global interrupt mask of the running core
#[derive(Debug, Default, Clone, Copy)]
pub struct CortexInterrupts;

impl CortexInterrupts {
    pub const fn new() -> Self {
        Self
    }
}

impl InterruptControl for CortexInterrupts {
    fn disable(&mut self) -> IrqState {
        let enabled = primask::read().is_active();
        cortex_m::interrupt::disable();
        IrqState::new(enabled)
    }

    fn enable(&mut self) {
        // SAFETY: nothing in the runtime holds a critical section across a
        // call into the core, which is the only place this is reached from
        unsafe { cortex_m::interrupt::enable() }
    }

    fn is_enabled(&self) -> bool {
        primask::read().is_active()
    }
}
