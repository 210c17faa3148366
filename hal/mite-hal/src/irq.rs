//! Global interrupt control
//!
//! The only synchronization primitive on the target: mask every interrupt,
//! do the work, unmask again.

/// Interrupt enable state captured by [`InterruptControl::disable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IrqState {
    enabled: bool,
}

impl IrqState {
    /// Wrap a raw "interrupts were enabled" flag
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether interrupts were enabled when the state was captured
    pub const fn was_enabled(self) -> bool {
        self.enabled
    }
}

/// Global interrupt mask
pub trait InterruptControl {
    /// Mask all interrupts, returning the previous state
    fn disable(&mut self) -> IrqState;

    /// Unmask all interrupts unconditionally
    fn enable(&mut self);

    /// Check whether interrupts are currently enabled
    fn is_enabled(&self) -> bool;

    /// Put back the state captured by [`disable`](Self::disable)
    fn restore(&mut self, state: IrqState) {
        if state.was_enabled() {
            self.enable();
        }
    }

    /// Run `f` with interrupts masked, restoring the previous state after
    fn free<R>(&mut self, f: impl FnOnce() -> R) -> R {
        let state = self.disable();
        let result = f();
        self.restore(state);
        result
    }
}

impl<T: InterruptControl + ?Sized> InterruptControl for &mut T {
    fn disable(&mut self) -> IrqState {
        (**self).disable()
    }

    fn enable(&mut self) {
        (**self).enable()
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}
