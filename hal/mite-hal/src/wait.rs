//! Cycle-counted busy-wait primitives
//!
//! Delays on the target are plain spin loops whose cost is known to the
//! cycle. The constants here describe that cost so the timebase can turn
//! microseconds into loop counts, and so simulations can charge the same
//! number of cycles the real loop would burn.

/// Cycles per pass of the decrement-and-branch loop
///
/// `sbiw` (2 cycles) followed by a taken `brne` (2 cycles).
pub const SPIN_LOOP_CYCLES: u32 = 4;

/// Total cycles burnt by [`BusyWait::spin_nested`]
///
/// Four cycles of register setup, then per outer pass: two register copies,
/// the inner loop (`4 * count` including the `nop` that pads the final,
/// untaken branch) and a `subi`/`brne` pair.
pub const fn nested_loop_cycles(count: u16, outer: u8) -> u32 {
    4 + outer as u32 * (SPIN_LOOP_CYCLES * count as u32 + 4)
}

/// Cycle-accurate spin loops
pub trait BusyWait {
    /// Spin `count` passes of the 4-cycle loop
    ///
    /// A count of zero wraps on real hardware (65 536 passes); callers
    /// skip the call instead.
    fn spin(&mut self, count: u16);

    /// Spin `outer` passes over an inner loop of `count` 4-cycle passes
    ///
    /// Cost is [`nested_loop_cycles`]. Interrupts must be masked by the
    /// caller for the count to hold.
    fn spin_nested(&mut self, count: u16, outer: u8);

    /// Spin for one calibrated millisecond
    fn spin_ms(&mut self);
}

impl<T: BusyWait + ?Sized> BusyWait for &mut T {
    fn spin(&mut self, count: u16) {
        (**self).spin(count)
    }

    fn spin_nested(&mut self, count: u16, outer: u8) {
        (**self).spin_nested(count, outer)
    }

    fn spin_ms(&mut self) {
        (**self).spin_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_loop_cycles() {
        // 16 MHz, 1000 us: 250 inner passes, 16 outer passes
        assert_eq!(nested_loop_cycles(250, 16), 4 + 16 * 1004);
        assert_eq!(nested_loop_cycles(0, 0), 4);
    }
}
