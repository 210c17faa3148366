//! Busy-wait loops on the system clock

use mite_hal::wait::{nested_loop_cycles, SPIN_LOOP_CYCLES};
use mite_hal::BusyWait;

use crate::cycles::CycleScale;

/// Spin loops charged at the cost of the emulated CPU's loops
#[derive(Debug, Clone, Copy)]
pub struct CycleWait {
    scale: CycleScale,
}

impl CycleWait {
    pub const fn new(scale: CycleScale) -> Self {
        Self { scale }
    }
}

impl BusyWait for CycleWait {
    fn spin(&mut self, count: u16) {
        let passes = if count == 0 { 0x1_0000 } else { count as u32 };
        cortex_m::asm::delay(self.scale.scale(passes * SPIN_LOOP_CYCLES));
    }

    fn spin_nested(&mut self, count: u16, outer: u8) {
        cortex_m::asm::delay(self.scale.scale(nested_loop_cycles(count, outer)));
    }

    fn spin_ms(&mut self) {
        cortex_m::asm::delay(self.scale.sys_hz() / 1000);
    }
}
