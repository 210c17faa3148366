//! Counters and delays bound to one chip

use embedded_hal::delay::DelayNs;
use mite_hal::{BusyWait, InterruptControl};

use super::{plan_microseconds, DelayPlan, Timebase};
use crate::config::CpuFrequency;

/// `millis()`, `micros()`, `delay()` and `delay_microseconds()` for one CPU
/// clock
///
/// Borrows the shared [`Timebase`] and owns the spin and interrupt
/// primitives; [`release`](Self::release) hands them back.
pub struct Clock<'t, W, I> {
    timebase: &'t Timebase,
    cpu: CpuFrequency,
    wait: W,
    irq: I,
}

impl<'t, W: BusyWait, I: InterruptControl> Clock<'t, W, I> {
    pub fn new(timebase: &'t Timebase, cpu: CpuFrequency, wait: W, irq: I) -> Self {
        Self {
            timebase,
            cpu,
            wait,
            irq,
        }
    }

    pub fn cpu(&self) -> CpuFrequency {
        self.cpu
    }

    /// Milliseconds since boot, 16 ms resolution
    pub fn millis(&self) -> u32 {
        self.timebase.millis()
    }

    /// Microseconds since boot, one timer overflow resolution
    pub fn micros(&mut self) -> u32 {
        self.timebase.micros(&mut self.irq, self.cpu)
    }

    /// Busy-wait `ms` calibrated milliseconds
    pub fn delay(&mut self, ms: u16) {
        for _ in 0..ms {
            self.wait.spin_ms();
        }
    }

    /// Busy-wait `us` microseconds
    ///
    /// Long waits mask interrupts for their whole duration and enable them
    /// afterwards, so the watchdog tick is not counted while they run.
    pub fn delay_microseconds(&mut self, us: u16) {
        match plan_microseconds(self.cpu, us) {
            DelayPlan::Skip => {}
            DelayPlan::Spin { count } => self.wait.spin(count),
            DelayPlan::Nested { count, outer } => {
                self.irq.disable();
                self.wait.spin_nested(count, outer);
                self.irq.enable();
            }
        }
    }

    /// Give back the spin and interrupt primitives
    pub fn release(self) -> (W, I) {
        (self.wait, self.irq)
    }
}

impl<W: BusyWait, I: InterruptControl> DelayNs for Clock<'_, W, I> {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_us(ns.div_ceil(1000));
    }

    fn delay_us(&mut self, mut us: u32) {
        while us > 0 {
            let chunk = us.min(u16::MAX as u32) as u16;
            self.delay_microseconds(chunk);
            us -= chunk as u32;
        }
    }

    fn delay_ms(&mut self, mut ms: u32) {
        while ms > 0 {
            let chunk = ms.min(u16::MAX as u32) as u16;
            self.delay(chunk);
            ms -= chunk as u32;
        }
    }
}
