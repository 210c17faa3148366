//! Interrupt-fed tick counters

use mite_hal::timer::WATCHDOG_PERIOD_MS;
use mite_hal::InterruptControl;
use portable_atomic::{AtomicU32, Ordering};

use crate::config::CpuFrequency;

/// Watchdog tick and timer overflow counters
///
/// Each counter has exactly one writer, its interrupt handler, which
/// updates it with a load followed by a store. Both wrap.
#[derive(Debug, Default)]
pub struct Timebase {
    ticks: AtomicU32,
    overflows: AtomicU32,
}

impl Timebase {
    /// Both counters at zero; usable in a `static`
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU32::new(0),
            overflows: AtomicU32::new(0),
        }
    }

    /// Watchdog interrupt handler body, once every 16 ms
    pub fn on_watchdog_tick(&self) {
        let ticks = self.ticks.load(Ordering::Relaxed);
        self.ticks.store(ticks.wrapping_add(1), Ordering::Relaxed);
    }

    /// Timer 0 overflow handler body, once every 256 CPU cycles
    pub fn on_timer_overflow(&self) {
        let overflows = self.overflows.load(Ordering::Relaxed);
        self.overflows.store(overflows.wrapping_add(1), Ordering::Relaxed);
    }

    /// Watchdog ticks since boot
    pub fn ticks(&self) -> u32 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Timer overflows since boot
    pub fn overflows(&self) -> u32 {
        self.overflows.load(Ordering::Relaxed)
    }

    /// Milliseconds since boot, in 16 ms steps
    ///
    /// The watchdog has its own oscillator, so this does not depend on the
    /// CPU frequency.
    pub fn millis(&self) -> u32 {
        self.ticks().wrapping_mul(WATCHDOG_PERIOD_MS)
    }

    /// Microseconds since boot, in steps of one timer overflow
    ///
    /// Interrupts are masked around the counter read and unconditionally
    /// enabled afterwards. Assumes timer 0 runs undivided.
    pub fn micros<I: InterruptControl>(&self, irq: &mut I, cpu: CpuFrequency) -> u32 {
        irq.disable();
        let overflows = self.overflows();
        irq.enable();
        overflows.wrapping_mul(cpu.micros_per_overflow())
    }
}
