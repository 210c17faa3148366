//! Boot-time peripheral setup on the RP2040
//!
//! The RP2040 has no timer 0, no watchdog interrupt and a fixed-clock ADC.
//! SysTick reloads every 256 emulated cycles in place of the timer
//! overflow; the watchdog tick comes from an executor task that checks
//! [`watchdog_armed`]. PWM and ADC requests are recorded only.

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use mite_hal::timer::TIMER_OVERFLOW_CYCLES;
use mite_hal::{AdcPrescaler, InitHardware, Prescaler, Waveform};
use portable_atomic::{AtomicBool, Ordering};

use crate::cycles::CycleScale;

static WATCHDOG_ARMED: AtomicBool = AtomicBool::new(false);

/// Whether `init` asked for the 16 ms watchdog tick
pub fn watchdog_armed() -> bool {
    WATCHDOG_ARMED.load(Ordering::Relaxed)
}

/// SysTick-backed stand-in for timer 0
pub struct SysTickTimer {
    syst: SYST,
    scale: CycleScale,
    prescaler: Option<Prescaler>,
    waveform: Option<Waveform>,
    adc: Option<AdcPrescaler>,
}

impl SysTickTimer {
    pub fn new(syst: SYST, scale: CycleScale) -> Self {
        Self {
            syst,
            scale,
            prescaler: None,
            waveform: None,
            adc: None,
        }
    }

    pub fn prescaler(&self) -> Option<Prescaler> {
        self.prescaler
    }

    pub fn waveform(&self) -> Option<Waveform> {
        self.waveform
    }

    pub fn adc_prescaler(&self) -> Option<AdcPrescaler> {
        self.adc
    }

    /// Hand SysTick back
    pub fn free(self) -> SYST {
        self.syst
    }
}

impl InitHardware for SysTickTimer {
    fn set_prescaler(&mut self, prescaler: Prescaler) {
        self.prescaler = Some(prescaler);
    }

    fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = Some(waveform);
    }

    fn arm_watchdog_interrupt(&mut self) {
        WATCHDOG_ARMED.store(true, Ordering::Relaxed);
    }

    fn arm_overflow_interrupt(&mut self) {
        // SysTick counts 24 bits
        let reload = self
            .scale
            .scale(TIMER_OVERFLOW_CYCLES)
            .saturating_sub(1)
            .min(0x00FF_FFFF);

        self.syst.set_clock_source(SystClkSource::Core);
        self.syst.set_reload(reload);
        self.syst.clear_current();
        self.syst.enable_interrupt();
        self.syst.enable_counter();

        #[cfg(feature = "defmt")]
        defmt::debug!("timer: SysTick reload {}", reload);
    }

    fn enable_adc(&mut self, prescaler: AdcPrescaler) {
        self.adc = Some(prescaler);

        #[cfg(feature = "defmt")]
        defmt::debug!("timer: ADC runs from clk_adc, /{} ignored", prescaler.divisor());
    }
}
