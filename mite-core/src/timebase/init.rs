//! Boot-time peripheral setup

use mite_hal::{InitHardware, InterruptControl};

use crate::config::CoreSettings;

/// Configure PWM, the watchdog tick, the overflow counter and the ADC
///
/// Each step runs only when its setting asks for it. Interrupts end up
/// enabled whenever `millis` or `micros` is on and are left as they were
/// otherwise.
pub fn init<H, I>(settings: &CoreSettings, hw: &mut H, irq: &mut I)
where
    H: InitHardware,
    I: InterruptControl,
{
    if let Some(pwm) = settings.pwm {
        if let Some(prescaler) = pwm.prescaler {
            hw.set_prescaler(prescaler);
        }
        if let Some(waveform) = pwm.waveform {
            hw.set_waveform(waveform);
        }
    }

    if settings.millis {
        // The watchdog change sequence must not be interrupted
        irq.disable();
        hw.arm_watchdog_interrupt();
        irq.enable();
    }

    if settings.micros {
        hw.arm_overflow_interrupt();
        irq.enable();
    }

    if settings.adc {
        hw.enable_adc(settings.cpu.adc_prescaler());
    }
}
