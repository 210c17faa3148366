//! Boot-time timer, watchdog and ADC configuration
//!
//! The enums carry the register encodings of the target 8-bit part
//! (timer 0 with a watchdog-timer interrupt and a 10-bit ADC). Ports to
//! other chips translate them into whatever their peripherals need.

/// Watchdog interrupt period in milliseconds
///
/// The watchdog runs from its own oscillator, so this holds for every CPU
/// frequency.
pub const WATCHDOG_PERIOD_MS: u32 = 16;

/// CPU cycles between two timer 0 overflow interrupts (undivided clock)
pub const TIMER_OVERFLOW_CYCLES: u32 = 256;

/// AVR register bit positions
pub mod bits {
    /// TCCR0B clock select bits
    pub const CS00: u8 = 0;
    pub const CS01: u8 = 1;
    pub const CS02: u8 = 2;
    /// TCCR0A waveform generation bits
    pub const WGM00: u8 = 0;
    pub const WGM01: u8 = 1;
    /// TIMSK0 overflow interrupt enable
    pub const TOIE0: u8 = 1;
    /// WDTCR watchdog interrupt enable
    pub const WDTIE: u8 = 6;
    /// ADCSRA enable and prescaler select
    pub const ADEN: u8 = 7;
    pub const ADPS2: u8 = 2;
    pub const ADPS1: u8 = 1;
    pub const ADPS0: u8 = 0;

    /// Bit value, `_BV(bit)`
    pub const fn bv(bit: u8) -> u8 {
        1 << bit
    }
}

use bits::bv;

/// Timer 0 clock prescaler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prescaler {
    /// PWM frequency = F_CPU / 256
    None,
    /// PWM frequency = F_CPU / 256 / 8
    Div8,
    /// PWM frequency = F_CPU / 256 / 64
    Div64,
    /// PWM frequency = F_CPU / 256 / 256
    Div256,
    /// PWM frequency = F_CPU / 256 / 1024
    Div1024,
}

impl Prescaler {
    /// Clock divisor applied to the timer
    pub const fn divisor(self) -> u32 {
        match self {
            Self::None => 1,
            Self::Div8 => 8,
            Self::Div64 => 64,
            Self::Div256 => 256,
            Self::Div1024 => 1024,
        }
    }

    /// Look up a prescaler by its divisor
    pub const fn from_divisor(divisor: u32) -> Option<Self> {
        match divisor {
            1 => Some(Self::None),
            8 => Some(Self::Div8),
            64 => Some(Self::Div64),
            256 => Some(Self::Div256),
            1024 => Some(Self::Div1024),
            _ => None,
        }
    }

    /// TCCR0B clock select bits
    pub const fn cs_bits(self) -> u8 {
        match self {
            Self::None => bv(bits::CS00),
            Self::Div8 => bv(bits::CS01),
            Self::Div64 => bv(bits::CS00) | bv(bits::CS01),
            Self::Div256 => bv(bits::CS02),
            Self::Div1024 => bv(bits::CS00) | bv(bits::CS02),
        }
    }
}

/// Timer 0 waveform generation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Waveform {
    /// Plain counter, no PWM
    Normal,
    /// Phase-correct PWM
    PhaseCorrect,
    /// Clear timer on compare match
    Ctc,
    /// Fast PWM
    Fast,
}

impl Waveform {
    /// TCCR0A waveform generation bits
    pub const fn wgm_bits(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::PhaseCorrect => bv(bits::WGM00),
            Self::Ctc => bv(bits::WGM01),
            Self::Fast => bv(bits::WGM00) | bv(bits::WGM01),
        }
    }
}

/// ADC clock prescaler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcPrescaler {
    Div2,
    Div4,
    Div16,
    Div128,
}

impl AdcPrescaler {
    /// Clock divisor applied to the ADC
    pub const fn divisor(self) -> u32 {
        match self {
            Self::Div2 => 2,
            Self::Div4 => 4,
            Self::Div16 => 16,
            Self::Div128 => 128,
        }
    }

    /// ADCSRA prescaler select bits
    pub const fn adps_bits(self) -> u8 {
        match self {
            // Reset value of the select bits already divides by two
            Self::Div2 => 0,
            Self::Div4 => bv(bits::ADPS1),
            Self::Div16 => bv(bits::ADPS2),
            Self::Div128 => bv(bits::ADPS2) | bv(bits::ADPS1) | bv(bits::ADPS0),
        }
    }
}

/// Peripherals configured once by the runtime's `init`
pub trait InitHardware {
    /// Select the timer 0 clock prescaler
    fn set_prescaler(&mut self, prescaler: Prescaler);

    /// Select the timer 0 waveform generation mode
    fn set_waveform(&mut self, waveform: Waveform);

    /// Reset the watchdog and arm its periodic interrupt
    ///
    /// The interrupt fires every [`WATCHDOG_PERIOD_MS`].
    fn arm_watchdog_interrupt(&mut self);

    /// Clear timer 0 and arm its overflow interrupt
    fn arm_overflow_interrupt(&mut self);

    /// Select ADC channel 0 and enable the converter
    fn enable_adc(&mut self, prescaler: AdcPrescaler);
}

impl<T: InitHardware + ?Sized> InitHardware for &mut T {
    fn set_prescaler(&mut self, prescaler: Prescaler) {
        (**self).set_prescaler(prescaler)
    }

    fn set_waveform(&mut self, waveform: Waveform) {
        (**self).set_waveform(waveform)
    }

    fn arm_watchdog_interrupt(&mut self) {
        (**self).arm_watchdog_interrupt()
    }

    fn arm_overflow_interrupt(&mut self) {
        (**self).arm_overflow_interrupt()
    }

    fn enable_adc(&mut self, prescaler: AdcPrescaler) {
        (**self).enable_adc(prescaler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prescaler_bits() {
        assert_eq!(Prescaler::None.cs_bits(), 0b001);
        assert_eq!(Prescaler::Div8.cs_bits(), 0b010);
        assert_eq!(Prescaler::Div64.cs_bits(), 0b011);
        assert_eq!(Prescaler::Div256.cs_bits(), 0b100);
        assert_eq!(Prescaler::Div1024.cs_bits(), 0b101);
    }

    #[test]
    fn test_prescaler_divisor_roundtrip() {
        for divisor in [1, 8, 64, 256, 1024] {
            let prescaler = Prescaler::from_divisor(divisor).unwrap();
            assert_eq!(prescaler.divisor(), divisor);
        }
        assert_eq!(Prescaler::from_divisor(32), None);
    }

    #[test]
    fn test_adc_prescaler_bits() {
        assert_eq!(AdcPrescaler::Div2.adps_bits(), 0);
        assert_eq!(AdcPrescaler::Div4.adps_bits(), 0b010);
        assert_eq!(AdcPrescaler::Div16.adps_bits(), 0b100);
        assert_eq!(AdcPrescaler::Div128.adps_bits(), 0b111);
    }
}
