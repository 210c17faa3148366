//! Build-time settings
//!
//! One [`CoreSettings`] value holds every build switch of the runtime. All
//! constructors are `const fn` so a firmware can pin its configuration in a
//! `const` item.

use mite_hal::{Prescaler, Waveform};

use super::{ConfigError, CpuFrequency, LineTiming};

/// Widest integer type the number printer handles
///
/// Values are truncated to this width before printing, the way a C cast to
/// the narrower type would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IntWidth {
    /// 8-bit
    Byte,
    /// 16-bit
    Int,
    /// 32-bit
    #[default]
    Long,
}

impl IntWidth {
    /// Width in bits
    pub const fn bits(self) -> u32 {
        match self {
            Self::Byte => 8,
            Self::Int => 16,
            Self::Long => 32,
        }
    }

    /// Keep only the low `bits()` of an unsigned value
    pub const fn truncate(self, n: u32) -> u32 {
        match self {
            Self::Byte => n as u8 as u32,
            Self::Int => n as u16 as u32,
            Self::Long => n,
        }
    }

    /// Narrow a signed value to this width, preserving the sign bit
    pub const fn truncate_signed(self, n: i32) -> i32 {
        match self {
            Self::Byte => n as i8 as i32,
            Self::Int => n as i16 as i32,
            Self::Long => n,
        }
    }
}

/// Set of number bases the table-driven printer supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BaseSet {
    bits: u8,
}

impl BaseSet {
    pub const BIN: Self = Self { bits: 1 << 0 };
    pub const OCT: Self = Self { bits: 1 << 1 };
    pub const DEC: Self = Self { bits: 1 << 2 };
    pub const HEX: Self = Self { bits: 1 << 3 };
    /// All four bases; also what an empty set means
    pub const ALL: Self = Self { bits: 0b1111 };

    /// Create an empty set
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Add the bases of `other`
    pub const fn with(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Check if no base is selected
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// The set actually compiled in: empty means all four
    pub const fn effective(self) -> Self {
        if self.is_empty() {
            Self::ALL
        } else {
            self
        }
    }

    /// Check whether `radix` is one of the selected bases
    pub const fn contains(self, radix: u8) -> bool {
        let flag = match radix {
            2 => Self::BIN.bits,
            8 => Self::OCT.bits,
            10 => Self::DEC.bits,
            16 => Self::HEX.bits,
            _ => 0,
        };
        self.bits & flag != 0
    }

    /// Base used for unsupported requests, with its indicator character
    ///
    /// Preference order is hex, decimal, octal, binary.
    pub const fn fallback(self) -> (u8, u8) {
        let set = self.effective();
        if set.contains(16) {
            (16, b'x')
        } else if set.contains(10) {
            (10, b'd')
        } else if set.contains(8) {
            (8, b'o')
        } else {
            (2, b'b')
        }
    }
}

impl Default for BaseSet {
    fn default() -> Self {
        Self::ALL
    }
}

/// Number printing strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FormatterMode {
    /// Division-free place-value tables for the selected bases only
    Table(BaseSet),
    /// Repeated division, any base from 2 up; heavy on flash and stack
    Division,
}

impl Default for FormatterMode {
    fn default() -> Self {
        Self::Table(BaseSet::ALL)
    }
}

/// Number printing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FormatSettings {
    pub width: IntWidth,
    pub mode: FormatterMode,
}

impl FormatSettings {
    /// Long integers, all four table bases
    pub const DEFAULT: Self = Self::new(IntWidth::Long, FormatterMode::Table(BaseSet::ALL));

    pub const fn new(width: IntWidth, mode: FormatterMode) -> Self {
        Self { width, mode }
    }
}

/// Timer 0 PWM setup
///
/// Either half may be left alone, keeping the register's reset value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmSettings {
    pub prescaler: Option<Prescaler>,
    pub waveform: Option<Waveform>,
}

impl PwmSettings {
    pub const fn new(prescaler: Option<Prescaler>, waveform: Option<Waveform>) -> Self {
        Self {
            prescaler,
            waveform,
        }
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoreSettings {
    /// CPU clock
    pub cpu: CpuFrequency,
    /// Number printing
    pub format: FormatSettings,
    /// `read()` polls the line; when false it always reports no data
    pub read_enabled: bool,
    /// Arm the watchdog tick behind `millis()`
    pub millis: bool,
    /// Arm the timer overflow behind `micros()`
    pub micros: bool,
    /// Timer 0 PWM setup, `None` to leave the timer untouched
    pub pwm: Option<PwmSettings>,
    /// Enable the ADC with a frequency-appropriate prescaler
    pub adc: bool,
    /// Soft serial baud rate, `None` for the frequency default
    pub baud: Option<u32>,
}

impl CoreSettings {
    /// Defaults for `cpu`: reads and millis on, micros off, fast PWM at /8, ADC on
    pub const fn new(cpu: CpuFrequency) -> Self {
        Self {
            cpu,
            format: FormatSettings::DEFAULT,
            read_enabled: true,
            millis: true,
            // The overflow interrupt fires every 256 cycles and skews busy-wait delays
            micros: false,
            pwm: Some(PwmSettings::new(Some(Prescaler::Div8), Some(Waveform::Fast))),
            adc: true,
            baud: None,
        }
    }

    pub const fn with_format(mut self, format: FormatSettings) -> Self {
        self.format = format;
        self
    }

    pub const fn with_read(mut self, enabled: bool) -> Self {
        self.read_enabled = enabled;
        self
    }

    pub const fn with_millis(mut self, enabled: bool) -> Self {
        self.millis = enabled;
        self
    }

    pub const fn with_micros(mut self, enabled: bool) -> Self {
        self.micros = enabled;
        self
    }

    pub const fn with_pwm(mut self, pwm: Option<PwmSettings>) -> Self {
        self.pwm = pwm;
        self
    }

    pub const fn with_adc(mut self, enabled: bool) -> Self {
        self.adc = enabled;
        self
    }

    pub const fn with_baud(mut self, baud: Option<u32>) -> Self {
        self.baud = baud;
        self
    }

    /// Configured baud rate, or the default for the CPU frequency
    pub const fn baud_rate(&self) -> u32 {
        match self.baud {
            Some(baud) => baud,
            None => self.cpu.default_baud(),
        }
    }

    /// Bit timing for the configured baud rate
    pub const fn line_timing(&self) -> Result<LineTiming, ConfigError> {
        LineTiming::new(self.cpu, self.baud_rate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_width_truncate() {
        assert_eq!(IntWidth::Byte.truncate(300), 44);
        assert_eq!(IntWidth::Int.truncate(0x1_2345), 0x2345);
        assert_eq!(IntWidth::Long.truncate(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_int_width_truncate_signed() {
        assert_eq!(IntWidth::Byte.truncate_signed(-1), -1);
        assert_eq!(IntWidth::Byte.truncate_signed(200), -56);
        assert_eq!(IntWidth::Int.truncate_signed(40_000), -25_536);
        assert_eq!(IntWidth::Long.truncate_signed(i32::MIN), i32::MIN);
    }

    #[test]
    fn test_base_set_contains() {
        let set = BaseSet::DEC.with(BaseSet::HEX);
        assert!(set.contains(10));
        assert!(set.contains(16));
        assert!(!set.contains(2));
        assert!(!set.contains(3));
    }

    #[test]
    fn test_base_set_fallback_order() {
        assert_eq!(BaseSet::ALL.fallback(), (16, b'x'));
        assert_eq!(BaseSet::DEC.with(BaseSet::BIN).fallback(), (10, b'd'));
        assert_eq!(BaseSet::OCT.with(BaseSet::BIN).fallback(), (8, b'o'));
        assert_eq!(BaseSet::BIN.fallback(), (2, b'b'));
    }

    #[test]
    fn test_empty_base_set_means_all() {
        assert_eq!(BaseSet::empty().effective(), BaseSet::ALL);
        assert_eq!(BaseSet::empty().fallback(), (16, b'x'));
    }

    #[test]
    fn test_settings_builder() {
        const SETTINGS: CoreSettings = CoreSettings::new(CpuFrequency::Mhz8)
            .with_micros(true)
            .with_adc(false)
            .with_baud(Some(57_600));

        assert!(SETTINGS.micros);
        assert!(!SETTINGS.adc);
        assert_eq!(SETTINGS.baud_rate(), 57_600);
        assert!(SETTINGS.line_timing().is_ok());
    }

    #[test]
    fn test_settings_default_baud() {
        let settings = CoreSettings::new(CpuFrequency::Mhz1_2);
        assert_eq!(settings.baud_rate(), 19_200);
    }
}
