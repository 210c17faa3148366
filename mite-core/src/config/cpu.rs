//! Supported CPU frequencies and the constants derived from them

use mite_hal::AdcPrescaler;

use super::ConfigError;

/// CPU clock frequency
///
/// Only these frequencies have calibrated `micros()` and delay constants.
/// Anything else is rejected by [`CpuFrequency::from_hz`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CpuFrequency {
    Khz16,
    /// Internal 128 kHz oscillator (anything between 80 and 150 kHz)
    Khz128,
    Khz600,
    Mhz1,
    Mhz1_2,
    Mhz4,
    Mhz4_8,
    Mhz8,
    Mhz9_6,
    Mhz10,
    Mhz12,
    Mhz16,
}

impl CpuFrequency {
    /// Every supported frequency, slowest first
    pub const ALL: [Self; 12] = [
        Self::Khz16,
        Self::Khz128,
        Self::Khz600,
        Self::Mhz1,
        Self::Mhz1_2,
        Self::Mhz4,
        Self::Mhz4_8,
        Self::Mhz8,
        Self::Mhz9_6,
        Self::Mhz10,
        Self::Mhz12,
        Self::Mhz16,
    ];

    /// Nominal frequency in Hz
    pub const fn hz(self) -> u32 {
        match self {
            Self::Khz16 => 16_000,
            Self::Khz128 => 128_000,
            Self::Khz600 => 600_000,
            Self::Mhz1 => 1_000_000,
            Self::Mhz1_2 => 1_200_000,
            Self::Mhz4 => 4_000_000,
            Self::Mhz4_8 => 4_800_000,
            Self::Mhz8 => 8_000_000,
            Self::Mhz9_6 => 9_600_000,
            Self::Mhz10 => 10_000_000,
            Self::Mhz12 => 12_000_000,
            Self::Mhz16 => 16_000_000,
        }
    }

    /// Resolve a frequency in Hz
    pub const fn from_hz(hz: u32) -> Result<Self, ConfigError> {
        match hz {
            16_000 => Ok(Self::Khz16),
            80_001..=149_999 => Ok(Self::Khz128),
            600_000 => Ok(Self::Khz600),
            1_000_000 => Ok(Self::Mhz1),
            1_200_000 => Ok(Self::Mhz1_2),
            4_000_000 => Ok(Self::Mhz4),
            4_800_000 => Ok(Self::Mhz4_8),
            8_000_000 => Ok(Self::Mhz8),
            9_600_000 => Ok(Self::Mhz9_6),
            10_000_000 => Ok(Self::Mhz10),
            12_000_000 => Ok(Self::Mhz12),
            16_000_000 => Ok(Self::Mhz16),
            _ => Err(ConfigError::UnsupportedFrequency(hz)),
        }
    }

    /// Resolve a frequency in Hz inside a `const` item
    ///
    /// An unsupported frequency aborts const evaluation, turning the
    /// mistake into a compile error.
    ///
    /// ```
    /// use mite_core::config::CpuFrequency;
    /// const CPU: CpuFrequency = CpuFrequency::from_hz_or_panic(9_600_000);
    /// assert_eq!(CPU, CpuFrequency::Mhz9_6);
    /// ```
    pub const fn from_hz_or_panic(hz: u32) -> Self {
        match Self::from_hz(hz) {
            Ok(cpu) => cpu,
            Err(_) => panic!("unsupported CPU frequency"),
        }
    }

    /// Microseconds represented by one timer 0 overflow (256 cycles)
    pub const fn micros_per_overflow(self) -> u32 {
        match self {
            Self::Khz16 => 16_000,
            Self::Khz128 => 2_000,
            Self::Khz600 => 427,
            Self::Mhz1 => 256,
            Self::Mhz1_2 => 213,
            Self::Mhz4 => 64,
            Self::Mhz4_8 => 53,
            Self::Mhz8 => 32,
            Self::Mhz9_6 => 27,
            Self::Mhz10 => 26,
            Self::Mhz12 => 21,
            Self::Mhz16 => 16,
        }
    }

    /// ADC prescaler keeping the converter clock near its rated range
    pub const fn adc_prescaler(self) -> AdcPrescaler {
        let hz = self.hz();
        if hz <= 200_000 {
            AdcPrescaler::Div2
        } else if hz <= 1_200_000 {
            AdcPrescaler::Div4
        } else if hz <= 6_400_000 {
            AdcPrescaler::Div16
        } else {
            AdcPrescaler::Div128
        }
    }

    /// Soft serial baud rate used when none is configured
    pub const fn default_baud(self) -> u32 {
        let hz = self.hz();
        if hz >= 5_000_000 {
            115_200
        } else if hz >= 4_800_000 {
            57_600
        } else if hz >= 1_000_000 {
            19_200
        } else if hz >= 600_000 {
            9_600
        } else {
            // Too slow for serial in practice
            300
        }
    }
}
