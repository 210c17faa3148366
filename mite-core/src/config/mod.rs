//! Build configuration
//!
//! Every build switch of the runtime is a `const`-constructible value here.
//! Firmware resolves one [`CoreSettings`] at build time; an unsupported
//! combination fails the build rather than misbehaving on a device that has
//! no way to report it.

pub mod baud;
pub mod cpu;
pub mod settings;

pub use baud::LineTiming;
pub use cpu::CpuFrequency;
pub use settings::{
    BaseSet, CoreSettings, FormatSettings, FormatterMode, IntWidth, PwmSettings,
};

/// Configuration errors, reported at build time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// CPU frequency outside the calibrated set
    UnsupportedFrequency(u32),
    /// Baud rate too low: a delay count no longer fits the 8-bit loop counter
    BaudTooLow { cpu_hz: u32, baud: u32 },
    /// Baud rate too high: a bit is shorter than the loop overhead
    BaudTooHigh { cpu_hz: u32, baud: u32 },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnsupportedFrequency(hz) => {
                write!(f, "unsupported CPU frequency {} Hz", hz)
            }
            Self::BaudTooLow { cpu_hz, baud } => {
                write!(f, "baud rate {} too low for a {} Hz clock", baud, cpu_hz)
            }
            Self::BaudTooHigh { cpu_hz, baud } => {
                write!(f, "baud rate {} too high for a {} Hz clock", baud, cpu_hz)
            }
        }
    }
}
