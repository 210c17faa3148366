//! Soft serial bit timing
//!
//! The 8-bit line driver times bits with a 3-cycle delay loop. These
//! are the loop counts it needs for a given clock and baud rate, plus the
//! raw cycle figures ports with a different delay primitive work from.

use super::{ConfigError, CpuFrequency};

/// Division rounded to nearest, computed the way the target's build does
const fn divide_rounded(numerator: u64, divisor: u64) -> u64 {
    ((2 * numerator) / divisor + 1) / 2
}

/// Cycles per pass of the bit delay loop
pub const DELAY_LOOP_CYCLES: u32 = 3;

/// Fixed cycles spent around the delay loop while sending one bit
pub const TX_BIT_OVERHEAD: u32 = 7;

/// Fixed cycles spent around the delay loop while sampling one bit
pub const RX_BIT_OVERHEAD: u32 = 13;

/// Bit timing for one clock / baud rate pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineTiming {
    baud: u32,
    bit_cycles: u32,
    rx_start_cycles: u32,
    tx_delay: u8,
    rx_start: u8,
    rx_delay: u8,
}

impl LineTiming {
    /// Compute the timing for `baud` on a `cpu` clock
    ///
    /// Fails when a loop count does not fit the 8-bit counter (baud too low)
    /// or a bit is shorter than the loop overhead (baud too high).
    pub const fn new(cpu: CpuFrequency, baud: u32) -> Result<Self, ConfigError> {
        let cpu_hz = cpu.hz();
        if baud == 0 {
            return Err(ConfigError::BaudTooLow { cpu_hz, baud });
        }

        let bit_cycles = divide_rounded(cpu_hz as u64, baud as u64);
        // The first sample lands in the middle of bit 0, one and a half bits in
        let rx_start_cycles = divide_rounded(3 * cpu_hz as u64, 2 * baud as u64);

        if bit_cycles < RX_BIT_OVERHEAD as u64 || rx_start_cycles < RX_BIT_OVERHEAD as u64 {
            return Err(ConfigError::BaudTooHigh { cpu_hz, baud });
        }

        let tx_delay = divide_rounded(bit_cycles - TX_BIT_OVERHEAD as u64, DELAY_LOOP_CYCLES as u64);
        let rx_start = divide_rounded(rx_start_cycles - RX_BIT_OVERHEAD as u64, DELAY_LOOP_CYCLES as u64);
        let rx_delay = divide_rounded(bit_cycles - RX_BIT_OVERHEAD as u64, DELAY_LOOP_CYCLES as u64);

        if tx_delay > 255 || rx_start > 255 || rx_delay > 255 {
            return Err(ConfigError::BaudTooLow { cpu_hz, baud });
        }

        Ok(Self {
            baud,
            bit_cycles: bit_cycles as u32,
            rx_start_cycles: rx_start_cycles as u32,
            tx_delay: tx_delay as u8,
            rx_start: rx_start as u8,
            rx_delay: rx_delay as u8,
        })
    }

    /// Baud rate this timing was computed for
    pub const fn baud(&self) -> u32 {
        self.baud
    }

    /// CPU cycles per bit
    pub const fn bit_cycles(&self) -> u32 {
        self.bit_cycles
    }

    /// CPU cycles from the start bit edge to the middle of bit 0
    pub const fn rx_start_cycles(&self) -> u32 {
        self.rx_start_cycles
    }

    /// Delay loop passes per transmitted bit
    pub const fn tx_delay(&self) -> u8 {
        self.tx_delay
    }

    /// Delay loop passes from the start edge to the first sample
    pub const fn rx_start(&self) -> u8 {
        self.rx_start
    }

    /// Delay loop passes between two samples
    pub const fn rx_delay(&self) -> u8 {
        self.rx_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_8mhz_115200() {
        let timing = LineTiming::new(CpuFrequency::Mhz8, 115_200).unwrap();
        assert_eq!(timing.bit_cycles(), 69);
        assert_eq!(timing.rx_start_cycles(), 104);
        assert_eq!(timing.tx_delay(), 21);
        assert_eq!(timing.rx_start(), 30);
        assert_eq!(timing.rx_delay(), 19);
    }

    #[test]
    fn test_timing_default_baud_everywhere_but_the_slowest() {
        for cpu in CpuFrequency::ALL {
            if cpu == CpuFrequency::Khz16 {
                continue;
            }
            let result = LineTiming::new(cpu, cpu.default_baud());
            assert!(result.is_ok(), "{:?}: {:?}", cpu, result);
        }
    }

    #[test]
    fn test_baud_too_low() {
        // 16 MHz needs 38400 baud or more
        assert_eq!(
            LineTiming::new(CpuFrequency::Mhz16, 9_600),
            Err(ConfigError::BaudTooLow {
                cpu_hz: 16_000_000,
                baud: 9_600
            })
        );
        assert!(LineTiming::new(CpuFrequency::Mhz16, 38_400).is_ok());
    }

    #[test]
    fn test_baud_too_high() {
        assert_eq!(
            LineTiming::new(CpuFrequency::Mhz1, 230_400),
            Err(ConfigError::BaudTooHigh {
                cpu_hz: 1_000_000,
                baud: 230_400
            })
        );
    }
}
