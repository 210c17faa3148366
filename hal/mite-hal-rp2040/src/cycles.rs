//! Emulated-clock to system-clock cycle conversion

use mite_core::config::CpuFrequency;

/// Converts cycles of the configured CPU clock into system clock cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleScale {
    cpu_hz: u32,
    sys_hz: u32,
}

impl CycleScale {
    pub const fn new(cpu: CpuFrequency, sys_hz: u32) -> Self {
        Self {
            cpu_hz: cpu.hz(),
            sys_hz,
        }
    }

    /// Scale against the running `clk_sys`
    pub fn from_system_clock(cpu: CpuFrequency) -> Self {
        Self::new(cpu, embassy_rp::clocks::clk_sys_freq())
    }

    /// System clock frequency in Hz
    pub const fn sys_hz(&self) -> u32 {
        self.sys_hz
    }

    /// System cycles lasting as long as `cycles` emulated cycles, rounded down
    pub const fn scale(&self, cycles: u32) -> u32 {
        let scaled = cycles as u64 * self.sys_hz as u64 / self.cpu_hz as u64;
        if scaled > u32::MAX as u64 {
            u32::MAX
        } else {
            scaled as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale() {
        let scale = CycleScale::new(CpuFrequency::Mhz16, 125_000_000);
        // One emulated microsecond
        assert_eq!(scale.scale(16), 125);
        assert_eq!(scale.scale(0), 0);
    }

    #[test]
    fn test_scale_saturates() {
        let scale = CycleScale::new(CpuFrequency::Khz16, 125_000_000);
        assert_eq!(scale.scale(u32::MAX), u32::MAX);
    }
}
