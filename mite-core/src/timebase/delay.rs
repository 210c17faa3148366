//! Microsecond delay planning
//!
//! Turns a microsecond count into the spin-loop counts that burn that long
//! at a given clock. Short delays use the single 4-cycle loop after a linear
//! transform that eats the call overhead; longer ones switch to the nested
//! loop, which must run with interrupts masked.

use crate::config::CpuFrequency;

/// How to spend a requested delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DelayPlan {
    /// Call overhead already covers it
    Skip,
    /// `count` passes of the 4-cycle loop
    Spin { count: u16 },
    /// `outer` passes over `count` inner passes, interrupts masked
    Nested { count: u16, outer: u8 },
}

impl DelayPlan {
    const fn spin(count: u16) -> Self {
        if count == 0 {
            Self::Skip
        } else {
            Self::Spin { count }
        }
    }

    const fn nested(us: u16, outer: u8) -> Self {
        Self::Nested {
            count: us >> 2,
            outer,
        }
    }
}

/// `us + us / 8`, for clocks an eighth or so above the loop's nominal rate
const fn stretch(us: u16) -> u16 {
    us.saturating_add(us >> 3)
}

/// Plan a delay of `us` microseconds at `cpu`
pub const fn plan_microseconds(cpu: CpuFrequency, us: u16) -> DelayPlan {
    if us == 0 {
        return DelayPlan::Skip;
    }

    match cpu {
        CpuFrequency::Mhz16 | CpuFrequency::Mhz12 => {
            if us > 99 {
                let outer = if matches!(cpu, CpuFrequency::Mhz16) { 16 } else { 12 };
                DelayPlan::nested(us, outer)
            } else {
                DelayPlan::spin((us - 1) << 2)
            }
        }
        CpuFrequency::Mhz8 => {
            if us > 199 {
                DelayPlan::nested(us, 8)
            } else {
                DelayPlan::spin(us.saturating_sub(3) << 1)
            }
        }
        CpuFrequency::Mhz9_6 | CpuFrequency::Mhz10 => {
            if us > 199 {
                DelayPlan::nested(stretch(us), 8)
            } else {
                DelayPlan::spin(us.saturating_sub(3) << 1)
            }
        }
        CpuFrequency::Mhz4 => {
            if us > 299 {
                DelayPlan::nested(us, 4)
            } else {
                DelayPlan::spin(us.saturating_sub(6))
            }
        }
        CpuFrequency::Mhz4_8 => {
            if us > 299 {
                DelayPlan::nested(stretch(us), 4)
            } else {
                DelayPlan::spin(us.saturating_sub(6))
            }
        }
        CpuFrequency::Mhz1 | CpuFrequency::Mhz1_2 => DelayPlan::spin(us.saturating_sub(16) >> 2),
        CpuFrequency::Khz600 => DelayPlan::spin(us.saturating_sub(32) >> 3),
        CpuFrequency::Khz128 => DelayPlan::spin(us.saturating_sub(125) >> 5),
        // A single loop pass is longer than most requests
        CpuFrequency::Khz16 => DelayPlan::Skip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_skipped_everywhere() {
        for cpu in CpuFrequency::ALL {
            assert_eq!(plan_microseconds(cpu, 0), DelayPlan::Skip);
        }
    }

    #[test]
    fn test_16mhz_short_and_long() {
        assert_eq!(plan_microseconds(CpuFrequency::Mhz16, 1), DelayPlan::Skip);
        assert_eq!(plan_microseconds(CpuFrequency::Mhz16, 10), DelayPlan::Spin { count: 36 });
        assert_eq!(plan_microseconds(CpuFrequency::Mhz16, 99), DelayPlan::Spin { count: 392 });
        assert_eq!(
            plan_microseconds(CpuFrequency::Mhz16, 100),
            DelayPlan::Nested { count: 25, outer: 16 }
        );
    }

    #[test]
    fn test_12mhz_outer_count() {
        assert_eq!(
            plan_microseconds(CpuFrequency::Mhz12, 1000),
            DelayPlan::Nested { count: 250, outer: 12 }
        );
    }

    #[test]
    fn test_8mhz_family() {
        assert_eq!(plan_microseconds(CpuFrequency::Mhz8, 2), DelayPlan::Skip);
        assert_eq!(plan_microseconds(CpuFrequency::Mhz8, 10), DelayPlan::Spin { count: 14 });
        assert_eq!(plan_microseconds(CpuFrequency::Mhz8, 199), DelayPlan::Spin { count: 392 });
        assert_eq!(
            plan_microseconds(CpuFrequency::Mhz8, 200),
            DelayPlan::Nested { count: 50, outer: 8 }
        );
        // 800 + 100 = 900, / 4
        assert_eq!(
            plan_microseconds(CpuFrequency::Mhz10, 800),
            DelayPlan::Nested { count: 225, outer: 8 }
        );
        assert_eq!(plan_microseconds(CpuFrequency::Mhz9_6, 10), DelayPlan::Spin { count: 14 });
    }

    #[test]
    fn test_4mhz_family() {
        assert_eq!(plan_microseconds(CpuFrequency::Mhz4, 5), DelayPlan::Skip);
        assert_eq!(plan_microseconds(CpuFrequency::Mhz4, 100), DelayPlan::Spin { count: 94 });
        assert_eq!(
            plan_microseconds(CpuFrequency::Mhz4, 400),
            DelayPlan::Nested { count: 100, outer: 4 }
        );
        assert_eq!(
            plan_microseconds(CpuFrequency::Mhz4_8, 400),
            DelayPlan::Nested { count: 112, outer: 4 }
        );
    }

    #[test]
    fn test_slow_clocks_have_no_long_path() {
        assert_eq!(plan_microseconds(CpuFrequency::Mhz1, 1000), DelayPlan::Spin { count: 246 });
        assert_eq!(plan_microseconds(CpuFrequency::Mhz1_2, 16), DelayPlan::Skip);
        assert_eq!(plan_microseconds(CpuFrequency::Khz600, 1000), DelayPlan::Spin { count: 121 });
        assert_eq!(plan_microseconds(CpuFrequency::Khz128, 1000), DelayPlan::Spin { count: 27 });
        assert_eq!(plan_microseconds(CpuFrequency::Khz128, 100), DelayPlan::Skip);
        assert_eq!(plan_microseconds(CpuFrequency::Khz16, u16::MAX), DelayPlan::Skip);
    }

    #[test]
    fn test_long_request_does_not_overflow() {
        assert_eq!(
            plan_microseconds(CpuFrequency::Mhz10, u16::MAX),
            DelayPlan::Nested { count: 0x3FFF, outer: 8 }
        );
    }
}
