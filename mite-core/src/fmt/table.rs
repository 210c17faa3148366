//! Division-free formatter
//!
//! Each digit is found by subtracting the current place value until it no
//! longer fits. Only bases with a compiled-in table are supported; anything
//! else falls back to the preferred enabled base behind an indicator letter.

use super::{ByteSink, MagnitudeFormatter, DIGITS};
use crate::config::{BaseSet, IntWidth};

/// Powers of two, 2^31 down to 1
const BASE2: [u32; 33] = [
    0x8000_0000, 0x4000_0000, 0x2000_0000, 0x1000_0000,
    0x0800_0000, 0x0400_0000, 0x0200_0000, 0x0100_0000,
    0x0080_0000, 0x0040_0000, 0x0020_0000, 0x0010_0000,
    0x0008_0000, 0x0004_0000, 0x0002_0000, 0x0001_0000,
    0x8000, 0x4000, 0x2000, 0x1000,
    0x0800, 0x0400, 0x0200, 0x0100,
    0x80, 0x40, 0x20, 0x10,
    0x08, 0x04, 0x02, 0x01,
    0,
];

/// Powers of eight, 8^10 down to 1
const BASE8: [u32; 12] = [
    1_073_741_824, 134_217_728, 16_777_216, 2_097_152, 262_144, 32_768,
    4_096, 512, 64, 8, 1,
    0,
];

/// Powers of ten, 10^9 down to 1
const BASE10: [u32; 11] = [
    1_000_000_000, 100_000_000, 10_000_000, 1_000_000, 100_000,
    10_000, 1_000, 100, 10, 1,
    0,
];

/// Powers of sixteen, 16^7 down to 1
const BASE16: [u32; 9] = [
    0x1000_0000, 0x0100_0000, 0x0010_0000, 0x0001_0000,
    0x1000, 0x0100, 0x0010, 0x0001,
    0,
];

/// Place values needed for `base` at `width`, zero-terminated
fn place_values(base: u8, width: IntWidth) -> &'static [u32] {
    let (table, int, byte): (&'static [u32], usize, usize) = match base {
        2 => (&BASE2, 16, 24),
        8 => (&BASE8, 5, 8),
        10 => (&BASE10, 5, 7),
        _ => (&BASE16, 4, 6),
    };
    match width {
        IntWidth::Long => table,
        IntWidth::Int => &table[int..],
        IntWidth::Byte => &table[byte..],
    }
}

/// Repeated-subtraction formatter for a fixed set of bases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TableFormatter {
    bases: BaseSet,
    width: IntWidth,
}

impl TableFormatter {
    /// An empty `bases` set enables all four tables
    pub const fn new(bases: BaseSet, width: IntWidth) -> Self {
        Self {
            bases: bases.effective(),
            width,
        }
    }

    pub const fn bases(&self) -> BaseSet {
        self.bases
    }

    pub const fn width(&self) -> IntWidth {
        self.width
    }
}

impl MagnitudeFormatter for TableFormatter {
    fn width(&self) -> IntWidth {
        self.width
    }

    fn format_magnitude<S: ByteSink + ?Sized>(&self, sink: &mut S, n: u32, base: u8) -> usize {
        let base = if self.bases.contains(base) {
            base
        } else {
            let (fallback, indicator) = self.bases.fallback();
            sink.put(indicator);
            fallback
        };

        let mut n = self.width.truncate(n);
        let mut count = 0;
        for &place in place_values(base, self.width) {
            if place == 0 {
                break;
            }
            let mut digit = 0;
            while n >= place {
                n -= place;
                digit += 1;
            }
            // Leading zeros are skipped, the units digit never is
            if digit != 0 || count != 0 || place == 1 {
                sink.put(DIGITS[digit]);
                count += 1;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fmt::{BIN, DEC, HEX, OCT};
    use heapless::{String, Vec};

    fn render(formatter: &TableFormatter, n: u32, base: u8) -> (String<40>, usize) {
        let mut out: Vec<u8, 40> = Vec::new();
        let count = formatter.format_magnitude(&mut out, n, base);
        (String::from_utf8(out).unwrap(), count)
    }

    #[test]
    fn test_zero_prints_one_digit() {
        let formatter = TableFormatter::new(BaseSet::ALL, IntWidth::Long);
        for base in [BIN, OCT, DEC, HEX] {
            let (out, count) = render(&formatter, 0, base);
            assert_eq!(out.as_str(), "0");
            assert_eq!(count, 1);
        }
    }

    #[test]
    fn test_long_extremes() {
        let formatter = TableFormatter::new(BaseSet::ALL, IntWidth::Long);
        assert_eq!(render(&formatter, u32::MAX, DEC).0.as_str(), "4294967295");
        assert_eq!(render(&formatter, u32::MAX, HEX).0.as_str(), "FFFFFFFF");
        assert_eq!(render(&formatter, u32::MAX, OCT).0.as_str(), "37777777777");
        let (out, count) = render(&formatter, u32::MAX, BIN);
        assert_eq!(count, 32);
        assert!(out.bytes().all(|b| b == b'1'));
    }

    #[test]
    fn test_digits_between_zeros() {
        let formatter = TableFormatter::new(BaseSet::ALL, IntWidth::Long);
        assert_eq!(render(&formatter, 1_000_001, DEC).0.as_str(), "1000001");
        assert_eq!(render(&formatter, 0xA0B, HEX).0.as_str(), "A0B");
    }

    #[test]
    fn test_width_slices_table() {
        let formatter = TableFormatter::new(BaseSet::ALL, IntWidth::Int);
        assert_eq!(render(&formatter, 65_535, DEC).0.as_str(), "65535");
        assert_eq!(render(&formatter, 65_535, OCT).0.as_str(), "177777");
        // 70000 wraps to 4464 at 16 bits
        assert_eq!(render(&formatter, 70_000, DEC).0.as_str(), "4464");

        let formatter = TableFormatter::new(BaseSet::ALL, IntWidth::Byte);
        assert_eq!(render(&formatter, 255, BIN).0.as_str(), "11111111");
        assert_eq!(render(&formatter, 255, OCT).0.as_str(), "377");
        assert_eq!(render(&formatter, 0x1FF, HEX).0.as_str(), "FF");
    }

    #[test]
    fn test_unsupported_base_falls_back_with_indicator() {
        let formatter = TableFormatter::new(BaseSet::DEC, IntWidth::Long);
        let (out, count) = render(&formatter, 42, 3);
        assert_eq!(out.as_str(), "d42");
        // The indicator is not counted
        assert_eq!(count, 2);

        let (out, _) = render(&formatter, 42, HEX);
        assert_eq!(out.as_str(), "d42");
    }

    #[test]
    fn test_fallback_prefers_hex() {
        let formatter = TableFormatter::new(BaseSet::ALL, IntWidth::Long);
        assert_eq!(render(&formatter, 42, 3).0.as_str(), "x2A");

        let formatter = TableFormatter::new(BaseSet::BIN, IntWidth::Byte);
        assert_eq!(render(&formatter, 5, DEC).0.as_str(), "b101");
    }

    #[test]
    fn test_empty_set_enables_everything() {
        let formatter = TableFormatter::new(BaseSet::empty(), IntWidth::Long);
        assert_eq!(formatter.bases(), BaseSet::ALL);
        assert_eq!(render(&formatter, 8, OCT).0.as_str(), "10");
    }
}
