//! Divide-and-modulo formatter for arbitrary bases

use super::{ByteSink, MagnitudeFormatter, DEC};
use crate::config::IntWidth;

/// Widest magnitude in base 2 plus room for a terminator
const BUFFER_LEN: usize = 32 + 1;

/// Formatter accepting any base from 2 up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DivisionFormatter {
    width: IntWidth,
}

impl DivisionFormatter {
    pub const fn new(width: IntWidth) -> Self {
        Self { width }
    }

    pub const fn width(&self) -> IntWidth {
        self.width
    }
}

impl MagnitudeFormatter for DivisionFormatter {
    fn width(&self) -> IntWidth {
        self.width
    }

    fn format_magnitude<S: ByteSink + ?Sized>(&self, sink: &mut S, n: u32, base: u8) -> usize {
        let base = if base < 2 { DEC } else { base };
        let radix = u32::from(base);

        let mut buf = [0u8; BUFFER_LEN];
        let mut start = BUFFER_LEN - 1;
        let mut n = self.width.truncate(n);
        loop {
            let c = (n % radix) as u8;
            n /= radix;
            start -= 1;
            buf[start] = if c < 10 {
                b'0' + c
            } else {
                b'A'.wrapping_add(c - 10)
            };
            if n == 0 {
                break;
            }
        }

        let digits = &buf[start..BUFFER_LEN - 1];
        for &b in digits {
            sink.put(b);
        }
        digits.len()
    }
}
