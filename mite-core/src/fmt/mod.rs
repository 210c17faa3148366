//! Number printing through a byte sink
//!
//! Integers and floats are rendered one character at a time into a
//! [`ByteSink`], with no intermediate string and no heap. Two interchangeable
//! strategies render unsigned magnitudes:
//!
//! - [`TableFormatter`]: repeated subtraction of place values from a
//!   `const` table. No division at all, bases 2/8/10/16 only.
//! - [`DivisionFormatter`]: the classic divide-and-modulo loop into a
//!   stack buffer. Any base, but pulls in the division routine.
//!
//! Both implement [`MagnitudeFormatter`]; [`NumberPrinter`] layers sign
//! handling and float rendering on top of whichever one is configured.

pub mod division;
pub mod float;
pub mod table;

pub use division::DivisionFormatter;
pub use table::TableFormatter;

use crate::config::{FormatSettings, FormatterMode, IntWidth};

/// Binary
pub const BIN: u8 = 2;
/// Octal
pub const OCT: u8 = 8;
/// Decimal
pub const DEC: u8 = 10;
/// Hexadecimal
pub const HEX: u8 = 16;

/// Digit alphabet shared by both strategies
pub(crate) const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Destination for formatted characters
pub trait ByteSink {
    /// Accept one byte
    fn put(&mut self, byte: u8);
}

impl<T: ByteSink + ?Sized> ByteSink for &mut T {
    fn put(&mut self, byte: u8) {
        (**self).put(byte)
    }
}

/// Bytes past capacity are dropped
impl<const N: usize> ByteSink for heapless::Vec<u8, N> {
    fn put(&mut self, byte: u8) {
        let _ = self.push(byte);
    }
}

/// Adapter turning a closure into a [`ByteSink`]
pub struct FnSink<F>(pub F);

impl<F: FnMut(u8)> ByteSink for FnSink<F> {
    fn put(&mut self, byte: u8) {
        (self.0)(byte)
    }
}

/// Renders unsigned magnitudes
pub trait MagnitudeFormatter {
    /// Integer width magnitudes are truncated to
    fn width(&self) -> IntWidth;

    /// Write `n` in `base` to `sink`
    ///
    /// Returns the number of digits written. Any base indicator emitted for
    /// an unsupported base is not counted.
    fn format_magnitude<S: ByteSink + ?Sized>(&self, sink: &mut S, n: u32, base: u8) -> usize;
}

/// Formatter selected by the build configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Formatter {
    Table(TableFormatter),
    Division(DivisionFormatter),
}

impl Formatter {
    /// Build the formatter described by `settings`
    pub const fn from_settings(settings: FormatSettings) -> Self {
        match settings.mode {
            FormatterMode::Table(bases) => Self::Table(TableFormatter::new(bases, settings.width)),
            FormatterMode::Division => Self::Division(DivisionFormatter::new(settings.width)),
        }
    }
}

impl From<FormatSettings> for Formatter {
    fn from(settings: FormatSettings) -> Self {
        Self::from_settings(settings)
    }
}

impl MagnitudeFormatter for Formatter {
    fn width(&self) -> IntWidth {
        match self {
            Self::Table(f) => f.width(),
            Self::Division(f) => f.width(),
        }
    }

    fn format_magnitude<S: ByteSink + ?Sized>(&self, sink: &mut S, n: u32, base: u8) -> usize {
        match self {
            Self::Table(f) => f.format_magnitude(sink, n, base),
            Self::Division(f) => f.format_magnitude(sink, n, base),
        }
    }
}

/// Signed, unsigned and float printing on top of a [`MagnitudeFormatter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NumberPrinter<F = Formatter> {
    formatter: F,
}

impl NumberPrinter<Formatter> {
    /// Printer for the configured strategy
    pub const fn from_settings(settings: FormatSettings) -> Self {
        Self::new(Formatter::from_settings(settings))
    }
}

impl Default for NumberPrinter<Formatter> {
    fn default() -> Self {
        Self::from_settings(FormatSettings::DEFAULT)
    }
}

impl<F: MagnitudeFormatter> NumberPrinter<F> {
    pub const fn new(formatter: F) -> Self {
        Self { formatter }
    }

    /// The underlying magnitude formatter
    pub fn formatter(&self) -> &F {
        &self.formatter
    }

    /// Print an unsigned value
    ///
    /// Returns the digit count.
    pub fn print_unsigned<S: ByteSink + ?Sized>(&self, sink: &mut S, n: u32, base: u8) -> usize {
        self.formatter.format_magnitude(sink, n, base)
    }

    /// Print a signed value
    ///
    /// Only decimal gets a minus sign. In any other base a negative value is
    /// printed as its two's complement bit pattern at the configured width.
    pub fn print_signed<S: ByteSink + ?Sized>(&self, sink: &mut S, n: i32, base: u8) -> usize {
        let n = self.formatter.width().truncate_signed(n);
        if base == DEC && n < 0 {
            sink.put(b'-');
            self.formatter
                .format_magnitude(sink, n.wrapping_neg() as u32, base)
                + 1
        } else {
            self.formatter.format_magnitude(sink, n as u32, base)
        }
    }

    /// Print a float with `digits` fractional digits, rounded half-up
    ///
    /// See [`float::print_float`].
    pub fn print_float<S: ByteSink + ?Sized>(&self, sink: &mut S, number: f32, digits: u8) -> usize {
        float::print_float(self, sink, number, digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaseSet;
    use heapless::Vec;

    fn table_printer(width: IntWidth) -> NumberPrinter {
        NumberPrinter::from_settings(FormatSettings::new(width, FormatterMode::Table(BaseSet::ALL)))
    }

    #[test]
    fn test_print_signed_negative_decimal() {
        let printer = NumberPrinter::default();
        let mut out: Vec<u8, 16> = Vec::new();
        let n = printer.print_signed(&mut out, -1234, DEC);
        assert_eq!(out.as_slice(), b"-1234");
        assert_eq!(n, 5);
    }

    #[test]
    fn test_print_signed_negative_hex_is_bit_pattern() {
        let printer = NumberPrinter::default();
        let mut out: Vec<u8, 16> = Vec::new();
        let n = printer.print_signed(&mut out, -1, HEX);
        assert_eq!(out.as_slice(), b"FFFFFFFF");
        assert_eq!(n, 8);
    }

    #[test]
    fn test_print_signed_narrow_width() {
        let printer = table_printer(IntWidth::Byte);
        let mut out: Vec<u8, 16> = Vec::new();
        printer.print_signed(&mut out, -1, HEX);
        assert_eq!(out.as_slice(), b"FF");

        out.clear();
        printer.print_signed(&mut out, -128, DEC);
        assert_eq!(out.as_slice(), b"-128");

        out.clear();
        // 200 does not fit an i8 and wraps negative
        printer.print_signed(&mut out, 200, DEC);
        assert_eq!(out.as_slice(), b"-56");
    }

    #[test]
    fn test_print_signed_min_long() {
        let printer = NumberPrinter::default();
        let mut out: Vec<u8, 16> = Vec::new();
        printer.print_signed(&mut out, i32::MIN, DEC);
        assert_eq!(out.as_slice(), b"-2147483648");
    }

    #[test]
    fn test_print_unsigned_truncates_to_width() {
        let printer = table_printer(IntWidth::Byte);
        let mut out: Vec<u8, 16> = Vec::new();
        let n = printer.print_unsigned(&mut out, 300, DEC);
        assert_eq!(out.as_slice(), b"44");
        assert_eq!(n, 2);
    }

    #[test]
    fn test_fn_sink() {
        let printer = NumberPrinter::default();
        let mut count = 0;
        let mut sink = FnSink(|_: u8| count += 1);
        printer.print_unsigned(&mut sink, 65535, HEX);
        assert_eq!(count, 4);
    }

    #[test]
    fn test_vec_sink_keeps_raw_bytes() {
        // Digit 100 in base 101 lies past the ASCII range
        let printer = NumberPrinter::from_settings(FormatSettings::new(
            IntWidth::Long,
            FormatterMode::Division,
        ));
        let mut out: Vec<u8, 16> = Vec::new();
        let count = printer.print_unsigned(&mut out, 100, 101);
        assert_eq!(count, 1);
        assert_eq!(out.as_slice(), &[b'A' + 90]);
    }

    #[test]
    fn test_formatter_from_settings() {
        let formatter = Formatter::from(FormatSettings::new(IntWidth::Int, FormatterMode::Division));
        assert_eq!(formatter, Formatter::Division(DivisionFormatter::new(IntWidth::Int)));
        assert_eq!(formatter.width(), IntWidth::Int);
    }
}
