//! Fixed-point float rendering
//!
//! Floats are single precision, the size of `double` on the parts this core
//! targets. Digits go through the integer printer, so the configured width
//! and base set apply to them too.

use super::{ByteSink, MagnitudeFormatter, NumberPrinter, DEC};

/// Print `number` with `digits` fractional digits, rounded half-up
///
/// Returns the number of characters written, sign and decimal point
/// included. With `digits == 0` no decimal point is printed but the value is
/// still rounded. NaN renders as zero; magnitudes past the integer width
/// saturate.
pub fn print_float<F, S>(printer: &NumberPrinter<F>, sink: &mut S, number: f32, digits: u8) -> usize
where
    F: MagnitudeFormatter,
    S: ByteSink + ?Sized,
{
    let mut count = 0;
    let mut number = number;

    if number < 0.0 {
        sink.put(b'-');
        count += 1;
        number = -number;
    }

    let mut rounding = 0.5f32;
    for _ in 0..digits {
        rounding /= 10.0;
    }
    number += rounding;

    let int_part = number as u32;
    let mut remainder = number - int_part as f32;
    count += printer.print_unsigned(sink, int_part, DEC);

    if digits > 0 {
        sink.put(b'.');
        count += 1;
    }

    for _ in 0..digits {
        remainder *= 10.0;
        let digit = remainder as i32;
        count += printer.print_signed(sink, digit, DEC);
        remainder -= digit as f32;
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BaseSet, FormatSettings, FormatterMode, IntWidth};
    use heapless::{String, Vec};

    fn render(number: f32, digits: u8) -> (String<32>, usize) {
        let printer = NumberPrinter::default();
        let mut out: Vec<u8, 32> = Vec::new();
        let count = printer.print_float(&mut out, number, digits);
        (String::from_utf8(out).unwrap(), count)
    }

    #[test]
    fn test_rounds_up_into_integer_part() {
        let (out, count) = render(1.999, 2);
        assert_eq!(out.as_str(), "2.00");
        assert_eq!(count, 4);
    }

    #[test]
    fn test_zero_digits_has_no_point() {
        assert_eq!(render(0.0, 0).0.as_str(), "0");
        assert_eq!(render(2.4, 0).0.as_str(), "2");
    }

    #[test]
    fn test_negative_half_rounds_away() {
        let (out, count) = render(-1.5, 0);
        assert_eq!(out.as_str(), "-2");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_three_digits() {
        let (out, count) = render(3.14159, 3);
        assert_eq!(out.as_str(), "3.142");
        assert_eq!(count, 5);
    }

    #[test]
    fn test_negative_with_fraction() {
        assert_eq!(render(-0.25, 2).0.as_str(), "-0.25");
    }

    #[test]
    fn test_nan_renders_as_zero() {
        assert_eq!(render(f32::NAN, 2).0.as_str(), "0.00");
    }

    #[test]
    fn test_integer_part_honours_base_set() {
        // Without a decimal table the integer part falls back to hex
        let printer = NumberPrinter::from_settings(FormatSettings::new(
            IntWidth::Long,
            FormatterMode::Table(BaseSet::HEX),
        ));
        let mut out: Vec<u8, 32> = Vec::new();
        printer.print_float(&mut out, 26.0, 0);
        assert_eq!(out.as_slice(), b"x1A");
    }
}
