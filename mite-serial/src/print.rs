//! `print` / `println` over the serial transport
//!
//! Everything printable goes through [`Printable`], so one `print` method
//! covers strings, characters, integers and floats. Integers print in
//! decimal unless wrapped in [`Radix`]; floats print two fractional digits
//! unless wrapped in [`Precision`].

use mite_core::fmt::{ByteSink, MagnitudeFormatter, NumberPrinter, DEC};
use mite_hal::{HalfDuplexLine, InterruptControl};

use crate::serial::HalfDuplexSerial;

/// Fractional digits printed for a bare `f32`
pub const DEFAULT_FLOAT_DIGITS: u8 = 2;

/// Something `print` can render
pub trait Printable {
    /// Render into `sink`, returning the number of bytes written
    fn print_to<S, F>(&self, sink: &mut S, printer: &NumberPrinter<F>) -> usize
    where
        S: ByteSink + ?Sized,
        F: MagnitudeFormatter;
}

impl<T: Printable + ?Sized> Printable for &T {
    fn print_to<S, F>(&self, sink: &mut S, printer: &NumberPrinter<F>) -> usize
    where
        S: ByteSink + ?Sized,
        F: MagnitudeFormatter,
    {
        (**self).print_to(sink, printer)
    }
}

impl Printable for str {
    fn print_to<S, F>(&self, sink: &mut S, _printer: &NumberPrinter<F>) -> usize
    where
        S: ByteSink + ?Sized,
        F: MagnitudeFormatter,
    {
        for &byte in self.as_bytes() {
            sink.put(byte);
        }
        self.len()
    }
}

impl Printable for [u8] {
    fn print_to<S, F>(&self, sink: &mut S, _printer: &NumberPrinter<F>) -> usize
    where
        S: ByteSink + ?Sized,
        F: MagnitudeFormatter,
    {
        for &byte in self {
            sink.put(byte);
        }
        self.len()
    }
}

/// UTF-8 encoded; one byte for ASCII
impl Printable for char {
    fn print_to<S, F>(&self, sink: &mut S, printer: &NumberPrinter<F>) -> usize
    where
        S: ByteSink + ?Sized,
        F: MagnitudeFormatter,
    {
        let mut buf = [0u8; 4];
        self.encode_utf8(&mut buf).print_to(sink, printer)
    }
}

/// Integer in an explicit base
///
/// With the table formatter an unsupported base falls back to the preferred
/// enabled one behind an indicator letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Radix<T>(pub T, pub u8);

/// Float with an explicit number of fractional digits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Precision(pub f32, pub u8);

impl Printable for f32 {
    fn print_to<S, F>(&self, sink: &mut S, printer: &NumberPrinter<F>) -> usize
    where
        S: ByteSink + ?Sized,
        F: MagnitudeFormatter,
    {
        printer.print_float(sink, *self, DEFAULT_FLOAT_DIGITS)
    }
}

impl Printable for Precision {
    fn print_to<S, F>(&self, sink: &mut S, printer: &NumberPrinter<F>) -> usize
    where
        S: ByteSink + ?Sized,
        F: MagnitudeFormatter,
    {
        printer.print_float(sink, self.0, self.1)
    }
}

macro_rules! printable_int {
    ($method:ident => $wide:ty : $($t:ty),+) => {
        $(
            impl Printable for $t {
                fn print_to<S, F>(&self, sink: &mut S, printer: &NumberPrinter<F>) -> usize
                where
                    S: ByteSink + ?Sized,
                    F: MagnitudeFormatter,
                {
                    printer.$method(sink, <$wide>::from(*self), DEC)
                }
            }

            impl Printable for Radix<$t> {
                fn print_to<S, F>(&self, sink: &mut S, printer: &NumberPrinter<F>) -> usize
                where
                    S: ByteSink + ?Sized,
                    F: MagnitudeFormatter,
                {
                    printer.$method(sink, <$wide>::from(self.0), self.1)
                }
            }
        )+
    };
}

printable_int!(print_unsigned => u32: u8, u16, u32);
printable_int!(print_signed => i32: i8, i16, i32);

impl<L, I, F> HalfDuplexSerial<L, I, F>
where
    L: HalfDuplexLine,
    I: InterruptControl,
    F: MagnitudeFormatter,
{
    /// Print `value`, returning the number of bytes sent
    pub fn print<P: Printable + ?Sized>(&mut self, value: &P) -> usize {
        let (mut sink, printer) = self.sink_and_printer();
        value.print_to(&mut sink, printer)
    }

    /// Print an integer in `base`
    pub fn print_radix<T>(&mut self, value: T, base: u8) -> usize
    where
        Radix<T>: Printable,
    {
        self.print(&Radix(value, base))
    }

    /// Print a float with `digits` fractional digits
    pub fn print_float(&mut self, value: f32, digits: u8) -> usize {
        self.print(&Precision(value, digits))
    }

    /// Send `"\r\n"`, returning 2
    pub fn newline(&mut self) -> usize {
        self.print("\r\n")
    }

    /// Print `value` followed by `"\r\n"`
    pub fn println<P: Printable + ?Sized>(&mut self, value: &P) -> usize {
        self.print(value) + self.newline()
    }

    pub fn println_radix<T>(&mut self, value: T, base: u8) -> usize
    where
        Radix<T>: Printable,
    {
        self.print_radix(value, base) + self.newline()
    }

    pub fn println_float(&mut self, value: f32, digits: u8) -> usize {
        self.print_float(value, digits) + self.newline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mite_core::config::{
        BaseSet, CoreSettings, CpuFrequency, FormatSettings, FormatterMode, IntWidth,
    };
    use mite_core::fmt::HEX;
    use mite_hal::sim::{SimInterrupts, SimLine};

    fn serial_with(format: FormatSettings) -> HalfDuplexSerial<SimLine, SimInterrupts> {
        let settings = CoreSettings::new(CpuFrequency::Mhz16).with_format(format);
        HalfDuplexSerial::from_settings(SimLine::new(), SimInterrupts::new(true), &settings)
    }

    fn serial() -> HalfDuplexSerial<SimLine, SimInterrupts> {
        serial_with(FormatSettings::DEFAULT)
    }

    #[test]
    fn test_print_str_and_char() {
        let mut serial = serial();
        assert_eq!(serial.print("hello"), 5);
        assert_eq!(serial.print(&' '), 1);
        assert_eq!(serial.print(&'°'), 2);
        assert_eq!(serial.line().transmitted_str(), "hello °");
    }

    #[test]
    fn test_println_counts_line_ending() {
        let mut serial = serial();
        assert_eq!(serial.newline(), 2);
        assert_eq!(serial.println("ok"), 4);
        assert_eq!(serial.line().transmitted(), b"\r\nok\r\n");
    }

    #[test]
    fn test_print_integers() {
        let mut serial = serial();
        assert_eq!(serial.print(&42u8), 2);
        assert_eq!(serial.print(&-7i16), 2);
        assert_eq!(serial.print(&4_000_000_000u32), 10);
        assert_eq!(serial.line().transmitted_str(), "42-74000000000");
    }

    #[test]
    fn test_print_radix() {
        let mut serial = serial();
        assert_eq!(serial.print_radix(255u8, HEX), 2);
        assert_eq!(serial.print_radix(-1i8, HEX), 8);
        assert_eq!(serial.println_radix(5u16, 2), 3 + 2);
        assert_eq!(serial.line().transmitted_str(), "FFFFFFFFFF101\r\n");
    }

    #[test]
    fn test_print_radix_fallback_indicator() {
        let mut serial = serial_with(FormatSettings::new(
            IntWidth::Long,
            FormatterMode::Table(BaseSet::DEC),
        ));
        // The indicator is sent but not counted
        assert_eq!(serial.print_radix(42u32, 3), 2);
        assert_eq!(serial.line().transmitted_str(), "d42");
    }

    #[test]
    fn test_print_radix_division_mode() {
        let mut serial = serial_with(FormatSettings::new(IntWidth::Long, FormatterMode::Division));
        serial.print_radix(42u32, 3);
        assert_eq!(serial.line().transmitted_str(), "1120");
    }

    #[test]
    fn test_print_floats() {
        let mut serial = serial();
        assert_eq!(serial.print(&1.999f32), 4);
        serial.print(" ");
        assert_eq!(serial.println_float(3.14159, 3), 5 + 2);
        assert_eq!(serial.print(&Precision(-1.5, 0)), 2);
        assert_eq!(serial.line().transmitted_str(), "2.00 3.142\r\n-2");
    }

    #[test]
    fn test_print_to_buffer_keeps_utf8() {
        let printer = NumberPrinter::default();
        let mut out: heapless::Vec<u8, 16> = heapless::Vec::new();
        let count = '°'.print_to(&mut out, &printer);
        assert_eq!(count, 2);
        assert_eq!(count, out.len());
        assert_eq!(core::str::from_utf8(&out), Ok("°"));
    }

    #[test]
    fn test_print_bytes() {
        let mut serial = serial();
        assert_eq!(serial.print(&b"raw"[..]), 3);
        assert_eq!(serial.line().transmitted(), b"raw");
    }
}
