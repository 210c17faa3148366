//! Standard I/O trait adapters
//!
//! `write!` works through [`core::fmt::Write`]; drivers written against
//! `embedded-io` take the port through [`embedded_io::Read`] and
//! [`embedded_io::Write`]. Neither direction can fail.

use core::convert::Infallible;

use mite_core::fmt::MagnitudeFormatter;
use mite_hal::{HalfDuplexLine, InterruptControl};

use crate::serial::HalfDuplexSerial;

impl<L, I, F> core::fmt::Write for HalfDuplexSerial<L, I, F>
where
    L: HalfDuplexLine,
    I: InterruptControl,
    F: MagnitudeFormatter,
{
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

impl<L, I, F> embedded_io::ErrorType for HalfDuplexSerial<L, I, F> {
    type Error = Infallible;
}

impl<L, I, F> embedded_io::Write for HalfDuplexSerial<L, I, F>
where
    L: HalfDuplexLine,
    I: InterruptControl,
    F: MagnitudeFormatter,
{
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        Ok(self.write_bytes(buf))
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<L, I, F> embedded_io::Read for HalfDuplexSerial<L, I, F>
where
    L: HalfDuplexLine,
    I: InterruptControl,
    F: MagnitudeFormatter,
{
    /// Block for the first byte, then take whatever follows back to back
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let Some((first, rest)) = buf.split_first_mut() else {
            return Ok(0);
        };
        *first = self.read_char_blocking();

        let mut len = 1;
        for slot in rest {
            match self.read_byte() {
                Some(byte) => {
                    *slot = byte;
                    len += 1;
                }
                None => break,
            }
        }
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write as _;
    use mite_core::config::{CoreSettings, CpuFrequency};
    use mite_hal::sim::{SimInterrupts, SimLine};

    fn serial() -> HalfDuplexSerial<SimLine, SimInterrupts> {
        let settings = CoreSettings::new(CpuFrequency::Mhz8);
        HalfDuplexSerial::from_settings(SimLine::new(), SimInterrupts::new(true), &settings)
    }

    #[test]
    fn test_fmt_write() {
        let mut serial = serial();
        write!(serial, "t={} ms", 160).unwrap();
        assert_eq!(serial.line().transmitted_str(), "t=160 ms");
    }

    #[test]
    fn test_embedded_io_write() {
        let mut serial = serial();
        let n = embedded_io::Write::write(&mut serial, b"abc").unwrap();
        assert_eq!(n, 3);
        embedded_io::Write::write_all(&mut serial, b"de").unwrap();
        assert_eq!(serial.line().transmitted(), b"abcde");
    }

    #[test]
    fn test_embedded_io_read_stops_at_gap() {
        let mut serial = serial();
        serial.line_mut().feed(b"ab");
        serial.line_mut().feed_silence(1);
        serial.line_mut().feed(b"c");

        let mut buf = [0u8; 8];
        let n = embedded_io::Read::read(&mut serial, &mut buf).unwrap();
        assert_eq!(&buf[..n], b"ab");

        let n = embedded_io::Read::read(&mut serial, &mut buf).unwrap();
        assert_eq!(&buf[..n], b"c");
    }

    #[test]
    fn test_embedded_io_read_empty_buffer() {
        let mut serial = serial();
        serial.line_mut().feed(b"x");
        assert_eq!(embedded_io::Read::read(&mut serial, &mut []), Ok(0));
        assert_eq!(serial.line().pending(), 1);
    }
}
