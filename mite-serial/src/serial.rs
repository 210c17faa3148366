//! Serial transport over a half-duplex line

use mite_core::config::CoreSettings;
use mite_core::fmt::{Formatter, MagnitudeFormatter, NumberPrinter};
use mite_hal::{HalfDuplexLine, InterruptControl};

/// Failed polls [`HalfDuplexSerial::read_str`] tolerates over one call
pub const READ_STR_RETRIES: u16 = 0xFFFF;

/// Serial port on a single bit-banged wire
///
/// There is no receive buffer: a byte is only caught if the line is polled
/// while its start bit arrives. Reads and writes never overlap.
pub struct HalfDuplexSerial<L, I, F = Formatter> {
    line: L,
    irq: I,
    printer: NumberPrinter<F>,
    read_enabled: bool,
}

impl<L: HalfDuplexLine, I: InterruptControl> HalfDuplexSerial<L, I, Formatter> {
    /// Port with the number format and read toggle of `settings`
    pub fn from_settings(line: L, irq: I, settings: &CoreSettings) -> Self {
        Self::new(
            line,
            irq,
            NumberPrinter::from_settings(settings.format),
            settings.read_enabled,
        )
    }
}

impl<L, I, F> HalfDuplexSerial<L, I, F>
where
    L: HalfDuplexLine,
    I: InterruptControl,
    F: MagnitudeFormatter,
{
    pub fn new(line: L, irq: I, printer: NumberPrinter<F>, read_enabled: bool) -> Self {
        Self {
            line,
            irq,
            printer,
            read_enabled,
        }
    }

    /// No-op; the line needs no setup
    pub fn begin(&mut self) {}

    /// No-op; the baud rate is fixed at build time
    pub fn begin_with_baud(&mut self, _baud: u32) {}

    /// No-op
    pub fn end(&mut self) {}

    /// No-op; writes complete before they return
    pub fn flush(&mut self) {}

    /// Always 0, nothing is buffered
    pub fn available(&self) -> usize {
        0
    }

    /// Always `None`, nothing is buffered
    pub fn peek(&self) -> Option<u8> {
        None
    }

    /// Poll for one byte
    ///
    /// Returns `None` when nothing arrived, and always when reads are
    /// disabled in the configuration.
    pub fn read(&mut self) -> Option<u8> {
        if !self.read_enabled {
            return None;
        }
        self.line.try_rx_byte()
    }

    /// Poll for one byte, regardless of the read toggle
    pub fn read_byte(&mut self) -> Option<u8> {
        self.line.try_rx_byte()
    }

    /// Poll for one byte, 0 when nothing arrived
    pub fn read_char(&mut self) -> u8 {
        self.line.rx_byte_or_zero()
    }

    /// Wait for a byte with interrupts masked
    ///
    /// Blocks forever if nothing is ever sent. The previous interrupt state
    /// is restored once the byte is in.
    pub fn read_char_blocking(&mut self) -> u8 {
        let state = self.irq.disable();
        let byte = self.line.rx_byte();
        self.irq.restore(state);
        byte
    }

    /// Collect a NUL-terminated string into `buf`
    ///
    /// Uses the default budget of [`READ_STR_RETRIES`] failed polls.
    pub fn read_str(&mut self, buf: &mut [u8]) -> usize {
        self.read_str_with_retries(buf, READ_STR_RETRIES)
    }

    /// Collect a NUL-terminated string into `buf`, tolerating `retries`
    /// failed polls over the whole call
    ///
    /// Stops once `buf.len() - 1` bytes are in or the budget runs out, and
    /// returns the string length. A short result may mean either. Received
    /// NUL bytes count as failed polls. Everything after the string is
    /// zeroed. Interrupts are masked throughout and restored afterwards.
    pub fn read_str_with_retries(&mut self, buf: &mut [u8], retries: u16) -> usize {
        let Some(last) = buf.len().checked_sub(1) else {
            return 0;
        };
        buf[last] = 0;
        if last == 0 {
            return 0;
        }

        let state = self.irq.disable();
        let mut budget = retries;
        let mut len = 0;
        'collect: while len < last {
            loop {
                let byte = self.line.rx_byte_or_zero();
                if byte != 0 {
                    buf[len] = byte;
                    len += 1;
                    break;
                }
                budget = budget.saturating_sub(1);
                if budget == 0 {
                    break 'collect;
                }
            }
        }
        buf[len..].fill(0);
        self.irq.restore(state);

        len
    }

    /// Send one byte, returning 1
    pub fn write(&mut self, byte: u8) -> usize {
        self.line.tx_byte(byte);
        1
    }

    /// Send every byte of `bytes`, returning the count
    pub fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        for &byte in bytes {
            self.line.tx_byte(byte);
        }
        bytes.len()
    }

    pub fn printer(&self) -> &NumberPrinter<F> {
        &self.printer
    }

    pub fn line(&self) -> &L {
        &self.line
    }

    pub fn line_mut(&mut self) -> &mut L {
        &mut self.line
    }

    /// Split into the line and interrupt control
    pub fn into_parts(self) -> (L, I) {
        (self.line, self.irq)
    }

    /// Line as a byte sink, next to the printer that feeds it
    pub(crate) fn sink_and_printer(&mut self) -> (LineSink<'_, L>, &NumberPrinter<F>) {
        (LineSink { line: &mut self.line }, &self.printer)
    }
}

/// Byte sink writing straight to the line
pub(crate) struct LineSink<'a, L> {
    line: &'a mut L,
}

impl<L: HalfDuplexLine> mite_core::fmt::ByteSink for LineSink<'_, L> {
    fn put(&mut self, byte: u8) {
        self.line.tx_byte(byte);
    }
}
