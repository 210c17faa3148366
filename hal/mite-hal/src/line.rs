//! Half-duplex serial line abstraction
//!
//! One wire carries both directions, never at the same time. The driver
//! behind this trait owns the direction switching and the bit timing;
//! callers only ever see whole bytes.

/// Byte-level driver for a bit-banged half-duplex line
///
/// There is no receive buffer anywhere below this trait. A byte that starts
/// while nobody is polling is lost, so receive loops must stay tight.
pub trait HalfDuplexLine {
    /// Transmit one byte
    ///
    /// Blocks until the stop bit has been clocked out.
    fn tx_byte(&mut self, byte: u8);

    /// Receive one byte
    ///
    /// Blocks until a start bit arrives and the frame has been sampled.
    fn rx_byte(&mut self) -> u8;

    /// Poll for one byte without blocking
    ///
    /// Returns `None` when no start bit was seen during the poll window.
    fn try_rx_byte(&mut self) -> Option<u8>;

    /// Poll for one byte, returning 0 when nothing arrived
    ///
    /// A received NUL byte cannot be told apart from "no data".
    fn rx_byte_or_zero(&mut self) -> u8 {
        self.try_rx_byte().unwrap_or(0)
    }

    /// Poll for one byte, returning -1 when nothing arrived
    fn rx_byte_or_neg_one(&mut self) -> i16 {
        self.try_rx_byte().map_or(-1, i16::from)
    }
}

impl<T: HalfDuplexLine + ?Sized> HalfDuplexLine for &mut T {
    fn tx_byte(&mut self, byte: u8) {
        (**self).tx_byte(byte)
    }

    fn rx_byte(&mut self) -> u8 {
        (**self).rx_byte()
    }

    fn try_rx_byte(&mut self) -> Option<u8> {
        (**self).try_rx_byte()
    }
}
