//! Bit-banged half-duplex serial on a single GPIO
//!
//! 8N1, LSB first, idle high. The pin rests as an input with its pull-up
//! and is driven only while a byte goes out, so the other end can talk on
//! the same wire in between.

use embassy_rp::gpio::{Flex, Pin, Pull};
use embassy_rp::Peri;
use mite_core::config::LineTiming;
use mite_hal::HalfDuplexLine;

use crate::cycles::CycleScale;

/// Half-duplex line on one pin
pub struct BitBangLine<'d> {
    pin: Flex<'d>,
    /// System cycles per bit
    bit_cycles: u32,
    /// System cycles from the start edge to the middle of bit 0
    rx_start_cycles: u32,
}

impl<'d> BitBangLine<'d> {
    pub fn new(pin: Peri<'d, impl Pin>, timing: &LineTiming, scale: CycleScale) -> Self {
        let mut pin = Flex::new(pin);
        pin.set_pull(Pull::Up);
        pin.set_as_input();

        let line = Self {
            pin,
            bit_cycles: scale.scale(timing.bit_cycles()),
            rx_start_cycles: scale.scale(timing.rx_start_cycles()),
        };

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "line: {} baud, {} cycles/bit, first sample after {}",
            timing.baud(),
            line.bit_cycles,
            line.rx_start_cycles
        );

        line
    }

    fn send_bit(&mut self, high: bool) {
        if high {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
        cortex_m::asm::delay(self.bit_cycles);
    }

    /// Clock in the data bits after the start edge was seen
    fn sample_byte(&mut self) -> u8 {
        cortex_m::interrupt::free(|_| {
            cortex_m::asm::delay(self.rx_start_cycles);
            let mut byte = 0u8;
            for bit in 0..8 {
                if self.pin.is_high() {
                    byte |= 1 << bit;
                }
                cortex_m::asm::delay(self.bit_cycles);
            }
            byte
        })
    }
}

impl HalfDuplexLine for BitBangLine<'_> {
    fn tx_byte(&mut self, byte: u8) {
        cortex_m::interrupt::free(|_| {
            self.pin.set_high();
            self.pin.set_as_output();

            self.send_bit(false);
            for bit in 0..8 {
                self.send_bit(byte & (1 << bit) != 0);
            }
            self.send_bit(true);

            self.pin.set_as_input();
        });
    }

    fn rx_byte(&mut self) -> u8 {
        while self.pin.is_high() {}
        self.sample_byte()
    }

    fn try_rx_byte(&mut self) -> Option<u8> {
        if self.pin.is_high() {
            return None;
        }
        Some(self.sample_byte())
    }
}
