//! Host-side simulation of the hardware traits
//!
//! Used by the unit and integration tests of the crates above the HAL.
//! Nothing here touches real hardware; every type only records what the
//! code under test asked it to do.

use heapless::{Deque, Vec};

use crate::irq::{InterruptControl, IrqState};
use crate::line::HalfDuplexLine;
use crate::timer::{bits, AdcPrescaler, InitHardware, Prescaler, Waveform};
use crate::wait::{nested_loop_cycles, BusyWait, SPIN_LOOP_CYCLES};

/// Maximum scripted receive events
pub const SIM_RX_DEPTH: usize = 128;

/// Maximum captured transmit bytes
pub const SIM_TX_CAPACITY: usize = 512;

/// One scripted event on the receive side of [`SimLine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxEvent {
    /// A byte arrives
    Byte(u8),
    /// The line stays idle for this many non-blocking polls
    Silence(u16),
}

/// Scripted half-duplex line
///
/// Receive traffic is queued up front; transmitted bytes are captured.
#[derive(Debug, Default)]
pub struct SimLine {
    rx: Deque<RxEvent, SIM_RX_DEPTH>,
    tx: Vec<u8, SIM_TX_CAPACITY>,
    failed_polls: u32,
    starved: u32,
}

impl SimLine {
    /// Create an idle line with nothing queued
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes to be received, back to back
    ///
    /// Panics when the script outgrows [`SIM_RX_DEPTH`] events.
    pub fn feed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.script(RxEvent::Byte(byte));
        }
    }

    /// Queue an idle gap lasting `polls` failed non-blocking polls
    pub fn feed_silence(&mut self, polls: u16) {
        if polls > 0 {
            self.script(RxEvent::Silence(polls));
        }
    }

    fn script(&mut self, event: RxEvent) {
        if self.rx.push_back(event).is_err() {
            panic!("SimLine receive script longer than {} events", SIM_RX_DEPTH);
        }
    }

    /// Bytes transmitted so far
    pub fn transmitted(&self) -> &[u8] {
        &self.tx
    }

    /// Bytes transmitted so far, as text
    pub fn transmitted_str(&self) -> &str {
        core::str::from_utf8(&self.tx).unwrap_or("")
    }

    /// Forget everything transmitted so far
    pub fn clear_transmitted(&mut self) {
        self.tx.clear();
    }

    /// Non-blocking polls that found nothing
    pub fn failed_polls(&self) -> u32 {
        self.failed_polls
    }

    /// Blocking reads issued with nothing left to receive
    pub fn starved_reads(&self) -> u32 {
        self.starved
    }

    /// Scripted receive events not consumed yet
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl HalfDuplexLine for SimLine {
    fn tx_byte(&mut self, byte: u8) {
        if self.tx.push(byte).is_err() {
            panic!("SimLine captured more than {} transmitted bytes", SIM_TX_CAPACITY);
        }
    }

    fn rx_byte(&mut self) -> u8 {
        // A blocking read waits out any silence
        while let Some(event) = self.rx.pop_front() {
            if let RxEvent::Byte(byte) = event {
                return byte;
            }
        }
        self.starved += 1;
        0
    }

    fn try_rx_byte(&mut self) -> Option<u8> {
        match self.rx.front_mut() {
            Some(RxEvent::Byte(byte)) => {
                let byte = *byte;
                self.rx.pop_front();
                Some(byte)
            }
            Some(RxEvent::Silence(polls)) => {
                *polls -= 1;
                if *polls == 0 {
                    self.rx.pop_front();
                }
                self.failed_polls += 1;
                None
            }
            None => {
                self.failed_polls += 1;
                None
            }
        }
    }
}

/// Simulated global interrupt flag
///
/// Starts with interrupts disabled, as the target does out of reset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimInterrupts {
    enabled: bool,
    disables: u32,
    enables: u32,
}

impl SimInterrupts {
    /// Create with the given initial state
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            disables: 0,
            enables: 0,
        }
    }

    /// Number of `disable` calls
    pub fn disable_count(&self) -> u32 {
        self.disables
    }

    /// Number of times interrupts were switched on
    pub fn enable_count(&self) -> u32 {
        self.enables
    }
}

impl InterruptControl for SimInterrupts {
    fn disable(&mut self) -> IrqState {
        let previous = IrqState::new(self.enabled);
        self.enabled = false;
        self.disables += 1;
        previous
    }

    fn enable(&mut self) {
        self.enabled = true;
        self.enables += 1;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Simulated cycle clock
///
/// Every spin is charged the cycles the real loop would burn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimCycles {
    cpu_hz: u32,
    cycles: u64,
}

impl SimCycles {
    /// Create a clock running at `cpu_hz`
    pub fn new(cpu_hz: u32) -> Self {
        Self { cpu_hz, cycles: 0 }
    }

    /// Cycles spent spinning so far
    pub fn elapsed_cycles(&self) -> u64 {
        self.cycles
    }

    /// Microseconds spent spinning so far (truncated)
    pub fn elapsed_micros(&self) -> u64 {
        self.cycles * 1_000_000 / self.cpu_hz as u64
    }

    /// Reset the cycle count
    pub fn reset(&mut self) {
        self.cycles = 0;
    }
}

impl BusyWait for SimCycles {
    fn spin(&mut self, count: u16) {
        let passes = if count == 0 { 0x1_0000 } else { count as u64 };
        self.cycles += passes * SPIN_LOOP_CYCLES as u64;
    }

    fn spin_nested(&mut self, count: u16, outer: u8) {
        self.cycles += nested_loop_cycles(count, outer) as u64;
    }

    fn spin_ms(&mut self) {
        self.cycles += (self.cpu_hz / 1000) as u64;
    }
}

/// Register file of timer 0, the watchdog and the ADC
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimTimer {
    pub tccr0a: u8,
    pub tccr0b: u8,
    pub timsk0: u8,
    pub tcnt0: u8,
    pub wdtcr: u8,
    pub admux: u8,
    pub adcsra: u8,
    /// Number of watchdog resets issued
    pub watchdog_resets: u32,
}

impl SimTimer {
    /// Create with every register at its reset value
    pub fn new() -> Self {
        Self::default()
    }
}

impl InitHardware for SimTimer {
    fn set_prescaler(&mut self, prescaler: Prescaler) {
        self.tccr0b |= prescaler.cs_bits();
    }

    fn set_waveform(&mut self, waveform: Waveform) {
        match waveform {
            Waveform::Normal => {
                self.tccr0a &= !(bits::bv(bits::WGM00) | bits::bv(bits::WGM01));
            }
            other => self.tccr0a |= other.wgm_bits(),
        }
    }

    fn arm_watchdog_interrupt(&mut self) {
        self.watchdog_resets += 1;
        self.wdtcr = bits::bv(bits::WDTIE);
    }

    fn arm_overflow_interrupt(&mut self) {
        self.timsk0 |= bits::bv(bits::TOIE0);
        self.tcnt0 = 0;
    }

    fn enable_adc(&mut self, prescaler: AdcPrescaler) {
        self.admux = 0;
        self.adcsra |= bits::bv(bits::ADEN) | prescaler.adps_bits();
    }
}
