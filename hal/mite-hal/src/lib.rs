//! Mite Hardware Abstraction Layer
//!
//! This crate defines the hardware seams of the runtime core. Everything
//! above it (number printing, the serial transport, the timebase) is plain
//! portable logic that talks to the chip only through these traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  mite-serial / mite-core / firmware     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  mite-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  mite-hal-    │       │  sim (host    │
//! │    rp2040     │       │  test double) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`line::HalfDuplexLine`] - Bit-banged single-wire serial bytes
//! - [`irq::InterruptControl`] - Global interrupt masking
//! - [`wait::BusyWait`] - Cycle-counted spin loops
//! - [`timer::InitHardware`] - Timer, watchdog and ADC setup done once at boot

#![no_std]
#![deny(unsafe_code)]

pub mod irq;
pub mod line;
pub mod timer;
pub mod wait;

#[cfg(any(test, feature = "sim"))]
pub mod sim;

// Re-export key traits at crate root for convenience
pub use irq::{InterruptControl, IrqState};
pub use line::HalfDuplexLine;
pub use timer::{AdcPrescaler, InitHardware, Prescaler, Waveform};
pub use wait::BusyWait;
