//! RP2040 port of the Mite hardware traits
//!
//! The core is calibrated in cycles of the configured 8-bit CPU clock. This
//! port runs those same cycle counts on the much faster Cortex-M0+ by
//! scaling them to the system clock:
//!
//! - [`line::BitBangLine`] - Half-duplex serial on one GPIO with pull-up
//! - [`irq::CortexInterrupts`] - PRIMASK-based global interrupt control
//! - [`wait::CycleWait`] - Scaled `cortex_m::asm::delay` spin loops
//! - [`timer::SysTickTimer`] - SysTick standing in for the timer 0 overflow

#![no_std]

pub mod cycles;
pub mod irq;
pub mod line;
pub mod timer;
pub mod wait;

pub use cycles::CycleScale;
pub use irq::CortexInterrupts;
pub use line::BitBangLine;
pub use timer::SysTickTimer;
pub use wait::CycleWait;
