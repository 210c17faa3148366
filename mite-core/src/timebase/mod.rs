//! Millisecond/microsecond timebase and busy-wait delays
//!
//! - [`Timebase`]: the two interrupt-fed counters behind `millis()` and
//!   `micros()`
//! - [`plan_microseconds`]: microseconds to spin-loop counts, per CPU
//!   frequency
//! - [`Clock`]: counters and delays bound to one spin primitive and one
//!   interrupt mask
//! - [`init`]: boot-time timer, watchdog and ADC setup

pub mod clock;
pub mod counters;
pub mod delay;
pub mod init;

pub use clock::Clock;
pub use counters::Timebase;
pub use delay::{plan_microseconds, DelayPlan};
pub use init::init;
