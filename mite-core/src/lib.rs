//! Board-agnostic core of the Mite runtime
//!
//! This crate contains the logic that does not depend on a specific chip:
//!
//! - Build configuration (CPU frequency, print width, enabled bases, toggles)
//! - Number printing through a byte sink, table-driven or division-based
//! - Millisecond/microsecond timebase and calibrated busy-wait delays
//!
//! Hardware is reached only through the `mite-hal` traits, so everything
//! here runs unchanged on the host against the `mite-hal` simulation.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod fmt;
pub mod timebase;
