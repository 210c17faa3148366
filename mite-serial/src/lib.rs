//! Half-duplex software serial transport
//!
//! [`HalfDuplexSerial`] sits on a [`mite_hal::HalfDuplexLine`] and provides
//! the familiar serial surface of a tiny-core runtime:
//!
//! - Byte reads in every sentinel flavour (`Option`, zero, blocking)
//! - `read_str` with a shared retry budget
//! - `print`/`println` for strings, characters, integers in any supported
//!   base and floats with a chosen precision
//! - `core::fmt::Write` and `embedded_io::{Read, Write}` adapters
//!
//! Numbers are rendered by [`mite_core::fmt::NumberPrinter`] straight onto
//! the line, one byte at a time.

#![no_std]
#![deny(unsafe_code)]

pub mod io;
pub mod print;
pub mod serial;

pub use print::{Precision, Printable, Radix};
pub use serial::{HalfDuplexSerial, READ_STR_RETRIES};
