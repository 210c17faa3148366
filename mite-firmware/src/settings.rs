//! Build-time configuration
//!
//! `CORE_SETTINGS` and the `line_pin!` macro are generated from core.toml by
//! build.rs, which has already rejected anything the core cannot run.

#[allow(unused_imports)]
use mite_core::config::{
    BaseSet, CoreSettings, CpuFrequency, FormatSettings, FormatterMode, IntWidth, LineTiming,
    PwmSettings,
};
#[allow(unused_imports)]
use mite_hal::{Prescaler, Waveform};

include!(concat!(env!("OUT_DIR"), "/core_settings.rs"));

/// Bit timing of the serial line
pub const LINE_TIMING: LineTiming = match CORE_SETTINGS.line_timing() {
    Ok(timing) => timing,
    Err(_) => panic!("baud rate unreachable at the configured CPU frequency"),
};
