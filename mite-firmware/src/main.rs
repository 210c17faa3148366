//! Mite - runtime core bring-up firmware
//!
//! Runs the Mite core on an RP2040: the half-duplex soft serial on one
//! GPIO, the watchdog-tick `millis()` and the overflow-counted `micros()`,
//! all with the timing of the 8-bit CPU configured in core.toml.

#![no_std]
#![no_main]

use cortex_m_rt::exception;
use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use mite_core::timebase::{self, Clock, Timebase};
use mite_hal_rp2040::{BitBangLine, CortexInterrupts, CycleScale, CycleWait, SysTickTimer};
use mite_serial::HalfDuplexSerial;

use crate::settings::{CORE_SETTINGS, LINE_TIMING};

#[macro_use]
mod settings;
mod tasks;

/// Counters behind `millis()` and `micros()`
static TIMEBASE: Timebase = Timebase::new();

/// Stands in for the timer 0 overflow interrupt
#[exception]
fn SysTick() {
    TIMEBASE.on_timer_overflow();
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Mite firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let scale = CycleScale::from_system_clock(CORE_SETTINGS.cpu);
    info!(
        "Emulating {} Hz on a {} Hz system clock",
        CORE_SETTINGS.cpu.hz(),
        scale.sys_hz()
    );

    let Some(core) = cortex_m::Peripherals::take() else {
        defmt::panic!("Core peripherals already taken");
    };

    let mut timer = SysTickTimer::new(core.SYST, scale);
    let mut irq = CortexInterrupts::new();
    timebase::init(&CORE_SETTINGS, &mut timer, &mut irq);
    info!(
        "Core initialized: millis={}, micros={}, adc={}",
        CORE_SETTINGS.millis, CORE_SETTINGS.micros, CORE_SETTINGS.adc
    );

    let line = BitBangLine::new(line_pin!(p), &LINE_TIMING, scale);
    let serial = HalfDuplexSerial::from_settings(line, CortexInterrupts::new(), &CORE_SETTINGS);
    info!("Serial line at {} baud", LINE_TIMING.baud());

    let clock = Clock::new(&TIMEBASE, CORE_SETTINGS.cpu, CycleWait::new(scale), irq);

    spawner.spawn(tasks::tick_task(&TIMEBASE)).unwrap();
    spawner.spawn(tasks::console_task(serial, clock)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
