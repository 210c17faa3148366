//! Watchdog tick for `millis()`
//!
//! The RP2040 has no watchdog interrupt, so an executor ticker stands in
//! for it at the same 16 ms period.

use defmt::*;
use embassy_time::{Duration, Ticker};
use mite_core::timebase::Timebase;
use mite_hal::timer::WATCHDOG_PERIOD_MS;
use mite_hal_rp2040::timer::watchdog_armed;

/// Tick task - feeds the millis counter every watchdog period
#[embassy_executor::task]
pub async fn tick_task(timebase: &'static Timebase) {
    if !watchdog_armed() {
        warn!("Watchdog tick not armed, millis() stays at 0");
        return;
    }

    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(WATCHDOG_PERIOD_MS as u64));
    loop {
        ticker.next().await;
        timebase.on_watchdog_tick();
    }
}
