//! Serial console
//!
//! Reads lines from the half-duplex line and echoes each one back with its
//! length and the current uptime. Enough to check the bit timing, the
//! number printer and both counters on real hardware.

use defmt::*;
use embassy_time::Timer;
use embedded_hal::delay::DelayNs;
use mite_core::fmt::HEX;
use mite_core::timebase::Clock;
use mite_hal_rp2040::{BitBangLine, CortexInterrupts, CycleWait};
use mite_serial::HalfDuplexSerial;

/// Serial port the console talks through
pub type Console = HalfDuplexSerial<BitBangLine<'static>, CortexInterrupts>;

/// Clock the console reports uptime from
pub type ConsoleClock = Clock<'static, CycleWait, CortexInterrupts>;

/// Longest line read in one go, terminator included
const LINE_LEN: usize = 32;

/// Pause between two reads, leaving the line idle for the other end
const IDLE_POLL_MS: u64 = 20;

/// Console task - echo lines and report uptime
#[embassy_executor::task]
pub async fn console_task(mut serial: Console, mut clock: ConsoleClock) {
    info!("Console task started");

    // Let the other end's receiver settle before the banner
    clock.delay_ms(50);
    serial.println("mite ready");

    let mut buf = [0u8; LINE_LEN];
    loop {
        let len = serial.read_str(&mut buf);
        if len > 0 {
            debug!("Console: {} byte line", len);

            serial.print("> ");
            serial.println(&buf[..len]);

            serial.print("len=0x");
            serial.println_radix(len as u32, HEX);

            let millis = clock.millis();
            let micros = clock.micros();
            serial.print("up ");
            serial.print_float(millis as f32 / 1000.0, 3);
            serial.print(" s, ");
            serial.print(&micros);
            serial.println(" us");
        }

        Timer::after_millis(IDLE_POLL_MS).await;
    }
}
