//! Embassy async tasks

pub mod console;
pub mod tick;

pub use console::{console_task, Console, ConsoleClock};
pub use tick::tick_task;
