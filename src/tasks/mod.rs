//! Background tasks module
//!
//! This module contains the countdown driver and the blink effect that run
//! alongside the terminal adapter.

pub mod blink;
pub mod tick_driver;

// Re-export main functions
pub use blink::blink_task;
pub use tick_driver::tick_driver_task;
