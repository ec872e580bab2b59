//! Rotation drive task
//!
//! Ticks the stepper through its half-step sequence at a fixed rate and
//! publishes each step to the shared counter. This is the display's
//! timebase: every pixel the scheduler paints is measured in these steps.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Ticker};

use zoetrope_core::config::STEP_MICROSECONDS;
use zoetrope_drivers::PhaseSequencer;

use crate::channels::STEP_COUNTER;

/// Rotor task - steps the motor and counts steps for the scheduler
#[embassy_executor::task]
pub async fn rotor_task(mut sequencer: PhaseSequencer<Output<'static>>) {
    info!("Rotor task started: {} us per half step", STEP_MICROSECONDS);

    let mut ticker = Ticker::every(Duration::from_micros(STEP_MICROSECONDS));

    loop {
        ticker.next().await;
        sequencer.step();
        STEP_COUNTER.increment();
    }
}
