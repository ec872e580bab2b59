//! Display pipeline task
//!
//! Owns the controller state and runs the cooperative main loop: one
//! protocol slice, one scheduler slice, drain replies, yield. Neither
//! slice awaits, so a stalled host can never hold up a pixel refresh.

use defmt::*;
use embassy_futures::yield_now;
use embassy_rp::gpio::Output;
use embassy_rp::spi::{Blocking, Spi};
use embassy_rp::uart::BufferedUartTx;
use embassy_time::Instant;

use zoetrope_core::{Controller, DemoOptions};
use zoetrope_drivers::ShiftRegisterColumn;

use crate::channels::{HOST_BYTES, STEP_COUNTER};
use crate::io::HostIo;

type ColumnHw = ShiftRegisterColumn<Spi<'static, embassy_rp::peripherals::SPI0, Blocking>, Output<'static>, Output<'static>>;

/// Pipeline task - protocol engine plus display scheduler
#[embassy_executor::task]
pub async fn pipeline_task(mut tx: BufferedUartTx, mut column: ColumnHw) {
    info!("Pipeline task started");

    // Boot time in ticks is as good a demo seed as this board can offer
    let seed = Instant::now().as_ticks() as u32;
    let mut controller: Controller = Controller::new(seed, DemoOptions::default());
    let mut host = HostIo::new(HOST_BYTES.receiver());

    loop {
        controller.poll_protocol(&mut host);
        controller.poll_display(&STEP_COUNTER, &mut column);
        host.drain(&mut tx).await;
        yield_now().await;
    }
}
