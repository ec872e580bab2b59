//! Zoetrope - persistence-of-vision display firmware
//!
//! Main firmware binary for RP2040-based POV display boards. A stepper
//! spins the LED column; the column is strobed at step-counted instants
//! to paint a 200x120 cylindrical raster.
//!
//! Named after the Victorian spinning-drum animation toy.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use zoetrope_core::config::STEPPER_CLOCKWISE;
use zoetrope_drivers::{PhaseSequencer, ShiftRegisterColumn};
use {defmt_rtt as _, panic_probe as _};

mod channels;
mod io;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Zoetrope firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Host UART on GP0/GP1, 115200 8N1 default
    let uart_config = UartConfig::default();
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    info!("Host UART initialized");

    // LED driver chain: SPI0 TX on GP18 (clk) / GP19 (mosi),
    // latch on GP20, active-low output enable on GP21
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = 8_000_000;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let latch = Output::new(p.PIN_20, Level::Low);
    let output_enable = Output::new(p.PIN_21, Level::High);
    let column = ShiftRegisterColumn::new(spi, latch, output_enable);
    info!("Column drivers initialized");

    // Stepper coils A-D on GP10-GP13 via the darlington array
    let coils = [
        Output::new(p.PIN_10, Level::Low),
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_12, Level::Low),
        Output::new(p.PIN_13, Level::Low),
    ];
    let sequencer = PhaseSequencer::new(coils, STEPPER_CLOCKWISE);
    info!("Stepper initialized");

    spawner.spawn(tasks::rotor_task(sequencer)).unwrap();
    spawner.spawn(tasks::host_rx_task(rx)).unwrap();
    spawner.spawn(tasks::pipeline_task(tx, column)).unwrap();

    info!("All tasks spawned, firmware running");

    // All work happens in the spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
