//! Host UART receive task
//!
//! Pulls raw bytes off the buffered UART and feeds them to the protocol
//! engine's byte channel.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use crate::channels::HOST_BYTES;

/// Buffer size for UART reads
const RX_BUF_SIZE: usize = 32;

/// Host RX task - forwards UART bytes to the protocol engine
#[embassy_executor::task]
pub async fn host_rx_task(mut rx: BufferedUartRx) {
    info!("Host RX task started");

    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);
                for &byte in &buf[..n] {
                    // Blocks when the channel is full, which backpressures
                    // into the UART ring buffer
                    HOST_BYTES.send(byte).await;
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
