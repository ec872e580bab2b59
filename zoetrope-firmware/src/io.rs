//! Host link plumbing
//!
//! Adapts the byte channel fed by the UART receive task, plus an outgoing
//! byte queue, to the synchronous `HostLink` the protocol engine polls.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Receiver;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;
use heapless::Deque;

use zoetrope_core::HostLink;

use crate::channels::HOST_CHANNEL_SIZE;

/// Replies queued within one engine poll; the engine emits at most a
/// couple of bytes per slice.
const OUTBOX_SIZE: usize = 16;

/// Synchronous view of the host UART for the protocol engine
pub struct HostIo {
    rx: Receiver<'static, CriticalSectionRawMutex, u8, HOST_CHANNEL_SIZE>,
    /// Byte taken off the channel by `byte_pending` but not yet read
    lookahead: Option<u8>,
    outbox: Deque<u8, OUTBOX_SIZE>,
}

impl HostIo {
    pub fn new(rx: Receiver<'static, CriticalSectionRawMutex, u8, HOST_CHANNEL_SIZE>) -> Self {
        Self {
            rx,
            lookahead: None,
            outbox: Deque::new(),
        }
    }

    /// Push any queued replies out the UART
    pub async fn drain(&mut self, tx: &mut BufferedUartTx) {
        while let Some(byte) = self.outbox.pop_front() {
            if tx.write_all(&[byte]).await.is_err() {
                // Host gone; replies have nowhere to go
                self.outbox.clear();
                return;
            }
        }
    }
}

impl HostLink for HostIo {
    fn read(&mut self) -> Option<u8> {
        self.lookahead
            .take()
            .or_else(|| self.rx.try_receive().ok())
    }

    fn byte_pending(&mut self) -> bool {
        if self.lookahead.is_none() {
            self.lookahead = self.rx.try_receive().ok();
        }
        self.lookahead.is_some()
    }

    fn write(&mut self, byte: u8) {
        // A full outbox means the host stopped draining; dropping the
        // reply is the only option that keeps the display refreshing.
        let _ = self.outbox.push_back(byte);
    }
}
