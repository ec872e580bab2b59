//! Inter-task communication
//!
//! Static channels and counters shared between Embassy tasks. Uses
//! embassy-sync primitives, plus a lock-free step counter on the hot path
//! from the rotor tick to the display pipeline.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use zoetrope_core::StepCounter;

/// Channel capacity for raw host bytes
pub const HOST_CHANNEL_SIZE: usize = 64;

/// Raw bytes from the host UART, one at a time.
///
/// Sized to absorb a full command (17 bytes) plus resync chatter while the
/// pipeline task is mid-refresh.
pub static HOST_BYTES: Channel<CriticalSectionRawMutex, u8, HOST_CHANNEL_SIZE> = Channel::new();

/// Steps taken since the display pipeline last consumed a pixel.
///
/// Incremented by the rotor task, read and consumed by the pipeline task.
pub static STEP_COUNTER: StepCounter = StepCounter::new();
