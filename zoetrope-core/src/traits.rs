//! Hardware boundary traits.
//!
//! These are the seams between the display pipeline and the board: the
//! serial link to the host and the LED column output hardware. Firmware
//! implements them over the real peripherals; tests implement them over
//! plain collections.

/// Byte-oriented link to the host.
///
/// All operations are non-blocking: the protocol engine is polled from a
/// cooperative loop and must never stall it.
pub trait HostLink {
    /// Consume the next received byte, if one has arrived
    fn read(&mut self) -> Option<u8>;

    /// Whether a received byte is waiting, without consuming it.
    ///
    /// The engine's wait states use this to abandon a wait the moment the
    /// host sends a new command.
    fn byte_pending(&mut self) -> bool;

    /// Queue one reply byte for transmission
    fn write(&mut self, byte: u8);
}

/// The LED column output: a daisy-chained shift register plus latch and
/// blanking lines.
pub trait ColumnOutput {
    /// Drive the blanking line. `true` turns the LEDs off.
    fn set_blanking(&mut self, blanked: bool);

    /// Shift bytes towards the LED drivers, in the order given
    fn write_bytes(&mut self, bytes: &[u8]);

    /// Pulse the latch, making the shifted bits visible
    fn latch(&mut self);
}
