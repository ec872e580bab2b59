//! Command byte encoding and register addresses.
//!
//! The high nibble of a command byte selects the opcode, the low nibble is an
//! immediate argument (a register address for the register commands, an echo
//! nonce for `Ping`, ignored elsewhere).

/// Protocol version reported in the high nibble of a `Ping` reply
pub const PROTOCOL_VERSION: u8 = 0x1;

/// Mask selecting the opcode nibble of a command byte
pub const OPCODE_MASK: u8 = 0xF0;

/// Mask selecting the immediate nibble of a command byte
pub const IMMEDIATE_MASK: u8 = 0x0F;

/// Byte emitted when a `FlushBuffer` command completes
pub const FLUSH_ACK: u8 = 0xFF;

/// Sentinel returned when reading a register address that does not exist
pub const UNKNOWN_REGISTER: u16 = 0xFFFF;

/// Command opcodes (high nibble of the command byte)
///
/// Any nibble value without an assigned meaning decodes as `NoOperation`,
/// which is what makes the NOP-burst resynchronization trick work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Opcode {
    /// Do nothing. Consumed and ignored.
    NoOperation = 0x0,
    /// Append one pixel column to the display buffer.
    ///
    /// Followed by exactly one column's worth of data bytes. Replies with a
    /// single byte holding the remaining free buffer slots, sent only once
    /// at least one slot is free (primitive flow control).
    PushLine = 0x1,
    /// Reply with one byte (value `FLUSH_ACK`) once the buffer has drained.
    FlushBuffer = 0x2,
    /// Empty the display buffer immediately. No reply.
    ClearBuffer = 0x3,
    /// Read the register addressed by the immediate nibble.
    ///
    /// Replies with the 16-bit register value as 2 big-endian bytes.
    RegisterRead = 0x4,
    /// Write the register addressed by the immediate nibble.
    ///
    /// Followed by the 16-bit value as 2 big-endian bytes. No reply.
    RegisterWrite = 0x5,
    /// Echo test. Replies with `(PROTOCOL_VERSION << 4) | immediate`.
    Ping = 0xF,
}

impl Opcode {
    /// Decode an opcode nibble. Unassigned values decode as `NoOperation`.
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0xF {
            0x1 => Opcode::PushLine,
            0x2 => Opcode::FlushBuffer,
            0x3 => Opcode::ClearBuffer,
            0x4 => Opcode::RegisterRead,
            0x5 => Opcode::RegisterWrite,
            0xF => Opcode::Ping,
            _ => Opcode::NoOperation,
        }
    }
}

/// A decoded command byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandByte {
    /// Command selector
    pub opcode: Opcode,
    /// Packed 4-bit argument
    pub immediate: u8,
}

impl CommandByte {
    /// Split a raw byte into opcode and immediate
    pub fn decode(byte: u8) -> Self {
        Self {
            opcode: Opcode::from_nibble(byte >> 4),
            immediate: byte & IMMEDIATE_MASK,
        }
    }

    /// Pack opcode and immediate back into a raw byte
    pub fn encode(self) -> u8 {
        ((self.opcode as u8) << 4) | (self.immediate & IMMEDIATE_MASK)
    }
}

/// Control register addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// (Read only) Number of vertical pixels, i.e. the number of LEDs.
    DisplayHeight = 0x0,
    /// (Read only) Number of horizontal pixels in one complete rotation.
    DisplayWidth = 0x1,
    /// (Read only) Rotation speed as signed 1/256ths of an RPM,
    /// positive values clockwise.
    RotationalSpeed = 0x2,
    /// (Read/Write) Pixel width over height as unsigned 8.8 fixed point.
    /// Written values may be clamped to an implementation defined range.
    PixelAspectRatio = 0x3,
    /// (Read/Write) Fraction of each pixel's display time during which the
    /// LEDs are lit, as unsigned 8.8 fixed point with a maximum of 1.0.
    PixelDuty = 0x4,
    /// (Read only) High byte: usable buffer capacity. Low byte: free slots.
    BufferStatus = 0x5,
}

impl Register {
    /// Decode a register address nibble, `None` for unassigned addresses
    pub fn from_nibble(nibble: u8) -> Option<Self> {
        match nibble & 0xF {
            0x0 => Some(Register::DisplayHeight),
            0x1 => Some(Register::DisplayWidth),
            0x2 => Some(Register::RotationalSpeed),
            0x3 => Some(Register::PixelAspectRatio),
            0x4 => Some(Register::PixelDuty),
            0x5 => Some(Register::BufferStatus),
            _ => None,
        }
    }
}

/// Build the reply byte for a `Ping` command
pub fn pong(version: u8, nonce: u8) -> u8 {
    (version << 4) | (nonce & IMMEDIATE_MASK)
}
