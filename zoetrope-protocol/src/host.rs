//! Host-side command encoding.
//!
//! Helpers for driver software (and the firmware's own tests) that speak to
//! the controller. Each function produces the exact byte sequence a host
//! must transmit for one command.

use heapless::Vec;

use crate::command::{pong, CommandByte, Opcode, Register, PROTOCOL_VERSION};

/// Largest column size any supported display can request (256 LEDs)
pub const MAX_COLUMN_BYTES: usize = 32;

/// Maximum encoded length of a single command (`PushLine` plus its column)
pub const MAX_COMMAND_LEN: usize = 1 + MAX_COLUMN_BYTES;

/// Number of NOPs that guarantees the controller returns to its idle state.
///
/// No command consumes more argument bytes than this, so a burst of this many
/// NOPs always lands the parser back in the command-accepting state.
pub const RESYNC_NOP_COUNT: usize = 100;

/// Errors a host can hit while talking to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostError {
    /// Column data longer than any supported display
    ColumnTooLong,
    /// Ping reply carried an unexpected protocol version
    VersionMismatch { got: u8 },
    /// Ping reply echoed the wrong nonce
    NonceMismatch { got: u8 },
}

fn command(opcode: Opcode, immediate: u8) -> u8 {
    CommandByte { opcode, immediate }.encode()
}

/// Encode a no-operation command
pub fn no_operation() -> u8 {
    command(Opcode::NoOperation, 0)
}

/// Encode a `PushLine` command with its column payload.
///
/// `column` must be exactly the byte length the target display expects
/// (display height / 8); the controller does not length-check it and sending
/// the wrong length is a protocol violation. The controller replies with one
/// byte holding its remaining free buffer slots.
pub fn push_line(column: &[u8]) -> Result<Vec<u8, MAX_COMMAND_LEN>, HostError> {
    let mut bytes = Vec::new();
    bytes
        .push(command(Opcode::PushLine, 0))
        .map_err(|_| HostError::ColumnTooLong)?;
    bytes
        .extend_from_slice(column)
        .map_err(|_| HostError::ColumnTooLong)?;
    Ok(bytes)
}

/// Encode a `FlushBuffer` command. The controller replies with one byte once
/// its buffer has drained.
pub fn flush_buffer() -> u8 {
    command(Opcode::FlushBuffer, 0)
}

/// Encode a `ClearBuffer` command. No reply.
pub fn clear_buffer() -> u8 {
    command(Opcode::ClearBuffer, 0)
}

/// Encode a register read. The controller replies with 2 big-endian bytes.
pub fn register_read(register: Register) -> u8 {
    command(Opcode::RegisterRead, register as u8)
}

/// Encode a register write with its 16-bit value.
pub fn register_write(register: Register, value: u16) -> [u8; 3] {
    [
        command(Opcode::RegisterWrite, register as u8),
        (value >> 8) as u8,
        (value & 0xFF) as u8,
    ]
}

/// Encode a `Ping` carrying a 4-bit nonce.
pub fn ping(nonce: u8) -> u8 {
    command(Opcode::Ping, nonce)
}

/// Validate a `Ping` reply against the nonce that was sent.
pub fn check_pong(nonce: u8, reply: u8) -> Result<(), HostError> {
    if reply >> 4 != PROTOCOL_VERSION {
        return Err(HostError::VersionMismatch { got: reply >> 4 });
    }
    if reply != pong(PROTOCOL_VERSION, nonce) {
        return Err(HostError::NonceMismatch { got: reply & 0xF });
    }
    Ok(())
}

/// A NOP burst long enough to abort any partially sent command and return
/// the controller to its idle state.
pub fn resync_burst() -> [u8; RESYNC_NOP_COUNT] {
    [no_operation(); RESYNC_NOP_COUNT]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_line_prefixes_opcode() {
        let bytes = push_line(&[0xAA; 15]).unwrap();
        assert_eq!(bytes.len(), 16);
        assert_eq!(bytes[0], 0x10);
        assert!(bytes[1..].iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn test_push_line_rejects_oversized_column() {
        let column = [0u8; MAX_COLUMN_BYTES + 1];
        assert_eq!(push_line(&column), Err(HostError::ColumnTooLong));
    }

    #[test]
    fn test_register_write_is_big_endian() {
        let bytes = register_write(Register::PixelAspectRatio, 0x0180);
        assert_eq!(bytes, [0x53, 0x01, 0x80]);
    }

    #[test]
    fn test_register_read_carries_address() {
        assert_eq!(register_read(Register::BufferStatus), 0x45);
    }

    #[test]
    fn test_check_pong() {
        assert!(check_pong(0x5, 0x15).is_ok());
        assert_eq!(
            check_pong(0x5, 0x25),
            Err(HostError::VersionMismatch { got: 0x2 })
        );
        assert_eq!(
            check_pong(0x5, 0x16),
            Err(HostError::NonceMismatch { got: 0x6 })
        );
    }

    #[test]
    fn test_resync_burst_is_all_nops() {
        assert!(resync_burst().iter().all(|&b| b == 0x00));
    }
}
