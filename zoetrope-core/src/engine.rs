//! Command protocol engine.
//!
//! A finite-state machine over the host byte stream. Commands arrive as
//! single opcode/immediate bytes, some followed by argument bytes; replies
//! are raw bytes. The engine is polled from the cooperative main loop and
//! never blocks: multi-byte commands accumulate across polls, and the two
//! wait states re-check their condition each poll.
//!
//! A host that stops mid-command parks the engine in that state forever.
//! There are deliberately no timeouts; the documented recovery is the host's
//! NOP resync burst.

use zoetrope_protocol::{pong, CommandByte, Opcode, FLUSH_ACK, PROTOCOL_VERSION};

use crate::buffer::LineBuffer;
use crate::column::{Column, BLANK_COLUMN};
use crate::config::COLUMN_BYTES;
use crate::registers::RegisterBank;
use crate::traits::HostLink;

/// Engine states between polls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineState {
    /// Waiting for a command byte
    Idle,
    /// Collecting one column of pixel data for `PushLine`
    ReadLine { received: usize, column: Column },
    /// `PushLine` reply pending until a buffer slot frees up
    WaitBufferNotFull,
    /// `FlushBuffer` reply pending until the buffer drains
    Flush,
    /// Collecting the 2-byte big-endian value for `RegisterWrite`
    ReadRegisterValue { register: u8, high: Option<u8> },
}

/// The protocol state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEngine {
    state: EngineState,
}

impl CommandEngine {
    pub const fn new() -> Self {
        Self {
            state: EngineState::Idle,
        }
    }

    /// Current state, for status reporting
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Advance the state machine as far as the received bytes allow.
    ///
    /// Called once per main-loop iteration. Consumes at most one command
    /// per poll; argument bytes already waiting are drained eagerly.
    pub fn poll<L: HostLink, const N: usize>(
        &mut self,
        link: &mut L,
        buffer: &mut LineBuffer<N>,
        registers: &mut RegisterBank,
    ) {
        match self.state {
            EngineState::Idle => self.dispatch(link, buffer, registers),
            EngineState::ReadLine {
                mut received,
                mut column,
            } => {
                while received < COLUMN_BYTES {
                    match link.read() {
                        Some(byte) => {
                            column[received] = byte;
                            received += 1;
                        }
                        None => {
                            self.state = EngineState::ReadLine { received, column };
                            return;
                        }
                    }
                }
                // A full buffer silently discards the column; the host's
                // backpressure signal is the free-space reply below
                let _ = buffer.insert(&column);
                self.state = EngineState::WaitBufferNotFull;
            }
            EngineState::WaitBufferNotFull => {
                // A new command aborts the wait, leaving its byte unread
                if link.byte_pending() {
                    self.state = EngineState::Idle;
                } else if buffer.free_spaces() > 0 {
                    link.write(buffer.free_spaces() as u8);
                    self.state = EngineState::Idle;
                }
            }
            EngineState::Flush => {
                if link.byte_pending() {
                    self.state = EngineState::Idle;
                } else if buffer.is_empty() {
                    link.write(FLUSH_ACK);
                    self.state = EngineState::Idle;
                }
            }
            EngineState::ReadRegisterValue { register, high } => {
                let mut high = high;
                loop {
                    let Some(byte) = link.read() else {
                        self.state = EngineState::ReadRegisterValue { register, high };
                        return;
                    };
                    match high {
                        None => high = Some(byte),
                        Some(high_byte) => {
                            let value = u16::from_be_bytes([high_byte, byte]);
                            registers.write(register, value);
                            self.state = EngineState::Idle;
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Handle one command byte from the idle state
    fn dispatch<L: HostLink, const N: usize>(
        &mut self,
        link: &mut L,
        buffer: &mut LineBuffer<N>,
        registers: &mut RegisterBank,
    ) {
        let Some(byte) = link.read() else {
            return;
        };
        let command = CommandByte::decode(byte);
        match command.opcode {
            Opcode::NoOperation => {}
            Opcode::PushLine => {
                self.state = EngineState::ReadLine {
                    received: 0,
                    column: BLANK_COLUMN,
                };
            }
            Opcode::FlushBuffer => {
                self.state = EngineState::Flush;
            }
            Opcode::ClearBuffer => {
                buffer.clear();
            }
            Opcode::RegisterRead => {
                let value = registers.read(command.immediate, buffer);
                let [high, low] = value.to_be_bytes();
                link.write(high);
                link.write(low);
            }
            Opcode::RegisterWrite => {
                self.state = EngineState::ReadRegisterValue {
                    register: command.immediate,
                    high: None,
                };
            }
            Opcode::Ping => {
                link.write(pong(PROTOCOL_VERSION, command.immediate));
            }
        }
    }
}

impl Default for CommandEngine {
    fn default() -> Self {
        Self::new()
    }
}
