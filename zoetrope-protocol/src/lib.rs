//! Zoetrope host communication protocol
//!
//! This crate defines the serial protocol between a host computer and the
//! POV display controller. The protocol is designed so that an unattended
//! controller can always be resynchronized by a burst of no-operation bytes.
//!
//! # Protocol Overview
//!
//! Every command is a single byte:
//! ```text
//! ┌────────────┬───────────────┐
//! │ OPCODE     │ IMMEDIATE     │
//! │ bits [7:4] │ bits [3:0]    │
//! └────────────┴───────────────┘
//! ```
//!
//! Commands that carry more data (a pixel column, a register value) send the
//! extra bytes immediately after the command byte. Replies are raw bytes with
//! no framing; the host knows how many bytes each command returns.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod host;

pub use command::{
    CommandByte, Opcode, Register, pong, FLUSH_ACK, IMMEDIATE_MASK, OPCODE_MASK, PROTOCOL_VERSION,
    UNKNOWN_REGISTER,
};
