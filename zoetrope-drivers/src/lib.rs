//! Hardware driver implementations
//!
//! This crate provides the hardware-facing pieces of the Zoetrope display
//! controller, generic over `embedded-hal` traits:
//!
//! - Half-step phase sequencer for the unipolar rotation stepper
//! - SPI shift-register column output for the LED drivers

#![no_std]
#![deny(unsafe_code)]

pub mod column_out;
pub mod phase;

pub use column_out::ShiftRegisterColumn;
pub use phase::{PhaseSequencer, HALF_STEP_SEQUENCE};
