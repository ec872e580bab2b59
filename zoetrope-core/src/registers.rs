//! Control register bank.
//!
//! Read-only registers report the display build; the two read/write
//! registers front the pixel timing state. Register addresses and encodings
//! are defined in `zoetrope-protocol`; this module supplies the values.

use zoetrope_protocol::{Register, UNKNOWN_REGISTER};

use crate::buffer::LineBuffer;
use crate::config::{DISPLAY_RPM_X256, HORIZONTAL_PIXELS, STEPPER_CLOCKWISE, VERTICAL_PIXELS};
use crate::timing::PixelTiming;

/// The controller's addressable configuration and status values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterBank {
    timing: PixelTiming,
}

impl RegisterBank {
    pub const fn new() -> Self {
        Self {
            timing: PixelTiming::new(),
        }
    }

    /// The pixel timing fronted by the RW registers
    pub fn timing(&self) -> &PixelTiming {
        &self.timing
    }

    pub fn timing_mut(&mut self) -> &mut PixelTiming {
        &mut self.timing
    }

    /// Rotational speed register value: signed rpm × 256, positive clockwise
    fn rpm_register() -> u16 {
        let rpm = DISPLAY_RPM_X256 as i16;
        let signed = if STEPPER_CLOCKWISE { rpm } else { -rpm };
        signed as u16
    }

    /// Read a register address. Unknown addresses read as a sentinel.
    ///
    /// The buffer is borrowed because `BufferStatus` reports its occupancy.
    pub fn read<const N: usize>(&self, address: u8, buffer: &LineBuffer<N>) -> u16 {
        match Register::from_nibble(address) {
            Some(Register::DisplayHeight) => VERTICAL_PIXELS as u16,
            Some(Register::DisplayWidth) => HORIZONTAL_PIXELS as u16,
            Some(Register::RotationalSpeed) => Self::rpm_register(),
            Some(Register::PixelAspectRatio) => self.timing.aspect_raw(),
            Some(Register::PixelDuty) => self.timing.duty_raw(),
            Some(Register::BufferStatus) => {
                ((buffer.capacity() as u16) << 8) | buffer.free_spaces() as u16
            }
            None => UNKNOWN_REGISTER,
        }
    }

    /// Write a register address. Read-only and unknown addresses are
    /// silently ignored.
    pub fn write(&mut self, address: u8, value: u16) {
        match Register::from_nibble(address) {
            Some(Register::PixelAspectRatio) => self.timing.set_aspect(value),
            Some(Register::PixelDuty) => self.timing.set_duty(value),
            _ => {}
        }
    }
}
