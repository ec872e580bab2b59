//! Display geometry and timing parameters.
//!
//! These are compile-time constants: column sizes flow into array types and
//! the step period must be known before the scheduler can be meaningful.
//! Everything here describes the physical build of the display.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of LEDs on the rotating column. Must be a multiple of 8.
pub const VERTICAL_PIXELS: usize = 120;

/// Number of bytes holding one column of pixels
pub const COLUMN_BYTES: usize = VERTICAL_PIXELS / 8;

/// Number of horizontal pixels in one complete rotation at 1:1 aspect ratio
pub const HORIZONTAL_PIXELS: u32 = 200;

/// Rotation speed in 1/256ths of a revolution per minute
pub const DISPLAY_RPM_X256: u16 = 256;

/// Rotation direction of the display drum
pub const STEPPER_CLOCKWISE: bool = false;

/// Stepper steps for one complete rotation of the display
pub const ROTATION_STEPS: u32 = 4096;

/// The fraction of a pixel of which pixel widths and duties are a multiple
pub const PIXEL_FRACTION: u16 = 8;

/// Number of display buffer slots (one is sacrificed to full/empty detection)
pub const BUFFER_SLOTS: usize = 8;

/// Microseconds between stepper steps at the configured speed
pub const STEP_MICROSECONDS: u64 =
    (60_000_000 * 256 / DISPLAY_RPM_X256 as u64) / ROTATION_STEPS as u64;

/// Frames to run one automaton rule for if it never reaches a fixed point
pub const DEMO_FRAME_CAP: u16 = (HORIZONTAL_PIXELS / 4) as u16;

/// Minimum frames to show a rule even when it stops changing
pub const DEMO_MIN_FRAMES: u16 = 8;

/// Tunables for the fallback demo generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DemoOptions {
    /// Hard cap on generations per rule
    pub frame_cap: u16,
    /// Generations to show a rule even after it stops changing
    pub min_frames: u16,
    /// Restart the demo cycle whenever real buffered content is displayed,
    /// instead of resuming the interrupted rule
    pub reset_on_content: bool,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            frame_cap: DEMO_FRAME_CAP,
            min_frames: DEMO_MIN_FRAMES,
            reset_on_content: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_resolution_is_byte_aligned() {
        assert_eq!(VERTICAL_PIXELS % 8, 0);
        assert_eq!(COLUMN_BYTES, 15);
    }

    #[test]
    fn test_step_period() {
        // 1 RPM over 4096 steps: one step every ~14.6ms
        assert_eq!(STEP_MICROSECONDS, 14648);
    }
}
