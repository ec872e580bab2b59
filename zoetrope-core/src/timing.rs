//! Pixel width and duty timing.
//!
//! Pixel widths are kept in fraction units (`PIXEL_FRACTION` units per
//! square pixel) so that step thresholds stay integer math. The raw 8.8
//! register values are kept alongside so reads return exactly what was
//! written instead of the quantized internal value.
//!
//! Writes land in `next_*` fields and only become current at a pixel
//! boundary; committing mid-pixel would glitch the column being shown.

use crate::config::{HORIZONTAL_PIXELS, PIXEL_FRACTION, ROTATION_STEPS};

/// 8.8 fixed-point value of 1.0
const ONE_X256: u16 = 0x0100;

/// Steps that make up `fractions` pixel-fraction units of arc
pub fn steps_per_fraction(fractions: u16) -> u32 {
    fractions as u32 * ROTATION_STEPS / (HORIZONTAL_PIXELS * PIXEL_FRACTION as u32)
}

/// Current and pending pixel timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelTiming {
    /// Width of the pixel being displayed, in fraction units
    width: u16,
    /// Lit portion of the pixel being displayed, in fraction units
    duty: u16,
    /// Width to commit at the next pixel boundary
    next_width: u16,
    /// Duty to commit at the next pixel boundary
    next_duty: u16,
    /// Last aspect-ratio register value, for exact read-back
    aspect_raw: u16,
    /// Last duty register value (clamped to 1.0), for exact read-back
    duty_raw: u16,
}

impl PixelTiming {
    /// Square pixels at full duty
    pub const fn new() -> Self {
        Self {
            width: PIXEL_FRACTION,
            duty: PIXEL_FRACTION,
            next_width: PIXEL_FRACTION,
            next_duty: PIXEL_FRACTION,
            aspect_raw: ONE_X256,
            duty_raw: ONE_X256,
        }
    }

    /// Current pixel width in fraction units
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Current lit duration in fraction units, always ≤ `width()`
    pub fn duty(&self) -> u16 {
        self.duty
    }

    /// Raw aspect-ratio register value
    pub fn aspect_raw(&self) -> u16 {
        self.aspect_raw
    }

    /// Raw duty register value
    pub fn duty_raw(&self) -> u16 {
        self.duty_raw
    }

    /// Write the aspect-ratio register (8.8, pixel width ÷ one-pixel unit).
    ///
    /// Takes effect at the next pixel boundary. The resulting width is
    /// clamped to at least one fraction unit so the refresh threshold can
    /// never collapse to zero.
    pub fn set_aspect(&mut self, raw: u16) {
        self.aspect_raw = raw;
        let width = (raw as u32 * PIXEL_FRACTION as u32) >> 8;
        self.next_width = (width as u16).max(1);
        // Duty is a ratio of the width, so it scales with it
        self.next_duty = ((self.duty_raw as u32 * self.next_width as u32) >> 8) as u16;
    }

    /// Write the duty register (8.8, lit time ÷ pixel width, capped at 1.0).
    ///
    /// Takes effect at the next pixel boundary.
    pub fn set_duty(&mut self, raw: u16) {
        self.duty_raw = raw.min(ONE_X256);
        self.next_duty = ((self.duty_raw as u32 * self.next_width as u32) >> 8) as u16;
    }

    /// Commit pending values. Only the scheduler calls this, and only at a
    /// pixel boundary.
    pub fn commit(&mut self) {
        self.width = self.next_width;
        self.duty = self.next_duty.min(self.width);
    }

    /// Step count at which the current pixel ends
    pub fn width_threshold(&self) -> u32 {
        steps_per_fraction(self.width)
    }

    /// Step count at which the LEDs blank within the current pixel
    pub fn duty_threshold(&self) -> u32 {
        steps_per_fraction(self.duty)
    }
}

impl Default for PixelTiming {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_square_full_duty() {
        let timing = PixelTiming::new();
        assert_eq!(timing.width(), PIXEL_FRACTION);
        assert_eq!(timing.duty(), PIXEL_FRACTION);
        // 4096 steps / (200 px * 8 fractions) -> 20 steps per whole pixel
        assert_eq!(timing.width_threshold(), 20);
    }

    #[test]
    fn test_writes_are_deferred_until_commit() {
        let mut timing = PixelTiming::new();
        timing.set_aspect(0x0200); // 2.0 -> 16 fraction units
        assert_eq!(timing.width(), PIXEL_FRACTION);
        timing.commit();
        assert_eq!(timing.width(), 16);
        assert_eq!(timing.width_threshold(), 40);
    }

    #[test]
    fn test_duty_never_exceeds_width() {
        let mut timing = PixelTiming::new();
        timing.set_duty(0xFFFF); // silly over-unity request, clamped to 1.0
        timing.commit();
        assert_eq!(timing.duty(), timing.width());

        timing.set_duty(0x0080); // 0.5
        timing.commit();
        assert_eq!(timing.duty(), timing.width() / 2);
        assert!(timing.duty() <= timing.width());
    }

    #[test]
    fn test_duty_rescales_with_width() {
        let mut timing = PixelTiming::new();
        timing.set_duty(0x0080); // 0.5
        timing.set_aspect(0x0400); // 4.0 -> 32 fraction units
        timing.commit();
        assert_eq!(timing.width(), 32);
        assert_eq!(timing.duty(), 16);
    }

    #[test]
    fn test_width_clamped_to_one_fraction() {
        let mut timing = PixelTiming::new();
        timing.set_aspect(0x0000);
        timing.commit();
        assert_eq!(timing.width(), 1);
        // Threshold stays nonzero through integer floor only if width > 0
        assert!(timing.width_threshold() > 0);
    }

    #[test]
    fn test_raw_values_read_back_exactly() {
        let mut timing = PixelTiming::new();
        timing.set_aspect(0x0123);
        timing.set_duty(0x00AB);
        assert_eq!(timing.aspect_raw(), 0x0123);
        assert_eq!(timing.duty_raw(), 0x00AB);
    }
}
