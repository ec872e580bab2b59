//! Pixel column representation.
//!
//! One column is one refresh unit: a bit per vertical LED, packed into bytes
//! in the wire order the host sends them. Byte 0 is the topmost byte and the
//! most significant bit of each byte is its topmost pixel.

use crate::config::{COLUMN_BYTES, VERTICAL_PIXELS};

/// One column of pixels, in wire byte order
pub type Column = [u8; COLUMN_BYTES];

/// An all-dark column
pub const BLANK_COLUMN: Column = [0; COLUMN_BYTES];

/// Read the pixel at vertical position `y` (0 = top)
pub fn get_cell(column: &Column, y: usize) -> bool {
    debug_assert!(y < VERTICAL_PIXELS);
    column[y / 8] >> (7 - y % 8) & 1 != 0
}

/// Set the pixel at vertical position `y` (0 = top)
pub fn set_cell(column: &mut Column, y: usize, lit: bool) {
    debug_assert!(y < VERTICAL_PIXELS);
    let mask = 1 << (7 - y % 8);
    if lit {
        column[y / 8] |= mask;
    } else {
        column[y / 8] &= !mask;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_of_first_byte_is_top_pixel() {
        let mut column = BLANK_COLUMN;
        set_cell(&mut column, 0, true);
        assert_eq!(column[0], 0x80);
        assert!(get_cell(&column, 0));
        assert!(!get_cell(&column, 1));
    }

    #[test]
    fn test_bottom_pixel_is_lsb_of_last_byte() {
        let mut column = BLANK_COLUMN;
        set_cell(&mut column, VERTICAL_PIXELS - 1, true);
        assert_eq!(column[COLUMN_BYTES - 1], 0x01);
    }

    #[test]
    fn test_set_then_clear_roundtrips() {
        let mut column = BLANK_COLUMN;
        for y in (0..VERTICAL_PIXELS).step_by(7) {
            set_cell(&mut column, y, true);
            assert!(get_cell(&column, y));
            set_cell(&mut column, y, false);
        }
        assert_eq!(column, BLANK_COLUMN);
    }
}
