//! SPI shift-register column output
//!
//! The LED column hangs off a daisy chain of shift-register constant-current
//! drivers (TLC5916 class) fed from an SPI peripheral. A latch pulse moves
//! the shifted bits to the outputs, and the active-low output-enable line
//! blanks the whole column between the lit and dark parts of a pixel.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use zoetrope_core::ColumnOutput;

/// Column output over SPI plus latch and output-enable lines
pub struct ShiftRegisterColumn<S, LE, OE> {
    spi: S,
    latch: LE,
    output_enable: OE,
}

impl<S, LE, OE> ShiftRegisterColumn<S, LE, OE>
where
    S: SpiBus,
    LE: OutputPin,
    OE: OutputPin,
{
    /// Starts blanked with the latch line idle low
    pub fn new(spi: S, mut latch: LE, mut output_enable: OE) -> Self {
        let _ = latch.set_low();
        let _ = output_enable.set_high();
        Self {
            spi,
            latch,
            output_enable,
        }
    }
}

/// Bus and pin errors are dropped: on the targets this runs on both are
/// infallible, and the refresh path has no way to surface them regardless.
impl<S, LE, OE> ColumnOutput for ShiftRegisterColumn<S, LE, OE>
where
    S: SpiBus,
    LE: OutputPin,
    OE: OutputPin,
{
    fn set_blanking(&mut self, blanked: bool) {
        // Output enable is active low
        if blanked {
            let _ = self.output_enable.set_high();
        } else {
            let _ = self.output_enable.set_low();
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let _ = self.spi.write(bytes);
    }

    fn latch(&mut self) {
        let _ = self.latch.set_high();
        let _ = self.latch.set_low();
    }
}
