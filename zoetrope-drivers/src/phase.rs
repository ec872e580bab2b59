//! Stepper phase sequencer
//!
//! Drives the four coils of a unipolar stepper (28BYJ-48 class, via a
//! ULN2003 darlington array) through the half-step sequence. One `step()`
//! call per timer tick; rotation direction is fixed at construction to
//! match how the display is built.

use embedded_hal::digital::OutputPin;

/// Coil energize patterns for half stepping, one bit per coil.
///
/// Walking this table forward turns the rotor counter-clockwise as seen
/// from the display side; walking it backward turns clockwise.
pub const HALF_STEP_SEQUENCE: [u8; 8] = [
    0b0001, 0b0011, 0b0010, 0b0110, 0b0100, 0b1100, 0b1000, 0b1001,
];

/// Half-step driver for a four-coil unipolar stepper
pub struct PhaseSequencer<P> {
    coils: [P; 4],
    phase: u8,
    clockwise: bool,
}

impl<P: OutputPin> PhaseSequencer<P> {
    /// Coils given in winding order A, B, C, D
    pub fn new(coils: [P; 4], clockwise: bool) -> Self {
        Self {
            coils,
            phase: 0,
            clockwise,
        }
    }

    /// Current position within the half-step sequence
    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Energize the coils for the current phase and advance to the next.
    ///
    /// GPIO writes are infallible on the targets this runs on; a failing
    /// pin has nowhere to report to from the step interrupt anyway.
    pub fn step(&mut self) {
        let pattern = HALF_STEP_SEQUENCE[self.phase as usize];
        for (index, coil) in self.coils.iter_mut().enumerate() {
            if pattern & (1 << index) != 0 {
                let _ = coil.set_high();
            } else {
                let _ = coil.set_low();
            }
        }
        self.phase = if self.clockwise {
            self.phase.wrapping_sub(1) & 7
        } else {
            (self.phase + 1) & 7
        };
    }

    /// De-energize all coils, letting the rotor spin down
    pub fn release(&mut self) {
        for coil in self.coils.iter_mut() {
            let _ = coil.set_low();
        }
    }
}
