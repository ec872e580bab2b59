//! Display scheduler.
//!
//! Turns accumulated stepper steps into pixel refreshes. Polled every
//! main-loop iteration; does nothing until the rotation has swept one pixel
//! width of arc, then shifts out the next column from the line buffer (or
//! the demo generator when the host is quiet).

use crate::buffer::LineBuffer;
use crate::column::Column;
use crate::config::COLUMN_BYTES;
use crate::counter::StepCounter;
use crate::demo::DemoState;
use crate::registers::RegisterBank;
use crate::traits::ColumnOutput;

/// Converts step counts into pixel-boundary refreshes
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayScheduler;

impl DisplayScheduler {
    pub const fn new() -> Self {
        Self
    }

    /// One scheduler iteration.
    ///
    /// Blanks the LEDs for the tail of each pixel (past the duty
    /// threshold), and on crossing the width threshold consumes those steps,
    /// commits any pending timing writes, and shifts out the next column.
    /// Pending width/duty only ever commit here; committing mid-pixel would
    /// glitch the column on display.
    pub fn poll<O: ColumnOutput, const N: usize>(
        &mut self,
        counter: &StepCounter,
        buffer: &mut LineBuffer<N>,
        registers: &mut RegisterBank,
        demo: &mut DemoState,
        out: &mut O,
    ) {
        let steps = counter.count();
        let timing = registers.timing();

        out.set_blanking(steps >= timing.duty_threshold());

        let width_threshold = timing.width_threshold();
        if steps < width_threshold {
            return;
        }

        // Pixel boundary: surplus steps carry into the next pixel
        counter.consume(width_threshold);
        registers.timing_mut().commit();

        let column = match buffer.pop() {
            Some(column) => {
                demo.content_shown();
                column
            }
            None => demo.next_column(),
        };
        shift_out(out, &column);
    }
}

/// Shift a column to the LED drivers and latch it.
///
/// The farthest driver in the daisy chain holds the bottom of the column,
/// so bytes go out in reverse order (least significant byte first).
fn shift_out<O: ColumnOutput>(out: &mut O, column: &Column) {
    let mut reversed = [0u8; COLUMN_BYTES];
    for (dst, src) in reversed.iter_mut().zip(column.iter().rev()) {
        *dst = *src;
    }
    out.write_bytes(&reversed);
    out.latch();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::BLANK_COLUMN;
    use crate::config::DemoOptions;
    use heapless::Vec;

    /// Records every signal the scheduler drives
    struct TestOutput {
        blanked: bool,
        columns: Vec<[u8; COLUMN_BYTES], 16>,
        pending: Vec<u8, { COLUMN_BYTES * 2 }>,
    }

    impl TestOutput {
        fn new() -> Self {
            Self {
                blanked: false,
                columns: Vec::new(),
                pending: Vec::new(),
            }
        }
    }

    impl ColumnOutput for TestOutput {
        fn set_blanking(&mut self, blanked: bool) {
            self.blanked = blanked;
        }

        fn write_bytes(&mut self, bytes: &[u8]) {
            self.pending.extend_from_slice(bytes).unwrap();
        }

        fn latch(&mut self) {
            let mut column = [0u8; COLUMN_BYTES];
            column.copy_from_slice(&self.pending);
            self.columns.push(column).unwrap();
            self.pending.clear();
        }
    }

    struct Harness {
        scheduler: DisplayScheduler,
        counter: StepCounter,
        buffer: LineBuffer<8>,
        registers: RegisterBank,
        demo: DemoState,
        out: TestOutput,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                scheduler: DisplayScheduler::new(),
                counter: StepCounter::new(),
                buffer: LineBuffer::new(),
                registers: RegisterBank::new(),
                demo: DemoState::new(1, DemoOptions::default()),
                out: TestOutput::new(),
            }
        }

        fn step(&mut self, steps: u32) {
            for _ in 0..steps {
                self.counter.increment();
            }
        }

        fn poll(&mut self) {
            self.scheduler.poll(
                &self.counter,
                &mut self.buffer,
                &mut self.registers,
                &mut self.demo,
                &mut self.out,
            );
        }
    }

    fn column(fill: u8) -> [u8; COLUMN_BYTES] {
        [fill; COLUMN_BYTES]
    }

    #[test]
    fn test_no_refresh_before_pixel_boundary() {
        let mut h = Harness::new();
        h.buffer.insert(&column(1)).unwrap();
        h.step(19); // one short of the 20-step whole pixel
        h.poll();
        assert!(h.out.columns.is_empty());
        assert_eq!(h.buffer.occupancy(), 1);
    }

    #[test]
    fn test_refresh_consumes_threshold_and_keeps_surplus() {
        let mut h = Harness::new();
        h.buffer.insert(&column(1)).unwrap();
        h.step(23);
        h.poll();
        assert_eq!(h.out.columns.len(), 1);
        assert_eq!(h.counter.count(), 3);
    }

    #[test]
    fn test_buffered_columns_pop_fifo() {
        let mut h = Harness::new();
        for fill in [0x11, 0x22, 0x33] {
            h.buffer.insert(&column(fill)).unwrap();
        }
        for _ in 0..3 {
            h.step(20);
            h.poll();
        }
        assert_eq!(h.out.columns.len(), 3);
        assert_eq!(h.out.columns[0], column(0x11));
        assert_eq!(h.out.columns[1], column(0x22));
        assert_eq!(h.out.columns[2], column(0x33));
    }

    #[test]
    fn test_bytes_shift_out_bottom_first() {
        let mut h = Harness::new();
        let mut ramp = [0u8; COLUMN_BYTES];
        for (i, byte) in ramp.iter_mut().enumerate() {
            *byte = i as u8;
        }
        h.buffer.insert(&ramp).unwrap();
        h.step(20);
        h.poll();

        let mut expected = ramp;
        expected.reverse();
        assert_eq!(h.out.columns[0], expected);
    }

    #[test]
    fn test_empty_buffer_falls_back_to_demo() {
        let mut h = Harness::new();
        h.step(20);
        h.poll();
        // First demo column is the PickRule blank
        assert_eq!(h.out.columns.len(), 1);
        assert_eq!(h.out.columns[0], BLANK_COLUMN);
        h.step(20);
        h.poll();
        assert_eq!(h.out.columns.len(), 2);
    }

    #[test]
    fn test_blanking_follows_duty_threshold() {
        let mut h = Harness::new();
        // Half duty: LEDs blank for the second half of each pixel
        h.registers.timing_mut().set_duty(0x0080);
        h.registers.timing_mut().commit();

        h.step(9);
        h.poll();
        assert!(!h.out.blanked);

        h.step(1); // 10 steps = duty threshold at half duty
        h.poll();
        assert!(h.out.blanked);
    }

    #[test]
    fn test_pending_timing_commits_at_boundary_only() {
        let mut h = Harness::new();
        h.registers.timing_mut().set_aspect(0x0200);
        h.step(10);
        h.poll();
        assert_eq!(h.registers.timing().width(), 8);

        h.step(10);
        h.poll(); // boundary crossed, new width takes effect
        assert_eq!(h.registers.timing().width(), 16);
        assert_eq!(h.registers.timing().width_threshold(), 40);
    }
}
