//! Top-level controller state.
//!
//! Owns the line buffer, register bank, command engine, scheduler and demo
//! generator, and wires them together behind two poll entry points so the
//! firmware main loop stays a handful of lines.

use crate::buffer::LineBuffer;
use crate::config::{DemoOptions, BUFFER_SLOTS};
use crate::counter::StepCounter;
use crate::demo::DemoState;
use crate::engine::CommandEngine;
use crate::registers::RegisterBank;
use crate::scheduler::DisplayScheduler;
use crate::traits::{ColumnOutput, HostLink};

/// The whole display controller, minus the hardware
pub struct Controller<const N: usize = BUFFER_SLOTS> {
    buffer: LineBuffer<N>,
    registers: RegisterBank,
    engine: CommandEngine,
    scheduler: DisplayScheduler,
    demo: DemoState,
}

impl<const N: usize> Controller<N> {
    pub fn new(seed: u32, options: DemoOptions) -> Self {
        Self {
            buffer: LineBuffer::new(),
            registers: RegisterBank::new(),
            engine: CommandEngine::new(),
            scheduler: DisplayScheduler::new(),
            demo: DemoState::new(seed, options),
        }
    }

    /// Advance the host protocol by one cooperative slice
    pub fn poll_protocol<L: HostLink>(&mut self, link: &mut L) {
        self.engine
            .poll(link, &mut self.buffer, &mut self.registers);
    }

    /// Advance the display pipeline against the accumulated step count
    pub fn poll_display<O: ColumnOutput>(&mut self, counter: &StepCounter, out: &mut O) {
        self.scheduler.poll(
            counter,
            &mut self.buffer,
            &mut self.registers,
            &mut self.demo,
            out,
        );
    }

}
