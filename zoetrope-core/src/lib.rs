//! Board-agnostic core logic for the Zoetrope POV display controller
//!
//! This crate contains all display-pipeline logic that does not depend on
//! specific hardware implementations:
//!
//! - Display geometry and timing constants
//! - Bounded circular line buffer
//! - Control register bank with fixed-point pixel timing
//! - Step counter shared with the rotation tick
//! - Display scheduler (step counts → pixel refreshes)
//! - Command protocol engine (host byte stream → buffer/register mutations)
//! - Fallback cellular-automaton demo generator
//! - Hardware boundary traits (host link, column output)

#![no_std]
#![deny(unsafe_code)]

pub mod assets;
pub mod buffer;
pub mod column;
pub mod config;
pub mod counter;
pub mod demo;
pub mod engine;
pub mod registers;
pub mod rng;
pub mod scheduler;
pub mod timing;
pub mod traits;

mod controller;

pub use buffer::{BufferFull, LineBuffer};
pub use column::{Column, BLANK_COLUMN};
pub use config::DemoOptions;
pub use controller::Controller;
pub use counter::StepCounter;
pub use demo::{DemoPhase, DemoState};
pub use engine::{CommandEngine, EngineState};
pub use registers::RegisterBank;
pub use scheduler::DisplayScheduler;
pub use timing::PixelTiming;
pub use traits::{ColumnOutput, HostLink};
