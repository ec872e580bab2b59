//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod host_rx;
pub mod pipeline;
pub mod rotor;

pub use host_rx::host_rx_task;
pub use pipeline::pipeline_task;
pub use rotor::rotor_task;
