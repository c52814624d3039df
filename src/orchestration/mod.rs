//! Application state and startup sequencing.

pub mod loader;
pub mod simulator;

pub use loader::{load_simulator, LoadError};
pub use simulator::{SegmentSummary, Simulator};
