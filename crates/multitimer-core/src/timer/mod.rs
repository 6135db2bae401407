mod engine;
mod phase;

pub use engine::{Timer, TICK};
pub use phase::{CycleLimit, Phase, TimerConfig};
