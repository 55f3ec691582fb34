mod engine;

pub use engine::{CountdownTimer, Tick, TimerPhase};
