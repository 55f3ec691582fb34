pub mod config;
pub mod simulate;
pub mod timer;
