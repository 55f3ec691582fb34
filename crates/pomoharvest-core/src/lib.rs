//! # Pomoharvest Core Library
//!
//! Core business logic for Pomoharvest, a gamified Pomodoro timer: a
//! countdown engine plus a completion-reward ledger that tracks per-day
//! "harvest" counts, cumulative pomodoro credit, and a multi-day streak with
//! an activation threshold.
//!
//! ## Architecture
//!
//! - **Countdown engine**: a tick-driven state machine; the caller owns the
//!   periodic tick source and invokes `tick()` once per second while running.
//!   Completion is an explicit phase transition, so one run yields exactly
//!   one completion no matter how often the source fires.
//! - **Reward ledger**: consumes completions tagged with a calendar day and
//!   settles credit, harvest, and streak state in one synchronous pass.
//! - **Session**: wires the two together behind a snapshot surface for a
//!   frontend, with the current-day source injectable for tests.
//!
//! ## Key Components
//!
//! - [`CountdownTimer`]: countdown state machine
//! - [`RewardLedger`]: harvest/credit/streak rules
//! - [`Session`]: engine + ledger behind one snapshot surface
//! - [`Config`]: TOML configuration for session length and reward thresholds

pub mod config;
pub mod day;
pub mod error;
pub mod events;
pub mod rewards;
pub mod session;
pub mod timer;

pub use config::Config;
pub use day::{Day, DaySource, FixedDaySource, SystemDaySource};
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use events::Event;
pub use rewards::{Popup, Reward, RewardLedger, RewardRules};
pub use session::{Session, SessionSnapshot};
pub use timer::{CountdownTimer, Tick, TimerPhase};
