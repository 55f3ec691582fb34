use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::day::Day;
use crate::rewards::Popup;

/// Every state change in the system produces an Event.
/// The presentation layer consumes these; the CLI prints them as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// A countdown ran to zero. Fires exactly once per run.
    SessionCompleted {
        day: Day,
        at: DateTime<Utc>,
    },
    /// The ledger's verdict on a completed session.
    RewardGranted {
        credited: u64,
        total_pomodoros: u64,
        harvest_count: u32,
        streak_count: u32,
        streak_active: bool,
        popup: Popup,
        at: DateTime<Utc>,
    },
}
