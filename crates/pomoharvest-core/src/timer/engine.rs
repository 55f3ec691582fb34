//! Countdown engine implementation.
//!
//! The countdown is a tick-driven state machine. It has no internal thread -
//! the caller owns the periodic tick source and invokes [`CountdownTimer::tick`]
//! once per elapsed second.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused | Completed) -> Idle
//! ```
//!
//! Completion is an explicit phase, not a flag: the tick that lands on zero
//! transitions `Running -> Completed`, and every further tick is a no-op, so a
//! tick source that fires once more before being torn down cannot produce a
//! second completion.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Phase was not Running; nothing changed.
    Ignored,
    /// One second elapsed, session still in progress.
    Counted { remaining_secs: u64 },
    /// This tick landed on zero: the one completion of this run.
    Completed,
}

/// Core countdown state machine.
///
/// Commands return `Option<Event>`; `None` means the command was invalid in
/// the current phase and was ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownTimer {
    /// Configured session length in seconds.
    session_secs: u64,
    remaining_secs: u64,
    phase: TimerPhase,
}

impl CountdownTimer {
    /// Create a timer for a session of `session_secs` seconds, in `Idle`.
    pub fn new(session_secs: u64) -> Self {
        Self {
            session_secs,
            remaining_secs: session_secs,
            phase: TimerPhase::Idle,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn session_secs(&self) -> u64 {
        self.session_secs
    }

    /// Remaining time as `MM:SS`.
    pub fn clock(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_secs / 60,
            self.remaining_secs % 60
        )
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin or resume the countdown. Valid from `Idle` and `Paused`;
    /// starting an already-running or completed timer is a no-op.
    pub fn start(&mut self) -> Option<Event> {
        match self.phase {
            TimerPhase::Idle => {
                self.phase = TimerPhase::Running;
                Some(Event::TimerStarted {
                    duration_secs: self.session_secs,
                    at: Utc::now(),
                })
            }
            TimerPhase::Paused => {
                self.phase = TimerPhase::Running;
                Some(Event::TimerResumed {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            TimerPhase::Running | TimerPhase::Completed => None,
        }
    }

    /// Pause the countdown, preserving the remaining time.
    pub fn pause(&mut self) -> Option<Event> {
        match self.phase {
            TimerPhase::Running => {
                self.phase = TimerPhase::Paused;
                Some(Event::TimerPaused {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Restore the configured length and return to `Idle`. Valid from any
    /// phase; this is the only way out of `Completed`.
    pub fn reset(&mut self) -> Option<Event> {
        self.phase = TimerPhase::Idle;
        self.remaining_secs = self.session_secs;
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Advance the countdown by one second.
    ///
    /// Returns [`Tick::Completed`] exactly once per run-to-completion, on the
    /// tick whose decrement lands on zero. That tick also moves the phase to
    /// `Completed`, so the caller's tick source can (and must) stop.
    pub fn tick(&mut self) -> Tick {
        if self.phase != TimerPhase::Running {
            return Tick::Ignored;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.phase = TimerPhase::Completed;
            Tick::Completed
        } else {
            Tick::Counted {
                remaining_secs: self.remaining_secs,
            }
        }
    }
}
