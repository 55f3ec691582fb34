//! Completion-reward ledger: harvest counts, pomodoro credit, streaks.
//!
//! The ledger consumes one `SessionCompleted` day at a time and decides, in a
//! single synchronous pass, how many pomodoros to credit and which popup to
//! surface. All day-gap decisions go through [`Day::delta_days`] against one
//! of two reference days:
//!
//! - `harvest_day` - which calendar day the current harvest count belongs to;
//! - `last_challenge_day` - the last day the daily challenge (reaching the
//!   per-day completion target) was achieved, the anchor for streak
//!   continuity.
//!
//! A streak is only ever broken by a non-consecutive gap measured against
//! `last_challenge_day`, never by merely completing fewer sessions on a day.

use serde::{Deserialize, Serialize};

use crate::day::Day;

/// Tunable thresholds for the reward rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RewardRules {
    /// Completions per day that count as the daily challenge.
    pub daily_challenge_target: u32,
    /// Consecutive challenge days before the streak bonus activates.
    pub streak_activation: u32,
}

impl Default for RewardRules {
    fn default() -> Self {
        Self {
            daily_challenge_target: 2,
            streak_activation: 3,
        }
    }
}

/// Which popup the presentation layer should show for a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Popup {
    /// Plain "session done" acknowledgement.
    Completion,
    /// Challenge day counted, but the streak has not reached activation yet.
    StreakInactive,
    /// Challenge day counted and the streak bonus is live.
    StreakActive,
}

/// The ledger's verdict on one completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    /// Pomodoros credited for this completion (1, or 1 + streak bonus).
    pub credited: u64,
    pub popup: Popup,
    pub harvest_count: u32,
    pub streak_count: u32,
    pub streak_active: bool,
    pub total_pomodoros: u64,
}

/// Per-day harvest, cumulative credit, and cross-day streak state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardLedger {
    rules: RewardRules,
    /// Day the current harvest count belongs to.
    harvest_day: Option<Day>,
    /// Sessions completed on `harvest_day`. Resets to 1 (never 0) when a
    /// completion lands on a new day.
    harvest_count: u32,
    /// Cumulative credit. Monotonically non-decreasing.
    total_pomodoros: u64,
    /// Last day the daily challenge was achieved.
    last_challenge_day: Option<Day>,
    /// Consecutive challenge days ending at `last_challenge_day`.
    streak_count: u32,
    /// True once `streak_count` reaches the activation threshold; cleared
    /// only when a break is detected.
    streak_active: bool,
}

impl RewardLedger {
    pub fn new() -> Self {
        Self::with_rules(RewardRules::default())
    }

    pub fn with_rules(rules: RewardRules) -> Self {
        Self {
            rules,
            harvest_day: None,
            harvest_count: 0,
            total_pomodoros: 0,
            last_challenge_day: None,
            streak_count: 0,
            streak_active: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn harvest_count(&self) -> u32 {
        self.harvest_count
    }

    pub fn total_pomodoros(&self) -> u64 {
        self.total_pomodoros
    }

    pub fn streak_count(&self) -> u32 {
        self.streak_count
    }

    pub fn streak_active(&self) -> bool {
        self.streak_active
    }

    pub fn last_challenge_day(&self) -> Option<Day> {
        self.last_challenge_day
    }

    // ── State machine ────────────────────────────────────────────────

    /// Record one completed session on `day` and return the verdict.
    ///
    /// Runs the full decision in one pass: harvest update first, then award
    /// and popup selection against the just-updated count.
    pub fn on_session_completed(&mut self, day: Day) -> Reward {
        // Step 1: harvest update. The very first completion ever is treated
        // as a new day even if a stale harvest_day were present.
        let new_day = self.total_pomodoros == 0
            || self.harvest_day.map_or(true, |d| d != day);
        if new_day {
            self.harvest_count = 1;
            self.harvest_day = Some(day);
        } else {
            self.harvest_count += 1;
        }

        // Step 2: award and popup, branching on the updated count.
        let (credited, popup) = if self.harvest_count == 1 {
            self.first_of_day(day)
        } else if self.harvest_count < self.rules.daily_challenge_target {
            (1, Popup::Completion)
        } else if self.harvest_count == self.rules.daily_challenge_target {
            self.complete_daily_challenge(day)
        } else {
            // Past the challenge threshold: flat credit, plus the streak
            // bonus while the streak is live. Unbounded per day.
            let bonus = if self.streak_active {
                u64::from(self.streak_count)
            } else {
                0
            };
            (1 + bonus, Popup::Completion)
        };

        self.total_pomodoros += credited;
        Reward {
            credited,
            popup,
            harvest_count: self.harvest_count,
            streak_count: self.streak_count,
            streak_active: self.streak_active,
            total_pomodoros: self.total_pomodoros,
        }
    }

    /// First completion of a day: the one place a streak can break.
    ///
    /// A gap of exactly 1 against the last challenge day carries the streak
    /// forward untouched; any other gap clears the streak state entirely and
    /// the completion is credited flat.
    fn first_of_day(&mut self, day: Day) -> (u64, Popup) {
        if let Some(last) = self.last_challenge_day {
            if day.delta_days(last) != 1 {
                self.streak_active = false;
                self.streak_count = 0;
                self.last_challenge_day = None;
            }
        }
        (1, Popup::Completion)
    }

    /// The harvest count just reached the daily challenge target.
    fn complete_daily_challenge(&mut self, day: Day) -> (u64, Popup) {
        let Some(last) = self.last_challenge_day else {
            // First-ever challenge: the streak starts counting, but no
            // streak popup yet.
            self.last_challenge_day = Some(day);
            self.streak_count = 1;
            return (1, Popup::Completion);
        };

        if day.delta_days(last) != 1 {
            // Normally unreachable: a non-consecutive gap is caught at the
            // first completion of the day, which clears last_challenge_day.
            // Kept so the restart-at-1 invariant holds even for callers that
            // feed challenge completions directly.
            self.streak_count = 1;
            self.streak_active = false;
            self.last_challenge_day = Some(day);
            return (1, Popup::Completion);
        }

        self.streak_count += 1;
        self.last_challenge_day = Some(day);
        if self.streak_count >= self.rules.streak_activation {
            self.streak_active = true;
            (1 + u64::from(self.streak_count), Popup::StreakActive)
        } else {
            (1, Popup::StreakInactive)
        }
    }
}

impl Default for RewardLedger {
    fn default() -> Self {
        Self::new()
    }
}
