//! Session controller: countdown + ledger behind one surface.
//!
//! `Session` is what a frontend talks to. It forwards the three user actions
//! to the countdown, and on the completing tick it reads the current day from
//! the injected [`DaySource`] and settles the reward in the same call, so
//! popup selection always observes the just-updated counters.
//!
//! The session is caller-driven like the countdown itself: whoever owns the
//! periodic tick source must stop it once the phase leaves `Running` (the CLI
//! run loop scopes its interval to exactly that span).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::day::{DaySource, SystemDaySource};
use crate::events::Event;
use crate::rewards::{Popup, RewardLedger, RewardRules};
use crate::timer::{CountdownTimer, Tick, TimerPhase};

/// Read-only derived state for the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Remaining time as `MM:SS`.
    pub clock: String,
    pub phase: TimerPhase,
    pub remaining_secs: u64,
    pub harvest_count: u32,
    pub total_pomodoros: u64,
    pub streak_count: u32,
    pub streak_active: bool,
    pub pending_popup: Option<Popup>,
    pub at: DateTime<Utc>,
}

/// Countdown engine and reward ledger wired together.
pub struct Session<D: DaySource = SystemDaySource> {
    timer: CountdownTimer,
    ledger: RewardLedger,
    days: D,
    pending_popup: Option<Popup>,
}

impl Session<SystemDaySource> {
    /// Session of `session_secs` seconds with default reward rules, on the
    /// real calendar.
    pub fn new(session_secs: u64) -> Self {
        Self::with_day_source(session_secs, RewardRules::default(), SystemDaySource)
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_day_source(
            u64::from(config.session.focus_minutes) * 60,
            config.rewards.rules(),
            SystemDaySource,
        )
    }
}

impl<D: DaySource> Session<D> {
    pub fn with_day_source(session_secs: u64, rules: RewardRules, days: D) -> Self {
        Self {
            timer: CountdownTimer::new(session_secs),
            ledger: RewardLedger::with_rules(rules),
            days,
            pending_popup: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    pub fn ledger(&self) -> &RewardLedger {
        &self.ledger
    }

    pub fn pending_popup(&self) -> Option<Popup> {
        self.pending_popup
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            clock: self.timer.clock(),
            phase: self.timer.phase(),
            remaining_secs: self.timer.remaining_secs(),
            harvest_count: self.ledger.harvest_count(),
            total_pomodoros: self.ledger.total_pomodoros(),
            streak_count: self.ledger.streak_count(),
            streak_active: self.ledger.streak_active(),
            pending_popup: self.pending_popup,
            at: Utc::now(),
        }
    }

    // ── User actions ─────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.timer.start()
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.timer.pause()
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.timer.reset()
    }

    pub fn dismiss_popup(&mut self) -> Option<Popup> {
        self.pending_popup.take()
    }

    /// Advance the countdown by one second.
    ///
    /// On the completing tick the reward is settled synchronously against
    /// today's date and both events come back together, in order.
    pub fn tick(&mut self) -> Vec<Event> {
        match self.timer.tick() {
            Tick::Completed => {
                let day = self.days.today();
                let reward = self.ledger.on_session_completed(day);
                self.pending_popup = Some(reward.popup);
                vec![
                    Event::SessionCompleted {
                        day,
                        at: Utc::now(),
                    },
                    Event::RewardGranted {
                        credited: reward.credited,
                        total_pomodoros: reward.total_pomodoros,
                        harvest_count: reward.harvest_count,
                        streak_count: reward.streak_count,
                        streak_active: reward.streak_active,
                        popup: reward.popup,
                        at: Utc::now(),
                    },
                ]
            }
            Tick::Counted { .. } | Tick::Ignored => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::{Day, FixedDaySource};

    fn day(n: u32) -> Day {
        Day::from_ymd(2025, 3, n).unwrap()
    }

    fn session(secs: u64, start_day: Day) -> (Session<FixedDaySource>, FixedDaySource) {
        let source = FixedDaySource::new(start_day);
        let session = Session::with_day_source(secs, RewardRules::default(), source.clone());
        (session, source)
    }

    fn run_to_completion(session: &mut Session<FixedDaySource>) -> Vec<Event> {
        session.reset();
        session.start();
        loop {
            let events = session.tick();
            if !events.is_empty() {
                return events;
            }
        }
    }

    #[test]
    fn completion_emits_session_and_reward_events() {
        let (mut session, _) = session(3, day(1));
        session.start();
        assert!(session.tick().is_empty());
        assert!(session.tick().is_empty());
        let events = session.tick();
        assert!(matches!(events[0], Event::SessionCompleted { .. }));
        assert!(matches!(
            events[1],
            Event::RewardGranted { credited: 1, .. }
        ));
        assert_eq!(session.timer().phase(), TimerPhase::Completed);
        assert_eq!(session.pending_popup(), Some(Popup::Completion));
    }

    #[test]
    fn popup_dismissal_clears_pending_state() {
        let (mut session, _) = session(1, day(1));
        session.start();
        session.tick();
        assert_eq!(session.dismiss_popup(), Some(Popup::Completion));
        assert_eq!(session.pending_popup(), None);
        assert_eq!(session.dismiss_popup(), None);
    }

    #[test]
    fn reset_and_rerun_reproduces_award_behavior() {
        let (mut session, _) = session(2, day(1));
        run_to_completion(&mut session);
        assert_eq!(session.ledger().total_pomodoros(), 1);

        // Same day, second run: the daily challenge, still credited 1.
        run_to_completion(&mut session);
        assert_eq!(session.ledger().total_pomodoros(), 2);
        assert_eq!(session.ledger().harvest_count(), 2);
        assert_eq!(session.ledger().streak_count(), 1);
        assert_eq!(session.pending_popup(), Some(Popup::Completion));
    }

    #[test]
    fn multi_day_streak_through_full_sessions() {
        let (mut session, days) = session(2, day(1));
        // Two sessions a day for three days.
        for d in 1..=3u32 {
            days.set(day(d));
            run_to_completion(&mut session);
            let events = run_to_completion(&mut session);
            if d == 3 {
                assert!(matches!(
                    events[1],
                    Event::RewardGranted {
                        credited: 4,
                        streak_active: true,
                        ..
                    }
                ));
                assert_eq!(session.pending_popup(), Some(Popup::StreakActive));
            }
        }
        assert_eq!(session.ledger().streak_count(), 3);
        // 5 flat credits + day-3 activation's 4.
        assert_eq!(session.ledger().total_pomodoros(), 9);

        // Two days idle, then a completion: streak gone.
        days.set(day(5));
        run_to_completion(&mut session);
        assert_eq!(session.ledger().streak_count(), 0);
        assert!(!session.ledger().streak_active());
        assert_eq!(session.ledger().last_challenge_day(), None);
    }

    #[test]
    fn snapshot_reflects_timer_and_ledger() {
        let (mut session, _) = session(90, day(1));
        let snap = session.snapshot();
        assert_eq!(snap.clock, "01:30");
        assert_eq!(snap.phase, TimerPhase::Idle);
        assert_eq!(snap.total_pomodoros, 0);

        session.start();
        session.tick();
        let snap = session.snapshot();
        assert_eq!(snap.clock, "01:29");
        assert_eq!(snap.phase, TimerPhase::Running);
        assert!(snap.pending_popup.is_none());
    }
}
