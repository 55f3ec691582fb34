//! Ledger simulator: replay a completion plan without waiting out real
//! sessions. This is the injectable-day test harness exposed as a command.
//!
//! Plan grammar: comma-separated entries of `<day>[xN]`, where `<day>` is an
//! absolute `YYYY-MM-DD` or `+K` (K days after the previous entry's day) and
//! `N` is the number of completions on that day (default 1). The first entry
//! must be absolute.
//!
//! Example: `2025-03-01x2,+1x2,+1x2,+3x1` builds a three-day streak and then
//! breaks it.

use chrono::Utc;
use clap::Args;
use pomoharvest_core::{Config, Day, Event, RewardLedger};

#[derive(Args)]
pub struct SimulateArgs {
    /// Completion plan, e.g. `2025-03-01x2,+1x2,+1x2`
    #[arg(long)]
    plan: String,
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut ledger = RewardLedger::with_rules(config.rewards.rules());

    for (day, completions) in parse_plan(&args.plan)? {
        for _ in 0..completions {
            let reward = ledger.on_session_completed(day);
            let event = Event::RewardGranted {
                credited: reward.credited,
                total_pomodoros: reward.total_pomodoros,
                harvest_count: reward.harvest_count,
                streak_count: reward.streak_count,
                streak_active: reward.streak_active,
                popup: reward.popup,
                at: Utc::now(),
            };
            println!("{day} {}", serde_json::to_string(&event)?);
        }
    }
    Ok(())
}

fn parse_plan(plan: &str) -> Result<Vec<(Day, u32)>, Box<dyn std::error::Error>> {
    let mut entries = Vec::new();
    let mut previous: Option<Day> = None;

    for raw in plan.split(',') {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let (day_part, count_part) = match raw.split_once('x') {
            Some((d, n)) => (d, Some(n)),
            None => (raw, None),
        };
        let completions: u32 = match count_part {
            Some(n) => n
                .parse()
                .map_err(|_| format!("bad completion count in plan entry '{raw}'"))?,
            None => 1,
        };

        let day = if let Some(offset) = day_part.strip_prefix('+') {
            let days: u64 = offset
                .parse()
                .map_err(|_| format!("bad day offset in plan entry '{raw}'"))?;
            previous
                .ok_or("plan must start with an absolute YYYY-MM-DD entry")?
                .plus_days(days)
        } else {
            Day::parse(day_part)?
        };

        previous = Some(day);
        entries.push((day, completions));
    }

    if entries.is_empty() {
        return Err("empty plan".into());
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_absolute_and_relative_entries() {
        let plan = parse_plan("2025-03-01x2,+1x2,+3").unwrap();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0], (Day::parse("2025-03-01").unwrap(), 2));
        assert_eq!(plan[1], (Day::parse("2025-03-02").unwrap(), 2));
        assert_eq!(plan[2], (Day::parse("2025-03-05").unwrap(), 1));
    }

    #[test]
    fn relative_first_entry_is_rejected() {
        assert!(parse_plan("+1x2").is_err());
    }

    #[test]
    fn malformed_entries_are_rejected() {
        assert!(parse_plan("2025-03-01xtwo").is_err());
        assert!(parse_plan("not-a-day").is_err());
        assert!(parse_plan("").is_err());
    }
}
