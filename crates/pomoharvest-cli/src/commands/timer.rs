use std::time::Duration;

use clap::Subcommand;
use pomoharvest_core::{Config, Session, TimerPhase};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a full session in the foreground, printing events as JSON
    Run {
        /// Session length in minutes (overrides config)
        #[arg(long)]
        minutes: Option<u32>,
        /// Session length in seconds (overrides --minutes)
        #[arg(long)]
        seconds: Option<u64>,
        /// Tick period in milliseconds; lower it for accelerated playback
        #[arg(long, default_value = "1000")]
        tick_ms: u64,
    },
    /// Print an idle snapshot for the configured session length
    Status,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();

    match action {
        TimerAction::Run {
            minutes,
            seconds,
            tick_ms,
        } => {
            let session_secs = seconds
                .or(minutes.map(|m| u64::from(m) * 60))
                .unwrap_or(u64::from(config.session.focus_minutes) * 60);
            let mut session = Session::with_day_source(
                session_secs,
                config.rewards.rules(),
                pomoharvest_core::SystemDaySource,
            );
            run_session(&mut session, tick_ms)?;
        }
        TimerAction::Status => {
            let session = Session::from_config(&config);
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        }
    }
    Ok(())
}

fn run_session(
    session: &mut Session,
    tick_ms: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        if let Some(event) = session.start() {
            println!("{}", serde_json::to_string_pretty(&event)?);
        }

        // The interval lives only as long as the running span; once the
        // phase leaves Running the loop exits and the interval is dropped,
        // so no periodic callback can outlive the session.
        {
            let mut ticker = tokio::time::interval(Duration::from_millis(tick_ms.max(1)));
            ticker.tick().await; // first tick resolves immediately
            while session.timer().phase() == TimerPhase::Running {
                ticker.tick().await;
                for event in session.tick() {
                    println!("{}", serde_json::to_string_pretty(&event)?);
                }
            }
        }

        println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
