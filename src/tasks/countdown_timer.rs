//! Countdown ticker background task

use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::{CountdownEngine, TickStep};

/// Background task that decrements the countdown once per tick.
///
/// Spawned by [`CountdownEngine::start`] when no ticker is alive. The first
/// tick happens immediately. The task exits once it observes the countdown
/// stopped, or after running the trigger action at zero.
pub async fn countdown_timer_task(engine: CountdownEngine) {
    debug!("Starting countdown ticker");

    let mut interval = interval(engine.tick_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let step = match engine.advance() {
            Ok(step) => step,
            Err(e) => {
                error!("Countdown ticker stopping: {}", e);
                break;
            }
        };

        match step {
            TickStep::Continue => {}
            TickStep::Halt => break,
            TickStep::Fire { cycle } => {
                let outcome = engine.action().run().await;
                if outcome.success {
                    info!("Trigger action succeeded");
                } else {
                    error!("Trigger action failed: {}", outcome.detail);
                }

                if let Err(e) = engine.record_outcome(cycle, outcome) {
                    error!("Failed to record trigger outcome: {}", e);
                }
                break;
            }
        }
    }

    debug!("Countdown ticker exited");
}
