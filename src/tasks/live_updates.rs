//! Live-update producer for push subscribers

use futures::stream::{self, Stream};
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, warn};

use crate::state::{CountdownEngine, LiveUpdate};

/// Logs when a subscriber goes away; lives as long as its stream
struct Subscription {
    engine: CountdownEngine,
    interval: Interval,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        debug!("Live update subscriber disconnected");
    }
}

/// Endless stream of `{running, current_time}` pulled from `engine`.
///
/// The first update is produced immediately, then one per push interval.
/// Only ends if the timer lock is poisoned or the consumer drops it.
pub fn live_updates(engine: CountdownEngine) -> impl Stream<Item = LiveUpdate> + Send + 'static {
    let mut ticker = interval(engine.push_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    debug!("Live update subscriber connected");

    stream::unfold(
        Subscription { engine, interval: ticker },
        |mut sub| async move {
            sub.interval.tick().await;
            match sub.engine.snapshot() {
                Ok(snapshot) => Some((LiveUpdate::from(&snapshot), sub)),
                Err(e) => {
                    warn!("Ending live updates: {}", e);
                    None
                }
            }
        },
    )
}
