use super::fetch::fetch_statuses;
use crate::gateway::Gateway;
use crate::state::SessionState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Statuses change continuously (expiration countdown); profile identities
/// only change on settings updates. The poll therefore re-fetches statuses
/// alone.
pub(crate) const STATUS_POLL_PERIOD: Duration = Duration::from_secs(30);

/// Handle to the recurring status poll. Dropping it leaves the task running;
/// `stop` is the single teardown point.
pub struct PollHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn stop(self) {
        let _ = self.stop_tx.send(true);
        self.task.abort();
    }
}

pub(crate) fn spawn_status_poll(
    gateway: Arc<dyn Gateway>,
    state: Arc<Mutex<SessionState>>,
    period: Duration,
) -> PollHandle {
    let (stop_tx, mut stop_rx) = watch::channel(false);
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately; startup already fetched.
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = ticker.tick() => fetch_statuses(gateway.as_ref(), &state).await,
                _ = stop_rx.changed() => break,
            }
        }
    });
    PollHandle { stop_tx, task }
}
