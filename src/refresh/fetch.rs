use crate::gateway::Gateway;
use crate::state::SessionState;
use tokio::sync::Mutex;
use tracing::warn;

// Background-tier fetches: on failure the prior settled value stays in place
// and the error is logged, never surfaced as a user-visible message.

pub(crate) async fn fetch_profiles(gateway: &dyn Gateway, state: &Mutex<SessionState>) {
    match gateway.get_profiles().await {
        Ok(profiles) => state.lock().await.replace_profiles(profiles),
        Err(err) => warn!(error = %err, "failed to fetch profiles"),
    }
}

pub(crate) async fn fetch_statuses(gateway: &dyn Gateway, state: &Mutex<SessionState>) {
    match gateway.get_all_statuses().await {
        Ok(statuses) => state.lock().await.replace_statuses(statuses),
        Err(err) => warn!(error = %err, "failed to fetch statuses"),
    }
}

pub(crate) async fn fetch_environment(gateway: &dyn Gateway, state: &Mutex<SessionState>) {
    match gateway.get_environment().await {
        Ok(environment) => state.lock().await.environment = Some(environment),
        Err(err) => warn!(error = %err, "failed to fetch environment"),
    }
}

pub(crate) async fn fetch_settings(gateway: &dyn Gateway, state: &Mutex<SessionState>) {
    match gateway.get_settings().await {
        Ok(settings) => state.lock().await.settings = settings,
        Err(err) => warn!(error = %err, "failed to fetch settings"),
    }
}
