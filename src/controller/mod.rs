use crate::gateway::Gateway;
use crate::refresh::{
    fetch_environment, fetch_profiles, fetch_settings, fetch_statuses, spawn_status_poll,
    PollHandle, STATUS_POLL_PERIOD,
};
use crate::state::SessionState;
use crate::store::LocalStore;
use crate::theme::ThemeManager;
use crate::types::LoginRequest;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};

mod settings;

/// Fixed relative destination the companion executable writes to.
pub const EXPORT_ENV_PATH: &str = "./aws.env";

const EMPTY_TOKEN_ERROR: &str = "Please enter your MFA token code";
const GENERIC_AUTH_ERROR: &str = "Authentication failed";

/// Owns all client-side session state and drives it against the gateway.
/// `init` arms the status poll and the theme subscription; `teardown` stops
/// both exactly once and is safe to call when `init` never ran.
pub struct SessionController {
    gateway: Arc<dyn Gateway>,
    state: Arc<Mutex<SessionState>>,
    theme: ThemeManager,
    poll: Option<PollHandle>,
}

impl SessionController {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        store: LocalStore,
        os_dark_signal: watch::Receiver<bool>,
    ) -> Self {
        Self {
            gateway,
            state: Arc::new(Mutex::new(SessionState::new())),
            theme: ThemeManager::new(store, os_dark_signal),
            poll: None,
        }
    }

    /// Startup order matters: theme first so the first render resolves
    /// correctly, then environment and settings, then the initial data load.
    pub async fn init(&mut self) {
        self.theme.init();
        fetch_environment(self.gateway.as_ref(), &self.state).await;
        fetch_settings(self.gateway.as_ref(), &self.state).await;
        self.refresh_all().await;
        if self.poll.is_none() {
            self.poll = Some(spawn_status_poll(
                self.gateway.clone(),
                self.state.clone(),
                STATUS_POLL_PERIOD,
            ));
        }
    }

    pub fn teardown(&mut self) {
        if let Some(poll) = self.poll.take() {
            poll.stop();
        }
        self.theme.teardown();
    }

    pub async fn refresh_all(&self) {
        tokio::join!(
            fetch_profiles(self.gateway.as_ref(), &self.state),
            fetch_statuses(self.gateway.as_ref(), &self.state),
        );
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    pub fn theme(&self) -> &ThemeManager {
        &self.theme
    }

    pub async fn select_profile(&self, name: &str) {
        self.state.lock().await.selected_profile = name.to_string();
    }

    pub async fn set_token_code(&self, code: &str) {
        self.state.lock().await.token_code = code.to_string();
    }

    pub async fn dismiss_error(&self) {
        self.state.lock().await.error = None;
    }

    pub async fn dismiss_success(&self) {
        self.state.lock().await.success = None;
    }

    pub async fn close_credentials(&self) {
        self.state.lock().await.credentials = None;
    }

    /// Submits the MFA exchange for the selected profile. An empty token code
    /// is rejected locally without touching the gateway.
    pub async fn login(&self) {
        let (profile, token_code) = {
            let mut state = self.state.lock().await;
            if state.token_code.trim().is_empty() {
                state.set_error(EMPTY_TOKEN_ERROR);
                return;
            }
            state.loading = true;
            state.error = None;
            state.success = None;
            (state.selected_profile.clone(), state.token_code.clone())
        };

        let request = LoginRequest {
            profile: profile.clone(),
            token_code,
            duration: None,
        };
        match self.gateway.login(&request).await {
            Ok(_) => {
                {
                    let mut state = self.state.lock().await;
                    state.set_success(format!("Successfully authenticated profile: {profile}"));
                    state.token_code.clear();
                }
                // Reflect the new expiration right away instead of waiting
                // for the next poll tick.
                fetch_statuses(self.gateway.as_ref(), &self.state).await;
            }
            Err(err) => {
                let message = err
                    .auth_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| GENERIC_AUTH_ERROR.to_string());
                self.state.lock().await.set_error(message);
            }
        }
        self.state.lock().await.loading = false;
    }

    /// Fetches and replaces the in-memory credentials, tagging them with the
    /// requested profile. On failure the currently displayed credentials are
    /// left alone.
    pub async fn view_credentials(&self, profile: &str) {
        match self.gateway.get_credentials(profile).await {
            Ok(mut credentials) => {
                credentials.profile = Some(profile.to_string());
                self.state.lock().await.credentials = Some(credentials);
            }
            Err(_) => {
                self.state.lock().await.set_error("Failed to fetch credentials");
            }
        }
    }

    pub async fn clear_credentials(&self, profile: &str) {
        match self.gateway.clear_credentials(Some(profile)).await {
            Ok(()) => {
                self.state
                    .lock()
                    .await
                    .set_success(format!("Cleared credentials for: {profile}"));
                fetch_statuses(self.gateway.as_ref(), &self.state).await;
                self.state.lock().await.drop_credentials_for(profile);
            }
            Err(_) => {
                self.state.lock().await.set_error("Failed to clear credentials");
            }
        }
    }

    /// No-op when no credentials are displayed.
    pub async fn copy_env_to_clipboard(&self) {
        let Some(credentials) = self.state.lock().await.credentials.clone() else {
            return;
        };
        match self.gateway.copy_to_clipboard(&credentials.env_exports()).await {
            Ok(()) => {
                self.state
                    .lock()
                    .await
                    .set_success("Credentials copied to clipboard!");
            }
            Err(_) => {
                self.state.lock().await.set_error("Failed to copy credentials");
            }
        }
    }

    pub async fn export_env_file(&self, profile: &str) {
        match self.gateway.export_env_file(profile, EXPORT_ENV_PATH).await {
            Ok(()) => {
                self.state
                    .lock()
                    .await
                    .set_success(format!("Exported to {EXPORT_ENV_PATH} in current directory"));
            }
            Err(_) => {
                self.state.lock().await.set_error("Failed to export env file");
            }
        }
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.teardown();
    }
}
