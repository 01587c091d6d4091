use super::SessionController;
use crate::labels::credential_source_label;
use crate::refresh::{fetch_environment, fetch_profiles};
use crate::types::{CredentialSource, Settings};

const SETTINGS_UPDATE_ERROR: &str = "Failed to update settings";

impl SessionController {
    /// Switches the credential source to a non-custom strategy. The full
    /// settings object is sent (spread-merge over the current value) and the
    /// backend's returned settings are adopted verbatim. Profile discovery
    /// depends on the source, so environment and profiles are re-fetched.
    pub async fn set_credential_source(&self, source: CredentialSource) {
        let merged = {
            let mut state = self.state.lock().await;
            state.settings_loading = true;
            Settings {
                credential_source: source.clone(),
                ..state.settings.clone()
            }
        };

        match self.gateway.update_settings(&merged).await {
            Ok(updated) => {
                self.state.lock().await.settings = updated;
                fetch_environment(self.gateway.as_ref(), &self.state).await;
                fetch_profiles(self.gateway.as_ref(), &self.state).await;
                let label = credential_source_label(&source).to_string();
                self.state
                    .lock()
                    .await
                    .set_success(format!("Credential source set to: {label}"));
            }
            Err(_) => {
                self.state.lock().await.set_error(SETTINGS_UPDATE_ERROR);
            }
        }
        self.state.lock().await.settings_loading = false;
    }

    /// Switches to explicit config/credentials paths. Path presence is the
    /// backend's concern; whatever was supplied rides along with
    /// `credential_source: custom`. Environment detection is irrelevant once
    /// paths are explicit, so only profiles are re-fetched.
    pub async fn set_custom_credential_source(
        &self,
        config_path: Option<String>,
        creds_path: Option<String>,
    ) {
        let merged = {
            let mut state = self.state.lock().await;
            state.settings_loading = true;
            Settings {
                credential_source: CredentialSource::Custom,
                custom_config_path: config_path,
                custom_creds_path: creds_path,
            }
        };

        match self.gateway.update_settings(&merged).await {
            Ok(updated) => {
                self.state.lock().await.settings = updated;
                fetch_profiles(self.gateway.as_ref(), &self.state).await;
                let label = credential_source_label(&CredentialSource::Custom).to_string();
                self.state
                    .lock()
                    .await
                    .set_success(format!("Credential source set to: {label}"));
            }
            Err(_) => {
                self.state.lock().await.set_error(SETTINGS_UPDATE_ERROR);
            }
        }
        self.state.lock().await.settings_loading = false;
    }
}
