use crate::types::{
    Credentials, EnvironmentInfo, LoginRequest, Profile, ProfileStatus, Settings,
};
use async_trait::async_trait;
use thiserror::Error;

mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use http::HttpBackend;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("network error")]
    Network(#[from] reqwest::Error),
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Auth(String),
    #[error("backend error ({status})")]
    Backend { status: u16 },
    #[error("clipboard unavailable")]
    Clipboard,
    #[error("export failed: {0}")]
    Export(String),
}

impl GatewayError {
    /// The human-readable MFA failure message, when the backend produced one.
    pub fn auth_message(&self) -> Option<&str> {
        match self {
            Self::Auth(message) => Some(message),
            _ => None,
        }
    }
}

/// Request/response contract to the extension backend. All calls settle or
/// fail; nothing here streams, retries, or times out on its own.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn get_profiles(&self) -> Result<Vec<Profile>, GatewayError>;

    /// `None` when the backend does not know the profile.
    async fn get_status(&self, profile: &str) -> Result<Option<ProfileStatus>, GatewayError>;

    async fn get_all_statuses(&self) -> Result<Vec<ProfileStatus>, GatewayError>;

    /// Performs the MFA exchange. Auth failures carry the backend's message
    /// verbatim in [`GatewayError::Auth`].
    async fn login(&self, request: &LoginRequest) -> Result<ProfileStatus, GatewayError>;

    async fn get_credentials(&self, profile: &str) -> Result<Credentials, GatewayError>;

    /// `None` clears every profile's stored credentials. Idempotent.
    async fn clear_credentials(&self, profile: Option<&str>) -> Result<(), GatewayError>;

    async fn get_environment(&self) -> Result<EnvironmentInfo, GatewayError>;

    async fn get_settings(&self) -> Result<Settings, GatewayError>;

    /// Returns the authoritative post-write settings.
    async fn update_settings(&self, settings: &Settings) -> Result<Settings, GatewayError>;

    /// Materializes credentials into an env file via the companion executable.
    async fn export_env_file(&self, profile: &str, path: &str) -> Result<(), GatewayError>;

    async fn copy_to_clipboard(&self, text: &str) -> Result<(), GatewayError>;
}
