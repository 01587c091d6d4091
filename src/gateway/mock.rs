use super::{Gateway, GatewayError};
use crate::types::{
    Credentials, EnvironmentInfo, LoginRequest, Profile, ProfileStatus, Settings,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

fn lock<'a, T>(mutex: &'a Mutex<T>) -> std::sync::MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Scripted gateway for controller tests. Responses are configured up front;
/// every call is appended to `calls` for ordering and count assertions.
#[derive(Default)]
pub(crate) struct MockGateway {
    pub profiles: Mutex<Vec<Profile>>,
    pub statuses: Mutex<Vec<ProfileStatus>>,
    pub environment: Mutex<EnvironmentInfo>,
    pub settings: Mutex<Settings>,
    pub credentials: Mutex<Option<Credentials>>,
    pub login_error: Mutex<Option<GatewayError>>,
    pub fail_profiles: AtomicBool,
    pub fail_statuses: AtomicBool,
    pub fail_credentials: AtomicBool,
    pub fail_clear: AtomicBool,
    pub fail_update_settings: AtomicBool,
    pub fail_export: AtomicBool,
    pub fail_clipboard: AtomicBool,
    pub calls: Mutex<Vec<String>>,
    pub updated_settings: Mutex<Option<Settings>>,
    pub cleared: Mutex<Vec<Option<String>>>,
    pub exports: Mutex<Vec<(String, String)>>,
    pub clipboard: Mutex<Option<String>>,
}

impl MockGateway {
    pub fn record(&self, call: &str) {
        lock(&self.calls).push(call.to_string());
    }

    pub fn call_count(&self, call: &str) -> usize {
        lock(&self.calls).iter().filter(|c| c.as_str() == call).count()
    }

    pub fn sample_profile(name: &str) -> Profile {
        Profile {
            name: name.to_string(),
            region: "us-east-1".to_string(),
            mfa_serial: format!("arn:aws:iam::123:mfa/{name}"),
        }
    }

    pub fn sample_credentials(profile: Option<&str>) -> Credentials {
        Credentials {
            access_key_id: "AKIAEXAMPLE".to_string(),
            secret_access_key: "s3cr3t".to_string(),
            session_token: "tok".to_string(),
            expiration: Utc::now() + Duration::hours(1),
            profile: profile.map(str::to_string),
        }
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn get_profiles(&self) -> Result<Vec<Profile>, GatewayError> {
        self.record("get_profiles");
        if self.fail_profiles.load(Ordering::SeqCst) {
            return Err(GatewayError::Backend { status: 500 });
        }
        Ok(lock(&self.profiles).clone())
    }

    async fn get_status(&self, profile: &str) -> Result<Option<ProfileStatus>, GatewayError> {
        self.record("get_status");
        Ok(lock(&self.statuses).iter().find(|s| s.profile == profile).cloned())
    }

    async fn get_all_statuses(&self) -> Result<Vec<ProfileStatus>, GatewayError> {
        self.record("get_all_statuses");
        if self.fail_statuses.load(Ordering::SeqCst) {
            return Err(GatewayError::Backend { status: 500 });
        }
        Ok(lock(&self.statuses).clone())
    }

    async fn login(&self, request: &LoginRequest) -> Result<ProfileStatus, GatewayError> {
        self.record("login");
        if let Some(err) = lock(&self.login_error).take() {
            return Err(err);
        }
        let status = ProfileStatus {
            profile: request.profile.clone(),
            authenticated: true,
            expiration: Some(Utc::now() + Duration::hours(1)),
            time_remaining: Some("0:59:58".to_string()),
        };
        lock(&self.statuses).retain(|s| s.profile != request.profile);
        lock(&self.statuses).push(status.clone());
        Ok(status)
    }

    async fn get_credentials(&self, _profile: &str) -> Result<Credentials, GatewayError> {
        self.record("get_credentials");
        if self.fail_credentials.load(Ordering::SeqCst) {
            return Err(GatewayError::Backend { status: 500 });
        }
        Ok(lock(&self.credentials)
            .clone()
            .unwrap_or_else(|| Self::sample_credentials(None)))
    }

    async fn clear_credentials(&self, profile: Option<&str>) -> Result<(), GatewayError> {
        self.record("clear_credentials");
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(GatewayError::Backend { status: 500 });
        }
        lock(&self.cleared).push(profile.map(str::to_string));
        Ok(())
    }

    async fn get_environment(&self) -> Result<EnvironmentInfo, GatewayError> {
        self.record("get_environment");
        Ok(*lock(&self.environment))
    }

    async fn get_settings(&self) -> Result<Settings, GatewayError> {
        self.record("get_settings");
        Ok(lock(&self.settings).clone())
    }

    async fn update_settings(&self, settings: &Settings) -> Result<Settings, GatewayError> {
        self.record("update_settings");
        if self.fail_update_settings.load(Ordering::SeqCst) {
            return Err(GatewayError::Backend { status: 500 });
        }
        *lock(&self.updated_settings) = Some(settings.clone());
        *lock(&self.settings) = settings.clone();
        Ok(settings.clone())
    }

    async fn export_env_file(&self, profile: &str, path: &str) -> Result<(), GatewayError> {
        self.record("export_env_file");
        if self.fail_export.load(Ordering::SeqCst) {
            return Err(GatewayError::Export("exec failed".to_string()));
        }
        lock(&self.exports).push((profile.to_string(), path.to_string()));
        Ok(())
    }

    async fn copy_to_clipboard(&self, text: &str) -> Result<(), GatewayError> {
        self.record("copy_to_clipboard");
        if self.fail_clipboard.load(Ordering::SeqCst) {
            return Err(GatewayError::Clipboard);
        }
        *lock(&self.clipboard) = Some(text.to_string());
        Ok(())
    }
}
