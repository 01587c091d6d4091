use super::{Gateway, GatewayError};
use crate::types::{
    Credentials, EnvironmentInfo, LoginRequest, Profile, ProfileStatus, Settings,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::PathBuf;
use tokio::process::Command;

const DEFAULT_EXPORT_BIN: &str = "docker-aws";

fn build_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Extracts the backend's error message from a JSON error body, if any.
fn read_error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    let message = json.get("message")?.as_str()?.trim();
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

/// Production [`Gateway`] backed by the extension's backend service, plus the
/// two host-side primitives the panel needs: the companion executable for
/// env-file export and the system clipboard.
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
    export_bin: PathBuf,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        Ok(Self {
            http: reqwest::Client::builder().build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            export_bin: PathBuf::from(DEFAULT_EXPORT_BIN),
        })
    }

    pub fn with_export_bin(mut self, bin: impl Into<PathBuf>) -> Self {
        self.export_bin = bin.into();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let res = self
            .http
            .get(self.url(path))
            .headers(build_headers())
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(GatewayError::Backend {
                status: res.status().as_u16(),
            });
        }
        Ok(res.json::<T>().await?)
    }
}

#[async_trait]
impl Gateway for HttpBackend {
    async fn get_profiles(&self) -> Result<Vec<Profile>, GatewayError> {
        self.get_json("/profiles").await
    }

    async fn get_status(&self, profile: &str) -> Result<Option<ProfileStatus>, GatewayError> {
        let path = format!("/status?profile={}", urlencoding::encode(profile));
        let res = self
            .http
            .get(self.url(&path))
            .headers(build_headers())
            .send()
            .await?;
        // An unknown profile is an absent entry, not an error.
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !res.status().is_success() {
            return Err(GatewayError::Backend {
                status: res.status().as_u16(),
            });
        }
        Ok(Some(res.json::<ProfileStatus>().await?))
    }

    async fn get_all_statuses(&self) -> Result<Vec<ProfileStatus>, GatewayError> {
        self.get_json("/status/all").await
    }

    async fn login(&self, request: &LoginRequest) -> Result<ProfileStatus, GatewayError> {
        let res = self
            .http
            .post(self.url("/login"))
            .headers(build_headers())
            .json(request)
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let message = read_error_message(&body)
                .unwrap_or_else(|| format!("Authentication failed ({})", status.as_u16()));
            return Err(GatewayError::Auth(message));
        }
        Ok(res.json::<ProfileStatus>().await?)
    }

    async fn get_credentials(&self, profile: &str) -> Result<Credentials, GatewayError> {
        let path = format!("/credentials?profile={}", urlencoding::encode(profile));
        self.get_json(&path).await
    }

    async fn clear_credentials(&self, profile: Option<&str>) -> Result<(), GatewayError> {
        let path = match profile {
            Some(profile) => format!("/credentials?profile={}", urlencoding::encode(profile)),
            None => "/credentials".to_string(),
        };
        let res = self
            .http
            .delete(self.url(&path))
            .headers(build_headers())
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(GatewayError::Backend {
                status: res.status().as_u16(),
            });
        }
        Ok(())
    }

    async fn get_environment(&self) -> Result<EnvironmentInfo, GatewayError> {
        self.get_json("/environment").await
    }

    async fn get_settings(&self) -> Result<Settings, GatewayError> {
        self.get_json("/settings").await
    }

    async fn update_settings(&self, settings: &Settings) -> Result<Settings, GatewayError> {
        let res = self
            .http
            .post(self.url("/settings"))
            .headers(build_headers())
            .json(settings)
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(GatewayError::Backend {
                status: res.status().as_u16(),
            });
        }
        Ok(res.json::<Settings>().await?)
    }

    async fn export_env_file(&self, profile: &str, path: &str) -> Result<(), GatewayError> {
        let output = Command::new(&self.export_bin)
            .args(["env", "-p", profile, "-o", path])
            .output()
            .await
            .map_err(|err| GatewayError::Export(err.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                output.status.to_string()
            } else {
                stderr
            };
            return Err(GatewayError::Export(detail));
        }
        Ok(())
    }

    async fn copy_to_clipboard(&self, text: &str) -> Result<(), GatewayError> {
        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new().map_err(|_| GatewayError::Clipboard)?;
            clipboard.set_text(text).map_err(|_| GatewayError::Clipboard)
        })
        .await
        .unwrap_or(Err(GatewayError::Clipboard))
    }
}
