use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named credential identity. The full list is replaced wholesale on each
/// refresh; entries are never merged incrementally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub region: String,
    pub mfa_serial: String,
}

/// Authentication status for one profile, recomputed by the backend on every
/// query. `time_remaining` is a preformatted countdown string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStatus {
    pub profile: String,
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_remaining: Option<String>,
}

/// A temporary access key / secret / session token triple. Held in memory
/// only, never written to the local store. The backend response carries no
/// profile name; the controller tags `profile` after fetching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

impl Credentials {
    /// The three-line shell assignment payload used for clipboard copy.
    pub fn env_exports(&self) -> String {
        format!(
            "AWS_ACCESS_KEY_ID={}\nAWS_SECRET_ACCESS_KEY={}\nAWS_SESSION_TOKEN={}",
            self.access_key_id, self.secret_access_key, self.session_token
        )
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentInfo {
    pub is_wsl2: bool,
    pub is_windows: bool,
    #[serde(rename = "isMacOS")]
    pub is_mac_os: bool,
    pub is_linux: bool,
}

/// Strategy for locating on-disk AWS config/credentials files. Unrecognized
/// values round-trip as `Other` so a newer backend never breaks the panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CredentialSource {
    Auto,
    Linux,
    Wsl2,
    Windows,
    Custom,
    #[serde(untagged)]
    Other(String),
}

impl CredentialSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Auto => "auto",
            Self::Linux => "linux",
            Self::Wsl2 => "wsl2",
            Self::Windows => "windows",
            Self::Custom => "custom",
            Self::Other(raw) => raw,
        }
    }
}

/// Backend-persisted settings. The controller sends full replacements and
/// adopts the returned value verbatim. The custom paths are only meaningful
/// when `credential_source` is `Custom`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub credential_source: CredentialSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_config_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_creds_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            credential_source: CredentialSource::Auto,
            custom_config_path: None,
            custom_creds_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub profile: String,
    pub token_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}
