use crate::types::{Credentials, EnvironmentInfo, Profile, ProfileStatus, Settings};

pub const DEFAULT_PROFILE: &str = "default";

/// Everything the rendering layer observes, in one place. Mutation goes
/// through the setters below so replacement semantics stay uniform: fetched
/// collections are swapped wholesale, never merged.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub profiles: Vec<Profile>,
    pub statuses: Vec<ProfileStatus>,
    pub selected_profile: String,
    pub token_code: String,
    pub loading: bool,
    pub settings_loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
    pub credentials: Option<Credentials>,
    pub environment: Option<EnvironmentInfo>,
    pub settings: Settings,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            profiles: Vec::new(),
            statuses: Vec::new(),
            selected_profile: DEFAULT_PROFILE.to_string(),
            token_code: String::new(),
            loading: false,
            settings_loading: false,
            error: None,
            success: None,
            credentials: None,
            environment: None,
            settings: Settings::default(),
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps in a refreshed profile list. If the selected profile vanished
    /// and the new list is non-empty, selection falls back to the first
    /// entry; an empty list leaves the selection untouched.
    pub fn replace_profiles(&mut self, profiles: Vec<Profile>) {
        self.profiles = profiles;
        if !self.profiles.is_empty()
            && !self.profiles.iter().any(|p| p.name == self.selected_profile)
        {
            self.selected_profile = self.profiles[0].name.clone();
        }
    }

    pub fn replace_statuses(&mut self, statuses: Vec<ProfileStatus>) {
        self.statuses = statuses;
    }

    pub fn status_for(&self, profile: &str) -> Option<&ProfileStatus> {
        self.statuses.iter().find(|s| s.profile == profile)
    }

    pub fn selected_profile_info(&self) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == self.selected_profile)
    }

    /// Replaces any prior error; only one is live at a time.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
    }

    /// Drops in-memory credentials iff they belong to `profile`.
    pub fn drop_credentials_for(&mut self, profile: &str) {
        if self
            .credentials
            .as_ref()
            .is_some_and(|c| c.profile.as_deref() == Some(profile))
        {
            self.credentials = None;
        }
    }
}
