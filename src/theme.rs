use crate::store::{LocalStore, KEY_THEME_PREFERENCE};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    System,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "light" => Self::Light,
            "dark" => Self::Dark,
            _ => Self::System,
        }
    }

    /// The toggle ring: system -> light -> dark -> system.
    pub fn next(self) -> Self {
        match self {
            Self::System => Self::Light,
            Self::Light => Self::Dark,
            Self::Dark => Self::System,
        }
    }
}

/// `dark` is derived, never authoritative; only `preference` is persisted.
#[derive(Debug, Clone, Copy)]
pub struct ThemeState {
    pub preference: ThemePreference,
    pub dark: bool,
    pub os_dark: bool,
}

impl ThemeState {
    /// Dark is the unmarked default; the marker is only present for light.
    pub fn light_marker(&self) -> bool {
        !self.dark
    }
}

fn lock<'a>(state: &'a Mutex<ThemeState>) -> std::sync::MutexGuard<'a, ThemeState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn resolve_and_persist(state: &Mutex<ThemeState>, store: &LocalStore) {
    let mut state = lock(state);
    state.dark = match state.preference {
        ThemePreference::System => state.os_dark,
        ThemePreference::Light => false,
        ThemePreference::Dark => true,
    };
    store.set(KEY_THEME_PREFERENCE, state.preference.as_str());
}

fn handle_os_change(state: &Mutex<ThemeState>, store: &LocalStore, os_dark: bool) {
    {
        let mut state = lock(state);
        state.os_dark = os_dark;
        // A pinned preference ignores OS changes entirely.
        if state.preference != ThemePreference::System {
            return;
        }
    }
    resolve_and_persist(state, store);
}

/// Owns the three-state preference and its resolution against the host's
/// dark-mode signal. The signal subscription is installed by `init` and torn
/// down exactly once by `teardown`; both are safe to call out of order.
pub struct ThemeManager {
    store: LocalStore,
    state: Arc<Mutex<ThemeState>>,
    os_signal: watch::Receiver<bool>,
    subscription: Option<JoinHandle<()>>,
}

impl ThemeManager {
    pub fn new(store: LocalStore, os_signal: watch::Receiver<bool>) -> Self {
        let preference = store
            .get_string(KEY_THEME_PREFERENCE)
            .map(|v| ThemePreference::parse(&v))
            .unwrap_or(ThemePreference::System);
        let os_dark = *os_signal.borrow();
        Self {
            store,
            state: Arc::new(Mutex::new(ThemeState {
                preference,
                dark: false,
                os_dark,
            })),
            os_signal,
            subscription: None,
        }
    }

    /// Resolves the persisted preference and subscribes to the OS signal.
    pub fn init(&mut self) {
        resolve_and_persist(&self.state, &self.store);

        if self.subscription.is_some() {
            return;
        }
        let state = self.state.clone();
        let store = self.store.clone();
        let mut rx = self.os_signal.clone();
        self.subscription = Some(tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let os_dark = *rx.borrow();
                handle_os_change(&state, &store, os_dark);
            }
        }));
    }

    pub fn teardown(&mut self) {
        if let Some(task) = self.subscription.take() {
            task.abort();
        }
    }

    /// Advances the preference one step along the toggle ring and re-resolves.
    pub fn cycle(&self) {
        {
            let mut state = lock(&self.state);
            state.preference = state.preference.next();
        }
        resolve_and_persist(&self.state, &self.store);
    }

    pub fn snapshot(&self) -> ThemeState {
        *lock(&self.state)
    }

    #[cfg(test)]
    pub(crate) fn note_os_dark(&self, os_dark: bool) {
        handle_os_change(&self.state, &self.store, os_dark);
    }
}
