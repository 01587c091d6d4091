mod controller;
mod gateway;
mod labels;
mod refresh;
mod state;
mod store;
mod theme;
pub mod types;

pub use controller::{SessionController, EXPORT_ENV_PATH};
pub use gateway::{Gateway, GatewayError, HttpBackend};
pub use labels::{credential_source_label, environment_label};
pub use state::{SessionState, DEFAULT_PROFILE};
pub use store::{LocalStore, KEY_THEME_PREFERENCE};
pub use theme::{ThemeManager, ThemePreference, ThemeState};
