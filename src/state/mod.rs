mod session;

pub use session::{SessionState, DEFAULT_PROFILE};
