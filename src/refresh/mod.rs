mod fetch;
mod status_poll;

pub(crate) use fetch::{fetch_environment, fetch_profiles, fetch_settings, fetch_statuses};
pub(crate) use status_poll::{spawn_status_poll, PollHandle, STATUS_POLL_PERIOD};
