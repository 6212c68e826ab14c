//! Default values and functions for configuration

// Default constants
pub(crate) const DEFAULT_SESSION_BASE_URL: &str = "http://127.0.0.1:4096";

pub(crate) fn default_session_base_url() -> String {
    DEFAULT_SESSION_BASE_URL.to_string()
}

pub(crate) fn default_connect_timeout_secs() -> u64 {
    10
}

pub(crate) fn default_max_queue_size() -> usize {
    10_000
}

pub(crate) fn default_poll_interval_ms() -> u64 {
    1000
}

pub(crate) fn default_toast_enabled() -> bool {
    true
}
