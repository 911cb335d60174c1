use std::time::Duration;

pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 1200;

/// Runtime settings shared by the views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// How long the not-found page waits before returning to the catalog.
    pub redirect_delay: Duration,
}

impl Config {
    pub fn with_redirect_delay_ms(ms: u64) -> Self {
        Self {
            redirect_delay: Duration::from_millis(ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_redirect_delay_ms(DEFAULT_REDIRECT_DELAY_MS)
    }
}
