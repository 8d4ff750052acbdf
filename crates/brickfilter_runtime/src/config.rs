//! Configuration for the reference host and REPL.

use std::time::Duration;

use brickfilter_storage::Rgb;

/// Environment variable holding the default log filter.
pub const LOG_ENV: &str = "BRICKFILTER_LOG";

/// Log filter used when neither `--log` nor [`LOG_ENV`] is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Settings for a [`LocalHost`](crate::LocalHost) session.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    /// Answers to a world-wide confirmation arriving later than this count
    /// as declined.
    pub confirm_timeout: Duration,

    /// Fixed seed for `chance`; a fresh seed per command when absent.
    pub seed: Option<u64>,

    /// `tracing-subscriber` filter directive.
    pub log_filter: String,

    /// Initial viewer yaw in degrees.
    pub yaw: f64,

    /// Initial viewer paint color.
    pub paint: Option<Rgb>,

    /// Accept every confirmation without asking.
    pub assume_yes: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            confirm_timeout: Duration::from_secs(30),
            seed: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            yaw: 0.0,
            paint: None,
            assume_yes: false,
        }
    }
}

impl RuntimeConfig {
    /// Defaults, with the log filter taken from [`LOG_ENV`] when set.
    #[must_use]
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var(LOG_ENV) {
            Ok(filter) if !filter.trim().is_empty() => config.with_log_filter(filter),
            _ => config,
        }
    }

    /// Configuration for scripted runs: confirmations are accepted.
    #[must_use]
    pub fn batch() -> Self {
        Self::default().with_assume_yes(true)
    }

    /// Builder method to set the confirmation timeout.
    #[must_use]
    pub const fn with_confirm_timeout(mut self, timeout: Duration) -> Self {
        self.confirm_timeout = timeout;
        self
    }

    /// Builder method to fix the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method to set the log filter.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Builder method to set the initial yaw.
    #[must_use]
    pub const fn with_yaw(mut self, yaw: f64) -> Self {
        self.yaw = yaw;
        self
    }

    /// Builder method to set the initial paint color.
    #[must_use]
    pub const fn with_paint(mut self, paint: Rgb) -> Self {
        self.paint = Some(paint);
        self
    }

    /// Builder method to skip confirmations.
    #[must_use]
    pub const fn with_assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }
}
