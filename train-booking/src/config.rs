//! Server configuration.
//!
//! Read once from the environment at startup. Unset variables take their
//! defaults; set but unparseable variables are an error.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Listen address.
pub const ADDR_VAR: &str = "TRAIN_BOOKING_ADDR";

/// Optional catalog JSON file; the built-in catalog is used when unset.
pub const CATALOG_VAR: &str = "TRAIN_BOOKING_CATALOG";

/// Simulated train search latency, in milliseconds.
pub const SEARCH_DELAY_VAR: &str = "TRAIN_BOOKING_SEARCH_DELAY_MS";

/// Simulated train detail lookup latency, in milliseconds.
pub const LOOKUP_DELAY_VAR: &str = "TRAIN_BOOKING_LOOKUP_DELAY_MS";

/// Simulated booking submission latency, in milliseconds.
pub const BOOKING_DELAY_VAR: &str = "TRAIN_BOOKING_BOOKING_DELAY_MS";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value:?}")]
    InvalidAddr { var: &'static str, value: String },

    #[error("{var} is not a whole number of milliseconds: {value:?}")]
    InvalidDelay { var: &'static str, value: String },
}

/// Configuration for the booking server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address to listen on.
    pub addr: SocketAddr,

    /// Catalog file to load instead of the built-in sample data.
    pub catalog_path: Option<PathBuf>,

    /// Delay before search results are returned (milliseconds).
    pub search_delay_ms: u64,

    /// Delay before a train's details are returned (milliseconds).
    pub lookup_delay_ms: u64,

    /// Delay before a booking is confirmed (milliseconds).
    /// Covers both form submission and payment.
    pub booking_delay_ms: u64,
}

impl AppConfig {
    /// Configuration with no simulated latency.
    pub fn without_delays() -> Self {
        Self {
            search_delay_ms: 0,
            lookup_delay_ms: 0,
            booking_delay_ms: 0,
            ..Self::default()
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration using `lookup` to fetch each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(ADDR_VAR) {
            config.addr = value.trim().parse().map_err(|_| ConfigError::InvalidAddr {
                var: ADDR_VAR,
                value,
            })?;
        }

        if let Some(path) = lookup(CATALOG_VAR).filter(|p| !p.is_empty()) {
            config.catalog_path = Some(PathBuf::from(path));
        }

        let delay = |var: &'static str, default: u64| match lookup(var) {
            None => Ok(default),
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidDelay { var, value }),
        };
        config.search_delay_ms = delay(SEARCH_DELAY_VAR, config.search_delay_ms)?;
        config.lookup_delay_ms = delay(LOOKUP_DELAY_VAR, config.lookup_delay_ms)?;
        config.booking_delay_ms = delay(BOOKING_DELAY_VAR, config.booking_delay_ms)?;

        Ok(config)
    }

    /// Returns the search delay as a Duration.
    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_delay_ms)
    }

    /// Returns the lookup delay as a Duration.
    pub fn lookup_delay(&self) -> Duration {
        Duration::from_millis(self.lookup_delay_ms)
    }

    /// Returns the booking delay as a Duration.
    pub fn booking_delay(&self) -> Duration {
        Duration::from_millis(self.booking_delay_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            catalog_path: None,
            search_delay_ms: 1500,
            lookup_delay_ms: 1000,
            booking_delay_ms: 3500, // 1.5s form + 2s payment
        }
    }
}
