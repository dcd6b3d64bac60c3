//! Runtime configuration loaded from environment variables.

use std::time::Duration;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_EXPANSION_DELAY_MS: u64 = 1000;

#[derive(Clone, Debug)]
pub struct Config {
    /// Bind host (from PVFS_HOST)
    pub host: String,
    /// Bind port (from PVFS_PORT)
    pub port: u16,
    /// Delay before each expansion pass (from PVFS_EXPANSION_DELAY_MS)
    pub expansion_delay: Duration,
    /// Allowed CORS origins (from PVFS_CORS_ORIGINS, comma-separated).
    /// `None` allows any origin.
    pub cors_origins: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("PVFS_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = lookup("PVFS_PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let expansion_delay_ms = lookup("PVFS_EXPANSION_DELAY_MS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_EXPANSION_DELAY_MS);

        let cors_origins = lookup("PVFS_CORS_ORIGINS").map(|s| {
            s.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        Self {
            host,
            port,
            expansion_delay: Duration::from_millis(expansion_delay_ms),
            cors_origins,
        }
    }

    /// Defaults with no expansion delay (for testing).
    pub fn for_testing() -> Self {
        Self {
            expansion_delay: Duration::ZERO,
            ..Self::from_lookup(|_| None)
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
