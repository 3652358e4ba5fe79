use std::time::Duration;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// How long the search pipeline waits for keystrokes to pause.
    pub debounce: Duration,
    /// Simulated round-trip delay of the in-memory backend.
    pub backend_latency: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let debounce = env_millis("HERODEX_DEBOUNCE_MS", 300)?;
        let backend_latency = env_millis("HERODEX_LATENCY_MS", 500)?;

        Ok(Self {
            debounce,
            backend_latency,
        })
    }
}

fn env_millis(key: &str, default: u64) -> Result<Duration> {
    let millis = match std::env::var(key) {
        Ok(value) => value
            .parse::<u64>()
            .with_context(|| format!("{key} must be a whole number of milliseconds"))?,
        Err(_) => default,
    };
    Ok(Duration::from_millis(millis))
}
