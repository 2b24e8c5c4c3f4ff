//! Listener and lifecycle settings.

use std::time::Duration;

use clap::Args;

/// Where the server listens and how long it may take to stop.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Interface to bind
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// TCP port to bind
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Seconds in-flight requests get to finish after a shutdown signal
    #[arg(long, env = "SHUTDOWN_TIMEOUT_SECONDS", default_value_t = 30)]
    pub shutdown_timeout_seconds: u64,
}

impl ServerRuntimeConfig {
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Grace period for draining connections; zero means stop immediately.
    #[must_use]
    pub fn shutdown_timeout(&self) -> Option<Duration> {
        (self.shutdown_timeout_seconds > 0).then(|| Duration::from_secs(self.shutdown_timeout_seconds))
    }
}
