//! Server Config

use std::time::Duration;

use clap::Args;

/// Server runtime network settings.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "8698")]
    pub port: u16,

    /// Seconds between keep-alive comments on live streams
    #[arg(long, env = "LIVE_KEEP_ALIVE_SECONDS", default_value_t = 15_u64)]
    pub live_keep_alive_seconds: u64,
}

impl ServerRuntimeConfig {
    /// Get the socket address for binding.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Interval between keep-alive comments on live streams.
    #[must_use]
    pub fn live_keep_alive(&self) -> Duration {
        Duration::from_secs(self.live_keep_alive_seconds.max(1))
    }
}
