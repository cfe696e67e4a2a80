//! Configuration module for the GPA API
//! All parameters come from environment variables with sensible defaults

use std::time::Duration;

/// Server configuration
pub struct ServerConfig {
    /// Bind host
    pub host: String,

    /// Bind port. `PORT` (hosting platforms set this) takes precedence,
    /// then `GPA_PORT`, then the default.
    pub port: u16,

    /// Rate limit: requests allowed per window, per client key
    /// (`GPA_RATE_LIMIT`)
    pub rate_limit_requests: u32,

    /// Rate limit window duration in seconds (`GPA_RATE_WINDOW_SECS`)
    pub rate_limit_window: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("GPA_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .or_else(|_| std::env::var("GPA_PORT"))
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            rate_limit_requests: env_parse("GPA_RATE_LIMIT", 100),
            rate_limit_window: Duration::from_secs(env_parse("GPA_RATE_WINDOW_SECS", 60)),
        }
    }
}

fn env_parse<T: std::str::FromStr>(var: &str, default: T) -> T {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl ServerConfig {
    /// Socket address string suitable for `SocketAddr::parse`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
