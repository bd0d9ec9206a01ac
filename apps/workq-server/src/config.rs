use std::time::Duration;

/// Process configuration, read once from the environment at startup.
///
/// The spec fixes `default_lease` at 300s and the listen port at 17901
/// (spec.md §6); both are exposed as env overrides here so integration
/// tests can run lease expiry on a fast clock without touching production
/// defaults.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub bind: std::net::IpAddr,
    pub port: u16,
    pub default_lease: Duration,
    pub sweep_interval: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind: env_ip("WORKQ_BIND", std::net::Ipv4Addr::LOCALHOST.into()),
            port: env_parse("WORKQ_PORT", 17901),
            default_lease: Duration::from_secs(env_parse("WORKQ_LEASE_SECS", 300)),
            sweep_interval: Duration::from_millis(env_parse("WORKQ_SWEEP_MS", 1000)),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_ip(key: &str, default: std::net::IpAddr) -> std::net::IpAddr {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
