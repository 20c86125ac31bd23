use std::{env, net::SocketAddr, time::Duration};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/api/readings";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint: String,
    pub port: u16,
    pub poll_interval: Duration,
    pub fetch_timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SENSOR_ENDPOINT_URL must not be empty")]
    EmptyEndpoint,
    #[error("{name} has invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let endpoint = match lookup("SENSOR_ENDPOINT_URL") {
            Some(value) if value.trim().is_empty() => return Err(ConfigError::EmptyEndpoint),
            Some(value) => value.trim().to_string(),
            None => DEFAULT_ENDPOINT.to_string(),
        };

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT, |_| true)?;
        let poll_secs = parse_or(
            &lookup,
            "POLL_INTERVAL_SECS",
            DEFAULT_POLL_INTERVAL_SECS,
            |v| *v > 0,
        )?;
        let timeout_secs = parse_or(
            &lookup,
            "FETCH_TIMEOUT_SECS",
            DEFAULT_FETCH_TIMEOUT_SECS,
            |v| *v > 0,
        )?;

        Ok(Self {
            endpoint,
            port,
            poll_interval: Duration::from_secs(poll_secs),
            fetch_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            port: DEFAULT_PORT,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
    valid: impl Fn(&T) -> bool,
) -> Result<T, ConfigError> {
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => Ok(value),
        _ => Err(ConfigError::Invalid { name, value: raw }),
    }
}
