use crate::config::Config;
use crate::models::{FeedStatus, Reading};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Message shown in place of charts and table when the upstream is unreachable.
pub const FETCH_ERROR_MESSAGE: &str = "Unable to load sensor data. Retrying automatically.";

/// Latest upstream snapshot plus how the last fetches went.
#[derive(Debug, Default)]
pub struct FeedState {
    pub readings: Vec<Reading>,
    pub last_success: Option<DateTime<Utc>>,
    pub last_attempt: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

impl FeedState {
    /// Replaces the readings wholesale and clears any earlier error.
    pub fn record_success(&mut self, readings: Vec<Reading>, at: DateTime<Utc>) {
        self.readings = readings;
        self.last_success = Some(at);
        self.last_attempt = Some(at);
        self.error = None;
    }

    /// Keeps the readings from the last good fetch on display.
    pub fn record_failure(&mut self, at: DateTime<Utc>) {
        self.last_attempt = Some(at);
        self.error = Some(FETCH_ERROR_MESSAGE.to_string());
    }

    pub fn is_stale(&self) -> bool {
        self.error.is_some() && !self.readings.is_empty()
    }

    pub fn status(&self, endpoint: &str) -> FeedStatus {
        FeedStatus {
            endpoint: endpoint.to_string(),
            reading_count: self.readings.len(),
            last_success: self.last_success,
            last_attempt: self.last_attempt,
            error: self.error.clone(),
            stale: self.is_stale(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub feed: Arc<Mutex<FeedState>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            feed: Arc::new(Mutex::new(FeedState::default())),
        }
    }
}
