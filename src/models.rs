use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::stats::WindowStats;
use crate::summary::LatestSummary;
use crate::window::TimeWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorStatus {
    Open,
    #[default]
    Closed,
}

impl DoorStatus {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.trim().eq_ignore_ascii_case("open") => DoorStatus::Open,
            _ => DoorStatus::Closed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DoorStatus::Open => "open",
            DoorStatus::Closed => "closed",
        }
    }
}

/// One normalized sensor data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub label: String,
    pub temperature: f64,
    pub humidity: f64,
    pub origin_instant: DateTime<Utc>,
    pub door_status: DoorStatus,
    pub image_reading: Option<f64>,
}

/// A record as the upstream endpoint sends it. Fields are loose
/// so one bad value never fails the whole batch.
#[derive(Debug, Deserialize)]
pub struct RawReading {
    #[serde(default)]
    pub time: Value,
    #[serde(default)]
    pub temperature: Value,
    #[serde(default)]
    pub humidity: Value,
    #[serde(default, rename = "doorStatus")]
    pub door_status: Value,
    #[serde(default, rename = "imageData")]
    pub image_data: Value,
}

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    pub window: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedStatus {
    pub endpoint: String,
    pub reading_count: usize,
    pub last_success: Option<DateTime<Utc>>,
    pub last_attempt: Option<DateTime<Utc>>,
    pub error: Option<String>,
    pub stale: bool,
}

#[derive(Debug, Serialize)]
pub struct WindowReport {
    pub window: TimeWindow,
    pub window_label: &'static str,
    pub generated_at: DateTime<Utc>,
    pub readings: Vec<Reading>,
    pub latest: LatestSummary,
    pub stats: WindowStats,
    pub status: FeedStatus,
}
