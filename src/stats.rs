use crate::models::{DoorStatus, Reading, WindowReport};
use crate::state::FeedState;
use crate::summary::latest_summary;
use crate::window::{filter_readings, TimeWindow};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowStats {
    pub count: usize,
    pub temperature: Option<SeriesStats>,
    pub humidity: Option<SeriesStats>,
    pub door_open_count: usize,
    pub latest_image_reading: Option<f64>,
}

pub fn build_window_report(feed: &FeedState, endpoint: &str, window: TimeWindow) -> WindowReport {
    build_window_report_at(feed, endpoint, window, Utc::now())
}

pub fn build_window_report_at(
    feed: &FeedState,
    endpoint: &str,
    window: TimeWindow,
    now: DateTime<Utc>,
) -> WindowReport {
    let readings = filter_readings(&feed.readings, window, now);

    WindowReport {
        window,
        window_label: window.label(),
        generated_at: now,
        latest: latest_summary(&readings),
        stats: build_stats(&readings),
        status: feed.status(endpoint),
        readings,
    }
}

pub fn build_stats(readings: &[Reading]) -> WindowStats {
    WindowStats {
        count: readings.len(),
        temperature: series_stats(readings.iter().map(|r| r.temperature)),
        humidity: series_stats(readings.iter().map(|r| r.humidity)),
        door_open_count: readings
            .iter()
            .filter(|r| r.door_status == DoorStatus::Open)
            .count(),
        latest_image_reading: readings.iter().rev().find_map(|r| r.image_reading),
    }
}

fn series_stats(values: impl Iterator<Item = f64>) -> Option<SeriesStats> {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for value in values {
        count += 1;
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }

    if count == 0 {
        return None;
    }

    Some(SeriesStats {
        min,
        max,
        avg: sum / count as f64,
    })
}
