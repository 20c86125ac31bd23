use crate::models::Reading;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Trailing time range the dashboard is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "1h")]
    LastHour,
    #[serde(rename = "6h")]
    Last6Hours,
    #[default]
    #[serde(rename = "24h")]
    Last24Hours,
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "all")]
    All,
}

impl TimeWindow {
    /// Narrowest first.
    pub const ALL: [TimeWindow; 5] = [
        TimeWindow::LastHour,
        TimeWindow::Last6Hours,
        TimeWindow::Last24Hours,
        TimeWindow::Last7Days,
        TimeWindow::All,
    ];

    pub fn duration(self) -> Option<Duration> {
        match self {
            TimeWindow::LastHour => Some(Duration::hours(1)),
            TimeWindow::Last6Hours => Some(Duration::hours(6)),
            TimeWindow::Last24Hours => Some(Duration::hours(24)),
            TimeWindow::Last7Days => Some(Duration::days(7)),
            TimeWindow::All => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::LastHour => "1h",
            TimeWindow::Last6Hours => "6h",
            TimeWindow::Last24Hours => "24h",
            TimeWindow::Last7Days => "7d",
            TimeWindow::All => "all",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::LastHour => "Last 1 hour",
            TimeWindow::Last6Hours => "Last 6 hours",
            TimeWindow::Last24Hours => "Last 24 hours",
            TimeWindow::Last7Days => "Last 7 days",
            TimeWindow::All => "All readings",
        }
    }

    /// Earliest instant still inside the window, `None` for `All`.
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.duration().map(|span| now - span)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("window must be one of 1h, 6h, 24h, 7d, all (got '{0}')")]
pub struct UnknownWindow(pub String);

impl FromStr for TimeWindow {
    type Err = UnknownWindow;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let tag = value.trim();
        TimeWindow::ALL
            .into_iter()
            .find(|window| window.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| UnknownWindow(tag.to_string()))
    }
}

/// Readings recorded at or after `now - window`, in source order.
///
/// The source is expected to be time-ordered but that is not checked, so every
/// reading is tested rather than cutting at the first match.
pub fn filter_readings(
    readings: &[Reading],
    window: TimeWindow,
    now: DateTime<Utc>,
) -> Vec<Reading> {
    match window.cutoff(now) {
        None => readings.to_vec(),
        Some(cutoff) => readings
            .iter()
            .filter(|reading| reading.origin_instant >= cutoff)
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DoorStatus;
    use chrono::TimeZone;

    fn reading_at(origin: DateTime<Utc>, temperature: f64) -> Reading {
        Reading {
            label: origin.format("%H:%M").to_string(),
            temperature,
            humidity: 40.0,
            origin_instant: origin,
            door_status: DoorStatus::Closed,
            image_reading: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
    }

    fn spread() -> Vec<Reading> {
        let now = now();
        vec![
            reading_at(now - Duration::days(30), 1.0),
            reading_at(now - Duration::days(3), 2.0),
            reading_at(now - Duration::hours(12), 3.0),
            reading_at(now - Duration::hours(3), 4.0),
            reading_at(now - Duration::minutes(30), 5.0),
        ]
    }

    #[test]
    fn parses_known_tags() {
        assert_eq!("1h".parse::<TimeWindow>().unwrap(), TimeWindow::LastHour);
        assert_eq!(" 7D ".parse::<TimeWindow>().unwrap(), TimeWindow::Last7Days);
        assert_eq!("all".parse::<TimeWindow>().unwrap(), TimeWindow::All);
        assert_eq!(
            "2h".parse::<TimeWindow>(),
            Err(UnknownWindow("2h".to_string()))
        );
    }

    #[test]
    fn serde_uses_tags() {
        let json = serde_json::to_string(&TimeWindow::Last6Hours).unwrap();
        assert_eq!(json, "\"6h\"");
        let back: TimeWindow = serde_json::from_str("\"24h\"").unwrap();
        assert_eq!(back, TimeWindow::Last24Hours);
    }

    #[test]
    fn each_window_keeps_expected_readings() {
        let source = spread();
        let counts: Vec<usize> = TimeWindow::ALL
            .iter()
            .map(|window| filter_readings(&source, *window, now()).len())
            .collect();
        assert_eq!(counts, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn wider_windows_are_supersets() {
        let source = spread();
        for pair in TimeWindow::ALL.windows(2) {
            let narrow = filter_readings(&source, pair[0], now());
            let wide = filter_readings(&source, pair[1], now());
            for reading in &narrow {
                assert!(wide.contains(reading), "{} missing from {}", reading.label, pair[1]);
            }
        }
    }

    #[test]
    fn all_returns_source_unchanged() {
        // out of order on purpose
        let mut source = spread();
        source.swap(0, 4);
        let filtered = filter_readings(&source, TimeWindow::All, now());
        assert_eq!(filtered, source);
    }

    #[test]
    fn unordered_source_keeps_order_and_every_match() {
        let now = now();
        let source = vec![
            reading_at(now - Duration::minutes(10), 1.0),
            reading_at(now - Duration::hours(5), 2.0),
            reading_at(now - Duration::minutes(20), 3.0),
        ];
        let filtered = filter_readings(&source, TimeWindow::LastHour, now);
        let temps: Vec<f64> = filtered.iter().map(|r| r.temperature).collect();
        assert_eq!(temps, vec![1.0, 3.0]);
    }

    #[test]
    fn reading_at_now_is_inside_hour_window() {
        let source = vec![reading_at(now(), 20.0)];
        assert_eq!(filter_readings(&source, TimeWindow::LastHour, now()), source);
    }

    #[test]
    fn reading_two_hours_old_is_outside_hour_window() {
        let source = vec![reading_at(now() - Duration::hours(2), 20.0)];
        assert!(filter_readings(&source, TimeWindow::LastHour, now()).is_empty());
    }

    #[test]
    fn cutoff_is_inclusive() {
        let source = vec![reading_at(now() - Duration::hours(1), 20.0)];
        assert_eq!(filter_readings(&source, TimeWindow::LastHour, now()).len(), 1);
    }
}
