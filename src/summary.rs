use crate::models::{DoorStatus, Reading};
use serde::Serialize;

/// Shown in place of a value when there is nothing to show.
pub const PLACEHOLDER: &str = "--";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestSummary {
    pub temperature: String,
    pub humidity: String,
    pub door_status: Option<DoorStatus>,
    pub image_reading: String,
    pub label: Option<String>,
}

impl LatestSummary {
    pub fn placeholder() -> Self {
        Self {
            temperature: PLACEHOLDER.to_string(),
            humidity: PLACEHOLDER.to_string(),
            door_status: None,
            image_reading: PLACEHOLDER.to_string(),
            label: None,
        }
    }

    pub fn door_text(&self) -> &'static str {
        self.door_status.map(|door| door.as_str()).unwrap_or(PLACEHOLDER)
    }
}

pub fn latest_summary(readings: &[Reading]) -> LatestSummary {
    let Some(latest) = readings.last() else {
        return LatestSummary::placeholder();
    };

    LatestSummary {
        temperature: one_decimal(latest.temperature),
        humidity: one_decimal(latest.humidity),
        door_status: Some(latest.door_status),
        image_reading: latest
            .image_reading
            .map(one_decimal)
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        label: Some(latest.label.clone()),
    }
}

pub fn one_decimal(value: f64) -> String {
    format!("{value:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reading(temperature: f64, humidity: f64) -> Reading {
        Reading {
            label: "03-14 12:00:00".to_string(),
            temperature,
            humidity,
            origin_instant: Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap(),
            door_status: DoorStatus::Open,
            image_reading: Some(512.34),
        }
    }

    #[test]
    fn empty_sequence_gives_placeholders() {
        let summary = latest_summary(&[]);
        assert_eq!(summary.temperature, "--");
        assert_eq!(summary.humidity, "--");
        assert_eq!(summary.image_reading, "--");
        assert_eq!(summary.door_text(), "--");
        assert!(summary.label.is_none());
    }

    #[test]
    fn uses_last_element() {
        let summary = latest_summary(&[reading(18.0, 60.0), reading(20.0, 50.0)]);
        assert_eq!(summary.temperature, "20.0");
        assert_eq!(summary.humidity, "50.0");
        assert_eq!(summary.door_status, Some(DoorStatus::Open));
        assert_eq!(summary.image_reading, "512.3");
    }

    #[test]
    fn rounds_to_one_decimal() {
        let summary = latest_summary(&[reading(21.46, -3.04)]);
        assert_eq!(summary.temperature, "21.5");
        assert_eq!(summary.humidity, "-3.0");
    }
}
