use crate::config::Config;
use crate::errors::FetchError;
use crate::models::{DoorStatus, RawReading, Reading};
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::warn;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// HTTP client for the upstream sensor endpoint.
#[derive(Debug, Clone)]
pub struct FeedClient {
    endpoint: String,
    http: reqwest::Client,
}

impl FeedClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .build()?;
        Ok(Self {
            endpoint: config.endpoint.clone(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn fetch(&self) -> Result<Vec<Reading>, FetchError> {
        let response = self.http.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        let raw: Vec<RawReading> = serde_json::from_slice(&body)?;
        Ok(normalize(raw))
    }
}

/// Turns upstream records into readings, keeping arrival order.
pub fn normalize(raw: Vec<RawReading>) -> Vec<Reading> {
    let mut readings = Vec::with_capacity(raw.len());
    for record in raw {
        let Some(origin) = parse_time(&record.time) else {
            warn!("skipping reading with unparseable time: {}", record.time);
            continue;
        };

        readings.push(Reading {
            label: label_for(origin),
            temperature: number_or_zero(&record.temperature),
            humidity: number_or_zero(&record.humidity),
            origin_instant: origin,
            door_status: DoorStatus::from_raw(record.door_status.as_str()),
            image_reading: record.image_data.get("reading").and_then(number),
        });
    }
    readings
}

pub fn parse_time(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => {
            let text = text.trim();
            if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                return Some(parsed.with_timezone(&Utc));
            }
            if let Some(naive) = NAIVE_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            {
                return Some(naive.and_utc());
            }
            text.parse::<i64>().ok().and_then(DateTime::<Utc>::from_timestamp_millis)
        }
        Value::Number(millis) => millis
            .as_i64()
            .or_else(|| millis.as_f64().map(|m| m as i64))
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    }
}

fn label_for(origin: DateTime<Utc>) -> String {
    origin.with_timezone(&Local).format("%m-%d %H:%M:%S").to_string()
}

fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

fn number_or_zero(value: &Value) -> f64 {
    number(value).unwrap_or(0.0)
}
