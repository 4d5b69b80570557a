//! Upstream market "spot" records as served by the Sharenet spots endpoint.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Offset-less formats accepted for `datetime`, interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A single spot from the upstream listing.
///
/// Price fields are carried for completeness; only the identifying fields
/// and `datetime` feed workshop derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    pub code: String,
    pub full_name: String,
    pub category_name: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, rename = "move")]
    pub move_: Option<f64>,
    #[serde(default)]
    pub pmove: Option<f64>,
    pub datetime: String,
}

/// Response envelope of the spots endpoint: `{ "spots": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotListing {
    pub spots: Vec<Spot>,
}

impl Spot {
    /// Parse the upstream event time of this spot.
    pub fn event_time(&self) -> Result<Timestamp, CoreError> {
        parse_spot_datetime(&self.datetime)
    }
}

/// Parse an upstream `datetime` string into a UTC timestamp.
///
/// RFC 3339 values keep their offset (converted to UTC). Values without an
/// offset are taken as UTC.
pub fn parse_spot_datetime(raw: &str) -> Result<Timestamp, CoreError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| CoreError::Validation(format!("unrecognised spot datetime '{raw}'")))
}
