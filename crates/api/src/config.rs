use std::str::FromStr;
use std::time::Duration;

use sharenet_core::seats::{SeatPolicy, DEFAULT_MAX_SEATS, DEFAULT_MIN_SEATS};
use sharenet_core::workshop::DEFAULT_VENUE;
use sharenet_pipeline::IngestOptions;

/// Default upstream spots endpoint.
pub const DEFAULT_SPOTS_URL: &str = "https://api.sharenet.co.za/api/v1/px2/spots";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upstream spot source settings.
    pub spots: SpotsConfig,
    /// Workshop ingestion settings.
    pub ingest: IngestOptions,
}

/// Where and how long to wait for the upstream spot listing.
#[derive(Debug, Clone)]
pub struct SpotsConfig {
    pub api_url: String,
    pub timeout: Duration,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                                        |
    /// |--------------------------|------------------------------------------------|
    /// | `HOST`                   | `0.0.0.0`                                      |
    /// | `PORT`                   | `3000`                                         |
    /// | `CORS_ORIGINS`           | `http://localhost:5173,http://localhost:8080`  |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                                           |
    /// | `SHARENET_API_URL`       | `https://api.sharenet.co.za/api/v1/px2/spots`  |
    /// | `SPOTS_TIMEOUT_SECS`     | `10`                                           |
    /// | `WORKSHOP_VENUE`         | `Sharenet Training Room`                       |
    /// | `WORKSHOP_MIN_SEATS`     | `1`                                            |
    /// | `WORKSHOP_MAX_SEATS`     | `10`                                           |
    /// | `WORKSHOP_SEAT_SEED`     | unset (OS entropy)                             |
    /// | `INGEST_ATOMIC`          | `false`                                        |
    /// | `INGEST_SKIP_DUPLICATES` | `false`                                        |
    ///
    /// Panics on malformed values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] but reading from an arbitrary source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = parse_or(&lookup, "PORT", 3000);

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173,http://localhost:8080".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30);

        let spots = SpotsConfig {
            api_url: lookup("SHARENET_API_URL").unwrap_or_else(|| DEFAULT_SPOTS_URL.into()),
            timeout: Duration::from_secs(parse_or(&lookup, "SPOTS_TIMEOUT_SECS", 10)),
        };

        let min_seats: i32 = parse_or(&lookup, "WORKSHOP_MIN_SEATS", DEFAULT_MIN_SEATS);
        let max_seats: i32 = parse_or(&lookup, "WORKSHOP_MAX_SEATS", DEFAULT_MAX_SEATS);
        let seed: Option<u64> = lookup("WORKSHOP_SEAT_SEED").map(|raw| {
            raw.parse()
                .unwrap_or_else(|_| panic!("WORKSHOP_SEAT_SEED must be a valid u64, got '{raw}'"))
        });
        let seats = SeatPolicy::new(min_seats, max_seats, seed)
            .unwrap_or_else(|e| panic!("Invalid workshop seat range: {e}"));

        let ingest = IngestOptions {
            venue: lookup("WORKSHOP_VENUE").unwrap_or_else(|| DEFAULT_VENUE.into()),
            seats,
            atomic: parse_or(&lookup, "INGEST_ATOMIC", false),
            skip_duplicates: parse_or(&lookup, "INGEST_SKIP_DUPLICATES", false),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            spots,
            ingest,
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|_| panic!("{key} has an invalid value '{raw}'")),
        None => default,
    }
}
