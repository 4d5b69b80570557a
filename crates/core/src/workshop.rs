//! Rules for deriving a workshop from a spot.
//!
//! A workshop is always titled after the spot's full name and scheduled
//! for the day after the spot's event time, at the same time of day.

use chrono::{Days, SubsecRound};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Venue used for ingested workshops unless configured otherwise.
pub const DEFAULT_VENUE: &str = "Sharenet Training Room";

/// Suffix appended to the spot name to form the workshop title.
const TITLE_SUFFIX: &str = "Trading Workshop";

/// Workshop title for a spot: `"<full name> Trading Workshop"`.
pub fn workshop_title(spot_full_name: &str) -> String {
    format!("{spot_full_name} {TITLE_SUFFIX}")
}

/// Workshop date for a spot event: one calendar day later, same time of day.
///
/// Truncated to microseconds, the precision `TIMESTAMPTZ` stores.
pub fn scheduled_date(spot_time: Timestamp) -> Result<Timestamp, CoreError> {
    spot_time
        .trunc_subsecs(6)
        .checked_add_days(Days::new(1))
        .ok_or_else(|| CoreError::Validation(format!("cannot schedule a day after {spot_time}")))
}

/// Reject seat counts that would break the non-negative invariant.
pub fn validate_available_seats(seats: i32) -> Result<(), CoreError> {
    if seats < 0 {
        return Err(CoreError::Validation(format!(
            "availableSeats must not be negative, got {seats}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike, Utc};

    #[test]
    fn title_appends_suffix() {
        assert_eq!(workshop_title("JSE Futures"), "JSE Futures Trading Workshop");
    }

    #[test]
    fn date_is_next_day_same_time() {
        let spot = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
        let date = scheduled_date(spot).unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2024, 1, 11, 9, 0, 0).unwrap());
    }

    #[test]
    fn date_rolls_over_month_and_leap_day() {
        let spot = Utc.with_ymd_and_hms(2024, 2, 28, 23, 59, 59).unwrap();
        let date = scheduled_date(spot).unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap());

        let spot = Utc.with_ymd_and_hms(2023, 12, 31, 6, 30, 0).unwrap();
        let date = scheduled_date(spot).unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2024, 1, 1, 6, 30, 0).unwrap());
    }

    #[test]
    fn date_preserves_sub_second_precision() {
        let spot = Utc
            .with_ymd_and_hms(2024, 1, 10, 9, 0, 0)
            .unwrap()
            .with_nanosecond(123_000_000)
            .unwrap();
        let date = scheduled_date(spot).unwrap();
        assert_eq!(date.nanosecond(), 123_000_000);
        assert_eq!((date - spot).num_hours(), 24);
    }

    #[test]
    fn date_is_truncated_to_microseconds() {
        let spot = Utc
            .with_ymd_and_hms(2024, 1, 10, 9, 0, 0)
            .unwrap()
            .with_nanosecond(123_456_789)
            .unwrap();
        let date = scheduled_date(spot).unwrap();
        assert_eq!(date.nanosecond(), 123_456_000);
    }

    #[test]
    fn negative_seats_are_rejected() {
        assert!(validate_available_seats(0).is_ok());
        assert!(matches!(
            validate_available_seats(-3),
            Err(CoreError::Validation(_))
        ));
    }
}
