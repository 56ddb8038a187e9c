//! # Epoch and Time Conversion
//!
//! Conversions between absolute instants and the day-count and year-based time
//! representations used by VOTable `COOSYS` declarations.
//!
//! All functions are pure. The instant type is [`chrono::DateTime<Utc>`]; the
//! day/year representations are plain `f64` values.
//!
//! | Representation | Definition |
//! |----------------|------------|
//! | Julian Date | `unix_seconds / 86400 + 2440587.5` |
//! | Modified Julian Date | `JD - 2400000.5` |
//! | Besselian Epoch | `1900.0 + (JD - 2415020.31352) / 365.242198781` |
//! | Julian Epoch | `2000.0 + (JD - 2451545.0) / 365.25` |
//!
//! ## Example
//!
//! ```
//! use votable::epoch::{from_julian_epoch, parse_epoch_string, to_julian_date};
//!
//! let j2000 = parse_epoch_string("J2000.0")?;
//! assert_eq!(j2000, from_julian_epoch(2000.0)?);
//! assert!((to_julian_date(&j2000) - 2451545.0).abs() < 1e-9);
//! # Ok::<(), votable::epoch::EpochError>(())
//! ```

use chrono::{DateTime, Utc};

/// Julian Date of the Unix epoch (1970-01-01T00:00:00Z)
pub const UNIX_EPOCH_JD: f64 = 2440587.5;

/// Offset between Julian Date and Modified Julian Date
pub const MJD_ZERO_POINT: f64 = 2400000.5;

/// Julian Date of the J2000.0 epoch
pub const JD2000: f64 = 2451545.0;

/// Julian Date of the B1900.0 epoch
pub const JD1900: f64 = 2415020.31352;

/// Length of the Julian year in days
pub const JULIAN_YEAR_DAYS: f64 = 365.25;

/// Length of the Besselian (tropical) year in days
pub const BESSELIAN_YEAR_DAYS: f64 = 365.242198781;

const SECONDS_PER_DAY: f64 = 86400.0;
const NANOS_PER_SECOND: f64 = 1e9;

/// Errors produced by epoch conversion
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EpochError {
    /// The epoch string is not `B<year>` or `J<year>`
    #[error("Invalid epoch: {0:?}")]
    InvalidEpoch(String),

    /// The value does not correspond to a representable instant
    #[error("Epoch value out of range: {0}")]
    OutOfRange(f64),
}

/// Seconds since the Unix epoch, including the sub-second fraction
fn unix_seconds(instant: &DateTime<Utc>) -> f64 {
    instant.timestamp() as f64 + f64::from(instant.timestamp_subsec_nanos()) / NANOS_PER_SECOND
}

fn from_unix_seconds(seconds: f64) -> Result<DateTime<Utc>, EpochError> {
    // i64 seconds beyond this are far outside chrono's range anyway
    if !seconds.is_finite() || seconds.abs() > 1e15 {
        return Err(EpochError::OutOfRange(seconds));
    }

    let mut whole = seconds.floor();
    let mut nanos = ((seconds - whole) * NANOS_PER_SECOND).round();
    if nanos >= NANOS_PER_SECOND {
        whole += 1.0;
        nanos -= NANOS_PER_SECOND;
    }

    DateTime::from_timestamp(whole as i64, nanos as u32).ok_or(EpochError::OutOfRange(seconds))
}

/// Convert an instant to a Julian Date
pub fn to_julian_date(instant: &DateTime<Utc>) -> f64 {
    unix_seconds(instant) / SECONDS_PER_DAY + UNIX_EPOCH_JD
}

/// Convert an instant to a Modified Julian Date
pub fn to_modified_julian_date(instant: &DateTime<Utc>) -> f64 {
    to_julian_date(instant) - MJD_ZERO_POINT
}

/// Convert an instant to a Besselian epoch (e.g. 1950.0 for B1950.0)
pub fn to_besselian_epoch(instant: &DateTime<Utc>) -> f64 {
    1900.0 + (to_julian_date(instant) - JD1900) / BESSELIAN_YEAR_DAYS
}

/// Convert an instant to a Julian epoch (e.g. 2000.0 for J2000.0)
pub fn to_julian_epoch(instant: &DateTime<Utc>) -> f64 {
    2000.0 + (to_julian_date(instant) - JD2000) / JULIAN_YEAR_DAYS
}

/// Convert a Julian Date to an instant
pub fn from_julian_date(jd: f64) -> Result<DateTime<Utc>, EpochError> {
    if !jd.is_finite() {
        return Err(EpochError::OutOfRange(jd));
    }
    from_unix_seconds((jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY)
}

/// Convert a Modified Julian Date to an instant
pub fn from_modified_julian_date(mjd: f64) -> Result<DateTime<Utc>, EpochError> {
    from_julian_date(mjd + MJD_ZERO_POINT)
}

/// Convert a Besselian epoch to an instant
pub fn from_besselian_epoch(epoch: f64) -> Result<DateTime<Utc>, EpochError> {
    from_julian_date((epoch - 1900.0) * BESSELIAN_YEAR_DAYS + JD1900)
}

/// Convert a Julian epoch to an instant
pub fn from_julian_epoch(epoch: f64) -> Result<DateTime<Utc>, EpochError> {
    from_julian_date((epoch - 2000.0) * JULIAN_YEAR_DAYS + JD2000)
}

/// Parse an epoch string such as `"B1950.0"` or `"J2000.0"`
///
/// Any failure, including a missing or non-numeric year and a year that maps
/// outside the representable range, is reported as [`EpochError::InvalidEpoch`]
/// carrying the original input.
pub fn parse_epoch_string(s: &str) -> Result<DateTime<Utc>, EpochError> {
    let invalid = || EpochError::InvalidEpoch(s.to_string());

    let (convert, year): (fn(f64) -> Result<DateTime<Utc>, EpochError>, &str) =
        if let Some(rest) = s.strip_prefix('B') {
            (from_besselian_epoch, rest)
        } else if let Some(rest) = s.strip_prefix('J') {
            (from_julian_epoch, rest)
        } else {
            return Err(invalid());
        };

    let year: f64 = year.trim().parse().map_err(|_| invalid())?;
    convert(year).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    /// Round-trip tolerance: an f64 Julian Date resolves to roughly 40 microseconds
    const TOLERANCE_NANOS: i64 = 1_000_000;

    fn assert_close(a: &DateTime<Utc>, b: &DateTime<Utc>) {
        let diff = (*a - *b).num_nanoseconds().unwrap().abs();
        assert!(diff < TOLERANCE_NANOS, "{a} vs {b} differ by {diff} ns");
    }

    #[test]
    fn test_unix_epoch_julian_date() {
        let unix = Utc.timestamp_opt(0, 0).unwrap();
        assert_eq!(to_julian_date(&unix), UNIX_EPOCH_JD);
        assert_eq!(to_modified_julian_date(&unix), 40587.0);
    }

    #[test]
    fn test_j2000_constants() {
        let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((to_julian_date(&j2000) - JD2000).abs() < 1e-9);
        assert!((to_julian_epoch(&j2000) - 2000.0).abs() < 1e-9);
        assert_close(&from_julian_epoch(2000.0).unwrap(), &j2000);
    }

    #[test]
    fn test_b1900_constant() {
        let b1900 = from_besselian_epoch(1900.0).unwrap();
        assert!((to_julian_date(&b1900) - JD1900).abs() < 1e-6);
    }

    #[test]
    fn test_b1950_is_before_j2000() {
        let b1950 = from_besselian_epoch(1950.0).unwrap();
        assert_eq!(b1950.format("%Y-%m-%d").to_string(), "1949-12-31");
        assert!((to_besselian_epoch(&b1950) - 1950.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_epoch_string() {
        assert_eq!(
            parse_epoch_string("B1950.0").unwrap(),
            from_besselian_epoch(1950.0).unwrap()
        );
        assert_eq!(
            parse_epoch_string("J2000.0").unwrap(),
            from_julian_epoch(2000.0).unwrap()
        );
        assert_eq!(
            parse_epoch_string("J2015.5").unwrap(),
            from_julian_epoch(2015.5).unwrap()
        );
    }

    #[test]
    fn test_parse_epoch_string_invalid() {
        for bad in ["X2000.0", "J", "B", "", "2000.0", "Jabc", "j2000.0", "JNaN"] {
            assert_eq!(
                parse_epoch_string(bad),
                Err(EpochError::InvalidEpoch(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(from_julian_date(f64::NAN), Err(EpochError::OutOfRange(_))));
        assert!(matches!(from_julian_epoch(f64::INFINITY), Err(EpochError::OutOfRange(_))));
        assert!(from_julian_epoch(1e300).is_err());
    }

    #[test]
    fn test_subsecond_precision_survives() {
        let t = Utc.timestamp_opt(1_234_567_890, 500_000_000).unwrap();
        assert_close(&from_julian_date(to_julian_date(&t)).unwrap(), &t);
    }

    proptest! {
        // 1800-01-01 .. 2200-01-01
        #[test]
        fn prop_round_trips(secs in -5_364_662_400i64..7_258_118_400i64, nanos in 0u32..1_000_000_000u32) {
            let t = Utc.timestamp_opt(secs, nanos).unwrap();
            assert_close(&from_julian_date(to_julian_date(&t)).unwrap(), &t);
            assert_close(&from_modified_julian_date(to_modified_julian_date(&t)).unwrap(), &t);
            assert_close(&from_besselian_epoch(to_besselian_epoch(&t)).unwrap(), &t);
            assert_close(&from_julian_epoch(to_julian_epoch(&t)).unwrap(), &t);
        }
    }
}
