// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! GPS time conversion and file-name timestamps.
//!
//! Series carry their origin as GPS seconds (seconds since
//! 1980-01-06T00:00:00Z, not counting leap seconds). GIF files encode the
//! start of their data in the file name as local civil time, ten digits
//! `YYMMDDHHmm`, which [`parse_filename_timestamp`] turns into UTC.

use std::path::Path;
use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use regex::Regex;

use super::error::{GifError, Result};

/// Unix timestamp of the GPS epoch (1980-01-06T00:00:00Z).
pub const GPS_EPOCH_UNIX: i64 = 315_964_800;

/// Offset of the site-local clock used in GIF file names, in hours east of UTC.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

/// Unix times at which a leap second took effect after the GPS epoch.
const LEAP_SECONDS_UNIX: [i64; 18] = [
    362_793_600,   // 1981-07-01
    394_329_600,   // 1982-07-01
    425_865_600,   // 1983-07-01
    489_024_000,   // 1985-07-01
    567_993_600,   // 1988-01-01
    631_152_000,   // 1990-01-01
    662_688_000,   // 1991-01-01
    709_948_800,   // 1992-07-01
    741_484_800,   // 1993-07-01
    773_020_800,   // 1994-07-01
    820_454_400,   // 1996-01-01
    867_715_200,   // 1997-07-01
    915_148_800,   // 1999-01-01
    1_136_073_600, // 2006-01-01
    1_230_768_000, // 2009-01-01
    1_341_100_800, // 2012-07-01
    1_435_708_800, // 2015-07-01
    1_483_228_800, // 2017-01-01
];

/// Number of leap seconds inserted between the GPS epoch and `unix`.
fn leap_seconds_at_unix(unix: i64) -> i64 {
    LEAP_SECONDS_UNIX.iter().filter(|&&t| unix >= t).count() as i64
}

/// Number of leap seconds in effect at a GPS time.
fn leap_seconds_at_gps(gps: f64) -> i64 {
    LEAP_SECONDS_UNIX
        .iter()
        .enumerate()
        .filter(|(i, &t)| gps >= (t - GPS_EPOCH_UNIX + *i as i64 + 1) as f64)
        .count() as i64
}

/// Convert a UTC instant to GPS seconds.
pub fn to_gps(time: DateTime<Utc>) -> f64 {
    let unix = time.timestamp();
    let frac = f64::from(time.timestamp_subsec_nanos()) * 1e-9;
    (unix - GPS_EPOCH_UNIX + leap_seconds_at_unix(unix)) as f64 + frac
}

/// Convert GPS seconds back to a UTC instant.
///
/// Returns `None` when the value is not finite or out of chrono's range.
pub fn from_gps(gps: f64) -> Option<DateTime<Utc>> {
    if !gps.is_finite() {
        return None;
    }
    let whole = gps.floor();
    let nanos = ((gps - whole) * 1e9).round().min(999_999_999.0) as u32;
    let unix = (whole as i64)
        .checked_add(GPS_EPOCH_UNIX)?
        .checked_sub(leap_seconds_at_gps(whole))?;
    DateTime::<Utc>::from_timestamp(unix, nanos)
}

/// Render a GPS time as a UTC string for log messages.
pub fn format_gps(gps: f64) -> String {
    match from_gps(gps) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string(),
        None => format!("GPS {gps}"),
    }
}

fn stamp_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(?P<stamp>\d{10})(?:\.|$)").expect("valid regex"))
}

/// Parse the `YYMMDDHHmm` prefix of a file's base name as local time at
/// `utc_offset_hours` and return the corresponding UTC instant.
///
/// # Errors
///
/// Returns [`GifError::Parse`] when the base name does not start with ten
/// digits followed by an extension or the end of the name, or when the
/// digits do not form a valid date-time.
///
/// # Example
///
/// ```
/// use gifseries::core::time::parse_filename_timestamp;
///
/// let utc = parse_filename_timestamp("/data/2304151230.dat", 9)?;
/// assert_eq!(utc.to_rfc3339(), "2023-04-15T03:30:00+00:00");
/// # Ok::<(), gifseries::GifError>(())
/// ```
pub fn parse_filename_timestamp<P: AsRef<Path>>(
    path: P,
    utc_offset_hours: i32,
) -> Result<DateTime<Utc>> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            GifError::parse(
                "file name timestamp",
                format!("'{}' has no UTF-8 base name", path.display()),
            )
        })?;

    let stamp = stamp_pattern()
        .captures(name)
        .and_then(|c| c.name("stamp"))
        .ok_or_else(|| {
            GifError::parse(
                "file name timestamp",
                format!("'{name}' does not start with a YYMMDDHHmm timestamp"),
            )
        })?
        .as_str();

    let local = NaiveDateTime::parse_from_str(stamp, "%y%m%d%H%M").map_err(|e| {
        GifError::parse(
            "file name timestamp",
            format!("'{stamp}' in '{name}' is not a valid date-time: {e}"),
        )
    })?;

    let zone = utc_offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            GifError::configuration(format!(
                "UTC offset of {utc_offset_hours} hours is out of range"
            ))
        })?;

    zone.from_local_datetime(&local)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            GifError::parse(
                "file name timestamp",
                format!("'{stamp}' is not representable at UTC{utc_offset_hours:+}"),
            )
        })
}

/// Parse a file name timestamp straight to GPS seconds.
pub fn gps_from_filename<P: AsRef<Path>>(path: P, utc_offset_hours: i32) -> Result<f64> {
    parse_filename_timestamp(path, utc_offset_hours).map(to_gps)
}
