//! ISO-8601 duration parsing (`P[nD][T[nH][nM][nS]]`).
//!
//! Only the day/hour/minute/second designators are supported, which covers every
//! duration the song metadata provider reports.

use std::{sync::LazyLock, time::Duration};

use regex::Regex;

use super::DurationParseError;

static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+(?:\.\d+)?)S)?)?$")
        .expect("ISO duration pattern is valid")
});

const SECONDS_PER_DAY: f64 = 86_400.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Longest duration accepted for a queued song (30 days).
pub const MAX_DURATION_SECS: f64 = 30.0 * SECONDS_PER_DAY;

/// Parse an ISO-8601 duration such as `PT3M15S` or `P1DT2H`.
///
/// Missing components default to zero. A string with no recognizable component
/// (`""`, `"P"`, `"PT"`, `"3 minutes"`) is an error, and so is anything longer
/// than [`MAX_DURATION_SECS`].
pub fn parse_iso_duration(value: &str) -> Result<Duration, DurationParseError> {
    let invalid = || DurationParseError(value.to_string());
    let captures = ISO_DURATION.captures(value.trim()).ok_or_else(invalid)?;

    let units = [
        SECONDS_PER_DAY,
        SECONDS_PER_HOUR,
        SECONDS_PER_MINUTE,
        1.0,
    ];
    let mut matched_any = false;
    let mut seconds = 0.0;
    for (index, unit) in units.iter().enumerate() {
        if let Some(component) = captures.get(index + 1) {
            let amount: f64 = component.as_str().parse().map_err(|_| invalid())?;
            seconds += amount * unit;
            matched_any = true;
        }
    }

    if !matched_any || seconds > MAX_DURATION_SECS {
        return Err(invalid());
    }
    Duration::try_from_secs_f64(seconds).map_err(|_| invalid())
}
