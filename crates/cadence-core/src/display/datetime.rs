//! Time display utilities.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// A wrapper around `Timestamp` that formats the wall-clock time of day in
/// the system timezone, as `HH:MM:SS`.
///
/// Used to stamp transitions in event logs.
pub struct LocalTime<'a>(pub &'a Timestamp);

impl<'a> fmt::Display for LocalTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0.to_zoned(TimeZone::system()).strftime("%H:%M:%S")
        )
    }
}

/// Human-readable approximation of a millisecond duration.
///
/// Whole seconds print without decimals (`9 seconds`), anything else with a
/// single decimal (`1.5 seconds`).
pub struct ApproxDuration(pub u64);

impl fmt::Display for ApproxDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.0;
        if millis % 1000 == 0 {
            let secs = millis / 1000;
            let unit = if secs == 1 { "second" } else { "seconds" };
            write!(f, "{secs} {unit}")
        } else {
            write!(f, "{:.1} seconds", millis as f64 / 1000.0)
        }
    }
}
