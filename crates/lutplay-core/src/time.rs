//! Clock-style time readout for the transport display.

/// Threshold above which durations display an hour component.
pub const HOUR_SECONDS: f64 = 3600.0;

/// Whether a duration is long enough to show hours (`H:MM:SS`).
#[inline]
pub fn include_hours_for(duration: f64) -> bool {
    duration >= HOUR_SECONDS
}

/// Format a time in seconds as `MM:SS`, or `H:MM:SS` when `include_hours`.
///
/// All components truncate toward zero (floor), never round: 59.9 s reads
/// `00:59`. Minutes and seconds are zero-padded, the hour digit is not.
/// NaN and negative inputs clamp to zero.
pub fn format_clock(seconds: f64, include_hours: bool) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    let secs = total % 60;
    let mins = (total / 60) % 60;
    let hours = total / 3600;

    if include_hours {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}
