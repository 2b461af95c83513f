//! Formatting helpers for progress output

use std::time::Duration;

/// Format whole seconds as a short human readable duration
pub fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{seconds}s")
    } else if seconds < 3600 {
        let minutes = seconds / 60;
        let remaining_seconds = seconds % 60;
        if remaining_seconds > 0 {
            format!("{minutes}m {remaining_seconds}s")
        } else {
            format!("{minutes}m")
        }
    } else {
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        if minutes > 0 {
            format!("{hours}h {minutes}m")
        } else {
            format!("{hours}h")
        }
    }
}

/// Format a [`Duration`], dropping sub-second precision
pub fn format_elapsed(duration: Duration) -> String {
    format_duration(duration.as_secs())
}
