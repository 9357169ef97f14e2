use std::time::Duration;

/// Format a playback time as `M:SS`, or `H:MM:SS` past the hour.
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Same as [`format_duration`] for raw seconds. Negative and non-finite
/// values render as `0:00`.
pub fn format_seconds(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return format_duration(Duration::ZERO);
    }
    format_duration(Duration::from_secs_f64(seconds))
}
