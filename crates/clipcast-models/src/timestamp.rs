//! Timecode parsing and span validation.
//!
//! Clips carry human-readable timecodes (`H:MM:SS` or `M:SS`, bare seconds
//! tolerated). All span math goes through [`validate_span`] so duration is
//! always derived from the parsed endpoints.

use thiserror::Error;

/// Ceiling on any single timecode (24 hours in seconds).
pub const MAX_TIMECODE_SECS: f64 = 86_400.0;

/// Timecode parsing/validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimecodeError {
    #[error("timecode is empty")]
    Empty,

    #[error("invalid {field} value '{value}'")]
    Component { field: &'static str, value: String },

    #[error("timecode '{0}' is not H:MM:SS, M:SS, or SS")]
    Malformed(String),

    #[error("timecode components cannot be negative")]
    Negative,

    #[error("start time must be strictly before end time")]
    SpanOrder,

    #[error("timecode {0:.1}s exceeds the 24 hour ceiling")]
    BeyondCeiling(f64),

    #[error("end time ({end_secs:.1}s) is past the video duration ({video_secs:.1}s)")]
    PastVideoEnd { end_secs: f64, video_secs: f64 },
}

fn component(field: &'static str, raw: &str) -> Result<f64, TimecodeError> {
    let value: f64 = raw.parse().map_err(|_| TimecodeError::Component {
        field,
        value: raw.to_string(),
    })?;
    if value < 0.0 {
        return Err(TimecodeError::Negative);
    }
    Ok(value)
}

/// Parse a timecode string to total seconds.
///
/// # Examples
/// ```
/// use clipcast_models::timestamp::parse_timecode;
/// assert_eq!(parse_timecode("1:30").unwrap(), 90.0);
/// assert_eq!(parse_timecode("1:45").unwrap(), 105.0);
/// assert_eq!(parse_timecode("1:00:05").unwrap(), 3605.0);
/// ```
pub fn parse_timecode(raw: &str) -> Result<f64, TimecodeError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TimecodeError::Empty);
    }

    let mut parts = raw.split(':').rev();
    let seconds = component("seconds", parts.next().expect("split yields at least one part"))?;
    let minutes = parts.next().map(|p| component("minutes", p)).transpose()?;
    let hours = parts.next().map(|p| component("hours", p)).transpose()?;

    if parts.next().is_some() {
        return Err(TimecodeError::Malformed(raw.to_string()));
    }

    Ok(hours.unwrap_or(0.0) * 3600.0 + minutes.unwrap_or(0.0) * 60.0 + seconds)
}

/// Format seconds as a zero-padded `HH:MM:SS` timecode.
///
/// Fractional seconds are kept to millisecond precision when present.
pub fn format_seconds(total_secs: f64) -> String {
    let hours = (total_secs / 3600.0).floor() as u32;
    let minutes = ((total_secs % 3600.0) / 60.0).floor() as u32;
    let seconds = total_secs % 60.0;

    if (seconds - seconds.floor()).abs() > 0.0001 {
        format!("{:02}:{:02}:{:06.3}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds.floor() as u32)
    }
}

/// A validated start/end pair with its derived duration.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSpan {
    /// Start time in seconds
    pub start_secs: f64,
    /// End time in seconds
    pub end_secs: f64,
    /// Whole-second duration, `end - start` rounded down
    pub duration_seconds: u32,
}

/// Validate a start/end timecode pair.
///
/// Checks that both timecodes parse, that start is strictly before end, that
/// neither exceeds the 24-hour ceiling, and that the span fits inside the
/// video when its duration is known (with a one-second slack for rounded
/// source durations).
pub fn validate_span(
    start: &str,
    end: &str,
    video_duration: Option<f64>,
) -> Result<ValidatedSpan, TimecodeError> {
    let start_secs = parse_timecode(start)?;
    let end_secs = parse_timecode(end)?;

    if start_secs >= end_secs {
        return Err(TimecodeError::SpanOrder);
    }
    if end_secs > MAX_TIMECODE_SECS {
        return Err(TimecodeError::BeyondCeiling(end_secs));
    }
    if let Some(video_secs) = video_duration {
        if end_secs > video_secs + 1.0 {
            return Err(TimecodeError::PastVideoEnd { end_secs, video_secs });
        }
    }

    Ok(ValidatedSpan {
        start_secs,
        end_secs,
        duration_seconds: (end_secs - start_secs) as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minute_second_form() {
        assert_eq!(parse_timecode("1:30").unwrap(), 90.0);
        assert_eq!(parse_timecode("1:45").unwrap(), 105.0);
        assert_eq!(parse_timecode("53:53").unwrap(), 3233.0);
    }

    #[test]
    fn parses_hour_minute_second_form() {
        assert_eq!(parse_timecode("0:00:00").unwrap(), 0.0);
        assert_eq!(parse_timecode("1:00:05").unwrap(), 3605.0);
        assert_eq!(parse_timecode("01:30:45").unwrap(), 5445.0);
    }

    #[test]
    fn parses_bare_and_fractional_seconds() {
        assert_eq!(parse_timecode("90").unwrap(), 90.0);
        let secs = parse_timecode("0:30.500").unwrap();
        assert!((secs - 30.5).abs() < 0.001);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timecode(""), Err(TimecodeError::Empty));
        assert_eq!(parse_timecode("   "), Err(TimecodeError::Empty));
        assert!(matches!(parse_timecode("abc"), Err(TimecodeError::Component { .. })));
        assert!(matches!(parse_timecode("1:2:3:4"), Err(TimecodeError::Malformed(_))));
        assert_eq!(parse_timecode("-1:30"), Err(TimecodeError::Negative));
    }

    #[test]
    fn formats_seconds() {
        assert_eq!(format_seconds(0.0), "00:00:00");
        assert_eq!(format_seconds(90.0), "00:01:30");
        assert_eq!(format_seconds(3661.0), "01:01:01");
    }

    #[test]
    fn validates_a_span() {
        let span = validate_span("1:30", "1:45", None).unwrap();
        assert_eq!(span.start_secs, 90.0);
        assert_eq!(span.end_secs, 105.0);
        assert_eq!(span.duration_seconds, 15);
    }

    #[test]
    fn rejects_inverted_and_empty_spans() {
        assert_eq!(validate_span("2:00", "1:00", None), Err(TimecodeError::SpanOrder));
        assert_eq!(validate_span("1:00", "1:00", None), Err(TimecodeError::SpanOrder));
    }

    #[test]
    fn rejects_span_past_video_end() {
        let result = validate_span("0:00", "5:00", Some(240.0));
        assert!(matches!(result, Err(TimecodeError::PastVideoEnd { .. })));
        // One second of slack for rounded source durations
        assert!(validate_span("0:00", "4:01", Some(240.0)).is_ok());
    }
}
