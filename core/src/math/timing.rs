/// Failure to read a lap or section time string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("empty time field")]
    Empty,
    #[error("unparseable time {0:?}")]
    Malformed(String),
}

/// Parses an exported lap time into seconds.
///
/// Accepts `M:SS.mmm`, `M:SS:mmm` (milliseconds after a second colon) and raw
/// seconds such as `99.167`.
pub fn parse_lap_time(raw: &str) -> Result<f64, TimeParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    let malformed = || TimeParseError::Malformed(trimmed.to_string());
    let number = |part: &str| part.trim().parse::<f64>().map_err(|_| malformed());

    let parts: Vec<&str> = trimmed.split(':').collect();
    let seconds = match parts[..] {
        [minutes, seconds] => number(minutes)? * 60.0 + number(seconds)?,
        [minutes, seconds, millis] => {
            number(minutes)? * 60.0 + number(seconds)? + number(millis)? / 1000.0
        }
        [seconds] => number(seconds)?,
        _ => return Err(malformed()),
    };

    if seconds.is_finite() {
        Ok(seconds)
    } else {
        Err(malformed())
    }
}

/// Formats race-elapsed seconds as `M:SS.mmm`.
pub fn format_race_time(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor();
    let secs = seconds - minutes * 60.0;
    format!("{}:{:06.3}", minutes as u64, secs)
}
