use crate::config::MAX_PERIOD_FORMAT_MINUTES;
use crate::{CssLimits, TrialDistance, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;

// Compiled regex for the period-separated time format
static TIME_PERIOD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\.(\d{2})$").unwrap());

/// Parse a flexible time string into total seconds.
///
/// Supported formats:
/// - Colon separator: "3:28" or "3:28.5"
/// - Space separator: "3 28" or "3 28.5"
/// - Period separator: "3.28" (minutes.seconds, exactly two seconds digits)
/// - Plain seconds: "208" or "208.5"
///
/// Malformed input yields `None`; the parser never panics.
///
/// # Examples
/// ```
/// use css_calculator::parse_time;
///
/// assert_eq!(parse_time("3:28"), Some(208.0));
/// assert_eq!(parse_time("3 28"), Some(208.0));
/// assert_eq!(parse_time("3.28"), Some(208.0));
/// assert_eq!(parse_time("208.5"), Some(208.5));
/// ```
pub fn parse_time(input: &str) -> Option<f64> {
    let trimmed = input.trim();

    // Check for MM:SS format (colon separator, decimal seconds allowed).
    // A malformed colon input is rejected here, never re-read as plain seconds.
    if trimmed.contains(':') {
        let parts: Vec<&str> = trimmed.split(':').collect();
        if parts.len() == 2 {
            if let (Ok(minutes), Ok(seconds)) = (parts[0].parse::<u32>(), parts[1].parse::<f64>()) {
                if seconds >= 0.0 && seconds < 60.0 {
                    return Some(f64::from(minutes) * 60.0 + seconds);
                }
            }
        }
        return None;
    }

    // Check for MM SS format (space separator), same rules as the colon form
    if trimmed.contains(char::is_whitespace) {
        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        if parts.len() == 2 {
            if let (Ok(minutes), Ok(seconds)) = (parts[0].parse::<u32>(), parts[1].parse::<f64>()) {
                if seconds >= 0.0 && seconds < 60.0 {
                    return Some(f64::from(minutes) * 60.0 + seconds);
                }
            }
        }
        return None;
    }

    // Check for MM.SS format (period as separator, not a decimal point).
    // Only an all-digits X.YY shape with minutes within the plausible range
    // qualifies; anything else falls through to the plain-seconds branch.
    if let Some(captures) = TIME_PERIOD_REGEX.captures(trimmed) {
        if let (Ok(minutes), Ok(seconds)) =
            (captures[1].parse::<u32>(), captures[2].parse::<u32>())
        {
            if minutes <= MAX_PERIOD_FORMAT_MINUTES {
                if seconds < 60 {
                    return Some(f64::from(minutes) * 60.0 + f64::from(seconds));
                }
                // "1.60" reads as 1 minute 60 seconds, which is invalid,
                // not as 1.6 seconds
                return None;
            }
        }
    }

    // Try as total seconds, decimals allowed
    match trimmed.parse::<f64>() {
        Ok(seconds) if seconds.is_finite() && seconds > 0.0 => Some(seconds),
        _ => None,
    }
}

/// Pre-screen a single trial input field before the full calculation.
///
/// Distinguishes an out-of-range seconds component (a correctable typo worth
/// its own message) from generally unparseable input, then checks the parsed
/// value against the plausibility bounds for the given trial distance. An
/// empty field is not an error; there is nothing to report yet.
pub fn validate_time_input(
    input: &str,
    distance: TrialDistance,
    limits: &CssLimits,
) -> Result<Option<f64>, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if has_out_of_range_seconds(trimmed) {
        return Err(ValidationError::SecondsMustBeLessThan60);
    }

    let time = parse_time(trimmed).ok_or(ValidationError::InvalidInput)?;

    match distance {
        TrialDistance::M200 => {
            if time < limits.min200 {
                return Err(ValidationError::Time200TooFast {
                    minimum: limits.min200,
                });
            }
            if time > limits.max200 {
                return Err(ValidationError::Time200TooSlow {
                    maximum: limits.max200,
                });
            }
        }
        TrialDistance::M400 => {
            if time < limits.min400 {
                return Err(ValidationError::Time400TooFast {
                    minimum: limits.min400,
                });
            }
            if time > limits.max400 {
                return Err(ValidationError::Time400TooSlow {
                    maximum: limits.max400,
                });
            }
        }
    }

    Ok(Some(time))
}

// True when a two-part input has a seconds component that parses but lands at
// 60 or above, in any of the separator formats.
fn has_out_of_range_seconds(trimmed: &str) -> bool {
    if trimmed.contains(':') {
        let parts: Vec<&str> = trimmed.split(':').collect();
        if parts.len() == 2 {
            if let Ok(seconds) = parts[1].parse::<f64>() {
                return seconds >= 60.0;
            }
        }
        return false;
    }

    if trimmed.contains(char::is_whitespace) {
        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        if parts.len() == 2 {
            if let Ok(seconds) = parts[1].parse::<f64>() {
                return seconds >= 60.0;
            }
        }
        return false;
    }

    if let Some(captures) = TIME_PERIOD_REGEX.captures(trimmed) {
        if let (Ok(minutes), Ok(seconds)) =
            (captures[1].parse::<u32>(), captures[2].parse::<u32>())
        {
            return minutes <= MAX_PERIOD_FORMAT_MINUTES && seconds >= 60;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_colon_format() {
        assert_eq!(parse_time("1:46"), Some(106.0));
        assert_eq!(parse_time("3:28"), Some(208.0));
        assert_eq!(parse_time("7:20"), Some(440.0));
        assert_eq!(parse_time("0:45"), Some(45.0));
        assert_eq!(parse_time("10:00"), Some(600.0));
    }

    #[test]
    fn parses_colon_format_with_decimal_seconds() {
        assert_eq!(parse_time("1:46.5"), Some(106.5));
        assert_eq!(parse_time("3:28.25"), Some(208.25));
        assert_eq!(parse_time("0:45.1"), Some(45.1));
        assert_eq!(parse_time("3:28.9"), Some(208.9));
        assert_eq!(parse_time("7:20.05"), Some(440.05));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(parse_time("  1:46  "), Some(106.0));
        assert_eq!(parse_time("  208  "), Some(208.0));
    }

    #[test]
    fn malformed_colon_input_does_not_fall_through() {
        assert_eq!(parse_time("1:60"), None);
        assert_eq!(parse_time("1:65"), None);
        assert_eq!(parse_time("1:2:3"), None);
        assert_eq!(parse_time("3:"), None);
        assert_eq!(parse_time(":28"), None);
        assert_eq!(parse_time("-1:30"), None);
        assert_eq!(parse_time("3:abc"), None);
    }

    #[test]
    fn parses_space_format() {
        assert_eq!(parse_time("3 28"), Some(208.0));
        assert_eq!(parse_time("7 20"), Some(440.0));
        assert_eq!(parse_time("1 05"), Some(65.0));
        assert_eq!(parse_time("0 45"), Some(45.0));
        assert_eq!(parse_time("3  28"), Some(208.0));
        assert_eq!(parse_time("3 28.5"), Some(208.5));
    }

    #[test]
    fn malformed_space_input_does_not_fall_through() {
        assert_eq!(parse_time("1 60"), None);
        assert_eq!(parse_time("1 65"), None);
        assert_eq!(parse_time("3 28 5"), None);
        assert_eq!(parse_time("a 28"), None);
    }

    #[test]
    fn parses_period_format_as_minutes_and_seconds() {
        assert_eq!(parse_time("3.28"), Some(208.0));
        assert_eq!(parse_time("7.20"), Some(440.0));
        assert_eq!(parse_time("1.05"), Some(65.0));
        assert_eq!(parse_time("0.30"), Some(30.0));
        assert_eq!(parse_time("10.00"), Some(600.0));
    }

    #[test]
    fn period_format_minutes_boundary() {
        // 12 minutes is still a plausible trial time, 13 is not
        assert_eq!(parse_time("12.30"), Some(750.0));
        assert_eq!(parse_time("13.30"), Some(13.3));
    }

    #[test]
    fn period_format_with_invalid_seconds_is_rejected() {
        assert_eq!(parse_time("1.60"), None);
        assert_eq!(parse_time("1.75"), None);
    }

    #[test]
    fn non_period_shapes_parse_as_decimal_seconds() {
        assert_eq!(parse_time("3.2"), Some(3.2));
        assert_eq!(parse_time("3.289"), Some(3.289));
        assert_eq!(parse_time("208.5"), Some(208.5));
        assert_eq!(parse_time("440.25"), Some(440.25));
    }

    #[test]
    fn parses_plain_seconds() {
        assert_eq!(parse_time("106"), Some(106.0));
        assert_eq!(parse_time("208"), Some(208.0));
        assert_eq!(parse_time("440"), Some(440.0));
        assert_eq!(parse_time("500"), Some(500.0));
    }

    #[test]
    fn rejects_empty_and_non_numeric_input() {
        assert_eq!(parse_time(""), None);
        assert_eq!(parse_time("   "), None);
        assert_eq!(parse_time("abc"), None);
    }

    #[test]
    fn rejects_zero_negative_and_non_finite_seconds() {
        assert_eq!(parse_time("0"), None);
        assert_eq!(parse_time("-100"), None);
        assert_eq!(parse_time("inf"), None);
        assert_eq!(parse_time("NaN"), None);
    }

    #[test]
    fn round_trips_canonical_minute_second_strings() {
        for input in ["1:46", "3:28", "7:20", "0:45", "10:00"] {
            let seconds = parse_time(input).unwrap();
            let formatted = crate::format_time(Some(seconds), false);
            assert_eq!(parse_time(&formatted), Some(seconds), "input {input}");
        }
    }

    #[test]
    fn validate_empty_field_reports_nothing() {
        let limits = CssLimits::default();
        assert_eq!(
            validate_time_input("", TrialDistance::M200, &limits),
            Ok(None)
        );
        assert_eq!(
            validate_time_input("   ", TrialDistance::M400, &limits),
            Ok(None)
        );
    }

    #[test]
    fn validate_flags_out_of_range_seconds_component() {
        let limits = CssLimits::default();
        for input in ["1:75", "1 75", "1.75", "1:60"] {
            assert_eq!(
                validate_time_input(input, TrialDistance::M200, &limits),
                Err(ValidationError::SecondsMustBeLessThan60),
                "input {input}"
            );
        }
    }

    #[test]
    fn validate_flags_unparseable_input() {
        let limits = CssLimits::default();
        assert_eq!(
            validate_time_input("abc", TrialDistance::M200, &limits),
            Err(ValidationError::InvalidInput)
        );
        assert_eq!(
            validate_time_input("1:2:3", TrialDistance::M400, &limits),
            Err(ValidationError::InvalidInput)
        );
    }

    #[test]
    fn validate_checks_bounds_per_distance() {
        let limits = CssLimits::default();
        assert_eq!(
            validate_time_input("0:50", TrialDistance::M200, &limits),
            Err(ValidationError::Time200TooFast { minimum: 100.0 })
        );
        assert_eq!(
            validate_time_input("7:00", TrialDistance::M200, &limits),
            Err(ValidationError::Time200TooSlow { maximum: 360.0 })
        );
        assert_eq!(
            validate_time_input("3:00", TrialDistance::M400, &limits),
            Err(ValidationError::Time400TooFast { minimum: 210.0 })
        );
        assert_eq!(
            validate_time_input("13:00", TrialDistance::M400, &limits),
            Err(ValidationError::Time400TooSlow { maximum: 720.0 })
        );
    }

    #[test]
    fn validate_accepts_plausible_trial_times() {
        let limits = CssLimits::default();
        assert_eq!(
            validate_time_input("3:28", TrialDistance::M200, &limits),
            Ok(Some(208.0))
        );
        assert_eq!(
            validate_time_input("7:20", TrialDistance::M400, &limits),
            Ok(Some(440.0))
        );
    }
}
