//! Critical Swim Speed (CSS) calculation engine.
//! Parses flexible time input, validates trial times, and derives pace targets.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod utils;

pub use utils::{parse_time, validate_time_input};

/// Result of a CSS calculation; every field is seconds per 100m.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub css: f64,
    pub pace200: f64,
    pub pace400: f64,
}

/// Trial distance a time input belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialDistance {
    M200,
    M400,
}

/// Plausibility bounds for the two trial times, in seconds.
///
/// Passed into the calculator so embedders tune the limits in one place
/// instead of patching constants in every copy of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CssLimits {
    pub min200: f64,
    pub max200: f64,
    pub min400: f64,
    pub max400: f64,
}

impl Default for CssLimits {
    fn default() -> Self {
        CssLimits {
            min200: config::MIN_TIME_200_SEC,
            max200: config::MAX_TIME_200_SEC,
            min400: config::MIN_TIME_400_SEC,
            max400: config::MAX_TIME_400_SEC,
        }
    }
}

// Validation error types for the calculator and the per-field pre-screen.
// Bound violations carry the violated limit so the message can show it.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    TimesMustBePositive,
    Time200TooFast { minimum: f64 },
    Time200TooSlow { maximum: f64 },
    Time400TooFast { minimum: f64 },
    Time400TooSlow { maximum: f64 },
    Time400MustBeGreater,
    PaceFasterThanExpected,
    InvalidInput,
    SecondsMustBeLessThan60,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::TimesMustBePositive => {
                write!(f, "Times must be positive values")
            }
            ValidationError::Time200TooFast { minimum } => {
                write!(
                    f,
                    "200m time must be at least {}",
                    format_time(Some(*minimum), false)
                )
            }
            ValidationError::Time200TooSlow { maximum } => {
                write!(
                    f,
                    "200m time must be less than {}",
                    format_time(Some(*maximum), false)
                )
            }
            ValidationError::Time400TooFast { minimum } => {
                write!(
                    f,
                    "400m time must be at least {}",
                    format_time(Some(*minimum), false)
                )
            }
            ValidationError::Time400TooSlow { maximum } => {
                write!(
                    f,
                    "400m time must be less than {}",
                    format_time(Some(*maximum), false)
                )
            }
            ValidationError::Time400MustBeGreater => {
                write!(f, "400m time must be greater than 200m time")
            }
            ValidationError::PaceFasterThanExpected => {
                write!(f, "400m pace cannot be faster than 200m pace")
            }
            ValidationError::InvalidInput => write!(f, "Invalid time format"),
            ValidationError::SecondsMustBeLessThan60 => {
                write!(f, "Seconds must be less than 60")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Format seconds as `M:SS`, or `M:SS.d` when tenths are requested and present.
///
/// `None` and NaN both render as "-", the empty-result placeholder.
pub fn format_time(seconds: Option<f64>, include_decimals: bool) -> String {
    let seconds = match seconds {
        Some(s) if !s.is_nan() => s,
        _ => return String::from("-"),
    };

    let minutes = (seconds / 60.0).floor() as u64;
    let remainder = seconds % 60.0;

    if include_decimals && remainder.fract() != 0.0 {
        let whole = remainder.floor() as u64;
        let tenths = (remainder.fract() * 10.0).round() as u64;
        format!("{}:{:02}.{}", minutes, whole, tenths)
    } else {
        // Rounding can land on a seconds value of 60 ("0:60" for 59.6);
        // the missing minute carry matches the long-standing display behavior
        format!("{}:{:02}", minutes, remainder.round() as u64)
    }
}

/// Calculate CSS and per-100m paces from the two trial times, using the
/// default plausibility limits.
pub fn calculate_css(time200: f64, time400: f64) -> Result<CalculationResult, ValidationError> {
    calculate_css_with_limits(time200, time400, &CssLimits::default())
}

/// Calculate CSS and per-100m paces with caller-supplied limits.
///
/// Checks run in a fixed order and the first violated rule decides which
/// error is reported.
pub fn calculate_css_with_limits(
    time200: f64,
    time400: f64,
    limits: &CssLimits,
) -> Result<CalculationResult, ValidationError> {
    if time200 <= 0.0 || time400 <= 0.0 {
        return Err(ValidationError::TimesMustBePositive);
    }

    if time200 < limits.min200 {
        return Err(ValidationError::Time200TooFast {
            minimum: limits.min200,
        });
    }

    if time200 > limits.max200 {
        return Err(ValidationError::Time200TooSlow {
            maximum: limits.max200,
        });
    }

    if time400 < limits.min400 {
        return Err(ValidationError::Time400TooFast {
            minimum: limits.min400,
        });
    }

    if time400 > limits.max400 {
        return Err(ValidationError::Time400TooSlow {
            maximum: limits.max400,
        });
    }

    if time400 <= time200 {
        return Err(ValidationError::Time400MustBeGreater);
    }

    finish_calculation(time200, time400)
}

/// Calculate without the plausibility bounds, keeping only the structural
/// checks. Kept for compatibility with deployments that predate the bounds.
pub fn calculate_css_lenient(
    time200: f64,
    time400: f64,
) -> Result<CalculationResult, ValidationError> {
    if time200 <= 0.0 || time400 <= 0.0 {
        return Err(ValidationError::TimesMustBePositive);
    }

    if time400 <= time200 {
        return Err(ValidationError::Time400MustBeGreater);
    }

    finish_calculation(time200, time400)
}

// Shared tail of both calculator variants: the pace ordering check and the
// CSS arithmetic itself.
fn finish_calculation(time200: f64, time400: f64) -> Result<CalculationResult, ValidationError> {
    // Paces per 100m: 200m pace = time / 2, 400m pace = time / 4
    let pace200 = time200 / 2.0;
    let pace400 = time400 / 4.0;

    // The longer trial cannot imply a faster pace than the shorter one
    if pace400 < pace200 {
        return Err(ValidationError::PaceFasterThanExpected);
    }

    // CSS in seconds per 100m
    let css = (time400 - time200) / 2.0;

    debug!(
        "css {}s/100m from time200={}s time400={}s (pace200={}, pace400={})",
        css, time200, time400, pace200, pace400
    );

    Ok(CalculationResult {
        css,
        pace200,
        pace400,
    })
}

// ──────────────────────────────────────────────────────────────────────────────
// Boundary functions for the web UI

/// Install the panic hook so engine panics surface in the browser console.
#[wasm_bindgen]
pub fn init_engine() {
    console_error_panic_hook::set_once();
}

/// Parse a raw time field from the UI.
#[wasm_bindgen]
pub fn ui_parse_time(input: &str) -> Option<f64> {
    parse_time(input)
}

/// Format a seconds value for display in the UI.
#[wasm_bindgen]
pub fn ui_format_time(seconds: Option<f64>, include_decimals: bool) -> String {
    format_time(seconds, include_decimals)
}

/// Run the CSS calculation for the UI.
///
/// # Returns
/// Serialized `CalculationResult` on success, or the error message string.
#[wasm_bindgen]
pub fn ui_calculate_css(time200: f64, time400: f64) -> JsValue {
    match calculate_css(time200, time400) {
        Ok(result) => serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL),
        Err(e) => serde_wasm_bindgen::to_value(&e.to_string()).unwrap_or(JsValue::NULL),
    }
}

/// Pre-validate a single time field for the UI.
///
/// Returns the message to show under the field, or `None` while the field is
/// valid or still empty.
#[wasm_bindgen]
pub fn ui_validate_time(input: &str, distance: u32) -> Option<String> {
    let distance = match distance {
        200 => TrialDistance::M200,
        400 => TrialDistance::M400,
        _ => return Some(String::from("Unsupported trial distance")),
    };

    match validate_time_input(input, distance, &CssLimits::default()) {
        Ok(_) => None,
        Err(e) => Some(e.to_string()),
    }
}
