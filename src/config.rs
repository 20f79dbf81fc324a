//! Domain-level configuration constants.

// Plausibility limits for the 200m trial, in seconds
pub const MIN_TIME_200_SEC: f64 = 100.0; // 1:40 - below would be a world record
pub const MAX_TIME_200_SEC: f64 = 360.0; // 6:00

// Plausibility limits for the 400m trial, in seconds
pub const MIN_TIME_400_SEC: f64 = 210.0; // 3:30 - below would be a world record
pub const MAX_TIME_400_SEC: f64 = 720.0; // 12:00

// Parser behavior
// "3.28" is read as 3 minutes 28 seconds only while the minutes part stays
// within a plausible swim-trial range; anything above parses as decimal seconds.
pub const MAX_PERIOD_FORMAT_MINUTES: u32 = 12;
