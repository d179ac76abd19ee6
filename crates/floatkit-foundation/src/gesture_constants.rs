//! Shared gesture constants for consistent pointer handling.
//!
//! Distances are in density-independent pixels and must be scaled by the
//! screen density before being compared with raw pointer coordinates.

/// Drag threshold in dp.
///
/// Until the pointer travels further than this on either axis from where it
/// went down, the gesture is still a tap: the element does not follow and a
/// release is delivered as a click.
pub const MOVE_THRESHOLD_DP: f32 = 8.0;

/// Delay after pointer-down before the drop target opens on its own, in
/// milliseconds. An accepted drag opens it sooner.
pub const LONG_PRESS_TIMEOUT_MILLIS: u64 = 500;

/// Window of samples considered when estimating release velocity.
pub const VELOCITY_HORIZON_MILLIS: i64 = 1_000;

/// Maximum release velocity in pixels per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;
