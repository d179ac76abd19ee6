//! Tuning constants for the floating elements and the drop target.
//!
//! Distances are in dp unless the name says otherwise. These seed the
//! `Default` impls in [`crate::config`]; engines only ever read the config
//! they were built with.

/// Collision shape factor for round elements.
pub const SHAPE_CIRCLE: f32 = 1.0;

/// Collision shape factor for square elements (diagonal over side).
pub const SHAPE_RECTANGLE: f32 = 1.4142;

/// Scale applied to an element while the pointer is down on it.
pub const SCALE_PRESSED: f32 = 0.9;

pub const SCALE_NORMAL: f32 = 1.0;

/// Time for a tracked element to catch up with a new target after a state
/// change.
pub const CAPTURE_DURATION_MILLIS: u64 = 300;

pub const MOVE_TO_EDGE_DURATION_MILLIS: u64 = 450;

/// Lower bound of the edge-snap overshoot tension, also used for
/// non-velocity settles.
pub const MOVE_TO_EDGE_MIN_TENSION: f32 = 1.25;

pub const MOVE_TO_EDGE_MAX_TENSION: f32 = 4.0;

/// Release speed (px/s) that maps to `MOVE_TO_EDGE_TENSION_FACTOR` tension.
///
/// Empirical; together with the factor it shapes how hard a fast fling
/// bounces off the edge.
pub const MOVE_TO_EDGE_TENSION_VELOCITY: f32 = 3_000.0;

pub const MOVE_TO_EDGE_TENSION_FACTOR: f32 = 2.0;

/// Seconds of release velocity projected forward when picking an edge.
pub const SIDE_CHANGE_HORIZON_SECS: f32 = 0.75;

pub const BACKGROUND_HEIGHT_DP: f32 = 164.0;

/// Horizontal capture margin added on both sides of the trash icon.
pub const TARGET_CAPTURE_HORIZONTAL_DP: f32 = 30.0;

/// Capture margin added above the trash icon.
pub const TARGET_CAPTURE_VERTICAL_DP: f32 = 4.0;

pub const BACKGROUND_DURATION_MILLIS: u64 = 200;

pub const TRASH_OPEN_START_DELAY_MILLIS: u64 = 200;

pub const TRASH_OPEN_DURATION_MILLIS: u64 = 400;

pub const TRASH_CLOSE_DURATION_MILLIS: u64 = 200;

pub const TRASH_OPEN_OVERSHOOT_TENSION: f32 = 1.0;

pub const TRASH_ICON_SCALE_DURATION_MILLIS: u64 = 200;

pub const TRASH_ICON_SCALE_TENSION: f32 = 2.0;

/// Horizontal travel of the trash icon either side of centre.
pub const TRASH_MOVE_LIMIT_OFFSET_X_DP: f32 = 22.0;

pub const TRASH_MOVE_LIMIT_TOP_OFFSET_DP: f32 = -4.0;

/// Share of the background height over which the icon follows the
/// element's height on screen.
pub const TRASH_STICKY_RANGE_RATIO: f32 = 0.20;

/// Haptic pulse when an element starts hovering the drop target.
pub const VIBRATE_INTERSECTS_MILLIS: u64 = 15;
