//! Construction-time tunings for the engines.

use floatkit_core::FRAME_INTERVAL_MILLIS;
use floatkit_foundation::gesture_constants::{
    LONG_PRESS_TIMEOUT_MILLIS, MOVE_THRESHOLD_DP, VELOCITY_HORIZON_MILLIS,
};

use crate::constants::*;

/// Which elements are shown, and whether fullscreen apps hide them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DisplayMode {
    ShowAlways,
    HideAlways,
    #[default]
    HideOnFullscreen,
}

/// Drag motion tunings for one floating element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatingConfig {
    pub move_threshold_dp: f32,
    pub pressed_scale: f32,
    pub frame_interval_millis: u64,
    pub capture_duration_millis: u64,
    pub velocity_horizon_millis: i64,
    pub edge_snap_duration_millis: u64,
    pub edge_snap_min_tension: f32,
    pub edge_snap_max_tension: f32,
    pub edge_snap_tension_velocity: f32,
    pub edge_snap_tension_factor: f32,
    pub side_change_horizon_secs: f32,
}

impl FloatingConfig {
    pub fn with_edge_snap_tension(mut self, min: f32, max: f32) -> Self {
        self.edge_snap_min_tension = min;
        self.edge_snap_max_tension = max.max(min);
        self
    }

    pub fn with_edge_snap_duration(mut self, duration_millis: u64) -> Self {
        self.edge_snap_duration_millis = duration_millis;
        self
    }

    /// Overshoot tension for a release at `velocity_x` px/s.
    pub fn edge_snap_tension(&self, velocity_x: f32) -> f32 {
        let raw = velocity_x.abs() / self.edge_snap_tension_velocity * self.edge_snap_tension_factor;
        raw.clamp(self.edge_snap_min_tension, self.edge_snap_max_tension)
    }
}

impl Default for FloatingConfig {
    fn default() -> Self {
        Self {
            move_threshold_dp: MOVE_THRESHOLD_DP,
            pressed_scale: SCALE_PRESSED,
            frame_interval_millis: FRAME_INTERVAL_MILLIS,
            capture_duration_millis: CAPTURE_DURATION_MILLIS,
            velocity_horizon_millis: VELOCITY_HORIZON_MILLIS,
            edge_snap_duration_millis: MOVE_TO_EDGE_DURATION_MILLIS,
            edge_snap_min_tension: MOVE_TO_EDGE_MIN_TENSION,
            edge_snap_max_tension: MOVE_TO_EDGE_MAX_TENSION,
            edge_snap_tension_velocity: MOVE_TO_EDGE_TENSION_VELOCITY,
            edge_snap_tension_factor: MOVE_TO_EDGE_TENSION_FACTOR,
            side_change_horizon_secs: SIDE_CHANGE_HORIZON_SECS,
        }
    }
}

/// Drop target (trash) tunings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropTargetConfig {
    pub frame_interval_millis: u64,
    pub background_height_dp: f32,
    pub capture_horizontal_dp: f32,
    pub capture_vertical_dp: f32,
    pub background_duration_millis: u64,
    pub open_delay_millis: u64,
    pub open_duration_millis: u64,
    pub close_duration_millis: u64,
    pub open_overshoot_tension: f32,
    pub scale_duration_millis: u64,
    pub scale_overshoot_tension: f32,
    pub move_limit_offset_x_dp: f32,
    pub move_limit_top_offset_dp: f32,
    pub sticky_range_ratio: f32,
}

impl DropTargetConfig {
    pub fn with_open_timing(mut self, delay_millis: u64, duration_millis: u64) -> Self {
        self.open_delay_millis = delay_millis;
        self.open_duration_millis = duration_millis;
        self
    }
}

impl Default for DropTargetConfig {
    fn default() -> Self {
        Self {
            frame_interval_millis: FRAME_INTERVAL_MILLIS,
            background_height_dp: BACKGROUND_HEIGHT_DP,
            capture_horizontal_dp: TARGET_CAPTURE_HORIZONTAL_DP,
            capture_vertical_dp: TARGET_CAPTURE_VERTICAL_DP,
            background_duration_millis: BACKGROUND_DURATION_MILLIS,
            open_delay_millis: TRASH_OPEN_START_DELAY_MILLIS,
            open_duration_millis: TRASH_OPEN_DURATION_MILLIS,
            close_duration_millis: TRASH_CLOSE_DURATION_MILLIS,
            open_overshoot_tension: TRASH_OPEN_OVERSHOOT_TENSION,
            scale_duration_millis: TRASH_ICON_SCALE_DURATION_MILLIS,
            scale_overshoot_tension: TRASH_ICON_SCALE_TENSION,
            move_limit_offset_x_dp: TRASH_MOVE_LIMIT_OFFSET_X_DP,
            move_limit_top_offset_dp: TRASH_MOVE_LIMIT_TOP_OFFSET_DP,
            sticky_range_ratio: TRASH_STICKY_RANGE_RATIO,
        }
    }
}

/// Everything the coordinator needs at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ManagerConfig {
    pub floating: FloatingConfig,
    pub drop_target: DropTargetConfig,
    pub vibrate_millis: u64,
    pub long_press_timeout_millis: u64,
    pub display_mode: DisplayMode,
}

impl ManagerConfig {
    pub fn new() -> Self {
        Self {
            floating: FloatingConfig::default(),
            drop_target: DropTargetConfig::default(),
            vibrate_millis: VIBRATE_INTERSECTS_MILLIS,
            long_press_timeout_millis: LONG_PRESS_TIMEOUT_MILLIS,
            display_mode: DisplayMode::default(),
        }
    }

    pub fn with_display_mode(mut self, display_mode: DisplayMode) -> Self {
        self.display_mode = display_mode;
        self
    }

    pub fn with_floating(mut self, floating: FloatingConfig) -> Self {
        self.floating = floating;
        self
    }

    pub fn with_drop_target(mut self, drop_target: DropTargetConfig) -> Self {
        self.drop_target = drop_target;
        self
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_snap_tension_is_clamped() {
        let config = FloatingConfig::default();
        assert_eq!(config.edge_snap_tension(0.0), 1.25);
        assert_eq!(config.edge_snap_tension(-3_000.0), 2.0);
        assert_eq!(config.edge_snap_tension(3_000.0), 2.0);
        assert_eq!(config.edge_snap_tension(50_000.0), 4.0);
    }

    #[test]
    fn edge_snap_tension_range_is_configurable() {
        let config = FloatingConfig::default().with_edge_snap_tension(0.5, 1.0);
        assert_eq!(config.edge_snap_tension(0.0), 0.5);
        assert_eq!(config.edge_snap_tension(10_000.0), 1.0);
    }
}
