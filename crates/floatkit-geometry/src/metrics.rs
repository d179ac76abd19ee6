//! Screen metrics snapshot

use crate::{Dp, GeometryError};

/// Copy-on-read snapshot of the display the overlay lives on.
///
/// Engines keep their own copy; a refresh never mutates a snapshot that an
/// in-flight animation is still reading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenMetrics {
    pub width: f32,
    pub height: f32,
    /// Physical pixels per density-independent pixel.
    pub density: f32,
    /// Height of the system status bar along the top edge, in pixels.
    pub status_bar_inset: f32,
}

impl ScreenMetrics {
    pub fn new(
        width: f32,
        height: f32,
        density: f32,
        status_bar_inset: f32,
    ) -> Result<Self, GeometryError> {
        let metrics = Self {
            width,
            height,
            density,
            status_bar_inset,
        };
        metrics.validate()?;
        Ok(metrics)
    }

    /// Every extent and the density must be finite and positive.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let usable = |value: f32| value.is_finite() && value > 0.0;
        if !(usable(self.width) && usable(self.height) && usable(self.density)) {
            return Err(GeometryError::DegenerateScreen {
                width: self.width,
                height: self.height,
                density: self.density,
            });
        }
        Ok(())
    }

    pub fn dp(&self, value: f32) -> f32 {
        Dp(value).to_px(self.density)
    }

    pub fn same_extent(&self, other: &ScreenMetrics) -> bool {
        self.width == other.width && self.height == other.height
    }
}
