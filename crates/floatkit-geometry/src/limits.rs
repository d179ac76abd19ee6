//! Position limits for a draggable element.

use crate::{GeometryError, Point, Rect, ScreenMetrics, Size};

/// The two rectangles bounding where an element's window origin may be.
///
/// `position` bounds resting positions after a settle. `movement` is the
/// looser rectangle bounding in-flight positions while a pointer drags the
/// element, which lets it overhang every screen edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionLimits {
    position: Rect,
    movement: Rect,
}

impl PositionLimits {
    /// Derives both rectangles from the screen and the element extent.
    ///
    /// Rejects metrics that would yield an inverted or NaN rectangle so the
    /// caller can keep its previous limits.
    pub fn compute(
        metrics: &ScreenMetrics,
        element: Size,
        over_margin: f32,
    ) -> Result<Self, GeometryError> {
        metrics.validate()?;
        let Size { width, height } = element;

        let position = Rect::from_ltrb(
            -over_margin,
            metrics.status_bar_inset,
            metrics.width - width + over_margin,
            metrics.height - height,
        );
        if position.width < 0.0 || position.height < 0.0 {
            return Err(GeometryError::ElementTooLarge {
                element_width: width,
                element_height: height,
                screen_width: metrics.width,
                screen_height: metrics.height,
            });
        }

        let movement = Rect::from_ltrb(
            -width,
            -height * 2.0,
            metrics.width + width,
            metrics.height + height,
        );

        Ok(Self { position, movement })
    }

    pub fn position_rect(&self) -> Rect {
        self.position
    }

    pub fn movement_rect(&self) -> Rect {
        self.movement
    }

    pub fn clamp_rest(&self, point: Point) -> Point {
        self.position.clamp_point(point)
    }

    pub fn clamp_in_flight(&self, point: Point) -> Point {
        self.movement.clamp_point(point)
    }
}
