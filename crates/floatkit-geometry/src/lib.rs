//! Pure geometry for Floatkit
//!
//! Points, sizes and rectangles in screen pixels, density-independent units,
//! and the screen-derived limit rectangles consumed by the motion engines.

mod error;
mod geometry;
mod limits;
mod metrics;
mod unit;

pub use error::*;
pub use geometry::*;
pub use limits::*;
pub use metrics::*;
pub use unit::*;

pub mod prelude {
    pub use crate::error::GeometryError;
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::limits::PositionLimits;
    pub use crate::metrics::ScreenMetrics;
    pub use crate::unit::Dp;
}
