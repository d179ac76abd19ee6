//! Side effects the engines ask the embedding window system to perform.

use std::fmt;

use crate::ElementId;

/// A host-side surface the engines render into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Surface {
    Element(ElementId),
    DropTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The capability does not exist on this host.
    Unavailable(&'static str),
    Failed(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Unavailable(what) => write!(f, "{what} is not available"),
            HostError::Failed(reason) => write!(f, "host call failed: {reason}"),
        }
    }
}

impl std::error::Error for HostError {}

/// Window system hooks.
///
/// Positions are window origins in screen pixels with the origin at the top
/// left and y growing downwards. Drop target translations are relative to
/// the icon's rest slot centred on the bottom edge.
pub trait FloatingHost {
    fn apply_position(&mut self, element: ElementId, x: i32, y: i32);

    fn apply_element_scale(&mut self, element: ElementId, scale: f32);

    fn set_element_visible(&mut self, element: ElementId, visible: bool);

    /// Delivers a tap that never crossed the move threshold.
    fn perform_click(&mut self, element: ElementId);

    /// Detaches the element's window once its session is over.
    fn remove_element(&mut self, element: ElementId);

    fn apply_opacity(&mut self, alpha: f32);

    fn apply_translation(&mut self, dx: f32, dy: f32);

    fn apply_scale(&mut self, sx: f32, sy: f32);

    fn vibrate(&mut self, millis: u64) -> Result<(), HostError>;

    /// Whether `surface` can still be drawn to. Ticks for a detached
    /// surface are dropped along with the rest of its pending updates.
    fn is_attached(&self, _surface: Surface) -> bool {
        true
    }
}

impl<H: FloatingHost + ?Sized> FloatingHost for Box<H> {
    fn apply_position(&mut self, element: ElementId, x: i32, y: i32) {
        (**self).apply_position(element, x, y)
    }

    fn apply_element_scale(&mut self, element: ElementId, scale: f32) {
        (**self).apply_element_scale(element, scale)
    }

    fn set_element_visible(&mut self, element: ElementId, visible: bool) {
        (**self).set_element_visible(element, visible)
    }

    fn perform_click(&mut self, element: ElementId) {
        (**self).perform_click(element)
    }

    fn remove_element(&mut self, element: ElementId) {
        (**self).remove_element(element)
    }

    fn apply_opacity(&mut self, alpha: f32) {
        (**self).apply_opacity(alpha)
    }

    fn apply_translation(&mut self, dx: f32, dy: f32) {
        (**self).apply_translation(dx, dy)
    }

    fn apply_scale(&mut self, sx: f32, sy: f32) {
        (**self).apply_scale(sx, sy)
    }

    fn vibrate(&mut self, millis: u64) -> Result<(), HostError> {
        (**self).vibrate(millis)
    }

    fn is_attached(&self, surface: Surface) -> bool {
        (**self).is_attached(surface)
    }
}
