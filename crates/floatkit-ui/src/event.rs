//! Identifiers, states and the notifications drained by the host.

use std::fmt;

/// Handle of a floating element owned by the manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Drag state of one element. `Finishing` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ElementState {
    #[default]
    Normal,
    /// Hovering the drop target; motion follows the target icon.
    Intersecting,
    /// Dropped onto the target and waiting for its close to end.
    Finishing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropTargetAnimation {
    Open,
    Close,
    /// Instant reset without animation.
    ForceClose,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatingEvent {
    ElementStateChanged {
        element: ElementId,
        state: ElementState,
    },
    DropTargetAnimationStarted(DropTargetAnimation),
    DropTargetAnimationEnded(DropTargetAnimation),
    /// The element was dropped and has been removed.
    SessionFinished(ElementId),
    /// The last element was removed by a drop.
    AllElementsRemoved,
}
