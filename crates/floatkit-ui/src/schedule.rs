//! Animation channels shared by the engines.

use floatkit_core::TickScheduler;

use crate::{ElementId, Surface};

/// One live run per channel. Tracking and edge snapping share an element's
/// channel so starting either cancels the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationChannel {
    Element(ElementId),
    DropTargetMotion,
    DropTargetScale,
}

impl AnimationChannel {
    pub fn surface(&self) -> Surface {
        match self {
            AnimationChannel::Element(id) => Surface::Element(*id),
            AnimationChannel::DropTargetMotion | AnimationChannel::DropTargetScale => {
                Surface::DropTarget
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationCode {
    Track,
    EdgeSnap,
    Open,
    Close,
    ScaleUp,
    ScaleDown,
}

pub type AnimationScheduler = TickScheduler<AnimationChannel, AnimationCode>;

pub type AnimationTick = floatkit_core::Tick<AnimationChannel, AnimationCode>;
