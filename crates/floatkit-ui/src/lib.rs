//! Floatkit UI
//!
//! Draggable floating elements that settle to the screen edges, and the
//! drop target that rises from the bottom edge to dismiss them. The host
//! window system renders through [`FloatingHost`], feeds pointer samples to
//! [`FloatingManager`] and pumps its ticks from one thread.

pub mod config;
pub mod constants;
mod drop_target;
mod event;
mod floating;
mod fullscreen;
mod host;
mod manager;
mod schedule;

pub use config::{DisplayMode, DropTargetConfig, FloatingConfig, ManagerConfig};
pub use drop_target::{DropTarget, DropTargetState};
pub use event::{DropTargetAnimation, ElementId, ElementState, FloatingEvent};
pub use floating::{ElementSpec, FloatingElement, MoveOutcome, ReleaseOutcome};
pub use fullscreen::{FullscreenListener, FullscreenObserver, SystemUiSnapshot};
pub use host::{FloatingHost, HostError, Surface};
pub use manager::FloatingManager;
pub use schedule::{AnimationChannel, AnimationCode};

pub mod prelude {
    pub use crate::config::{DisplayMode, ManagerConfig};
    pub use crate::constants::{SHAPE_CIRCLE, SHAPE_RECTANGLE};
    pub use crate::{
        ElementId, ElementSpec, ElementState, FloatingEvent, FloatingHost, FloatingManager,
        FullscreenListener,
    };
    pub use floatkit_foundation::{PointerEvent, PointerPhase};
    pub use floatkit_geometry::{Point, ScreenMetrics, Size};
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
