//! Pointer input building blocks for Floatkit
//!
//! Raw single-pointer samples as delivered by the host, the gesture
//! thresholds shared by the engines, and release-velocity estimation.

pub mod gesture_constants;
mod pointer;
mod velocity_tracker;

pub use pointer::{PointerEvent, PointerPhase, SessionId};
pub use velocity_tracker::{VelocityTracker, ASSUME_STOPPED_MS};
