//! Single-threaded scheduling core for Floatkit
//!
//! A monotonic [`Clock`] and a [`TickScheduler`] that queues per-frame
//! animation ticks keyed by animation channel. Every run carries a
//! generation; starting or cancelling a run retires the previous generation
//! so its late ticks are dropped instead of acted upon.

mod clock;
mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock};
pub use scheduler::{Generation, RunId, Tick, TickKind, TickScheduler};

/// Cadence of the per-frame update loop, roughly 60 Hz.
pub const FRAME_INTERVAL_MILLIS: u64 = 17;
