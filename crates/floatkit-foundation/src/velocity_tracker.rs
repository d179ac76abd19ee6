//! Release-velocity estimation for drag sessions.
//!
//! Uses the impulse strategy: each sampled segment is treated as a push on a
//! unit mass, and the release velocity is whatever speed the accumulated
//! kinetic energy corresponds to. Both axes share one sample history.

use floatkit_geometry::Point;

use crate::gesture_constants::{MAX_FLING_VELOCITY, VELOCITY_HORIZON_MILLIS};

const CAPACITY: usize = 20;

/// A gap between consecutive samples longer than this means the pointer
/// rested, and nothing older counts.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Default)]
struct Sample {
    at_ms: i64,
    position: Point,
}

/// Recent pointer positions of one drag session.
#[derive(Clone)]
pub struct VelocityTracker {
    ring: [Sample; CAPACITY],
    len: usize,
    newest: usize,
    horizon_ms: i64,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::with_horizon(VELOCITY_HORIZON_MILLIS)
    }

    /// Samples older than `horizon_ms` relative to the newest one are ignored.
    pub fn with_horizon(horizon_ms: i64) -> Self {
        Self {
            ring: [Sample::default(); CAPACITY],
            len: 0,
            newest: CAPACITY - 1,
            horizon_ms,
        }
    }

    pub fn add_movement(&mut self, time_ms: u64, position: Point) {
        self.newest = (self.newest + 1) % CAPACITY;
        self.ring[self.newest] = Sample {
            at_ms: time_ms as i64,
            position,
        };
        self.len = (self.len + 1).min(CAPACITY);
    }

    pub fn reset(&mut self) {
        self.len = 0;
        self.newest = CAPACITY - 1;
    }

    /// Velocity in pixels per second on each axis, capped at
    /// [`MAX_FLING_VELOCITY`]. Zero until two usable samples exist.
    pub fn velocity(&self) -> Point {
        let (window, count) = self.window();
        if count < 2 {
            return Point::ZERO;
        }
        let window = &window[..count];
        Point::new(
            per_second(impulse(window, |p| p.x)),
            per_second(impulse(window, |p| p.y)),
        )
    }

    /// Newest-first samples that still describe the current motion, each
    /// timed as a non-positive offset from the newest.
    fn window(&self) -> ([(f32, Point); CAPACITY], usize) {
        let mut window = [(0.0f32, Point::ZERO); CAPACITY];
        if self.len == 0 {
            return (window, 0);
        }
        let latest = self.ring[self.newest].at_ms;
        let mut later = latest;
        let mut count = 0;
        while count < self.len {
            let slot = (self.newest + CAPACITY - count) % CAPACITY;
            let sample = self.ring[slot];
            let age = latest - sample.at_ms;
            if age > self.horizon_ms || (later - sample.at_ms).abs() > ASSUME_STOPPED_MS {
                break;
            }
            window[count] = (-(age as f32), sample.position);
            later = sample.at_ms;
            count += 1;
        }
        (window, count)
    }
}

/// Walks the window oldest to newest, accumulating work done on a unit mass.
/// Returns units per millisecond.
fn impulse(window: &[(f32, Point)], axis: impl Fn(Point) -> f32) -> f32 {
    let oldest = window.len() - 1;
    let mut work = 0.0f32;
    for i in (1..=oldest).rev() {
        let (older_t, older_p) = window[i];
        let (newer_t, newer_p) = window[i - 1];
        if older_t == newer_t {
            continue;
        }
        let segment = (axis(older_p) - axis(newer_p)) / (older_t - newer_t);
        work += (segment - speed_for_energy(work)) * segment.abs();
        if i == oldest {
            work *= 0.5;
        }
    }
    speed_for_energy(work)
}

/// Inverse of `E = v^2 / 2`, keeping the sign of the energy.
fn speed_for_energy(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}

fn per_second(per_ms: f32) -> f32 {
    let velocity = per_ms * 1000.0;
    if velocity == 0.0 || velocity.is_nan() {
        return 0.0;
    }
    velocity.clamp(-MAX_FLING_VELOCITY, MAX_FLING_VELOCITY)
}
