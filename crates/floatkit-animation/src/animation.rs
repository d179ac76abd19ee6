//! Easing curves and tween specs.

use std::f64::consts::FRAC_PI_2;

/// Fraction at which [`snap_curve`] switches from its sine rise to its
/// quadratic settle.
pub const SNAP_CURVE_SPLIT: f32 = 0.4;

/// Tension used by an overshoot curve when none is given.
pub const DEFAULT_OVERSHOOT_TENSION: f32 = 2.0;

/// Values a tween can blend between.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

/// Back-ease curve that runs past 1.0 before settling on it.
///
/// `tension` controls how far past the end the curve travels; zero degrades
/// to a plain cubic ease-out.
#[inline]
pub fn overshoot(t: f32, tension: f32) -> f32 {
    let t = t - 1.0;
    t * t * ((tension + 1.0) * t + tension) + 1.0
}

/// Damped-oscillation approximation used to chase a moving pointer.
///
/// Rises along `0.55 * sin(8.0564t - pi/2) + 0.55` up to [`SNAP_CURVE_SPLIT`],
/// peaking slightly above 1.0, then settles along
/// `4(0.417t - 0.341)^2 - 4(0.417 - 0.341)^2 + 1` onto exactly 1.0 at t = 1.
pub fn snap_curve(t: f32) -> f32 {
    let t = t as f64;
    let position = if t <= SNAP_CURVE_SPLIT as f64 {
        0.55 * (8.0564 * t - FRAC_PI_2).sin() + 0.55
    } else {
        4.0 * (0.417 * t - 0.341).powi(2) - 4.0 * (0.417f64 - 0.341).powi(2) + 1.0
    };
    position as f32
}

/// Easing curves understood by the motion engines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// Back-ease with the given tension, see [`overshoot`].
    Overshoot { tension: f32 },
    /// Pointer-chasing curve, see [`snap_curve`].
    Snap,
}

impl Easing {
    pub fn overshoot(tension: f32) -> Self {
        Easing::Overshoot { tension }
    }

    /// Maps elapsed fraction to eased fraction.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction,
            Easing::Overshoot { tension } => overshoot(fraction, *tension),
            Easing::Snap => snap_curve(fraction),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Overshoot {
            tension: DEFAULT_OVERSHOOT_TENSION,
        }
    }
}

/// A timed tween: waits `delay_millis`, then eases over `duration_millis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }

    /// Linear progress in [0, 1] after `elapsed_millis`, honouring the delay.
    pub fn linear_progress(&self, elapsed_millis: u64) -> f32 {
        if elapsed_millis < self.delay_millis {
            return 0.0;
        }
        let elapsed = elapsed_millis - self.delay_millis;
        let duration = self.duration_millis.max(1);
        (elapsed as f32 / duration as f32).clamp(0.0, 1.0)
    }

    /// Eased progress after `elapsed_millis`; may leave [0, 1] for
    /// overshooting curves.
    pub fn progress(&self, elapsed_millis: u64) -> f32 {
        self.easing.transform(self.linear_progress(elapsed_millis))
    }

    pub fn is_finished(&self, elapsed_millis: u64) -> bool {
        elapsed_millis >= self.delay_millis + self.duration_millis
    }

    /// Interpolated value between `start` and `target` after `elapsed_millis`.
    pub fn value_at<T: Lerp>(&self, start: &T, target: &T, elapsed_millis: u64) -> T {
        start.lerp(target, self.progress(elapsed_millis))
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(200, Easing::default())
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
