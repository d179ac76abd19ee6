//! Animation curves for Floatkit
//!
//! Closed-form easing functions and tween specifications. Everything here is
//! stateless: the engines own elapsed time and feed fractions in.

mod animation;

pub use animation::*;
