#![forbid(unsafe_code)]

//! Time-driven motion primitives.
//!
//! Animations are advanced explicitly with [`Animation::tick`] on the thread
//! that owns them; nothing here spawns timers or threads.

use std::time::Duration;

pub mod spring;

pub use spring::Spring;

/// A time-based animation producing values in [0.0, 1.0].
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value, clamped to [0.0, 1.0].
    fn value(&self) -> f32;

    /// Reset the animation to its initial state.
    fn reset(&mut self);
}
