#![forbid(unsafe_code)]

//! Damped harmonic oscillator (spring) animation.
//!
//! Drives the configuration panel's reveal. The spring follows
//!
//!   a = -stiffness × (position - target) - damping × velocity
//!
//! with unit mass, integrated by semi-implicit Euler in steps of at most
//! 4ms.
//!
//! Springs can be described either physically (stiffness, damping) or by
//! the designer-facing pair (damping ratio, response):
//!
//! - **damping ratio** ζ: 1.0 settles without overshoot, below 1.0 bounces.
//! - **response**: the period of the undamped oscillation.
//!
//! which map to `stiffness = (2π / response)²` and
//! `damping = 4π ζ / response`.
//!
//! # Invariants
//!
//! 1. `value()` is the position clamped to [0.0, 1.0].
//! 2. A spring at rest stays at rest until `reset()`.
//! 3. Stiffness is clamped to at least 0.1; damping to at least 0.0.

use std::f64::consts::PI;
use std::time::Duration;

use super::Animation;

const MAX_STEP_SECS: f64 = 0.004;
const DEFAULT_REST_THRESHOLD: f64 = 0.001;
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.01;
const MIN_STIFFNESS: f64 = 0.1;
const MIN_RESPONSE_SECS: f64 = 0.05;

/// A damped spring moving from an initial position toward a target.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    stiffness: f64,
    damping: f64,
    rest_threshold: f64,
    velocity_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// Create a spring starting at `initial` and targeting `target`.
    ///
    /// Defaults: stiffness = 170.0, damping = 26.0.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target,
            initial,
            stiffness: 170.0,
            damping: 26.0,
            rest_threshold: DEFAULT_REST_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            at_rest: false,
        }
    }

    /// Create a spring animating from 0.0 to 1.0.
    #[must_use]
    pub fn normalized() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Normalized spring described by damping ratio and response period.
    ///
    /// `damping_ratio` is clamped to [0.0, 1.0] and `response` to at least
    /// 50ms, keeping the 4ms integration step stable.
    #[must_use]
    pub fn with_damping_ratio(damping_ratio: f64, response: Duration) -> Self {
        let response = response.as_secs_f64().max(MIN_RESPONSE_SECS);
        let ratio = damping_ratio.clamp(0.0, 1.0);
        let omega = 2.0 * PI / response;
        Self::normalized()
            .with_stiffness(omega * omega)
            .with_damping(2.0 * ratio * omega)
    }

    /// Set stiffness (builder pattern). Clamped to minimum 0.1.
    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = k.max(MIN_STIFFNESS);
        self
    }

    /// Set damping (builder pattern). Clamped to minimum 0.0.
    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = c.max(0.0);
        self
    }

    /// Current position (unclamped).
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Whether the spring has settled at the target.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Jump straight to the target and stop.
    pub fn settle(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance the spring by `dt`, subdividing for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        if (self.position - self.target).abs() < self.rest_threshold
            && self.velocity.abs() < self.velocity_threshold
        {
            self.settle();
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn value(&self) -> f32 {
        (self.position as f32).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = 0.0;
        self.at_rest = false;
    }
}
