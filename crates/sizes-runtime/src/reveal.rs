#![forbid(unsafe_code)]

//! Spring-driven reveal of the configuration panel.
//!
//! The panel starts off-screen, pushed down by its own height. When the
//! reveal starts, a spring (0.75 damping ratio, 1s response by default)
//! carries it up to its resting position with a slight overshoot.
//!
//! ```text
//! Hidden --start()--> Revealing --spring at rest--> Shown
//!    ^                                                |
//!    +------------------------hide()-------------------+
//! ```
//!
//! The panel itself is only a position: rendering it belongs to whoever
//! owns the configuration UI.

use serde::Serialize;
use sizes_core::animation::{Animation, Spring};
use tracing::debug;
use web_time::Duration;

/// Where the panel is in its reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPhase {
    Hidden,
    Revealing,
    Shown,
}

/// Motion parameters for the reveal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealMotion {
    pub damping_ratio: f64,
    pub response: Duration,
    /// Distance in points between the hidden and resting positions.
    pub panel_height: f64,
}

impl Default for RevealMotion {
    fn default() -> Self {
        Self {
            damping_ratio: 0.75,
            response: Duration::from_secs(1),
            panel_height: 220.0,
        }
    }
}

/// The configuration panel's vertical motion.
#[derive(Debug, Clone)]
pub struct PanelReveal {
    motion: RevealMotion,
    spring: Spring,
    phase: RevealPhase,
}

impl PanelReveal {
    #[must_use]
    pub fn new(motion: RevealMotion) -> Self {
        Self {
            motion,
            spring: Spring::with_damping_ratio(motion.damping_ratio, motion.response),
            phase: RevealPhase::Hidden,
        }
    }

    #[must_use]
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    #[must_use]
    pub fn motion(&self) -> RevealMotion {
        self.motion
    }

    /// Begin moving toward the resting position. No-op unless hidden.
    pub fn start(&mut self) {
        if self.phase != RevealPhase::Hidden {
            return;
        }
        self.spring.reset();
        self.phase = RevealPhase::Revealing;
        debug!(panel_height = self.motion.panel_height, "config panel reveal started");
    }

    /// Snap back off-screen.
    pub fn hide(&mut self) {
        self.spring.reset();
        self.phase = RevealPhase::Hidden;
    }

    pub fn tick(&mut self, dt: Duration) {
        if self.phase != RevealPhase::Revealing {
            return;
        }
        self.spring.tick(dt);
        if self.spring.is_complete() {
            self.phase = RevealPhase::Shown;
            debug!("config panel reveal settled");
        }
    }

    /// Offset below the resting position, in points.
    ///
    /// `panel_height` while hidden, `0.0` once shown, and briefly negative
    /// while the spring overshoots.
    #[must_use]
    pub fn offset(&self) -> f64 {
        match self.phase {
            RevealPhase::Hidden => self.motion.panel_height,
            RevealPhase::Shown => 0.0,
            RevealPhase::Revealing => self.motion.panel_height * (1.0 - self.spring.position()),
        }
    }
}

impl Default for PanelReveal {
    fn default() -> Self {
        Self::new(RevealMotion::default())
    }
}
