#![forbid(unsafe_code)]

//! Simulation controller: turns selections into layout and trait changes.
//!
//! The controller owns the viewport constraint manager and, while a screen
//! is attached, the screen itself. Every selection runs the same pipeline:
//!
//! ```text
//! select(device, orientation, content_size)
//!   -> classify            (pure lookup)
//!   -> swap constraints    (fill-parent or fixed viewport)
//!   -> layout pass
//!   -> push traits         (classification merged with text size)
//!   -> screen layout pass
//! ```
//!
//! # State Machine
//!
//! ```text
//!                 select(named device | Default+Landscape)
//!  Unsimulated ------------------------------------------> Simulated
//!      ^                                                      |
//!      +------- select(Default, Portrait) / detach() ---------+
//! ```
//!
//! # Invariants
//!
//! 1. After every successful `select` exactly one constraint mode is active:
//!    `FillParent` in [`SimulationState::Unsimulated`], `Fixed` otherwise.
//! 2. Selecting the same triple twice leaves identical observable state.
//! 3. The screen's override traits are `None` exactly when unsimulated.
//!
//! # Failure Modes
//!
//! - No screen attached: the selection is ignored and logged at debug level.
//! - The layout host rejects the constraint swap: the previous mode stays
//!   active, the state and traits are left untouched, and the error is
//!   returned as [`SimulationError::Layout`].
//! - The host rejects the reset during `attach`/`detach`: the screen still
//!   changes hands with its override cleared, and the rejection is logged.

use serde::{Deserialize, Serialize};
use sizes_core::{ContentSizeCategory, Device, Orientation, Rect, Size, TraitCollection};
use sizes_layout::{
    Classification, LayoutError, LayoutHost, SizingMode, ViewportConstraints, classify,
};
use tracing::{debug, debug_span, info, warn};

/// The embedded screen being previewed.
///
/// The screen reads the override traits when it lays out; it never sees
/// which device was selected.
pub trait ContainedScreen {
    /// Replace the trait override.
    fn set_override_traits(&mut self, traits: &TraitCollection);

    /// Drop any override and inherit the host's traits again.
    fn clear_override_traits(&mut self);

    /// Re-render now with the current size and traits.
    fn force_layout(&mut self);
}

/// Inbound selection from the configuration panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionEvent {
    pub orientation: Orientation,
    pub device: Device,
    pub content_size: ContentSizeCategory,
}

impl SelectionEvent {
    #[must_use]
    pub const fn new(device: Device, orientation: Orientation, content_size: ContentSizeCategory) -> Self {
        Self {
            orientation,
            device,
            content_size,
        }
    }
}

/// What the preview is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SimulationState {
    /// The contained screen fills the host with the host's own traits.
    #[default]
    Unsimulated,
    Simulated {
        device: Device,
        orientation: Orientation,
        content_size: ContentSizeCategory,
    },
}

impl SimulationState {
    #[must_use]
    pub const fn is_simulated(&self) -> bool {
        matches!(self, SimulationState::Simulated { .. })
    }
}

/// Result of a [`SimulationController::select`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// No screen is attached; nothing changed.
    Ignored,
    /// The selection was applied and the preview is now in this state.
    Applied(SimulationState),
}

/// Errors from applying a selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("viewport constraints could not be applied: {0}")]
    Layout(#[from] LayoutError),
}

/// Drives the contained screen's size and traits from selections.
#[derive(Debug)]
pub struct SimulationController<H, S> {
    constraints: ViewportConstraints<H>,
    screen: Option<S>,
    state: SimulationState,
    override_traits: Option<TraitCollection>,
}

impl<H: LayoutHost, S: ContainedScreen> SimulationController<H, S> {
    /// A controller with no screen attached. No constraints are installed
    /// until the first attachment.
    pub fn new(host: H) -> Self {
        Self {
            constraints: ViewportConstraints::new(host),
            screen: None,
            state: SimulationState::Unsimulated,
            override_traits: None,
        }
    }

    /// Take ownership of `screen` and size it to fill its container.
    ///
    /// A previously attached screen is detached first and returned.
    pub fn attach(&mut self, screen: S) -> Option<S> {
        let previous = self.detach();
        self.screen = Some(screen);
        self.force_unsimulated("attaching");
        debug!("screen attached");
        previous
    }

    /// Release the screen, leaving it unsimulated and filling its container.
    pub fn detach(&mut self) -> Option<S> {
        self.screen.as_ref()?;
        self.force_unsimulated("detaching");
        debug!("screen detached");
        self.screen.take()
    }

    /// Apply a selection.
    pub fn select(
        &mut self,
        device: Device,
        orientation: Orientation,
        content_size: ContentSizeCategory,
    ) -> Result<SelectOutcome, SimulationError> {
        let _span = debug_span!(
            "sizes.select",
            device = device.as_str(),
            orientation = orientation.as_str(),
            content_size = content_size.as_str()
        )
        .entered();

        if self.screen.is_none() {
            debug!("selection ignored, no screen attached");
            return Ok(SelectOutcome::Ignored);
        }

        let bounds = self.constraints.host().container_bounds();
        match classify(device, orientation, bounds) {
            Classification::Unsimulated => {
                self.unsimulate()?;
                info!(
                    device = device.as_str(),
                    orientation = orientation.as_str(),
                    width = bounds.width,
                    height = bounds.height,
                    "simulation cleared"
                );
            }
            Classification::Simulated { viewport, traits } => {
                self.constraints.apply_fixed_size(viewport)?;
                self.constraints.layout_now();

                let traits = TraitCollection::traits_from([
                    &traits,
                    &TraitCollection::content_size(content_size),
                ]);
                if let Some(screen) = self.screen.as_mut() {
                    screen.set_override_traits(&traits);
                    screen.force_layout();
                }
                self.override_traits = Some(traits);
                self.state = SimulationState::Simulated {
                    device,
                    orientation,
                    content_size,
                };
                info!(
                    device = device.as_str(),
                    orientation = orientation.as_str(),
                    content_size = content_size.as_str(),
                    width = viewport.width,
                    height = viewport.height,
                    "simulation applied"
                );
            }
        }
        Ok(SelectOutcome::Applied(self.state))
    }

    /// Apply a selection event.
    pub fn handle(&mut self, event: SelectionEvent) -> Result<SelectOutcome, SimulationError> {
        self.select(event.device, event.orientation, event.content_size)
    }

    /// Like [`Self::unsimulate`], but a rejected reset only drops the trait
    /// override; the host keeps whatever set it restored.
    fn force_unsimulated(&mut self, context: &'static str) {
        if let Err(err) = self.unsimulate() {
            warn!(error = %err, context, "constraints not reset");
            if let Some(screen) = self.screen.as_mut() {
                screen.clear_override_traits();
                screen.force_layout();
            }
            self.override_traits = None;
            self.state = SimulationState::Unsimulated;
        }
    }

    /// Fill-parent, no override, layout, unsimulated.
    fn unsimulate(&mut self) -> Result<(), SimulationError> {
        self.constraints.reset_to_fill_parent()?;
        self.constraints.layout_now();
        if let Some(screen) = self.screen.as_mut() {
            screen.clear_override_traits();
            screen.force_layout();
        }
        self.override_traits = None;
        self.state = SimulationState::Unsimulated;
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Sizing mode active on the host, if any.
    #[must_use]
    pub fn mode(&self) -> Option<SizingMode> {
        self.constraints.mode()
    }

    /// Traits last pushed to the screen.
    #[must_use]
    pub fn override_traits(&self) -> Option<&TraitCollection> {
        self.override_traits.as_ref()
    }

    /// Frame of the contained view after the last layout pass.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.constraints.host().contained_frame()
    }

    #[must_use]
    pub fn container_bounds(&self) -> Size {
        self.constraints.host().container_bounds()
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.screen.is_some()
    }

    #[must_use]
    pub fn screen(&self) -> Option<&S> {
        self.screen.as_ref()
    }

    pub fn screen_mut(&mut self) -> Option<&mut S> {
        self.screen.as_mut()
    }

    #[must_use]
    pub fn host(&self) -> &H {
        self.constraints.host()
    }

    /// Mutable host access, e.g. to resize the container.
    ///
    /// Changes take effect on the next selection or [`Self::relayout`].
    pub fn host_mut(&mut self) -> &mut H {
        self.constraints.host_mut()
    }

    /// Re-run layout after the host changed underneath the controller.
    pub fn relayout(&mut self) {
        self.constraints.layout_now();
        if let Some(screen) = self.screen.as_mut() {
            screen.force_layout();
        }
    }

    /// Release everything, removing owned constraints from the host.
    pub fn into_parts(mut self) -> (H, Option<S>) {
        let screen = self.screen.take();
        (self.constraints.into_host(), screen)
    }
}
