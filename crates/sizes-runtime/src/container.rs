#![forbid(unsafe_code)]

//! Preview container: attachment lifecycle around the simulation controller.
//!
//! The container is what a host embeds. It owns the controller, the
//! one-shot scheduler and the configuration panel's reveal. Attaching a
//! screen resets it to fill its container, applies the configured initial
//! selection, and schedules the panel reveal after the configured delay.
//!
//! # Invariants
//!
//! 1. At most one reveal is pending. Re-attaching cancels the previous one.
//! 2. `detach()` and dropping the container cancel a pending reveal.
//! 3. The scheduled reveal holds only a `Weak` handle to the panel state;
//!    it never extends the panel's lifetime.
//! 4. The panel animates only for time elapsed after the reveal delay, no
//!    matter how a tick straddles the due time.
//!
//! # Failure Modes
//!
//! | condition | result |
//! |---|---|
//! | invalid reveal config | [`PreviewContainer::new`] returns [`ConfigError::Validation`] |
//! | initial selection rejected on attach | [`AttachError`] carrying the replaced screen |
//!
//! # Example
//!
//! ```
//! use sizes_core::{ContentSizeCategory, Device, Orientation};
//! use sizes_layout::{HeadlessHost, Size};
//! use sizes_runtime::{PreviewContainer, RecordingScreen, SelectionEvent, SimulatorConfig};
//!
//! let host = HeadlessHost::new(Size::new(1024, 768));
//! let mut container = PreviewContainer::with_default_config(host);
//! container.attach(RecordingScreen::default()).unwrap();
//! container
//!     .handle_selection(SelectionEvent::new(
//!         Device::Phone4_7Inch,
//!         Orientation::Portrait,
//!         ContentSizeCategory::Large,
//!     ))
//!     .unwrap();
//! assert_eq!(container.snapshot().frame.size(), Size::new(375, 667));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::Serialize;
use sizes_core::{ContentSizeCategory, Device, Orientation, Rect, Size, TraitCollection};
use sizes_layout::{LayoutHost, SizingMode};
use tracing::{debug, info_span};
use web_time::Duration;

use crate::cancellation::CancellationSource;
use crate::config::{ConfigError, SimulatorConfig};
use crate::controller::{
    ContainedScreen, SelectOutcome, SelectionEvent, SimulationController, SimulationError,
    SimulationState,
};
use crate::reveal::{PanelReveal, RevealPhase};
use crate::scheduler::Scheduler;

/// Observable state of a preview, serializable for golden files and logs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PreviewSnapshot {
    pub state: SimulationState,
    pub mode: Option<SizingMode>,
    pub container: Size,
    pub frame: Rect,
    pub traits: Option<TraitCollection>,
    pub panel: RevealPhase,
}

/// The configured initial selection failed while attaching a screen.
///
/// The new screen stays attached; the screen it replaced is handed back
/// here rather than dropped.
pub struct AttachError<S> {
    previous: Option<S>,
    source: SimulationError,
}

impl<S> AttachError<S> {
    /// The screen that was attached before, if any.
    #[must_use]
    pub fn previous(&self) -> Option<&S> {
        self.previous.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> &SimulationError {
        &self.source
    }

    /// Split into the replaced screen and the selection error.
    #[must_use]
    pub fn into_parts(self) -> (Option<S>, SimulationError) {
        (self.previous, self.source)
    }
}

impl<S> fmt::Debug for AttachError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachError")
            .field("has_previous", &self.previous.is_some())
            .field("source", &self.source)
            .finish()
    }
}

impl<S> fmt::Display for AttachError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "initial selection failed on attach: {}", self.source)
    }
}

impl<S> std::error::Error for AttachError<S> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Host-embeddable preview of one screen.
pub struct PreviewContainer<H: LayoutHost, S: ContainedScreen> {
    controller: SimulationController<H, S>,
    scheduler: Scheduler,
    reveal: Rc<RefCell<PanelReveal>>,
    pending_reveal: Option<CancellationSource>,
    config: SimulatorConfig,
}

impl<H: LayoutHost, S: ContainedScreen> PreviewContainer<H, S> {
    /// A container driven by `config`, which must pass
    /// [`SimulatorConfig::validate`].
    pub fn new(host: H, config: SimulatorConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_valid_config(host, config.validated()?))
    }

    /// A container with the default configuration.
    #[must_use]
    pub fn with_default_config(host: H) -> Self {
        Self::from_valid_config(host, SimulatorConfig::default())
    }

    fn from_valid_config(host: H, config: SimulatorConfig) -> Self {
        Self {
            controller: SimulationController::new(host),
            scheduler: Scheduler::new(),
            reveal: Rc::new(RefCell::new(PanelReveal::new(config.reveal.motion()))),
            pending_reveal: None,
            config,
        }
    }

    /// Attach `screen`, returning the screen it replaces.
    ///
    /// The configured initial selection is applied right away. If it fails,
    /// `screen` stays attached and the replaced screen comes back inside the
    /// [`AttachError`].
    pub fn attach(&mut self, screen: S) -> Result<Option<S>, AttachError<S>> {
        self.cancel_reveal();
        self.reveal.borrow_mut().hide();

        let previous = self.controller.attach(screen);
        self.schedule_reveal();

        let initial = self.config.initial.event();
        if initial != SelectionEvent::default() {
            if let Err(source) = self.handle_selection(initial) {
                return Err(AttachError { previous, source });
            }
        }
        Ok(previous)
    }

    /// Release the screen and cancel a pending reveal.
    pub fn detach(&mut self) -> Option<S> {
        self.cancel_reveal();
        self.reveal.borrow_mut().hide();
        self.controller.detach()
    }

    /// Apply a selection from the configuration panel.
    pub fn handle_selection(&mut self, event: SelectionEvent) -> Result<SelectOutcome, SimulationError> {
        self.controller.handle(event)
    }

    /// Advance the scheduler and the panel animation by `dt`.
    ///
    /// A reveal already under way moves by the full `dt`. One that becomes
    /// due during this tick starts and moves only by the time past its due
    /// point.
    pub fn tick(&mut self, dt: Duration) {
        self.reveal.borrow_mut().tick(dt);
        self.scheduler.advance(dt);
    }

    /// Select every catalog device in turn, calling `visit` after each
    /// layout pass, then return to the unsimulated host window.
    ///
    /// Returns the number of devices visited. Stops at the first error.
    pub fn sweep(
        &mut self,
        orientation: Orientation,
        content_size: ContentSizeCategory,
        mut visit: impl FnMut(Device, &PreviewSnapshot),
    ) -> Result<usize, SimulationError> {
        let _span = info_span!("sizes.sweep", orientation = orientation.as_str()).entered();
        if !self.controller.is_attached() {
            debug!("sweep skipped, no screen attached");
            return Ok(0);
        }

        let mut visited = 0;
        for device in Device::ALL.into_iter().filter(|device| !device.is_host()) {
            self.controller.select(device, orientation, content_size)?;
            visit(device, &self.snapshot());
            visited += 1;
        }
        self.controller
            .select(Device::Default, Orientation::Portrait, content_size)?;
        Ok(visited)
    }

    #[must_use]
    pub fn snapshot(&self) -> PreviewSnapshot {
        PreviewSnapshot {
            state: self.controller.state(),
            mode: self.controller.mode(),
            container: self.controller.container_bounds(),
            frame: self.controller.frame(),
            traits: self.controller.override_traits().copied(),
            panel: self.reveal.borrow().phase(),
        }
    }

    #[must_use]
    pub fn panel_phase(&self) -> RevealPhase {
        self.reveal.borrow().phase()
    }

    /// Panel offset below its resting position, in points.
    #[must_use]
    pub fn panel_offset(&self) -> f64 {
        self.reveal.borrow().offset()
    }

    #[must_use]
    pub fn is_reveal_pending(&self) -> bool {
        self.pending_reveal
            .as_ref()
            .is_some_and(|source| !source.is_cancelled())
            && !self.scheduler.is_idle()
    }

    #[must_use]
    pub fn controller(&self) -> &SimulationController<H, S> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SimulationController<H, S> {
        &mut self.controller
    }

    #[must_use]
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Weak handle to the panel state, as held by the scheduled reveal.
    #[must_use]
    pub fn reveal_handle(&self) -> Weak<RefCell<PanelReveal>> {
        Rc::downgrade(&self.reveal)
    }

    fn schedule_reveal(&mut self) {
        let source = CancellationSource::new();
        let panel = Rc::downgrade(&self.reveal);
        self.scheduler
            .schedule_after(self.config.reveal.delay(), source.token(), move |late| {
                if let Some(panel) = panel.upgrade() {
                    let mut panel = panel.borrow_mut();
                    panel.start();
                    panel.tick(late);
                }
            });
        self.pending_reveal = Some(source);
    }

    fn cancel_reveal(&mut self) {
        if let Some(source) = self.pending_reveal.take() {
            source.cancel();
        }
    }
}

impl<H: LayoutHost, S: ContainedScreen> Drop for PreviewContainer<H, S> {
    fn drop(&mut self) {
        self.cancel_reveal();
    }
}
