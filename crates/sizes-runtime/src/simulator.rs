#![forbid(unsafe_code)]

//! Deterministic preview simulator for testing.
//!
//! `PreviewSimulator` runs a [`PreviewContainer`] over a [`HeadlessHost`]
//! and a [`RecordingScreen`], with no UI toolkit and a virtual clock.
//! Selections can be sent, time advanced, and snapshots captured.
//!
//! # Example
//!
//! ```
//! use sizes_core::{ContentSizeCategory, Device, Orientation};
//! use sizes_layout::Size;
//! use sizes_runtime::PreviewSimulator;
//!
//! let mut sim = PreviewSimulator::new(Size::new(1024, 768));
//! sim.attach().unwrap();
//! sim.select(Device::Pad12_9Inch, Orientation::Landscape, ContentSizeCategory::Small)
//!     .unwrap();
//! assert_eq!(sim.snapshot().frame.size(), Size::new(1366, 1024));
//! ```

use sizes_core::{ContentSizeCategory, Device, Orientation, TraitCollection};
use sizes_layout::{HeadlessHost, Size};
use web_time::Duration;

use crate::config::{ConfigError, SimulatorConfig};
use crate::container::{AttachError, PreviewContainer, PreviewSnapshot};
use crate::controller::{ContainedScreen, SelectOutcome, SelectionEvent, SimulationError};

/// Record of a call the controller made on the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenCall {
    SetOverride(TraitCollection),
    ClearOverride,
    ForceLayout,
}

/// A [`ContainedScreen`] that remembers what it was told.
#[derive(Debug, Clone, Default)]
pub struct RecordingScreen {
    override_traits: Option<TraitCollection>,
    calls: Vec<ScreenCall>,
    layouts: usize,
}

impl RecordingScreen {
    /// The trait override currently in effect.
    #[must_use]
    pub fn override_traits(&self) -> Option<&TraitCollection> {
        self.override_traits.as_ref()
    }

    /// Every call received, oldest first.
    #[must_use]
    pub fn calls(&self) -> &[ScreenCall] {
        &self.calls
    }

    #[must_use]
    pub fn layout_count(&self) -> usize {
        self.layouts
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl ContainedScreen for RecordingScreen {
    fn set_override_traits(&mut self, traits: &TraitCollection) {
        self.override_traits = Some(*traits);
        self.calls.push(ScreenCall::SetOverride(*traits));
    }

    fn clear_override_traits(&mut self) {
        self.override_traits = None;
        self.calls.push(ScreenCall::ClearOverride);
    }

    fn force_layout(&mut self) {
        self.layouts += 1;
        self.calls.push(ScreenCall::ForceLayout);
    }
}

/// Deterministic simulator for preview testing.
pub struct PreviewSimulator {
    container: PreviewContainer<HeadlessHost, RecordingScreen>,
    snapshots: Vec<PreviewSnapshot>,
}

impl PreviewSimulator {
    /// A simulator whose host container has `bounds`, with default config.
    #[must_use]
    pub fn new(bounds: Size) -> Self {
        Self {
            container: PreviewContainer::with_default_config(HeadlessHost::new(bounds)),
            snapshots: Vec::new(),
        }
    }

    /// A simulator driven by `config`, rejected if it does not validate.
    pub fn with_config(bounds: Size, config: SimulatorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            container: PreviewContainer::new(HeadlessHost::new(bounds), config)?,
            snapshots: Vec::new(),
        })
    }

    /// Attach a fresh [`RecordingScreen`], applying the initial selection.
    pub fn attach(&mut self) -> Result<Option<RecordingScreen>, AttachError<RecordingScreen>> {
        self.container.attach(RecordingScreen::default())
    }

    pub fn detach(&mut self) -> Option<RecordingScreen> {
        self.container.detach()
    }

    pub fn select(
        &mut self,
        device: Device,
        orientation: Orientation,
        content_size: ContentSizeCategory,
    ) -> Result<SelectOutcome, SimulationError> {
        self.container
            .handle_selection(SelectionEvent::new(device, orientation, content_size))
    }

    /// Advance virtual time in `frame` steps until `total` has elapsed.
    pub fn advance(&mut self, total: Duration, frame: Duration) {
        let frame = frame.max(Duration::from_millis(1));
        let mut remaining = total;
        while !remaining.is_zero() {
            let dt = remaining.min(frame);
            self.container.tick(dt);
            remaining -= dt;
        }
    }

    /// Resize the host container and lay out again.
    pub fn resize_host(&mut self, bounds: Size) {
        let controller = self.container.controller_mut();
        controller.host_mut().set_container_bounds(bounds);
        controller.relayout();
    }

    #[must_use]
    pub fn snapshot(&self) -> PreviewSnapshot {
        self.container.snapshot()
    }

    /// Take a snapshot and keep it.
    pub fn capture(&mut self) -> &PreviewSnapshot {
        let snapshot = self.container.snapshot();
        self.snapshots.push(snapshot);
        &self.snapshots[self.snapshots.len() - 1]
    }

    #[must_use]
    pub fn snapshots(&self) -> &[PreviewSnapshot] {
        &self.snapshots
    }

    /// The attached screen, if any.
    #[must_use]
    pub fn screen(&self) -> Option<&RecordingScreen> {
        self.container.controller().screen()
    }

    #[must_use]
    pub fn host(&self) -> &HeadlessHost {
        self.container.controller().host()
    }

    #[must_use]
    pub fn container(&self) -> &PreviewContainer<HeadlessHost, RecordingScreen> {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut PreviewContainer<HeadlessHost, RecordingScreen> {
        &mut self.container
    }
}
