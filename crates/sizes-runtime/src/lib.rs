#![forbid(unsafe_code)]

//! Runtime: the simulation controller and the container around it.
//!
//! # Key Components
//!
//! - [`SimulationController`] - applies `(device, orientation, text size)`
//!   selections to a contained screen
//! - [`PreviewContainer`] - attachment lifecycle, selection intake, catalog
//!   sweep, and the delayed configuration panel reveal
//! - [`Scheduler`] - one-shot tasks on a virtual clock, with cancellation
//! - [`SimulatorConfig`] - TOML/JSON configuration
//! - [`PreviewSimulator`] - deterministic harness for tests
//!
//! Everything here is single-threaded and advanced explicitly with `tick`.

pub mod cancellation;
pub mod config;
pub mod container;
pub mod controller;
pub mod reveal;
pub mod scheduler;
pub mod simulator;

pub use cancellation::{CancellationSource, CancellationToken};
pub use config::{ConfigError, InitialSelection, RevealConfig, SimulatorConfig};
pub use container::{AttachError, PreviewContainer, PreviewSnapshot};
pub use controller::{
    ContainedScreen, SelectOutcome, SelectionEvent, SimulationController, SimulationError,
    SimulationState,
};
pub use reveal::{PanelReveal, RevealMotion, RevealPhase};
pub use scheduler::{Scheduler, TaskId};
pub use simulator::{PreviewSimulator, RecordingScreen, ScreenCall};
