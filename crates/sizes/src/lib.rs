#![forbid(unsafe_code)]

//! Sizes public facade crate.
//!
//! Re-exports the types a host needs to embed a preview and drive it from
//! a configuration panel, plus a prelude for day-to-day use.

// --- Core re-exports -------------------------------------------------------

pub use sizes_core::animation::{Animation, Spring};
pub use sizes_core::{
    ContentSizeCategory, Device, Idiom, Orientation, ParseSelectorError, Rect, Size, SizeClass,
    TraitCollection,
};

// --- Layout re-exports -----------------------------------------------------

pub use sizes_layout::{
    Classification, ConstraintId, DeviceProfile, Dimension, HeadlessHost, LayoutError, LayoutHost,
    SizingConstraint, SizingMode, ViewportConstraints, classify, profile, profiles,
};

// --- Runtime re-exports ----------------------------------------------------

pub use sizes_runtime::{
    AttachError, ConfigError, ContainedScreen, PreviewContainer, PreviewSimulator, PreviewSnapshot,
    RecordingScreen, RevealPhase, SelectOutcome, SelectionEvent, SimulationController,
    SimulationError, SimulationState, SimulatorConfig,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for hosts embedding a preview.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        Self::Simulation(err.into())
    }
}

/// Drops the replaced screen; use [`AttachError::into_parts`] to keep it.
impl<S> From<AttachError<S>> for Error {
    fn from(err: AttachError<S>) -> Self {
        let (_, source) = err.into_parts();
        Self::Simulation(source)
    }
}

/// Standard result type for Sizes APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Build a container from a TOML configuration file.
pub fn container_from_toml_file<H: LayoutHost, S: ContainedScreen>(
    host: H,
    path: impl AsRef<std::path::Path>,
) -> Result<PreviewContainer<H, S>> {
    let config = SimulatorConfig::from_toml_file(path)?;
    Ok(PreviewContainer::new(host, config)?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ContainedScreen, ContentSizeCategory, Device, Error, LayoutHost, Orientation,
        PreviewContainer, Result, SelectOutcome, SelectionEvent, Size, SimulatorConfig,
        TraitCollection,
    };

    pub use crate::{core, layout, runtime};
}

pub use sizes_core as core;
pub use sizes_layout as layout;
pub use sizes_runtime as runtime;
