#![forbid(unsafe_code)]

//! Device trait classification and viewport constraint management.
//!
//! # Key Components
//!
//! - [`classify`] - pure `(device, orientation)` lookup producing a viewport
//!   and the trait collection the previewed screen should see
//! - [`ViewportConstraints`] - owns the active sizing constraints on the
//!   contained view and swaps them between fill-parent and fixed modes
//! - [`LayoutHost`] - the platform seam that actually installs constraints
//! - [`HeadlessHost`] - deterministic in-memory host for tests and tooling

pub mod classifier;
pub mod constraints;
pub mod headless;

pub use classifier::{Classification, DeviceProfile, classify, profile, profiles};
pub use constraints::{
    ConstraintId, Dimension, LayoutError, LayoutHost, SizingConstraint, SizingMode,
    ViewportConstraints,
};
pub use headless::HeadlessHost;
pub use sizes_core::{Rect, Size};
