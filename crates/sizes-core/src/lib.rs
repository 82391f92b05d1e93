#![forbid(unsafe_code)]

//! Core: device catalog, trait vocabulary, geometry, and motion primitives.
//!
//! # Role in Sizes
//! `sizes-core` is the vocabulary layer. It defines the closed set of
//! simulated devices, the orientation and text-size selectors, the trait
//! collection a previewed screen consults, and the point-based geometry the
//! layout crate works in.
//!
//! # How it fits in the system
//! `sizes-layout` classifies `(Device, Orientation)` pairs into viewports and
//! trait collections and swaps sizing constraints. `sizes-runtime` wires the
//! classifier and constraint manager into the simulation controller. Neither
//! layer adds new device kinds: the catalog here is the only source.

pub mod animation;
pub mod device;
pub mod geometry;
pub mod traits;

pub use device::{Device, Orientation, ParseSelectorError};
pub use geometry::{Rect, Size};
pub use traits::{ContentSizeCategory, Idiom, SizeClass, TraitCollection};
