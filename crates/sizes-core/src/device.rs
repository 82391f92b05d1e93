#![forbid(unsafe_code)]

//! The simulated device catalog and orientation selector.
//!
//! # Invariants
//!
//! 1. The catalog is closed: adding a [`Device`] variant fails to compile
//!    until [`Device::native_size`] and [`Device::as_str`] cover it.
//! 2. Every device except [`Device::Default`] has a fixed portrait size.
//! 3. Native sizes are portrait (`height > width`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::Size;

/// Error returned when a selector identifier cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseSelectorError {
    kind: &'static str,
    value: String,
}

impl ParseSelectorError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }

    /// The selector kind that failed to parse (`"device"`, `"orientation"`, ...).
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

/// A simulated hardware profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Device {
    /// The live host window. No fixed size of its own.
    #[default]
    #[serde(rename = "default")]
    Default,
    /// 3.5" phone, 320x480.
    #[serde(rename = "phone-3.5")]
    Phone3_5Inch,
    /// 4" phone, 320x568.
    #[serde(rename = "phone-4")]
    Phone4Inch,
    /// 4.7" phone, 375x667.
    #[serde(rename = "phone-4.7")]
    Phone4_7Inch,
    /// 5.5" phone, 414x736.
    #[serde(rename = "phone-5.5")]
    Phone5_5Inch,
    /// 5.8" phone, 375x812.
    #[serde(rename = "phone-5.8")]
    Phone5_8Inch,
    /// 9.7" pad, 768x1024.
    #[serde(rename = "pad")]
    Pad,
    /// 12.9" pad, 1024x1366.
    #[serde(rename = "pad-12.9")]
    Pad12_9Inch,
}

impl Device {
    /// Every device in catalog order.
    pub const ALL: [Device; 8] = [
        Device::Default,
        Device::Phone3_5Inch,
        Device::Phone4Inch,
        Device::Phone4_7Inch,
        Device::Phone5_5Inch,
        Device::Phone5_8Inch,
        Device::Pad,
        Device::Pad12_9Inch,
    ];

    /// Native portrait size in points, or `None` for the host window.
    #[must_use]
    pub const fn native_size(self) -> Option<Size> {
        match self {
            Device::Default => None,
            Device::Phone3_5Inch => Some(Size::new(320, 480)),
            Device::Phone4Inch => Some(Size::new(320, 568)),
            Device::Phone4_7Inch => Some(Size::new(375, 667)),
            Device::Phone5_5Inch => Some(Size::new(414, 736)),
            Device::Phone5_8Inch => Some(Size::new(375, 812)),
            Device::Pad => Some(Size::new(768, 1024)),
            Device::Pad12_9Inch => Some(Size::new(1024, 1366)),
        }
    }

    /// Stable identifier used in configuration files and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Device::Default => "default",
            Device::Phone3_5Inch => "phone-3.5",
            Device::Phone4Inch => "phone-4",
            Device::Phone4_7Inch => "phone-4.7",
            Device::Phone5_5Inch => "phone-5.5",
            Device::Phone5_8Inch => "phone-5.8",
            Device::Pad => "pad",
            Device::Pad12_9Inch => "pad-12.9",
        }
    }

    /// Whether this is the live host window rather than a catalog profile.
    #[inline]
    #[must_use]
    pub const fn is_host(self) -> bool {
        matches!(self, Device::Default)
    }

    /// Phone form factor.
    #[inline]
    #[must_use]
    pub const fn is_phone(self) -> bool {
        matches!(
            self,
            Device::Phone3_5Inch
                | Device::Phone4Inch
                | Device::Phone4_7Inch
                | Device::Phone5_5Inch
                | Device::Phone5_8Inch
        )
    }

    /// Pad form factor.
    #[inline]
    #[must_use]
    pub const fn is_pad(self) -> bool {
        matches!(self, Device::Pad | Device::Pad12_9Inch)
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Device {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Device::ALL
            .into_iter()
            .find(|device| device.as_str() == s)
            .ok_or_else(|| ParseSelectorError::new("device", s))
    }
}

/// Screen orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Both orientations, portrait first.
    pub const ALL: [Orientation; 2] = [Orientation::Portrait, Orientation::Landscape];

    /// Stable identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }

    /// Orient a portrait `size`: unchanged for portrait, transposed for landscape.
    #[must_use]
    pub const fn apply(self, size: Size) -> Size {
        match self {
            Orientation::Portrait => size,
            Orientation::Landscape => size.transposed(),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Orientation::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| ParseSelectorError::new("orientation", s))
    }
}
