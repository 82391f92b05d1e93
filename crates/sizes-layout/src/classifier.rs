#![forbid(unsafe_code)]

//! Trait classification: `(device, orientation)` to viewport and traits.
//!
//! The catalog devices resolve through a lookup table built once per
//! process. The host window ([`Device::Default`]) is not in the table: in
//! portrait it means "no simulation at all", in landscape it simulates the
//! live host bounds turned sideways with no trait override.
//!
//! # Classification table
//!
//! | device class | portrait (H, V) | landscape (H, V) |
//! |---|---|---|
//! | 3.5/4/4.7/5.8 inch phones | compact, regular | compact, compact |
//! | 5.5 inch phone | compact, regular | regular, compact |
//! | both pads | regular, regular | regular, regular |
//!
//! # Invariants
//!
//! 1. [`classify`] is total and pure: the same key always yields the same
//!    result.
//! 2. Catalog viewports in landscape are the portrait viewport transposed.
//! 3. Only `(Default, Portrait)` is [`Classification::Unsimulated`].

use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use serde::Serialize;
use sizes_core::{Device, Idiom, Orientation, Size, SizeClass, TraitCollection};

/// Result of classifying a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    /// Use the live host size with no trait override.
    Unsimulated,
    /// Pin the contained view to `viewport` and override with `traits`.
    Simulated {
        viewport: Size,
        traits: TraitCollection,
    },
}

impl Classification {
    /// The simulated viewport, if any.
    #[must_use]
    pub const fn viewport(&self) -> Option<Size> {
        match self {
            Classification::Unsimulated => None,
            Classification::Simulated { viewport, .. } => Some(*viewport),
        }
    }

    /// The trait override, if any.
    #[must_use]
    pub const fn traits(&self) -> Option<&TraitCollection> {
        match self {
            Classification::Unsimulated => None,
            Classification::Simulated { traits, .. } => Some(traits),
        }
    }

    #[must_use]
    pub const fn is_simulated(&self) -> bool {
        matches!(self, Classification::Simulated { .. })
    }
}

/// Fixed viewport and traits of one catalog device in one orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceProfile {
    pub device: Device,
    pub orientation: Orientation,
    pub viewport: Size,
    pub traits: TraitCollection,
}

type ProfileTable = FxHashMap<(Device, Orientation), DeviceProfile>;

fn table() -> &'static ProfileTable {
    static TABLE: OnceLock<ProfileTable> = OnceLock::new();
    TABLE.get_or_init(build_table)
}

fn build_table() -> ProfileTable {
    let mut table = ProfileTable::default();
    for device in Device::ALL {
        let Some(native) = device.native_size() else {
            continue;
        };
        for orientation in Orientation::ALL {
            if let Some(traits) = catalog_traits(device, orientation) {
                table.insert(
                    (device, orientation),
                    DeviceProfile {
                        device,
                        orientation,
                        viewport: orientation.apply(native),
                        traits,
                    },
                );
            }
        }
    }
    table
}

/// Size classes and idiom of a catalog device. `None` for the host window.
const fn catalog_traits(device: Device, orientation: Orientation) -> Option<TraitCollection> {
    use Device::*;
    use Orientation::*;
    use SizeClass::*;

    let (horizontal, vertical, idiom) = match (device, orientation) {
        (Default, _) => return None,
        (Pad | Pad12_9Inch, _) => (Regular, Regular, Idiom::Pad),
        (Phone3_5Inch | Phone4Inch | Phone4_7Inch | Phone5_5Inch | Phone5_8Inch, Portrait) => {
            (Compact, Regular, Idiom::Phone)
        }
        // The 5.5" phone is the only phone wide enough for regular width.
        (Phone5_5Inch, Landscape) => (Regular, Compact, Idiom::Phone),
        (Phone3_5Inch | Phone4Inch | Phone4_7Inch | Phone5_8Inch, Landscape) => {
            (Compact, Compact, Idiom::Phone)
        }
    };
    Some(TraitCollection::classified(horizontal, vertical, idiom))
}

/// The fixed profile of a catalog device, or `None` for the host window.
#[must_use]
pub fn profile(device: Device, orientation: Orientation) -> Option<&'static DeviceProfile> {
    table().get(&(device, orientation))
}

/// Every catalog profile, in catalog then orientation order.
pub fn profiles() -> impl Iterator<Item = &'static DeviceProfile> {
    Device::ALL.into_iter().flat_map(|device| {
        Orientation::ALL
            .into_iter()
            .filter_map(move |orientation| profile(device, orientation))
    })
}

/// Classify a selection.
///
/// `host_bounds` is the container's current size; it is only consulted for
/// `(Default, Landscape)`.
#[must_use]
pub fn classify(device: Device, orientation: Orientation, host_bounds: Size) -> Classification {
    match (device, orientation) {
        (Device::Default, Orientation::Portrait) => Classification::Unsimulated,
        (Device::Default, Orientation::Landscape) => Classification::Simulated {
            viewport: host_bounds.transposed(),
            traits: TraitCollection::EMPTY,
        },
        _ => match profile(device, orientation) {
            Some(p) => Classification::Simulated {
                viewport: p.viewport,
                traits: p.traits,
            },
            None => unreachable!("catalog table is missing {device} {orientation}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sizes_core::SizeClass::{Compact, Regular};

    const HOST: Size = Size::new(1024, 768);

    fn simulated(device: Device, orientation: Orientation) -> (Size, TraitCollection) {
        match classify(device, orientation, HOST) {
            Classification::Simulated { viewport, traits } => (viewport, traits),
            Classification::Unsimulated => panic!("{device} {orientation} should simulate"),
        }
    }

    #[test]
    fn every_catalog_device_has_both_orientations() {
        for device in Device::ALL.into_iter().filter(|d| !d.is_host()) {
            for orientation in Orientation::ALL {
                assert!(profile(device, orientation).is_some(), "{device} {orientation}");
            }
        }
        assert_eq!(profiles().count(), (Device::ALL.len() - 1) * 2);
    }

    #[test]
    fn every_catalog_selection_simulates() {
        for device in Device::ALL.into_iter().filter(|d| !d.is_host()) {
            for orientation in Orientation::ALL {
                let c = classify(device, orientation, HOST);
                assert!(c.is_simulated(), "{device} {orientation}");
                assert_eq!(c.viewport(), device.native_size().map(|s| orientation.apply(s)));
            }
        }
    }

    #[test]
    fn host_window_is_not_in_table() {
        assert!(profile(Device::Default, Orientation::Portrait).is_none());
        assert!(profile(Device::Default, Orientation::Landscape).is_none());
    }

    #[test]
    fn landscape_is_transposed_portrait() {
        for device in Device::ALL.into_iter().filter(|d| !d.is_host()) {
            let (portrait, _) = simulated(device, Orientation::Portrait);
            let (landscape, _) = simulated(device, Orientation::Landscape);
            assert_eq!(landscape, portrait.transposed(), "{device}");
            assert_eq!(Some(portrait), device.native_size());
        }
    }

    #[test]
    fn host_portrait_is_unsimulated() {
        for bounds in [Size::ZERO, HOST, Size::new(1, 9999)] {
            assert_eq!(
                classify(Device::Default, Orientation::Portrait, bounds),
                Classification::Unsimulated
            );
        }
    }

    #[test]
    fn host_landscape_transposes_live_bounds() {
        let c = classify(Device::Default, Orientation::Landscape, Size::new(390, 844));
        assert_eq!(c.viewport(), Some(Size::new(844, 390)));
        assert_eq!(c.traits(), Some(&TraitCollection::EMPTY));
    }

    #[test]
    fn phones_portrait_compact_regular() {
        for device in Device::ALL.into_iter().filter(|d| d.is_phone()) {
            let (_, traits) = simulated(device, Orientation::Portrait);
            assert_eq!(traits, TraitCollection::classified(Compact, Regular, Idiom::Phone), "{device}");
        }
    }

    #[test]
    fn small_phones_landscape_compact_compact() {
        for device in [
            Device::Phone3_5Inch,
            Device::Phone4Inch,
            Device::Phone4_7Inch,
            Device::Phone5_8Inch,
        ] {
            let (_, traits) = simulated(device, Orientation::Landscape);
            assert_eq!(traits, TraitCollection::classified(Compact, Compact, Idiom::Phone), "{device}");
        }
    }

    #[test]
    fn large_phone_landscape_is_regular_width() {
        let (viewport, traits) = simulated(Device::Phone5_5Inch, Orientation::Landscape);
        assert_eq!(viewport, Size::new(736, 414));
        assert_eq!(traits, TraitCollection::classified(Regular, Compact, Idiom::Phone));
    }

    #[test]
    fn pads_are_regular_everywhere() {
        for device in [Device::Pad, Device::Pad12_9Inch] {
            for orientation in Orientation::ALL {
                let (_, traits) = simulated(device, orientation);
                assert_eq!(traits, TraitCollection::classified(Regular, Regular, Idiom::Pad));
            }
        }
    }

    #[test]
    fn catalog_traits_leave_text_size_to_caller() {
        for p in profiles() {
            assert!(p.traits.preferred_content_size.is_none());
        }
    }

    #[test]
    fn classification_serializes_with_kind_tag() {
        let json = serde_json::to_value(classify(Device::Pad, Orientation::Landscape, HOST)).unwrap();
        assert_eq!(json["kind"], "simulated");
        assert_eq!(json["viewport"]["width"], 1024);
        assert_eq!(json["traits"]["idiom"], "pad");

        let json = serde_json::to_value(classify(Device::Default, Orientation::Portrait, HOST)).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "unsimulated" }));
    }

    #[test]
    fn repeated_lookups_agree() {
        for device in Device::ALL {
            for orientation in Orientation::ALL {
                assert_eq!(classify(device, orientation, HOST), classify(device, orientation, HOST));
            }
        }
    }
}
