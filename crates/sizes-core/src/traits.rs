#![forbid(unsafe_code)]

//! Trait vocabulary: the environment a previewed screen adapts to.
//!
//! A [`TraitCollection`] is a sparse bundle. Every field is optional; an
//! unset field means "inherit whatever the host reports". Collections merge
//! left to right with [`TraitCollection::traits_from`], later set fields
//! winning.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::device::ParseSelectorError;

/// Coarse width or height classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Compact,
    Regular,
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SizeClass::Compact => "compact",
            SizeClass::Regular => "regular",
        })
    }
}

/// Interface idiom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Idiom {
    Phone,
    Pad,
}

impl fmt::Display for Idiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Idiom::Phone => "phone",
            Idiom::Pad => "pad",
        })
    }
}

/// Preferred text size selected in accessibility settings.
///
/// The simulation engine forwards this value untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentSizeCategory {
    ExtraSmall,
    Small,
    Medium,
    #[default]
    Large,
    ExtraLarge,
    ExtraExtraLarge,
    ExtraExtraExtraLarge,
    AccessibilityMedium,
    AccessibilityLarge,
    AccessibilityExtraLarge,
    AccessibilityExtraExtraLarge,
    AccessibilityExtraExtraExtraLarge,
}

impl ContentSizeCategory {
    /// Every category, smallest first.
    pub const ALL: [ContentSizeCategory; 12] = [
        ContentSizeCategory::ExtraSmall,
        ContentSizeCategory::Small,
        ContentSizeCategory::Medium,
        ContentSizeCategory::Large,
        ContentSizeCategory::ExtraLarge,
        ContentSizeCategory::ExtraExtraLarge,
        ContentSizeCategory::ExtraExtraExtraLarge,
        ContentSizeCategory::AccessibilityMedium,
        ContentSizeCategory::AccessibilityLarge,
        ContentSizeCategory::AccessibilityExtraLarge,
        ContentSizeCategory::AccessibilityExtraExtraLarge,
        ContentSizeCategory::AccessibilityExtraExtraExtraLarge,
    ];

    /// Stable identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ContentSizeCategory::ExtraSmall => "extra-small",
            ContentSizeCategory::Small => "small",
            ContentSizeCategory::Medium => "medium",
            ContentSizeCategory::Large => "large",
            ContentSizeCategory::ExtraLarge => "extra-large",
            ContentSizeCategory::ExtraExtraLarge => "extra-extra-large",
            ContentSizeCategory::ExtraExtraExtraLarge => "extra-extra-extra-large",
            ContentSizeCategory::AccessibilityMedium => "accessibility-medium",
            ContentSizeCategory::AccessibilityLarge => "accessibility-large",
            ContentSizeCategory::AccessibilityExtraLarge => "accessibility-extra-large",
            ContentSizeCategory::AccessibilityExtraExtraLarge => "accessibility-extra-extra-large",
            ContentSizeCategory::AccessibilityExtraExtraExtraLarge => {
                "accessibility-extra-extra-extra-large"
            }
        }
    }
}

impl fmt::Display for ContentSizeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentSizeCategory {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentSizeCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseSelectorError::new("content size category", s))
    }
}

/// Sparse set of environment traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TraitCollection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_size_class: Option<SizeClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_size_class: Option<SizeClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idiom: Option<Idiom>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_content_size: Option<ContentSizeCategory>,
}

impl TraitCollection {
    /// A collection with nothing set: inherit everything from the host.
    pub const EMPTY: Self = Self {
        horizontal_size_class: None,
        vertical_size_class: None,
        idiom: None,
        preferred_content_size: None,
    };

    /// Both size classes and the idiom set; text size left to inherit.
    #[must_use]
    pub const fn classified(horizontal: SizeClass, vertical: SizeClass, idiom: Idiom) -> Self {
        Self {
            horizontal_size_class: Some(horizontal),
            vertical_size_class: Some(vertical),
            idiom: Some(idiom),
            preferred_content_size: None,
        }
    }

    /// Only the preferred content size set.
    #[must_use]
    pub const fn content_size(category: ContentSizeCategory) -> Self {
        Self {
            preferred_content_size: Some(category),
            ..Self::EMPTY
        }
    }

    #[must_use]
    pub const fn with_horizontal_size_class(mut self, class: SizeClass) -> Self {
        self.horizontal_size_class = Some(class);
        self
    }

    #[must_use]
    pub const fn with_vertical_size_class(mut self, class: SizeClass) -> Self {
        self.vertical_size_class = Some(class);
        self
    }

    #[must_use]
    pub const fn with_idiom(mut self, idiom: Idiom) -> Self {
        self.idiom = Some(idiom);
        self
    }

    #[must_use]
    pub const fn with_content_size(mut self, category: ContentSizeCategory) -> Self {
        self.preferred_content_size = Some(category);
        self
    }

    /// Whether every field inherits.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.horizontal_size_class.is_none()
            && self.vertical_size_class.is_none()
            && self.idiom.is_none()
            && self.preferred_content_size.is_none()
    }

    /// Overlay `other` on top of `self`: fields set in `other` win.
    #[must_use]
    pub fn merged(self, other: &TraitCollection) -> Self {
        Self {
            horizontal_size_class: other.horizontal_size_class.or(self.horizontal_size_class),
            vertical_size_class: other.vertical_size_class.or(self.vertical_size_class),
            idiom: other.idiom.or(self.idiom),
            preferred_content_size: other.preferred_content_size.or(self.preferred_content_size),
        }
    }

    /// Merge a sequence of collections left to right.
    #[must_use]
    pub fn traits_from<'a>(collections: impl IntoIterator<Item = &'a TraitCollection>) -> Self {
        collections
            .into_iter()
            .fold(Self::EMPTY, |acc, next| acc.merged(next))
    }
}

impl fmt::Display for TraitCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn field<T: fmt::Display>(value: Option<T>) -> String {
            value.map_or_else(|| "-".to_owned(), |v| v.to_string())
        }
        write!(
            f,
            "(h={}, v={}, idiom={}, text={})",
            field(self.horizontal_size_class),
            field(self.vertical_size_class),
            field(self.idiom),
            field(self.preferred_content_size),
        )
    }
}
