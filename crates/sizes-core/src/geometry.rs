#![forbid(unsafe_code)]

//! Geometric primitives in layout points.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A width/height pair in layout points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in points.
    pub width: u32,
    /// Height in points.
    pub height: u32,
}

impl Size {
    /// The empty size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new size.
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Swap width and height.
    #[inline]
    #[must_use]
    pub const fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Check if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Wider than tall.
    #[inline]
    pub const fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    /// Taller than wide.
    #[inline]
    pub const fn is_portrait(&self) -> bool {
        self.height > self.width
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A placed rectangle.
///
/// The origin is signed: a simulated device larger than its container is
/// centered with a negative origin and overflows on every side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in points.
    pub width: u32,
    /// Height in points.
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Center `size` inside a container of `container` size.
    ///
    /// Odd leftovers round toward negative infinity, so the extra point lands
    /// on the right/bottom edge.
    pub fn centered_in(size: Size, container: Size) -> Self {
        let x = centered_offset(size.width, container.width);
        let y = centered_offset(size.height, container.height);
        Self::new(x, y, size.width, size.height)
    }

    /// The rectangle's size.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether this rectangle lies entirely inside `container` placed at the origin.
    pub fn fits_within(&self, container: Size) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.right() <= i64::from(container.width)
            && self.bottom() <= i64::from(container.height)
    }
}

fn centered_offset(inner: u32, outer: u32) -> i32 {
    let delta = (i64::from(outer) - i64::from(inner)).div_euclid(2);
    delta.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
