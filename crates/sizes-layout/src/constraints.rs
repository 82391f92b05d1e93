#![forbid(unsafe_code)]

//! Viewport constraint management.
//!
//! [`ViewportConstraints`] owns the sizing constraints currently active on
//! the contained view. It knows two modes:
//!
//! - [`SizingMode::FillParent`]: width and height equal the container's.
//! - [`SizingMode::Fixed`]: width and height pinned to literal points.
//!
//! # Invariants
//!
//! 1. At most one mode is installed at a time; once a mode has been applied
//!    exactly one is.
//! 2. A swap removes the whole previous set before installing the next one.
//!    The set is replaced, never patched.
//! 3. A failed install restores the previous set, so the mode reported by
//!    [`ViewportConstraints::mode`] is always what the host has active.
//!
//! # Failure Modes
//!
//! - The host rejects the new pair (e.g. an externally pinned constraint on
//!   the same dimension): [`LayoutError`] is returned and the previous mode
//!   is reinstalled.
//! - The host also rejects the rollback: the error is logged and no mode is
//!   active until the next successful swap.

use std::fmt;

use serde::{Deserialize, Serialize};
use sizes_core::{Rect, Size};
use tracing::{debug, error, warn};

/// Axis a sizing constraint pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Width,
    Height,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dimension::Width => "width",
            Dimension::Height => "height",
        })
    }
}

/// A single required equality on one dimension of the contained view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SizingConstraint {
    /// `view.dimension == points`
    Fixed { dimension: Dimension, points: u32 },
    /// `view.dimension == parent.dimension`
    MatchParent { dimension: Dimension },
}

impl SizingConstraint {
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        match self {
            SizingConstraint::Fixed { dimension, .. }
            | SizingConstraint::MatchParent { dimension } => *dimension,
        }
    }

    /// The value this constraint forces given the parent's size.
    #[must_use]
    pub const fn resolve(&self, parent: Size) -> u32 {
        match self {
            SizingConstraint::Fixed { points, .. } => *points,
            SizingConstraint::MatchParent {
                dimension: Dimension::Width,
            } => parent.width,
            SizingConstraint::MatchParent {
                dimension: Dimension::Height,
            } => parent.height,
        }
    }
}

/// Handle to a constraint installed on a [`LayoutHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConstraintId(u64);

impl ConstraintId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which sizing regime the contained view is under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", content = "size", rename_all = "snake_case")]
pub enum SizingMode {
    FillParent,
    Fixed(Size),
}

impl SizingMode {
    /// The width/height pair that realizes this mode.
    #[must_use]
    pub const fn constraints(self) -> [SizingConstraint; 2] {
        match self {
            SizingMode::FillParent => [
                SizingConstraint::MatchParent {
                    dimension: Dimension::Width,
                },
                SizingConstraint::MatchParent {
                    dimension: Dimension::Height,
                },
            ],
            SizingMode::Fixed(size) => [
                SizingConstraint::Fixed {
                    dimension: Dimension::Width,
                    points: size.width,
                },
                SizingConstraint::Fixed {
                    dimension: Dimension::Height,
                    points: size.height,
                },
            ],
        }
    }

    /// The size the contained view takes inside a parent of `parent` size.
    #[must_use]
    pub const fn resolve(self, parent: Size) -> Size {
        match self {
            SizingMode::FillParent => parent,
            SizingMode::Fixed(size) => size,
        }
    }
}

/// Errors reported by a [`LayoutHost`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The new constraint would over-constrain a dimension.
    #[error("{dimension} constraint conflicts with active constraint {existing}")]
    Conflict {
        dimension: Dimension,
        existing: ConstraintId,
    },
    /// One batch constrains the same dimension twice.
    #[error("{dimension} constrained more than once in one batch")]
    DuplicateDimension { dimension: Dimension },
    /// The contained view is no longer part of a hierarchy.
    #[error("contained view is not in a view hierarchy")]
    Detached,
}

/// Platform capability: install fixed width/height on the contained view.
///
/// Implementations sit on the UI thread and are driven only through
/// [`ViewportConstraints`].
pub trait LayoutHost {
    /// Current size of the container the contained view lives in.
    fn container_bounds(&self) -> Size;

    /// Install and activate `constraints` together.
    ///
    /// Either every constraint is active on return, or none is and an error
    /// is returned.
    fn install(&mut self, constraints: &[SizingConstraint]) -> Result<Vec<ConstraintId>, LayoutError>;

    /// Deactivate and detach the given constraints. Unknown ids are ignored.
    fn remove(&mut self, ids: &[ConstraintId]);

    /// Run a layout pass now if anything changed since the last one.
    fn layout_if_needed(&mut self);

    /// Frame of the contained view after the last layout pass.
    fn contained_frame(&self) -> Rect;
}

#[derive(Debug, Clone)]
struct ActiveSet {
    mode: SizingMode,
    ids: Vec<ConstraintId>,
}

/// Owner of the contained view's sizing constraints.
#[derive(Debug)]
pub struct ViewportConstraints<H> {
    host: H,
    active: Option<ActiveSet>,
}

impl<H: LayoutHost> ViewportConstraints<H> {
    /// Wrap a host. No constraints are installed until the first swap.
    pub fn new(host: H) -> Self {
        Self { host, active: None }
    }

    /// Pin the contained view to `size`.
    pub fn apply_fixed_size(&mut self, size: Size) -> Result<(), LayoutError> {
        self.swap(SizingMode::Fixed(size))
    }

    /// Make the contained view match its container.
    pub fn reset_to_fill_parent(&mut self) -> Result<(), LayoutError> {
        self.swap(SizingMode::FillParent)
    }

    /// The mode currently active on the host, if any.
    #[must_use]
    pub fn mode(&self) -> Option<SizingMode> {
        self.active.as_ref().map(|set| set.mode)
    }

    /// Ids of the constraints this manager currently owns.
    #[must_use]
    pub fn active_ids(&self) -> &[ConstraintId] {
        self.active.as_ref().map_or(&[], |set| set.ids.as_slice())
    }

    /// Force a layout pass on the host.
    pub fn layout_now(&mut self) {
        self.host.layout_if_needed();
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Remove every owned constraint and hand the host back.
    pub fn into_host(mut self) -> H {
        if let Some(set) = self.active.take() {
            self.host.remove(&set.ids);
        }
        self.host
    }

    fn swap(&mut self, mode: SizingMode) -> Result<(), LayoutError> {
        let previous = self.active.take();
        if let Some(set) = &previous {
            self.host.remove(&set.ids);
        }

        match self.host.install(&mode.constraints()) {
            Ok(ids) => {
                debug!(?mode, constraints = ids.len(), "sizing constraints swapped");
                self.active = Some(ActiveSet { mode, ids });
                Ok(())
            }
            Err(err) => {
                warn!(?mode, error = %err, "sizing constraint swap rejected, restoring previous set");
                if let Some(prev) = previous {
                    match self.host.install(&prev.mode.constraints()) {
                        Ok(ids) => {
                            self.active = Some(ActiveSet {
                                mode: prev.mode,
                                ids,
                            });
                        }
                        Err(restore) => {
                            error!(mode = ?prev.mode, error = %restore, "failed to restore sizing constraints");
                        }
                    }
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessHost;

    const HOST: Size = Size::new(1024, 768);

    #[test]
    fn starts_without_constraints() {
        let manager = ViewportConstraints::new(HeadlessHost::new(HOST));
        assert_eq!(manager.mode(), None);
        assert!(manager.active_ids().is_empty());
        assert_eq!(manager.host().managed_constraints().count(), 0);
    }

    #[test]
    fn fixed_size_installs_width_and_height() {
        let mut manager = ViewportConstraints::new(HeadlessHost::new(HOST));
        manager.apply_fixed_size(Size::new(375, 667)).unwrap();

        assert_eq!(manager.mode(), Some(SizingMode::Fixed(Size::new(375, 667))));
        let installed: Vec<_> = manager.host().managed_constraints().collect();
        assert_eq!(installed, SizingMode::Fixed(Size::new(375, 667)).constraints().to_vec());
    }

    #[test]
    fn swap_replaces_whole_set() {
        let mut manager = ViewportConstraints::new(HeadlessHost::new(HOST));
        manager.reset_to_fill_parent().unwrap();
        let first = manager.active_ids().to_vec();

        manager.apply_fixed_size(Size::new(320, 480)).unwrap();
        let second = manager.active_ids().to_vec();

        assert_eq!(second.len(), 2);
        assert!(first.iter().all(|id| !second.contains(id)));
        assert_eq!(manager.host().managed_constraints().count(), 2);
    }

    #[test]
    fn repeated_swaps_do_not_accumulate() {
        let mut manager = ViewportConstraints::new(HeadlessHost::new(HOST));
        for _ in 0..10 {
            manager.apply_fixed_size(Size::new(414, 736)).unwrap();
            manager.reset_to_fill_parent().unwrap();
        }
        assert_eq!(manager.host().managed_constraints().count(), 2);
        assert_eq!(manager.mode(), Some(SizingMode::FillParent));
    }

    #[test]
    fn rejected_swap_restores_previous_mode() {
        let mut host = HeadlessHost::new(HOST);
        let pinned = host.pin_external(SizingConstraint::Fixed {
            dimension: Dimension::Width,
            points: 100,
        });
        let mut manager = ViewportConstraints::new(host);

        // Fill-parent conflicts with the external width pin as well.
        let err = manager.reset_to_fill_parent().unwrap_err();
        assert_eq!(
            err,
            LayoutError::Conflict {
                dimension: Dimension::Width,
                existing: pinned
            }
        );
        assert_eq!(manager.mode(), None);

        manager.host_mut().unpin(pinned);
        manager.reset_to_fill_parent().unwrap();
        assert_eq!(manager.mode(), Some(SizingMode::FillParent));
    }

    #[test]
    fn rollback_keeps_previous_set_active() {
        let mut manager = ViewportConstraints::new(HeadlessHost::new(HOST));
        manager.apply_fixed_size(Size::new(320, 480)).unwrap();
        manager.host_mut().reject_next_install(LayoutError::Detached);

        let err = manager.apply_fixed_size(Size::new(768, 1024)).unwrap_err();
        assert_eq!(err, LayoutError::Detached);
        assert_eq!(manager.mode(), Some(SizingMode::Fixed(Size::new(320, 480))));
        assert_eq!(manager.host().managed_constraints().count(), 2);
    }

    #[test]
    fn into_host_removes_owned_constraints() {
        let mut manager = ViewportConstraints::new(HeadlessHost::new(HOST));
        manager.apply_fixed_size(Size::new(320, 480)).unwrap();
        let host = manager.into_host();
        assert_eq!(host.managed_constraints().count(), 0);
    }

    #[test]
    fn mode_resolution() {
        assert_eq!(SizingMode::FillParent.resolve(HOST), HOST);
        assert_eq!(SizingMode::Fixed(Size::new(1, 2)).resolve(HOST), Size::new(1, 2));
        let [w, h] = SizingMode::FillParent.constraints();
        assert_eq!(w.resolve(HOST), 1024);
        assert_eq!(h.resolve(HOST), 768);
        assert_eq!(w.dimension(), Dimension::Width);
        assert_eq!(h.dimension(), Dimension::Height);
    }

    #[test]
    fn error_messages() {
        let err = LayoutError::Conflict {
            dimension: Dimension::Height,
            existing: ConstraintId::new(7),
        };
        assert_eq!(err.to_string(), "height constraint conflicts with active constraint #7");
    }
}
