#![forbid(unsafe_code)]

//! In-memory [`LayoutHost`] with a tiny equality solver.
//!
//! Used by tests and by tooling that needs deterministic layout without a
//! windowing system. Each dimension may carry at most one active
//! constraint; a second one is rejected as a conflict, the way a required
//! equality pair with no priorities is unsatisfiable on a real layout
//! engine. Externally pinned constraints model layout imposed by code the
//! simulator does not own.

use std::collections::BTreeMap;

use sizes_core::{Rect, Size};
use tracing::trace;

use crate::constraints::{ConstraintId, Dimension, LayoutError, LayoutHost, SizingConstraint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Owner {
    Managed,
    External,
}

/// Deterministic layout host.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    bounds: Size,
    next_id: u64,
    constraints: BTreeMap<ConstraintId, (SizingConstraint, Owner)>,
    frame: Rect,
    needs_layout: bool,
    layout_passes: u64,
    pending_failure: Option<LayoutError>,
}

impl HeadlessHost {
    /// A host whose container has the given bounds.
    #[must_use]
    pub fn new(bounds: Size) -> Self {
        Self {
            bounds,
            next_id: 1,
            constraints: BTreeMap::new(),
            frame: Rect::default(),
            needs_layout: true,
            layout_passes: 0,
            pending_failure: None,
        }
    }

    /// Resize the container, e.g. after a host window rotation.
    pub fn set_container_bounds(&mut self, bounds: Size) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.needs_layout = true;
        }
    }

    /// Pin a constraint the manager does not own.
    pub fn pin_external(&mut self, constraint: SizingConstraint) -> ConstraintId {
        let id = self.allocate_id();
        self.constraints.insert(id, (constraint, Owner::External));
        self.needs_layout = true;
        id
    }

    /// Drop an external pin.
    pub fn unpin(&mut self, id: ConstraintId) {
        if matches!(self.constraints.get(&id), Some((_, Owner::External))) {
            self.constraints.remove(&id);
            self.needs_layout = true;
        }
    }

    /// Make the next [`LayoutHost::install`] fail with `error`.
    pub fn reject_next_install(&mut self, error: LayoutError) {
        self.pending_failure = Some(error);
    }

    /// Active constraints installed through [`LayoutHost::install`], oldest first.
    pub fn managed_constraints(&self) -> impl Iterator<Item = SizingConstraint> + '_ {
        self.constraints
            .values()
            .filter(|(_, owner)| *owner == Owner::Managed)
            .map(|(constraint, _)| *constraint)
    }

    /// The constraint currently governing `dimension`, if any.
    #[must_use]
    pub fn constraint_for(&self, dimension: Dimension) -> Option<SizingConstraint> {
        self.constraints
            .values()
            .map(|(constraint, _)| *constraint)
            .find(|constraint| constraint.dimension() == dimension)
    }

    /// Number of layout passes actually performed.
    #[must_use]
    pub fn layout_passes(&self) -> u64 {
        self.layout_passes
    }

    /// Whether constraints or bounds changed since the last pass.
    #[must_use]
    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    fn allocate_id(&mut self) -> ConstraintId {
        let id = ConstraintId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn conflict(&self, constraint: &SizingConstraint) -> Option<ConstraintId> {
        self.constraints
            .iter()
            .find(|(_, (existing, _))| existing.dimension() == constraint.dimension())
            .map(|(id, _)| *id)
    }

    fn solve(&self, dimension: Dimension) -> u32 {
        // An unconstrained dimension collapses to zero.
        self.constraint_for(dimension)
            .map_or(0, |constraint| constraint.resolve(self.bounds))
    }
}

impl LayoutHost for HeadlessHost {
    fn container_bounds(&self) -> Size {
        self.bounds
    }

    fn install(&mut self, constraints: &[SizingConstraint]) -> Result<Vec<ConstraintId>, LayoutError> {
        if let Some(err) = self.pending_failure.take() {
            return Err(err);
        }
        for (i, constraint) in constraints.iter().enumerate() {
            if let Some(existing) = self.conflict(constraint) {
                return Err(LayoutError::Conflict {
                    dimension: constraint.dimension(),
                    existing,
                });
            }
            if constraints[..i]
                .iter()
                .any(|earlier| earlier.dimension() == constraint.dimension())
            {
                return Err(LayoutError::DuplicateDimension {
                    dimension: constraint.dimension(),
                });
            }
        }

        let ids: Vec<_> = constraints
            .iter()
            .map(|constraint| {
                let id = self.allocate_id();
                self.constraints.insert(id, (*constraint, Owner::Managed));
                id
            })
            .collect();
        self.needs_layout = true;
        trace!(count = ids.len(), "headless constraints installed");
        Ok(ids)
    }

    fn remove(&mut self, ids: &[ConstraintId]) {
        for id in ids {
            if matches!(self.constraints.get(id), Some((_, Owner::Managed))) {
                self.constraints.remove(id);
                self.needs_layout = true;
            }
        }
    }

    fn layout_if_needed(&mut self) {
        if !self.needs_layout {
            return;
        }
        let size = Size::new(self.solve(Dimension::Width), self.solve(Dimension::Height));
        self.frame = Rect::centered_in(size, self.bounds);
        self.needs_layout = false;
        self.layout_passes += 1;
        trace!(frame = ?self.frame, "headless layout pass");
    }

    fn contained_frame(&self) -> Rect {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Size = Size::new(1024, 768);

    fn fixed(dimension: Dimension, points: u32) -> SizingConstraint {
        SizingConstraint::Fixed { dimension, points }
    }

    #[test]
    fn unconstrained_view_collapses() {
        let mut host = HeadlessHost::new(BOUNDS);
        host.layout_if_needed();
        assert_eq!(host.contained_frame(), Rect::new(512, 384, 0, 0));
        assert_eq!(host.layout_passes(), 1);
    }

    #[test]
    fn fixed_constraints_center_the_view() {
        let mut host = HeadlessHost::new(BOUNDS);
        host.install(&[fixed(Dimension::Width, 320), fixed(Dimension::Height, 480)])
            .unwrap();
        host.layout_if_needed();
        assert_eq!(host.contained_frame(), Rect::new(352, 144, 320, 480));
    }

    #[test]
    fn match_parent_follows_bounds() {
        let mut host = HeadlessHost::new(BOUNDS);
        host.install(&[
            SizingConstraint::MatchParent {
                dimension: Dimension::Width,
            },
            SizingConstraint::MatchParent {
                dimension: Dimension::Height,
            },
        ])
        .unwrap();
        host.layout_if_needed();
        assert_eq!(host.contained_frame(), Rect::from_size(BOUNDS));

        host.set_container_bounds(Size::new(768, 1024));
        assert!(host.needs_layout());
        host.layout_if_needed();
        assert_eq!(host.contained_frame(), Rect::from_size(Size::new(768, 1024)));
    }

    #[test]
    fn layout_is_skipped_when_clean() {
        let mut host = HeadlessHost::new(BOUNDS);
        host.layout_if_needed();
        host.layout_if_needed();
        assert_eq!(host.layout_passes(), 1);
    }

    #[test]
    fn second_constraint_on_dimension_conflicts() {
        let mut host = HeadlessHost::new(BOUNDS);
        let ids = host.install(&[fixed(Dimension::Width, 320)]).unwrap();
        let err = host.install(&[fixed(Dimension::Width, 375)]).unwrap_err();
        assert_eq!(
            err,
            LayoutError::Conflict {
                dimension: Dimension::Width,
                existing: ids[0]
            }
        );
    }

    #[test]
    fn failed_install_is_all_or_nothing() {
        let mut host = HeadlessHost::new(BOUNDS);
        host.pin_external(fixed(Dimension::Height, 10));
        let err = host.install(&[fixed(Dimension::Width, 320), fixed(Dimension::Height, 480)]);
        assert!(err.is_err());
        assert_eq!(host.managed_constraints().count(), 0);
    }

    #[test]
    fn duplicate_dimension_within_batch_is_rejected() {
        let mut host = HeadlessHost::new(BOUNDS);
        let err = host.install(&[
            fixed(Dimension::Width, 1),
            fixed(Dimension::Height, 2),
            fixed(Dimension::Width, 3),
        ]);
        assert_eq!(
            err,
            Err(LayoutError::DuplicateDimension {
                dimension: Dimension::Width
            })
        );
        assert_eq!(host.managed_constraints().count(), 0);

        // Nothing was allocated for the rejected batch.
        let ids = host.install(&[fixed(Dimension::Width, 1)]).unwrap();
        assert_eq!(ids, [ConstraintId::new(1)]);
    }

    #[test]
    fn remove_ignores_external_and_unknown_ids() {
        let mut host = HeadlessHost::new(BOUNDS);
        let external = host.pin_external(fixed(Dimension::Width, 10));
        host.remove(&[external, ConstraintId::new(999)]);
        assert_eq!(host.constraint_for(Dimension::Width), Some(fixed(Dimension::Width, 10)));
        host.unpin(external);
        assert_eq!(host.constraint_for(Dimension::Width), None);
    }

    #[test]
    fn injected_failure_fires_once() {
        let mut host = HeadlessHost::new(BOUNDS);
        host.reject_next_install(LayoutError::Detached);
        assert_eq!(host.install(&[]), Err(LayoutError::Detached));
        assert_eq!(host.install(&[]), Ok(Vec::new()));
    }
}
