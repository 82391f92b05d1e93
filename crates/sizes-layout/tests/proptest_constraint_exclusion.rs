//! Property tests: exactly one sizing mode is active after any swap stream.

use proptest::prelude::*;
use sizes_core::{Device, Orientation};
use sizes_layout::{
    Classification, HeadlessHost, LayoutHost, Rect, Size, SizingMode, ViewportConstraints,
    classify,
};

#[derive(Debug, Clone, Copy)]
enum Op {
    Fixed(Size),
    Fill,
    Reject,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (1u32..2048, 1u32..2048).prop_map(|(w, h)| Op::Fixed(Size::new(w, h))),
        2 => Just(Op::Fill),
        1 => Just(Op::Reject),
    ]
}

proptest! {
    #[test]
    fn exactly_one_mode_after_every_swap(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut manager = ViewportConstraints::new(HeadlessHost::new(Size::new(1024, 768)));
        manager.reset_to_fill_parent().unwrap();
        let mut expected = SizingMode::FillParent;

        for op in ops {
            match op {
                Op::Fixed(size) => {
                    manager.apply_fixed_size(size).unwrap();
                    expected = SizingMode::Fixed(size);
                }
                Op::Fill => {
                    manager.reset_to_fill_parent().unwrap();
                    expected = SizingMode::FillParent;
                }
                Op::Reject => {
                    manager.host_mut().reject_next_install(sizes_layout::LayoutError::Detached);
                    prop_assert!(manager.apply_fixed_size(Size::new(1, 1)).is_err());
                }
            }
            prop_assert_eq!(manager.mode(), Some(expected));
            let installed: Vec<_> = manager.host().managed_constraints().collect();
            prop_assert_eq!(installed, expected.constraints().to_vec());
            prop_assert_eq!(manager.active_ids().len(), 2);
        }
    }

    #[test]
    fn laid_out_frame_matches_mode(w in 1u32..2048, h in 1u32..2048) {
        let bounds = Size::new(1024, 768);
        let mut manager = ViewportConstraints::new(HeadlessHost::new(bounds));
        manager.apply_fixed_size(Size::new(w, h)).unwrap();
        manager.layout_now();
        prop_assert_eq!(manager.host().contained_frame(), Rect::centered_in(Size::new(w, h), bounds));
    }

    #[test]
    fn host_landscape_tracks_any_bounds(w in 0u32..4096, h in 0u32..4096) {
        let c = classify(Device::Default, Orientation::Landscape, Size::new(w, h));
        prop_assert_eq!(c.viewport(), Some(Size::new(h, w)));
        let simulated_without_traits = matches!(c, Classification::Simulated { traits, .. } if traits.is_empty());
        prop_assert!(simulated_without_traits);
        prop_assert_eq!(
            classify(Device::Default, Orientation::Portrait, Size::new(w, h)),
            Classification::Unsimulated
        );
    }
}
