//! Property tests for the pixel-space geometry helpers.

use evasion_core::geometry::{Point, Rect};
use proptest::prelude::*;

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..400.0, 0.0f32..400.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn overlap_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn rect_overlaps_itself(a in rect_strategy()) {
        prop_assert!(a.overlaps(&a));
    }

    #[test]
    fn contained_rect_overlaps_container(
        x in -500.0f32..500.0, y in -500.0f32..500.0,
        w in 1.0f32..400.0, h in 1.0f32..400.0,
        fx in 0.0f32..0.5, fy in 0.0f32..0.5,
    ) {
        let a = Rect::new(x, y, w, h);
        let inner = Rect::new(a.x + a.width * fx * 0.5, a.y + a.height * fy * 0.5, a.width * 0.5, a.height * 0.5);
        prop_assert!(a.contains_rect(&inner));
        prop_assert!(a.overlaps(&inner));
    }

    #[test]
    fn center_is_inside(a in rect_strategy()) {
        prop_assert!(a.contains(a.center()));
    }

    #[test]
    fn distance_is_symmetric_and_non_negative(
        ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0,
        bx in -1000.0f32..1000.0, by in -1000.0f32..1000.0,
    ) {
        let a = Point::new(ax, ay);
        let b = Point::new(bx, by);
        prop_assert!(a.distance(b) >= 0.0);
        prop_assert_eq!(a.distance(b), b.distance(a));
    }
}
