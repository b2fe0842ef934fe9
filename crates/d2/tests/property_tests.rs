//! Property-based tests for floor extreme points and the fast packer.
//!
//! Random placement sequences are applied to a small floor and the point set
//! is checked against a brute-force grid after every step.

use proptest::prelude::*;
use std::sync::Arc;
use u_packing_core::geometry::{Cuboid, Stackable};
use u_packing_d2::{Container, ExtremePoints2D, FastLaffPacker, LevelPacker};

/// (point selector, width fraction, depth fraction) per step.
fn steps_strategy() -> impl Strategy<Value = Vec<(usize, u8, u8)>> {
    prop::collection::vec((any::<usize>(), 1u8..=100, 1u8..=100), 1..25)
}

fn covered(placements: &[Cuboid], x: i64, y: i64) -> bool {
    placements
        .iter()
        .any(|p| p.x <= x && x < p.end_x() && p.y <= y && y < p.end_y())
}

proptest! {
    #[test]
    fn prop_points_partition_free_floor(
        width in 1i64..12,
        depth in 1i64..12,
        steps in steps_strategy(),
    ) {
        let mut points = ExtremePoints2D::with_bounds(width, depth);

        for (selector, fx, fy) in steps {
            if points.is_empty() {
                break;
            }
            let index = selector % points.len();
            let point = points.value(index).unwrap().clone();
            let dx = (point.dx() * i64::from(fx) / 100).max(1);
            let dy = (point.dy() * i64::from(fy) / 100).max(1);
            points
                .add(index, &Cuboid::new(point.min_x(), point.min_y(), 0, dx, dy, 1))
                .unwrap();

            // no point overlaps a placement
            for point in points.values() {
                for placed in points.placements() {
                    prop_assert!(!point.intersects(placed));
                }
            }

            // every free cell is inside some point
            for x in 0..width {
                for y in 0..depth {
                    if !covered(points.placements(), x, y) {
                        let inside = points.values().iter().any(|p| {
                            p.min_x() <= x && x < p.max_x() && p.min_y() <= y && y < p.max_y()
                        });
                        prop_assert!(inside);
                    }
                }
            }

            // no redundant points
            for (i, a) in points.values().iter().enumerate() {
                prop_assert!(!a.is_degenerate());
                for (j, b) in points.values().iter().enumerate() {
                    if i != j {
                        prop_assert!(!a.contains(b));
                    }
                }
            }
        }
    }

    #[test]
    fn prop_packing_invariants(
        sizes in prop::collection::vec((1i64..5, 1i64..5, 1i64..4, 0i64..4), 1..20),
        max_weight in 0i64..30,
    ) {
        let items: Vec<Arc<Stackable>> = sizes
            .iter()
            .enumerate()
            .map(|(i, &(dx, dy, dz, w))| {
                Arc::new(Stackable::rotatable(format!("B{}", i), dx, dy, dz, w).unwrap())
            })
            .collect();
        let container = Container::new("C", 6, 5, 6, 0, max_weight).unwrap();

        let result = FastLaffPacker::default()
            .pack(&items, &container, &|| false)
            .unwrap()
            .into_result()
            .unwrap();

        let placements: Vec<_> = result.stack.placements().collect();
        for (i, a) in placements.iter().enumerate() {
            for b in &placements[i + 1..] {
                prop_assert!(!a.intersects(b));
            }
        }

        for level in result.stack.levels() {
            for p in level.placements() {
                prop_assert!(p.end_x() <= 6 && p.end_y() <= 5 && p.end_z() <= 6);
                prop_assert_eq!(p.z(), level.z());
                prop_assert!(p.end_z() <= level.z() + level.height());
            }
        }
        prop_assert!(result.stack.weight() <= max_weight);

        // placed and leftovers together are exactly the input
        let mut seen: Vec<String> = placements
            .iter()
            .map(|p| p.stackable().name().to_string())
            .chain(result.leftovers.iter().map(|s| s.name().to_string()))
            .collect();
        seen.sort();
        let mut expected: Vec<String> = items.iter().map(|s| s.name().to_string()).collect();
        expected.sort();
        prop_assert_eq!(seen, expected);
    }
}
