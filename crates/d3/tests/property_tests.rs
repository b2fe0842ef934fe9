//! Property-based tests for volumetric extreme points and the packer.

use proptest::prelude::*;
use std::sync::Arc;
use u_packing_core::geometry::{Cuboid, Stackable};
use u_packing_d3::{Container, ExtremePoints3D, LaffPacker, LevelPacker};

/// (point selector, fractions of the point's extent) per step.
fn steps_strategy() -> impl Strategy<Value = Vec<(usize, (u8, u8, u8))>> {
    prop::collection::vec((any::<usize>(), (1u8..=100, 1u8..=100, 1u8..=100)), 1..20)
}

fn cell_covered(placements: &[Cuboid], x: i64, y: i64, z: i64) -> bool {
    placements.iter().any(|p| {
        p.x <= x && x < p.end_x() && p.y <= y && y < p.end_y() && p.z <= z && z < p.end_z()
    })
}

fn scaled(extent: i64, fraction: u8) -> i64 {
    (extent * i64::from(fraction) / 100).max(1)
}

proptest! {
    #[test]
    fn prop_points_are_sound(
        bounds in (1i64..7, 1i64..7, 1i64..7),
        steps in steps_strategy(),
    ) {
        let (width, depth, height) = bounds;
        let mut points = ExtremePoints3D::with_bounds(width, depth, height);

        for (selector, (fx, fy, fz)) in steps {
            if points.is_empty() {
                break;
            }
            let index = selector % points.len();
            let point = points.value(index).unwrap().clone();
            let placed = Cuboid::new(
                point.min_x(),
                point.min_y(),
                point.min_z(),
                scaled(point.dx(), fx),
                scaled(point.dy(), fy),
                scaled(point.dz(), fz),
            );
            points.add(index, &placed).unwrap();

            for point in points.values() {
                prop_assert!(!point.is_degenerate());
                for placed in points.placements() {
                    prop_assert!(!point.intersects(placed));
                }
            }

            // every free cell lies in some point
            for x in 0..width {
                for y in 0..depth {
                    for z in 0..height {
                        if !cell_covered(points.placements(), x, y, z) {
                            let inside = points.values().iter().any(|p| {
                                p.min_x() <= x && x < p.max_x()
                                    && p.min_y() <= y && y < p.max_y()
                                    && p.min_z() <= z && z < p.max_z()
                            });
                            prop_assert!(inside);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn prop_packing_invariants(
        sizes in prop::collection::vec((1i64..4, 1i64..4, 1i64..4, 0i64..4), 1..20),
        max_weight in 0i64..30,
    ) {
        let items: Vec<Arc<Stackable>> = sizes
            .iter()
            .enumerate()
            .map(|(i, &(dx, dy, dz, w))| {
                Arc::new(Stackable::rotatable(format!("B{}", i), dx, dy, dz, w).unwrap())
            })
            .collect();
        let container = Container::new("C", 5, 4, 6, 0, max_weight).unwrap();

        let result = LaffPacker::default()
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
                prop_assert!(p.end_x() <= 5 && p.end_y() <= 4 && p.end_z() <= 6);
                prop_assert!(p.z() >= level.z());
                prop_assert!(p.end_z() <= level.z() + level.height());

                // anything above the level floor rests on one placed item
                if p.z() > level.z() {
                    let rests = level.placements().iter().any(|below| {
                        below.end_z() == p.z()
                            && below.cuboid().covers_footprint(
                                p.x(),
                                p.y(),
                                p.stack_value().dx,
                                p.stack_value().dy,
                            )
                    });
                    prop_assert!(rests);
                }
            }
        }
        prop_assert!(result.stack.weight() <= max_weight);

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
