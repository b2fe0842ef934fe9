//! Placement ranking strategies.
//!
//! Every comparison returns [`Ordering::Less`] when the first argument should
//! be preferred. Packers keep the current best candidate unless a challenger
//! compares strictly less, so ties keep the earlier candidate.

use crate::geometry::{StackValue, Stackable};
use std::cmp::Ordering;

/// A candidate anchor as seen by the comparators.
pub trait ExtremePoint {
    /// Lower x bound.
    fn min_x(&self) -> i64;

    /// Lower y bound.
    fn min_y(&self) -> i64;

    /// Lower z bound. Floor points report zero.
    fn min_z(&self) -> i64 {
        0
    }

    /// Free footprint area.
    fn area(&self) -> i64;

    /// Free volume. Floor points report their area.
    fn volume(&self) -> i64 {
        self.area()
    }
}

/// Orderings used by the level packers to pick items, rotations and points.
pub trait PlacementComparator<P: ExtremePoint>: Send + Sync {
    /// Ranks two items as candidates to start a level.
    fn compare_first_stackable(&self, a: &Stackable, b: &Stackable) -> Ordering;

    /// Ranks two rotations of level starters at the level origin.
    fn compare_first_value(
        &self,
        point_a: &P,
        value_a: &StackValue,
        point_b: &P,
        value_b: &StackValue,
    ) -> Ordering;

    /// Ranks two items as candidates to fill the current level.
    fn compare_next_stackable(&self, a: &Stackable, b: &Stackable) -> Ordering;

    /// Ranks two rotations, each at its own point.
    fn compare_next_value(
        &self,
        point_a: &P,
        value_a: &StackValue,
        point_b: &P,
        value_b: &StackValue,
    ) -> Ordering;
}

/// Largest-area-fit-first ranking.
///
/// A level starts with the item with the largest footprint (or, with
/// `footprint_first` off, the tallest one), laid with its largest face down.
/// The level is then filled with the largest items first, each in the
/// rotation covering the most floor at the tightest point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LargestAreaFitFirst {
    pub footprint_first: bool,
}

impl LargestAreaFitFirst {
    /// Creates the default ranking, starting levels with the largest footprint.
    pub fn new() -> Self {
        Self {
            footprint_first: true,
        }
    }

    /// Starts levels with the tallest item instead.
    pub fn tallest_first() -> Self {
        Self {
            footprint_first: false,
        }
    }
}

impl Default for LargestAreaFitFirst {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ExtremePoint> PlacementComparator<P> for LargestAreaFitFirst {
    fn compare_first_stackable(&self, a: &Stackable, b: &Stackable) -> Ordering {
        let primary = if self.footprint_first {
            b.maximum_area().cmp(&a.maximum_area())
        } else {
            b.maximum_height().cmp(&a.maximum_height())
        };
        primary.then_with(|| b.volume().cmp(&a.volume()))
    }

    fn compare_first_value(
        &self,
        _point_a: &P,
        value_a: &StackValue,
        _point_b: &P,
        value_b: &StackValue,
    ) -> Ordering {
        if self.footprint_first {
            value_b
                .area()
                .cmp(&value_a.area())
                .then_with(|| value_a.dz.cmp(&value_b.dz))
        } else {
            value_b
                .dz
                .cmp(&value_a.dz)
                .then_with(|| value_b.area().cmp(&value_a.area()))
        }
    }

    fn compare_next_stackable(&self, a: &Stackable, b: &Stackable) -> Ordering {
        b.volume()
            .cmp(&a.volume())
            .then_with(|| b.weight().cmp(&a.weight()))
    }

    fn compare_next_value(
        &self,
        point_a: &P,
        value_a: &StackValue,
        point_b: &P,
        value_b: &StackValue,
    ) -> Ordering {
        value_b
            .area()
            .cmp(&value_a.area())
            .then_with(|| point_a.min_z().cmp(&point_b.min_z()))
            .then_with(|| point_a.volume().cmp(&point_b.volume()))
            .then_with(|| value_a.dz.cmp(&value_b.dz))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Corner(i64);

    impl ExtremePoint for Corner {
        fn min_x(&self) -> i64 {
            0
        }

        fn min_y(&self) -> i64 {
            0
        }

        fn area(&self) -> i64 {
            self.0
        }
    }

    #[test]
    fn test_first_stackable_prefers_largest_footprint() {
        let flat = Stackable::rotatable("flat", 4, 4, 1, 1).unwrap();
        let tall = Stackable::new(
            "tall",
            crate::geometry::Dimension::new(2, 2, 6).unwrap(),
            1,
            crate::geometry::OrientationConstraint::Fixed,
        )
        .unwrap();

        let laff = LargestAreaFitFirst::new();
        assert_eq!(
            PlacementComparator::<Corner>::compare_first_stackable(&laff, &flat, &tall),
            Ordering::Less
        );

        let tallest = LargestAreaFitFirst::tallest_first();
        assert_eq!(
            PlacementComparator::<Corner>::compare_first_stackable(&tallest, &flat, &tall),
            Ordering::Greater
        );
    }

    #[test]
    fn test_first_value_lays_largest_face_down() {
        let item = Stackable::rotatable("B", 2, 3, 4, 1).unwrap();
        let laff = LargestAreaFitFirst::new();
        let origin = Corner(100);

        let best = item
            .stack_values()
            .iter()
            .min_by(|a, b| laff.compare_first_value(&origin, a, &origin, b))
            .unwrap();
        assert_eq!(best.area(), 12);
        assert_eq!(best.dz, 2);
    }

    #[test]
    fn test_next_value_prefers_tighter_point() {
        let laff = LargestAreaFitFirst::new();
        let value = StackValue::new(0, 1, 1, 1);
        assert_eq!(
            laff.compare_next_value(&Corner(4), &value, &Corner(9), &value),
            Ordering::Less
        );
        assert_eq!(
            laff.compare_next_value(&Corner(4), &value, &Corner(4), &value),
            Ordering::Equal
        );
    }

    #[test]
    fn test_next_stackable_prefers_volume_then_weight() {
        let laff = LargestAreaFitFirst::new();
        let big = Stackable::rotatable("big", 2, 2, 2, 1).unwrap();
        let small_heavy = Stackable::rotatable("small", 1, 1, 1, 9).unwrap();
        let small_light = Stackable::rotatable("small", 1, 1, 1, 1).unwrap();

        assert_eq!(
            PlacementComparator::<Corner>::compare_next_stackable(&laff, &big, &small_heavy),
            Ordering::Less
        );
        assert_eq!(
            PlacementComparator::<Corner>::compare_next_stackable(&laff, &small_heavy, &small_light),
            Ordering::Less
        );
    }
}
