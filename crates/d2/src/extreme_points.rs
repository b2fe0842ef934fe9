//! Extreme point set for a single floor.
//!
//! The set keeps every maximal free rectangle of the floor, anchored at its
//! lower-left corner. When a placement is committed, every rectangle it
//! overlaps is replaced by the up to four rectangles left free around it.
//! Rectangles contained in another one are then dropped, so the union of the
//! set is always exactly the free floor and no rectangle overlaps a
//! placement.

use crate::point::{Point2D, Span};
use u_packing_core::geometry::Cuboid;
use u_packing_core::{Error, Result};

/// Free-space bookkeeping for one level floor.
#[derive(Debug, Clone, Default)]
pub struct ExtremePoints2D {
    width: i64,
    depth: i64,
    values: Vec<Point2D>,
    scratch: Vec<Point2D>,
    placements: Vec<Cuboid>,
}

impl ExtremePoints2D {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set initialized to the given floor.
    pub fn with_bounds(dx: i64, dy: i64) -> Self {
        let mut points = Self::new();
        points.initialize(dx, dy);
        points
    }

    /// Resets to a single point spanning the whole floor, backed by both walls.
    ///
    /// A floor without area has no points.
    pub fn initialize(&mut self, dx: i64, dy: i64) {
        self.width = dx.max(0);
        self.depth = dy.max(0);
        self.values.clear();
        self.placements.clear();

        if self.width > 0 && self.depth > 0 {
            let origin = Point2D::new(0, 0, self.width, self.depth)
                .map(|p| {
                    p.with_y_support(Span::new(0, self.depth))
                        .with_x_support(Span::new(0, self.width))
                });
            if let Ok(origin) = origin {
                self.values.push(origin);
            }
        }
    }

    /// Commits `placed` at the point with the given index.
    ///
    /// The placement must start at the point's anchor and fit inside it.
    pub fn add(&mut self, index: usize, placed: &Cuboid) -> Result<()> {
        let point = self.values.get(index).ok_or_else(|| {
            Error::InvalidPlacement(format!(
                "no point {} among {}",
                index,
                self.values.len()
            ))
        })?;

        if placed.x != point.min_x() || placed.y != point.min_y() {
            return Err(Error::InvalidPlacement(format!(
                "placement at {}x{} does not start at point {}x{}",
                placed.x,
                placed.y,
                point.min_x(),
                point.min_y()
            )));
        }
        if placed.dx <= 0 || placed.dy <= 0 || placed.dx > point.dx() || placed.dy > point.dy() {
            return Err(Error::InvalidPlacement(format!(
                "footprint {}x{} does not fit point {}x{}",
                placed.dx,
                placed.dy,
                point.dx(),
                point.dy()
            )));
        }

        self.scratch.clear();
        for point in self.values.drain(..) {
            if point.intersects(placed) {
                point.split(placed, &mut self.scratch);
            } else {
                self.scratch.push(point);
            }
        }
        std::mem::swap(&mut self.values, &mut self.scratch);

        self.placements.push(*placed);
        self.prune();
        Ok(())
    }

    // Drops degenerate and contained points. Of two equal points the first
    // one is kept.
    fn prune(&mut self) {
        self.values
            .sort_by_key(|p| (p.min_x(), p.min_y()));

        let mut i = 0;
        while i < self.values.len() {
            let point = &self.values[i];
            let redundant = point.is_degenerate()
                || self.values.iter().enumerate().any(|(j, other)| {
                    j != i && other.contains(point) && (j < i || !point.contains(other))
                });
            if redundant {
                self.values.remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Returns the point at `index`.
    pub fn value(&self, index: usize) -> Option<&Point2D> {
        self.values.get(index)
    }

    /// Returns all points, ordered by anchor x then y.
    pub fn values(&self) -> &[Point2D] {
        &self.values
    }

    /// Returns the placements committed since the last initialization.
    pub fn placements(&self) -> &[Cuboid] {
        &self.placements
    }

    /// Returns the free rectangle of every point as a box of height `dz`
    /// resting at `z`.
    pub fn free_spaces(&self, z: i64, dz: i64) -> Vec<Cuboid> {
        self.values
            .iter()
            .map(|p| Cuboid::new(p.min_x(), p.min_y(), z, p.dx(), p.dy(), dz))
            .collect()
    }

    /// Returns the largest free area over all points.
    pub fn max_area(&self) -> i64 {
        self.values.iter().map(Point2D::area).max().unwrap_or(0)
    }

    /// Returns the floor width.
    pub fn width(&self) -> i64 {
        self.width
    }

    /// Returns the floor depth.
    pub fn depth(&self) -> i64 {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Discards all points and placements.
    pub fn reset(&mut self) {
        self.values.clear();
        self.placements.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(points: &ExtremePoints2D) -> Vec<(i64, i64, i64, i64)> {
        points
            .values()
            .iter()
            .map(|p| (p.min_x(), p.min_y(), p.max_x(), p.max_y()))
            .collect()
    }

    fn index_of(points: &ExtremePoints2D, x: i64, y: i64) -> usize {
        points
            .values()
            .iter()
            .position(|p| p.min_x() == x && p.min_y() == y)
            .unwrap()
    }

    #[test]
    fn test_initialize() {
        let points = ExtremePoints2D::with_bounds(10, 5);
        assert_eq!(bounds(&points), vec![(0, 0, 10, 5)]);
        assert_eq!(points.max_area(), 50);
        assert!(points.values()[0].is_y_support(4));
        assert!(points.values()[0].is_x_support(9));

        assert!(ExtremePoints2D::with_bounds(0, 5).is_empty());
    }

    #[test]
    fn test_single_placement() {
        let mut points = ExtremePoints2D::with_bounds(10, 10);
        points.add(0, &Cuboid::new(0, 0, 0, 10, 3, 1)).unwrap();

        assert_eq!(bounds(&points), vec![(0, 3, 10, 10)]);
        assert_eq!(points.values()[0].x_support(), Some(Span::new(0, 10)));
        assert_eq!(points.free_spaces(2, 3), vec![Cuboid::new(0, 3, 2, 10, 7, 3)]);
    }

    #[test]
    fn test_two_placements() {
        let mut points = ExtremePoints2D::with_bounds(10, 10);
        points.add(0, &Cuboid::new(0, 0, 0, 4, 6, 1)).unwrap();
        assert_eq!(bounds(&points), vec![(0, 6, 10, 10), (4, 0, 10, 10)]);

        let right = index_of(&points, 4, 0);
        points.add(right, &Cuboid::new(4, 0, 0, 3, 2, 1)).unwrap();

        assert_eq!(
            bounds(&points),
            vec![(0, 6, 10, 10), (4, 2, 10, 10), (7, 0, 10, 10)]
        );
        let above = &points.values()[index_of(&points, 4, 2)];
        assert_eq!(above.x_support(), Some(Span::new(4, 7)));
        assert!(above.is_y_support(5));
        assert!(!above.is_y_support(6));
    }

    #[test]
    fn test_fill_floor() {
        let mut points = ExtremePoints2D::with_bounds(2, 2);
        points.add(0, &Cuboid::new(0, 0, 0, 1, 1, 1)).unwrap();
        points.add(index_of(&points, 1, 0), &Cuboid::new(1, 0, 0, 1, 1, 1)).unwrap();
        points.add(index_of(&points, 0, 1), &Cuboid::new(0, 1, 0, 1, 1, 1)).unwrap();
        assert_eq!(bounds(&points), vec![(1, 1, 2, 2)]);

        points.add(0, &Cuboid::new(1, 1, 0, 1, 1, 1)).unwrap();
        assert!(points.is_empty());
        assert_eq!(points.placements().len(), 4);
    }

    #[test]
    fn test_add_rejects_misplaced() {
        let mut points = ExtremePoints2D::with_bounds(10, 10);
        assert!(matches!(
            points.add(3, &Cuboid::new(0, 0, 0, 1, 1, 1)),
            Err(Error::InvalidPlacement(_))
        ));
        assert!(points.add(0, &Cuboid::new(1, 0, 0, 1, 1, 1)).is_err());
        assert!(points.add(0, &Cuboid::new(0, 0, 0, 11, 1, 1)).is_err());
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn test_reset() {
        let mut points = ExtremePoints2D::with_bounds(4, 4);
        points.add(0, &Cuboid::new(0, 0, 0, 1, 1, 1)).unwrap();
        points.reset();
        assert!(points.is_empty());
        assert!(points.placements().is_empty());
    }
}
