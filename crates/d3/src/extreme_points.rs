//! Extreme point set for a volume.
//!
//! Free space is kept as a list of maximal free boxes, each anchored at its
//! lower corner. Committing a placement replaces every box it overlaps by the
//! up to six boxes left free around it, so no box ever overlaps a placement
//! and every free cell stays inside some box.
//!
//! A box is dropped when another box contains it and offers the same support,
//! so pruning never loses a supported anchor.
//!
//! # References
//!
//! - Crainic, T. G., Perboli, G., & Tadei, R. (2008). Extreme point-based heuristics
//!   for three-dimensional bin packing.

use crate::point::Point3D;
use u_packing_core::geometry::Cuboid;
use u_packing_core::{Error, Result};

/// Free-space bookkeeping for one volume.
#[derive(Debug, Clone, Default)]
pub struct ExtremePoints3D {
    width: i64,
    depth: i64,
    height: i64,
    values: Vec<Point3D>,
    scratch: Vec<Point3D>,
    placements: Vec<Cuboid>,
}

impl ExtremePoints3D {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set initialized to the given volume.
    pub fn with_bounds(dx: i64, dy: i64, dz: i64) -> Self {
        let mut points = Self::new();
        points.initialize(dx, dy, dz);
        points
    }

    /// Resets to a single point spanning the whole volume. A volume without
    /// extent on some axis has no points.
    pub fn initialize(&mut self, dx: i64, dy: i64, dz: i64) {
        self.width = dx.max(0);
        self.depth = dy.max(0);
        self.height = dz.max(0);
        self.values.clear();
        self.placements.clear();

        if self.width > 0 && self.depth > 0 && self.height > 0 {
            if let Ok(origin) = Point3D::new(0, 0, 0, self.width, self.depth, self.height) {
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

        if placed.x != point.min_x() || placed.y != point.min_y() || placed.z != point.min_z() {
            return Err(Error::InvalidPlacement(format!(
                "placement at {}x{}x{} does not start at point {}x{}x{}",
                placed.x,
                placed.y,
                placed.z,
                point.min_x(),
                point.min_y(),
                point.min_z()
            )));
        }
        if placed.dx <= 0
            || placed.dy <= 0
            || placed.dz <= 0
            || placed.dx > point.dx()
            || placed.dy > point.dy()
            || placed.dz > point.dz()
        {
            return Err(Error::InvalidPlacement(format!(
                "box {}x{}x{} does not fit point {}x{}x{}",
                placed.dx,
                placed.dy,
                placed.dz,
                point.dx(),
                point.dy(),
                point.dz()
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

    // Drops degenerate and covered points. Of two equivalent points the first
    // one is kept.
    fn prune(&mut self) {
        self.values
            .sort_by_key(|p| (p.min_z(), p.min_x(), p.min_y()));

        let mut i = 0;
        while i < self.values.len() {
            let point = &self.values[i];
            let redundant = point.is_degenerate()
                || self.values.iter().enumerate().any(|(j, other)| {
                    j != i && other.covers(point) && (j < i || !point.covers(other))
                });
            if redundant {
                self.values.remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Returns the point at `index`.
    pub fn value(&self, index: usize) -> Option<&Point3D> {
        self.values.get(index)
    }

    /// Returns all points, ordered by anchor z, then x, then y.
    pub fn values(&self) -> &[Point3D] {
        &self.values
    }

    /// Returns the placements committed since the last initialization.
    pub fn placements(&self) -> &[Cuboid] {
        &self.placements
    }

    /// Returns the free box of every point, shifted up by `z`.
    pub fn free_spaces(&self, z: i64) -> Vec<Cuboid> {
        self.values
            .iter()
            .map(|p| Cuboid::new(p.min_x(), p.min_y(), z + p.min_z(), p.dx(), p.dy(), p.dz()))
            .collect()
    }

    /// Returns the largest free footprint over all points.
    pub fn max_area(&self) -> i64 {
        self.values.iter().map(Point3D::area).max().unwrap_or(0)
    }

    /// Returns the largest free volume over all points.
    pub fn max_volume(&self) -> i64 {
        self.values.iter().map(Point3D::volume).max().unwrap_or(0)
    }

    /// Returns the bounds as (width, depth, height).
    pub fn bounds(&self) -> (i64, i64, i64) {
        (self.width, self.depth, self.height)
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
