//! Committed placements of items inside a container.

use crate::geometry::{Cuboid, StackValue, Stackable};
use std::collections::HashMap;
use std::sync::Arc;

/// A committed decision: an item, its chosen rotation, and the absolute
/// position of its lower corner.
#[derive(Debug, Clone)]
pub struct StackPlacement {
    stackable: Arc<Stackable>,
    value: StackValue,
    x: i64,
    y: i64,
    z: i64,
}

impl StackPlacement {
    /// Creates a new placement.
    pub fn new(stackable: Arc<Stackable>, value: StackValue, x: i64, y: i64, z: i64) -> Self {
        Self {
            stackable,
            value,
            x,
            y,
            z,
        }
    }

    /// Returns the placed item.
    pub fn stackable(&self) -> &Arc<Stackable> {
        &self.stackable
    }

    /// Returns the chosen rotation.
    pub fn stack_value(&self) -> &StackValue {
        &self.value
    }

    /// Returns the x coordinate.
    pub fn x(&self) -> i64 {
        self.x
    }

    /// Returns the y coordinate.
    pub fn y(&self) -> i64 {
        self.y
    }

    /// Returns the z coordinate.
    pub fn z(&self) -> i64 {
        self.z
    }

    /// Exclusive end on the x axis.
    pub fn end_x(&self) -> i64 {
        self.x + self.value.dx
    }

    /// Exclusive end on the y axis.
    pub fn end_y(&self) -> i64 {
        self.y + self.value.dy
    }

    /// Exclusive end on the z axis.
    pub fn end_z(&self) -> i64 {
        self.z + self.value.dz
    }

    /// Returns the occupied box.
    pub fn cuboid(&self) -> Cuboid {
        Cuboid::new(
            self.x,
            self.y,
            self.z,
            self.value.dx,
            self.value.dy,
            self.value.dz,
        )
    }

    /// Checks if this placement overlaps with another placement.
    pub fn intersects(&self, other: &StackPlacement) -> bool {
        self.cuboid().intersects(&other.cuboid())
    }
}

/// Placement statistics for a set of placements.
#[derive(Debug, Clone, Default)]
pub struct PlacementStats {
    /// Total number of placements.
    pub count: usize,
    /// Total weight placed.
    pub weight: i64,
    /// Total volume placed.
    pub volume: i64,
    /// Distribution of rotation indices used.
    pub rotation_distribution: HashMap<usize, usize>,
}

impl PlacementStats {
    /// Computes statistics from a set of placements.
    pub fn from_placements<'a>(placements: impl IntoIterator<Item = &'a StackPlacement>) -> Self {
        let mut stats = Self::default();

        for p in placements {
            stats.count += 1;
            stats.weight += p.stackable().weight();
            stats.volume += p.stack_value().volume();
            *stats
                .rotation_distribution
                .entry(p.stack_value().rotation)
                .or_insert(0) += 1;
        }

        stats
    }
}
