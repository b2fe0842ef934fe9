//! Packing results and the single-container packer contract.

use crate::container::Container;
use crate::geometry::Stackable;
use crate::placement::PlacementStats;
use crate::stack::Stack;
use crate::Result;
use std::sync::Arc;

/// Result of packing one container.
#[derive(Debug, Clone)]
pub struct PackResult {
    /// Items that were not placed.
    pub leftovers: Vec<Arc<Stackable>>,

    /// Levels of committed placements.
    pub stack: Stack,

    /// The container in its final shape.
    pub container: Container,
}

impl PackResult {
    /// Creates a new result.
    pub fn new(stack: Stack, container: Container, leftovers: Vec<Arc<Stackable>>) -> Self {
        Self {
            leftovers,
            stack,
            container,
        }
    }

    /// Returns true if every item was placed.
    pub fn is_complete(&self) -> bool {
        self.leftovers.is_empty()
    }

    /// Returns the number of placed items.
    pub fn placed_count(&self) -> usize {
        self.stack.len()
    }

    /// Returns the placed volume.
    pub fn placed_volume(&self) -> i64 {
        self.stack.volume()
    }

    /// Returns placed volume over container load volume (0.0 - 1.0).
    pub fn utilization(&self) -> f64 {
        let capacity = self.container.max_load_volume();
        if capacity <= 0 {
            return 0.0;
        }
        self.stack.volume() as f64 / capacity as f64
    }

    /// Returns placement statistics.
    pub fn stats(&self) -> PlacementStats {
        PlacementStats::from_placements(self.stack.placements())
    }
}

/// Outcome of a single-container attempt.
#[derive(Debug, Clone)]
pub enum PackOutcome {
    /// Packing ran to completion; the result may still have leftovers.
    Packed(PackResult),
    /// The interrupt fired. No partial work is exposed.
    Interrupted,
}

impl PackOutcome {
    /// Returns the result, if packing completed.
    pub fn into_result(self) -> Option<PackResult> {
        match self {
            PackOutcome::Packed(result) => Some(result),
            PackOutcome::Interrupted => None,
        }
    }

    /// Returns true if the interrupt fired.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, PackOutcome::Interrupted)
    }
}

/// Result of spreading items over several containers.
#[derive(Debug, Clone, Default)]
pub struct PackagingResult {
    /// One result per used container, in fill order.
    pub containers: Vec<PackResult>,

    /// Items no container took.
    pub leftovers: Vec<Arc<Stackable>>,
}

impl PackagingResult {
    /// Returns true if every item was placed.
    pub fn is_complete(&self) -> bool {
        self.leftovers.is_empty()
    }

    /// Returns the number of used containers.
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Returns the number of placed items over all containers.
    pub fn placed_count(&self) -> usize {
        self.containers.iter().map(PackResult::placed_count).sum()
    }
}

/// Packs items into one container.
pub trait LevelPacker: Send + Sync {
    /// Packs as many of `items` as possible into `container`.
    ///
    /// `interrupt` is polled once per level; when it returns true the call
    /// returns [`PackOutcome::Interrupted`].
    fn pack(
        &self,
        items: &[Arc<Stackable>],
        container: &Container,
        interrupt: &(dyn Fn() -> bool + Sync),
    ) -> Result<PackOutcome>;
}

impl<T: LevelPacker + ?Sized> LevelPacker for &T {
    fn pack(
        &self,
        items: &[Arc<Stackable>],
        container: &Container,
        interrupt: &(dyn Fn() -> bool + Sync),
    ) -> Result<PackOutcome> {
        (**self).pack(items, container, interrupt)
    }
}

impl<T: LevelPacker + ?Sized> LevelPacker for Box<T> {
    fn pack(
        &self,
        items: &[Arc<Stackable>],
        container: &Container,
        interrupt: &(dyn Fn() -> bool + Sync),
    ) -> Result<PackOutcome> {
        (**self).pack(items, container, interrupt)
    }
}
