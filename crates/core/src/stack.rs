//! Levels and stacks of committed placements.

use crate::bag::BagContainer;
use crate::constraint::StackConstraint;
use crate::container::{Container, ContainerStackValue};
use crate::placement::StackPlacement;
use crate::Result;
use std::sync::Arc;

/// A horizontal layer of placements sharing one z-origin and one height.
#[derive(Debug, Clone, Default)]
pub struct Level {
    z: i64,
    height: i64,
    placements: Vec<StackPlacement>,
}

impl Level {
    /// Creates an empty level.
    pub fn new(z: i64, height: i64) -> Self {
        Self {
            z,
            height,
            placements: Vec::new(),
        }
    }

    /// Returns the z-origin.
    pub fn z(&self) -> i64 {
        self.z
    }

    /// Returns the level height.
    pub fn height(&self) -> i64 {
        self.height
    }

    /// Returns the placements in insertion order.
    pub fn placements(&self) -> &[StackPlacement] {
        &self.placements
    }

    /// Appends a placement.
    pub fn add(&mut self, placement: StackPlacement) {
        self.placements.push(placement);
    }

    /// Returns the summed weight of the items in this level.
    pub fn weight(&self) -> i64 {
        self.placements.iter().map(|p| p.stackable().weight()).sum()
    }

    /// Returns the footprint used by this level as (max end x, max end y).
    pub fn used_footprint(&self) -> (i64, i64) {
        self.placements.iter().fold((0, 0), |(x, y), p| {
            (x.max(p.end_x()), y.max(p.end_y()))
        })
    }

    /// Returns the number of placements.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Returns true if nothing was placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// The ordered levels of one container.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    levels: Vec<Level>,
}

impl Stack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the levels, bottom first.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Opens a new level on top of the existing ones and returns it.
    pub fn add_level(&mut self, height: i64) -> &mut Level {
        let z = self.height();
        self.levels.push(Level::new(z, height));
        let last = self.levels.len() - 1;
        &mut self.levels[last]
    }

    /// Returns all placements, level by level in insertion order.
    pub fn placements(&self) -> impl Iterator<Item = &StackPlacement> + '_ {
        self.levels.iter().flat_map(|l| l.placements().iter())
    }

    /// Returns the number of placements.
    pub fn len(&self) -> usize {
        self.levels.iter().map(Level::len).sum()
    }

    /// Returns true if nothing was placed.
    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(Level::is_empty)
    }

    /// Returns the summed weight of all placed items.
    pub fn weight(&self) -> i64 {
        self.levels.iter().map(Level::weight).sum()
    }

    /// Returns the summed volume of all placed items.
    pub fn volume(&self) -> i64 {
        self.placements().map(|p| p.stack_value().volume()).sum()
    }

    /// Returns the height of the stack, that is the top of the last level.
    pub fn height(&self) -> i64 {
        self.levels.last().map_or(0, |l| l.z() + l.height())
    }

    /// Returns the footprint used over all levels as (max end x, max end y).
    pub fn used_footprint(&self) -> (i64, i64) {
        self.levels.iter().fold((0, 0), |(x, y), l| {
            let (lx, ly) = l.used_footprint();
            (x.max(lx), y.max(ly))
        })
    }
}

/// Working state of one container while it is being packed: its active load
/// rotation, the stack built so far and, for foldable containers, the bag.
#[derive(Debug, Clone)]
pub struct LevelStack {
    container: Container,
    value: ContainerStackValue,
    bag: Option<BagContainer>,
    stack: Stack,
}

impl LevelStack {
    /// Starts an empty stack for the container's first load rotation.
    pub fn new(container: &Container) -> Result<Self> {
        let value = container.first_stack_value()?.clone();
        Ok(Self {
            bag: container.bag().cloned(),
            container: container.clone(),
            value,
            stack: Stack::new(),
        })
    }

    /// Returns the stack built so far.
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Returns the active load rotation.
    pub fn value(&self) -> &ContainerStackValue {
        &self.value
    }

    /// Returns the constraint of the active load rotation.
    pub fn constraint(&self) -> Option<&Arc<dyn StackConstraint>> {
        self.value.constraint.as_ref()
    }

    /// Returns the container being packed.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Returns the weight still available.
    pub fn free_weight(&self) -> i64 {
        let limit = self.value.max_load_weight.min(self.container.max_load_weight());
        limit - self.stack.weight()
    }

    /// Returns the height still available above the last level.
    pub fn free_dz(&mut self) -> Result<i64> {
        self.fold_bag()?;
        Ok(self.value.load_dz - self.stack.height())
    }

    /// Returns the footprint available to the next level.
    pub fn free_footprint(&mut self) -> Result<(i64, i64)> {
        self.fold_bag()?;
        Ok((self.value.load_dx, self.value.load_dy))
    }

    /// Opens a new level and returns its index.
    pub fn open_level(&mut self, height: i64) -> usize {
        self.stack.add_level(height);
        self.stack.levels.len() - 1
    }

    /// Adds a placement to the topmost level.
    pub fn add(&mut self, placement: StackPlacement) {
        if let Some(level) = self.stack.levels.last_mut() {
            level.add(placement);
        }
    }

    /// Removes the topmost level if it holds no placements.
    pub fn discard_empty_level(&mut self) {
        if self.stack.levels.last().map_or(false, Level::is_empty) {
            self.stack.levels.pop();
        }
    }

    // Once the first level is known, the bag refolds around its footprint.
    fn fold_bag(&mut self) -> Result<()> {
        if let Some(bag) = self.bag.as_mut() {
            if let [first] = self.stack.levels() {
                let (used_x, used_y) = first.used_footprint();
                bag.fold_to_base_area(used_x, used_y)?;
                self.value.set_load(bag.width(), bag.depth(), bag.height());
            }
        }
        Ok(())
    }

    /// Splits into the built stack and a snapshot of the container reflecting
    /// its final shape.
    pub fn finish(self) -> (Stack, Container) {
        let mut values = self.container.stack_values().to_vec();
        if let Some(first) = values.first_mut() {
            *first = self.value;
        }
        let snapshot = self.container.with_parts(values, self.bag);
        (self.stack, snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Dimension, Stackable};

    fn placement(dx: i64, dy: i64, dz: i64, x: i64, y: i64, z: i64) -> StackPlacement {
        let item = Arc::new(
            Stackable::new(
                "A",
                Dimension::new(dx, dy, dz).unwrap(),
                2,
                crate::geometry::OrientationConstraint::Fixed,
            )
            .unwrap(),
        );
        let value = item.stack_values()[0];
        StackPlacement::new(item, value, x, y, z)
    }

    #[test]
    fn test_stack_levels() {
        let mut stack = Stack::new();
        stack.add_level(3).add(placement(2, 2, 3, 0, 0, 0));
        let level = stack.add_level(2);
        assert_eq!(level.z(), 3);
        level.add(placement(4, 1, 2, 0, 0, 3));

        assert_eq!(stack.height(), 5);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.weight(), 4);
        assert_eq!(stack.volume(), 12 + 8);
        assert_eq!(stack.used_footprint(), (4, 2));
    }

    #[test]
    fn test_level_stack_budget() {
        let container = Container::new("C", 10, 10, 10, 0, 5).unwrap();
        let mut levels = LevelStack::new(&container).unwrap();
        assert_eq!(levels.free_weight(), 5);

        levels.open_level(4);
        levels.add(placement(2, 2, 4, 0, 0, 0));
        assert_eq!(levels.free_weight(), 3);
        assert_eq!(levels.free_dz().unwrap(), 6);
        assert_eq!(levels.free_footprint().unwrap(), (10, 10));
    }

    #[test]
    fn test_bag_folds_after_first_level() {
        let bag = BagContainer::new(Dimension::new(10, 10, 10).unwrap());
        let container = Container::from_bag("bag", bag, 0, 100);
        let mut levels = LevelStack::new(&container).unwrap();

        levels.open_level(2);
        levels.add(placement(8, 9, 2, 0, 0, 0));

        // 10x10x10 folded to 9x9x11, two already used
        assert_eq!(levels.free_footprint().unwrap(), (9, 9));
        assert_eq!(levels.free_dz().unwrap(), 9);

        levels.open_level(1);
        levels.add(placement(1, 1, 1, 0, 0, 2));
        // no refold once a second level exists
        assert_eq!(levels.free_dz().unwrap(), 8);

        let (stack, snapshot) = levels.finish();
        assert_eq!(stack.levels().len(), 2);
        let bag = snapshot.bag().unwrap();
        assert_eq!((bag.width(), bag.depth(), bag.height()), (9, 9, 11));
        assert_eq!(snapshot.first_stack_value().unwrap().load_dz, 11);
    }

    #[test]
    fn test_discard_empty_level() {
        let container = Container::new("C", 10, 10, 10, 0, 5).unwrap();
        let mut levels = LevelStack::new(&container).unwrap();
        levels.open_level(4);
        levels.discard_empty_level();
        assert!(levels.stack().levels().is_empty());
    }
}
