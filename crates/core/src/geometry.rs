//! Geometry primitives: dimensions, oriented boxes and packable items.

use crate::{Error, Result};
use nalgebra::Vector3;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned extent (width, depth, height), optionally named.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dimension {
    name: Option<String>,
    size: Vector3<i64>,
}

impl Dimension {
    /// Creates a new dimension. All components must be non-negative.
    pub fn new(dx: i64, dy: i64, dz: i64) -> Result<Self> {
        if dx < 0 || dy < 0 || dz < 0 {
            return Err(Error::InvalidDimension(format!(
                "{}x{}x{} has a negative component",
                dx, dy, dz
            )));
        }
        Ok(Self {
            name: None,
            size: Vector3::new(dx, dy, dz),
        })
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the width.
    pub fn dx(&self) -> i64 {
        self.size.x
    }

    /// Returns the depth.
    pub fn dy(&self) -> i64 {
        self.size.y
    }

    /// Returns the height.
    pub fn dz(&self) -> i64 {
        self.size.z
    }

    /// Returns the footprint area.
    pub fn area(&self) -> i64 {
        self.size.x * self.size.y
    }

    /// Returns the volume.
    pub fn volume(&self) -> i64 {
        self.size.x * self.size.y * self.size.z
    }

    fn sorted(&self) -> [i64; 3] {
        let mut sides = [self.size.x, self.size.y, self.size.z];
        sides.sort_unstable();
        sides
    }

    /// Returns the rotation with the largest face down: the two longest sides
    /// span the footprint and the shortest side becomes the height.
    pub fn largest_area_down(&self) -> Dimension {
        let [small, mid, large] = self.sorted();
        Self {
            name: self.name.clone(),
            size: Vector3::new(large, mid, small),
        }
    }

    /// Checks whether `other` fits inside this dimension in any axis-aligned rotation.
    pub fn can_hold_3d(&self, other: &Dimension) -> bool {
        let outer = self.sorted();
        let inner = other.sorted();
        outer.iter().zip(inner.iter()).all(|(o, i)| i <= o)
    }

    /// Checks whether `other` fits inside this dimension keeping its height axis.
    pub fn can_hold_2d(&self, other: &Dimension) -> bool {
        other.dz() <= self.dz()
            && ((other.dx() <= self.dx() && other.dy() <= self.dy())
                || (other.dy() <= self.dx() && other.dx() <= self.dy()))
    }

    /// Checks whether `other` fits inside this dimension without rotation.
    pub fn can_hold_fixed(&self, other: &Dimension) -> bool {
        other.dx() <= self.dx() && other.dy() <= self.dy() && other.dz() <= self.dz()
    }
}

/// An axis-aligned box at an integer position. Bounds are half-open: the box
/// covers `[x, x + dx)` on the x axis, and likewise for y and z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cuboid {
    pub x: i64,
    pub y: i64,
    pub z: i64,
    pub dx: i64,
    pub dy: i64,
    pub dz: i64,
}

impl Cuboid {
    /// Creates a new cuboid.
    pub fn new(x: i64, y: i64, z: i64, dx: i64, dy: i64, dz: i64) -> Self {
        Self {
            x,
            y,
            z,
            dx,
            dy,
            dz,
        }
    }

    /// Exclusive end on the x axis.
    pub fn end_x(&self) -> i64 {
        self.x + self.dx
    }

    /// Exclusive end on the y axis.
    pub fn end_y(&self) -> i64 {
        self.y + self.dy
    }

    /// Exclusive end on the z axis.
    pub fn end_z(&self) -> i64 {
        self.z + self.dz
    }

    /// Returns the volume.
    pub fn volume(&self) -> i64 {
        self.dx * self.dy * self.dz
    }

    /// Checks if the two boxes share interior volume.
    pub fn intersects(&self, other: &Cuboid) -> bool {
        self.x < other.end_x()
            && other.x < self.end_x()
            && self.y < other.end_y()
            && other.y < self.end_y()
            && self.z < other.end_z()
            && other.z < self.end_z()
    }

    /// Checks if the two footprints share interior area, ignoring z.
    pub fn intersects_2d(&self, other: &Cuboid) -> bool {
        self.x < other.end_x()
            && other.x < self.end_x()
            && self.y < other.end_y()
            && other.y < self.end_y()
    }

    /// Checks if `other` lies completely inside this box.
    pub fn contains(&self, other: &Cuboid) -> bool {
        self.x <= other.x
            && other.end_x() <= self.end_x()
            && self.y <= other.y
            && other.end_y() <= self.end_y()
            && self.z <= other.z
            && other.end_z() <= self.end_z()
    }

    /// Checks if the footprint `[x, x + dx) x [y, y + dy)` lies on this box's top face.
    pub fn covers_footprint(&self, x: i64, y: i64, dx: i64, dy: i64) -> bool {
        self.x <= x && x + dx <= self.end_x() && self.y <= y && y + dy <= self.end_y()
    }
}

/// Orientation constraint for placing an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrientationConstraint {
    /// Any orientation allowed (6 axis-aligned rotations for boxes).
    #[default]
    Any,
    /// Only upright orientations (2 rotations: original and 90° around Z).
    Upright,
    /// Fixed orientation (no rotation allowed).
    Fixed,
}

impl OrientationConstraint {
    /// Returns the axis permutations this constraint allows.
    /// Each orientation is (width_axis, depth_axis, height_axis).
    pub fn permutations(&self) -> &'static [(usize, usize, usize)] {
        match self {
            OrientationConstraint::Fixed => &[(0, 1, 2)],
            OrientationConstraint::Upright => &[(0, 1, 2), (1, 0, 2)],
            OrientationConstraint::Any => &[
                (0, 1, 2), // Original
                (1, 0, 2), // Rotated 90° around Z
                (0, 2, 1), // Rotated 90° around X
                (2, 0, 1), // Rotated 90° around Y
                (1, 2, 0), // Rotated 90° around X then Z
                (2, 1, 0), // Rotated 90° around Y then X
            ],
        }
    }
}

/// One admissible rotation of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StackValue {
    /// Index of this rotation within the owning item's rotations.
    pub rotation: usize,
    pub dx: i64,
    pub dy: i64,
    pub dz: i64,
    /// Maximum weight this rotation can carry on its top face.
    pub max_supported_weight: Option<i64>,
}

impl StackValue {
    /// Creates a new stack value.
    pub fn new(rotation: usize, dx: i64, dy: i64, dz: i64) -> Self {
        Self {
            rotation,
            dx,
            dy,
            dz,
            max_supported_weight: None,
        }
    }

    /// Returns the footprint area.
    pub fn area(&self) -> i64 {
        self.dx * self.dy
    }

    /// Returns the volume.
    pub fn volume(&self) -> i64 {
        self.dx * self.dy * self.dz
    }

    /// Returns true if some extent is zero, so nothing can be placed.
    pub fn is_degenerate(&self) -> bool {
        self.dx <= 0 || self.dy <= 0 || self.dz <= 0
    }

    /// Checks if the footprint fits inside `dx` x `dy` as oriented.
    pub fn fits_inside_2d(&self, dx: i64, dy: i64) -> bool {
        self.dx <= dx && self.dy <= dy
    }

    /// Checks if this rotation fits inside `dx` x `dy` x `dz` as oriented.
    pub fn fits_inside_3d(&self, dx: i64, dy: i64, dz: i64) -> bool {
        self.dx <= dx && self.dy <= dy && self.dz <= dz
    }
}

/// A packable item. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Stackable {
    name: String,
    dimension: Dimension,
    weight: i64,
    volume: i64,
    minimum_area: i64,
    maximum_area: i64,
    stack_values: Vec<StackValue>,
}

impl Stackable {
    /// Creates a new item with the given rotations allowed.
    pub fn new(
        name: impl Into<String>,
        dimension: Dimension,
        weight: i64,
        orientation: OrientationConstraint,
    ) -> Result<Self> {
        let name = name.into();
        if weight < 0 {
            return Err(Error::InvalidDimension(format!(
                "Weight for '{}' cannot be negative",
                name
            )));
        }

        let sides = [dimension.dx(), dimension.dy(), dimension.dz()];
        let mut stack_values: Vec<StackValue> = Vec::new();
        for &(x_axis, y_axis, z_axis) in orientation.permutations() {
            let (dx, dy, dz) = (sides[x_axis], sides[y_axis], sides[z_axis]);
            if stack_values
                .iter()
                .any(|v| v.dx == dx && v.dy == dy && v.dz == dz)
            {
                continue;
            }
            stack_values.push(StackValue::new(stack_values.len(), dx, dy, dz));
        }

        Self::with_stack_values(name, dimension, weight, stack_values)
    }

    /// Creates an item from an explicit list of rotations.
    pub fn with_stack_values(
        name: impl Into<String>,
        dimension: Dimension,
        weight: i64,
        stack_values: Vec<StackValue>,
    ) -> Result<Self> {
        let name = name.into();
        if stack_values.is_empty() {
            return Err(Error::InvalidDimension(format!(
                "'{}' needs at least one rotation",
                name
            )));
        }

        let minimum_area = stack_values.iter().map(StackValue::area).min().unwrap_or(0);
        let maximum_area = stack_values.iter().map(StackValue::area).max().unwrap_or(0);

        Ok(Self {
            volume: dimension.volume(),
            name,
            dimension,
            weight,
            minimum_area,
            maximum_area,
            stack_values,
        })
    }

    /// Shorthand for an item that may rotate freely.
    pub fn rotatable(name: impl Into<String>, dx: i64, dy: i64, dz: i64, weight: i64) -> Result<Self> {
        Self::new(name, Dimension::new(dx, dy, dz)?, weight, OrientationConstraint::Any)
    }

    /// Returns the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the nominal dimension.
    pub fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    /// Returns the weight.
    pub fn weight(&self) -> i64 {
        self.weight
    }

    /// Returns the volume.
    pub fn volume(&self) -> i64 {
        self.volume
    }

    /// Returns the smallest footprint over all rotations.
    pub fn minimum_area(&self) -> i64 {
        self.minimum_area
    }

    /// Returns the largest footprint over all rotations.
    pub fn maximum_area(&self) -> i64 {
        self.maximum_area
    }

    /// Returns the tallest extent over all rotations.
    pub fn maximum_height(&self) -> i64 {
        self.stack_values.iter().map(|v| v.dz).max().unwrap_or(0)
    }

    /// Returns the allowed rotations.
    pub fn stack_values(&self) -> &[StackValue] {
        &self.stack_values
    }

    /// Returns true if at least one rotation has a volume.
    pub fn is_placeable(&self) -> bool {
        self.stack_values.iter().any(|v| !v.is_degenerate())
    }
}

/// An item paired with a repeat count.
#[derive(Debug, Clone)]
pub struct StackableItem {
    pub stackable: Arc<Stackable>,
    pub count: usize,
}

impl StackableItem {
    /// Creates a new item with quantity.
    pub fn new(stackable: Stackable, count: usize) -> Self {
        Self {
            stackable: Arc::new(stackable),
            count,
        }
    }

    /// Expands a list of items into one shared handle per instance.
    pub fn expand(items: &[StackableItem]) -> Vec<Arc<Stackable>> {
        items
            .iter()
            .flat_map(|item| std::iter::repeat(item.stackable.clone()).take(item.count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_rejects_negative() {
        assert!(Dimension::new(1, -1, 1).is_err());
        assert!(Dimension::new(0, 0, 0).is_ok());
    }

    #[test]
    fn test_zero_extent_item_is_not_placeable() {
        let sheet = Stackable::rotatable("sheet", 2, 2, 0, 1).unwrap();
        assert!(!sheet.is_placeable());
        assert!(sheet.stack_values().iter().all(StackValue::is_degenerate));
        assert!(Stackable::rotatable("box", 2, 2, 1, 1).unwrap().is_placeable());
    }

    #[test]
    fn test_can_hold_3d_any_rotation() {
        let outer = Dimension::new(10, 5, 2).unwrap();
        assert!(outer.can_hold_3d(&Dimension::new(2, 10, 5).unwrap()));
        assert!(!outer.can_hold_3d(&Dimension::new(3, 10, 3).unwrap()));
        assert!(!outer.can_hold_fixed(&Dimension::new(2, 10, 5).unwrap()));
    }

    #[test]
    fn test_can_hold_2d_keeps_height() {
        let outer = Dimension::new(10, 5, 2).unwrap();
        assert!(outer.can_hold_2d(&Dimension::new(5, 10, 2).unwrap()));
        assert!(!outer.can_hold_2d(&Dimension::new(2, 2, 5).unwrap()));
    }

    #[test]
    fn test_orientations() {
        let dim = Dimension::new(10, 20, 30).unwrap();

        let any = Stackable::new("B1", dim.clone(), 1, OrientationConstraint::Any).unwrap();
        assert_eq!(any.stack_values().len(), 6);

        let upright = Stackable::new("B1", dim.clone(), 1, OrientationConstraint::Upright).unwrap();
        assert_eq!(upright.stack_values().len(), 2);
        assert!(upright.stack_values().iter().all(|v| v.dz == 30));

        let fixed = Stackable::new("B1", dim, 1, OrientationConstraint::Fixed).unwrap();
        assert_eq!(fixed.stack_values().len(), 1);
    }

    #[test]
    fn test_cube_rotations_collapse() {
        let cube = Stackable::rotatable("C", 1, 1, 1, 1).unwrap();
        assert_eq!(cube.stack_values().len(), 1);

        let square = Stackable::rotatable("S", 2, 2, 1, 1).unwrap();
        assert_eq!(square.stack_values().len(), 3);
        for (i, value) in square.stack_values().iter().enumerate() {
            assert_eq!(value.rotation, i);
        }
    }

    #[test]
    fn test_areas() {
        let item = Stackable::rotatable("B", 2, 3, 4, 1).unwrap();
        assert_eq!(item.volume(), 24);
        assert_eq!(item.minimum_area(), 6);
        assert_eq!(item.maximum_area(), 12);
        assert_eq!(item.maximum_height(), 4);
    }

    #[test]
    fn test_negative_weight_rejected() {
        assert!(Stackable::rotatable("B", 1, 1, 1, -1).is_err());
    }

    #[test]
    fn test_cuboid_intersection() {
        let a = Cuboid::new(0, 0, 0, 10, 10, 10);
        let touching = Cuboid::new(10, 0, 0, 5, 5, 5);
        let overlapping = Cuboid::new(5, 5, 5, 10, 10, 10);

        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
        assert!(a.contains(&Cuboid::new(1, 1, 1, 2, 2, 2)));
        assert!(a.covers_footprint(0, 0, 10, 10));
        assert!(!a.covers_footprint(1, 0, 10, 10));
    }

    #[test]
    fn test_expand_quantities() {
        let items = vec![
            StackableItem::new(Stackable::rotatable("A", 1, 1, 1, 1).unwrap(), 2),
            StackableItem::new(Stackable::rotatable("B", 1, 1, 1, 1).unwrap(), 3),
        ];
        let expanded = StackableItem::expand(&items);
        assert_eq!(expanded.len(), 5);
        assert_eq!(expanded.iter().filter(|s| s.name() == "A").count(), 2);
    }
}
