//! Container types.

use crate::bag::BagContainer;
use crate::constraint::StackConstraint;
use crate::geometry::Dimension;
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// One usable-load rotation of a container.
#[derive(Clone)]
pub struct ContainerStackValue {
    pub load_dx: i64,
    pub load_dy: i64,
    pub load_dz: i64,
    pub max_load_weight: i64,
    pub max_load_volume: i64,
    pub constraint: Option<Arc<dyn StackConstraint>>,
}

impl ContainerStackValue {
    /// Creates a new load rotation. The maximum load volume is the load box volume.
    pub fn new(load_dx: i64, load_dy: i64, load_dz: i64, max_load_weight: i64) -> Self {
        Self {
            load_dx,
            load_dy,
            load_dz,
            max_load_weight,
            max_load_volume: load_dx * load_dy * load_dz,
            constraint: None,
        }
    }

    /// Sets the stack constraint.
    pub fn with_constraint(mut self, constraint: Arc<dyn StackConstraint>) -> Self {
        self.constraint = Some(constraint);
        self
    }

    /// Returns the load box as a dimension.
    pub fn load_dimension(&self) -> Result<Dimension> {
        Dimension::new(self.load_dx, self.load_dy, self.load_dz)
    }

    pub(crate) fn set_load(&mut self, load_dx: i64, load_dy: i64, load_dz: i64) {
        self.load_dx = load_dx;
        self.load_dy = load_dy;
        self.load_dz = load_dz;
        self.max_load_volume = load_dx * load_dy * load_dz;
    }
}

impl fmt::Debug for ContainerStackValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerStackValue")
            .field("load_dx", &self.load_dx)
            .field("load_dy", &self.load_dy)
            .field("load_dz", &self.load_dz)
            .field("max_load_weight", &self.max_load_weight)
            .field("max_load_volume", &self.max_load_volume)
            .field("constraint", &self.constraint.is_some())
            .finish()
    }
}

/// A container items are packed into.
#[derive(Debug, Clone)]
pub struct Container {
    name: String,
    empty_weight: i64,
    max_load_weight: i64,
    stack_values: Vec<ContainerStackValue>,
    bag: Option<BagContainer>,
}

impl Container {
    /// Creates a container with a single load rotation.
    pub fn new(
        name: impl Into<String>,
        load_dx: i64,
        load_dy: i64,
        load_dz: i64,
        empty_weight: i64,
        max_load_weight: i64,
    ) -> Result<Self> {
        let container = Self {
            name: name.into(),
            empty_weight,
            max_load_weight,
            stack_values: vec![ContainerStackValue::new(
                load_dx,
                load_dy,
                load_dz,
                max_load_weight,
            )],
            bag: None,
        };
        container.validate()?;
        Ok(container)
    }

    /// Creates a foldable container from a bag.
    pub fn from_bag(
        name: impl Into<String>,
        bag: BagContainer,
        empty_weight: i64,
        max_load_weight: i64,
    ) -> Self {
        let value =
            ContainerStackValue::new(bag.width(), bag.depth(), bag.height(), max_load_weight);
        Self {
            name: name.into(),
            empty_weight,
            max_load_weight,
            stack_values: vec![value],
            bag: Some(bag),
        }
    }

    /// Adds another load rotation.
    pub fn with_stack_value(mut self, value: ContainerStackValue) -> Self {
        self.stack_values.push(value);
        self
    }

    /// Attaches a constraint to the first load rotation.
    pub fn with_constraint(mut self, constraint: Arc<dyn StackConstraint>) -> Self {
        if let Some(first) = self.stack_values.first_mut() {
            first.constraint = Some(constraint);
        }
        self
    }

    pub(crate) fn with_parts(
        &self,
        stack_values: Vec<ContainerStackValue>,
        bag: Option<BagContainer>,
    ) -> Self {
        Self {
            name: self.name.clone(),
            empty_weight: self.empty_weight,
            max_load_weight: self.max_load_weight,
            stack_values,
            bag,
        }
    }

    /// Returns the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the weight of the empty container.
    pub fn empty_weight(&self) -> i64 {
        self.empty_weight
    }

    /// Returns the maximum load weight.
    pub fn max_load_weight(&self) -> i64 {
        self.max_load_weight
    }

    /// Returns the load rotations.
    pub fn stack_values(&self) -> &[ContainerStackValue] {
        &self.stack_values
    }

    /// Returns the first load rotation, which is the one packers use.
    pub fn first_stack_value(&self) -> Result<&ContainerStackValue> {
        self.stack_values.first().ok_or_else(|| {
            Error::InvalidContainer(format!("'{}' has no load rotation", self.name))
        })
    }

    /// Returns the bag model, for foldable containers.
    pub fn bag(&self) -> Option<&BagContainer> {
        self.bag.as_ref()
    }

    /// Returns the largest load volume over all rotations.
    pub fn max_load_volume(&self) -> i64 {
        self.stack_values
            .iter()
            .map(|v| v.max_load_volume)
            .max()
            .unwrap_or(0)
    }

    /// Checks whether a single item of the given dimension could go in.
    pub fn can_hold(&self, dimension: &Dimension) -> bool {
        let plain = self.stack_values.iter().any(|v| {
            v.load_dimension()
                .map(|load| load.can_hold_3d(dimension))
                .unwrap_or(false)
        });
        plain
            || self
                .bag
                .as_ref()
                .map_or(false, |bag| bag.can_hold_with_folding(dimension))
    }

    /// Validates the container definition.
    pub fn validate(&self) -> Result<()> {
        if self.stack_values.is_empty() {
            return Err(Error::InvalidContainer(format!(
                "'{}' has no load rotation",
                self.name
            )));
        }

        for value in &self.stack_values {
            if value.load_dx < 0 || value.load_dy < 0 || value.load_dz < 0 {
                return Err(Error::InvalidContainer(format!(
                    "'{}' has a negative load dimension",
                    self.name
                )));
            }
        }

        if self.max_load_weight < 0 || self.empty_weight < 0 {
            return Err(Error::InvalidContainer(format!(
                "Weights for '{}' cannot be negative",
                self.name
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_volume() {
        let container = Container::new("C", 10, 8, 5, 1, 100).unwrap();
        assert_eq!(container.max_load_volume(), 400);
        assert_eq!(container.first_stack_value().unwrap().max_load_weight, 100);
    }

    #[test]
    fn test_can_hold_any_rotation() {
        let container = Container::new("C", 10, 8, 5, 1, 100).unwrap();
        assert!(container.can_hold(&Dimension::new(5, 10, 8).unwrap()));
        assert!(!container.can_hold(&Dimension::new(11, 1, 1).unwrap()));
    }

    #[test]
    fn test_bag_container_can_hold_with_folding() {
        let bag = BagContainer::new(Dimension::new(10, 10, 10).unwrap());
        let container = Container::from_bag("bag", bag, 0, 100);
        assert!(container.can_hold(&Dimension::new(11, 10, 3).unwrap()));
        assert!(!container.can_hold(&Dimension::new(12, 10, 9).unwrap()));
    }

    #[test]
    fn test_validation() {
        assert!(Container::new("C", 1, 1, 1, 0, 1).is_ok());
        assert!(matches!(
            Container::new("C", -1, 1, 1, 0, 1),
            Err(Error::InvalidContainer(_))
        ));
        assert!(Container::new("C", 1, 1, 1, 0, -1).is_err());

        let container = Container::new("C", 1, 1, 1, 0, 1)
            .unwrap()
            .with_stack_value(ContainerStackValue::new(1, -1, 1, 1));
        assert!(container.validate().is_err());
    }
}
