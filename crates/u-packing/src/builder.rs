//! Strategy selection and packager assembly.

use std::sync::Arc;
use u_packing_core::{
    Container, Error, LargestAreaFitFirst, LevelPacker, PackListener, Packager, PackagerConfig,
    Result,
};

#[cfg(any(feature = "d2", feature = "d3"))]
use u_packing_core::PlacementComparator;

/// Level packing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// One floor per level; fast.
    Floor,
    /// Items stack inside a level on fully supporting items.
    Volumetric,
}

impl Default for Strategy {
    fn default() -> Self {
        if cfg!(feature = "d3") {
            Strategy::Volumetric
        } else {
            Strategy::Floor
        }
    }
}

/// Ranking usable by the floor packer.
#[cfg(feature = "d2")]
pub trait FloorComparator: PlacementComparator<u_packing_d2::Point2D> {}

#[cfg(feature = "d2")]
impl<T: PlacementComparator<u_packing_d2::Point2D>> FloorComparator for T {}

#[cfg(not(feature = "d2"))]
pub trait FloorComparator {}

#[cfg(not(feature = "d2"))]
impl<T> FloorComparator for T {}

/// Ranking usable by the volumetric packer.
#[cfg(feature = "d3")]
pub trait VolumeComparator: PlacementComparator<u_packing_d3::Point3D> {}

#[cfg(feature = "d3")]
impl<T: PlacementComparator<u_packing_d3::Point3D>> VolumeComparator for T {}

#[cfg(not(feature = "d3"))]
pub trait VolumeComparator {}

#[cfg(not(feature = "d3"))]
impl<T> VolumeComparator for T {}

/// Builds a [`Packager`] for a strategy.
///
/// Any comparator ranking both floor and volumetric points can be plugged
/// in; [`LargestAreaFitFirst`] is used by default.
pub struct PackagerBuilder<C = LargestAreaFitFirst> {
    strategy: Strategy,
    comparator: C,
    containers: Vec<Container>,
    config: PackagerConfig,
    listener: Option<Arc<dyn PackListener>>,
}

impl PackagerBuilder<LargestAreaFitFirst> {
    /// Creates a builder with the default comparator and configuration.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            comparator: LargestAreaFitFirst::default(),
            containers: Vec::new(),
            config: PackagerConfig::default(),
            listener: None,
        }
    }
}

impl<C> PackagerBuilder<C>
where
    C: FloorComparator + VolumeComparator + Send + Sync + 'static,
{
    /// Replaces the ranking strategy.
    pub fn with_comparator<D>(self, comparator: D) -> PackagerBuilder<D>
    where
        D: FloorComparator + VolumeComparator + Send + Sync + 'static,
    {
        PackagerBuilder {
            strategy: self.strategy,
            comparator,
            containers: self.containers,
            config: self.config,
            listener: self.listener,
        }
    }

    /// Appends a candidate container. Containers are tried in insertion order.
    pub fn with_container(mut self, container: Container) -> Self {
        self.containers.push(container);
        self
    }

    pub fn with_containers(mut self, containers: impl IntoIterator<Item = Container>) -> Self {
        self.containers.extend(containers);
        self
    }

    pub fn with_config(mut self, config: PackagerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_listener(mut self, listener: Arc<dyn PackListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Assembles the packager.
    ///
    /// Fails when no container was given or the strategy's crate feature is
    /// disabled.
    pub fn build(self) -> Result<Packager<Box<dyn LevelPacker>>> {
        if self.containers.is_empty() {
            return Err(Error::InvalidContainer("no containers given".into()));
        }
        let packer = level_packer(self.strategy, self.comparator, self.listener)?;
        Ok(Packager::new(packer, self.containers).with_config(self.config))
    }
}

fn level_packer<C>(
    strategy: Strategy,
    comparator: C,
    listener: Option<Arc<dyn PackListener>>,
) -> Result<Box<dyn LevelPacker>>
where
    C: FloorComparator + VolumeComparator + Send + Sync + 'static,
{
    match strategy {
        #[cfg(feature = "d2")]
        Strategy::Floor => {
            let mut packer = u_packing_d2::FastLaffPacker::new(comparator);
            if let Some(listener) = listener {
                packer = packer.with_listener(listener);
            }
            Ok(Box::new(packer))
        }
        #[cfg(feature = "d3")]
        Strategy::Volumetric => {
            let mut packer = u_packing_d3::LaffPacker::new(comparator);
            if let Some(listener) = listener {
                packer = packer.with_listener(listener);
            }
            Ok(Box::new(packer))
        }
        #[allow(unreachable_patterns)]
        other => {
            let _ = (comparator, listener);
            Err(Error::Internal(format!(
                "{:?} packing is not enabled in this build",
                other
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_container() {
        let result = PackagerBuilder::new(Strategy::Floor).build();
        assert!(matches!(result, Err(Error::InvalidContainer(_))));
    }

    #[test]
    fn test_build_keeps_container_order() {
        let packager = PackagerBuilder::new(Strategy::default())
            .with_container(Container::new("small", 1, 1, 1, 0, 10).unwrap())
            .with_containers(vec![Container::new("large", 5, 5, 5, 0, 10).unwrap()])
            .with_config(PackagerConfig::new().with_max_containers(2))
            .build()
            .unwrap();

        let names: Vec<_> = packager.containers().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["small", "large"]);
        assert_eq!(packager.config().max_containers, 2);
    }

    #[cfg(feature = "d3")]
    #[test]
    fn test_default_strategy() {
        assert_eq!(Strategy::default(), Strategy::Volumetric);
    }
}
