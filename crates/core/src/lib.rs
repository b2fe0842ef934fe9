//! # U-Packing Core
//!
//! Core types and contracts for the U-Packing 3D bin packing engine.
//!
//! This crate provides the types shared between the floor-only (2D) and the
//! volumetric (3D) level packers.
//!
//! ## Core Components
//!
//! - **Geometry**: `Dimension`, `Cuboid`, `StackValue`, `Stackable`
//! - **Containers**: `Container`, `ContainerStackValue` and the foldable `BagContainer`
//! - **Stacks**: `Level`, `Stack` and the per-run `LevelStack`
//! - **Contracts**: `StackConstraint`, `PlacementComparator`, `PackListener`, `LevelPacker`
//! - **Planning**: `Packager` for single- and multi-container packing
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod bag;
pub mod comparator;
pub mod config;
pub mod constraint;
pub mod container;
pub mod error;
pub mod geometry;
pub mod listener;
pub mod packager;
pub mod placement;
pub mod result;
pub mod stack;

// Re-exports
pub use bag::{BagContainer, FoldState};
pub use comparator::{ExtremePoint, LargestAreaFitFirst, PlacementComparator};
pub use config::{Deadline, PackagerConfig};
pub use constraint::StackConstraint;
pub use container::{Container, ContainerStackValue};
pub use error::{Error, Result};
pub use geometry::{Cuboid, Dimension, OrientationConstraint, StackValue, Stackable, StackableItem};
pub use listener::{NoopListener, PackEvent, PackListener, RecordingListener};
pub use packager::Packager;
pub use placement::{PlacementStats, StackPlacement};
pub use result::{LevelPacker, PackOutcome, PackResult, PackagingResult};
pub use stack::{Level, LevelStack, Stack};
