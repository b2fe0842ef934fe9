//! # U-Packing
//!
//! Largest-area-fit-first 3D bin packing engine.
//!
//! This crate provides:
//! - **Floor packing**: each level is a single floor of items no taller than its first item
//! - **Volumetric packing**: items may also stack on top of each other inside a level
//! - **Foldable containers**: bags that trade footprint for height as they fill
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use u_packing::{Container, PackagerBuilder, Stackable, StackableItem, Strategy};
//!
//! let packager = PackagerBuilder::new(Strategy::Volumetric)
//!     .with_container(Container::new("box", 10, 10, 10, 0, 100)?)
//!     .build()?;
//!
//! let items = vec![StackableItem::new(Stackable::rotatable("A", 2, 3, 4, 1)?, 5)];
//! let result = packager.pack(&items)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `d2` (default): floor-only packer
//! - `d3` (default): volumetric packer
//! - `serde`: Serialization support

pub mod builder;

/// Core types and contracts.
pub use u_packing_core as core;

/// Floor extreme points and the fast packer.
#[cfg(feature = "d2")]
pub use u_packing_d2 as d2;

/// Volumetric extreme points and the stacking packer.
#[cfg(feature = "d3")]
pub use u_packing_d3 as d3;

// Re-export commonly used types at root level
pub use builder::{FloorComparator, PackagerBuilder, Strategy, VolumeComparator};
pub use u_packing_core::{
    BagContainer, Container, Error, LargestAreaFitFirst, LevelPacker, PackListener, PackOutcome,
    PackResult, Packager, PackagerConfig, PackagingResult, PlacementComparator, Result,
    StackConstraint, Stackable, StackableItem,
};
