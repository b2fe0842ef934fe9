//! # U-Packing 3D
//!
//! Volumetric extreme points and the largest-area-fit-first packer of the
//! U-Packing engine.
//!
//! Levels are tracked as volumes, so items can be stacked on top of each
//! other inside a level whenever their footprint is fully supported.

pub mod extreme_points;
pub mod laff;
pub mod point;

// Re-exports
pub use extreme_points::ExtremePoints3D;
pub use laff::LaffPacker;
pub use point::Point3D;
pub use u_packing_core::{Container, Error, LevelPacker, PackOutcome, PackResult, Result};
