//! # U-Packing 2D
//!
//! Floor-level extreme points and the fast largest-area-fit-first packer of
//! the U-Packing engine.
//!
//! Each level is packed as a single floor: the first item fixes the level
//! height, and the remaining floor is filled with items that are not taller.

pub mod extreme_points;
pub mod laff;
pub mod point;

// Re-exports
pub use extreme_points::ExtremePoints2D;
pub use laff::FastLaffPacker;
pub use point::{Point2D, Span};
pub use u_packing_core::{Container, Error, LevelPacker, PackOutcome, PackResult, Result};
