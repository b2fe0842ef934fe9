//! Foldable containers.
//!
//! A bag has a nominal shape, but footprint can be traded for height and
//! back. Folding is linear: growing the height by `n` shrinks width and depth
//! by `n`, and lowering the height by `n` widens the bag by `n`.
//!
//! Shapes are always normalized with the largest area down, so width >= depth
//! >= height for the nominal shape.

use crate::geometry::Dimension;
use crate::{Error, Result};

/// The mutable part of a bag: its current width, depth and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldState {
    pub width: i64,
    pub depth: i64,
    pub height: i64,
}

impl FoldState {
    /// Creates a new fold state.
    pub fn new(width: i64, depth: i64, height: i64) -> Self {
        Self {
            width,
            depth,
            height,
        }
    }

    /// Returns the volume of this shape.
    pub fn volume(&self) -> i64 {
        self.width * self.depth * self.height
    }

    /// Returns this shape folded to the given height, starting from the
    /// current shape rather than the nominal one.
    pub fn fold_to_height(self, height: i64) -> Self {
        if height > self.height {
            let fold_length = height - self.height;
            Self {
                width: self.width - fold_length,
                depth: self.depth - fold_length,
                height,
            }
        } else if height < self.height {
            // downfolding widens the bag, depth stays
            let fold_down_length = self.height - height;
            Self {
                width: self.width + fold_down_length,
                depth: self.depth,
                height,
            }
        } else {
            self
        }
    }

    /// Returns the height this shape would have if folded to the base area
    /// `width` x `depth`.
    pub fn folded_height_for_base_area(&self, width: i64, depth: i64) -> i64 {
        if width < self.width && depth < self.depth {
            let fold_length = (self.width - width).min(self.depth - depth);
            self.height + fold_length
        } else if width > self.width || depth > self.depth {
            // negative
            let fold_down_length = (self.width - width).min(self.depth - depth);
            self.height + fold_down_length
        } else {
            self.height
        }
    }

    /// Checks whether `dimension` fits inside this shape in any rotation.
    pub fn can_hold_3d(&self, dimension: &Dimension) -> bool {
        if self.width < 0 || self.depth < 0 || self.height < 0 {
            return false;
        }
        let mut outer = [self.width, self.depth, self.height];
        outer.sort_unstable();
        let mut inner = [dimension.dx(), dimension.dy(), dimension.dz()];
        inner.sort_unstable();
        outer.iter().zip(inner.iter()).all(|(o, i)| i <= o)
    }
}

/// A container whose effective shape changes as its first level is filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BagContainer {
    original: Dimension,
    state: FoldState,
    volume: i64,
}

impl BagContainer {
    /// Creates a bag with the given nominal shape.
    pub fn new(original: Dimension) -> Self {
        let down = Self::rotate_largest_area_down(&original);
        let state = FoldState::new(down.dx(), down.dy(), down.dz());
        Self {
            original,
            volume: state.volume(),
            state,
        }
    }

    /// Returns the permutation of `dimension` that puts its largest face down.
    pub fn rotate_largest_area_down(dimension: &Dimension) -> Dimension {
        dimension.largest_area_down()
    }

    /// Returns the nominal shape the bag was created with.
    pub fn original(&self) -> &Dimension {
        &self.original
    }

    /// Returns the current shape.
    pub fn state(&self) -> FoldState {
        self.state
    }

    /// Returns the current width.
    pub fn width(&self) -> i64 {
        self.state.width
    }

    /// Returns the current depth.
    pub fn depth(&self) -> i64 {
        self.state.depth
    }

    /// Returns the current height.
    pub fn height(&self) -> i64 {
        self.state.height
    }

    /// Returns the volume of the current shape.
    pub fn volume(&self) -> i64 {
        self.volume
    }

    /// Returns the current shape as a dimension.
    pub fn dimension(&self) -> Result<Dimension> {
        Dimension::new(self.state.width, self.state.depth, self.state.height)
    }

    fn set_state(&mut self, state: FoldState) {
        self.state = state;
        self.volume = state.volume();
    }

    /// Refolds the bag from its nominal shape so that it matches the footprint
    /// `used_x` x `used_y` consumed by its first level.
    ///
    /// Within the nominal footprint the bag gains height. Beyond it, the bag
    /// gains width at the expense of height and keeps its nominal depth.
    pub fn fold_to_base_area(&mut self, used_x: i64, used_y: i64) -> Result<()> {
        if used_x < 0 || used_y < 0 {
            return Err(Error::InvalidFold(format!(
                "used base area {}x{} is negative",
                used_x, used_y
            )));
        }

        let nominal = Self::rotate_largest_area_down(&self.original);
        let (width, depth, height) = (nominal.dx(), nominal.dy(), nominal.dz());

        let state = if used_x <= width && used_y <= depth {
            let fold_length = (width - used_x).min(depth - used_y);
            if fold_length < 0 {
                return Err(Error::InvalidFold(format!(
                    "got fold length {} for base area {}x{}",
                    fold_length, used_x, used_y
                )));
            }
            FoldState::new(
                width - fold_length,
                depth - fold_length,
                height + fold_length,
            )
        } else {
            // fold_down_length <= 0
            let fold_down_length = (width - used_x).min(depth - used_y);
            FoldState::new(width - fold_down_length, depth, height + fold_down_length)
        };

        self.set_state(state);
        Ok(())
    }

    /// Folds the current shape to the given height.
    pub fn fold_to_height(&mut self, height: i64) {
        let state = self.state.fold_to_height(height);
        self.set_state(state);
    }

    /// Returns the height the bag would have if folded to the base area
    /// `width` x `depth`, without changing the bag.
    pub fn folded_height_for_base_area(&self, width: i64, depth: i64) -> i64 {
        self.state.folded_height_for_base_area(width, depth)
    }

    /// Checks whether `dimension` fits into this bag when the bag may fold.
    ///
    /// A footprint exactly matching the current width and depth is reported as
    /// not fitting.
    pub fn can_hold_with_folding(&self, dimension: &Dimension) -> bool {
        let down = Self::rotate_largest_area_down(dimension);

        if down.dx() < self.state.width && down.dy() < self.state.depth {
            let folded = FoldState::new(
                down.dx(),
                down.dy(),
                self.folded_height_for_base_area(down.dx(), down.dy()),
            );
            folded.can_hold_3d(dimension)
        } else if down.dx() > self.state.width || down.dy() > self.state.depth {
            self.state.fold_to_height(down.dz()).can_hold_3d(dimension)
        } else {
            false
        }
    }
}
