//! Floor extreme points.

use u_packing_core::comparator::ExtremePoint;
use u_packing_core::geometry::{Cuboid, StackValue};
use u_packing_core::{Error, Result};

/// A half-open interval `[start, end)` on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: i64,
    pub end: i64,
}

impl Span {
    /// Creates a new span.
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Checks whether `v` lies in the span.
    pub fn contains(&self, v: i64) -> bool {
        self.start <= v && v < self.end
    }

    /// Returns the length.
    pub fn len(&self) -> i64 {
        self.end - self.start
    }

    /// Returns true if the span has no length.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Returns the part of the span inside `[min, max)`, if any.
    pub fn clip(self, min: i64, max: i64) -> Option<Span> {
        let span = Span::new(self.start.max(min), self.end.min(max));
        (!span.is_empty()).then_some(span)
    }
}

/// A free rectangle anchored at its lower-left corner.
///
/// The anchor `(min_x, min_y)` is fixed; the upper bounds only shrink.
/// `y_support` records which part of the left edge `x = min_x` is backed by
/// a wall or a placed item, `x_support` the same for the bottom edge
/// `y = min_y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point2D {
    min_x: i64,
    min_y: i64,
    max_x: i64,
    max_y: i64,
    y_support: Option<Span>,
    x_support: Option<Span>,
}

impl Point2D {
    /// Creates a new point without support.
    pub fn new(min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> Result<Self> {
        if min_x < 0 || min_y < 0 {
            return Err(Error::InvalidPoint(format!(
                "anchor {}x{} is negative",
                min_x, min_y
            )));
        }
        if max_x < min_x || max_y < min_y {
            return Err(Error::InvalidPoint(format!(
                "bounds {}x{} below anchor {}x{}",
                max_x, max_y, min_x, min_y
            )));
        }
        Ok(Self::bounded(min_x, min_y, max_x, max_y))
    }

    fn bounded(min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
            y_support: None,
            x_support: None,
        }
    }

    /// Sets the backed part of the left edge, clipped to this point.
    pub fn with_y_support(mut self, span: Span) -> Self {
        self.y_support = span.clip(self.min_y, self.max_y);
        self
    }

    /// Sets the backed part of the bottom edge, clipped to this point.
    pub fn with_x_support(mut self, span: Span) -> Self {
        self.x_support = span.clip(self.min_x, self.max_x);
        self
    }

    pub fn min_x(&self) -> i64 {
        self.min_x
    }

    pub fn min_y(&self) -> i64 {
        self.min_y
    }

    /// Exclusive upper x bound.
    pub fn max_x(&self) -> i64 {
        self.max_x
    }

    /// Exclusive upper y bound.
    pub fn max_y(&self) -> i64 {
        self.max_y
    }

    pub fn dx(&self) -> i64 {
        self.max_x - self.min_x
    }

    pub fn dy(&self) -> i64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> i64 {
        self.dx() * self.dy()
    }

    pub fn y_support(&self) -> Option<Span> {
        self.y_support
    }

    pub fn x_support(&self) -> Option<Span> {
        self.x_support
    }

    /// Checks whether the left edge is backed at `y`.
    pub fn is_y_support(&self, y: i64) -> bool {
        self.y_support.map_or(false, |s| s.contains(y))
    }

    /// Checks whether the bottom edge is backed at `x`.
    pub fn is_x_support(&self, x: i64) -> bool {
        self.x_support.map_or(false, |s| s.contains(x))
    }

    /// Checks whether the left-edge backing ends exactly at `y`.
    pub fn is_y_edge(&self, y: i64) -> bool {
        self.y_support.map_or(false, |s| s.end == y)
    }

    /// Checks whether the bottom-edge backing ends exactly at `x`.
    pub fn is_x_edge(&self, x: i64) -> bool {
        self.x_support.map_or(false, |s| s.end == x)
    }

    /// Returns true if no unit square fits.
    pub fn is_degenerate(&self) -> bool {
        self.max_x <= self.min_x || self.max_y <= self.min_y
    }

    /// Checks whether the footprint of `value` fits at the anchor.
    pub fn fits(&self, value: &StackValue) -> bool {
        value.dx <= self.dx() && value.dy <= self.dy()
    }

    /// Checks whether the footprint of `placed` overlaps this rectangle.
    pub fn intersects(&self, placed: &Cuboid) -> bool {
        self.min_x < placed.end_x()
            && placed.x < self.max_x
            && self.min_y < placed.end_y()
            && placed.y < self.max_y
    }

    /// Checks whether this rectangle contains `other`.
    pub fn contains(&self, other: &Point2D) -> bool {
        self.min_x <= other.min_x
            && other.max_x <= self.max_x
            && self.min_y <= other.min_y
            && other.max_y <= self.max_y
    }

    // Copy with smaller upper bounds; supports are clipped along.
    fn shrunk(&self, max_x: i64, max_y: i64) -> Self {
        let mut point = Self::bounded(self.min_x, self.min_y, max_x, max_y);
        point.y_support = self.y_support.and_then(|s| s.clip(point.min_y, point.max_y));
        point.x_support = self.x_support.and_then(|s| s.clip(point.min_x, point.max_x));
        point
    }

    /// Pushes the parts of this rectangle left free by `placed`.
    ///
    /// Parts left of and in front of the placement keep this anchor. Parts to
    /// the right of and behind it get a new anchor, backed by the placement
    /// along the edge they share with it.
    pub(crate) fn split(&self, placed: &Cuboid, out: &mut Vec<Point2D>) {
        if placed.x > self.min_x {
            out.push(self.shrunk(placed.x, self.max_y));
        }
        if placed.y > self.min_y {
            out.push(self.shrunk(self.max_x, placed.y));
        }

        if placed.end_x() < self.max_x {
            let mut right = Self::bounded(placed.end_x(), self.min_y, self.max_x, self.max_y);
            right.y_support = Span::new(placed.y, placed.end_y()).clip(right.min_y, right.max_y);
            right.x_support = self.x_support.and_then(|s| s.clip(right.min_x, right.max_x));
            out.push(right);
        }
        if placed.end_y() < self.max_y {
            let mut behind = Self::bounded(self.min_x, placed.end_y(), self.max_x, self.max_y);
            behind.x_support = Span::new(placed.x, placed.end_x()).clip(behind.min_x, behind.max_x);
            behind.y_support = self.y_support.and_then(|s| s.clip(behind.min_y, behind.max_y));
            out.push(behind);
        }
    }
}

impl ExtremePoint for Point2D {
    fn min_x(&self) -> i64 {
        self.min_x
    }

    fn min_y(&self) -> i64 {
        self.min_y
    }

    fn area(&self) -> i64 {
        Point2D::area(self)
    }
}
