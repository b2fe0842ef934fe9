//! Volumetric extreme points.

use u_packing_core::comparator::ExtremePoint;
use u_packing_core::geometry::{Cuboid, StackValue};
use u_packing_core::{Error, Result};

/// A free box anchored at its lower corner.
///
/// Besides its bounds, a point remembers the placements whose faces it was
/// carved from: `yz_plane` lies against its left face `x = min_x`,
/// `xz_plane` against its front face `y = min_y` and `xy_plane` below its
/// bottom face `z = min_z`. Planes are stored in the coordinates of the
/// point set. Only the bottom plane decides support; side planes are kept
/// for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point3D {
    min_x: i64,
    min_y: i64,
    min_z: i64,
    max_x: i64,
    max_y: i64,
    max_z: i64,
    yz_plane: Option<Cuboid>,
    xz_plane: Option<Cuboid>,
    xy_plane: Option<Cuboid>,
}

impl Point3D {
    /// Creates a new point without planes.
    pub fn new(
        min_x: i64,
        min_y: i64,
        min_z: i64,
        max_x: i64,
        max_y: i64,
        max_z: i64,
    ) -> Result<Self> {
        if min_x < 0 || min_y < 0 || min_z < 0 {
            return Err(Error::InvalidPoint(format!(
                "anchor {}x{}x{} is negative",
                min_x, min_y, min_z
            )));
        }
        if max_x < min_x || max_y < min_y || max_z < min_z {
            return Err(Error::InvalidPoint(format!(
                "bounds {}x{}x{} below anchor {}x{}x{}",
                max_x, max_y, max_z, min_x, min_y, min_z
            )));
        }
        Ok(Self::bounded(min_x, min_y, min_z, max_x, max_y, max_z))
    }

    fn bounded(min_x: i64, min_y: i64, min_z: i64, max_x: i64, max_y: i64, max_z: i64) -> Self {
        Self {
            min_x,
            min_y,
            min_z,
            max_x,
            max_y,
            max_z,
            yz_plane: None,
            xz_plane: None,
            xy_plane: None,
        }
    }

    /// Sets the supporting placements.
    pub fn with_planes(
        mut self,
        yz_plane: Option<Cuboid>,
        xz_plane: Option<Cuboid>,
        xy_plane: Option<Cuboid>,
    ) -> Self {
        self.yz_plane = yz_plane;
        self.xz_plane = xz_plane;
        self.xy_plane = xy_plane;
        self
    }

    pub fn min_x(&self) -> i64 {
        self.min_x
    }

    pub fn min_y(&self) -> i64 {
        self.min_y
    }

    pub fn min_z(&self) -> i64 {
        self.min_z
    }

    pub fn max_x(&self) -> i64 {
        self.max_x
    }

    pub fn max_y(&self) -> i64 {
        self.max_y
    }

    pub fn max_z(&self) -> i64 {
        self.max_z
    }

    pub fn dx(&self) -> i64 {
        self.max_x - self.min_x
    }

    pub fn dy(&self) -> i64 {
        self.max_y - self.min_y
    }

    pub fn dz(&self) -> i64 {
        self.max_z - self.min_z
    }

    pub fn area(&self) -> i64 {
        self.dx() * self.dy()
    }

    pub fn volume(&self) -> i64 {
        self.area() * self.dz()
    }

    pub fn yz_plane(&self) -> Option<&Cuboid> {
        self.yz_plane.as_ref()
    }

    pub fn xz_plane(&self) -> Option<&Cuboid> {
        self.xz_plane.as_ref()
    }

    pub fn xy_plane(&self) -> Option<&Cuboid> {
        self.xy_plane.as_ref()
    }

    /// Checks whether a footprint of `dx` x `dy` at the anchor rests fully on
    /// the floor or on the placement below.
    pub fn supports(&self, dx: i64, dy: i64) -> bool {
        self.min_z == 0
            || self
                .xy_plane
                .map_or(false, |p| p.covers_footprint(self.min_x, self.min_y, dx, dy))
    }

    /// Returns true if no unit cube fits.
    pub fn is_degenerate(&self) -> bool {
        self.max_x <= self.min_x || self.max_y <= self.min_y || self.max_z <= self.min_z
    }

    /// Returns true if nothing placed here could be supported.
    pub fn is_unsupported(&self) -> bool {
        self.min_z > 0 && self.xy_plane.is_none()
    }

    /// Checks whether `value` fits at the anchor as oriented.
    pub fn fits(&self, value: &StackValue) -> bool {
        value.fits_inside_3d(self.dx(), self.dy(), self.dz())
    }

    /// Checks whether `placed` overlaps this box.
    pub fn intersects(&self, placed: &Cuboid) -> bool {
        self.min_x < placed.end_x()
            && placed.x < self.max_x
            && self.min_y < placed.end_y()
            && placed.y < self.max_y
            && self.min_z < placed.end_z()
            && placed.z < self.max_z
    }

    /// Checks whether this box contains `other`.
    pub fn contains(&self, other: &Point3D) -> bool {
        self.min_x <= other.min_x
            && other.max_x <= self.max_x
            && self.min_y <= other.min_y
            && other.max_y <= self.max_y
            && self.min_z <= other.min_z
            && other.max_z <= self.max_z
    }

    /// Checks whether every supported placement at `other` is also a
    /// supported placement here, so `other` can be dropped.
    pub fn covers(&self, other: &Point3D) -> bool {
        if !self.contains(other) {
            return false;
        }
        if other.is_unsupported() {
            return true;
        }
        if self.min_z != other.min_z {
            return false;
        }
        if self.min_z == 0 {
            return true;
        }
        match (self.xy_plane, other.xy_plane) {
            (Some(a), Some(b)) => a == b && a.x <= self.min_x && a.y <= self.min_y,
            _ => false,
        }
    }

    fn shrunk(&self, max_x: i64, max_y: i64, max_z: i64) -> Self {
        Self::bounded(self.min_x, self.min_y, self.min_z, max_x, max_y, max_z).with_planes(
            self.yz_plane,
            self.xz_plane,
            self.xy_plane,
        )
    }

    /// Pushes the parts of this box left free by `placed`.
    ///
    /// Parts on the lower side of the placement keep this anchor and planes.
    /// Parts beyond it get a new anchor on the placement's far face and
    /// record the placement as the plane they rest against.
    pub(crate) fn split(&self, placed: &Cuboid, out: &mut Vec<Point3D>) {
        if placed.x > self.min_x {
            out.push(self.shrunk(placed.x, self.max_y, self.max_z));
        }
        if placed.y > self.min_y {
            out.push(self.shrunk(self.max_x, placed.y, self.max_z));
        }
        if placed.z > self.min_z {
            out.push(self.shrunk(self.max_x, self.max_y, placed.z));
        }

        if placed.end_x() < self.max_x {
            out.push(
                Self::bounded(placed.end_x(), self.min_y, self.min_z, self.max_x, self.max_y, self.max_z)
                    .with_planes(Some(*placed), self.xz_plane, self.xy_plane),
            );
        }
        if placed.end_y() < self.max_y {
            out.push(
                Self::bounded(self.min_x, placed.end_y(), self.min_z, self.max_x, self.max_y, self.max_z)
                    .with_planes(self.yz_plane, Some(*placed), self.xy_plane),
            );
        }
        if placed.end_z() < self.max_z {
            out.push(
                Self::bounded(self.min_x, self.min_y, placed.end_z(), self.max_x, self.max_y, self.max_z)
                    .with_planes(self.yz_plane, self.xz_plane, Some(*placed)),
            );
        }
    }
}

impl ExtremePoint for Point3D {
    fn min_x(&self) -> i64 {
        self.min_x
    }

    fn min_y(&self) -> i64 {
        self.min_y
    }

    fn min_z(&self) -> i64 {
        self.min_z
    }

    fn area(&self) -> i64 {
        Point3D::area(self)
    }

    fn volume(&self) -> i64 {
        Point3D::volume(self)
    }
}
