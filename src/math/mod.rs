pub mod point;
pub mod polygon_2d;
pub mod polygon_3d;
pub mod vector;

pub use point::{Point, Point2D, Point3D};
pub use vector::{Vector, Vector2D, Vector3D};

/// Global absolute tolerance for floating-point comparisons.
///
/// Coordinates differing by less than this compare equal, and every derived
/// predicate (collinearity, coplanarity, containment) inherits it.
pub const TOLERANCE: f64 = 1e-7;

/// Returns `true` if `value` is within [`TOLERANCE`] of zero.
#[inline]
#[must_use]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < TOLERANCE
}

/// Returns `true` if `a` and `b` differ by less than [`TOLERANCE`].
#[inline]
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < TOLERANCE
}

/// Coordinate axis of 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Coordinate index of the axis.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The axis whose component of `v` has the largest magnitude.
    ///
    /// Ties resolve towards Z, then Y.
    #[must_use]
    pub fn dominant(v: &Vector3D) -> Self {
        let (ax, ay, az) = (v.x().abs(), v.y().abs(), v.z().abs());
        if az >= ax && az >= ay {
            Axis::Z
        } else if ay >= ax {
            Axis::Y
        } else {
            Axis::X
        }
    }
}
