use std::fmt;
use std::ops::{Add, Div, Index, Mul, Neg, Sub};

use nalgebra::SVector;

use super::TOLERANCE;
use crate::error::{GeometryError, Result};

/// A displacement in `D`-dimensional space.
///
/// Vectors carry no position. Equality is tolerance-based: two vectors are
/// equal when every coordinate differs by less than [`TOLERANCE`].
#[derive(Debug, Clone, Copy)]
pub struct Vector<const D: usize> {
    coords: SVector<f64, D>,
}

/// 2D vector type.
pub type Vector2D = Vector<2>;

/// 3D vector type.
pub type Vector3D = Vector<3>;

impl<const D: usize> Vector<D> {
    /// Wraps raw nalgebra coordinates.
    #[must_use]
    pub fn from_coords(coords: SVector<f64, D>) -> Self {
        Self { coords }
    }

    /// Builds a vector from a coordinate slice.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DimensionMismatch`] if `values.len() != D`.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        if values.len() != D {
            return Err(GeometryError::DimensionMismatch {
                expected: D,
                actual: values.len(),
            }
            .into());
        }
        Ok(Self {
            coords: SVector::from_column_slice(values),
        })
    }

    /// The zero vector.
    #[must_use]
    pub fn zeros() -> Self {
        Self {
            coords: SVector::zeros(),
        }
    }

    /// Returns the underlying coordinates.
    #[must_use]
    pub fn coords(&self) -> &SVector<f64, D> {
        &self.coords
    }

    /// Returns the coordinates as an array.
    #[must_use]
    pub fn to_array(&self) -> [f64; D] {
        std::array::from_fn(|i| self.coords[i])
    }

    /// Number of coordinates.
    #[must_use]
    pub fn dimension(&self) -> usize {
        D
    }

    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.coords.dot(&other.coords)
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.coords.norm()
    }

    #[must_use]
    pub fn length_squared(&self) -> f64 {
        self.coords.norm_squared()
    }

    /// Returns `true` if the vector's length is below [`TOLERANCE`].
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.length() < TOLERANCE
    }

    /// Returns the unit vector in the same direction.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the length is approximately zero.
    pub fn normalize(&self) -> Result<Self> {
        let len = self.length();
        if len < TOLERANCE {
            return Err(GeometryError::DegenerateInput(
                "cannot normalize a zero-length vector".into(),
            )
            .into());
        }
        Ok(Self {
            coords: self.coords / len,
        })
    }

    /// Magnitude of the exterior product `self ∧ other`.
    ///
    /// This is `|perp_product|` in 2D and `|cross|` in 3D: the area of the
    /// parallelogram spanned by the two vectors.
    #[must_use]
    pub fn wedge_norm(&self, other: &Self) -> f64 {
        let mut sum = 0.0;
        for i in 0..D {
            for j in (i + 1)..D {
                let c = self.coords[i] * other.coords[j] - self.coords[j] * other.coords[i];
                sum += c * c;
            }
        }
        sum.sqrt()
    }

    /// The pair of axes `(i, j)` with `i < j` on which the exterior product of
    /// the two vectors has its largest component.
    ///
    /// Solving a 2-unknown system in these axes is the best-conditioned choice;
    /// in 3D this is the plane obtained by dropping the axis most aligned with
    /// `self × other`.
    #[must_use]
    pub(crate) fn dominant_plane(&self, other: &Self) -> (usize, usize) {
        let mut best = (0, 1);
        let mut best_mag = f64::NEG_INFINITY;
        for i in 0..D {
            for j in (i + 1)..D {
                let c = (self.coords[i] * other.coords[j] - self.coords[j] * other.coords[i]).abs();
                if c > best_mag {
                    best_mag = c;
                    best = (i, j);
                }
            }
        }
        best
    }

    /// Returns `true` if the vectors lie on a common line through the origin:
    /// the perp product (2D) or cross product length (3D) is below
    /// [`TOLERANCE`].
    ///
    /// A zero vector is collinear with everything.
    #[must_use]
    pub fn is_collinear(&self, other: &Self) -> bool {
        self.wedge_norm(other) < TOLERANCE
    }

    /// Collinear and pointing the same way.
    #[must_use]
    pub fn is_codirectional(&self, other: &Self) -> bool {
        self.is_collinear(other) && self.dot(other) > 0.0
    }

    /// Collinear and pointing opposite ways.
    #[must_use]
    pub fn is_opposite(&self, other: &Self) -> bool {
        self.is_collinear(other) && self.dot(other) < 0.0
    }

    #[must_use]
    pub fn is_perpendicular(&self, other: &Self) -> bool {
        self.dot(other).abs() < TOLERANCE
    }

    /// Unsigned angle between the two vectors, in radians.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if either vector has zero length.
    pub fn angle(&self, other: &Self) -> Result<f64> {
        let denom = self.length() * other.length();
        if denom < TOLERANCE {
            return Err(
                GeometryError::DegenerateInput("angle with a zero-length vector".into()).into(),
            );
        }
        Ok((self.dot(other) / denom).clamp(-1.0, 1.0).acos())
    }
}

impl Vector<2> {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            coords: SVector::<f64, 2>::new(x, y),
        }
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.coords[0]
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.coords[1]
    }

    /// The vector rotated 90° counter-clockwise.
    #[must_use]
    pub fn perp_vector(&self) -> Self {
        Self::new(-self.y(), self.x())
    }

    /// `perp_vector · other`: positive when `other` is counter-clockwise from `self`.
    #[must_use]
    pub fn perp_product(&self, other: &Self) -> f64 {
        self.x() * other.y() - self.y() * other.x()
    }
}

impl Vector<3> {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            coords: SVector::<f64, 3>::new(x, y, z),
        }
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.coords[0]
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.coords[1]
    }

    #[must_use]
    pub fn z(&self) -> f64 {
        self.coords[2]
    }

    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            coords: self.coords.cross(&other.coords),
        }
    }

    /// Scalar triple product `self · (b × c)`.
    #[must_use]
    pub fn triple_product(&self, b: &Self, c: &Self) -> f64 {
        self.dot(&b.cross(c))
    }
}

impl<const D: usize> PartialEq for Vector<D> {
    fn eq(&self, other: &Self) -> bool {
        self.coords
            .iter()
            .zip(other.coords.iter())
            .all(|(a, b)| (a - b).abs() < TOLERANCE)
    }
}

impl<const D: usize> Index<usize> for Vector<D> {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.coords[index]
    }
}

impl<const D: usize> Add for Vector<D> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            coords: self.coords + rhs.coords,
        }
    }
}

impl<const D: usize> Sub for Vector<D> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            coords: self.coords - rhs.coords,
        }
    }
}

impl<const D: usize> Neg for Vector<D> {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            coords: -self.coords,
        }
    }
}

impl<const D: usize> Mul<f64> for Vector<D> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self {
            coords: self.coords * rhs,
        }
    }
}

impl<const D: usize> Mul<Vector<D>> for f64 {
    type Output = Vector<D>;

    fn mul(self, rhs: Vector<D>) -> Vector<D> {
        rhs * self
    }
}

impl<const D: usize> Div<f64> for Vector<D> {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self {
            coords: self.coords / rhs,
        }
    }
}

impl<const D: usize> fmt::Display for Vector<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector{D}D(")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn v(x: f64, y: f64) -> Vector2D {
        Vector2D::new(x, y)
    }

    fn v3(x: f64, y: f64, z: f64) -> Vector3D {
        Vector3D::new(x, y, z)
    }

    #[test]
    fn arithmetic() {
        assert_eq!(v(1.0, 2.0) + v(3.0, 4.0), v(4.0, 6.0));
        assert_eq!(v(1.0, 2.0) - v(3.0, 4.0), v(-2.0, -2.0));
        assert_eq!(v(1.0, 2.0) * 2.0, v(2.0, 4.0));
        assert_eq!(2.0 * v(1.0, 2.0), v(2.0, 4.0));
        assert_eq!(-v(1.0, 2.0), v(-1.0, -2.0));
        assert_eq!(v(2.0, 4.0) / 2.0, v(1.0, 2.0));
        assert_abs_diff_eq!(v(3.0, 4.0).length(), 5.0);
    }

    #[test]
    fn from_slice_checks_dimension() {
        assert_eq!(Vector3D::from_slice(&[1.0, 2.0, 3.0]).unwrap(), v3(1.0, 2.0, 3.0));
        assert!(matches!(
            Vector2D::from_slice(&[1.0, 2.0, 3.0]),
            Err(crate::PolykernError::Geometry(
                GeometryError::DimensionMismatch { expected: 2, actual: 3 }
            ))
        ));
    }

    #[test]
    fn perp_product_sign() {
        // (0, 1) is counter-clockwise from (1, 0).
        assert!(v(1.0, 0.0).perp_product(&v(0.0, 1.0)) > 0.0);
        assert!(v(0.0, 1.0).perp_product(&v(1.0, 0.0)) < 0.0);
        assert_eq!(v(1.0, 0.0).perp_vector(), v(0.0, 1.0));
    }

    #[test]
    fn cross_and_triple_product() {
        assert_eq!(v3(1.0, 0.0, 0.0).cross(&v3(0.0, 1.0, 0.0)), v3(0.0, 0.0, 1.0));
        let t = v3(1.0, 0.0, 0.0).triple_product(&v3(0.0, 1.0, 0.0), &v3(0.0, 0.0, 2.0));
        assert_abs_diff_eq!(t, 2.0);
    }

    #[test]
    fn wedge_norm_matches_perp_and_cross() {
        let (a, b) = (v(2.0, 1.0), v(-1.0, 3.0));
        assert_abs_diff_eq!(a.wedge_norm(&b), a.perp_product(&b).abs(), epsilon = 1e-12);
        let (a, b) = (v3(2.0, 1.0, -1.0), v3(0.5, 3.0, 2.0));
        assert_abs_diff_eq!(a.wedge_norm(&b), a.cross(&b).length(), epsilon = 1e-12);
    }

    #[test]
    fn direction_predicates() {
        assert!(v(1.0, 1.0).is_collinear(&v(-2.0, -2.0)));
        assert!(v(1.0, 1.0).is_codirectional(&v(2.0, 2.0)));
        assert!(v(1.0, 1.0).is_opposite(&v(-2.0, -2.0)));
        assert!(!v(1.0, 1.0).is_codirectional(&v(-2.0, -2.0)));
        assert!(v(1.0, 0.0).is_perpendicular(&v(0.0, 5.0)));
        assert!(v3(1.0, 2.0, 3.0).is_collinear(&v3(2.0, 4.0, 6.0)));
        assert!(!v3(1.0, 2.0, 3.0).is_collinear(&v3(2.0, 4.0, 6.1)));
    }

    #[test]
    fn collinearity_is_absolute() {
        // perp = 1e-8: short vectors at right angles still count as collinear.
        assert!(v(1e-4, 0.0).is_collinear(&v(0.0, 1e-4)));
        assert!(Vector2D::zeros().is_collinear(&v(3.0, -1.0)));
        // perp = 0.1 over a tiny angle: long vectors are not.
        assert!(!v(2000.0, 0.0).is_collinear(&v(1000.0, 5e-5)));
        assert!(!v3(2000.0, 0.0, 0.0).is_collinear(&v3(1000.0, 0.0, 5e-5)));
    }

    #[test]
    fn normalize_zero_fails() {
        assert!(Vector3D::zeros().normalize().is_err());
        let n = v(3.0, 4.0).normalize().unwrap();
        assert_abs_diff_eq!(n.length(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn angle_between() {
        let a = v(1.0, 0.0).angle(&v(0.0, 2.0)).unwrap();
        assert_abs_diff_eq!(a, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn display() {
        assert_eq!(v(1.0, 2.5).to_string(), "Vector2D(1, 2.5)");
    }

    proptest! {
        #[test]
        fn collinear_with_itself(x in -1e3..1e3f64, y in -1e3..1e3f64) {
            let u = v(x, y);
            prop_assert!(u.is_collinear(&u));
        }

        #[test]
        fn perpendicular_to_perp_vector(x in -1e3..1e3f64, y in -1e3..1e3f64) {
            let u = v(x, y);
            prop_assert!(u.is_perpendicular(&u.perp_vector()));
        }
    }
}
