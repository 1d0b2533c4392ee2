use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Index, Sub};

use nalgebra::SVector;

use super::{Vector, TOLERANCE};
use crate::error::{GeometryError, Result};

/// A position in `D`-dimensional space.
///
/// Points and vectors are distinct: `Point - Point = Vector`,
/// `Point + Vector = Point`. Equality and ordering are tolerance-based
/// (coordinates within [`TOLERANCE`] compare equal).
#[derive(Debug, Clone, Copy)]
pub struct Point<const D: usize> {
    coords: SVector<f64, D>,
}

/// 2D point type.
pub type Point2D = Point<2>;

/// 3D point type.
pub type Point3D = Point<3>;

impl<const D: usize> Point<D> {
    /// Wraps raw nalgebra coordinates.
    #[must_use]
    pub fn from_coords(coords: SVector<f64, D>) -> Self {
        Self { coords }
    }

    /// Builds a point from a coordinate slice.
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

    /// The coordinate origin.
    #[must_use]
    pub fn origin() -> Self {
        Self {
            coords: SVector::zeros(),
        }
    }

    #[must_use]
    pub fn coords(&self) -> &SVector<f64, D> {
        &self.coords
    }

    #[must_use]
    pub fn to_array(&self) -> [f64; D] {
        std::array::from_fn(|i| self.coords[i])
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        D
    }

    #[must_use]
    pub fn distance_to_point(&self, other: &Self) -> f64 {
        (self.coords - other.coords).norm()
    }

    /// Point halfway between `self` and `other`.
    #[must_use]
    pub fn midpoint(&self, other: &Self) -> Self {
        Self {
            coords: (self.coords + other.coords) * 0.5,
        }
    }

    /// Arithmetic mean of a set of points, or `None` for an empty set.
    #[must_use]
    pub fn mean(points: &[Self]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let sum = points
            .iter()
            .fold(SVector::<f64, D>::zeros(), |acc, p| acc + p.coords);
        #[allow(clippy::cast_precision_loss)]
        let inv_n = 1.0 / points.len() as f64;
        Some(Self { coords: sum * inv_n })
    }
}

impl Point<2> {
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
}

impl Point<3> {
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
}

impl<const D: usize> PartialEq for Point<D> {
    fn eq(&self, other: &Self) -> bool {
        self.coords
            .iter()
            .zip(other.coords.iter())
            .all(|(a, b)| (a - b).abs() < TOLERANCE)
    }
}

/// Lexicographic ordering; coordinates within tolerance are treated as equal.
impl<const D: usize> PartialOrd for Point<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        for (a, b) in self.coords.iter().zip(other.coords.iter()) {
            if (a - b).abs() < TOLERANCE {
                continue;
            }
            return a.partial_cmp(b);
        }
        Some(Ordering::Equal)
    }
}

impl<const D: usize> Index<usize> for Point<D> {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.coords[index]
    }
}

impl<const D: usize> Sub for Point<D> {
    type Output = Vector<D>;

    fn sub(self, rhs: Self) -> Vector<D> {
        Vector::from_coords(self.coords - rhs.coords)
    }
}

impl<const D: usize> Add<Vector<D>> for Point<D> {
    type Output = Self;

    fn add(self, rhs: Vector<D>) -> Self {
        Self {
            coords: self.coords + rhs.coords(),
        }
    }
}

impl<const D: usize> Sub<Vector<D>> for Point<D> {
    type Output = Self;

    fn sub(self, rhs: Vector<D>) -> Self {
        Self {
            coords: self.coords - rhs.coords(),
        }
    }
}

impl<const D: usize> fmt::Display for Point<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point{D}D(")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}
