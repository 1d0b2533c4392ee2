use crate::error::Result;
use crate::geometry::Intersection;
use crate::math::{Point, Vector};

use super::{intersect_linear, Line, Linear, ParamDomain, Segment};

/// A ray `P(t) = origin + t * direction`, `t ≥ 0`.
#[derive(Debug, Clone, Copy)]
pub struct Halfline<const D: usize> {
    origin: Point<D>,
    direction: Vector<D>,
}

/// 2D halfline type.
pub type Halfline2D = Halfline<2>;

/// 3D halfline type.
pub type Halfline3D = Halfline<3>;

impl<const D: usize> Halfline<D> {
    /// Creates a halfline without checking the direction.
    #[must_use]
    pub fn new(origin: Point<D>, direction: Vector<D>) -> Self {
        Self { origin, direction }
    }

    /// The ray starting at `p0` and passing through `p1`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::GeometryError::DegenerateInput`] if the points coincide.
    pub fn through(p0: Point<D>, p1: Point<D>) -> Result<Self> {
        Line::through(p0, p1)?;
        Ok(Self::new(p0, p1 - p0))
    }

    /// # Errors
    ///
    /// Returns [`crate::error::GeometryError::DegenerateInput`] for a zero direction.
    pub fn intersect_line(&self, other: &Line<D>) -> Result<Intersection<D>> {
        intersect_linear(self, other)
    }

    /// Two rays can share a point, a segment (opposed rays overlapping), a ray
    /// or nothing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::GeometryError::DegenerateInput`] for a zero direction.
    pub fn intersect_halfline(&self, other: &Halfline<D>) -> Result<Intersection<D>> {
        intersect_linear(self, other)
    }

    /// # Errors
    ///
    /// Returns [`crate::error::GeometryError::DegenerateInput`] for a zero direction.
    pub fn intersect_segment(&self, other: &Segment<D>) -> Result<Intersection<D>> {
        intersect_linear(self, other)
    }
}

impl<const D: usize> Linear<D> for Halfline<D> {
    fn origin(&self) -> Point<D> {
        self.origin
    }

    fn direction(&self) -> Vector<D> {
        self.direction
    }

    fn domain(&self) -> ParamDomain {
        ParamDomain::NON_NEGATIVE
    }

    fn to_intersection(&self) -> Intersection<D> {
        Intersection::Halfline(*self)
    }
}

/// Same start point and same pointing direction.
impl<const D: usize> PartialEq for Halfline<D> {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin && self.direction.is_codirectional(&other.direction)
    }
}
