use crate::error::{GeometryError, Result};
use crate::geometry::Intersection;
use crate::math::{Point, Vector};

use super::{intersect_linear, skew_parameters, Halfline, Linear, ParamDomain, Segment};

/// An infinite line `P(t) = origin + t * direction`, `t ∈ ℝ`.
///
/// Two lines compare equal when they describe the same point set, whatever
/// their origins and direction scales.
#[derive(Debug, Clone, Copy)]
pub struct Line<const D: usize> {
    origin: Point<D>,
    direction: Vector<D>,
}

/// 2D line type.
pub type Line2D = Line<2>;

/// 3D line type.
pub type Line3D = Line<3>;

impl<const D: usize> Line<D> {
    /// Creates a line without checking the direction.
    ///
    /// Operations on a line with a zero direction report
    /// [`GeometryError::DegenerateInput`]; use [`Line::validated`] to fail early.
    #[must_use]
    pub fn new(origin: Point<D>, direction: Vector<D>) -> Self {
        Self { origin, direction }
    }

    /// Creates a line, rejecting a zero-length direction.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the direction is zero.
    pub fn validated(origin: Point<D>, direction: Vector<D>) -> Result<Self> {
        let line = Self::new(origin, direction);
        line.validate()?;
        Ok(line)
    }

    /// The line through two points, parametrized so that `P(0) = p0`, `P(1) = p1`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the points coincide.
    pub fn through(p0: Point<D>, p1: Point<D>) -> Result<Self> {
        Self::validated(p0, p1 - p0)
    }

    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the direction is zero.
    pub fn validate(&self) -> Result<()> {
        if self.direction.is_zero() {
            return Err(
                GeometryError::DegenerateInput("line direction has zero length".into()).into(),
            );
        }
        Ok(())
    }

    #[must_use]
    pub fn is_parallel(&self, other: &Self) -> bool {
        self.direction.is_collinear(&other.direction)
    }

    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] for a zero direction.
    pub fn intersect_line(&self, other: &Line<D>) -> Result<Intersection<D>> {
        intersect_linear(self, other)
    }

    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] for a zero direction.
    pub fn intersect_halfline(&self, other: &Halfline<D>) -> Result<Intersection<D>> {
        intersect_linear(self, other)
    }

    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] for a zero direction.
    pub fn intersect_segment(&self, other: &Segment<D>) -> Result<Intersection<D>> {
        intersect_linear(self, other)
    }

    /// Crossing point of two non-parallel lines.
    ///
    /// Returns `None` when the lines are skew (3D, no common point).
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotSkew`] if the lines are parallel.
    pub fn intersect_line_skew(&self, other: &Self) -> Result<Option<Point<D>>> {
        Ok(skew_parameters(&self.origin, &self.direction, &other.origin, &other.direction)?
            .map(|(t, _)| self.point_at(t)))
    }

    /// Distance between two parallel lines.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotParallel`] if the directions are not collinear.
    pub fn distance_to_parallel_line(&self, other: &Self) -> Result<f64> {
        if !self.is_parallel(other) {
            return Err(GeometryError::NotParallel.into());
        }
        Ok(self.distance_to_point(&other.origin))
    }
}

impl<const D: usize> Linear<D> for Line<D> {
    fn origin(&self) -> Point<D> {
        self.origin
    }

    fn direction(&self) -> Vector<D> {
        self.direction
    }

    fn domain(&self) -> ParamDomain {
        ParamDomain::REAL
    }

    fn to_intersection(&self) -> Intersection<D> {
        Intersection::Line(*self)
    }
}

impl<const D: usize> PartialEq for Line<D> {
    fn eq(&self, other: &Self) -> bool {
        self.is_parallel(other) && self.contains_point(&other.origin)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point2D, Point3D, Vector2D, Vector3D};
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    fn v(x: f64, y: f64) -> Vector2D {
        Vector2D::new(x, y)
    }

    #[test]
    fn evaluate_and_invert() {
        let line = Line2D::new(p(1.0, 1.0), v(2.0, 0.0));
        assert_eq!(line.calculate_point(-1.5).unwrap(), p(-2.0, 1.0));
        assert_abs_diff_eq!(line.calculate_t_from_point(&p(5.0, 1.0)).unwrap(), 2.0);

        let vertical = Line2D::new(p(0.0, 0.0), v(0.0, 4.0));
        assert_abs_diff_eq!(vertical.calculate_t_from_point(&p(0.0, 2.0)).unwrap(), 0.5);
    }

    #[test]
    fn zero_direction_is_degenerate() {
        let line = Line2D::new(p(0.0, 0.0), v(0.0, 0.0));
        assert!(line.validate().is_err());
        assert!(line.calculate_t_from_point(&p(1.0, 1.0)).is_err());
        assert!(Line2D::through(p(1.0, 1.0), p(1.0, 1.0)).is_err());
        let other = Line2D::new(p(0.0, 0.0), v(1.0, 0.0));
        assert!(line.intersect_line(&other).is_err());
    }

    #[test]
    fn equality_ignores_parametrization() {
        let a = Line2D::new(p(0.0, 0.0), v(1.0, 1.0));
        let b = Line2D::new(p(3.0, 3.0), v(-2.0, -2.0));
        assert_eq!(a, b);
        assert_ne!(a, Line2D::new(p(0.0, 1.0), v(1.0, 1.0)));
    }

    #[test]
    fn distance_to_point_is_perpendicular() {
        let line = Line2D::new(p(0.0, 0.0), v(1.0, 0.0));
        assert_abs_diff_eq!(line.distance_to_point(&p(-7.0, 3.0)), 3.0, epsilon = 1e-12);
        assert!(line.contains_point(&p(100.0, 0.0)));
    }

    #[test]
    fn crossing_lines_meet_in_a_point() {
        let a = Line2D::new(p(0.0, 0.0), v(1.0, 1.0));
        let b = Line2D::new(p(0.0, 2.0), v(1.0, -1.0));
        assert_eq!(a.intersect_line(&b).unwrap(), Intersection::Point(p(1.0, 1.0)));
        assert_eq!(a.intersect_line_skew(&b).unwrap(), Some(p(1.0, 1.0)));
    }

    #[test]
    fn parallel_and_coincident_lines() {
        let a = Line2D::new(p(0.0, 0.0), v(1.0, 0.0));
        let b = Line2D::new(p(0.0, 2.0), v(-3.0, 0.0));
        assert_eq!(a.intersect_line(&b).unwrap(), Intersection::Empty);
        assert_abs_diff_eq!(a.distance_to_parallel_line(&b).unwrap(), 2.0, epsilon = 1e-12);
        assert!(a.intersect_line_skew(&b).is_err());

        let c = Line2D::new(p(5.0, 0.0), v(-1.0, 0.0));
        assert_eq!(a.intersect_line(&c).unwrap(), Intersection::Line(a));
    }

    #[test]
    fn distance_to_parallel_rejects_crossing_lines() {
        let a = Line2D::new(p(0.0, 0.0), v(1.0, 0.0));
        let b = Line2D::new(p(0.0, 0.0), v(0.0, 1.0));
        assert!(matches!(
            a.distance_to_parallel_line(&b),
            Err(crate::PolykernError::Geometry(GeometryError::NotParallel))
        ));
    }

    #[test]
    fn line_meets_halfline_and_segment() {
        let line = Line2D::new(p(0.0, 0.0), v(1.0, 0.0));
        let ray = Halfline::new(p(2.0, 1.0), v(0.0, -1.0));
        assert_eq!(line.intersect_halfline(&ray).unwrap(), Intersection::Point(p(2.0, 0.0)));
        let away = Halfline::new(p(2.0, 1.0), v(0.0, 1.0));
        assert_eq!(line.intersect_halfline(&away).unwrap(), Intersection::Empty);

        let seg = Segment::new(p(-1.0, 0.0), p(1.0, 0.0)).unwrap();
        assert_eq!(line.intersect_segment(&seg).unwrap(), Intersection::Segment(seg));
    }

    #[test]
    fn skew_lines_in_space() {
        let a = Line3D::new(Point3D::new(0.0, 0.0, 0.0), Vector3D::new(1.0, 0.0, 0.0));
        let b = Line3D::new(Point3D::new(0.0, 1.0, 1.0), Vector3D::new(0.0, 1.0, 0.0));
        assert_eq!(a.intersect_line(&b).unwrap(), Intersection::Empty);
        assert_eq!(a.intersect_line_skew(&b).unwrap(), None);

        let c = Line3D::new(Point3D::new(2.0, -1.0, 0.0), Vector3D::new(0.0, 1.0, 0.0));
        assert_eq!(
            a.intersect_line(&c).unwrap(),
            Intersection::Point(Point3D::new(2.0, 0.0, 0.0))
        );
    }

    proptest! {
        #[test]
        fn parameter_round_trip_in_space(
            ox in -10.0..10.0f64, oy in -10.0..10.0f64, oz in -10.0..10.0f64,
            dx in -5.0..5.0f64, dy in -5.0..5.0f64, dz in -5.0..5.0f64,
            t in -100.0..100.0f64,
        ) {
            prop_assume!(dx.abs() > 1e-2);
            let line = Line3D::new(Point3D::new(ox, oy, oz), Vector3D::new(dx, dy, dz));
            let q = line.calculate_point(t).unwrap();
            prop_assert!((line.calculate_t_from_point(&q).unwrap() - t).abs() < 1e-8);
        }
    }
}
