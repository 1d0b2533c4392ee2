use crate::error::{GeometryError, Result};
use crate::geometry::Intersection;
use crate::math::{Point, Vector};

use super::{intersect_linear, Halfline, Line, Linear, ParamDomain};

/// A bounded segment `P(t) = p0 + t * (p1 - p0)`, `t ∈ [0, 1]`.
///
/// Equality ignores orientation: `[a, b] == [b, a]`.
#[derive(Debug, Clone, Copy)]
pub struct Segment<const D: usize> {
    p0: Point<D>,
    p1: Point<D>,
}

/// 2D segment type.
pub type Segment2D = Segment<2>;

/// 3D segment type.
pub type Segment3D = Segment<3>;

impl<const D: usize> Segment<D> {
    /// Creates a segment between two distinct points.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the endpoints coincide.
    pub fn new(p0: Point<D>, p1: Point<D>) -> Result<Self> {
        if p0 == p1 {
            return Err(GeometryError::DegenerateInput(format!(
                "segment endpoints coincide at {p0}"
            ))
            .into());
        }
        Ok(Self { p0, p1 })
    }

    pub(crate) fn new_unchecked(p0: Point<D>, p1: Point<D>) -> Self {
        Self { p0, p1 }
    }

    #[must_use]
    pub fn start(&self) -> Point<D> {
        self.p0
    }

    #[must_use]
    pub fn end(&self) -> Point<D> {
        self.p1
    }

    #[must_use]
    pub fn points(&self) -> [Point<D>; 2] {
        [self.p0, self.p1]
    }

    /// `p1 - p0`.
    #[must_use]
    pub fn vector(&self) -> Vector<D> {
        self.p1 - self.p0
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.p0.distance_to_point(&self.p1)
    }

    #[must_use]
    pub fn midpoint(&self) -> Point<D> {
        self.p0.midpoint(&self.p1)
    }

    /// Same as [`Segment::midpoint`].
    #[must_use]
    pub fn centroid(&self) -> Point<D> {
        self.midpoint()
    }

    #[must_use]
    pub fn reverse(&self) -> Self {
        Self {
            p0: self.p1,
            p1: self.p0,
        }
    }

    /// `true` if `point` is one of the endpoints.
    #[must_use]
    pub fn has_endpoint(&self, point: &Point<D>) -> bool {
        self.p0 == *point || self.p1 == *point
    }

    /// `true` if both segments lie on the same infinite line.
    #[must_use]
    pub fn is_collinear_with(&self, other: &Self) -> bool {
        self.line() == other.line()
    }

    /// The supporting line, with `P(0) = p0` and `P(1) = p1`.
    #[must_use]
    pub fn line(&self) -> Line<D> {
        Line::new(self.p0, self.vector())
    }

    /// The ray from `p0` through `p1`.
    #[must_use]
    pub fn halfline(&self) -> Halfline<D> {
        Halfline::new(self.p0, self.vector())
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

    /// Collinear segments overlap in a segment or touch in a point; otherwise
    /// they cross in at most one point.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] for a zero direction.
    pub fn intersect_segment(&self, other: &Segment<D>) -> Result<Intersection<D>> {
        intersect_linear(self, other)
    }
}

impl<const D: usize> Linear<D> for Segment<D> {
    fn origin(&self) -> Point<D> {
        self.p0
    }

    fn direction(&self) -> Vector<D> {
        self.vector()
    }

    fn domain(&self) -> ParamDomain {
        ParamDomain::UNIT
    }

    fn to_intersection(&self) -> Intersection<D> {
        Intersection::Segment(*self)
    }
}

impl<const D: usize> PartialEq for Segment<D> {
    fn eq(&self, other: &Self) -> bool {
        (self.p0 == other.p0 && self.p1 == other.p1) || (self.p0 == other.p1 && self.p1 == other.p0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point2D, Point3D, Vector2D};
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    fn seg(a: Point2D, b: Point2D) -> Segment2D {
        Segment::new(a, b).unwrap()
    }

    #[test]
    fn rejects_coincident_endpoints() {
        assert!(Segment::new(p(1.0, 1.0), p(1.0, 1.0 + 1e-9)).is_err());
    }

    #[test]
    fn equality_ignores_orientation() {
        let s = seg(p(0.0, 0.0), p(1.0, 2.0));
        assert_eq!(s, s.reverse());
        assert_ne!(s, seg(p(0.0, 0.0), p(1.0, 2.1)));
    }

    #[test]
    fn measures() {
        let s = seg(p(0.0, 0.0), p(3.0, 4.0));
        assert_abs_diff_eq!(s.length(), 5.0);
        assert_eq!(s.midpoint(), p(1.5, 2.0));
        assert_eq!(s.centroid(), s.midpoint());
        assert_eq!(s.vector(), Vector2D::new(3.0, 4.0));
    }

    #[test]
    fn parameter_round_trip() {
        let s = seg(p(1.0, 1.0), p(3.0, 5.0));
        let q = s.calculate_point(0.25).unwrap();
        assert_eq!(q, p(1.5, 2.0));
        assert_abs_diff_eq!(s.calculate_t_from_point(&q).unwrap(), 0.25, epsilon = 1e-12);
        assert!(s.calculate_point(1.5).is_err());
    }

    #[test]
    fn distance_clamps_to_endpoints() {
        let s = seg(p(0.0, 0.0), p(1.0, 0.0));
        assert_abs_diff_eq!(s.distance_to_point(&p(0.5, 2.0)), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.distance_to_point(&p(4.0, 4.0)), 5.0, epsilon = 1e-12);
        assert!(s.contains_point(&p(1.0, 0.0)));
        assert!(!s.contains_point(&p(1.1, 0.0)));
    }

    #[test]
    fn crossing_segments() {
        let a = seg(p(0.0, 0.0), p(2.0, 2.0));
        let b = seg(p(0.0, 2.0), p(2.0, 0.0));
        assert_eq!(a.intersect_segment(&b).unwrap(), Intersection::Point(p(1.0, 1.0)));

        let short = seg(p(0.0, 2.0), p(0.9, 1.1));
        assert_eq!(a.intersect_segment(&short).unwrap(), Intersection::Empty);
    }

    #[test]
    fn endpoint_touch_counts() {
        let a = seg(p(0.0, 0.0), p(1.0, 0.0));
        let b = seg(p(1.0, 0.0), p(1.0, 1.0));
        assert_eq!(a.intersect_segment(&b).unwrap(), Intersection::Point(p(1.0, 0.0)));
    }

    #[test]
    fn collinear_overlap_and_touch() {
        let a = seg(p(0.0, 0.0), p(2.0, 0.0));
        let b = seg(p(3.0, 0.0), p(1.0, 0.0));
        assert_eq!(
            a.intersect_segment(&b).unwrap(),
            Intersection::Segment(seg(p(1.0, 0.0), p(2.0, 0.0)))
        );

        let c = seg(p(2.0, 0.0), p(5.0, 0.0));
        assert_eq!(a.intersect_segment(&c).unwrap(), Intersection::Point(p(2.0, 0.0)));

        let d = seg(p(2.5, 0.0), p(5.0, 0.0));
        assert_eq!(a.intersect_segment(&d).unwrap(), Intersection::Empty);
    }

    #[test]
    fn self_intersection_is_identity() {
        let a = seg(p(-1.0, 3.0), p(2.0, 0.5));
        assert_eq!(a.intersect_segment(&a).unwrap(), Intersection::Segment(a));
    }

    #[test]
    fn parallel_segments_are_disjoint() {
        let a = seg(p(0.0, 0.0), p(2.0, 0.0));
        let b = seg(p(0.0, 1.0), p(2.0, 1.0));
        assert_eq!(a.intersect_segment(&b).unwrap(), Intersection::Empty);
        assert!(!a.is_collinear_with(&b));
    }

    #[test]
    fn long_nearly_parallel_segments_still_cross() {
        // Directions differ by a tiny angle, but the perp product is 0.1.
        let a = seg(p(-1000.0, 0.0), p(1000.0, 0.0));
        let b = seg(p(-500.0, -2.5e-5), p(500.0, 2.5e-5));
        assert_eq!(a.intersect_segment(&b).unwrap(), Intersection::Point(p(0.0, 0.0)));
        assert!(!a.is_collinear_with(&b));
    }

    #[test]
    fn segments_in_space() {
        let a = Segment::new(Point3D::new(0.0, 0.0, 0.0), Point3D::new(2.0, 2.0, 2.0)).unwrap();
        let b = Segment::new(Point3D::new(2.0, 0.0, 0.0), Point3D::new(0.0, 2.0, 2.0)).unwrap();
        assert_eq!(
            a.intersect_segment(&b).unwrap(),
            Intersection::Point(Point3D::new(1.0, 1.0, 1.0))
        );
    }

    proptest! {
        #[test]
        fn parameter_round_trip_holds_everywhere(
            x0 in -10.0..10.0f64, y0 in -10.0..10.0f64,
            x1 in -10.0..10.0f64, y1 in -10.0..10.0f64,
            t in 0.0..=1.0f64,
        ) {
            prop_assume!((x1 - x0).abs() > 1e-3);
            let s = seg(p(x0, y0), p(x1, y1));
            let q = s.calculate_point(t).unwrap();
            prop_assert!((s.calculate_t_from_point(&q).unwrap() - t).abs() < 1e-9);
        }

        #[test]
        fn intersection_with_itself_is_itself(
            x0 in -10.0..10.0f64, y0 in -10.0..10.0f64,
            x1 in -10.0..10.0f64, y1 in -10.0..10.0f64,
        ) {
            prop_assume!(p(x0, y0).distance_to_point(&p(x1, y1)) > 1e-3);
            let s = seg(p(x0, y0), p(x1, y1));
            prop_assert_eq!(s.intersect_segment(&s).unwrap(), Intersection::Segment(s));
            prop_assert_eq!(s.intersect_segment(&s.reverse()).unwrap(), Intersection::Segment(s));
        }
    }
}
