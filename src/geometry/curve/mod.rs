mod halfline;
mod line;
mod segment;

pub use halfline::{Halfline, Halfline2D, Halfline3D};
pub use line::{Line, Line2D, Line3D};
pub use segment::{Segment, Segment2D, Segment3D};

use crate::error::{GeometryError, Result};
use crate::geometry::Intersection;
use crate::math::{Point, Vector, TOLERANCE};

/// Parameter domain of a linear component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl ParamDomain {
    /// `t ∈ ℝ` (lines).
    pub const REAL: Self = Self::new(f64::NEG_INFINITY, f64::INFINITY);
    /// `t ≥ 0` (halflines).
    pub const NON_NEGATIVE: Self = Self::new(0.0, f64::INFINITY);
    /// `t ∈ [0, 1]` (segments).
    pub const UNIT: Self = Self::new(0.0, 1.0);

    /// Creates a new parameter domain.
    #[must_use]
    pub const fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Returns `true` if `t` lies in the domain, widened by `slack` on both ends.
    #[must_use]
    pub fn contains(&self, t: f64, slack: f64) -> bool {
        t >= self.t_min - slack && t <= self.t_max + slack
    }

    #[must_use]
    pub fn clamp(&self, t: f64) -> f64 {
        t.clamp(self.t_min, self.t_max)
    }
}

/// A parametric linear component `P(t) = origin + t * direction` restricted
/// to a parameter domain: lines, halflines and segments.
pub trait Linear<const D: usize> {
    /// The point at `t = 0`.
    fn origin(&self) -> Point<D>;

    /// The direction vector (not normalized; a segment's is `P1 - P0`).
    fn direction(&self) -> Vector<D>;

    /// Valid parameter range.
    fn domain(&self) -> ParamDomain;

    /// Wraps the component in the matching [`Intersection`] variant.
    fn to_intersection(&self) -> Intersection<D>;

    /// Evaluates the parametric equation without checking the domain.
    fn point_at(&self, t: f64) -> Point<D> {
        self.origin() + self.direction() * t
    }

    /// Evaluates the parametric equation.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidParameter`] if `t` is outside the domain.
    fn calculate_point(&self, t: f64) -> Result<Point<D>> {
        let domain = self.domain();
        if !domain.contains(t, 0.0) {
            return Err(GeometryError::InvalidParameter {
                value: t,
                min: domain.t_min,
                max: domain.t_max,
            }
            .into());
        }
        Ok(self.point_at(t))
    }

    /// Inverts the parametric equation for a point assumed to lie on the line.
    ///
    /// Solves on the first axis (x, then y, then z) where the direction has a
    /// nonzero component.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if every direction component is zero.
    fn calculate_t_from_point(&self, point: &Point<D>) -> Result<f64> {
        let origin = self.origin();
        let dir = self.direction();
        for i in 0..D {
            if dir[i].abs() > TOLERANCE {
                return Ok((point[i] - origin[i]) / dir[i]);
            }
        }
        Err(GeometryError::DegenerateInput("direction vector has zero length".into()).into())
    }

    /// Parameter of the orthogonal projection of `point` onto the supporting line.
    fn project_t(&self, point: &Point<D>) -> f64 {
        let dir = self.direction();
        let len_sq = dir.length_squared();
        if len_sq < TOLERANCE * TOLERANCE {
            return 0.0;
        }
        (*point - self.origin()).dot(&dir) / len_sq
    }

    /// The point of the component closest to `point`.
    fn closest_point(&self, point: &Point<D>) -> Point<D> {
        self.point_at(self.domain().clamp(self.project_t(point)))
    }

    /// Distance from `point` to the component.
    ///
    /// Outside the domain this is the distance to the nearest endpoint.
    fn distance_to_point(&self, point: &Point<D>) -> f64 {
        self.closest_point(point).distance_to_point(point)
    }

    fn contains_point(&self, point: &Point<D>) -> bool {
        self.distance_to_point(point) < TOLERANCE
    }

    /// The infinite line supporting the component.
    fn to_line(&self) -> Line<D> {
        Line::new(self.origin(), self.direction())
    }

    /// Intersects with any other member of the line family.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if either direction has zero length.
    fn intersect<O: Linear<D>>(&self, other: &O) -> Result<Intersection<D>> {
        intersect_linear(self, other)
    }
}

/// The shared decision tree for every pair of line-family members.
///
/// 1. Same infinite line: overlap of the two parameter intervals, expressed in
///    the more restrictive type.
/// 2. Parallel, distinct lines: nothing.
/// 3. Otherwise solve for both parameters and keep the point if it lies in
///    both domains.
pub(crate) fn intersect_linear<const D: usize, A, B>(a: &A, b: &B) -> Result<Intersection<D>>
where
    A: Linear<D> + ?Sized,
    B: Linear<D> + ?Sized,
{
    let va = a.direction();
    let vb = b.direction();
    if va.is_zero() || vb.is_zero() {
        return Err(GeometryError::DegenerateInput("zero-length direction vector".into()).into());
    }

    if va.is_collinear(&vb) {
        if a.to_line().contains_point(&b.origin()) {
            return Ok(collinear_overlap(a, b));
        }
        return Ok(Intersection::Empty);
    }

    let Some((ta, tb)) = skew_parameters(&a.origin(), &va, &b.origin(), &vb)? else {
        return Ok(Intersection::Empty);
    };
    let (dom_a, dom_b) = (a.domain(), b.domain());
    if dom_a.contains(ta, TOLERANCE / va.length()) && dom_b.contains(tb, TOLERANCE / vb.length()) {
        Ok(Intersection::Point(a.point_at(dom_a.clamp(ta))))
    } else {
        Ok(Intersection::Empty)
    }
}

/// Solves `pa + ta * va = pb + tb * vb` for non-parallel directions.
///
/// The system is solved in the two axes where the directions' exterior
/// product is largest, then both back-substituted points are compared; in 3D
/// a mismatch means the lines are skew and `None` is returned.
///
/// # Errors
///
/// Returns [`GeometryError::NotSkew`] if the directions are collinear.
pub(crate) fn skew_parameters<const D: usize>(
    pa: &Point<D>,
    va: &Vector<D>,
    pb: &Point<D>,
    vb: &Vector<D>,
) -> Result<Option<(f64, f64)>> {
    if va.is_collinear(vb) {
        return Err(GeometryError::NotSkew.into());
    }
    let (i, j) = va.dominant_plane(vb);
    let denom = va[i] * vb[j] - va[j] * vb[i];
    let w = *pb - *pa;
    let ta = (w[i] * vb[j] - vb[i] * w[j]) / denom;
    let tb = (w[i] * va[j] - va[i] * w[j]) / denom;

    let qa = *pa + *va * ta;
    let qb = *pb + *vb * tb;
    Ok((qa == qb).then_some((ta, tb)))
}

/// Overlap of two components lying on the same infinite line, measured in
/// `a`'s parametrization.
fn collinear_overlap<const D: usize, A, B>(a: &A, b: &B) -> Intersection<D>
where
    A: Linear<D> + ?Sized,
    B: Linear<D> + ?Sized,
{
    let va = a.direction();
    let sign = if va.dot(&b.direction()) > 0.0 { 1.0 } else { -1.0 };
    let map = |t: f64| {
        if t.is_infinite() {
            t * sign
        } else {
            a.project_t(&b.point_at(t))
        }
    };

    let dom_b = b.domain();
    let (m0, m1) = (map(dom_b.t_min), map(dom_b.t_max));
    let (lo_b, hi_b) = if m0 <= m1 { (m0, m1) } else { (m1, m0) };

    let dom_a = a.domain();
    let lo = dom_a.t_min.max(lo_b);
    let hi = dom_a.t_max.min(hi_b);
    if lo > hi + TOLERANCE / va.length() {
        return Intersection::Empty;
    }

    match (lo.is_finite(), hi.is_finite()) {
        (false, false) => Intersection::Line(a.to_line()),
        (true, false) => Intersection::Halfline(Halfline::new(a.point_at(lo), va)),
        (false, true) => Intersection::Halfline(Halfline::new(a.point_at(hi), -va)),
        (true, true) => {
            let start = a.point_at(lo);
            let end = a.point_at(hi);
            // A single shared parameter is a point, never a zero-length segment.
            if start == end {
                Intersection::Point(start)
            } else {
                Intersection::Segment(Segment::new_unchecked(start, end))
            }
        }
    }
}
