use crate::error::{GeometryError, Result};
use crate::geometry::{
    Halfline, Halfline2D, Halfline3D, Intersection, IntersectionSet, Line, Line2D, Line3D, Linear,
    Polygon, Segment, Segment2D, Segment3D,
};
use crate::math::{Axis, Point2D, Point3D, Vector2D, Vector3D, TOLERANCE};

/// An infinite plane through `origin` with normal `normal`.
///
/// Besides the usual distance and intersection queries, a plane carries the
/// 3D↔2D projection used by every coplanar polygon algorithm: points are
/// projected by dropping the coordinate of the normal's dominant axis and
/// lifted back by solving the plane equation for it.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    origin: Point3D,
    normal: Vector3D,
}

/// Result of intersecting two planes.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaneIntersection {
    /// Parallel, distinct planes.
    Empty,
    /// The line along which the planes cross.
    Line(Line3D),
    /// Coincident planes.
    Plane(Plane),
}

/// Position of a linear component's supporting line relative to a plane.
#[derive(Debug, Clone, Copy)]
pub(crate) enum LinePlaneRelation {
    /// Crosses the plane at parameter `t`.
    Point { point: Point3D, t: f64 },
    /// Parallel, off the plane.
    Parallel,
    /// Lies in the plane.
    OnPlane,
}

impl Plane {
    /// Creates a plane from a point and a normal of any nonzero length.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the normal is zero.
    pub fn new(origin: Point3D, normal: Vector3D) -> Result<Self> {
        if normal.is_zero() {
            return Err(
                GeometryError::DegenerateInput("plane normal has zero length".into()).into(),
            );
        }
        Ok(Self { origin, normal })
    }

    pub(crate) fn new_unchecked(origin: Point3D, normal: Vector3D) -> Self {
        Self { origin, normal }
    }

    /// The plane through three points, normal `(b - a) × (c - a)`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the points are collinear.
    pub fn from_points(a: Point3D, b: Point3D, c: Point3D) -> Result<Self> {
        let normal = (b - a).cross(&(c - a));
        if normal.is_zero() {
            return Err(GeometryError::DegenerateInput("plane points are collinear".into()).into());
        }
        Ok(Self { origin: a, normal })
    }

    #[must_use]
    pub fn origin(&self) -> Point3D {
        self.origin
    }

    /// The normal as given at construction (not normalized).
    #[must_use]
    pub fn normal(&self) -> Vector3D {
        self.normal
    }

    #[must_use]
    pub fn unit_normal(&self) -> Vector3D {
        self.normal / self.normal.length()
    }

    /// Signed distance, positive on the side the normal points to.
    #[must_use]
    pub fn signed_distance_to_point(&self, point: &Point3D) -> f64 {
        self.unit_normal().dot(&(*point - self.origin))
    }

    #[must_use]
    pub fn distance_to_point(&self, point: &Point3D) -> f64 {
        self.signed_distance_to_point(point).abs()
    }

    #[must_use]
    pub fn contains_point(&self, point: &Point3D) -> bool {
        self.distance_to_point(point) < TOLERANCE
    }

    /// Orthogonal projection of `point` onto the plane.
    #[must_use]
    pub fn closest_point(&self, point: &Point3D) -> Point3D {
        *point - self.unit_normal() * self.signed_distance_to_point(point)
    }

    #[must_use]
    pub fn is_parallel(&self, other: &Self) -> bool {
        self.unit_normal().is_collinear(&other.unit_normal())
    }

    /// The point of the plane above `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the plane contains the z direction.
    pub fn point_xy(&self, x: f64, y: f64) -> Result<Point3D> {
        self.solve_checked(Axis::Z, x, y)
    }

    /// The point of the plane at `(x, z)`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the plane contains the y direction.
    pub fn point_xz(&self, x: f64, z: f64) -> Result<Point3D> {
        self.solve_checked(Axis::Y, x, z)
    }

    /// The point of the plane at `(y, z)`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the plane contains the x direction.
    pub fn point_yz(&self, y: f64, z: f64) -> Result<Point3D> {
        self.solve_checked(Axis::X, y, z)
    }

    fn solve_checked(&self, axis: Axis, u: f64, w: f64) -> Result<Point3D> {
        if self.unit_normal()[axis.index()].abs() < TOLERANCE {
            return Err(GeometryError::DegenerateInput(format!(
                "plane is parallel to the {axis:?} axis"
            ))
            .into());
        }
        Ok(self.solve_for(axis, u, w))
    }

    /// Completes the two known coordinates `(u, w)` (the ones other than
    /// `axis`, in x, y, z order) with the coordinate on `axis`.
    fn solve_for(&self, axis: Axis, u: f64, w: f64) -> Point3D {
        let (n, o) = (self.normal, self.origin);
        match axis {
            Axis::X => {
                let x = o.x() - (n.y() * (u - o.y()) + n.z() * (w - o.z())) / n.x();
                Point3D::new(x, u, w)
            }
            Axis::Y => {
                let y = o.y() - (n.x() * (u - o.x()) + n.z() * (w - o.z())) / n.y();
                Point3D::new(u, y, w)
            }
            Axis::Z => {
                let z = o.z() - (n.x() * (u - o.x()) + n.y() * (w - o.y())) / n.z();
                Point3D::new(u, w, z)
            }
        }
    }

    /// The axis dropped when projecting to 2D: the normal's dominant component.
    #[must_use]
    pub fn projection_axis(&self) -> Axis {
        Axis::dominant(&self.normal)
    }

    #[must_use]
    pub fn project_point(&self, point: &Point3D) -> Point2D {
        match self.projection_axis() {
            Axis::X => Point2D::new(point.y(), point.z()),
            Axis::Y => Point2D::new(point.x(), point.z()),
            Axis::Z => Point2D::new(point.x(), point.y()),
        }
    }

    #[must_use]
    pub fn project_vector(&self, vector: &Vector3D) -> Vector2D {
        match self.projection_axis() {
            Axis::X => Vector2D::new(vector.y(), vector.z()),
            Axis::Y => Vector2D::new(vector.x(), vector.z()),
            Axis::Z => Vector2D::new(vector.x(), vector.y()),
        }
    }

    /// Inverse of [`Plane::project_point`] for points of the plane.
    #[must_use]
    pub fn lift_point(&self, point: &Point2D) -> Point3D {
        self.solve_for(self.projection_axis(), point.x(), point.y())
    }

    /// Inverse of [`Plane::project_vector`] for vectors parallel to the plane.
    #[must_use]
    pub fn lift_vector(&self, vector: &Vector2D) -> Vector3D {
        let base = Point2D::origin();
        self.lift_point(&(base + *vector)) - self.lift_point(&base)
    }

    #[must_use]
    pub fn project_line(&self, line: &Line3D) -> Line2D {
        Line::new(self.project_point(&line.origin()), self.project_vector(&line.direction()))
    }

    #[must_use]
    pub fn project_halfline(&self, halfline: &Halfline3D) -> Halfline2D {
        Halfline::new(
            self.project_point(&halfline.origin()),
            self.project_vector(&halfline.direction()),
        )
    }

    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the segment projects to a point.
    pub fn project_segment(&self, segment: &Segment3D) -> Result<Segment2D> {
        Segment::new(
            self.project_point(&segment.start()),
            self.project_point(&segment.end()),
        )
    }

    /// Projects a polygon assumed to lie in (or parallel to) this plane.
    #[must_use]
    pub fn project_polygon(&self, polygon: &Polygon<3>) -> Polygon<2> {
        let points = polygon.points().iter().map(|p| self.project_point(p)).collect();
        Polygon::new_unchecked(points)
            .with_known_convex(polygon.is_known_convex())
            .with_known_simple(polygon.is_known_simple())
    }

    #[must_use]
    pub fn lift_segment(&self, segment: &Segment2D) -> Segment3D {
        Segment::new_unchecked(self.lift_point(&segment.start()), self.lift_point(&segment.end()))
    }

    #[must_use]
    pub fn lift_polygon(&self, polygon: &Polygon<2>) -> Polygon<3> {
        let points = polygon.points().iter().map(|p| self.lift_point(p)).collect();
        Polygon::new_unchecked(points)
            .with_known_convex(polygon.is_known_convex())
            .with_known_simple(polygon.is_known_simple())
    }

    /// Lifts any 2D intersection result back onto the plane.
    #[must_use]
    pub fn lift(&self, item: &Intersection<2>) -> Intersection<3> {
        match item {
            Intersection::Empty => Intersection::Empty,
            Intersection::Point(p) => Intersection::Point(self.lift_point(p)),
            Intersection::Line(l) => Intersection::Line(Line::new(
                self.lift_point(&l.origin()),
                self.lift_vector(&l.direction()),
            )),
            Intersection::Halfline(h) => Intersection::Halfline(Halfline::new(
                self.lift_point(&h.origin()),
                self.lift_vector(&h.direction()),
            )),
            Intersection::Segment(s) => Intersection::Segment(self.lift_segment(s)),
            Intersection::Polygon(p) => Intersection::Polygon(self.lift_polygon(p)),
        }
    }

    #[must_use]
    pub fn lift_set(&self, set: &IntersectionSet<2>) -> IntersectionSet<3> {
        let mut lifted = IntersectionSet::new();
        for item in set.iter() {
            // Bounded in, bounded out.
            let _ = lifted.push(self.lift(&item));
        }
        lifted
    }

    /// Classifies the supporting line of a linear component.
    pub(crate) fn relate<L: Linear<3> + ?Sized>(&self, component: &L) -> Result<LinePlaneRelation> {
        let dir = component.direction();
        if dir.is_zero() {
            return Err(
                GeometryError::DegenerateInput("zero-length direction vector".into()).into(),
            );
        }
        let n = self.unit_normal();
        let origin = component.origin();
        let denom = n.dot(&dir);
        let numer = n.dot(&(self.origin - origin));

        if n.is_perpendicular(&dir) {
            if numer.abs() < TOLERANCE {
                Ok(LinePlaneRelation::OnPlane)
            } else {
                Ok(LinePlaneRelation::Parallel)
            }
        } else {
            let t = numer / denom;
            Ok(LinePlaneRelation::Point {
                point: component.point_at(t),
                t,
            })
        }
    }

    fn intersect_component<L: Linear<3> + ?Sized>(&self, component: &L) -> Result<Intersection<3>> {
        Ok(match self.relate(component)? {
            LinePlaneRelation::OnPlane => component.to_intersection(),
            LinePlaneRelation::Parallel => Intersection::Empty,
            LinePlaneRelation::Point { t, .. } => {
                let domain = component.domain();
                if domain.contains(t, TOLERANCE / component.direction().length()) {
                    Intersection::Point(component.point_at(domain.clamp(t)))
                } else {
                    Intersection::Empty
                }
            }
        })
    }

    /// A line crosses the plane in a point, lies in it, or misses it.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] for a zero direction.
    pub fn intersect_line(&self, line: &Line3D) -> Result<Intersection<3>> {
        self.intersect_component(line)
    }

    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] for a zero direction.
    pub fn intersect_halfline(&self, halfline: &Halfline3D) -> Result<Intersection<3>> {
        self.intersect_component(halfline)
    }

    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] for a zero direction.
    pub fn intersect_segment(&self, segment: &Segment3D) -> Result<Intersection<3>> {
        self.intersect_component(segment)
    }

    /// Crossing point of a line that is not parallel to the plane.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotSkew`] if the line is parallel to the plane.
    pub fn intersect_line_skew(&self, line: &Line3D) -> Result<Point3D> {
        match self.relate(line)? {
            LinePlaneRelation::Point { point, .. } => Ok(point),
            LinePlaneRelation::Parallel | LinePlaneRelation::OnPlane => {
                Err(GeometryError::NotSkew.into())
            }
        }
    }

    /// # Errors
    ///
    /// This operation does not fail for planes built through [`Plane::new`];
    /// the `Result` keeps the signature uniform with the other intersections.
    pub fn intersect_plane(&self, other: &Plane) -> Result<PlaneIntersection> {
        let na = self.unit_normal();
        let nb = other.unit_normal();
        let dir = na.cross(&nb);

        if dir.is_zero() {
            if other.contains_point(&self.origin) {
                return Ok(PlaneIntersection::Plane(*self));
            }
            return Ok(PlaneIntersection::Empty);
        }

        // p = oa + s * na + t * nb lies on both planes:
        //   s + t (na·nb) = 0
        //   s (na·nb) + t = nb·(ob - oa)
        let d2 = nb.dot(&(other.origin - self.origin));
        let dot_nn = na.dot(&nb);
        let denom = 1.0 - dot_nn * dot_nn;
        let s = -dot_nn * d2 / denom;
        let t = d2 / denom;
        let origin = self.origin + na * s + nb * t;
        Ok(PlaneIntersection::Line(Line::new(origin, dir)))
    }

    /// Distance between two parallel planes.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotParallel`] if the normals are not collinear.
    pub fn distance_to_parallel_plane(&self, other: &Plane) -> Result<f64> {
        if !self.is_parallel(other) {
            return Err(GeometryError::NotParallel.into());
        }
        Ok(self.distance_to_point(&other.origin))
    }
}

/// Coincident planes compare equal, whatever their origins or normal lengths
/// and orientations.
impl PartialEq for Plane {
    fn eq(&self, other: &Self) -> bool {
        self.is_parallel(other) && self.contains_point(&other.origin)
    }
}
