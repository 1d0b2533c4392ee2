use crate::error::Result;
use crate::geometry::{Halfline2D, IntersectionSet, Line2D, Segment2D};
use crate::math::polygon_2d::{is_convex_ring, signed_area_2d};
use crate::math::Point2D;
use crate::operations::{boolean, triangulate, winding};

use super::Polygon;

impl Polygon<2> {
    /// Shoelace area: positive for counter-clockwise rings.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.points)
    }

    #[must_use]
    pub fn is_counterclockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// This polygon if it is counter-clockwise, else its reverse.
    ///
    /// The reversed copy is cached.
    #[must_use]
    pub fn ccw(&self) -> &Polygon<2> {
        if self.is_counterclockwise() {
            return self;
        }
        self.ccw.get_or_init(|| Box::new(self.reverse()))
    }

    /// Geometric convexity test, independent of the `known_convex` flag.
    #[must_use]
    pub fn is_convex(&self) -> bool {
        is_convex_ring(&self.points)
    }

    /// Winding number of the boundary around `point`.
    ///
    /// Points exactly on the boundary get a consistent but arbitrary answer;
    /// use [`Polygon::contains_point`] for closed containment.
    #[must_use]
    pub fn winding_number(&self, point: &Point2D) -> i32 {
        winding::winding_number(point, &self.points)
    }

    /// `true` if `point` lies on the boundary within tolerance.
    #[must_use]
    pub fn boundary_contains_point(&self, point: &Point2D) -> bool {
        winding::on_boundary(point, &self.points)
    }

    /// Closed containment: interior or boundary.
    #[must_use]
    pub fn contains_point(&self, point: &Point2D) -> bool {
        winding::contains(point, &self.points)
    }

    /// Open containment: interior only.
    #[must_use]
    pub fn interior_contains_point(&self, point: &Point2D) -> bool {
        !self.boundary_contains_point(point) && self.winding_number(point) != 0
    }

    /// Ear-clipping triangulation, cached.
    ///
    /// The triangles are marked convex and keep the ring's orientation.
    #[must_use]
    pub fn triangles(&self) -> &[Polygon<2>] {
        self.triangles.get_or_init(|| {
            triangulate::ear_clip(&self.points)
                .into_iter()
                .map(|[a, b, c]| {
                    Polygon::new_unchecked(vec![self.points[a], self.points[b], self.points[c]])
                        .with_known_convex(true)
                })
                .collect()
        })
    }

    /// # Errors
    ///
    /// Returns [`crate::error::OperationError::Unsupported`] for a polygon not
    /// known to be simple.
    pub fn intersect_line(&self, line: &Line2D) -> Result<IntersectionSet<2>> {
        boolean::intersect_polygon_component(self, line)
    }

    /// # Errors
    ///
    /// Returns [`crate::error::OperationError::Unsupported`] for a polygon not
    /// known to be simple.
    pub fn intersect_halfline(&self, halfline: &Halfline2D) -> Result<IntersectionSet<2>> {
        boolean::intersect_polygon_component(self, halfline)
    }

    /// # Errors
    ///
    /// Returns [`crate::error::OperationError::Unsupported`] for a polygon not
    /// known to be simple.
    pub fn intersect_segment(&self, segment: &Segment2D) -> Result<IntersectionSet<2>> {
        boolean::intersect_polygon_component(self, segment)
    }

    /// Common region of two polygons, split into disjoint polygons,
    /// segments (shared edges) and points (shared vertices).
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::OperationError::Unsupported`] if either polygon
    /// is not known to be simple.
    pub fn intersect_polygon(&self, other: &Polygon<2>) -> Result<IntersectionSet<2>> {
        boolean::intersect_polygons(self, other)
    }

    /// Single polygon covering both operands, which must overlap or share an
    /// edge.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::OperationError::NotAdjacent`] if the polygons
    /// are disjoint, touch in a point, or one contains the other, and
    /// [`crate::error::OperationError::Unsupported`] if the union would have
    /// holes or several components.
    pub fn union_polygon(&self, other: &Polygon<2>) -> Result<Polygon<2>> {
        boolean::union_polygons(self, other)
    }
}
