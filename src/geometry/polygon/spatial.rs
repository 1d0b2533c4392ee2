use std::borrow::Cow;

use crate::error::Result;
use crate::geometry::{Halfline3D, IntersectionSet, Line3D, Plane, Segment3D};
use crate::math::polygon_3d::newell_normal;
use crate::math::{Point3D, Vector3D};
use crate::operations::{boolean, triangulate};

use super::{Polygon, Projection};

impl Polygon<3> {
    fn projection(&self) -> &Projection {
        self.projection.get_or_init(|| {
            let plane = Plane::new_unchecked(self.points[0], newell_normal(&self.points));
            let polygon = plane.project_polygon(self);
            Box::new(Projection { plane, polygon })
        })
    }

    /// Supporting plane: through the first vertex, Newell normal.
    ///
    /// The normal follows the right-hand rule over the vertex order.
    #[must_use]
    pub fn plane(&self) -> Plane {
        self.projection().plane
    }

    /// Unit normal of the supporting plane.
    #[must_use]
    pub fn normal(&self) -> Vector3D {
        self.projection().plane.unit_normal()
    }

    /// The polygon in its plane's 2D frame (see [`Plane::project_point`]).
    #[must_use]
    pub fn projected(&self) -> &Polygon<2> {
        &self.projection().polygon
    }

    /// This polygon in `plane`'s 2D frame; borrowed from the cache when both
    /// planes drop the same axis.
    pub(crate) fn projected_in(&self, plane: &Plane) -> Cow<'_, Polygon<2>> {
        if plane.projection_axis() == self.plane().projection_axis() {
            Cow::Borrowed(self.projected())
        } else {
            Cow::Owned(plane.project_polygon(self))
        }
    }

    /// `true` if every vertex lies on the supporting plane.
    #[must_use]
    pub fn is_planar(&self) -> bool {
        let plane = self.plane();
        self.points.iter().all(|p| plane.contains_point(p))
    }

    #[must_use]
    pub fn is_convex(&self) -> bool {
        self.projected().is_convex()
    }

    /// Closed containment: on the plane and inside or on the boundary.
    #[must_use]
    pub fn contains_point(&self, point: &Point3D) -> bool {
        let plane = self.plane();
        plane.contains_point(point) && self.projected().contains_point(&plane.project_point(point))
    }

    /// Ear-clipping triangulation of the projected ring, cached.
    #[must_use]
    pub fn triangles(&self) -> &[Polygon<3>] {
        self.triangles.get_or_init(|| {
            triangulate::ear_clip(self.projected().points())
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
    /// Returns [`crate::error::GeometryError::DegenerateInput`] for a zero
    /// direction and [`crate::error::OperationError::Unsupported`] for a
    /// polygon not known to be simple.
    pub fn intersect_line(&self, line: &Line3D) -> Result<IntersectionSet<3>> {
        boolean::intersect_polygon_component_3d(self, line)
    }

    /// # Errors
    ///
    /// See [`Polygon::intersect_line`](Polygon3D::intersect_line).
    pub fn intersect_halfline(&self, halfline: &Halfline3D) -> Result<IntersectionSet<3>> {
        boolean::intersect_polygon_component_3d(self, halfline)
    }

    /// # Errors
    ///
    /// See [`Polygon::intersect_line`](Polygon3D::intersect_line).
    pub fn intersect_segment(&self, segment: &Segment3D) -> Result<IntersectionSet<3>> {
        boolean::intersect_polygon_component_3d(self, segment)
    }

    /// The part of the polygon on `plane`: itself when coplanar, otherwise
    /// the segments and points where the planes' common line crosses it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::OperationError::Unsupported`] for a polygon not
    /// known to be simple.
    pub fn intersect_plane(&self, plane: &Plane) -> Result<IntersectionSet<3>> {
        boolean::intersect_polygon_plane(self, plane)
    }

    /// Coplanar polygons intersect in 2D; parallel ones never meet; crossing
    /// ones meet along the planes' common line.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::OperationError::Unsupported`] if either polygon
    /// is not known to be simple.
    pub fn intersect_polygon(&self, other: &Polygon<3>) -> Result<IntersectionSet<3>> {
        boolean::intersect_polygons_3d(self, other)
    }

    /// # Errors
    ///
    /// Returns [`crate::error::OperationError::NotAdjacent`] for polygons on
    /// different planes, plus every error of the planar union.
    pub fn union_polygon(&self, other: &Polygon<3>) -> Result<Polygon<3>> {
        boolean::union_polygons_3d(self, other)
    }
}
