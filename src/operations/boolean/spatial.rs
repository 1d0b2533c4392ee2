//! 3D polygon operations, reduced to the plane of one polygon.
//!
//! Coplanar operands are projected into the first polygon's 2D frame, handled
//! by the planar algorithms and lifted back. Operands crossing the plane meet
//! it along a line, which is then clipped against both polygons.

use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::plane::LinePlaneRelation;
use crate::geometry::{
    Halfline2D, Halfline3D, Intersection, IntersectionSet, Line2D, Line3D, Linear, Plane,
    PlaneIntersection, Polygon, Segment2D, Segment3D,
};
use crate::math::TOLERANCE;

use super::{
    intersect_polygon_component, intersect_polygons, merge_linear, require_simple, union_polygons,
};

/// A 3D linear component that can be carried into a plane's 2D frame with its
/// parameterisation intact.
pub(crate) trait Planar: Linear<3> {
    type Projected: Linear<2>;

    fn project_onto(&self, plane: &Plane) -> Result<Self::Projected>;
}

impl Planar for Line3D {
    type Projected = Line2D;

    fn project_onto(&self, plane: &Plane) -> Result<Line2D> {
        Ok(plane.project_line(self))
    }
}

impl Planar for Halfline3D {
    type Projected = Halfline2D;

    fn project_onto(&self, plane: &Plane) -> Result<Halfline2D> {
        Ok(plane.project_halfline(self))
    }
}

impl Planar for Segment3D {
    type Projected = Segment2D;

    fn project_onto(&self, plane: &Plane) -> Result<Segment2D> {
        plane.project_segment(self)
    }
}

pub(crate) fn intersect_polygon_component_3d<L: Planar>(
    polygon: &Polygon<3>,
    component: &L,
) -> Result<IntersectionSet<3>> {
    require_simple(polygon)?;
    let plane = polygon.plane();
    let mut set = IntersectionSet::new();
    match plane.relate(component)? {
        LinePlaneRelation::Parallel => {}
        LinePlaneRelation::Point { point, t } => {
            let slack = TOLERANCE / component.direction().length();
            if component.domain().contains(t, slack) && polygon.contains_point(&point) {
                set.push(Intersection::Point(point))?;
            }
        }
        LinePlaneRelation::OnPlane => {
            let planar = component.project_onto(&plane)?;
            let hits = intersect_polygon_component(polygon.projected(), &planar)?;
            set = plane.lift_set(&hits);
        }
    }
    Ok(set)
}

pub(crate) fn intersect_polygon_plane(
    polygon: &Polygon<3>,
    plane: &Plane,
) -> Result<IntersectionSet<3>> {
    require_simple(polygon)?;
    match polygon.plane().intersect_plane(plane)? {
        PlaneIntersection::Empty => Ok(IntersectionSet::new()),
        PlaneIntersection::Plane(_) => {
            let mut set = IntersectionSet::new();
            set.push(Intersection::Polygon(polygon.clone()))?;
            Ok(set)
        }
        PlaneIntersection::Line(line) => intersect_polygon_component_3d(polygon, &line),
    }
}

pub(crate) fn intersect_polygons_3d(a: &Polygon<3>, b: &Polygon<3>) -> Result<IntersectionSet<3>> {
    require_simple(a)?;
    require_simple(b)?;
    let plane_a = a.plane();
    match plane_a.intersect_plane(&b.plane())? {
        PlaneIntersection::Empty => {
            debug!("polygons lie on parallel planes");
            Ok(IntersectionSet::new())
        }
        PlaneIntersection::Plane(_) => {
            let hits = intersect_polygons(a.projected(), &b.projected_in(&plane_a))?;
            Ok(plane_a.lift_set(&hits))
        }
        PlaneIntersection::Line(line) => {
            let on_a = intersect_polygon_component_3d(a, &line)?;
            let mut fragments = Vec::new();
            for segment in on_a.segments() {
                fragments.extend(b.intersect_segment(segment)?.iter());
            }
            for point in on_a.points() {
                if b.contains_point(point) {
                    fragments.push(Intersection::Point(*point));
                }
            }
            merge_linear(fragments)
        }
    }
}

pub(crate) fn union_polygons_3d(a: &Polygon<3>, b: &Polygon<3>) -> Result<Polygon<3>> {
    let plane_a = a.plane();
    match plane_a.intersect_plane(&b.plane())? {
        PlaneIntersection::Plane(_) => {
            let union = union_polygons(a.projected(), &b.projected_in(&plane_a))?;
            Ok(plane_a.lift_polygon(&union))
        }
        _ => Err(OperationError::NotAdjacent("polygons are not coplanar".into()).into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::error::OperationError;
    use crate::geometry::{Halfline3D, Intersection, Line3D, Plane, Polygon, Segment3D};
    use crate::math::{Point3D, Vector3D};
    use crate::PolykernError;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3D {
        Point3D::new(x, y, z)
    }

    fn v(x: f64, y: f64, z: f64) -> Vector3D {
        Vector3D::new(x, y, z)
    }

    fn floor(x0: f64, y0: f64, x1: f64, y1: f64, z: f64) -> Polygon<3> {
        Polygon::new(vec![p(x0, y0, z), p(x1, y0, z), p(x1, y1, z), p(x0, y1, z)]).unwrap()
    }

    /// Square in the plane x = 1 spanning y in [-1, 3] and z in [-1, 1].
    fn wall() -> Polygon<3> {
        Polygon::new(vec![
            p(1.0, -1.0, -1.0),
            p(1.0, 3.0, -1.0),
            p(1.0, 3.0, 1.0),
            p(1.0, -1.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn line_piercing_a_polygon() {
        let square = floor(0.0, 0.0, 2.0, 2.0, 0.0);
        let hit = square.intersect_line(&Line3D::new(p(1.0, 1.0, -5.0), v(0.0, 0.0, 1.0))).unwrap();
        assert_eq!(hit.points(), &[p(1.0, 1.0, 0.0)]);

        let outside = Line3D::new(p(3.0, 1.0, -5.0), v(0.0, 0.0, 1.0));
        let miss = square.intersect_line(&outside).unwrap();
        assert!(miss.is_empty());

        let short = Segment3D::new(p(1.0, 1.0, -5.0), p(1.0, 1.0, -1.0)).unwrap();
        assert!(square.intersect_segment(&short).unwrap().is_empty());
    }

    #[test]
    fn halfline_hits_count_the_crossing() {
        let square = floor(0.0, 0.0, 2.0, 2.0, 0.0);
        let up = Halfline3D::new(p(1.0, 1.0, -5.0), v(0.0, 0.0, 1.0));
        assert_eq!(square.intersect_halfline(&up).unwrap().points(), &[p(1.0, 1.0, 0.0)]);

        let from_the_face = Halfline3D::new(p(1.0, 1.0, 0.0), v(0.0, 0.0, 1.0));
        assert_eq!(square.intersect_halfline(&from_the_face).unwrap().len(), 1);

        let away = Halfline3D::new(p(1.0, 1.0, -5.0), v(0.0, 0.0, -1.0));
        assert!(square.intersect_halfline(&away).unwrap().is_empty());

        let beside = Halfline3D::new(p(3.0, 1.0, -5.0), v(0.0, 0.0, 1.0));
        assert!(square.intersect_halfline(&beside).unwrap().is_empty());

        let above = Halfline3D::new(p(-1.0, 1.0, 1.0), v(1.0, 0.0, 0.0));
        assert!(square.intersect_halfline(&above).unwrap().is_empty());
    }

    #[test]
    fn halfline_in_the_polygon_plane() {
        let square = floor(0.0, 0.0, 2.0, 2.0, 0.0);
        let ray = Halfline3D::new(p(1.0, 1.0, 0.0), v(1.0, 0.0, 0.0));
        let hit = square.intersect_halfline(&ray).unwrap();
        assert_eq!(hit.segments(), &[Segment3D::new(p(1.0, 1.0, 0.0), p(2.0, 1.0, 0.0)).unwrap()]);
        assert!(hit.points().is_empty());
    }

    #[test]
    fn segment_in_the_polygon_plane() {
        let square = floor(0.0, 0.0, 2.0, 2.0, 1.0);
        let seg = Segment3D::new(p(-1.0, 1.0, 1.0), p(1.0, 1.0, 1.0)).unwrap();
        let hit = square.intersect_segment(&seg).unwrap();
        assert_eq!(hit.segments(), &[Segment3D::new(p(0.0, 1.0, 1.0), p(1.0, 1.0, 1.0)).unwrap()]);
    }

    #[test]
    fn polygon_against_planes() {
        let square = floor(0.0, 0.0, 2.0, 2.0, 0.0);
        let across = Plane::new(p(1.0, 0.0, 0.0), v(1.0, 0.0, 0.0)).unwrap();
        let cut = square.intersect_plane(&across).unwrap();
        assert_eq!(cut.segments(), &[Segment3D::new(p(1.0, 0.0, 0.0), p(1.0, 2.0, 0.0)).unwrap()]);

        let own = Plane::new(p(5.0, 5.0, 0.0), v(0.0, 0.0, -2.0)).unwrap();
        let same = square.intersect_plane(&own).unwrap();
        assert_eq!(same.polygons(), &[square.clone()]);

        let lifted = Plane::new(p(0.0, 0.0, 1.0), v(0.0, 0.0, 1.0)).unwrap();
        let above = square.intersect_plane(&lifted).unwrap();
        assert!(above.is_empty());
    }

    #[test]
    fn coplanar_polygons_share_an_edge() {
        let a = floor(0.0, 0.0, 1.0, 1.0, 2.0);
        let b = floor(1.0, 0.0, 2.0, 1.0, 2.0);
        let set = a.intersect_polygon(&b).unwrap();
        assert_eq!(
            set.as_single(),
            Some(Intersection::Segment(Segment3D::new(p(1.0, 0.0, 2.0), p(1.0, 1.0, 2.0)).unwrap()))
        );
    }

    #[test]
    fn crossing_polygons_meet_along_a_segment() {
        let set = floor(0.0, 0.0, 2.0, 2.0, 0.0).intersect_polygon(&wall()).unwrap();
        assert_eq!(
            set.as_single(),
            Some(Intersection::Segment(Segment3D::new(p(1.0, 0.0, 0.0), p(1.0, 2.0, 0.0)).unwrap()))
        );
    }

    #[test]
    fn parallel_polygons_never_meet() {
        let set = floor(0.0, 0.0, 1.0, 1.0, 0.0)
            .intersect_polygon(&floor(0.0, 0.0, 1.0, 1.0, 1.0))
            .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn coplanar_union_is_lifted() {
        let union = floor(0.0, 0.0, 1.0, 1.0, 3.0)
            .union_polygon(&floor(1.0, 0.0, 2.0, 1.0, 3.0))
            .unwrap();
        assert_eq!(union, floor(0.0, 0.0, 2.0, 1.0, 3.0));
        assert_abs_diff_eq!(union.area(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn union_across_planes_is_not_adjacent() {
        assert!(matches!(
            floor(0.0, 0.0, 2.0, 2.0, 0.0).union_polygon(&wall()),
            Err(PolykernError::Operation(OperationError::NotAdjacent(_)))
        ));
    }
}
