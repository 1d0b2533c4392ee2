use tracing::debug;

use crate::error::Result;
use crate::geometry::{Intersection, IntersectionSet, Linear, Polygon, Segment};
use crate::operations::clip::clip_to_convex;
use crate::operations::segment_set::union_segments;

use super::union::union_polygons;

/// Collapses point and segment fragments into a minimal set: overlapping
/// collinear segments merge and points lying on a segment disappear.
/// Polygons pass through untouched.
///
/// # Errors
///
/// Returns [`crate::error::OperationError::Unsupported`] if a fragment is a
/// line or halfline.
pub fn merge_linear<const D: usize>(fragments: Vec<Intersection<D>>) -> Result<IntersectionSet<D>> {
    let mut collected = IntersectionSet::new();
    for fragment in fragments {
        collected.push(fragment)?;
    }
    let (points, segments, polygons) = collected.into_parts();
    let segments = union_segments(&segments);

    let mut merged = IntersectionSet::new();
    for polygon in polygons {
        merged.push(Intersection::Polygon(polygon))?;
    }
    for segment in &segments {
        merged.push(Intersection::Segment(*segment))?;
    }
    for point in points {
        if !segments.iter().any(|s| s.contains_point(&point)) {
            merged.push(Intersection::Point(point))?;
        }
    }
    Ok(merged)
}

/// Recombines the pieces of a piecewise polygon intersection.
///
/// Segments and points covered by a region are dropped, and regions sharing
/// an edge are merged into one polygon where the union is a single simple
/// ring.
///
/// # Errors
///
/// Returns [`crate::error::OperationError::Unsupported`] if a fragment is a
/// line or halfline.
pub fn recombine(fragments: Vec<Intersection<2>>) -> Result<IntersectionSet<2>> {
    let mut collected = IntersectionSet::new();
    for fragment in fragments {
        collected.push(fragment)?;
    }
    let (points, segments, regions) = collected.into_parts();

    let mut uncovered = Vec::new();
    for segment in union_segments(&segments) {
        let mut pieces = vec![segment];
        for region in &regions {
            pieces = subtract_region(&pieces, region)?;
            if pieces.is_empty() {
                break;
            }
        }
        uncovered.extend(pieces);
    }
    let uncovered = union_segments(&uncovered);

    let points: Vec<_> = points
        .into_iter()
        .filter(|p| !regions.iter().any(|r| r.contains_point(p)))
        .filter(|p| !uncovered.iter().any(|s| s.contains_point(p)))
        .collect();

    let mut result = IntersectionSet::new();
    for region in merge_regions(regions) {
        result.push(Intersection::Polygon(region))?;
    }
    for segment in uncovered {
        result.push(Intersection::Segment(segment))?;
    }
    for point in points {
        result.push(Intersection::Point(point))?;
    }
    Ok(result)
}

/// Parts of `pieces` outside a convex region.
fn subtract_region(pieces: &[Segment<2>], region: &Polygon<2>) -> Result<Vec<Segment<2>>> {
    let ring = region.ccw().points();
    let mut remaining = Vec::with_capacity(pieces.len());
    for piece in pieces {
        match clip_to_convex(piece, ring)? {
            Intersection::Segment(covered) => remaining.extend(piece.difference_segment(&covered)),
            _ => remaining.push(*piece),
        }
    }
    Ok(remaining)
}

/// Repeatedly unions pairs of regions until no pair shares an edge.
fn merge_regions(mut regions: Vec<Polygon<2>>) -> Vec<Polygon<2>> {
    let mut i = 0;
    while i < regions.len() {
        let mut merged = false;
        for j in i + 1..regions.len() {
            match union_polygons(&regions[i], &regions[j]) {
                Ok(joined) => {
                    regions.swap_remove(j);
                    regions[i] = joined;
                    merged = true;
                    break;
                }
                Err(err) => debug!(%err, i, j, "regions stay separate"),
            }
        }
        if !merged {
            i += 1;
        }
    }
    regions
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::OperationError;
    use crate::geometry::{Line2D, Segment2D};
    use crate::math::{Point2D, Vector2D};
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Intersection<2> {
        Intersection::Segment(Segment2D::new(p(x0, y0), p(x1, y1)).unwrap())
    }

    fn tri(a: Point2D, b: Point2D, c: Point2D) -> Intersection<2> {
        Intersection::Polygon(Polygon::new(vec![a, b, c]).unwrap().with_known_convex(true))
    }

    #[test]
    fn linear_fragments_merge() {
        let set = merge_linear(vec![
            seg(0.0, 0.0, 1.0, 0.0),
            seg(1.0, 0.0, 2.0, 0.0),
            Intersection::Point(p(1.5, 0.0)),
            Intersection::Point(p(5.0, 5.0)),
            Intersection::Empty,
        ])
        .unwrap();
        assert_eq!(set.segments(), &[Segment2D::new(p(0.0, 0.0), p(2.0, 0.0)).unwrap()]);
        assert_eq!(set.points(), &[p(5.0, 5.0)]);
    }

    #[test]
    fn unbounded_fragments_are_refused() {
        let line = Intersection::Line(Line2D::new(p(0.0, 0.0), Vector2D::new(1.0, 0.0)));
        assert!(matches!(
            merge_linear(vec![line]),
            Err(crate::PolykernError::Operation(OperationError::Unsupported(_)))
        ));
    }

    #[test]
    fn adjacent_triangles_become_one_region() {
        let set = recombine(vec![
            tri(p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)),
            tri(p(0.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)),
            seg(0.0, 0.0, 1.0, 1.0),
            Intersection::Point(p(1.0, 0.0)),
        ])
        .unwrap();
        assert_eq!(set.len(), 1);
        let square = &set.polygons()[0];
        assert_eq!(square.vertex_count(), 4);
        assert_abs_diff_eq!(square.area(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn segments_outside_regions_survive() {
        let set = recombine(vec![
            tri(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)),
            seg(-1.0, 0.0, 0.5, 0.0),
            Intersection::Point(p(3.0, 3.0)),
        ])
        .unwrap();
        assert_eq!(set.polygons().len(), 1);
        assert_eq!(set.segments(), &[Segment2D::new(p(-1.0, 0.0), p(0.0, 0.0)).unwrap()]);
        assert_eq!(set.points(), &[p(3.0, 3.0)]);
    }

    #[test]
    fn corner_touching_regions_stay_apart() {
        let set = recombine(vec![
            tri(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)),
            tri(p(1.0, 0.0), p(2.0, 0.0), p(2.0, 1.0)),
        ])
        .unwrap();
        assert_eq!(set.polygons().len(), 2);
    }
}
