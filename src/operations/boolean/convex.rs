use std::cmp::Ordering;

use tracing::debug;

use crate::error::Result;
use crate::geometry::{Intersection, IntersectionSet, Polygon, Segment};
use crate::math::polygon_2d::{all_collinear, order_counterclockwise, remove_collinear_vertices};
use crate::math::Point2D;
use crate::operations::clip::clip_to_convex;
use crate::operations::segment_set::{consolidate, union_segments};

/// Intersection of two convex polygons.
///
/// Every edge of each polygon is clipped against the other; the clipped
/// pieces are exactly the boundary of the common region. Depending on how
/// many distinct vertices they span the result is empty, a point, a segment
/// or a convex polygon (marked as such).
///
/// # Errors
///
/// Fails only on degenerate input rings (zero-length edges).
pub fn intersect_convex(a: &Polygon<2>, b: &Polygon<2>) -> Result<Intersection<2>> {
    let (a_ccw, b_ccw) = (a.ccw(), b.ccw());
    let mut fragments = IntersectionSet::new();
    for edge in b_ccw.segments() {
        fragments.push(clip_to_convex(&edge, a_ccw.points())?)?;
    }
    for edge in a_ccw.segments() {
        fragments.push(clip_to_convex(&edge, b_ccw.points())?)?;
    }
    Ok(classify(&fragments))
}

fn classify(fragments: &IntersectionSet<2>) -> Intersection<2> {
    let segments = union_segments(fragments.segments());
    let mut vertices: Vec<Point2D> = Vec::new();
    let candidates = fragments
        .points()
        .iter()
        .copied()
        .chain(segments.iter().flat_map(Segment::points));
    for p in candidates {
        if !vertices.contains(&p) {
            vertices.push(p);
        }
    }

    match vertices.len() {
        0 => return Intersection::Empty,
        1 => return Intersection::Point(vertices[0]),
        _ => {}
    }
    if all_collinear(&vertices) {
        return extreme_segment(&vertices);
    }

    let ring = match consolidate(&segments).as_slice() {
        [single] if single.is_closed() => single.points().to_vec(),
        chains => {
            debug!(chains = chains.len(), "boundary pieces do not close, ordering by angle");
            order_counterclockwise(&vertices)
        }
    };
    let ring = remove_collinear_vertices(&ring);
    match Polygon::new(ring) {
        Ok(region) => Intersection::Polygon(region.ccw().clone().with_known_convex(true)),
        Err(err) => {
            debug!(%err, "region collapsed, keeping its extent");
            extreme_segment(&vertices)
        }
    }
}

/// Segment between the lexicographically smallest and largest vertices.
fn extreme_segment(vertices: &[Point2D]) -> Intersection<2> {
    let by_order = |x: &&Point2D, y: &&Point2D| x.partial_cmp(y).unwrap_or(Ordering::Equal);
    let lo = vertices.iter().min_by(by_order);
    let hi = vertices.iter().max_by(by_order);
    let (Some(lo), Some(hi)) = (lo, hi) else {
        return Intersection::Empty;
    };
    Segment::new(*lo, *hi).map_or(Intersection::Point(*lo), Intersection::Segment)
}
