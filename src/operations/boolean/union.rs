use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::{Intersection, Linear, Polygon, Segment};
use crate::math::polygon_2d::remove_collinear_vertices;
use crate::math::TOLERANCE;
use crate::operations::segment_set::{consolidate, difference_segment_sequences};

use super::require_simple;

/// Union of two simple polygons that overlap or share an edge.
///
/// Each boundary loses the parts running inside the other polygon and the
/// edges the two share; what is left is stitched into the outline of the
/// union. Identical polygons return a copy of the first.
///
/// # Errors
///
/// - [`OperationError::Unsupported`] if either polygon is not known to be
///   simple, or the outline does not close into a single loop (holes,
///   several components).
/// - [`OperationError::NotAdjacent`] if one polygon contains the other, or
///   the two are disjoint or meet only at points.
pub fn union_polygons(a: &Polygon<2>, b: &Polygon<2>) -> Result<Polygon<2>> {
    require_simple(a)?;
    require_simple(b)?;
    if a == b {
        return Ok(a.clone());
    }
    let (a, b) = (a.ccw(), b.ccw());
    let (edges_a, edges_b) = (a.segments(), b.segments());

    // Shared edges run in opposite directions and vanish from both sides;
    // edges overlapping in the same direction are kept once, on A's side.
    let rest_a: Vec<Segment<2>> = edges_a
        .iter()
        .flat_map(|s| s.difference_segments(&opposite_edges(s, &edges_b)))
        .collect();
    let rest_b = difference_segment_sequences(&edges_b, &edges_a);

    let outside_a = outside_parts(&rest_a, b)?;
    let outside_b = outside_parts(&rest_b, a)?;
    if outside_a.is_empty() || outside_b.is_empty() {
        return Err(OperationError::NotAdjacent("one polygon contains the other".into()).into());
    }

    let kept: f64 = outside_a.iter().chain(&outside_b).map(Segment::length).sum();
    if a.perimeter() + b.perimeter() - kept < TOLERANCE {
        return Err(
            OperationError::NotAdjacent("polygons share no edge and do not overlap".into()).into(),
        );
    }

    let pieces: Vec<Segment<2>> = outside_a.into_iter().chain(outside_b).collect();
    let loops = consolidate(&pieces);
    let [outline] = loops.as_slice() else {
        debug!(loops = loops.len(), "union outline falls apart");
        return Err(OperationError::Unsupported(format!(
            "union boundary forms {} pieces, expected one loop",
            loops.len()
        ))
        .into());
    };
    if !outline.is_closed() {
        return Err(OperationError::Unsupported("union boundary does not close".into()).into());
    }
    let union = Polygon::new(remove_collinear_vertices(outline.points()))?;
    Ok(union.ccw().clone())
}

/// Edges of `others` that overlap `segment` in the opposite direction.
fn opposite_edges(segment: &Segment<2>, others: &[Segment<2>]) -> Vec<Segment<2>> {
    let direction = segment.vector();
    others
        .iter()
        .filter(|e| e.is_collinear_with(segment) && e.vector().dot(&direction) < 0.0)
        .copied()
        .collect()
}

/// Splits `segments` where they meet `other`'s boundary and keeps the pieces
/// that do not run through its interior.
fn outside_parts(segments: &[Segment<2>], other: &Polygon<2>) -> Result<Vec<Segment<2>>> {
    let edges = other.segments();
    let mut kept = Vec::new();
    for segment in segments {
        let mut cuts = vec![0.0, 1.0];
        for edge in &edges {
            match segment.intersect_segment(edge)? {
                Intersection::Point(p) => cuts.push(segment.project_t(&p)),
                Intersection::Segment(overlap) => {
                    cuts.extend(overlap.points().iter().map(|p| segment.project_t(p)));
                }
                _ => {}
            }
        }
        cuts.sort_by(f64::total_cmp);
        cuts.dedup_by(|x, y| segment.point_at(*x) == segment.point_at(*y));

        for pair in cuts.windows(2) {
            let (from, to) = (segment.point_at(pair[0]), segment.point_at(pair[1]));
            let Ok(piece) = Segment::new(from, to) else {
                continue;
            };
            if !other.interior_contains_point(&piece.midpoint()) {
                kept.push(piece);
            }
        }
    }
    Ok(kept)
}
