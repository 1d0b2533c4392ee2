use tracing::debug;

use crate::error::Result;
use crate::geometry::{IntersectionSet, Polygon};

use super::convex::intersect_convex;
use super::recombine::recombine;

/// Intersection of two simple polygons through their convex pieces.
///
/// A polygon known to be convex is its own single piece; any other is split
/// into its triangles. Every pair of pieces is intersected directly and the
/// fragments are recombined.
///
/// # Errors
///
/// Fails on degenerate triangles produced from a malformed ring.
pub fn intersect_simple(a: &Polygon<2>, b: &Polygon<2>) -> Result<IntersectionSet<2>> {
    let pieces_a = convex_pieces(a);
    let pieces_b = convex_pieces(b);
    debug!(pieces_a = pieces_a.len(), pieces_b = pieces_b.len(), "intersecting convex pieces");

    let mut fragments = Vec::with_capacity(pieces_a.len() * pieces_b.len());
    for piece_a in &pieces_a {
        for piece_b in &pieces_b {
            let fragment = intersect_convex(piece_a, piece_b)?;
            if !fragment.is_empty() {
                fragments.push(fragment);
            }
        }
    }
    recombine(fragments)
}

fn convex_pieces(polygon: &Polygon<2>) -> Vec<&Polygon<2>> {
    if polygon.is_known_convex() {
        vec![polygon]
    } else {
        polygon.triangles().iter().collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Segment2D;
    use crate::math::Point2D;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<2> {
        Polygon::new(vec![p(x0, y0), p(x1, y0), p(x1, y1), p(x0, y1)]).unwrap()
    }

    fn l_shape() -> Polygon<2> {
        Polygon::new(vec![
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 2.0),
            p(0.0, 2.0),
        ])
        .unwrap()
    }

    #[test]
    fn squares_sharing_an_edge_meet_in_a_segment() {
        let set = intersect_simple(&rect(0.0, 0.0, 1.0, 1.0), &rect(1.0, 0.0, 2.0, 1.0)).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.segments(), &[Segment2D::new(p(1.0, 0.0), p(1.0, 1.0)).unwrap()]);
    }

    #[test]
    fn overlapping_squares_give_one_region() {
        let set = intersect_simple(&rect(0.0, 0.0, 2.0, 2.0), &rect(1.0, 1.0, 3.0, 3.0)).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.polygons()[0], rect(1.0, 1.0, 2.0, 2.0));
    }

    #[test]
    fn bar_across_a_notch() {
        // The bar spans both prongs and dips into the notch between them.
        let bar = rect(0.5, 0.5, 2.5, 1.5).with_known_convex(true);
        let u = Polygon::new(vec![
            p(0.0, 0.0),
            p(3.0, 0.0),
            p(3.0, 2.0),
            p(2.0, 2.0),
            p(2.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 2.0),
            p(0.0, 2.0),
        ])
        .unwrap();
        let set = intersect_simple(&u, &bar).unwrap();
        let total: f64 = set.polygons().iter().map(Polygon::area).sum();
        // Bar area 2 minus the notch part [1,2]x[1,1.5].
        assert_abs_diff_eq!(total, 1.5, epsilon = 1e-9);
        assert!(set.segments().is_empty());
        assert!(set.points().is_empty());
    }

    #[test]
    fn l_shapes_overlap_in_their_corner() {
        let shifted: Vec<Point2D> = l_shape()
            .points()
            .iter()
            .map(|q| p(q.x() + 0.5, q.y() + 0.5))
            .collect();
        let other = Polygon::new(shifted).unwrap();
        let set = intersect_simple(&l_shape(), &other).unwrap();
        let total: f64 = set.polygons().iter().map(Polygon::area).sum();
        // [0.5,2]x[0.5,1] plus [0.5,1]x[1,2].
        assert_abs_diff_eq!(total, 0.75 + 0.5, epsilon = 1e-9);
    }
}
