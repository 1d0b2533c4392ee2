//! Point-in-polygon classification by winding number.

use crate::geometry::{Linear, Segment};
use crate::math::{Point2D, TOLERANCE};

/// Winding number of the closed ring `vertices` around `point`.
///
/// Upward edges passing strictly right of the point count `+1`, downward
/// edges passing strictly left count `-1`. A point within tolerance of an
/// edge's line counts as on it and contributes nothing, so boundary points
/// get an asymmetric answer (left and bottom edges inside, top and right
/// edges outside). Non-zero means inside.
#[must_use]
pub fn winding_number(point: &Point2D, vertices: &[Point2D]) -> i32 {
    let n = vertices.len();
    let mut winding = 0i32;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        if a.y() <= point.y() {
            if b.y() > point.y() && side(&a, &b, point) > 0.0 {
                winding += 1;
            }
        } else if b.y() <= point.y() && side(&a, &b, point) < 0.0 {
            winding -= 1;
        }
    }
    winding
}

/// Which side of the directed edge `a → b` the point lies on: positive to
/// the left, negative to the right, zero within tolerance of the line.
fn side(a: &Point2D, b: &Point2D, point: &Point2D) -> f64 {
    let edge = *b - *a;
    let cross = edge.perp_product(&(*point - *b));
    if cross.abs() < TOLERANCE * edge.length() {
        0.0
    } else {
        cross
    }
}

/// `true` if `point` lies on one of the ring's edges.
#[must_use]
pub fn on_boundary(point: &Point2D, vertices: &[Point2D]) -> bool {
    let n = vertices.len();
    (0..n).any(|i| Segment::new_unchecked(vertices[i], vertices[(i + 1) % n]).contains_point(point))
}

/// Closed containment: on the boundary or a non-zero winding number.
#[must_use]
pub fn contains(point: &Point2D, vertices: &[Point2D]) -> bool {
    on_boundary(point, vertices) || winding_number(point, vertices) != 0
}
