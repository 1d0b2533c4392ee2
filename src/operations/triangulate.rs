//! Ear-clipping triangulation of simple polygons.
//!
//! An ear is three consecutive ring vertices `(prev, cur, next)` where `cur`
//! turns the same way as the ring and no other ring vertex lies inside or on
//! the triangle. Ears are cut one at a time until three vertices remain.
//! Vertices where the ring runs straight through form zero-area ears; they
//! are dropped without emitting a triangle.

use tracing::{trace, warn};

use crate::math::polygon_2d::signed_area_2d;
use crate::math::{Point2D, TOLERANCE};

/// Triangulates a simple ring of either orientation.
///
/// Returns index triples into `points`; every triangle keeps the ring's
/// orientation. A ring of `n` vertices with no straight-through vertices
/// yields `n - 2` triangles.
#[must_use]
pub fn ear_clip(points: &[Point2D]) -> Vec<[usize; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }
    let orientation = if signed_area_2d(points) < 0.0 { -1.0 } else { 1.0 };

    let mut ring: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);
    let mut cursor = 0;
    let mut misses = 0;

    while ring.len() > 3 {
        let m = ring.len();
        cursor %= m;
        let tri = corner(&ring, cursor);

        match classify(points, &ring, tri, orientation, Boundary::Blocks) {
            Ear::Valid => {
                trace!(prev = tri[0], cur = tri[1], next = tri[2], "clipping ear");
                triangles.push(tri);
                ring.remove(cursor);
                misses = 0;
            }
            Ear::Flat => {
                trace!(cur = tri[1], "dropping straight-through vertex");
                ring.remove(cursor);
                misses = 0;
            }
            Ear::Blocked => {
                cursor += 1;
                misses += 1;
                if misses < m {
                    continue;
                }
                // Every ear touches another vertex. Accept one whose interior
                // is clear, else the ring is not simple and a cut is forced.
                let relaxed = (0..m).find(|&i| {
                    classify(points, &ring, corner(&ring, i), orientation, Boundary::Allowed)
                        == Ear::Valid
                });
                let pos = relaxed.unwrap_or_else(|| {
                    let forced = sharpest_vertex(points, &ring, orientation);
                    warn!(
                        remaining = m,
                        vertex = ring[forced],
                        "no valid ear found, forcing a cut"
                    );
                    forced
                });
                triangles.push(corner(&ring, pos));
                ring.remove(pos);
                cursor = pos;
                misses = 0;
            }
        }
    }

    let last = [ring[0], ring[1], ring[2]];
    if turn(points, last) * orientation > 0.0 {
        triangles.push(last);
    }
    triangles
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ear {
    Valid,
    Flat,
    Blocked,
}

/// Whether a vertex on an ear's boundary disqualifies the ear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Blocks,
    Allowed,
}

/// The ring corner at position `i` as `[prev, cur, next]` point indices.
fn corner(ring: &[usize], i: usize) -> [usize; 3] {
    let m = ring.len();
    [ring[(i + m - 1) % m], ring[i], ring[(i + 1) % m]]
}

/// Twice the signed area of triangle `(a, b, c)`.
fn turn(points: &[Point2D], [a, b, c]: [usize; 3]) -> f64 {
    (points[b] - points[a]).perp_product(&(points[c] - points[a]))
}

fn classify(
    points: &[Point2D],
    ring: &[usize],
    tri: [usize; 3],
    orientation: f64,
    boundary: Boundary,
) -> Ear {
    let [prev, cur, next] = tri;
    let (a, b, c) = (points[prev], points[cur], points[next]);
    let base = (c - a).length();
    let cross = turn(points, tri) * orientation;

    // Height of `b` over the base `a-c`.
    if base < TOLERANCE || cross.abs() / base < TOLERANCE {
        return Ear::Flat;
    }
    if cross < 0.0 {
        return Ear::Blocked;
    }

    let blocked = ring.iter().any(|&k| {
        if k == prev || k == cur || k == next {
            return false;
        }
        let q = points[k];
        // Touching rings can repeat a vertex position.
        if q == a || q == b || q == c {
            return false;
        }
        in_triangle(&q, &a, &b, &c, orientation, boundary)
    });
    if blocked {
        Ear::Blocked
    } else {
        Ear::Valid
    }
}

/// Point-in-triangle test for a triangle oriented like the ring.
fn in_triangle(
    q: &Point2D,
    a: &Point2D,
    b: &Point2D,
    c: &Point2D,
    orientation: f64,
    boundary: Boundary,
) -> bool {
    let margin = match boundary {
        Boundary::Blocks => -TOLERANCE,
        Boundary::Allowed => TOLERANCE,
    };
    [(a, b), (b, c), (c, a)].iter().all(|(from, to)| {
        let edge = **to - **from;
        let side = edge.perp_product(&(*q - **from)) * orientation;
        side / edge.length() > margin
    })
}

/// Ring position of the convex vertex with the largest turn, or 0.
fn sharpest_vertex(points: &[Point2D], ring: &[usize], orientation: f64) -> usize {
    (0..ring.len())
        .map(|i| (i, turn(points, corner(ring, i)) * orientation))
        .max_by(|x, y| x.1.total_cmp(&y.1))
        .map_or(0, |(i, _)| i)
}
