use std::cmp::Ordering;
use std::f64::consts::PI;

use super::{Point, Point2D, TOLERANCE};

/// Computes the signed area of a closed ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2D]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x() * points[j].y() - points[j].x() * points[i].y();
    }
    sum * 0.5
}

/// Returns `true` if the closed ring turns consistently in one direction and
/// winds exactly once.
///
/// Collinear consecutive vertices are tolerated.
#[must_use]
pub fn is_convex_ring(points: &[Point2D]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut sign = 0.0_f64;
    let mut turning = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let e1 = b - a;
        let e2 = c - b;
        let cross = e1.perp_product(&e2);
        if cross.abs() > TOLERANCE {
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        turning += cross.atan2(e1.dot(&e2));
    }
    sign != 0.0 && (turning.abs() - 2.0 * PI).abs() < 1e-6
}

/// Returns `true` if every point lies on one line (or there are fewer than 3).
#[must_use]
pub fn all_collinear<const D: usize>(points: &[Point<D>]) -> bool {
    let Some(first) = points.first() else {
        return true;
    };
    // Anchor the line on the point farthest from the first.
    let Some(far) = points
        .iter()
        .max_by(|a, b| {
            first
                .distance_to_point(a)
                .partial_cmp(&first.distance_to_point(b))
                .unwrap_or(Ordering::Equal)
        })
    else {
        return true;
    };
    let dir = *far - *first;
    if dir.is_zero() {
        return true;
    }
    let len = dir.length();
    points
        .iter()
        .all(|p| (*p - *first).wedge_norm(&dir) / len < TOLERANCE)
}

/// Unsigned area enclosed by a planar closed ring in any dimension.
///
/// Sums the exterior products of consecutive vertices (relative to the first)
/// and takes the norm of the resulting bivector, so a 2D ring yields
/// `|signed_area_2d|` and a 3D ring half the length of its Newell normal.
#[must_use]
pub fn enclosed_area<const D: usize>(points: &[Point<D>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let anchor = points[0];
    let mut sum_sq = 0.0;
    for a in 0..D {
        for b in (a + 1)..D {
            let mut component = 0.0;
            for i in 1..n - 1 {
                let u = points[i] - anchor;
                let w = points[i + 1] - anchor;
                component += u[a] * w[b] - u[b] * w[a];
            }
            sum_sq += component * component;
        }
    }
    0.5 * sum_sq.sqrt()
}

/// Removes vertices of a closed ring that lie on the line through their
/// neighbours, and consecutive duplicates.
#[must_use]
pub fn remove_collinear_vertices<const D: usize>(points: &[Point<D>]) -> Vec<Point<D>> {
    let mut ring: Vec<Point<D>> = Vec::with_capacity(points.len());
    for p in points {
        if ring.last() != Some(p) {
            ring.push(*p);
        }
    }
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }

    let mut changed = true;
    while changed && ring.len() > 3 {
        changed = false;
        let n = ring.len();
        for i in 0..n {
            let prev = ring[(i + n - 1) % n];
            let next = ring[(i + 1) % n];
            // Only straight-through vertices go; spikes (direction reversal) stay.
            let straight = (ring[i] - prev)
                .normalize()
                .ok()
                .zip((next - ring[i]).normalize().ok())
                .is_some_and(|(a, b)| a.is_codirectional(&b));
            if straight {
                ring.remove(i);
                changed = true;
                break;
            }
        }
    }
    ring
}

/// Orders points counter-clockwise by angle around their mean.
///
/// Only meaningful for the vertex set of a convex region.
#[must_use]
pub fn order_counterclockwise(points: &[Point2D]) -> Vec<Point2D> {
    let Some(center) = Point2D::mean(points) else {
        return Vec::new();
    };
    let mut ordered = points.to_vec();
    ordered.sort_by(|a, b| {
        let ta = (a.y() - center.y()).atan2(a.x() - center.x());
        let tb = (b.y() - center.y()).atan2(b.x() - center.x());
        ta.partial_cmp(&tb).unwrap_or(Ordering::Equal)
    });
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    fn unit_square() -> Vec<Point2D> {
        vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]
    }

    #[test]
    fn signed_area_ccw_square() {
        assert_abs_diff_eq!(signed_area_2d(&unit_square()), 1.0);
    }

    #[test]
    fn signed_area_cw_square() {
        let mut pts = unit_square();
        pts.reverse();
        assert_abs_diff_eq!(signed_area_2d(&pts), -1.0);
    }

    #[test]
    fn signed_area_degenerate() {
        assert_abs_diff_eq!(signed_area_2d(&[p(0.0, 0.0)]), 0.0);
        assert_abs_diff_eq!(signed_area_2d(&[]), 0.0);
    }

    #[test]
    fn enclosed_area_matches_shoelace_and_newell() {
        let mut pts = unit_square();
        assert_abs_diff_eq!(enclosed_area(&pts), 1.0, epsilon = 1e-12);
        pts.reverse();
        assert_abs_diff_eq!(enclosed_area(&pts), 1.0, epsilon = 1e-12);

        let tri = [
            crate::math::Point3D::new(0.0, 0.0, 0.0),
            crate::math::Point3D::new(4.0, 0.0, 0.0),
            crate::math::Point3D::new(0.0, 3.0, 3.0),
        ];
        assert_abs_diff_eq!(enclosed_area(&tri), 72.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn convexity() {
        assert!(is_convex_ring(&unit_square()));
        let mut cw = unit_square();
        cw.reverse();
        assert!(is_convex_ring(&cw));
        let l_shape = vec![
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 2.0),
            p(0.0, 2.0),
        ];
        assert!(!is_convex_ring(&l_shape));
        // A pentagram turns one way throughout but winds twice.
        let star: Vec<Point2D> = (0..5)
            .map(|k| {
                let a = f64::from(k) * 4.0 * PI / 5.0;
                p(a.cos(), a.sin())
            })
            .collect();
        assert!(!is_convex_ring(&star));
    }

    #[test]
    fn collinear_detection() {
        assert!(all_collinear(&[p(0.0, 0.0), p(1.0, 1.0), p(3.0, 3.0)]));
        assert!(!all_collinear(&[p(0.0, 0.0), p(1.0, 1.0), p(3.0, 3.1)]));
    }

    #[test]
    fn removes_straight_vertices() {
        let ring = vec![
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 2.0),
            p(0.0, 2.0),
            p(0.0, 1.0),
        ];
        let cleaned = remove_collinear_vertices(&ring);
        assert_eq!(cleaned, vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)]);
    }

    #[test]
    fn orders_around_center() {
        let ordered = order_counterclockwise(&[p(1.0, 1.0), p(0.0, 0.0), p(0.0, 1.0), p(1.0, 0.0)]);
        assert!(signed_area_2d(&ordered) > 0.0);
        assert_eq!(ordered.len(), 4);
    }
}
