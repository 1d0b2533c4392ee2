use super::{Point3D, Vector3D};

/// Newell's normal of a closed 3D ring.
///
/// Its length is twice the enclosed area and its direction follows the
/// right-hand rule over the vertex order. Robust for non-convex rings and
/// for rings with collinear runs.
#[must_use]
pub fn newell_normal(points: &[Point3D]) -> Vector3D {
    let n = points.len();
    let (mut nx, mut ny, mut nz) = (0.0, 0.0, 0.0);
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        nx += (a.y() - b.y()) * (a.z() + b.z());
        ny += (a.z() - b.z()) * (a.x() + b.x());
        nz += (a.x() - b.x()) * (a.y() + b.y());
    }
    Vector3D::new(nx, ny, nz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3D {
        Point3D::new(x, y, z)
    }

    #[test]
    fn unit_square_area() {
        let sq = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ];
        assert_abs_diff_eq!(0.5 * newell_normal(&sq).length(), 1.0, epsilon = 1e-12);
        assert_eq!(newell_normal(&sq), Vector3D::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn tilted_triangle_area() {
        let tri = vec![p(0.0, 0.0, 0.0), p(4.0, 0.0, 0.0), p(0.0, 3.0, 3.0)];
        // |(4,0,0) x (0,3,3)| / 2 = |(0,-12,12)| / 2
        assert_abs_diff_eq!(0.5 * newell_normal(&tri).length(), 72.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn reversed_ring_flips_normal() {
        let tri = vec![p(0.0, 0.0, 1.0), p(1.0, 0.0, 1.0), p(0.0, 1.0, 1.0)];
        let mut rev = tri.clone();
        rev.reverse();
        assert_eq!(newell_normal(&tri), -newell_normal(&rev));
    }
}
