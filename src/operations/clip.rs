//! Slab clipping of linear components against convex polygons.

use crate::error::{GeometryError, Result};
use crate::geometry::{Intersection, Linear, Segment};
use crate::math::{Point2D, Vector2D, TOLERANCE};

/// Parameter interval `[t_enter, t_leave]` of the line `origin + t * direction`
/// inside the convex counter-clockwise ring `ccw_vertices`.
///
/// Each edge contributes its outward normal; the line enters where it
/// approaches an edge from outside and leaves where it moves away. A line
/// parallel to an edge is rejected outright if it runs outside that edge.
#[must_use]
pub fn clip_interval(
    origin: &Point2D,
    direction: &Vector2D,
    ccw_vertices: &[Point2D],
) -> Option<(f64, f64)> {
    let n = ccw_vertices.len();
    let dir_len = direction.length();
    let mut t_enter = f64::NEG_INFINITY;
    let mut t_leave = f64::INFINITY;

    for i in 0..n {
        let a = ccw_vertices[i];
        let edge = ccw_vertices[(i + 1) % n] - a;
        let len = edge.length();
        if len < TOLERANCE {
            continue;
        }
        let normal = Vector2D::new(edge.y(), -edge.x()) / len;
        let denom = normal.dot(direction);
        // Positive outside the edge.
        let dist = normal.dot(&(*origin - a));

        if denom.abs() < TOLERANCE * dir_len {
            if dist > TOLERANCE {
                return None;
            }
            continue;
        }
        let t = -dist / denom;
        if denom < 0.0 {
            t_enter = t_enter.max(t);
        } else {
            t_leave = t_leave.min(t);
        }
    }

    (t_enter <= t_leave + TOLERANCE / dir_len).then_some((t_enter, t_leave))
}

/// Part of a line, halfline or segment inside a convex counter-clockwise
/// ring: nothing, a touching point, or a segment.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateInput`] for a zero direction.
pub fn clip_to_convex<L: Linear<2> + ?Sized>(
    component: &L,
    ccw_vertices: &[Point2D],
) -> Result<Intersection<2>> {
    let direction = component.direction();
    if direction.is_zero() {
        return Err(GeometryError::DegenerateInput("zero-length direction vector".into()).into());
    }
    let interval = clip_interval(&component.origin(), &direction, ccw_vertices);
    let Some((t_enter, t_leave)) = interval else {
        return Ok(Intersection::Empty);
    };

    let domain = component.domain();
    let lo = t_enter.max(domain.t_min);
    let hi = t_leave.min(domain.t_max);
    if lo > hi + TOLERANCE / direction.length() {
        return Ok(Intersection::Empty);
    }

    let start = component.point_at(lo);
    let end = component.point_at(hi);
    if start == end {
        Ok(Intersection::Point(start))
    } else {
        Ok(Intersection::Segment(Segment::new_unchecked(start, end)))
    }
}
