use crate::error::Result;
use crate::math::{Point, Vector};

use super::Polygon;

/// The triangle `origin, origin + v, origin + w`, marked convex.
///
/// # Errors
///
/// Returns [`crate::error::GeometryError::DegenerateInput`] if `v` and `w`
/// are collinear.
pub fn triangle<const D: usize>(
    origin: Point<D>,
    v: Vector<D>,
    w: Vector<D>,
) -> Result<Polygon<D>> {
    Ok(Polygon::new(vec![origin, origin + v, origin + w])?.with_known_convex(true))
}

/// The parallelogram spanned by `v` and `w` from `origin`, marked convex.
///
/// # Errors
///
/// Returns [`crate::error::GeometryError::DegenerateInput`] if `v` and `w`
/// are collinear.
pub fn parallelogram<const D: usize>(
    origin: Point<D>,
    v: Vector<D>,
    w: Vector<D>,
) -> Result<Polygon<D>> {
    Ok(Polygon::new(vec![origin, origin + v, origin + v + w, origin + w])?.with_known_convex(true))
}

#[must_use]
pub fn triangle_area<const D: usize>(v: &Vector<D>, w: &Vector<D>) -> f64 {
    0.5 * v.wedge_norm(w)
}

#[must_use]
pub fn parallelogram_area<const D: usize>(v: &Vector<D>, w: &Vector<D>) -> f64 {
    v.wedge_norm(w)
}
