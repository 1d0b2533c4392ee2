//! Boolean operations on polygons.
//!
//! Intersection works bottom-up: two convex polygons are intersected by
//! clipping each one's edges against the other; general simple polygons are
//! triangulated, intersected piece by piece, and the fragments recombined.
//! Union walks the two boundaries, discarding the parts inside the other
//! polygon and the edges the two share.

mod convex;
mod recombine;
mod simple;
mod spatial;
mod union;

pub use convex::intersect_convex;
pub use recombine::{merge_linear, recombine};
pub use simple::intersect_simple;
pub(crate) use spatial::{
    intersect_polygon_component_3d, intersect_polygon_plane, intersect_polygons_3d,
    union_polygons_3d,
};
pub use union::union_polygons;

use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::{IntersectionSet, Linear, Polygon};
use crate::operations::clip::clip_to_convex;

/// Computes the intersection of two polygons.
pub struct Intersect<'a, const D: usize> {
    polygon_a: &'a Polygon<D>,
    polygon_b: &'a Polygon<D>,
}

impl<'a, const D: usize> Intersect<'a, D> {
    /// Creates a new `Intersect` operation.
    #[must_use]
    pub fn new(polygon_a: &'a Polygon<D>, polygon_b: &'a Polygon<D>) -> Self {
        Self {
            polygon_a,
            polygon_b,
        }
    }
}

impl Intersect<'_, 2> {
    /// # Errors
    ///
    /// Returns [`OperationError::Unsupported`] if either polygon is not known
    /// to be simple.
    pub fn execute(&self) -> Result<IntersectionSet<2>> {
        intersect_polygons(self.polygon_a, self.polygon_b)
    }
}

impl Intersect<'_, 3> {
    /// # Errors
    ///
    /// Returns [`OperationError::Unsupported`] if either polygon is not known
    /// to be simple.
    pub fn execute(&self) -> Result<IntersectionSet<3>> {
        intersect_polygons_3d(self.polygon_a, self.polygon_b)
    }
}

/// Computes the union of two overlapping or edge-sharing polygons.
pub struct Union<'a, const D: usize> {
    polygon_a: &'a Polygon<D>,
    polygon_b: &'a Polygon<D>,
}

impl<'a, const D: usize> Union<'a, D> {
    /// Creates a new `Union` operation.
    #[must_use]
    pub fn new(polygon_a: &'a Polygon<D>, polygon_b: &'a Polygon<D>) -> Self {
        Self {
            polygon_a,
            polygon_b,
        }
    }
}

impl Union<'_, 2> {
    /// # Errors
    ///
    /// See [`union_polygons`].
    pub fn execute(&self) -> Result<Polygon<2>> {
        union_polygons(self.polygon_a, self.polygon_b)
    }
}

impl Union<'_, 3> {
    /// # Errors
    ///
    /// Returns [`OperationError::NotAdjacent`] for polygons on different
    /// planes, plus every error of [`union_polygons`].
    pub fn execute(&self) -> Result<Polygon<3>> {
        union_polygons_3d(self.polygon_a, self.polygon_b)
    }
}

pub(crate) fn require_simple<const D: usize>(polygon: &Polygon<D>) -> Result<()> {
    if polygon.is_known_simple() {
        Ok(())
    } else {
        Err(OperationError::Unsupported(
            "boolean operation on a polygon not known to be simple".into(),
        )
        .into())
    }
}

/// Dispatches on the operands' flags: convex pairs take the direct path,
/// everything else goes through triangulation.
///
/// # Errors
///
/// Returns [`OperationError::Unsupported`] if either polygon is not known to
/// be simple.
pub fn intersect_polygons(a: &Polygon<2>, b: &Polygon<2>) -> Result<IntersectionSet<2>> {
    require_simple(a)?;
    require_simple(b)?;
    if a.is_known_convex() && b.is_known_convex() {
        debug!(a = a.vertex_count(), b = b.vertex_count(), "intersecting convex polygons");
        let mut set = IntersectionSet::new();
        set.push(intersect_convex(a, b)?)?;
        return Ok(set);
    }
    debug!(a = a.vertex_count(), b = b.vertex_count(), "intersecting simple polygons");
    intersect_simple(a, b)
}

/// Part of a line, halfline or segment inside a simple polygon.
///
/// Convex polygons clip directly; others clip against each triangle and
/// merge the pieces.
///
/// # Errors
///
/// Returns [`OperationError::Unsupported`] if the polygon is not known to be
/// simple, and [`crate::error::GeometryError::DegenerateInput`] for a zero
/// direction.
pub fn intersect_polygon_component<L: Linear<2> + ?Sized>(
    polygon: &Polygon<2>,
    component: &L,
) -> Result<IntersectionSet<2>> {
    require_simple(polygon)?;
    if polygon.is_known_convex() {
        let mut set = IntersectionSet::new();
        set.push(clip_to_convex(component, polygon.ccw().points())?)?;
        return Ok(set);
    }
    let fragments = polygon
        .triangles()
        .iter()
        .map(|tri| clip_to_convex(component, tri.ccw().points()))
        .collect::<Result<Vec<_>>>()?;
    merge_linear(fragments)
}
