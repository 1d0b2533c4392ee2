mod planar;
mod shapes;
mod spatial;

pub use shapes::{parallelogram, parallelogram_area, triangle, triangle_area};

use std::sync::OnceLock;

use crate::error::{GeometryError, Result};
use crate::geometry::{Plane, Polyline, Segment};
use crate::math::polygon_2d::enclosed_area;
use crate::math::{Point, TOLERANCE};
use crate::operations::segment_set::difference_segment_sequences;

/// A closed planar polygon given by its vertex ring.
///
/// The ring is implicitly closed (the last vertex connects to the first) and
/// may be oriented either way. Two flags record what the caller knows about
/// the shape: `known_convex` lets boolean operations skip triangulation, and
/// `known_simple` (no self-intersections) is required by them. Freshly
/// constructed polygons are assumed simple and not known to be convex.
///
/// Derived data (triangulation, counter-clockwise copy, 2D projection of a 3D
/// polygon) is computed on first use and cached; vertices never change after
/// construction.
#[derive(Debug, Clone)]
pub struct Polygon<const D: usize> {
    points: Vec<Point<D>>,
    known_convex: bool,
    known_simple: bool,
    triangles: OnceLock<Vec<Polygon<D>>>,
    ccw: OnceLock<Box<Polygon<D>>>,
    projection: OnceLock<Box<Projection>>,
}

/// 2D polygon type.
pub type Polygon2D = Polygon<2>;

/// 3D polygon type.
pub type Polygon3D = Polygon<3>;

/// A 3D polygon's supporting plane and its image in that plane's 2D frame.
#[derive(Debug, Clone)]
pub(crate) struct Projection {
    plane: Plane,
    polygon: Polygon<2>,
}

impl<const D: usize> Polygon<D> {
    /// Creates a polygon from at least three distinct vertices enclosing a
    /// nonzero area.
    ///
    /// 3D vertices are expected to be coplanar; see
    /// [`Polygon::is_planar`](Polygon3D::is_planar).
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] for fewer than three
    /// vertices, repeated vertices, or a ring with no area (all collinear).
    pub fn new(points: Vec<Point<D>>) -> Result<Self> {
        if points.len() < 3 {
            return Err(GeometryError::DegenerateInput(format!(
                "polygon needs at least 3 vertices, got {}",
                points.len()
            ))
            .into());
        }
        for (i, p) in points.iter().enumerate() {
            if points[i + 1..].contains(p) {
                return Err(
                    GeometryError::DegenerateInput(format!("repeated polygon vertex {p}")).into(),
                );
            }
        }
        if enclosed_area(&points) < TOLERANCE {
            return Err(
                GeometryError::DegenerateInput("polygon vertices enclose no area".into()).into(),
            );
        }
        Ok(Self::new_unchecked(points))
    }

    pub(crate) fn new_unchecked(points: Vec<Point<D>>) -> Self {
        Self {
            points,
            known_convex: false,
            known_simple: true,
            triangles: OnceLock::new(),
            ccw: OnceLock::new(),
            projection: OnceLock::new(),
        }
    }

    /// Same vertex ring with the caller's convexity knowledge attached.
    #[must_use]
    pub fn with_known_convex(mut self, known_convex: bool) -> Self {
        self.known_convex = known_convex;
        self
    }

    /// Same vertex ring with the caller's simplicity knowledge attached.
    #[must_use]
    pub fn with_known_simple(mut self, known_simple: bool) -> Self {
        self.known_simple = known_simple;
        self
    }

    /// A polygon with new vertices and this polygon's flags.
    fn derive(&self, points: Vec<Point<D>>) -> Self {
        Self::new_unchecked(points)
            .with_known_convex(self.known_convex)
            .with_known_simple(self.known_simple)
    }

    #[must_use]
    pub fn is_known_convex(&self) -> bool {
        self.known_convex
    }

    #[must_use]
    pub fn is_known_simple(&self) -> bool {
        self.known_simple
    }

    #[must_use]
    pub fn points(&self) -> &[Point<D>] {
        &self.points
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Vertex at `index`, wrapping around the ring.
    #[must_use]
    pub fn vertex(&self, index: usize) -> Point<D> {
        self.points[index % self.points.len()]
    }

    #[must_use]
    pub fn prev_index(&self, index: usize) -> usize {
        let n = self.points.len();
        (index % n + n - 1) % n
    }

    #[must_use]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.points.len()
    }

    /// Boundary edges `v[i] → v[i+1]`, closing edge last.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment<D>> {
        let n = self.points.len();
        (0..n)
            .map(|i| Segment::new_unchecked(self.points[i], self.points[(i + 1) % n]))
            .collect()
    }

    #[must_use]
    pub fn closed_polyline(&self) -> Polyline<D> {
        Polyline::new_unchecked(self.points.clone(), true)
    }

    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.segments().iter().map(Segment::length).sum()
    }

    /// Enclosed area, always non-negative.
    #[must_use]
    pub fn area(&self) -> f64 {
        enclosed_area(&self.points)
    }

    /// Mean of the vertices.
    #[must_use]
    pub fn centroid(&self) -> Point<D> {
        Point::mean(&self.points).unwrap_or_else(Point::origin)
    }

    /// Same ring traversed the other way, starting from the same vertex.
    #[must_use]
    pub fn reverse(&self) -> Self {
        let mut points = Vec::with_capacity(self.points.len());
        points.push(self.points[0]);
        points.extend(self.points[1..].iter().rev());
        self.derive(points)
    }

    /// Same ring starting from vertex `start`.
    #[must_use]
    pub fn reorder(&self, start: usize) -> Self {
        let mut points = self.points.clone();
        points.rotate_left(start % self.points.len());
        self.derive(points)
    }

    /// Parts of this polygon's boundary not covered by `other`'s boundary.
    #[must_use]
    pub fn difference_boundary(&self, other: &Self) -> Vec<Segment<D>> {
        difference_segment_sequences(&self.segments(), &other.segments())
    }
}

/// Cyclic equality: same vertex ring up to the starting vertex and the
/// traversal direction.
impl<const D: usize> PartialEq for Polygon<D> {
    fn eq(&self, other: &Self) -> bool {
        let n = self.points.len();
        if n != other.points.len() {
            return false;
        }
        let Some(offset) = other.points.iter().position(|p| *p == self.points[0]) else {
            return false;
        };
        let forward = (0..n).all(|i| self.points[i] == other.points[(offset + i) % n]);
        forward || (0..n).all(|i| self.points[i] == other.points[(offset + n - i) % n])
    }
}
