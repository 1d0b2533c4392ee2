use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::{Polygon, Segment};
use crate::math::polygon_2d::remove_collinear_vertices;
use crate::math::Point;

/// A chain of straight segments through a vertex sequence.
///
/// For closed polylines the last vertex connects back to the first; the
/// closing vertex is not repeated in `points`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline<const D: usize> {
    points: Vec<Point<D>>,
    closed: bool,
}

/// 2D polyline type.
pub type Polyline2D = Polyline<2>;

/// 3D polyline type.
pub type Polyline3D = Polyline<3>;

impl<const D: usize> Polyline<D> {
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if there are fewer than two
    /// vertices (three when closed) or two consecutive vertices coincide.
    pub fn new(points: Vec<Point<D>>, closed: bool) -> Result<Self> {
        let min = if closed { 3 } else { 2 };
        if points.len() < min {
            return Err(GeometryError::DegenerateInput(format!(
                "polyline needs at least {min} vertices, got {}",
                points.len()
            ))
            .into());
        }
        let repeated = points.windows(2).any(|w| w[0] == w[1])
            || (closed && points.first() == points.last());
        if repeated {
            return Err(GeometryError::DegenerateInput(
                "polyline has coincident consecutive vertices".into(),
            )
            .into());
        }
        Ok(Self { points, closed })
    }

    pub(crate) fn new_unchecked(points: Vec<Point<D>>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Open two-point chain along `segment`.
    #[must_use]
    pub fn from_segment(segment: &Segment<D>) -> Self {
        Self {
            points: segment.points().to_vec(),
            closed: false,
        }
    }

    #[must_use]
    pub fn points(&self) -> &[Point<D>] {
        &self.points
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn start(&self) -> Point<D> {
        self.points[0]
    }

    #[must_use]
    pub fn end(&self) -> Point<D> {
        self.points[self.points.len() - 1]
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        let n = self.points.len();
        if self.closed {
            n
        } else {
            n - 1
        }
    }

    #[must_use]
    pub fn segments(&self) -> Vec<Segment<D>> {
        let n = self.points.len();
        (0..self.segment_count())
            .map(|i| Segment::new_unchecked(self.points[i], self.points[(i + 1) % n]))
            .collect()
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.segments().iter().map(Segment::length).sum()
    }

    #[must_use]
    pub fn reverse(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self {
            points,
            closed: self.closed,
        }
    }

    /// Extends an open polyline by a segment touching either end.
    ///
    /// The polyline closes itself when the new segment joins both ends.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidOperation`] on a closed polyline and
    /// [`OperationError::NotAdjacent`] if the segment touches neither end.
    pub fn add_segment(&self, segment: &Segment<D>) -> Result<Self> {
        if self.closed {
            return Err(
                OperationError::InvalidOperation("polyline is already closed".into()).into(),
            );
        }
        let (start, end) = (self.start(), self.end());
        let [s0, s1] = segment.points();
        let mut points = self.points.clone();
        if s0 == end {
            points.push(s1);
        } else if s1 == end {
            points.push(s0);
        } else if s1 == start {
            points.insert(0, s0);
        } else if s0 == start {
            points.insert(0, s1);
        } else {
            return Err(OperationError::NotAdjacent(format!(
                "segment {s0} - {s1} touches neither end of the polyline"
            ))
            .into());
        }

        let closed = points.len() > 3 && points.first() == points.last();
        if closed {
            points.pop();
        }
        Ok(Self { points, closed })
    }

    /// Drops interior vertices where the chain runs straight through.
    #[must_use]
    pub fn simplify(&self) -> Self {
        if self.closed {
            let points = remove_collinear_vertices(&self.points);
            if points.len() >= 3 {
                return Self { points, closed: true };
            }
            return self.clone();
        }
        let mut points: Vec<Point<D>> = Vec::with_capacity(self.points.len());
        for p in &self.points {
            if let [.., a, b] = points.as_slice() {
                let straight = (*b - *a)
                    .normalize()
                    .ok()
                    .zip((*p - *b).normalize().ok())
                    .is_some_and(|(u, w)| u.is_codirectional(&w));
                if straight {
                    points.pop();
                }
            }
            points.push(*p);
        }
        Self { points, closed: false }
    }

    /// The polygon bounded by a closed polyline.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidOperation`] for an open polyline, or
    /// the [`Polygon::new`] error for a degenerate ring.
    pub fn to_polygon(&self) -> Result<Polygon<D>> {
        if !self.closed {
            return Err(OperationError::InvalidOperation(
                "an open polyline bounds no polygon".into(),
            )
            .into());
        }
        Polygon::new(self.points.clone())
    }
}
