use crate::error::{OperationError, Result};
use crate::geometry::{Halfline, Line, Polygon, Segment};
use crate::math::Point;

/// Result of intersecting two geometric objects.
///
/// The dimension of the variant depends on the operands: a line and a
/// segment can meet in a point or a segment, two polygons in anything down
/// to a point.
#[derive(Debug, Clone, PartialEq)]
pub enum Intersection<const D: usize> {
    Empty,
    Point(Point<D>),
    Line(Line<D>),
    Halfline(Halfline<D>),
    Segment(Segment<D>),
    Polygon(Polygon<D>),
}

impl<const D: usize> Intersection<D> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub fn as_point(&self) -> Option<&Point<D>> {
        match self {
            Self::Point(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_segment(&self) -> Option<&Segment<D>> {
        match self {
            Self::Segment(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_polygon(&self) -> Option<&Polygon<D>> {
        match self {
            Self::Polygon(p) => Some(p),
            _ => None,
        }
    }

    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Point(_) => "point",
            Self::Line(_) => "line",
            Self::Halfline(_) => "halfline",
            Self::Segment(_) => "segment",
            Self::Polygon(_) => "polygon",
        }
    }
}

/// A disjoint collection of bounded intersection components.
///
/// Polygon intersections can fall apart into several pieces of different
/// dimension; each piece lands in the matching bucket. Unbounded components
/// (lines, halflines) cannot occur in a polygon intersection and are refused.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntersectionSet<const D: usize> {
    points: Vec<Point<D>>,
    segments: Vec<Segment<D>>,
    polygons: Vec<Polygon<D>>,
}

impl<const D: usize> IntersectionSet<D> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            segments: Vec::new(),
            polygons: Vec::new(),
        }
    }

    /// Adds a component. Empty results are ignored and exact duplicates of
    /// points or segments already present are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Unsupported`] for lines and halflines.
    pub fn push(&mut self, item: Intersection<D>) -> Result<()> {
        match item {
            Intersection::Empty => {}
            Intersection::Point(p) => {
                if !self.points.contains(&p) {
                    self.points.push(p);
                }
            }
            Intersection::Segment(s) => {
                if !self.segments.contains(&s) {
                    self.segments.push(s);
                }
            }
            Intersection::Polygon(p) => self.polygons.push(p),
            Intersection::Line(_) | Intersection::Halfline(_) => {
                return Err(OperationError::Unsupported(format!(
                    "unbounded {} in a bounded intersection set",
                    item.kind()
                ))
                .into());
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn points(&self) -> &[Point<D>] {
        &self.points
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment<D>] {
        &self.segments
    }

    #[must_use]
    pub fn polygons(&self) -> &[Polygon<D>] {
        &self.polygons
    }

    /// Splits the set into its point, segment and polygon buckets.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Point<D>>, Vec<Segment<D>>, Vec<Polygon<D>>) {
        (self.points, self.segments, self.polygons)
    }

    /// Total number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len() + self.segments.len() + self.polygons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All components, polygons first, then segments, then points.
    pub fn iter(&self) -> impl Iterator<Item = Intersection<D>> + '_ {
        self.polygons
            .iter()
            .cloned()
            .map(Intersection::Polygon)
            .chain(self.segments.iter().copied().map(Intersection::Segment))
            .chain(self.points.iter().copied().map(Intersection::Point))
    }

    /// The set as a single [`Intersection`]: `Empty` when empty, the component
    /// itself when there is exactly one, `None` otherwise.
    #[must_use]
    pub fn as_single(&self) -> Option<Intersection<D>> {
        match self.len() {
            0 => Some(Intersection::Empty),
            1 => self.iter().next(),
            _ => None,
        }
    }
}
