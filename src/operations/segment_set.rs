//! Set algebra on collinear segments and chaining segments into polylines.
//!
//! The polygon union and the recombination of intersection fragments work
//! on boundary pieces: they subtract covered parts, merge overlapping
//! collinear pieces, and finally stitch the survivors back into chains.

use std::ops::Add;

use crate::error::{OperationError, Result};
use crate::geometry::{Intersection, Linear, Polyline, Segment};
use crate::math::Point;

impl<const D: usize> Segment<D> {
    /// Parameter interval of `other` along this segment, sorted.
    fn overlap_interval(&self, other: &Self) -> (f64, f64) {
        let t0 = self.project_t(&other.start());
        let t1 = self.project_t(&other.end());
        if t0 <= t1 {
            (t0, t1)
        } else {
            (t1, t0)
        }
    }

    /// Parts of this segment not covered by `other`: zero, one or two pieces.
    ///
    /// Only a collinear overlap of positive length removes anything.
    #[must_use]
    pub fn difference_segment(&self, other: &Self) -> Vec<Self> {
        if !self.is_collinear_with(other) {
            return vec![*self];
        }
        let (lo, hi) = self.overlap_interval(other);
        let lo = lo.max(0.0);
        let hi = hi.min(1.0);
        if self.point_at(lo) == self.point_at(hi) || lo > hi {
            return vec![*self];
        }

        let mut pieces = Vec::with_capacity(2);
        let cut_start = self.point_at(lo);
        let cut_end = self.point_at(hi);
        if cut_start != self.start() {
            pieces.push(Self::new_unchecked(self.start(), cut_start));
        }
        if cut_end != self.end() {
            pieces.push(Self::new_unchecked(cut_end, self.end()));
        }
        pieces
    }

    /// Parts of this segment covered by none of `others`.
    #[must_use]
    pub fn difference_segments(&self, others: &[Self]) -> Vec<Self> {
        let mut remaining = vec![*self];
        for other in others {
            remaining = remaining
                .iter()
                .flat_map(|piece| piece.difference_segment(other))
                .collect();
            if remaining.is_empty() {
                break;
            }
        }
        remaining
    }

    /// The single segment covering both, if they are collinear and overlap or
    /// touch.
    #[must_use]
    pub fn union_segment(&self, other: &Self) -> Option<Self> {
        if !self.is_collinear_with(other) {
            return None;
        }
        let (lo, hi) = self.overlap_interval(other);
        let disjoint = (hi < 0.0 && self.point_at(hi) != self.start())
            || (lo > 1.0 && self.point_at(lo) != self.end());
        if disjoint {
            return None;
        }
        Some(Self::new_unchecked(
            self.point_at(lo.min(0.0)),
            self.point_at(hi.max(1.0)),
        ))
    }

    /// Joins two collinear segments that share exactly one endpoint. Also
    /// available as `a + b`.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidOperation`] if the segments are not
    /// collinear or overlap, and [`OperationError::NotAdjacent`] if they do
    /// not touch.
    pub fn add_segment(&self, other: &Self) -> Result<Self> {
        if !self.is_collinear_with(other) {
            return Err(
                OperationError::InvalidOperation("segments are not collinear".into()).into(),
            );
        }
        match self.intersect_segment(other)? {
            Intersection::Point(_) => self.union_segment(other).ok_or_else(|| {
                OperationError::NotAdjacent("segments do not share an endpoint".into()).into()
            }),
            Intersection::Empty => {
                Err(OperationError::NotAdjacent("segments do not touch".into()).into())
            }
            _ => Err(OperationError::InvalidOperation("segments overlap".into()).into()),
        }
    }
}

/// Segment addition: `a + b` is [`Segment::add_segment`].
impl<const D: usize> Add for Segment<D> {
    type Output = Result<Segment<D>>;

    fn add(self, rhs: Self) -> Self::Output {
        self.add_segment(&rhs)
    }
}

/// Pieces of `segments` not covered by any of `cutters`.
#[must_use]
pub fn difference_segment_sequences<const D: usize>(
    segments: &[Segment<D>],
    cutters: &[Segment<D>],
) -> Vec<Segment<D>> {
    segments
        .iter()
        .flat_map(|s| s.difference_segments(cutters))
        .collect()
}

/// Merges overlapping or touching collinear segments until no two remain
/// mergeable.
#[must_use]
pub fn union_segments<const D: usize>(segments: &[Segment<D>]) -> Vec<Segment<D>> {
    let mut pool = segments.to_vec();
    let mut merged = Vec::with_capacity(pool.len());
    while let Some(mut current) = pool.pop() {
        while let Some((i, joined)) = pool
            .iter()
            .enumerate()
            .find_map(|(i, s)| current.union_segment(s).map(|u| (i, u)))
        {
            pool.swap_remove(i);
            current = joined;
        }
        merged.push(current);
    }
    merged.reverse();
    merged
}

/// Stitches segments into polylines by matching endpoints.
///
/// Each chain grows at both ends until no remaining segment touches it; a
/// chain whose ends meet is closed. Straight-through vertices are kept.
#[must_use]
pub fn consolidate<const D: usize>(segments: &[Segment<D>]) -> Vec<Polyline<D>> {
    let mut pool = segments.to_vec();
    let mut chains = Vec::new();
    while !pool.is_empty() {
        let seed = pool.remove(0);
        let mut points: Vec<Point<D>> = seed.points().to_vec();
        let mut closed = false;
        loop {
            let (head, tail) = (points[0], points[points.len() - 1]);
            if points.len() > 2 && head == tail {
                points.pop();
                closed = true;
                break;
            }
            let next = pool
                .iter()
                .position(|s| s.has_endpoint(&tail) || s.has_endpoint(&head));
            let Some(i) = next else {
                break;
            };
            let s = pool.remove(i);
            let [s0, s1] = s.points();
            if s0 == tail {
                points.push(s1);
            } else if s1 == tail {
                points.push(s0);
            } else if s1 == head {
                points.insert(0, s0);
            } else {
                points.insert(0, s1);
            }
        }
        chains.push(Polyline::new_unchecked(points, closed));
    }
    chains
}
