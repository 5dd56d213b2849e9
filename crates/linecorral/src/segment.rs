//! Working geometry for corralled lines.

use linecorral_math::{Bounds2D, Point2D};
use serde::{Deserialize, Serialize};

use crate::types::LineStyle;

slotmap::new_key_type! {
    /// Identifier of a fragment in the resolver's arena.
    pub struct FragmentId;
}

/// Style and layer of one ingested line.
///
/// Fragments clipped from a line point back at the same record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord<L> {
    /// Stroke style, re-attached verbatim on emission.
    pub style: LineStyle,
    /// Layer the line was drawn on.
    pub layer: L,
}

impl<L> LineRecord<L> {
    /// Create a new line record.
    pub fn new(style: LineStyle, layer: L) -> Self {
        Self { style, layer }
    }
}

/// A line segment (or fragment of one) in the canonical drafting space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start point.
    pub start: Point2D,
    /// End point.
    pub end: Point2D,
    /// Insertion index of the original line; shared by all of its fragments.
    pub index: u32,
    /// Index into the line record table.
    pub record: usize,
    /// Bounding box grown by the linear tolerance.
    pub bounds: Bounds2D,
}

impl Segment {
    /// Create a segment, caching its bounding box grown by `margin`.
    pub fn new(start: Point2D, end: Point2D, index: u32, record: usize, margin: f64) -> Self {
        Self {
            start,
            end,
            index,
            record,
            bounds: Bounds2D::from_points(start, end).expanded_by(margin),
        }
    }

    /// A fragment of this segment with new endpoints.
    ///
    /// Keeps the insertion index and record so priority ties still resolve
    /// against the original line.
    pub fn fragment(&self, start: Point2D, end: Point2D, margin: f64) -> Self {
        Self::new(start, end, self.index, self.record, margin)
    }

    /// Point at parameter `t` along the segment.
    pub fn point_at(&self, t: f64) -> Point2D {
        self.start.lerp(&self.end, t)
    }

    /// Length of the segment.
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bounds_are_expanded() {
        let seg = Segment::new(Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0), 0, 0, 0.05);
        assert_relative_eq!(seg.bounds.min_x, -0.05);
        assert_relative_eq!(seg.bounds.max_y, 0.05);
        assert_relative_eq!(seg.length(), 10.0);
    }

    #[test]
    fn test_fragment_keeps_identity() {
        let seg = Segment::new(Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0), 7, 3, 0.05);
        let frag = seg.fragment(seg.point_at(0.6), seg.end, 0.05);
        assert_eq!(frag.index, 7);
        assert_eq!(frag.record, 3);
        assert_relative_eq!(frag.start.x, 6.0);
        assert_relative_eq!(frag.bounds.min_x, 5.95);
    }
}
