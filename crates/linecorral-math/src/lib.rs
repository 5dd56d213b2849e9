#![warn(missing_docs)]

//! 2D math types for linecorral.
//!
//! Thin wrappers around nalgebra providing the points, bounding boxes,
//! tolerances, and segment predicates used to compare drafting lines.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A vector in 2D space.
pub type Vec2 = Vector2<f64>;

/// A 2D point in drawing coordinates.
///
/// We use a custom type instead of nalgebra::Point2 so that line records
/// serialize without requiring nalgebra's serde feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point2D {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new 2D point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Position vector of this point.
    pub fn to_vec(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Point at the tip of a position vector.
    pub fn from_vec(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }

    /// Vector from `self` to `other`.
    pub fn delta_to(&self, other: &Self) -> Vec2 {
        Vec2::new(other.x - self.x, other.y - self.y)
    }

    /// Distance to another point.
    pub fn distance(&self, other: &Self) -> f64 {
        self.delta_to(other).norm()
    }

    /// Linear interpolation: `t = 0` gives `self`, `t = 1` gives `other`.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Both coordinates are finite (not NaN or infinite).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<Vec2> for Point2D {
    fn from(v: Vec2) -> Self {
        Self::from_vec(v)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// 2D axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds2D {
    /// Minimum X coordinate.
    pub min_x: f64,
    /// Minimum Y coordinate.
    pub min_y: f64,
    /// Maximum X coordinate.
    pub max_x: f64,
    /// Maximum Y coordinate.
    pub max_y: f64,
}

impl Bounds2D {
    /// Create an empty bounding box.
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Smallest box containing both points.
    pub fn from_points(a: Point2D, b: Point2D) -> Self {
        let mut bounds = Self::empty();
        bounds.include_point(a);
        bounds.include_point(b);
        bounds
    }

    /// Expand the bounding box to include a point.
    pub fn include_point(&mut self, p: Point2D) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Copy of this box grown by `margin` on every side.
    pub fn expanded_by(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    /// Check whether two boxes overlap. Touching edges count as overlapping.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }
}

impl Default for Bounds2D {
    fn default() -> Self {
        Self::empty()
    }
}

/// Tolerances for comparing drafting segments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance2D {
    /// Linear distance tolerance in drawing units.
    pub linear: f64,
    /// Minimum |cos| between two unit directions for them to count as parallel.
    pub parallel: f64,
}

impl Tolerance2D {
    /// Default drafting tolerances: 0.05 units (0.5 mm in world centimetres)
    /// and a parallel threshold of cos(1°).
    pub const DEFAULT: Self = Self {
        linear: 0.05,
        parallel: 0.999845,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point2D, b: &Point2D) -> bool {
        a.distance(b) < self.linear
    }

    /// A segment carries no drawable length: non-finite or shorter than tolerance.
    pub fn is_degenerate(&self, a: &Point2D, b: &Point2D) -> bool {
        !a.is_finite() || !b.is_finite() || self.points_equal(a, b)
    }

    /// Check whether two direction vectors are parallel (or anti-parallel).
    ///
    /// Zero-length directions are never parallel to anything.
    pub fn are_parallel(&self, a: &Vec2, b: &Vec2) -> bool {
        match (a.try_normalize(0.0), b.try_normalize(0.0)) {
            (Some(a), Some(b)) => a.dot(&b).abs() > self.parallel,
            _ => false,
        }
    }
}

impl Default for Tolerance2D {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Parameter of the orthogonal projection of `p` onto the infinite line
/// through `a` and `b`: 0 at `a`, 1 at `b`.
///
/// Returns 0 for a degenerate line.
pub fn project_parameter(p: &Point2D, a: &Point2D, b: &Point2D) -> f64 {
    let ab = a.delta_to(b);
    let len_sq = ab.norm_squared();
    if len_sq <= f64::EPSILON {
        return 0.0;
    }
    a.delta_to(p).dot(&ab) / len_sq
}

/// Closest point to `p` on the segment `a`–`b`.
pub fn closest_point_on_segment(p: &Point2D, a: &Point2D, b: &Point2D) -> Point2D {
    let t = project_parameter(p, a, b).clamp(0.0, 1.0);
    a.lerp(b, t)
}

/// Distance from `p` to the segment `a`–`b`.
pub fn distance_to_segment(p: &Point2D, a: &Point2D, b: &Point2D) -> f64 {
    p.distance(&closest_point_on_segment(p, a, b))
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`.
pub fn distance_to_line(p: &Point2D, a: &Point2D, b: &Point2D) -> f64 {
    let ab = a.delta_to(b);
    let len = ab.norm();
    if len <= f64::EPSILON {
        return p.distance(a);
    }
    let ap = a.delta_to(p);
    (ab.x * ap.y - ab.y * ap.x).abs() / len
}

/// Check whether the segment `inner_a`–`inner_b` lies within `outer_a`–`outer_b`:
/// both inner endpoints are within `tolerance` of the outer segment.
pub fn segment_within(
    inner_a: &Point2D,
    inner_b: &Point2D,
    outer_a: &Point2D,
    outer_b: &Point2D,
    tolerance: f64,
) -> bool {
    distance_to_segment(inner_a, outer_a, outer_b) <= tolerance
        && distance_to_segment(inner_b, outer_a, outer_b) <= tolerance
}
