//! Drawing-call payload types shared by the corral and its sinks.

use linecorral_math::Point2D;
use serde::{Deserialize, Serialize};

/// Coordinate space a drawing call is expressed in.
///
/// Only [`CoordinateSpace::World`] lines take part in occlusion resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CoordinateSpace {
    /// Canonical 2D drafting space (projected world units).
    #[default]
    World,
    /// Page-relative units (points or inches on the sheet).
    Page,
}

/// RGB stroke or fill color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
}

impl Color {
    /// Create a color from its components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Dark gray used for beyond-cut edges.
    pub const GRAY_64: Self = Self::rgb(64.0 / 255.0, 64.0 / 255.0, 64.0 / 255.0);
    /// Mid gray used for hidden and furniture edges.
    pub const GRAY_144: Self = Self::rgb(144.0 / 255.0, 144.0 / 255.0, 144.0 / 255.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Whether a stroke is continuous or dashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DashKind {
    /// Continuous stroke.
    #[default]
    Solid,
    /// Stroke broken into on/off runs.
    Dashed,
}

/// Dash pattern: kind plus alternating on/off run lengths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LinePattern {
    /// Solid or dashed.
    pub kind: DashKind,
    /// Alternating on/off lengths; empty for solid strokes.
    pub dashes: Vec<f64>,
}

impl LinePattern {
    /// A continuous stroke.
    pub fn solid() -> Self {
        Self::default()
    }

    /// A dashed stroke with the given on/off lengths.
    pub fn dashed(dashes: Vec<f64>) -> Self {
        Self {
            kind: DashKind::Dashed,
            dashes,
        }
    }
}

/// Stroke style carried opaquely through the corral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Stroke thickness.
    pub thickness: f64,
    /// Stroke color.
    pub color: Color,
    /// Dash pattern.
    pub pattern: LinePattern,
    /// Offset into the dash pattern where the stroke begins.
    pub phase: f64,
}

impl LineStyle {
    /// A solid stroke of the given thickness and color.
    pub fn solid(thickness: f64, color: Color) -> Self {
        Self {
            thickness,
            color,
            pattern: LinePattern::solid(),
            phase: 0.0,
        }
    }

    /// A dashed stroke of the given thickness, color, and dash lengths.
    pub fn dashed(thickness: f64, color: Color, dashes: Vec<f64>) -> Self {
        Self {
            thickness,
            color,
            pattern: LinePattern::dashed(dashes),
            phase: 0.0,
        }
    }

    /// Same style with a different dash phase.
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::solid(0.25, Color::BLACK)
    }
}

/// Horizontal justification of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TextAlignment {
    /// Left-aligned.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Right-aligned.
    Right,
}

/// Font face used for annotation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FontKind {
    /// Regular weight.
    #[default]
    Standard,
    /// Bold weight.
    Bold,
    /// Italic.
    Italic,
}

/// Annotation text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    /// The text to draw.
    pub text: String,
    /// Font size.
    pub font_size: f64,
    /// Anchor position.
    pub position: Point2D,
    /// Rotation in radians.
    pub rotation: f64,
    /// Text color.
    pub color: Color,
    /// Justification within `width`.
    pub alignment: TextAlignment,
    /// Width of the containing rectangle; zero for unconstrained text.
    pub width: f64,
    /// Font face.
    pub font: FontKind,
    /// Space `position` is expressed in.
    pub space: CoordinateSpace,
}

/// A circular arc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcItem {
    /// Arc center.
    pub center: Point2D,
    /// Start angle in radians.
    pub start_angle: f64,
    /// End angle in radians.
    pub end_angle: f64,
    /// Radius.
    pub radius: f64,
    /// Stroke style.
    pub style: LineStyle,
    /// Number of straight slices the backend may flatten into.
    pub slices: u32,
    /// Space `center` and `radius` are expressed in.
    pub space: CoordinateSpace,
}

/// A full circle, stroked or filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleItem {
    /// Circle center.
    pub center: Point2D,
    /// Radius.
    pub radius: f64,
    /// Stroke style; ignored for fills.
    pub style: LineStyle,
    /// Space `center` and `radius` are expressed in.
    pub space: CoordinateSpace,
}

/// A raster image placed on the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageItem {
    /// Path to the image file.
    pub path: String,
    /// Lower-left corner.
    pub position: Point2D,
    /// Placed width.
    pub width: f64,
    /// Placed height.
    pub height: f64,
    /// Space `position` and the size are expressed in.
    pub space: CoordinateSpace,
}

/// A filled polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonFill {
    /// Polygon outline; implicitly closed.
    pub points: Vec<Point2D>,
    /// Fill color.
    pub color: Color,
    /// Space `points` are expressed in.
    pub space: CoordinateSpace,
}

/// A linear dimension annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionItem {
    /// First measured point.
    pub start: Point2D,
    /// Second measured point.
    pub end: Point2D,
    /// Where the dimension line is placed.
    pub position: Point2D,
    /// Annotation color.
    pub color: Color,
}

/// An angular dimension annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngularDimensionItem {
    /// Point on the first leg.
    pub start: Point2D,
    /// Point on the second leg.
    pub end: Point2D,
    /// Vertex of the measured angle.
    pub center: Point2D,
    /// Annotation color.
    pub color: Color,
}

/// Page parameters passed when a new sheet starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSetup {
    /// One-based page number.
    pub number: u32,
    /// Sheet width in inches.
    pub width_inches: f64,
    /// Sheet height in inches.
    pub height_inches: f64,
    /// Optional sheet name.
    pub name: Option<String>,
}

impl PageSetup {
    /// An unnamed page of the given size.
    pub fn new(number: u32, width_inches: f64, height_inches: f64) -> Self {
        Self {
            number,
            width_inches,
            height_inches,
            name: None,
        }
    }
}
