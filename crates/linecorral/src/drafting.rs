//! The drafting capability: the call surface shared by producers, the
//! corral, and downstream vector backends.

use std::path::Path;

use linecorral_math::Point2D;

use crate::error::DrawError;
use crate::layer::LayerTag;
use crate::types::{
    AngularDimensionItem, ArcItem, CircleItem, Color, CoordinateSpace, DimensionItem, FontKind,
    ImageItem, LineStyle, PageSetup, PolygonFill, TextItem,
};

/// A drafting surface that accepts vector drawing calls.
///
/// Only [`Drafting::draw_line`] is required. The other operations default to
/// [`DrawError::Unimplemented`], and the page lifecycle defaults to a no-op.
pub trait Drafting<L: LayerTag> {
    /// Draw a straight line.
    fn draw_line(
        &mut self,
        start: Point2D,
        end: Point2D,
        style: &LineStyle,
        layer: L,
        space: CoordinateSpace,
    ) -> Result<(), DrawError>;

    /// Draw annotation text.
    fn add_text(&mut self, _text: &TextItem, _layer: L) -> Result<(), DrawError> {
        Err(DrawError::Unimplemented("add_text"))
    }

    /// Measure the rendered length of `text`.
    fn text_length(
        &mut self,
        _text: &str,
        _font_size: f64,
        _font: FontKind,
    ) -> Result<f64, DrawError> {
        Err(DrawError::Unimplemented("text_length"))
    }

    /// Draw a circular arc.
    fn draw_arc(&mut self, _arc: &ArcItem, _layer: L) -> Result<(), DrawError> {
        Err(DrawError::Unimplemented("draw_arc"))
    }

    /// Place a raster image.
    fn add_image(&mut self, _image: &ImageItem, _layer: L) -> Result<(), DrawError> {
        Err(DrawError::Unimplemented("add_image"))
    }

    /// Fill a polygon.
    fn fill_poly(&mut self, _poly: &PolygonFill, _layer: L) -> Result<(), DrawError> {
        Err(DrawError::Unimplemented("fill_poly"))
    }

    /// Stroke a circle.
    fn draw_circle(&mut self, _circle: &CircleItem, _layer: L) -> Result<(), DrawError> {
        Err(DrawError::Unimplemented("draw_circle"))
    }

    /// Fill a circle.
    fn fill_circle(
        &mut self,
        _circle: &CircleItem,
        _color: Color,
        _layer: L,
    ) -> Result<(), DrawError> {
        Err(DrawError::Unimplemented("fill_circle"))
    }

    /// Add a linear dimension.
    fn add_dimension(&mut self, _dim: &DimensionItem, _layer: L) -> Result<(), DrawError> {
        Err(DrawError::Unimplemented("add_dimension"))
    }

    /// Add an angular dimension.
    fn add_angular_dimension(
        &mut self,
        _dim: &AngularDimensionItem,
        _layer: L,
    ) -> Result<(), DrawError> {
        Err(DrawError::Unimplemented("add_angular_dimension"))
    }

    /// Begin a new page.
    fn start_page(&mut self, _page: &PageSetup) -> Result<(), DrawError> {
        Ok(())
    }

    /// Write the finished document.
    fn save_document(&mut self, _path: &Path) -> Result<(), DrawError> {
        Ok(())
    }
}
