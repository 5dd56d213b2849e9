//! In-memory drafting sink that records every call.

use std::path::{Path, PathBuf};

use linecorral_math::Point2D;
use serde::Serialize;

use crate::drafting::Drafting;
use crate::error::DrawError;
use crate::layer::LayerTag;
use crate::types::{
    AngularDimensionItem, ArcItem, CircleItem, Color, CoordinateSpace, DimensionItem, FontKind,
    ImageItem, LineStyle, PageSetup, PolygonFill, TextItem,
};

/// Average glyph advance as a fraction of the font size.
const GLYPH_ADVANCE: f64 = 0.5;

/// A recorded `draw_line` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedLine<L> {
    /// Start point.
    pub start: Point2D,
    /// End point.
    pub end: Point2D,
    /// Stroke style.
    pub style: LineStyle,
    /// Layer tag.
    pub layer: L,
    /// Coordinate space.
    pub space: CoordinateSpace,
}

impl<L> RecordedLine<L> {
    /// Length of the recorded line.
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }
}

/// One recorded drafting call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DraftCommand<L> {
    /// A line.
    Line(RecordedLine<L>),
    /// Annotation text.
    Text(TextItem, L),
    /// An arc.
    Arc(ArcItem, L),
    /// A raster image.
    Image(ImageItem, L),
    /// A filled polygon.
    FillPoly(PolygonFill, L),
    /// A stroked circle.
    Circle(CircleItem, L),
    /// A filled circle.
    FillCircle(CircleItem, Color, L),
    /// A linear dimension.
    Dimension(DimensionItem, L),
    /// An angular dimension.
    AngularDimension(AngularDimensionItem, L),
    /// Start of a page.
    StartPage(PageSetup),
    /// Document save.
    SaveDocument(PathBuf),
}

/// A [`Drafting`] sink that keeps every call in memory.
///
/// Useful as the end of a pipeline in tests and previews, and for dumping a
/// page as JSON.
#[derive(Debug, Clone)]
pub struct RecordingSink<L> {
    /// Calls in the order they arrived.
    pub commands: Vec<DraftCommand<L>>,
    require_page: bool,
    page_open: bool,
    rejected_layer: Option<L>,
    failure: Option<DrawError>,
}

impl<L: LayerTag> RecordingSink<L> {
    /// A sink that accepts everything.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            require_page: false,
            page_open: false,
            rejected_layer: None,
            failure: None,
        }
    }

    /// Reject drawing with [`DrawError::NoActivePage`] until a page is started.
    pub fn requiring_page(mut self) -> Self {
        self.require_page = true;
        self
    }

    /// Reject lines on `layer` with [`DrawError::BadParam`].
    pub fn rejecting_layer(mut self, layer: L) -> Self {
        self.rejected_layer = Some(layer);
        self
    }

    /// Fail every line with `error`.
    pub fn failing_with(mut self, error: DrawError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Recorded lines, in call order.
    pub fn lines(&self) -> impl Iterator<Item = &RecordedLine<L>> {
        self.commands.iter().filter_map(|c| match c {
            DraftCommand::Line(line) => Some(line),
            _ => None,
        })
    }

    /// Recorded lines on one layer.
    pub fn lines_on(&self, layer: L) -> impl Iterator<Item = &RecordedLine<L>> {
        self.lines().filter(move |l| l.layer == layer)
    }

    /// Number of recorded lines.
    pub fn num_lines(&self) -> usize {
        self.lines().count()
    }

    fn check_page(&self) -> Result<(), DrawError> {
        if self.require_page && !self.page_open {
            return Err(DrawError::NoActivePage);
        }
        Ok(())
    }
}

impl<L: LayerTag> Default for RecordingSink<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: LayerTag> Drafting<L> for RecordingSink<L> {
    fn draw_line(
        &mut self,
        start: Point2D,
        end: Point2D,
        style: &LineStyle,
        layer: L,
        space: CoordinateSpace,
    ) -> Result<(), DrawError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.check_page()?;
        if self.rejected_layer == Some(layer) {
            return Err(DrawError::BadParam(format!("layer {layer:?} rejected")));
        }
        self.commands.push(DraftCommand::Line(RecordedLine {
            start,
            end,
            style: style.clone(),
            layer,
            space,
        }));
        Ok(())
    }

    fn add_text(&mut self, text: &TextItem, layer: L) -> Result<(), DrawError> {
        self.check_page()?;
        self.commands.push(DraftCommand::Text(text.clone(), layer));
        Ok(())
    }

    fn text_length(&mut self, text: &str, font_size: f64, _font: FontKind) -> Result<f64, DrawError> {
        Ok(text.chars().count() as f64 * font_size * GLYPH_ADVANCE)
    }

    fn draw_arc(&mut self, arc: &ArcItem, layer: L) -> Result<(), DrawError> {
        self.check_page()?;
        self.commands.push(DraftCommand::Arc(arc.clone(), layer));
        Ok(())
    }

    fn add_image(&mut self, image: &ImageItem, layer: L) -> Result<(), DrawError> {
        self.check_page()?;
        self.commands.push(DraftCommand::Image(image.clone(), layer));
        Ok(())
    }

    fn fill_poly(&mut self, poly: &PolygonFill, layer: L) -> Result<(), DrawError> {
        self.check_page()?;
        if poly.points.len() < 3 {
            return Err(DrawError::BadParam("polygon needs at least 3 points".into()));
        }
        self.commands.push(DraftCommand::FillPoly(poly.clone(), layer));
        Ok(())
    }

    fn draw_circle(&mut self, circle: &CircleItem, layer: L) -> Result<(), DrawError> {
        self.check_page()?;
        self.commands.push(DraftCommand::Circle(circle.clone(), layer));
        Ok(())
    }

    fn fill_circle(&mut self, circle: &CircleItem, color: Color, layer: L) -> Result<(), DrawError> {
        self.check_page()?;
        self.commands
            .push(DraftCommand::FillCircle(circle.clone(), color, layer));
        Ok(())
    }

    fn add_dimension(&mut self, dim: &DimensionItem, layer: L) -> Result<(), DrawError> {
        self.check_page()?;
        self.commands.push(DraftCommand::Dimension(dim.clone(), layer));
        Ok(())
    }

    fn add_angular_dimension(
        &mut self,
        dim: &AngularDimensionItem,
        layer: L,
    ) -> Result<(), DrawError> {
        self.check_page()?;
        self.commands
            .push(DraftCommand::AngularDimension(dim.clone(), layer));
        Ok(())
    }

    fn start_page(&mut self, page: &PageSetup) -> Result<(), DrawError> {
        self.page_open = true;
        self.commands.push(DraftCommand::StartPage(page.clone()));
        Ok(())
    }

    fn save_document(&mut self, path: &Path) -> Result<(), DrawError> {
        self.page_open = false;
        self.commands
            .push(DraftCommand::SaveDocument(path.to_path_buf()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::DraftingLayer;

    fn draw(sink: &mut RecordingSink<DraftingLayer>, layer: DraftingLayer) -> Result<(), DrawError> {
        sink.draw_line(
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            &LineStyle::default(),
            layer,
            CoordinateSpace::World,
        )
    }

    #[test]
    fn test_records_lines_in_order() {
        let mut sink = RecordingSink::new();
        draw(&mut sink, DraftingLayer::CabinetBeyond).unwrap();
        draw(&mut sink, DraftingLayer::CountertopCut).unwrap();
        assert_eq!(sink.num_lines(), 2);
        assert_eq!(sink.lines_on(DraftingLayer::CountertopCut).count(), 1);
        assert!((sink.lines().next().unwrap().length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_requires_page() {
        let mut sink = RecordingSink::new().requiring_page();
        assert_eq!(draw(&mut sink, DraftingLayer::Default), Err(DrawError::NoActivePage));
        sink.start_page(&PageSetup::new(1, 36.0, 24.0)).unwrap();
        assert!(draw(&mut sink, DraftingLayer::Default).is_ok());
    }

    #[test]
    fn test_rejects_layer() {
        let mut sink = RecordingSink::new().rejecting_layer(DraftingLayer::CabinetBehind);
        assert!(matches!(
            draw(&mut sink, DraftingLayer::CabinetBehind),
            Err(DrawError::BadParam(_))
        ));
        assert!(draw(&mut sink, DraftingLayer::CabinetBeyond).is_ok());
        assert_eq!(sink.num_lines(), 1);
    }

    #[test]
    fn test_text_length_estimate() {
        let mut sink = RecordingSink::<DraftingLayer>::new();
        let len = sink.text_length("WALL", 10.0, FontKind::Standard).unwrap();
        assert!((len - 20.0).abs() < 1e-12);
    }
}
