//! The line corral: collects a page of lines, resolves occlusion, and
//! re-emits the visible pieces into the next drafting sink.

use std::path::Path;
use std::sync::Arc;

use linecorral_math::Point2D;

use crate::config::CorralRules;
use crate::drafting::Drafting;
use crate::error::DrawError;
use crate::layer::LayerTag;
use crate::resolve::{resolve_with_stats, ResolveStats};
use crate::segment::{LineRecord, Segment};
use crate::types::{
    AngularDimensionItem, ArcItem, CircleItem, Color, CoordinateSpace, DimensionItem, FontKind,
    ImageItem, LineStyle, PageSetup, PolygonFill, TextItem,
};

/// Summary of one flush.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlushReport {
    /// Resolver counters.
    pub stats: ResolveStats,
    /// Lines the sink accepted.
    pub emitted: usize,
    /// Lines the sink rejected with a per-item error, with the sink's error.
    pub rejections: Vec<(Segment, DrawError)>,
}

impl FlushReport {
    /// Number of lines the sink rejected.
    pub fn rejected(&self) -> usize {
        self.rejections.len()
    }

    /// Check whether every visible line reached the sink.
    pub fn is_clean(&self) -> bool {
        self.rejections.is_empty()
    }
}

/// Drafting filter that removes overlapping line work before it reaches `S`.
///
/// World-space lines on layers that are not pass-through are held until the
/// page ends; everything else is forwarded immediately.
#[derive(Debug)]
pub struct LineCorral<L: LayerTag, S: Drafting<L>> {
    next: S,
    rules: Arc<CorralRules<L>>,
    segments: Vec<Segment>,
    records: Vec<LineRecord<L>>,
    next_index: u32,
}

impl<L: LayerTag, S: Drafting<L>> LineCorral<L, S> {
    /// Wrap `next` with the given rules.
    pub fn new(next: S, rules: Arc<CorralRules<L>>) -> Self {
        Self {
            next,
            rules,
            segments: Vec::new(),
            records: Vec::new(),
            next_index: 0,
        }
    }

    /// Take in one line.
    ///
    /// Pass-through layers and non-world lines go straight to the sink and
    /// return its result. Degenerate lines are dropped.
    pub fn accept(
        &mut self,
        start: Point2D,
        end: Point2D,
        style: &LineStyle,
        layer: L,
        space: CoordinateSpace,
    ) -> Result<(), DrawError> {
        if space != CoordinateSpace::World || self.rules.is_pass_through(layer) {
            return self.next.draw_line(start, end, style, layer, space);
        }

        let tol = self.rules.tolerance();
        if tol.is_degenerate(&start, &end) {
            log::trace!("dropping degenerate line {start:?} -> {end:?} on {layer:?}");
            return Ok(());
        }

        self.records.push(LineRecord::new(style.clone(), layer));
        self.segments.push(Segment::new(
            start,
            end,
            self.next_index,
            self.records.len() - 1,
            tol.linear,
        ));
        self.next_index += 1;
        Ok(())
    }

    /// Discard everything collected for the current page.
    pub fn reset(&mut self) {
        self.segments.clear();
        self.records.clear();
        self.next_index = 0;
    }

    /// Visible pieces of the collected lines, without emitting them.
    pub fn resolve(&self) -> Vec<Segment> {
        crate::resolve::resolve(
            &self.segments,
            &self.records,
            self.rules.priorities(),
            self.rules.tolerance(),
        )
    }

    /// Resolve the collected lines and draw the visible pieces into the sink.
    ///
    /// A structural sink error stops emission and is returned; per-item
    /// errors are logged and handed back in [`FlushReport::rejections`].
    /// The page state is cleared either way.
    pub fn flush(&mut self) -> Result<FlushReport, DrawError> {
        let (visible, stats) = resolve_with_stats(
            &self.segments,
            &self.records,
            self.rules.priorities(),
            self.rules.tolerance(),
        );
        let mut report = FlushReport {
            stats,
            ..Default::default()
        };
        let result = emit(&mut self.next, &self.records, &visible, &mut report);
        self.reset();
        result.map(|()| report)
    }

    /// Start collecting a fresh page.
    pub fn begin_page(&mut self) {
        self.reset();
    }

    /// Finish the page: resolve and flush.
    pub fn end_page(&mut self) -> Result<FlushReport, DrawError> {
        self.flush()
    }

    /// Lines collected so far on this page.
    pub fn pending(&self) -> &[Segment] {
        &self.segments
    }

    /// Rules this corral was built with.
    pub fn rules(&self) -> &Arc<CorralRules<L>> {
        &self.rules
    }

    /// The downstream sink.
    pub fn sink(&self) -> &S {
        &self.next
    }

    /// The downstream sink, mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.next
    }

    /// Unwrap the downstream sink. Unflushed lines are dropped.
    pub fn into_inner(self) -> S {
        self.next
    }
}

fn emit<L: LayerTag, S: Drafting<L>>(
    sink: &mut S,
    records: &[LineRecord<L>],
    visible: &[Segment],
    report: &mut FlushReport,
) -> Result<(), DrawError> {
    for segment in visible {
        let record = &records[segment.record];
        match sink.draw_line(
            segment.start,
            segment.end,
            &record.style,
            record.layer,
            CoordinateSpace::World,
        ) {
            Ok(()) => report.emitted += 1,
            Err(err) if err.is_structural() => {
                log::debug!(
                    "flush stopped after {} of {} lines: {err}",
                    report.emitted,
                    visible.len()
                );
                return Err(err);
            }
            Err(err) => {
                log::warn!("sink rejected line on {:?}: {err}", record.layer);
                report.rejections.push((*segment, err));
            }
        }
    }
    Ok(())
}

impl<L: LayerTag, S: Drafting<L>> Drafting<L> for LineCorral<L, S> {
    fn draw_line(
        &mut self,
        start: Point2D,
        end: Point2D,
        style: &LineStyle,
        layer: L,
        space: CoordinateSpace,
    ) -> Result<(), DrawError> {
        self.accept(start, end, style, layer, space)
    }

    fn add_text(&mut self, text: &TextItem, layer: L) -> Result<(), DrawError> {
        self.next.add_text(text, layer)
    }

    fn text_length(&mut self, text: &str, font_size: f64, font: FontKind) -> Result<f64, DrawError> {
        self.next.text_length(text, font_size, font)
    }

    fn draw_arc(&mut self, arc: &ArcItem, layer: L) -> Result<(), DrawError> {
        self.next.draw_arc(arc, layer)
    }

    fn add_image(&mut self, image: &ImageItem, layer: L) -> Result<(), DrawError> {
        self.next.add_image(image, layer)
    }

    fn fill_poly(&mut self, poly: &PolygonFill, layer: L) -> Result<(), DrawError> {
        self.next.fill_poly(poly, layer)
    }

    fn draw_circle(&mut self, circle: &CircleItem, layer: L) -> Result<(), DrawError> {
        self.next.draw_circle(circle, layer)
    }

    fn fill_circle(&mut self, circle: &CircleItem, color: Color, layer: L) -> Result<(), DrawError> {
        self.next.fill_circle(circle, color, layer)
    }

    fn add_dimension(&mut self, dim: &DimensionItem, layer: L) -> Result<(), DrawError> {
        self.next.add_dimension(dim, layer)
    }

    fn add_angular_dimension(
        &mut self,
        dim: &AngularDimensionItem,
        layer: L,
    ) -> Result<(), DrawError> {
        self.next.add_angular_dimension(dim, layer)
    }

    /// Flushes the previous page before the sink moves on.
    fn start_page(&mut self, page: &PageSetup) -> Result<(), DrawError> {
        self.flush()?;
        self.next.start_page(page)
    }

    /// Flushes the current page before the sink writes the document.
    fn save_document(&mut self, path: &Path) -> Result<(), DrawError> {
        self.flush()?;
        self.next.save_document(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CorralConfig;
    use crate::layer::DraftingLayer;
    use crate::recording::{DraftCommand, RecordingSink};

    type Corral = LineCorral<DraftingLayer, RecordingSink<DraftingLayer>>;

    fn corral() -> Corral {
        LineCorral::new(RecordingSink::new(), DraftingLayer::shared_rules())
    }

    fn line(
        corral: &mut Corral,
        (x1, y1): (f64, f64),
        (x2, y2): (f64, f64),
        layer: DraftingLayer,
    ) -> Result<(), DrawError> {
        corral.draw_line(
            Point2D::new(x1, y1),
            Point2D::new(x2, y2),
            &LineStyle::default(),
            layer,
            CoordinateSpace::World,
        )
    }

    #[test]
    fn test_world_lines_are_held_until_flush() {
        let mut c = corral();
        line(&mut c, (0.0, 0.0), (10.0, 0.0), DraftingLayer::CabinetBeyond).unwrap();
        assert_eq!(c.pending().len(), 1);
        assert_eq!(c.sink().num_lines(), 0);

        let report = c.flush().unwrap();
        assert_eq!(report.emitted, 1);
        assert_eq!(c.sink().num_lines(), 1);
        assert!(c.pending().is_empty());
    }

    #[test]
    fn test_pass_through_layer_forwarded_immediately() {
        let mut c = corral();
        line(&mut c, (0.0, 0.0), (10.0, 0.0), DraftingLayer::FfeOutline).unwrap();
        line(&mut c, (0.0, 0.0), (10.0, 0.0), DraftingLayer::SeparatorCutOuterSurface).unwrap();
        line(&mut c, (0.0, 0.0), (10.0, 0.0), DraftingLayer::FfeInteriorEdges).unwrap();

        assert_eq!(c.pending().len(), 1);
        let layers: Vec<_> = c.sink().lines().map(|l| l.layer).collect();
        assert_eq!(
            layers,
            vec![DraftingLayer::FfeOutline, DraftingLayer::FfeInteriorEdges]
        );

        c.flush().unwrap();
        // The furniture outline is under a cut line yet keeps its full length.
        assert_eq!(c.sink().num_lines(), 3);
        assert!(c
            .sink()
            .lines()
            .all(|l| (l.length() - 10.0).abs() < 1e-9));
    }

    #[test]
    fn test_page_space_lines_bypass_resolution() {
        let mut c = corral();
        let style = LineStyle::dashed(0.5, Color::GRAY_144, vec![2.0, 1.0]).with_phase(0.5);
        c.draw_line(
            Point2D::new(1.0, 1.0),
            Point2D::new(2.0, 1.0),
            &style,
            DraftingLayer::Default,
            CoordinateSpace::Page,
        )
        .unwrap();
        assert!(c.pending().is_empty());

        let recorded = c.sink().lines().next().unwrap();
        assert_eq!(recorded.space, CoordinateSpace::Page);
        assert_eq!(recorded.style, style);
    }

    #[test]
    fn test_degenerate_line_dropped_without_error() {
        let mut c = corral();
        assert!(line(&mut c, (3.0, 3.0), (3.0, 3.0), DraftingLayer::CountertopCut).is_ok());
        assert!(line(&mut c, (f64::NAN, 0.0), (1.0, 0.0), DraftingLayer::CountertopCut).is_ok());
        assert!(c.pending().is_empty());

        let report = c.flush().unwrap();
        assert_eq!(report.emitted, 0);
        assert_eq!(c.sink().num_lines(), 0);
    }

    #[test]
    fn test_emitted_fragments_keep_style() {
        let mut c = corral();
        let dashed = LineStyle::dashed(0.1, Color::GRAY_64, vec![1.0, 0.5]);
        c.draw_line(
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            &dashed,
            DraftingLayer::SeparatorBeyondSurfaceEdges,
            CoordinateSpace::World,
        )
        .unwrap();
        line(&mut c, (3.0, 0.0), (6.0, 0.0), DraftingLayer::SeparatorCutOuterSurface).unwrap();

        let report = c.end_page().unwrap();
        assert_eq!(report.emitted, 3);
        assert_eq!(report.stats.splits, 1);
        let beyond: Vec<_> = c
            .sink()
            .lines_on(DraftingLayer::SeparatorBeyondSurfaceEdges)
            .collect();
        assert_eq!(beyond.len(), 2);
        assert!(beyond.iter().all(|l| l.style == dashed));
    }

    #[test]
    fn test_structural_error_halts_flush_and_resets() {
        let sink = RecordingSink::new().requiring_page();
        let mut c = LineCorral::new(sink, DraftingLayer::shared_rules());
        line(&mut c, (0.0, 0.0), (10.0, 0.0), DraftingLayer::CabinetBeyond).unwrap();
        line(&mut c, (0.0, 5.0), (10.0, 5.0), DraftingLayer::CabinetBeyond).unwrap();

        assert_eq!(c.flush(), Err(DrawError::NoActivePage));
        assert_eq!(c.sink().num_lines(), 0);
        assert!(c.pending().is_empty());
    }

    #[test]
    fn test_backend_failure_surfaces() {
        let sink = RecordingSink::new().failing_with(DrawError::Backend("disk full".into()));
        let mut c = LineCorral::new(sink, DraftingLayer::shared_rules());
        line(&mut c, (0.0, 0.0), (10.0, 0.0), DraftingLayer::CabinetBeyond).unwrap();

        let err = c.flush().unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_per_item_rejection_does_not_stop_flush() {
        let sink = RecordingSink::new().rejecting_layer(DraftingLayer::CabinetBehind);
        let mut c = LineCorral::new(sink, DraftingLayer::shared_rules());
        line(&mut c, (0.0, 0.0), (10.0, 0.0), DraftingLayer::CabinetBehind).unwrap();
        line(&mut c, (0.0, 5.0), (10.0, 5.0), DraftingLayer::CabinetBeyond).unwrap();
        line(&mut c, (0.0, 9.0), (10.0, 9.0), DraftingLayer::CountertopCut).unwrap();

        let report = c.flush().unwrap();
        assert_eq!(report.emitted, 2);
        assert_eq!(report.rejected(), 1);
        assert!(!report.is_clean());
        assert_eq!(c.sink().num_lines(), 2);

        let (segment, err) = &report.rejections[0];
        assert_eq!(segment.index, 0);
        assert_eq!(segment.start, Point2D::new(0.0, 0.0));
        assert_eq!(segment.end, Point2D::new(10.0, 0.0));
        assert!(matches!(err, DrawError::BadParam(_)));
    }

    #[test]
    fn test_start_page_flushes_previous_page_first() {
        let mut c = corral();
        line(&mut c, (0.0, 0.0), (10.0, 0.0), DraftingLayer::CountertopCut).unwrap();
        c.start_page(&PageSetup::new(2, 36.0, 24.0)).unwrap();

        assert!(matches!(c.sink().commands[0], DraftCommand::Line(_)));
        assert!(matches!(c.sink().commands[1], DraftCommand::StartPage(_)));

        // Lines from the next page never meet lines from the previous one.
        line(&mut c, (0.0, 0.0), (10.0, 0.0), DraftingLayer::CabinetBeyond).unwrap();
        c.save_document(Path::new("plan.pdf")).unwrap();
        assert_eq!(c.sink().lines_on(DraftingLayer::CabinetBeyond).count(), 1);
        assert!(matches!(
            c.sink().commands.last(),
            Some(DraftCommand::SaveDocument(_))
        ));
    }

    #[test]
    fn test_begin_page_discards_pending() {
        let mut c = corral();
        line(&mut c, (0.0, 0.0), (10.0, 0.0), DraftingLayer::CountertopCut).unwrap();
        c.begin_page();
        assert!(c.pending().is_empty());
        assert_eq!(c.end_page().unwrap().emitted, 0);
    }

    #[test]
    fn test_other_calls_forwarded() {
        let mut c = corral();
        let text = TextItem {
            text: "KITCHEN".into(),
            font_size: 12.0,
            position: Point2D::new(5.0, 5.0),
            rotation: 0.0,
            color: Color::BLACK,
            alignment: Default::default(),
            width: 0.0,
            font: FontKind::Bold,
            space: CoordinateSpace::Page,
        };
        c.add_text(&text, DraftingLayer::Default).unwrap();
        let poly = PolygonFill {
            points: vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(1.0, 0.0),
                Point2D::new(1.0, 1.0),
            ],
            color: Color::GRAY_64,
            space: CoordinateSpace::World,
        };
        c.fill_poly(&poly, DraftingLayer::SeparatorCutOuterSurface)
            .unwrap();
        let len = c.text_length("AB", 10.0, FontKind::Standard).unwrap();

        assert!((len - 10.0).abs() < 1e-12);
        assert_eq!(
            c.sink().commands,
            vec![
                DraftCommand::Text(text, DraftingLayer::Default),
                DraftCommand::FillPoly(poly, DraftingLayer::SeparatorCutOuterSurface),
            ]
        );
    }

    #[test]
    fn test_custom_rules() {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        enum Tag {
            Under,
            Over,
        }

        let rules = CorralConfig {
            priority: vec![Tag::Under, Tag::Over],
            pass_through: Vec::new(),
            tolerance: Default::default(),
        }
        .build()
        .unwrap();
        let mut c = LineCorral::new(RecordingSink::new(), rules);
        for layer in [Tag::Over, Tag::Under] {
            c.draw_line(
                Point2D::new(0.0, 0.0),
                Point2D::new(0.0, 4.0),
                &LineStyle::default(),
                layer,
                CoordinateSpace::World,
            )
            .unwrap();
        }
        c.flush().unwrap();
        let layers: Vec<_> = c.sink().lines().map(|l| l.layer).collect();
        assert_eq!(layers, vec![Tag::Over]);
    }
}
