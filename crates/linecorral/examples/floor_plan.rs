//! Resolve a small kitchen plan and print the drafting calls as JSON.
//!
//! Run with `RUST_LOG=debug` to see resolver statistics.

use std::path::Path;

use linecorral::{
    Color, CoordinateSpace, Drafting, DraftingLayer, FontKind, LineCorral, LineStyle, PageSetup,
    Point2D, RecordingSink, TextAlignment, TextItem,
};

struct PlanLine {
    from: (f64, f64),
    to: (f64, f64),
    layer: DraftingLayer,
}

fn plan() -> Vec<PlanLine> {
    let line = |from, to, layer| PlanLine { from, to, layer };
    vec![
        // Cut wall faces.
        line((0.0, 0.0), (120.0, 0.0), DraftingLayer::SeparatorCutOuterSurface),
        line((0.0, 6.0), (120.0, 6.0), DraftingLayer::SeparatorCutOuterSurface),
        // Base cabinets run along the wall; their back edge sits on the wall face.
        line((10.0, 6.0), (70.0, 6.0), DraftingLayer::CabinetBeyond),
        line((10.0, 30.0), (70.0, 30.0), DraftingLayer::CabinetBeyond),
        line((10.0, 6.0), (10.0, 30.0), DraftingLayer::CabinetBeyond),
        line((70.0, 6.0), (70.0, 30.0), DraftingLayer::CabinetBeyond),
        // Countertop overhangs the cabinet front.
        line((8.0, 31.5), (72.0, 31.5), DraftingLayer::CountertopCut),
        line((40.0, 30.0), (80.0, 30.0), DraftingLayer::CountertopBeyond),
        // Table outline is never clipped.
        line((50.0, 60.0), (90.0, 60.0), DraftingLayer::FfeOutline),
        // Zero-length noise from upstream.
        line((30.0, 30.0), (30.0, 30.0), DraftingLayer::CabinetBehind),
    ]
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let sink = RecordingSink::new().requiring_page();
    let mut corral = LineCorral::new(sink, DraftingLayer::shared_rules());

    corral.start_page(&PageSetup::new(1, 36.0, 24.0))?;
    let style = LineStyle::solid(0.35, Color::BLACK);
    for line in plan() {
        corral.draw_line(
            Point2D::from(line.from),
            Point2D::from(line.to),
            &style,
            line.layer,
            CoordinateSpace::World,
        )?;
    }
    corral.add_text(
        &TextItem {
            text: "KITCHEN".into(),
            font_size: 10.0,
            position: Point2D::new(1.0, 1.0),
            rotation: 0.0,
            color: Color::BLACK,
            alignment: TextAlignment::Left,
            width: 0.0,
            font: FontKind::Bold,
            space: CoordinateSpace::Page,
        },
        DraftingLayer::Default,
    )?;

    let report = corral.end_page()?;
    eprintln!(
        "{} lines in, {} emitted, {} split",
        report.stats.input, report.emitted, report.stats.splits
    );
    if !report.is_clean() {
        for (segment, err) in &report.rejections {
            eprintln!("line {} not drawn: {err}", segment.index);
        }
    }
    corral.save_document(Path::new("kitchen.pdf"))?;

    let sink = corral.into_inner();
    println!("{}", serde_json::to_string_pretty(&sink.commands)?);
    Ok(())
}
