#![warn(missing_docs)]

//! Priority-based visibility resolution for 2D drafting line work.
//!
//! A [`LineCorral`] sits between a drawing producer and a vector backend.
//! It collects the world-space lines of a page, removes the portions that
//! lie under a collinear line on a higher-priority layer, and re-emits the
//! visible pieces with their original style and layer:
//!
//! - **Priority table**: strict obscuring order over layer tags
//! - **Ingest**: pass-through layers and page-space lines skip resolution
//! - **Resolver**: work-list clipping of parallel, coincident overlaps
//! - **Re-emission**: visible fragments go to the next [`Drafting`] sink
//!
//! # Example
//!
//! ```ignore
//! use linecorral::{
//!     CoordinateSpace, Drafting, DraftingLayer, LineCorral, LineStyle, Point2D, RecordingSink,
//! };
//!
//! let mut corral = LineCorral::new(RecordingSink::new(), DraftingLayer::shared_rules());
//!
//! // A cabinet edge beyond the cut, partly under a cut wall face.
//! corral.draw_line(
//!     Point2D::new(0.0, 0.0),
//!     Point2D::new(10.0, 0.0),
//!     &LineStyle::default(),
//!     DraftingLayer::CabinetBeyond,
//!     CoordinateSpace::World,
//! )?;
//! corral.draw_line(
//!     Point2D::new(3.0, 0.0),
//!     Point2D::new(6.0, 0.0),
//!     &LineStyle::default(),
//!     DraftingLayer::SeparatorCutOuterSurface,
//!     CoordinateSpace::World,
//! )?;
//!
//! let report = corral.end_page()?;
//! assert_eq!(report.emitted, 3);
//! ```

pub mod config;
pub mod corral;
pub mod drafting;
pub mod error;
pub mod layer;
pub mod priority;
pub mod recording;
pub mod resolve;
pub mod segment;
pub mod types;

pub use config::{CorralConfig, CorralRules};
pub use corral::{FlushReport, LineCorral};
pub use drafting::Drafting;
pub use error::{CorralError, DrawError, Result};
pub use layer::{DraftingLayer, LayerTag};
pub use linecorral_math::{Bounds2D, Point2D, Tolerance2D};
pub use priority::PriorityTable;
pub use recording::{DraftCommand, RecordedLine, RecordingSink};
pub use resolve::{resolve, resolve_with_stats, ResolveStats};
pub use segment::{FragmentId, LineRecord, Segment};
pub use types::{
    AngularDimensionItem, ArcItem, CircleItem, Color, CoordinateSpace, DashKind, DimensionItem,
    FontKind, ImageItem, LinePattern, LineStyle, PageSetup, PolygonFill, TextAlignment, TextItem,
};
