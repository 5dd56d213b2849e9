//! Layer tags and the built-in BIM drafting layer set.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Marker for types usable as layer tags.
///
/// Any small `Copy` enum with equality and hashing qualifies; the corral only
/// compares tags through a [`PriorityTable`](crate::PriorityTable).
pub trait LayerTag: Copy + Eq + Hash + Debug {}

impl<T: Copy + Eq + Hash + Debug> LayerTag for T {}

/// Semantic drawing layers emitted by the BIM drafting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DraftingLayer {
    /// Untagged lines.
    #[default]
    Default,
    /// Outer surface of a cut wall or floor.
    SeparatorCutOuterSurface,
    /// Minor layer boundaries inside a cut separator.
    SeparatorCutMinorLayer,
    /// Structural layer boundaries inside a cut separator.
    SeparatorCutStructuralLayer,
    /// Trim cut by the section plane.
    SeparatorCutTrim,
    /// Module edges beyond the cut.
    SeparatorBeyondModuleEdges,
    /// Surface edges beyond the cut.
    SeparatorBeyondSurfaceEdges,
    /// Door or window frame cut by the section plane.
    OpeningSystemCutLine,
    /// Door swing or window operator lines.
    OpeningSystemOperatorLine,
    /// Opening edges beyond the cut.
    OpeningSystemBeyond,
    /// Opening edges behind another surface.
    OpeningSystemBehind,
    /// Countertop cut by the section plane.
    CountertopCut,
    /// Countertop edges beyond the cut.
    CountertopBeyond,
    /// Cabinet carcass cut by the section plane.
    CabinetCutCarcass,
    /// Cabinet attachments cut by the section plane.
    CabinetCutAttachment,
    /// Cabinet edges beyond the cut.
    CabinetBeyond,
    /// Cabinet edges beyond the cut and hidden by a countertop.
    CabinetBeyondBlockedByCountertop,
    /// Cabinet edges behind another surface.
    CabinetBehind,
    /// Furniture outline.
    FfeOutline,
    /// Furniture interior edges.
    FfeInteriorEdges,
}

impl DraftingLayer {
    /// Obscuring order, lowest priority (most easily hidden) first.
    pub const PRIORITY_ORDER: [DraftingLayer; 20] = [
        DraftingLayer::Default,
        DraftingLayer::FfeInteriorEdges,
        DraftingLayer::FfeOutline,
        DraftingLayer::CabinetBehind,
        DraftingLayer::OpeningSystemBehind,
        DraftingLayer::CabinetBeyondBlockedByCountertop,
        DraftingLayer::CabinetBeyond,
        DraftingLayer::CountertopBeyond,
        DraftingLayer::OpeningSystemBeyond,
        DraftingLayer::SeparatorBeyondSurfaceEdges,
        DraftingLayer::SeparatorBeyondModuleEdges,
        DraftingLayer::OpeningSystemOperatorLine,
        DraftingLayer::SeparatorCutTrim,
        DraftingLayer::CabinetCutAttachment,
        DraftingLayer::CabinetCutCarcass,
        DraftingLayer::CountertopCut,
        DraftingLayer::OpeningSystemCutLine,
        DraftingLayer::SeparatorCutStructuralLayer,
        DraftingLayer::SeparatorCutMinorLayer,
        DraftingLayer::SeparatorCutOuterSurface,
    ];

    /// Layers that are never clipped.
    pub const PASS_THROUGH: [DraftingLayer; 2] =
        [DraftingLayer::FfeInteriorEdges, DraftingLayer::FfeOutline];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_priority_order_is_complete_and_unique() {
        let unique: HashSet<_> = DraftingLayer::PRIORITY_ORDER.iter().collect();
        assert_eq!(unique.len(), DraftingLayer::PRIORITY_ORDER.len());
        assert_eq!(DraftingLayer::PRIORITY_ORDER[0], DraftingLayer::Default);
        assert_eq!(
            DraftingLayer::PRIORITY_ORDER[19],
            DraftingLayer::SeparatorCutOuterSurface
        );
    }

    #[test]
    fn test_layer_serde_names() {
        #[derive(Deserialize)]
        struct Entry {
            layer: DraftingLayer,
        }

        let entry: Entry = toml::from_str("layer = \"CountertopCut\"").unwrap();
        assert_eq!(entry.layer, DraftingLayer::CountertopCut);
    }
}
