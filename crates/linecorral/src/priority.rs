//! Layer priority table: which layer obscures which.

use std::collections::HashMap;

use crate::error::{CorralError, Result};
use crate::layer::LayerTag;

/// Immutable total order over layer tags.
///
/// Ranks are assigned `0..N` in declaration order, so the first declared
/// layer is the most easily obscured. Undeclared layers share rank 0.
#[derive(Debug, Clone)]
pub struct PriorityTable<L: LayerTag> {
    ranks: HashMap<L, u32>,
}

impl<L: LayerTag> PriorityTable<L> {
    /// Build a table from layers listed lowest priority first.
    ///
    /// Fails if a layer is listed twice; an ambiguous order is never accepted.
    pub fn build(order: &[L]) -> Result<Self> {
        let mut ranks = HashMap::with_capacity(order.len());
        for (rank, layer) in order.iter().enumerate() {
            if ranks.insert(*layer, rank as u32).is_some() {
                return Err(CorralError::DuplicateLayer(format!("{layer:?}")));
            }
        }
        Ok(Self { ranks })
    }

    /// Rank of a layer; 0 for layers missing from the declared order.
    pub fn rank(&self, layer: L) -> u32 {
        self.ranks.get(&layer).copied().unwrap_or(0)
    }

    /// True iff `a` is drawn over `b`.
    pub fn obscures(&self, a: L, b: L) -> bool {
        self.rank(a) > self.rank(b)
    }

    /// Check whether a layer was declared.
    pub fn contains(&self, layer: L) -> bool {
        self.ranks.contains_key(&layer)
    }

    /// Number of declared layers.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// True when no layers were declared.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}
