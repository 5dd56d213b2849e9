//! Occlusion resolution: clip each line against the lines drawn over it.
//!
//! Every candidate fragment is compared against the *original* segments,
//! never against other in-flight fragments, so a line cannot be clipped by
//! pieces of itself. Only parallel, coincident overlaps clip; lines that
//! merely cross each other are left intact.

use linecorral_math::{distance_to_line, project_parameter, segment_within, Tolerance2D};
use slotmap::SlotMap;

use crate::layer::LayerTag;
use crate::priority::PriorityTable;
use crate::segment::{FragmentId, LineRecord, Segment};

/// Counters from one resolver run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Segments handed to the resolver.
    pub input: usize,
    /// Visible segments produced.
    pub output: usize,
    /// Fragments dropped as hidden or degenerate.
    pub discarded: usize,
    /// Extra fragments created by splitting a line around an overlap.
    pub splits: usize,
}

/// A pending or finished fragment plus its creation order.
#[derive(Debug, Clone, Copy)]
struct Fragment {
    segment: Segment,
    order: usize,
}

/// What is left of a fragment after clipping.
#[derive(Debug, Default)]
struct ClipOutcome {
    kept: Option<Segment>,
    spilled: Vec<Segment>,
}

/// How a dominant segment overlaps a candidate.
#[derive(Debug)]
enum Overlap {
    None,
    Consumed,
    Trimmed(Segment, Option<Segment>),
}

/// Resolve occlusion over a page of segments.
///
/// `records[segment.record]` must exist for every segment. Output is sorted
/// by insertion index, then by fragment creation order.
pub fn resolve<L: LayerTag>(
    segments: &[Segment],
    records: &[LineRecord<L>],
    priorities: &PriorityTable<L>,
    tolerance: &Tolerance2D,
) -> Vec<Segment> {
    resolve_with_stats(segments, records, priorities, tolerance).0
}

/// [`resolve`], also returning run statistics.
pub fn resolve_with_stats<L: LayerTag>(
    segments: &[Segment],
    records: &[LineRecord<L>],
    priorities: &PriorityTable<L>,
    tolerance: &Tolerance2D,
) -> (Vec<Segment>, ResolveStats) {
    let mut stats = ResolveStats {
        input: segments.len(),
        ..Default::default()
    };

    let mut arena: SlotMap<FragmentId, Fragment> = SlotMap::with_key();
    let mut work: Vec<FragmentId> = Vec::with_capacity(segments.len());
    let mut next_order = 0;
    for segment in segments {
        work.push(arena.insert(Fragment {
            segment: *segment,
            order: next_order,
        }));
        next_order += 1;
    }

    let mut output: Vec<Fragment> = Vec::new();
    while let Some(id) = work.pop() {
        let Some(fragment) = arena.remove(id) else {
            continue;
        };

        let outcome = clip_fragment(&fragment.segment, segments, records, priorities, tolerance);

        for piece in outcome.spilled {
            stats.splits += 1;
            work.push(arena.insert(Fragment {
                segment: piece,
                order: next_order,
            }));
            next_order += 1;
        }

        match outcome.kept {
            Some(segment) => output.push(Fragment {
                segment,
                order: fragment.order,
            }),
            None => stats.discarded += 1,
        }
    }

    output.sort_by_key(|f| (f.segment.index, f.order));
    stats.output = output.len();
    log::debug!(
        "resolved {} segments into {} ({} discarded, {} splits)",
        stats.input,
        stats.output,
        stats.discarded,
        stats.splits
    );

    (output.into_iter().map(|f| f.segment).collect(), stats)
}

/// True when segment `b` is drawn over segment `a`.
///
/// Between equal layers the later insertion wins.
fn dominates<L: LayerTag>(
    priorities: &PriorityTable<L>,
    layer_b: L,
    index_b: u32,
    layer_a: L,
    index_a: u32,
) -> bool {
    priorities.obscures(layer_b, layer_a) || (layer_b == layer_a && index_a < index_b)
}

/// Clip one fragment against every dominant original.
fn clip_fragment<L: LayerTag>(
    candidate: &Segment,
    originals: &[Segment],
    records: &[LineRecord<L>],
    priorities: &PriorityTable<L>,
    tol: &Tolerance2D,
) -> ClipOutcome {
    let mut outcome = ClipOutcome::default();
    if tol.is_degenerate(&candidate.start, &candidate.end) {
        return outcome;
    }

    let layer_a = records[candidate.record].layer;
    let mut current = *candidate;

    for other in originals {
        if other.index == current.index {
            continue;
        }
        let layer_b = records[other.record].layer;
        if !dominates(priorities, layer_b, other.index, layer_a, current.index) {
            continue;
        }
        if !current.bounds.intersects(&other.bounds) {
            continue;
        }
        let dir_a = current.start.delta_to(&current.end);
        let dir_b = other.start.delta_to(&other.end);
        if !tol.are_parallel(&dir_a, &dir_b) {
            continue;
        }

        if segment_within(&current.start, &current.end, &other.start, &other.end, tol.linear) {
            return outcome;
        }

        match subtract_overlap(&current, other, tol) {
            Overlap::None => {}
            Overlap::Consumed => return outcome,
            Overlap::Trimmed(kept, extra) => {
                current = kept;
                outcome.spilled.extend(extra);
            }
        }
    }

    outcome.kept = Some(current);
    outcome
}

/// Remove the part of `a` that coincides with a parallel segment `b`.
fn subtract_overlap(a: &Segment, b: &Segment, tol: &Tolerance2D) -> Overlap {
    let len_a = a.length();
    let t0 = project_parameter(&b.start, &a.start, &a.end);
    let t1 = project_parameter(&b.end, &a.start, &a.end);
    let lo = t0.min(t1).max(0.0);
    let hi = t0.max(t1).min(1.0);
    if (hi - lo) * len_a <= tol.linear {
        return Overlap::None;
    }

    // The shared sub-range must lie on `b`'s line, not on a parallel offset line.
    let cut_lo = a.point_at(lo);
    let cut_hi = a.point_at(hi);
    if distance_to_line(&cut_lo, &b.start, &b.end) > tol.linear
        || distance_to_line(&cut_hi, &b.start, &b.end) > tol.linear
    {
        return Overlap::None;
    }

    let near = (lo * len_a > tol.linear).then(|| a.fragment(a.start, cut_lo, tol.linear));
    let far = ((1.0 - hi) * len_a > tol.linear).then(|| a.fragment(cut_hi, a.end, tol.linear));

    match (near, far) {
        (None, None) => Overlap::Consumed,
        (Some(near), far) => Overlap::Trimmed(near, far),
        (None, Some(far)) => Overlap::Trimmed(far, None),
    }
}
