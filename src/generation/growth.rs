//! Randomized region growth
//!
//! A handful of regions are chosen as growth targets, each with a budget.
//! Targets take turns absorbing one random region from their frontier; the
//! absorbed region's own neighbours join the frontier, so territory spreads
//! outwards organically. Once every target is out of budget or frontier, the
//! label grid is rewritten so each merged super-region carries the smallest
//! index it absorbed.

use rand::RngCore;
use tracing::{debug, trace};

use super::adjacency::AdjacencyMap;
use crate::error::{MapError, Result};
use crate::grid::Grid;
use crate::rng::{IntRange, RealRange};

/// Rejection sampling gives up after this many draws per region per target
pub const MAX_DRAWS_PER_TARGET: usize = 64;

/// A region selected to grow, and how many more regions it may absorb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthTarget {
    pub index: usize,
    pub remaining_growth: u32,
}

/// Statistics from one call to [`grow_regions`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowthSummary {
    /// Rounds run until no target could grow
    pub rounds: usize,
    /// Regions absorbed in total
    pub assimilations: usize,
    /// Distinct labels in the grid before growth
    pub regions_before: usize,
    /// Distinct labels in the grid after growth
    pub regions_after: usize,
}

/// Number of targets [`pick_growth_targets`] selects for `fraction`
pub fn growth_target_count(region_count: usize, fraction: f32) -> usize {
    (fraction as f64 * region_count as f64).round() as usize
}

/// Choose `round(fraction × region_count)` distinct regions to grow
///
/// Each target gets a budget drawn uniformly from `min_growth..=max_growth`.
/// Indices are drawn by rejection sampling; for every target the sampler
/// gives up after `MAX_DRAWS_PER_TARGET × region_count` draws.
///
/// # Errors
///
/// - `InvalidRange` if `fraction` is negative or not finite, or
///   `min_growth > max_growth`
/// - `TooManyGrowthTargets` if more targets than regions are requested
/// - `GrowthTargetStall` if the draw cap is hit
pub fn pick_growth_targets<R: RngCore + ?Sized>(
    region_count: usize,
    fraction: f32,
    min_growth: u32,
    max_growth: u32,
    rng: &mut R,
) -> Result<Vec<GrowthTarget>> {
    if !fraction.is_finite() || fraction < 0.0 {
        return Err(MapError::InvalidRange(format!(
            "growth target fraction must be a non-negative number (got {})",
            fraction
        )));
    }
    let budget = IntRange::new(min_growth as u64, max_growth as u64 + 1)?;

    let requested = growth_target_count(region_count, fraction);
    if requested > region_count {
        return Err(MapError::TooManyGrowthTargets {
            requested,
            available: region_count,
        });
    }
    if requested == 0 {
        return Ok(Vec::new());
    }

    let index_range = IntRange::new(0usize, region_count)?;
    let max_draws = MAX_DRAWS_PER_TARGET.saturating_mul(region_count);
    let mut claimed = vec![false; region_count];
    let mut targets = Vec::with_capacity(requested);

    while targets.len() < requested {
        let mut draws = 0;
        let index = loop {
            if draws == max_draws {
                return Err(MapError::GrowthTargetStall {
                    claimed: targets.len(),
                    requested,
                    draws,
                });
            }
            draws += 1;
            let candidate = index_range.draw(rng);
            if !claimed[candidate] {
                break candidate;
            }
        };

        claimed[index] = true;
        targets.push(GrowthTarget {
            index,
            remaining_growth: budget.draw(rng) as u32,
        });
    }

    debug!(
        regions = region_count,
        targets = targets.len(),
        min_growth,
        max_growth,
        "picked growth targets"
    );

    Ok(targets)
}

/// Grow `targets` over `adjacency` and rewrite `labels` with the merged ownership
///
/// `adjacency` must describe `labels` (see [`build_adjacency`](super::build_adjacency));
/// its frontier sets are consumed by the process.
///
/// # Errors
///
/// - `LabelOutOfRange` if a label or target index is not covered by `adjacency`
/// - `DuplicateGrowthTarget` if a region is listed twice
pub fn grow_regions<R: RngCore + ?Sized>(
    mut adjacency: AdjacencyMap,
    labels: &mut Grid<usize>,
    targets: &[GrowthTarget],
    rng: &mut R,
) -> Result<GrowthSummary> {
    let region_count = adjacency.region_count();
    let out_of_range = |label: usize| MapError::LabelOutOfRange {
        label,
        region_count,
    };

    if let Some(&label) = labels.iter().find(|&&label| label >= region_count) {
        return Err(out_of_range(label));
    }
    let mut is_target = vec![false; region_count];
    for target in targets {
        if target.index >= region_count {
            return Err(out_of_range(target.index));
        }
        if is_target[target.index] {
            return Err(MapError::DuplicateGrowthTarget(target.index));
        }
        is_target[target.index] = true;
    }

    let regions_before = count_distinct(labels, region_count);

    // Targets are never up for grabs
    for target in targets {
        adjacency.remove_everywhere(target.index);
    }

    let mut owner: Vec<usize> = (0..region_count).collect();
    let mut lowest: Vec<usize> = (0..region_count).collect();

    let pick = RealRange::<f64>::unit();
    let mut active = targets.to_vec();
    let mut rounds = 0;
    let mut assimilations = 0;

    while !active.is_empty() {
        rounds += 1;
        let mut still_active = Vec::with_capacity(active.len());

        for mut target in active.drain(..) {
            let frontier = &adjacency[target.index];
            if target.remaining_growth == 0 || frontier.is_empty() {
                trace!(target = target.index, round = rounds, "growth target exhausted");
                continue;
            }

            let at = ((pick.draw(rng) * frontier.len() as f64) as usize).min(frontier.len() - 1);
            let Some(absorbed) = frontier.get(at) else {
                continue;
            };

            adjacency.remove_everywhere(absorbed);
            let inherited: Vec<usize> = adjacency[absorbed].iter().collect();
            if let Some(frontier) = adjacency.neighbors_mut(target.index) {
                frontier.extend(inherited);
            }

            owner[absorbed] = target.index;
            lowest[target.index] = lowest[target.index].min(absorbed);
            target.remaining_growth -= 1;
            assimilations += 1;

            trace!(target = target.index, absorbed, round = rounds, "assimilated region");
            still_active.push(target);
        }

        active = still_active;
    }

    for label in labels.iter_mut() {
        *label = lowest[owner[*label]];
    }

    let summary = GrowthSummary {
        rounds,
        assimilations,
        regions_before,
        regions_after: count_distinct(labels, region_count),
    };
    debug!(
        rounds = summary.rounds,
        assimilations = summary.assimilations,
        regions_before = summary.regions_before,
        regions_after = summary.regions_after,
        "grew regions"
    );

    Ok(summary)
}

fn count_distinct(labels: &Grid<usize>, region_count: usize) -> usize {
    let mut seen = vec![false; region_count];
    let mut distinct = 0;
    for &label in labels {
        if !std::mem::replace(&mut seen[label], true) {
            distinct += 1;
        }
    }
    distinct
}
