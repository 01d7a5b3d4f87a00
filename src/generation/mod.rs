//! Core region map generation
//!
//! Labels a grid with a weighted Voronoi diagram, extracts the region
//! adjacency graph and merges regions through randomized growth.

mod adjacency;
mod distance;
mod growth;
mod voronoi;

pub use adjacency::{build_adjacency, build_adjacency_for, AdjacencyMap, FrontierSet};
pub use distance::{
    Chebyshev, DistanceFunction, DistanceMetric, Manhattan, SquaredEuclidean, Weirdness,
};
pub use growth::{
    grow_regions, growth_target_count, pick_growth_targets, GrowthSummary, GrowthTarget,
    MAX_DRAWS_PER_TARGET,
};
pub use voronoi::{Centre, Site, Tiling, WeightedVoronoi};

use std::time::Instant;

use glam::Vec2;
use rand::RngCore;
use tracing::debug;

use crate::config::MapConfig;
use crate::error::Result;
use crate::grid::Grid;
use crate::rng::RealRange;

/// Scatter `config.centre_count` random centres over the plane
///
/// Each centre consumes three draws in order: x, y, weight.
pub fn scatter_centres<R: RngCore + ?Sized>(
    config: &MapConfig,
    rng: &mut R,
) -> Result<WeightedVoronoi> {
    let plane = Vec2::new(config.width as f32, config.height as f32);
    let x_range = RealRange::new(0.0f32, plane.x)?;
    let y_range = RealRange::new(0.0f32, plane.y)?;
    let weight_range = RealRange::new(config.weight_min, config.weight_max)?;

    let mut voronoi = WeightedVoronoi::with_capacity(plane, config.tiling, config.centre_count);
    for _ in 0..config.centre_count {
        let position = Vec2::new(x_range.draw(rng), y_range.draw(rng));
        let weight = weight_range.draw(rng);
        voronoi.add_centre(position, weight)?;
    }

    Ok(voronoi)
}

/// Run the whole pipeline on an existing engine
///
/// Returns the centres, the final (grown) labels and the growth statistics.
pub fn generate_labels<R: RngCore + ?Sized>(
    config: &MapConfig,
    rng: &mut R,
) -> Result<(WeightedVoronoi, Grid<usize>, GrowthSummary)> {
    let start = Instant::now();

    // Step 1: Scatter weighted centres
    let voronoi = scatter_centres(config, rng)?;

    // Step 2: Nearest-centre labeling
    let mut labels = voronoi.to_map(config.dimensions(), &config.distance_function)?;
    let labeled = start.elapsed();

    // Step 3: Region adjacency
    let adjacency = build_adjacency_for(&labels, voronoi.len())?;

    // Step 4: Pick targets and grow
    let targets = pick_growth_targets(
        voronoi.len(),
        config.growth_fraction,
        config.min_growth,
        config.max_growth,
        rng,
    )?;
    let summary = grow_regions(adjacency, &mut labels, &targets, rng)?;

    debug!(
        labeling = ?labeled,
        total = ?start.elapsed(),
        regions = summary.regions_after,
        "generated region labels"
    );

    Ok((voronoi, labels, summary))
}
