//! RegionMap main structure

use std::collections::HashSet;

use glam::UVec2;
use rand::RngCore;
use tracing::info;

use crate::config::MapConfig;
use crate::error::Result;
use crate::generation::{
    build_adjacency_for, generate_labels, AdjacencyMap, Centre, GrowthSummary, WeightedVoronoi,
};
use crate::grid::Grid;
use crate::rng::Xoroshiro128Plus;

/// A generated region map
///
/// Holds the Voronoi centres the map was built from, the final label grid
/// after region growth, and statistics about the growth pass. Labels are
/// original centre indices; a merged region carries the smallest index it
/// absorbed.
///
/// # Examples
///
/// ```
/// use voronoi_regions::*;
///
/// let config = MapConfigBuilder::new()
///     .seed(42)
///     .map_size(MapSize::Custom { width: 48, height: 48, centre_count: 40 })
///     .build();
///
/// let map = RegionMap::generate(config).unwrap();
/// println!("{} regions after growth", map.distinct_labels().len());
///
/// let label = map.label_at(10, 20).unwrap();
/// assert!(label < map.region_count());
/// ```
#[derive(Debug, Clone)]
pub struct RegionMap {
    /// Configuration used to generate this map
    config: MapConfig,

    /// Centres the labeling was computed from
    voronoi: WeightedVoronoi,

    /// Final labels, one per cell
    labels: Grid<usize>,

    /// What the growth pass did
    summary: GrowthSummary,
}

impl RegionMap {
    /// Generate a map with an engine seeded from `config.seed`
    ///
    /// # Example
    ///
    /// ```
    /// use voronoi_regions::*;
    ///
    /// let config = MapConfigBuilder::new()
    ///     .seed(7)
    ///     .map_size(MapSize::Custom { width: 32, height: 32, centre_count: 16 })
    ///     .build();
    ///
    /// let a = RegionMap::generate(config).unwrap();
    /// let b = RegionMap::generate(config).unwrap();
    /// assert_eq!(a.labels(), b.labels());
    /// ```
    pub fn generate(config: MapConfig) -> Result<Self> {
        let mut engine = Xoroshiro128Plus::new(config.seed);
        Self::generate_with_rng(config, &mut engine)
    }

    /// Generate a map driven by any random engine
    ///
    /// `config.seed` is ignored; the engine decides every draw.
    pub fn generate_with_rng<R: RngCore + ?Sized>(config: MapConfig, rng: &mut R) -> Result<Self> {
        let (voronoi, labels, summary) = generate_labels(&config, rng)?;

        info!(
            width = config.width,
            height = config.height,
            centres = voronoi.len(),
            regions = summary.regions_after,
            distance = %config.distance_function,
            "generated region map"
        );

        Ok(Self {
            config,
            voronoi,
            labels,
            summary,
        })
    }

    /// Get the configuration used to generate this map
    #[inline]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Final label grid
    #[inline]
    pub fn labels(&self) -> &Grid<usize> {
        &self.labels
    }

    /// Take ownership of the label grid, e.g. to hand it to an image encoder
    pub fn into_labels(self) -> Grid<usize> {
        self.labels
    }

    /// Label of the cell at `(x, y)`, or `None` outside the grid
    #[inline]
    pub fn label_at(&self, x: u32, y: u32) -> Option<usize> {
        self.labels.get(x, y).copied()
    }

    /// Number of original regions (one per centre)
    #[inline]
    pub fn region_count(&self) -> usize {
        self.voronoi.len()
    }

    /// Centres in index order
    #[inline]
    pub fn centres(&self) -> &[Centre] {
        self.voronoi.centres()
    }

    /// The Voronoi diagram, ghost sites included
    #[inline]
    pub fn voronoi(&self) -> &WeightedVoronoi {
        &self.voronoi
    }

    /// Statistics from the growth pass
    #[inline]
    pub fn summary(&self) -> &GrowthSummary {
        &self.summary
    }

    /// Labels still present after growth, ascending
    pub fn distinct_labels(&self) -> Vec<usize> {
        let mut present = vec![false; self.region_count()];
        for &label in &self.labels {
            present[label] = true;
        }
        present
            .iter()
            .enumerate()
            .filter_map(|(label, &here)| here.then_some(label))
            .collect()
    }

    /// Number of cells carrying `label`
    pub fn region_area(&self, label: usize) -> usize {
        self.labels.iter().filter(|&&l| l == label).count()
    }

    /// Positions of every cell carrying `label`, in row-major order
    pub fn region_cells(&self, label: usize) -> Vec<UVec2> {
        self.labels
            .in_context()
            .filter(|(_, l)| **l == label)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Adjacency of the final (merged) regions
    pub fn adjacency(&self) -> Result<AdjacencyMap> {
        build_adjacency_for(&self.labels, self.region_count())
    }

    /// Regions reachable from `label` within `hops` borders (BFS)
    ///
    /// Includes `label` itself. Returns an empty vec if `label` is not
    /// present in the final map.
    pub fn regions_within_hops(&self, label: usize, hops: usize) -> Result<Vec<usize>> {
        if label >= self.region_count() || !self.labels.iter().any(|&l| l == label) {
            return Ok(vec![]);
        }
        let adjacency = self.adjacency()?;

        let mut visited = HashSet::new();
        let mut current = vec![label];
        visited.insert(label);

        for _ in 0..hops {
            let mut next = Vec::new();
            for &region in &current {
                for neighbor in &adjacency[region] {
                    if visited.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            current = next;
        }

        let mut regions: Vec<usize> = visited.into_iter().collect();
        regions.sort_unstable();
        Ok(regions)
    }
}
