//! Multiplicatively weighted Voronoi labeling on a toroidal plane
//!
//! Every grid cell is labeled with the centre that minimises
//! `distance(cell, centre) / weight`. A heavier centre therefore claims
//! proportionally more area.
//!
//! With tiling enabled, centres close to an edge are also projected onto the
//! opposite side of the plane ("ghost" sites). Ghosts only take part in
//! distance queries and carry the index of the centre they were copied from,
//! so labels stay seamless across the wrap-around boundary.

use std::time::Instant;

use glam::{UVec2, Vec2};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::distance::DistanceMetric;
use crate::error::{MapError, Result};
use crate::grid::Grid;

/// Edge projection settings for seamless wrap-around
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tiling {
    /// Whether ghost sites are generated at all
    pub enabled: bool,
    /// Width of the edge band, as a percentage of each dimension, whose
    /// centres are projected across the boundary (0-50)
    pub threshold_percent: u8,
}

impl Tiling {
    /// No ghost sites; labels do not wrap
    pub const DISABLED: Tiling = Tiling {
        enabled: false,
        threshold_percent: 10,
    };

    /// Ghost sites for centres within `threshold_percent` of an edge
    pub fn enabled(threshold_percent: u8) -> Self {
        Self {
            enabled: true,
            threshold_percent,
        }
    }

    fn fraction(self) -> f32 {
        0.01 * self.threshold_percent as f32
    }
}

impl Default for Tiling {
    fn default() -> Self {
        Tiling::enabled(10)
    }
}

/// A logical region centre
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centre {
    /// Position on the plane
    pub position: Vec2,
    /// Multiplicative weight (> 0); larger claims more area
    pub weight: f32,
    /// Permanent region identity, equal to the insertion order
    pub index: usize,
}

/// A point that takes part in distance queries
///
/// Each logical centre owns one site at its own position, followed by any
/// ghost sites projected across the boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Site {
    pub position: Vec2,
    /// Index of the centre this site belongs to
    pub centre: usize,
}

/// Growable weighted Voronoi diagram over a `plane`-sized torus
///
/// # Example
///
/// ```
/// use glam::{UVec2, Vec2};
/// use voronoi_regions::{DistanceFunction, Tiling, WeightedVoronoi};
///
/// let mut voronoi = WeightedVoronoi::new(Vec2::new(8.0, 8.0), Tiling::DISABLED);
/// voronoi.add_centre(Vec2::new(1.0, 1.0), 1.0).unwrap();
/// voronoi.add_centre(Vec2::new(6.0, 6.0), 2.0).unwrap();
///
/// let labels = voronoi.to_map(UVec2::new(8, 8), &DistanceFunction::Euclidean).unwrap();
/// assert_eq!(labels[(0, 0)], 0);
/// assert_eq!(labels[(7, 7)], 1);
/// ```
#[derive(Debug, Clone)]
pub struct WeightedVoronoi {
    plane: Vec2,
    tiling: Tiling,
    centres: Vec<Centre>,
    sites: Vec<Site>,
}

impl WeightedVoronoi {
    pub fn new(plane: Vec2, tiling: Tiling) -> Self {
        Self {
            plane,
            tiling,
            centres: Vec::new(),
            sites: Vec::new(),
        }
    }

    /// Create a diagram with room for `capacity` centres
    pub fn with_capacity(plane: Vec2, tiling: Tiling, capacity: usize) -> Self {
        Self {
            plane,
            tiling,
            centres: Vec::with_capacity(capacity),
            sites: Vec::with_capacity(capacity),
        }
    }

    /// Add a centre and return its index
    ///
    /// # Errors
    ///
    /// Returns `InvalidCentre` if `position` is outside the plane or `weight`
    /// is not a finite positive number
    pub fn add_centre(&mut self, position: Vec2, weight: f32) -> Result<usize> {
        if !position.is_finite()
            || position.x < 0.0
            || position.y < 0.0
            || position.x > self.plane.x
            || position.y > self.plane.y
        {
            return Err(MapError::InvalidCentre(format!(
                "position ({}, {}) lies outside the {}x{} plane",
                position.x, position.y, self.plane.x, self.plane.y
            )));
        }
        if !weight.is_finite() || weight <= 0.0 {
            return Err(MapError::InvalidCentre(format!(
                "weight must be positive (got {})",
                weight
            )));
        }

        let index = self.centres.len();
        self.centres.push(Centre {
            position,
            weight,
            index,
        });
        self.sites.push(Site {
            position,
            centre: index,
        });
        if self.tiling.enabled {
            self.project_ghosts(position, index);
        }

        Ok(index)
    }

    /// Number of logical centres (ghosts excluded)
    #[inline]
    pub fn len(&self) -> usize {
        self.centres.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.centres.is_empty()
    }

    #[inline]
    pub fn plane(&self) -> Vec2 {
        self.plane
    }

    #[inline]
    pub fn tiling(&self) -> Tiling {
        self.tiling
    }

    pub fn centres(&self) -> &[Centre] {
        &self.centres
    }

    pub fn get_centre(&self, index: usize) -> Option<&Centre> {
        self.centres.get(index)
    }

    /// All distance query sites, in query order
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Number of ghost sites
    pub fn ghost_count(&self) -> usize {
        self.sites.len() - self.centres.len()
    }

    /// Label every cell of a `dimensions`-sized grid with its nearest centre
    ///
    /// # Errors
    ///
    /// Returns `NoCentres` if no centre was added, or `InvalidDimensions` for
    /// a zero-sized grid
    pub fn to_map<D: DistanceMetric + ?Sized>(
        &self,
        dimensions: UVec2,
        metric: &D,
    ) -> Result<Grid<usize>> {
        self.to_map_with_offset(dimensions, Vec2::ZERO, metric)
    }

    /// Like [`to_map`](Self::to_map), sampling cell `(x, y)` at `offset + (x, y)`
    ///
    /// Useful for labeling one tile of a larger plane.
    pub fn to_map_with_offset<D: DistanceMetric + ?Sized>(
        &self,
        dimensions: UVec2,
        offset: Vec2,
        metric: &D,
    ) -> Result<Grid<usize>> {
        if self.centres.is_empty() {
            return Err(MapError::NoCentres);
        }

        let start = Instant::now();
        let mut map = Grid::from_dimensions(dimensions, 0usize)?;
        for (pos, label) in map.in_context_mut() {
            *label = self.nearest_centre(offset + pos.as_vec2(), metric);
        }

        debug!(
            width = dimensions.x,
            height = dimensions.y,
            centres = self.centres.len(),
            ghosts = self.ghost_count(),
            elapsed = ?start.elapsed(),
            "labeled voronoi map"
        );

        Ok(map)
    }

    /// Index of the centre with the smallest weighted distance to `point`
    ///
    /// Ties keep the earliest site in query order.
    pub fn nearest_centre<D: DistanceMetric + ?Sized>(&self, point: Vec2, metric: &D) -> usize {
        let mut shortest = f32::MAX;
        let mut closest = self.sites.first().map_or(0, |site| site.centre);

        for site in &self.sites {
            let weight = self.centres[site.centre].weight;
            let distance = metric.distance(point, site.position) * (1.0 / weight);
            if distance < shortest {
                shortest = distance;
                closest = site.centre;
            }
        }

        closest
    }

    fn project_ghosts(&mut self, position: Vec2, centre: usize) {
        let band = self.tiling.fraction();
        let (w, h) = (self.plane.x, self.plane.y);

        // Each edge band is checked on its own; bands wider than half the
        // plane overlap and trigger shifts in both directions.
        let near_west = position.x < band * w;
        let near_east = position.x > (1.0 - band) * w;
        let near_north = position.y < band * h;
        let near_south = position.y > (1.0 - band) * h;

        let allowed = |shift: i8, low: bool, high: bool| match shift {
            1 => low,
            -1 => high,
            _ => true,
        };

        // Fixed emission order keeps tie-breaking reproducible
        const OFFSETS: [(i8, i8); 8] = [
            (-1, -1),
            (0, -1),
            (1, -1),
            (1, 0),
            (1, 1),
            (0, 1),
            (-1, 1),
            (-1, 0),
        ];

        for (sx, sy) in OFFSETS {
            if !allowed(sx, near_west, near_east) || !allowed(sy, near_north, near_south) {
                continue;
            }
            self.sites.push(Site {
                position: position + Vec2::new(sx as f32 * w, sy as f32 * h),
                centre,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::distance::{
        Chebyshev, DistanceFunction, Manhattan, SquaredEuclidean, Weirdness,
    };

    fn plane(side: f32) -> Vec2 {
        Vec2::new(side, side)
    }

    #[test]
    fn test_indices_follow_insertion_order() {
        let mut voronoi = WeightedVoronoi::new(plane(10.0), Tiling::default());
        for i in 0..5 {
            let index = voronoi.add_centre(Vec2::new(i as f32, i as f32), 1.0).unwrap();
            assert_eq!(index, i);
        }
        assert_eq!(voronoi.len(), 5);
        assert!(voronoi.centres().iter().enumerate().all(|(i, c)| c.index == i));
    }

    #[test]
    fn test_invalid_centres_rejected() {
        let mut voronoi = WeightedVoronoi::new(plane(10.0), Tiling::DISABLED);
        assert!(voronoi.add_centre(Vec2::new(11.0, 1.0), 1.0).is_err());
        assert!(voronoi.add_centre(Vec2::new(1.0, -0.5), 1.0).is_err());
        assert!(voronoi.add_centre(Vec2::new(1.0, 1.0), 0.0).is_err());
        assert!(voronoi.add_centre(Vec2::new(1.0, 1.0), -2.0).is_err());
        assert!(voronoi.add_centre(Vec2::new(f32::NAN, 1.0), 1.0).is_err());
        assert!(voronoi.is_empty());
    }

    #[test]
    fn test_empty_diagram_cannot_label() {
        let voronoi = WeightedVoronoi::new(plane(4.0), Tiling::DISABLED);
        let result = voronoi.to_map(UVec2::new(4, 4), &SquaredEuclidean);
        assert_eq!(result.unwrap_err(), MapError::NoCentres);
    }

    #[test]
    fn test_two_by_two_tie_break() {
        let mut voronoi = WeightedVoronoi::new(plane(2.0), Tiling::DISABLED);
        voronoi.add_centre(Vec2::new(0.0, 0.0), 1.0).unwrap();
        voronoi.add_centre(Vec2::new(1.0, 1.0), 1.0).unwrap();

        let map = voronoi.to_map(UVec2::new(2, 2), &SquaredEuclidean).unwrap();
        assert_eq!(map[(0, 0)], 0);
        assert_eq!(map[(1, 0)], 0);
        assert_eq!(map[(0, 1)], 0);
        assert_eq!(map[(1, 1)], 1);
    }

    #[test]
    fn test_tie_goes_to_first_inserted_even_when_reversed() {
        let mut voronoi = WeightedVoronoi::new(plane(2.0), Tiling::DISABLED);
        voronoi.add_centre(Vec2::new(1.0, 1.0), 1.0).unwrap();
        voronoi.add_centre(Vec2::new(0.0, 0.0), 1.0).unwrap();

        let map = voronoi.to_map(UVec2::new(2, 2), &SquaredEuclidean).unwrap();
        assert_eq!(map[(1, 0)], 0);
        assert_eq!(map[(0, 1)], 0);
        assert_eq!(map[(0, 0)], 1);
    }

    #[test]
    fn test_single_centre_covers_grid_for_every_metric() {
        let mut voronoi = WeightedVoronoi::new(plane(6.0), Tiling::default());
        voronoi.add_centre(Vec2::new(0.5, 5.5), 3.0).unwrap();

        for function in DistanceFunction::ALL {
            let map = voronoi.to_map(UVec2::new(6, 6), &function).unwrap();
            assert!(map.iter().all(|&label| label == 0), "{}", function);
        }
    }

    #[test]
    fn test_labels_are_total() {
        let mut voronoi = WeightedVoronoi::new(plane(32.0), Tiling::default());
        for i in 0..17 {
            let t = i as f32;
            voronoi
                .add_centre(Vec2::new((t * 7.3) % 32.0, (t * 3.1) % 32.0), 1.0 + (i % 3) as f32)
                .unwrap();
        }

        let map = voronoi.to_map(UVec2::new(32, 32), &Manhattan).unwrap();
        assert_eq!(map.len(), 32 * 32);
        assert!(map.iter().all(|&label| label < voronoi.len()));
    }

    #[test]
    fn test_weight_divides_distance() {
        let mut voronoi = WeightedVoronoi::new(Vec2::new(10.0, 1.0), Tiling::DISABLED);
        voronoi.add_centre(Vec2::new(0.0, 0.0), 1.0).unwrap();
        voronoi.add_centre(Vec2::new(9.0, 0.0), 4.0).unwrap();

        let map = voronoi.to_map(UVec2::new(10, 1), &Manhattan).unwrap();
        // Boundary where d0 = d1 / 4: x = (9 - x) / 4 => x = 1.8
        let labels: Vec<usize> = map.iter().copied().collect();
        assert_eq!(labels, vec![0, 0, 1, 1, 1, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_interior_centre_has_no_ghosts() {
        let mut voronoi = WeightedVoronoi::new(plane(100.0), Tiling::default());
        voronoi.add_centre(Vec2::new(50.0, 50.0), 1.0).unwrap();
        assert_eq!(voronoi.ghost_count(), 0);
        assert_eq!(voronoi.sites().len(), 1);
    }

    #[test]
    fn test_edge_centre_gets_one_ghost() {
        let mut voronoi = WeightedVoronoi::new(plane(100.0), Tiling::default());
        voronoi.add_centre(Vec2::new(5.0, 50.0), 1.0).unwrap();

        assert_eq!(voronoi.len(), 1);
        assert_eq!(voronoi.ghost_count(), 1);
        assert_eq!(voronoi.sites()[1].position, Vec2::new(105.0, 50.0));
        assert_eq!(voronoi.sites()[1].centre, 0);
    }

    #[test]
    fn test_corner_centre_gets_three_ghosts_in_order() {
        let mut voronoi = WeightedVoronoi::new(plane(100.0), Tiling::default());
        voronoi.add_centre(Vec2::new(95.0, 3.0), 1.0).unwrap();

        let ghosts: Vec<Vec2> = voronoi.sites()[1..].iter().map(|s| s.position).collect();
        assert_eq!(
            ghosts,
            vec![
                Vec2::new(95.0, 103.0),
                Vec2::new(-5.0, 103.0),
                Vec2::new(-5.0, 3.0),
            ]
        );
        assert_eq!(voronoi.len(), 1);
    }

    #[test]
    fn test_overlapping_bands_project_every_copy() {
        let mut voronoi = WeightedVoronoi::new(plane(100.0), Tiling::enabled(60));
        voronoi.add_centre(Vec2::new(50.0, 50.0), 1.0).unwrap();

        let ghosts: Vec<Vec2> = voronoi.sites()[1..].iter().map(|s| s.position).collect();
        assert_eq!(
            ghosts,
            vec![
                Vec2::new(-50.0, -50.0),
                Vec2::new(50.0, -50.0),
                Vec2::new(150.0, -50.0),
                Vec2::new(150.0, 50.0),
                Vec2::new(150.0, 150.0),
                Vec2::new(50.0, 150.0),
                Vec2::new(-50.0, 150.0),
                Vec2::new(-50.0, 50.0),
            ]
        );
    }

    #[test]
    fn test_get_centre() {
        let mut voronoi = WeightedVoronoi::new(plane(10.0), Tiling::DISABLED);
        voronoi.add_centre(Vec2::new(3.0, 4.0), 2.5).unwrap();

        let centre = voronoi.get_centre(0).unwrap();
        assert_eq!(centre.position, Vec2::new(3.0, 4.0));
        assert_eq!(centre.weight, 2.5);
        assert!(voronoi.get_centre(1).is_none());
    }

    #[test]
    fn test_ghosts_follow_their_centre() {
        let mut voronoi = WeightedVoronoi::new(plane(100.0), Tiling::default());
        voronoi.add_centre(Vec2::new(2.0, 2.0), 1.0).unwrap();
        voronoi.add_centre(Vec2::new(50.0, 50.0), 1.0).unwrap();

        let owners: Vec<usize> = voronoi.sites().iter().map(|s| s.centre).collect();
        assert_eq!(owners, vec![0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_tiling_wraps_labels_across_edge() {
        let side = 20.0;
        let mut tiled = WeightedVoronoi::new(plane(side), Tiling::default());
        let mut flat = WeightedVoronoi::new(plane(side), Tiling::DISABLED);
        for voronoi in [&mut tiled, &mut flat] {
            voronoi.add_centre(Vec2::new(1.0, 10.0), 1.0).unwrap();
            voronoi.add_centre(Vec2::new(12.0, 10.0), 1.0).unwrap();
        }

        let tiled_map = tiled.to_map(UVec2::new(20, 20), &SquaredEuclidean).unwrap();
        let flat_map = flat.to_map(UVec2::new(20, 20), &SquaredEuclidean).unwrap();

        // x = 19 is 2 away from centre 0 across the seam, 7 from centre 1
        assert_eq!(tiled_map[(19, 10)], 0);
        assert_eq!(flat_map[(19, 10)], 1);
    }

    #[test]
    fn test_offset_shifts_samples() {
        let mut voronoi = WeightedVoronoi::new(plane(8.0), Tiling::DISABLED);
        voronoi.add_centre(Vec2::new(0.0, 0.0), 1.0).unwrap();
        voronoi.add_centre(Vec2::new(6.0, 0.0), 1.0).unwrap();

        let full = voronoi.to_map(UVec2::new(8, 1), &Chebyshev).unwrap();
        let tile = voronoi
            .to_map_with_offset(UVec2::new(4, 1), Vec2::new(4.0, 0.0), &Chebyshev)
            .unwrap();
        for x in 0..4 {
            assert_eq!(tile[(x, 0)], full[(x + 4, 0)]);
        }
    }

    #[test]
    fn test_weirdness_metric_labels() {
        let mut voronoi = WeightedVoronoi::new(plane(9.0), Tiling::DISABLED);
        voronoi.add_centre(Vec2::new(0.0, 0.0), 1.0).unwrap();
        voronoi.add_centre(Vec2::new(8.0, 8.0), 1.0).unwrap();

        let map = voronoi.to_map(UVec2::new(9, 9), &Weirdness).unwrap();
        assert_eq!(map[(1, 1)], 0);
        assert_eq!(map[(7, 7)], 1);
        // (4, 4) is an exact tie
        assert_eq!(map[(4, 4)], 0);
    }
}
