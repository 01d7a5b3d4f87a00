//! Region map configuration and builder
//!
//! This module provides configuration types for deterministic region map generation.

use glam::{UVec2, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::generation::{DistanceFunction, Tiling};

/// Map size presets
///
/// Each size maps to a square side length and a number of Voronoi centres
/// with roughly the same density.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapSize {
    /// 128×128 cells, 128 centres
    Tiny,
    /// 256×256 cells, 256 centres
    Small,
    /// 512×512 cells, 1024 centres (default)
    #[default]
    Medium,
    /// 1024×1024 cells, 4096 centres
    Large,
    /// Custom map size
    Custom {
        width: u32,
        height: u32,
        centre_count: usize,
    },
}

impl MapSize {
    /// Grid dimensions for this size
    pub fn dimensions(self) -> UVec2 {
        match self {
            MapSize::Tiny => UVec2::splat(128),
            MapSize::Small => UVec2::splat(256),
            MapSize::Medium => UVec2::splat(512),
            MapSize::Large => UVec2::splat(1024),
            MapSize::Custom { width, height, .. } => UVec2::new(width, height),
        }
    }

    /// Number of Voronoi centres for this size
    pub fn centre_count(self) -> usize {
        match self {
            MapSize::Tiny => 128,
            MapSize::Small => 256,
            MapSize::Medium => 1024,
            MapSize::Large => 4096,
            MapSize::Custom { centre_count, .. } => centre_count,
        }
    }

    /// Get a human-readable name for this map size
    pub fn name(self) -> &'static str {
        match self {
            MapSize::Tiny => "Tiny",
            MapSize::Small => "Small",
            MapSize::Medium => "Medium",
            MapSize::Large => "Large",
            MapSize::Custom { .. } => "Custom",
        }
    }
}

/// Configuration for deterministic region map generation
///
/// The same configuration always produces the identical map.
///
/// # Example
///
/// ```rust
/// use voronoi_regions::*;
///
/// let config = MapConfigBuilder::new()
///     .seed(42)
///     .map_size(MapSize::Tiny)
///     .build();
///
/// // Config is serializable (with "serde" feature)
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: MapConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config.seed, restored.seed);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    /// Seed for the xoroshiro128+ engine driving every random draw
    pub seed: u64,

    /// Grid width in cells (also the plane width centres are scattered over)
    pub width: u32,

    /// Grid height in cells
    pub height: u32,

    /// Number of Voronoi centres (initial regions)
    pub centre_count: usize,

    /// Lower bound of the random centre weight
    pub weight_min: f32,

    /// Upper bound of the random centre weight
    ///
    /// With `weight_min == weight_max` every region gets the same weight and
    /// the diagram is unweighted.
    pub weight_max: f32,

    /// Metric used for nearest-centre labeling
    pub distance_function: DistanceFunction,

    /// Ghost centre projection for seamless wrap-around
    pub tiling: Tiling,

    /// Fraction of regions picked as growth targets (0.0-1.0)
    pub growth_fraction: f32,

    /// Smallest growth budget a target can receive
    pub min_growth: u32,

    /// Largest growth budget a target can receive (inclusive)
    pub max_growth: u32,
}

impl MapConfig {
    /// Grid dimensions
    #[inline]
    pub fn dimensions(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    /// Plane size that centres are scattered over
    #[inline]
    pub fn plane(&self) -> Vec2 {
        self.dimensions().as_vec2()
    }

    /// Number of cells in the label grid
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfigBuilder::new().build()
    }
}

/// Builder for creating MapConfig with validation
///
/// # Example
///
/// ```rust
/// use voronoi_regions::*;
///
/// // Use defaults
/// let config = MapConfigBuilder::new().build();
///
/// // Customize
/// let config = MapConfigBuilder::new()
///     .seed(12345)
///     .map_size(MapSize::Small)
///     .distance_function(DistanceFunction::Manhattan)
///     .weight_range(1.0, 3.0)
///     .unwrap()
///     .growth_range(1, 4)
///     .unwrap()
///     .build();
/// assert_eq!(config.width, 256);
/// ```
#[derive(Debug, Clone)]
pub struct MapConfigBuilder {
    seed: Option<u64>,
    dimensions: UVec2,
    centre_count: usize,
    weight_min: f32,
    weight_max: f32,
    distance_function: DistanceFunction,
    tiling: Tiling,
    growth_fraction: f32,
    min_growth: u32,
    max_growth: u32,
}

impl MapConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - size: 512×512 with 1024 centres
    /// - weights: 1.0-1.0 (unweighted)
    /// - distance function: squared Euclidean
    /// - tiling: enabled, 10% edge band
    /// - growth: 33% of regions, budgets 2-13
    pub fn new() -> Self {
        Self {
            seed: None,
            dimensions: MapSize::default().dimensions(),
            centre_count: MapSize::default().centre_count(),
            weight_min: 1.0,
            weight_max: 1.0,
            distance_function: DistanceFunction::default(),
            tiling: Tiling::default(),
            growth_fraction: 0.33,
            min_growth: 2,
            max_growth: 13,
        }
    }

    /// Set the random seed
    ///
    /// Using the same seed with the same other parameters will produce
    /// an identical map every time.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set dimensions and centre count from a preset
    pub fn map_size(mut self, size: MapSize) -> Self {
        self.dimensions = size.dimensions();
        self.centre_count = size.centre_count();
        self
    }

    /// Set the grid dimensions
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if either axis is zero
    pub fn dimensions(mut self, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MapError::InvalidDimensions { width, height });
        }
        self.dimensions = UVec2::new(width, height);
        Ok(self)
    }

    /// Set the number of Voronoi centres
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `count` is zero
    pub fn centre_count(mut self, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(MapError::InvalidConfig(
                "centre count must be at least 1".to_string(),
            ));
        }
        self.centre_count = count;
        Ok(self)
    }

    /// Set the range random centre weights are drawn from
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless `0 < min <= max` and both are finite
    pub fn weight_range(mut self, min: f32, max: f32) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(MapError::InvalidConfig(format!(
                "weights need 0 < min <= max (got {}..{})",
                min, max
            )));
        }
        self.weight_min = min;
        self.weight_max = max;
        Ok(self)
    }

    /// Set the labeling metric
    pub fn distance_function(mut self, function: DistanceFunction) -> Self {
        self.distance_function = function;
        self
    }

    /// Enable or disable ghost centre projection
    pub fn tiled(mut self, enabled: bool) -> Self {
        self.tiling.enabled = enabled;
        self
    }

    /// Set the edge band, in percent of each dimension, that gets projected
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `percent` > 50 (bands would overlap)
    pub fn tiling_threshold(mut self, percent: u8) -> Result<Self> {
        if percent > 50 {
            return Err(MapError::InvalidConfig(format!(
                "tiling threshold must be <= 50% (got {}%)",
                percent
            )));
        }
        self.tiling.threshold_percent = percent;
        Ok(self)
    }

    /// Set the fraction of regions picked as growth targets
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless `0.0 <= fraction <= 1.0`
    pub fn growth_fraction(mut self, fraction: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(MapError::InvalidConfig(format!(
                "growth fraction must be within 0.0..=1.0 (got {})",
                fraction
            )));
        }
        self.growth_fraction = fraction;
        Ok(self)
    }

    /// Set the inclusive range of growth budgets
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `min > max`
    pub fn growth_range(mut self, min: u32, max: u32) -> Result<Self> {
        if min > max {
            return Err(MapError::InvalidConfig(format!(
                "growth range needs min <= max (got {}..={})",
                min, max
            )));
        }
        self.min_growth = min;
        self.max_growth = max;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> MapConfig {
        MapConfig {
            seed: self.seed.unwrap_or_else(rand::random),
            width: self.dimensions.x,
            height: self.dimensions.y,
            centre_count: self.centre_count,
            weight_min: self.weight_min,
            weight_max: self.weight_max,
            distance_function: self.distance_function,
            tiling: self.tiling,
            growth_fraction: self.growth_fraction,
            min_growth: self.min_growth,
            max_growth: self.max_growth,
        }
    }
}

impl Default for MapConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
