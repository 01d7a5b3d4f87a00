//! Weighted Voronoi region maps
//!
//! A standalone library for partitioning a toroidal grid into organic
//! regions: a weighted Voronoi labeling, a region adjacency graph and a
//! randomized growth pass that merges neighbouring regions.
//!
//! Everything is driven by a seedable xoroshiro128+ engine, so the same
//! seed always produces the same map.
//!
//! # Quick Start
//!
//! ```rust
//! use voronoi_regions::*;
//!
//! // Generate a map
//! let config = MapConfigBuilder::new()
//!     .seed(42)
//!     .map_size(MapSize::Custom { width: 64, height: 64, centre_count: 48 })
//!     .distance_function(DistanceFunction::Manhattan)
//!     .build();
//!
//! let map = RegionMap::generate(config).unwrap();
//!
//! // Turn it into pixels for an image encoder
//! let pixels = to_rgba_pixels(map.labels(), &SquaredIndexColorMapper);
//! assert_eq!(pixels.len(), 64 * 64 * 4);
//! ```
//!
//! # Features
//!
//! - `serde`: Enables serialization support for configuration and grids

// Modules
pub mod error;
pub mod config;
pub mod rng;
pub mod grid;
pub mod generation;
pub mod region_map;
pub mod colors;

// Re-export core types for convenience
pub use error::{MapError, Result};
pub use config::{MapConfig, MapConfigBuilder, MapSize};
pub use rng::{splitmix64, Coin, IntDomain, IntRange, RealDomain, RealRange, Xoroshiro128Plus};
pub use grid::{Direction, Grid};
pub use generation::{
    build_adjacency, build_adjacency_for, grow_regions, growth_target_count, pick_growth_targets,
    AdjacencyMap, Centre, Chebyshev, DistanceFunction, DistanceMetric, FrontierSet, GrowthSummary,
    GrowthTarget, Manhattan, Site, SquaredEuclidean, Tiling, WeightedVoronoi, Weirdness,
};
pub use region_map::RegionMap;
pub use colors::{
    to_rgba_pixels, DegreeColorMapper, LabelColorMapper, PaletteColorMapper, RegionColor,
    SquaredIndexColorMapper,
};

// Re-export glam vectors for convenience
pub use glam::{UVec2, Vec2};
