//! Error types for region map generation

use thiserror::Error;

/// Errors that can occur while configuring or generating a region map
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A grid was requested with a zero-sized axis
    #[error("invalid grid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Cell storage does not match the grid dimensions
    #[error("grid needs {expected} cells but {found} were given")]
    CellCountMismatch { expected: usize, found: usize },

    /// A distribution range violates `min <= max` (or `min < max` for integers)
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// A centre was placed outside the plane or given a non-positive weight
    #[error("invalid centre: {0}")]
    InvalidCentre(String),

    /// Labeling was requested before any centre was added
    #[error("no centres to label against")]
    NoCentres,

    /// A label grid references a region the adjacency map does not know about
    #[error("label {label} is outside the region range 0..{region_count}")]
    LabelOutOfRange { label: usize, region_count: usize },

    /// More growth targets were requested than there are regions
    #[error("requested {requested} growth targets but only {available} regions exist")]
    TooManyGrowthTargets { requested: usize, available: usize },

    /// Rejection sampling of growth targets hit its draw cap
    #[error(
        "growth target selection stalled after {draws} draws ({claimed} of {requested} claimed)"
    )]
    GrowthTargetStall {
        claimed: usize,
        requested: usize,
        draws: usize,
    },

    /// The same region was listed as a growth target twice
    #[error("region {0} appears more than once among the growth targets")]
    DuplicateGrowthTarget(usize),

    /// A distance function tag could not be parsed
    #[error("unknown distance function '{0}' (valid: euclidean, manhattan, chebychev, weirdness)")]
    UnknownDistanceFunction(String),
}

/// Result type alias for region map operations
pub type Result<T> = std::result::Result<T, MapError>;
