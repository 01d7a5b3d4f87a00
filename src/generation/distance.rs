//! Distance metrics for nearest-centre labeling

use std::fmt;
use std::str::FromStr;

use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// A distance function between two points on the plane
///
/// Implementations only need to be monotone in "closeness"; the labeler
/// divides the result by the centre weight and keeps the minimum.
/// Any `Fn(Vec2, Vec2) -> f32` closure is a metric too.
pub trait DistanceMetric {
    fn distance(&self, a: Vec2, b: Vec2) -> f32;
}

impl<F> DistanceMetric for F
where
    F: Fn(Vec2, Vec2) -> f32,
{
    #[inline]
    fn distance(&self, a: Vec2, b: Vec2) -> f32 {
        self(a, b)
    }
}

/// `Δx² + Δy²` (no square root; ordering is the same)
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredEuclidean;

/// `|Δx| + |Δy|`
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

/// `max(|Δx|, |Δy|)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Chebyshev;

/// `|Δx|³ + |Δy|³`, gives pinched, star-like regions
#[derive(Debug, Clone, Copy, Default)]
pub struct Weirdness;

impl DistanceMetric for SquaredEuclidean {
    #[inline]
    fn distance(&self, a: Vec2, b: Vec2) -> f32 {
        (a - b).length_squared()
    }
}

impl DistanceMetric for Manhattan {
    #[inline]
    fn distance(&self, a: Vec2, b: Vec2) -> f32 {
        let d = (a - b).abs();
        d.x + d.y
    }
}

impl DistanceMetric for Chebyshev {
    #[inline]
    fn distance(&self, a: Vec2, b: Vec2) -> f32 {
        (a - b).abs().max_element()
    }
}

impl DistanceMetric for Weirdness {
    #[inline]
    fn distance(&self, a: Vec2, b: Vec2) -> f32 {
        let d = (a - b).abs();
        d.x * d.x * d.x + d.y * d.y * d.y
    }
}

/// Runtime tag selecting one of the built-in metrics
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DistanceFunction {
    #[default]
    Euclidean,
    Manhattan,
    Chebyshev,
    Weirdness,
}

impl DistanceFunction {
    pub const ALL: [DistanceFunction; 4] = [
        DistanceFunction::Euclidean,
        DistanceFunction::Manhattan,
        DistanceFunction::Chebyshev,
        DistanceFunction::Weirdness,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DistanceFunction::Euclidean => "Euclidean",
            DistanceFunction::Manhattan => "Manhattan",
            DistanceFunction::Chebyshev => "Chebyshev",
            DistanceFunction::Weirdness => "Weirdness",
        }
    }
}

impl DistanceMetric for DistanceFunction {
    #[inline]
    fn distance(&self, a: Vec2, b: Vec2) -> f32 {
        match self {
            DistanceFunction::Euclidean => SquaredEuclidean.distance(a, b),
            DistanceFunction::Manhattan => Manhattan.distance(a, b),
            DistanceFunction::Chebyshev => Chebyshev.distance(a, b),
            DistanceFunction::Weirdness => Weirdness.distance(a, b),
        }
    }
}

impl fmt::Display for DistanceFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceFunction {
    type Err = MapError;

    /// Case-insensitive; accepts both "chebyshev" and "chebychev"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(DistanceFunction::Euclidean),
            "manhattan" => Ok(DistanceFunction::Manhattan),
            "chebyshev" | "chebychev" => Ok(DistanceFunction::Chebyshev),
            "weirdness" => Ok(DistanceFunction::Weirdness),
            _ => Err(MapError::UnknownDistanceFunction(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Vec2 = Vec2::new(1.0, 2.0);
    const B: Vec2 = Vec2::new(4.0, -2.0);

    #[test]
    fn test_metric_values() {
        assert_eq!(SquaredEuclidean.distance(A, B), 25.0);
        assert_eq!(Manhattan.distance(A, B), 7.0);
        assert_eq!(Chebyshev.distance(A, B), 4.0);
        assert_eq!(Weirdness.distance(A, B), 27.0 + 64.0);
    }

    #[test]
    fn test_metrics_are_symmetric_and_zero_on_self() {
        for function in DistanceFunction::ALL {
            assert_eq!(function.distance(A, A), 0.0);
            assert_eq!(function.distance(A, B), function.distance(B, A));
        }
    }

    #[test]
    fn test_enum_dispatch_matches_structs() {
        assert_eq!(DistanceFunction::Euclidean.distance(A, B), SquaredEuclidean.distance(A, B));
        assert_eq!(DistanceFunction::Manhattan.distance(A, B), Manhattan.distance(A, B));
        assert_eq!(DistanceFunction::Chebyshev.distance(A, B), Chebyshev.distance(A, B));
        assert_eq!(DistanceFunction::Weirdness.distance(A, B), Weirdness.distance(A, B));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Euclidean".parse::<DistanceFunction>().unwrap(), DistanceFunction::Euclidean);
        assert_eq!("manhattan".parse::<DistanceFunction>().unwrap(), DistanceFunction::Manhattan);
        assert_eq!("Chebychev".parse::<DistanceFunction>().unwrap(), DistanceFunction::Chebyshev);
        assert_eq!("chebyshev".parse::<DistanceFunction>().unwrap(), DistanceFunction::Chebyshev);
        assert_eq!(" WEIRDNESS ".parse::<DistanceFunction>().unwrap(), DistanceFunction::Weirdness);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "hamming".parse::<DistanceFunction>().unwrap_err();
        assert_eq!(err, MapError::UnknownDistanceFunction("hamming".to_string()));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for function in DistanceFunction::ALL {
            assert_eq!(function.to_string().parse::<DistanceFunction>().unwrap(), function);
        }
    }

    #[test]
    fn test_closure_metric() {
        let taxicab_x = |a: Vec2, b: Vec2| (a.x - b.x).abs();
        assert_eq!(taxicab_x.distance(A, B), 3.0);
    }
}
