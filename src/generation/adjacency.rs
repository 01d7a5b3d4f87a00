//! Region adjacency extraction from a label grid

use std::collections::HashSet;
use std::ops::Index;

use tracing::debug;

use crate::error::{MapError, Result};
use crate::grid::Grid;

/// Insertion-ordered set of region ids
///
/// Membership is a hash lookup; iteration and positional access follow the
/// order in which ids were first inserted. Removal keeps the remaining order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontierSet {
    members: HashSet<usize>,
    order: Vec<usize>,
}

impl FrontierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `id`, returning false if it was already present
    pub fn insert(&mut self, id: usize) -> bool {
        if self.members.insert(id) {
            self.order.push(id);
            true
        } else {
            false
        }
    }

    /// Remove `id`, returning false if it was not present
    pub fn remove(&mut self, id: usize) -> bool {
        if !self.members.remove(&id) {
            return false;
        }
        if let Some(at) = self.order.iter().position(|&member| member == id) {
            self.order.remove(at);
        }
        true
    }

    #[inline]
    pub fn contains(&self, id: usize) -> bool {
        self.members.contains(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Member at insertion position `at`
    #[inline]
    pub fn get(&self, at: usize) -> Option<usize> {
        self.order.get(at).copied()
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, usize>> {
        self.order.iter().copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }
}

impl Extend<usize> for FrontierSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}

impl FromIterator<usize> for FrontierSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = FrontierSet::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a FrontierSet {
    type Item = usize;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Neighbouring regions for every region id `0..region_count`
///
/// Region ids are dense, so the map is a vector indexed by id. Regions that
/// own no cells simply have an empty neighbour set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyMap {
    neighbors: Vec<FrontierSet>,
}

impl AdjacencyMap {
    /// Map with `region_count` empty neighbour sets
    pub fn with_regions(region_count: usize) -> Self {
        Self {
            neighbors: vec![FrontierSet::new(); region_count],
        }
    }

    #[inline]
    pub fn region_count(&self) -> usize {
        self.neighbors.len()
    }

    pub fn neighbors(&self, region: usize) -> Option<&FrontierSet> {
        self.neighbors.get(region)
    }

    pub fn neighbors_mut(&mut self, region: usize) -> Option<&mut FrontierSet> {
        self.neighbors.get_mut(region)
    }

    /// Whether `b` is recorded as a neighbour of `a`
    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        self.neighbors.get(a).map_or(false, |set| set.contains(b))
    }

    /// Record `b` as a neighbour of `a` and vice versa
    ///
    /// # Panics
    ///
    /// Panics if either id is outside `0..region_count`
    pub fn connect(&mut self, a: usize, b: usize) {
        if a != b {
            self.neighbors[a].insert(b);
            self.neighbors[b].insert(a);
        }
    }

    /// Number of neighbours of `region`
    pub fn degree(&self, region: usize) -> usize {
        self.neighbors.get(region).map_or(0, FrontierSet::len)
    }

    /// `(region, neighbours)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &FrontierSet)> + '_ {
        self.neighbors.iter().enumerate()
    }

    /// Remove `id` from every neighbour set
    pub fn remove_everywhere(&mut self, id: usize) {
        for set in &mut self.neighbors {
            set.remove(id);
        }
    }

    /// Whether `b ∈ N(a) ⇔ a ∈ N(b)` holds for every pair
    pub fn is_symmetric(&self) -> bool {
        self.iter()
            .all(|(a, set)| set.iter().all(|b| self.are_adjacent(b, a)))
    }

    pub(crate) fn sets_mut(&mut self) -> &mut [FrontierSet] {
        &mut self.neighbors
    }
}

impl Index<usize> for AdjacencyMap {
    type Output = FrontierSet;

    fn index(&self, region: usize) -> &FrontierSet {
        &self.neighbors[region]
    }
}

/// Build the adjacency map of a label grid
///
/// Every cell is compared with its 8 wrapped neighbours; differing labels are
/// recorded in the set of the cell's own label. Both directions of a border
/// are discovered independently, so the result is symmetric. The map covers
/// `0..=max_label`, so one stray huge label allocates a huge map; use
/// [`build_adjacency_for`] when the region count is known.
///
/// # Errors
///
/// Returns `LabelOutOfRange` if the largest label is `usize::MAX`
///
/// # Example
///
/// ```
/// use voronoi_regions::{build_adjacency, Grid};
///
/// let mut labels = Grid::new(4, 1, 0usize).unwrap();
/// labels[(2, 0)] = 1;
/// labels[(3, 0)] = 1;
///
/// let adjacency = build_adjacency(&labels).unwrap();
/// assert!(adjacency.are_adjacent(0, 1));
/// assert!(adjacency.are_adjacent(1, 0));
/// ```
pub fn build_adjacency(labels: &Grid<usize>) -> Result<AdjacencyMap> {
    let region_count = match labels.iter().max() {
        Some(&max) => max.checked_add(1).ok_or(MapError::LabelOutOfRange {
            label: max,
            region_count: usize::MAX,
        })?,
        None => 0,
    };
    let mut adjacency = AdjacencyMap::with_regions(region_count);
    scan_borders(labels, &mut adjacency);
    Ok(adjacency)
}

/// Build the adjacency map for a known number of regions
///
/// Regions that own no cells still get an (empty) entry.
///
/// # Errors
///
/// Returns `LabelOutOfRange` if any label is `>= region_count`
pub fn build_adjacency_for(labels: &Grid<usize>, region_count: usize) -> Result<AdjacencyMap> {
    if let Some(&label) = labels.iter().find(|&&label| label >= region_count) {
        return Err(MapError::LabelOutOfRange {
            label,
            region_count,
        });
    }
    let mut adjacency = AdjacencyMap::with_regions(region_count);
    scan_borders(labels, &mut adjacency);
    Ok(adjacency)
}

fn scan_borders(labels: &Grid<usize>, adjacency: &mut AdjacencyMap) {
    let sets = adjacency.sets_mut();
    for (pos, &label) in labels.in_context() {
        for neighbor in labels.neighbor_positions(pos) {
            let other = labels[neighbor];
            if other != label {
                sets[label].insert(other);
            }
        }
    }

    debug!(
        regions = sets.len(),
        borders = sets.iter().map(FrontierSet::len).sum::<usize>() / 2,
        "built region adjacency"
    );
}
