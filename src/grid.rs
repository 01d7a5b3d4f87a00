//! Dense toroidal grid
//!
//! A row-major 2D container whose neighbour queries wrap around both axes.

use std::ops::{Index, IndexMut};

use glam::UVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};

/// Compass directions in the order returned by [`Grid::neighbors`]
///
/// North is `y - 1`, east is `x + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    N = 0,
    NE = 1,
    E = 2,
    SE = 3,
    S = 4,
    SW = 5,
    W = 6,
    NW = 7,
}

impl Direction {
    /// All directions, clockwise from north
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// Unit step `(dx, dy)` for this direction
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::N => (0, -1),
            Direction::NE => (1, -1),
            Direction::E => (1, 0),
            Direction::SE => (1, 1),
            Direction::S => (0, 1),
            Direction::SW => (-1, 1),
            Direction::W => (-1, 0),
            Direction::NW => (-1, -1),
        }
    }
}

/// Dense `width × height` grid stored in row-major order
///
/// # Example
///
/// ```
/// use voronoi_regions::Grid;
///
/// let mut grid = Grid::new(3, 2, 0u8).unwrap();
/// grid[(2, 1)] = 7;
/// assert_eq!(grid.get(2, 1), Some(&7));
/// assert_eq!(grid.get(3, 1), None);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RawGrid<T>", bound(deserialize = "T: Deserialize<'de>"))
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Vec<T>,
    width: u32,
    height: u32,
}

/// Unchecked wire form of a [`Grid`]
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawGrid<T> {
    cells: Vec<T>,
    width: u32,
    height: u32,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawGrid<T>> for Grid<T> {
    type Error = MapError;

    fn try_from(raw: RawGrid<T>) -> Result<Self> {
        Grid::from_cells(raw.width, raw.height, raw.cells)
    }
}

impl<T> Grid<T> {
    /// Wrap existing row-major `cells` in a `width × height` grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if either axis is zero, or
    /// `CellCountMismatch` if `cells` does not hold exactly
    /// `width × height` values
    pub fn from_cells(width: u32, height: u32, cells: Vec<T>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MapError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(MapError::CellCountMismatch {
                expected,
                found: cells.len(),
            });
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }
}

impl<T: Clone> Grid<T> {
    /// Create a grid filled with `default`
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if either axis is zero
    pub fn new(width: u32, height: u32, default: T) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MapError::InvalidDimensions { width, height });
        }
        Ok(Self {
            cells: vec![default; width as usize * height as usize],
            width,
            height,
        })
    }

    /// Create a grid from a `UVec2` size
    pub fn from_dimensions(dimensions: UVec2, default: T) -> Result<Self> {
        Self::new(dimensions.x, dimensions.y, default)
    }

    /// The 8 wrapped neighbours of `pos`, ordered N, NE, E, SE, S, SW, W, NW
    pub fn neighbors(&self, pos: UVec2) -> [T; 8] {
        self.neighbor_positions(pos).map(|p| self[p].clone())
    }
}

impl<T> Grid<T> {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    /// Total number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; zero-sized grids cannot be constructed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Row-major index of `(x, y)`
    #[inline]
    pub fn index_of(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Position of a row-major index
    #[inline]
    pub fn position_of(&self, index: usize) -> UVec2 {
        let width = self.width as usize;
        UVec2::new((index % width) as u32, (index / width) as u32)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&T> {
        if self.contains(x, y) {
            self.cells.get(self.index_of(x, y))
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut T> {
        if self.contains(x, y) {
            let index = self.index_of(x, y);
            self.cells.get_mut(index)
        } else {
            None
        }
    }

    /// Positions of the 8 neighbours of `pos`, wrapped on both axes
    pub fn neighbor_positions(&self, pos: UVec2) -> [UVec2; 8] {
        let (w, h) = (self.width, self.height);
        let west = (pos.x + w - 1) % w;
        let east = (pos.x + 1) % w;
        let north = (pos.y + h - 1) % h;
        let south = (pos.y + 1) % h;

        [
            UVec2::new(pos.x, north),
            UVec2::new(east, north),
            UVec2::new(east, pos.y),
            UVec2::new(east, south),
            UVec2::new(pos.x, south),
            UVec2::new(west, south),
            UVec2::new(west, pos.y),
            UVec2::new(west, north),
        ]
    }

    /// Neighbour of `pos` in one direction, wrapped
    pub fn neighbor(&self, pos: UVec2, direction: Direction) -> &T {
        &self[self.neighbor_positions(pos)[direction as usize]]
    }

    /// Cells in row-major order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.cells.iter()
    }

    /// Mutable cells in row-major order
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.cells.iter_mut()
    }

    /// `(position, cell)` pairs in row-major order
    pub fn in_context(&self) -> impl Iterator<Item = (UVec2, &T)> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (UVec2::new((i % width) as u32, (i / width) as u32), cell))
    }

    /// Mutable `(position, cell)` pairs in row-major order
    pub fn in_context_mut(&mut self) -> impl Iterator<Item = (UVec2, &mut T)> + '_ {
        let width = self.width as usize;
        self.cells
            .iter_mut()
            .enumerate()
            .map(move |(i, cell)| (UVec2::new((i % width) as u32, (i / width) as u32), cell))
    }

    /// Underlying row-major storage
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    #[inline]
    fn checked_index(&self, x: u32, y: u32) -> usize {
        assert!(
            self.contains(x, y),
            "grid position ({}, {}) out of bounds for {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        self.index_of(x, y)
    }
}

impl<T> Index<(u32, u32)> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): (u32, u32)) -> &T {
        &self.cells[self.checked_index(x, y)]
    }
}

impl<T> IndexMut<(u32, u32)> for Grid<T> {
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut T {
        let index = self.checked_index(x, y);
        &mut self.cells[index]
    }
}

impl<T> Index<UVec2> for Grid<T> {
    type Output = T;

    fn index(&self, pos: UVec2) -> &T {
        &self[(pos.x, pos.y)]
    }
}

impl<T> IndexMut<UVec2> for Grid<T> {
    fn index_mut(&mut self, pos: UVec2) -> &mut T {
        &mut self[(pos.x, pos.y)]
    }
}

impl<'a, T> IntoIterator for &'a Grid<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Grid<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
