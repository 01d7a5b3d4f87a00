//! Color mapping for label grids
//!
//! The crate never writes files. These helpers turn a label grid into an RGBA
//! pixel buffer that any image encoder can consume.

use crate::generation::AdjacencyMap;
use crate::grid::Grid;

/// RGBA8 color
pub type RegionColor = [u8; 4];

/// Trait for mapping region labels to colors
pub trait LabelColorMapper {
    /// Map a region label to an RGBA color
    fn map_color(&self, label: usize) -> RegionColor;
}

/// Opaque color from the low 24 bits of `label²`
///
/// Cheap and deterministic; neighbouring indices land on very different
/// colors. Channels are packed little-endian, so the least significant byte
/// becomes red.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredIndexColorMapper;

impl LabelColorMapper for SquaredIndexColorMapper {
    fn map_color(&self, label: usize) -> RegionColor {
        let rgb = (label as u64).wrapping_mul(label as u64) as u32 & 0x00FF_FFFF;
        (0xFF00_0000 | rgb).to_le_bytes()
    }
}

/// Colors each region by its number of neighbours
///
/// Useful for eyeballing the adjacency graph: regions with many borders
/// stand out. Uses `degree^13` truncated to 24 bits.
#[derive(Debug, Clone)]
pub struct DegreeColorMapper<'a> {
    adjacency: &'a AdjacencyMap,
}

impl<'a> DegreeColorMapper<'a> {
    pub fn new(adjacency: &'a AdjacencyMap) -> Self {
        Self { adjacency }
    }
}

impl LabelColorMapper for DegreeColorMapper<'_> {
    fn map_color(&self, label: usize) -> RegionColor {
        let degree = self.adjacency.degree(label) as u64;
        let rgb = degree.wrapping_pow(13) as u32 & 0x00FF_FFFF;
        (0xFF00_0000 | rgb).to_le_bytes()
    }
}

/// Custom color mapper backed by a palette, cycling when labels run past it
#[derive(Debug, Clone)]
pub struct PaletteColorMapper {
    pub palette: Vec<RegionColor>,
}

impl Default for PaletteColorMapper {
    fn default() -> Self {
        Self {
            palette: vec![
                [0x1F, 0x77, 0xB4, 0xFF],
                [0xFF, 0x7F, 0x0E, 0xFF],
                [0x2C, 0xA0, 0x2C, 0xFF],
                [0xD6, 0x27, 0x28, 0xFF],
                [0x94, 0x67, 0xBD, 0xFF],
                [0x8C, 0x56, 0x4B, 0xFF],
                [0xE3, 0x77, 0xC2, 0xFF],
                [0x7F, 0x7F, 0x7F, 0xFF],
            ],
        }
    }
}

impl LabelColorMapper for PaletteColorMapper {
    fn map_color(&self, label: usize) -> RegionColor {
        if self.palette.is_empty() {
            return [0, 0, 0, 0xFF];
        }
        self.palette[label % self.palette.len()]
    }
}

/// Row-major RGBA8 buffer for `labels`, four bytes per cell
pub fn to_rgba_pixels<M: LabelColorMapper + ?Sized>(labels: &Grid<usize>, mapper: &M) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(labels.len() * 4);
    for &label in labels {
        pixels.extend_from_slice(&mapper.map_color(label));
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::build_adjacency;

    #[test]
    fn test_squared_index_colors() {
        let mapper = SquaredIndexColorMapper;
        assert_eq!(mapper.map_color(0), [0, 0, 0, 0xFF]);
        // 3² = 9
        assert_eq!(mapper.map_color(3), [9, 0, 0, 0xFF]);
        // 4096² = 0x100_0000, masked away entirely
        assert_eq!(mapper.map_color(4096), [0, 0, 0, 0xFF]);
        // 300² = 90000 = 0x01_5F_90
        assert_eq!(mapper.map_color(300), [0x90, 0x5F, 0x01, 0xFF]);
    }

    #[test]
    fn test_degree_colors() {
        let mut labels = Grid::new(2, 2, 0usize).unwrap();
        for (i, cell) in labels.iter_mut().enumerate() {
            *cell = i;
        }
        let adjacency = build_adjacency(&labels).unwrap();
        let mapper = DegreeColorMapper::new(&adjacency);

        // Every region of a 2×2 torus has 3 neighbours; 3^13 = 1_594_323 = 0x18_53_D3
        assert_eq!(mapper.map_color(0), [0xD3, 0x53, 0x18, 0xFF]);
        assert_eq!(mapper.map_color(99), [0, 0, 0, 0xFF]);
    }

    #[test]
    fn test_palette_cycles() {
        let mapper = PaletteColorMapper::default();
        assert_eq!(mapper.map_color(1), mapper.map_color(9));
        assert_ne!(mapper.map_color(1), mapper.map_color(2));

        let empty = PaletteColorMapper { palette: vec![] };
        assert_eq!(empty.map_color(5), [0, 0, 0, 0xFF]);
    }

    #[test]
    fn test_rgba_buffer_layout() {
        let mut labels = Grid::new(3, 2, 0usize).unwrap();
        labels[(2, 1)] = 3;
        let pixels = to_rgba_pixels(&labels, &SquaredIndexColorMapper);

        assert_eq!(pixels.len(), 3 * 2 * 4);
        assert!(pixels.chunks(4).all(|px| px[3] == 0xFF));
        assert_eq!(&pixels[20..24], &[9, 0, 0, 0xFF]);
        assert_eq!(&pixels[..4], &[0, 0, 0, 0xFF]);
    }
}
