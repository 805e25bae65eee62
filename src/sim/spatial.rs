//! Uniform grid over the tile set
//!
//! Cell size equals the tile width, so every tile lives in exactly one cell
//! and a 3×3 neighbourhood bounds everything a ball of radius < tile/2 can
//! touch from that cell.

use glam::{DVec2, IVec2};
use std::collections::HashMap;

use super::tile::Tile;

/// Cell -> tile indices lookup
#[derive(Debug, Clone, Default)]
pub struct SpatialIndex {
    cell_size: f64,
    cells: HashMap<IVec2, Vec<usize>>,
}

impl SpatialIndex {
    pub fn new(cell_size: f64) -> Self {
        debug_assert!(cell_size > 0.0, "cell size must be positive");
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    /// Index every tile by position in `tiles`
    pub fn build(cell_size: f64, tiles: &[Tile]) -> Self {
        let mut index = Self::new(cell_size);
        for (i, tile) in tiles.iter().enumerate() {
            index.insert(i, tile);
        }
        index
    }

    pub fn insert(&mut self, tile_index: usize, tile: &Tile) {
        let cell = self.cell_of(tile.position());
        self.cells.entry(cell).or_default().push(tile_index);
    }

    /// Grid cell containing a world point
    #[inline]
    pub fn cell_of(&self, point: DVec2) -> IVec2 {
        (point / self.cell_size).floor().as_ivec2()
    }

    /// Tiles within one cell of `point`'s cell on each axis
    pub fn query(&self, point: DVec2) -> Vec<usize> {
        let cell = self.cell_of(point);
        self.collect(cell - IVec2::ONE, cell + IVec2::ONE)
    }

    /// Tiles within one cell of the rectangle of cells spanned by `a` and `b`
    pub fn query_span(&self, a: DVec2, b: DVec2) -> Vec<usize> {
        let ca = self.cell_of(a);
        let cb = self.cell_of(b);
        self.collect(ca.min(cb) - IVec2::ONE, ca.max(cb) + IVec2::ONE)
    }

    /// Indices in the inclusive cell range, ordered by cell `(x, y)`
    fn collect(&self, min: IVec2, max: IVec2) -> Vec<usize> {
        let mut found = Vec::new();
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                if let Some(indices) = self.cells.get(&IVec2::new(x, y)) {
                    found.extend_from_slice(indices);
                }
            }
        }
        found
    }

    pub fn len(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tile::{Material, TileMetrics, TileShape, build_tile};

    const METRICS: TileMetrics = TileMetrics {
        tile_width: 50.0,
        player_radius: 10.0,
    };

    fn row_of_blocks(n: i32) -> Vec<Tile> {
        (0..n)
            .map(|x| build_tile(x, 0, TileShape::Block, Material::GENERIC, METRICS))
            .collect()
    }

    #[test]
    fn test_cell_of() {
        let index = SpatialIndex::new(50.0);
        assert_eq!(index.cell_of(DVec2::new(0.0, 0.0)), IVec2::new(0, 0));
        assert_eq!(index.cell_of(DVec2::new(49.9, 50.0)), IVec2::new(0, 1));
        assert_eq!(index.cell_of(DVec2::new(-0.1, 120.0)), IVec2::new(-1, 2));
    }

    #[test]
    fn test_query_neighbourhood() {
        let tiles = row_of_blocks(10);
        let index = SpatialIndex::build(50.0, &tiles);
        assert_eq!(index.len(), 10);

        // Point in cell (4, 0) sees cells 3..=5
        assert_eq!(index.query(DVec2::new(225.0, 25.0)), vec![3, 4, 5]);
        // Two rows up sees nothing
        assert!(index.query(DVec2::new(225.0, -75.0)).is_empty());
        // One row up still sees the row
        assert_eq!(index.query(DVec2::new(225.0, -25.0)).len(), 3);
    }

    #[test]
    fn test_query_span_covers_both_ends() {
        let tiles = row_of_blocks(10);
        let index = SpatialIndex::build(50.0, &tiles);
        let found = index.query_span(DVec2::new(60.0, -10.0), DVec2::new(320.0, -10.0));
        assert_eq!(found, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    }
}
