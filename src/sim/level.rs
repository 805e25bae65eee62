//! Level layout and the tile set built from it

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::spatial::SpatialIndex;
use super::tile::{Material, Tile, TileMetrics};
use crate::error::PhysicsError;
use crate::settings::PhysicsConfig;

/// A course as authored: rows of tile codes plus where the ball starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    /// `grid[row][column]`; 0 = empty, see `TileShape::from_code`
    pub grid: Vec<Vec<u8>>,
    /// Ball center at spawn, in pixels
    pub spawn: DVec2,
    #[serde(default)]
    pub material: Material,
}

impl Default for LevelLayout {
    /// The stock ten-by-ten practice course
    fn default() -> Self {
        Self {
            grid: vec![
                vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
                vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
                vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
                vec![1, 0, 4, 0, 0, 0, 0, 0, 0, 1],
                vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
                vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
                vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
                vec![1, 1, 0, 0, 0, 0, 0, 0, 0, 1],
                vec![1, 3, 0, 1, 1, 3, 3, 3, 2, 1],
                vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            ],
            spawn: DVec2::new(150.8, 100.0),
            material: Material::GENERIC,
        }
    }
}

impl LevelLayout {
    /// Parse a layout and check its material
    pub fn from_json(json: &str) -> Result<Self, PhysicsError> {
        let layout: Self = serde_json::from_str(json)?;
        layout.material.validate()?;
        Ok(layout)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PhysicsError> {
        let path = path.as_ref();
        let layout = Self::from_json(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded level layout from {}", path.display());
        Ok(layout)
    }
}

/// Immutable tile set plus its spatial index
#[derive(Debug, Clone)]
pub struct Level {
    tiles: Vec<Tile>,
    index: SpatialIndex,
    spawn: DVec2,
}

impl Level {
    /// Build every non-empty grid cell into a tile
    pub fn from_layout(layout: &LevelLayout, config: &PhysicsConfig) -> Result<Self, PhysicsError> {
        layout.material.validate()?;
        let metrics = TileMetrics {
            tile_width: config.tile_width,
            player_radius: config.player_radius,
        };

        let mut tiles = Vec::new();
        for (y, row) in layout.grid.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                if let Some(tile) = Tile::from_code(x, y, code, layout.material, metrics)? {
                    tiles.push(tile);
                }
            }
        }

        let index = SpatialIndex::build(config.tile_width, &tiles);
        log::info!(
            "Built level: {} tiles over {} rows, spawn at {}",
            tiles.len(),
            layout.grid.len(),
            layout.spawn
        );
        Ok(Self {
            tiles,
            index,
            spawn: layout.spawn,
        })
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn spawn(&self) -> DVec2 {
        self.spawn
    }
}
