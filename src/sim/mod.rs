//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (tile grid position, then hitbox piece)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod hitbox;
pub mod level;
pub mod player;
pub mod spatial;
pub mod state;
pub mod tick;
pub mod tile;

pub use collision::{Contact, SweptCircle, TravelVolume, detect, ground_probe};
pub use geometry::{CircleBoundary, Polyline, Segment, Shape};
pub use hitbox::CompositeHitbox;
pub use level::{Level, LevelLayout};
pub use player::Player;
pub use spatial::SpatialIndex;
pub use state::SimState;
pub use tick::{TickInput, step_player, tick};
pub use tile::{Material, Tile, TileMetrics, TileShape};
