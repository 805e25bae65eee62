//! Simulation state
//!
//! Everything a tick reads or writes lives here. There is no hidden global
//! state: the same config, layout and inputs always replay identically.

use super::level::{Level, LevelLayout};
use super::player::Player;
use crate::error::PhysicsError;
use crate::renderer::DebugDraw;
use crate::renderer::vertex::colors;
use crate::settings::PhysicsConfig;

/// Config, world and ball for one running course
#[derive(Debug, Clone)]
pub struct SimState {
    pub config: PhysicsConfig,
    pub level: Level,
    pub player: Player,
    /// Ticks advanced since creation
    pub time_ticks: u64,
}

impl SimState {
    /// Validate the config, build the level and place the ball at spawn
    pub fn new(config: PhysicsConfig, layout: &LevelLayout) -> Result<Self, PhysicsError> {
        config.validate()?;
        let level = Level::from_layout(layout, &config)?;
        let player = Player::new(level.spawn(), config.player_radius);
        Ok(Self {
            config,
            level,
            player,
            time_ticks: 0,
        })
    }

    /// Outline every hitbox when `draw_hitboxes` is on
    pub fn debug_draw(&self, ctx: &mut dyn DebugDraw) {
        if !self.config.draw_hitboxes {
            return;
        }
        self.player.hitbox().draw(ctx, colors::PLAYER);
        for tile in self.level.tiles() {
            tile.exact_hitbox().draw(ctx, colors::TILE_EXACT);
            tile.dilated_hitbox().draw(ctx, colors::TILE_DILATED);
        }
    }
}
