//! Physics configuration
//!
//! Every tunable the simulation reads. Loaded from JSON; missing fields fall
//! back to the defaults below.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::consts;
use crate::error::PhysicsError;

/// Simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Fixed ticks per second
    pub tick_rate: f64,
    /// Downward acceleration (m/s², +y is down)
    pub gravity: f64,
    /// Screen pixels per simulated meter
    pub pixels_per_meter: f64,
    /// Tile edge length in pixels (also the spatial grid cell size)
    pub tile_width: f64,
    /// Ball radius in pixels
    pub player_radius: f64,
    /// Quadratic drag coefficient
    pub drag_coefficient: f64,
    /// Ball mass (kg)
    pub player_mass: f64,
    /// Geometric slack in pixels for contact and rest tests
    pub hitbox_tolerance: f64,
    /// Speed (m/s) below which the ball counts as motionless
    pub velocity_tolerance: f64,
    /// Scale applied to the square-root shot impulse
    pub shoot_coefficient: f64,
    /// Emit hitbox outlines from `SimState::debug_draw`
    pub draw_hitboxes: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            tick_rate: consts::TICK_RATE,
            gravity: consts::GRAVITY,
            pixels_per_meter: consts::PIXELS_PER_METER,
            tile_width: consts::TILE_WIDTH,
            player_radius: consts::PLAYER_RADIUS,
            drag_coefficient: consts::DRAG_COEFFICIENT,
            player_mass: consts::PLAYER_MASS,
            hitbox_tolerance: consts::HITBOX_TOLERANCE,
            velocity_tolerance: consts::VELOCITY_TOLERANCE,
            shoot_coefficient: consts::SHOOT_COEFFICIENT,
            draw_hitboxes: false,
        }
    }
}

impl PhysicsConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, PhysicsError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PhysicsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded physics config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, PhysicsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the integrator cannot run with
    pub fn validate(&self) -> Result<(), PhysicsError> {
        let positive = [
            (self.tick_rate, "tick_rate must be positive"),
            (self.pixels_per_meter, "pixels_per_meter must be positive"),
            (self.tile_width, "tile_width must be positive"),
            (self.player_radius, "player_radius must be positive"),
            (self.player_mass, "player_mass must be positive"),
            (self.hitbox_tolerance, "hitbox_tolerance must be positive"),
            (self.velocity_tolerance, "velocity_tolerance must be positive"),
        ];
        for (value, reason) in positive {
            if !(value > 0.0) {
                return Err(PhysicsError::InvalidConfiguration { reason });
            }
        }
        if self.drag_coefficient < 0.0 {
            return Err(PhysicsError::InvalidConfiguration {
                reason: "drag_coefficient must not be negative",
            });
        }
        if self.player_radius * 2.0 >= self.tile_width {
            return Err(PhysicsError::InvalidConfiguration {
                reason: "player_radius must be smaller than half a tile",
            });
        }
        Ok(())
    }

    /// Seconds per tick
    #[inline]
    pub fn dt(&self) -> f64 {
        1.0 / self.tick_rate
    }

    /// Per-tick tangential friction factor, normalized to the 60 Hz
    /// reference rate
    #[inline]
    pub fn friction_factor(&self, friction: f64) -> f64 {
        1.0 - (1.0 - friction) * consts::FRICTION_REFERENCE_RATE / self.tick_rate
    }
}
