//! Tilegolf - swept-circle physics for a tile-based golf course
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, tiles, collision, integrator)
//! - `settings`: Data-driven physics tuning
//! - `renderer`: Debug-overlay vertices for hitbox outlines
//! - `error`: Setup and contract errors

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::PhysicsError;
pub use settings::PhysicsConfig;
pub use sim::{SimState, TickInput, tick};

/// Physics configuration constants
pub mod consts {
    /// Fixed simulation rate (Hz)
    pub const TICK_RATE: f64 = 60.0;
    /// Rate the friction coefficients were tuned at
    pub const FRICTION_REFERENCE_RATE: f64 = 60.0;

    /// Gravity (m/s², screen-down)
    pub const GRAVITY: f64 = 9.81;
    pub const PIXELS_PER_METER: f64 = 100.0;

    /// Course dimensions
    pub const TILE_WIDTH: f64 = 50.0;

    /// Ball defaults - roughly a golf ball
    pub const PLAYER_RADIUS: f64 = 10.0;
    pub const PLAYER_MASS: f64 = 0.0459;
    pub const DRAG_COEFFICIENT: f64 = 0.0005;

    /// Contact slack (pixels)
    pub const HITBOX_TOLERANCE: f64 = 0.07;
    /// Must stay above one tick of gravity (g / TICK_RATE) or a resting ball
    /// never counts as motionless
    pub const VELOCITY_TOLERANCE: f64 = 0.5;
    /// Rebounds slower than this (m/s) are flattened to zero
    pub const REST_SNAP_SPEED: f64 = 0.2;

    /// Shot speed per square-root pixel of pointer drag
    pub const SHOOT_COEFFICIENT: f64 = 0.5;
}
