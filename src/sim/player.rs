//! The ball: a single dynamic circular body

use glam::DVec2;

use super::geometry::CircleBoundary;
use super::hitbox::CompositeHitbox;
use super::tile::Material;
use crate::consts::REST_SNAP_SPEED;
use crate::error::PhysicsError;
use crate::settings::PhysicsConfig;

/// Ball state advanced once per tick by [`super::tick::step_player`]
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    center: DVec2,
    /// Center at the start of the previous tick
    prev_center: DVec2,
    /// Meters per second
    velocity: DVec2,
    /// Presentation angle, degrees
    rotation: f64,
    /// Radians per second
    angular_velocity: f64,
    is_on_ground: bool,
    radius: f64,
    hitbox: CompositeHitbox,
}

impl Player {
    pub fn new(center: DVec2, radius: f64) -> Self {
        Self {
            center,
            prev_center: center,
            velocity: DVec2::ZERO,
            rotation: 0.0,
            angular_velocity: 0.0,
            is_on_ground: false,
            radius,
            hitbox: CompositeHitbox::from_circle(CircleBoundary::new(center, radius)),
        }
    }

    pub fn center(&self) -> DVec2 {
        self.center
    }

    pub fn prev_center(&self) -> DVec2 {
        self.prev_center
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    pub fn is_on_ground(&self) -> bool {
        self.is_on_ground
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn hitbox(&self) -> &CompositeHitbox {
        &self.hitbox
    }

    /// Move to an absolute `coord` or by a relative `delta`.
    ///
    /// Passing both is rejected before anything changes; passing neither is a
    /// no-op.
    pub fn update_pos(&mut self, coord: Option<DVec2>, delta: Option<DVec2>) -> Result<(), PhysicsError> {
        match (coord, delta) {
            (Some(_), Some(_)) => Err(PhysicsError::ConflictingPositionUpdate),
            (Some(coord), None) => {
                self.set_center(coord);
                Ok(())
            }
            (None, Some(delta)) => {
                self.set_center(self.center + delta);
                Ok(())
            }
            (None, None) => Ok(()),
        }
    }

    /// Launch toward `target` with a speed that grows with the square root of
    /// the distance. Returns false (and leaves velocity alone) when the
    /// target is the ball's own center.
    pub fn shoot(&mut self, target: DVec2, coefficient: f64) -> bool {
        let offset = target - self.center;
        let Some(direction) = offset.try_normalize() else {
            log::warn!("ignoring shot at the ball's own center {target}");
            return false;
        };
        self.velocity = direction * offset.length().sqrt() * coefficient;
        log::debug!("shot toward {target}: velocity {}", self.velocity);
        true
    }

    /// Barely moved since last tick and slower than the velocity tolerance
    pub fn is_stationary(&self, config: &PhysicsConfig) -> bool {
        self.prev_center.distance(self.center) < config.hitbox_tolerance
            && self.velocity.length() < config.velocity_tolerance
    }

    pub(crate) fn set_center(&mut self, center: DVec2) {
        self.center = center;
        self.hitbox = CompositeHitbox::from_circle(CircleBoundary::new(center, self.radius));
    }

    pub(crate) fn set_velocity(&mut self, velocity: DVec2) {
        self.velocity = velocity;
    }

    pub(crate) fn set_on_ground(&mut self, on_ground: bool) {
        self.is_on_ground = on_ground;
    }

    /// Start a tick: remember where it began
    pub(crate) fn begin_tick(&mut self) {
        self.prev_center = self.center;
    }

    pub(crate) fn add_velocity(&mut self, dv: DVec2) {
        self.velocity += dv;
    }

    pub(crate) fn rest(&mut self) {
        self.velocity = DVec2::ZERO;
        self.angular_velocity = 0.0;
    }

    /// Bounce off a surface with outward `normal`.
    ///
    /// Normal speed is reversed and scaled by restitution (tiny rebounds are
    /// flattened to zero); tangential speed decays by the rate-normalized
    /// friction factor. Spin follows the new tangential speed unless the ball
    /// is stationary.
    pub(crate) fn bounce(&mut self, normal: DVec2, material: Material, config: &PhysicsConfig, stationary: bool) {
        let tangent = DVec2::new(normal.y, -normal.x);

        let mut normal_speed = -material.restitution * self.velocity.dot(normal);
        if normal_speed.abs() < REST_SNAP_SPEED {
            normal_speed = 0.0;
        }
        let tangent_speed = self.velocity.dot(tangent) * config.friction_factor(material.friction);

        self.velocity = normal * normal_speed + tangent * tangent_speed;
        self.angular_velocity = if stationary {
            0.0
        } else {
            self.velocity.dot(tangent) / (self.radius / config.pixels_per_meter)
        };
    }

    /// Quadratic air drag over one tick
    pub(crate) fn apply_drag(&mut self, config: &PhysicsConfig) {
        let Some(direction) = self.velocity.try_normalize() else {
            return;
        };
        let accel = -direction * config.drag_coefficient * self.velocity.length_squared() / config.player_mass;
        self.velocity += accel * config.dt();
    }

    /// Advance the presentation angle from the spin
    pub(crate) fn spin(&mut self, config: &PhysicsConfig) {
        self.rotation += self.angular_velocity * config.dt() * 60.0;
    }
}
