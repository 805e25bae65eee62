//! Fixed timestep simulation tick
//!
//! One tick is a fixed sequence: move, accelerate, detect, respond, drag,
//! spin, classify ground contact. No substeps; the swept ray-cast is what
//! keeps fast shots from tunneling.

use glam::DVec2;

use super::collision::{self, SweptCircle};
use super::level::Level;
use super::player::Player;
use super::state::SimState;
use crate::settings::PhysicsConfig;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Shot target in world pixels (pointer release)
    pub shoot: Option<DVec2>,
}

/// Advance the simulation by one fixed timestep
pub fn tick(state: &mut SimState, input: &TickInput) {
    if let Some(target) = input.shoot {
        state.player.shoot(target, state.config.shoot_coefficient);
    }
    step_player(&mut state.player, &state.level, &state.config);
    state.time_ticks += 1;
}

/// Integrate the ball one tick against the level's tiles
pub fn step_player(player: &mut Player, level: &Level, config: &PhysicsConfig) {
    let dt = config.dt();

    player.begin_tick();
    player.set_center(player.center() + player.velocity() * config.pixels_per_meter * dt);
    player.add_velocity(DVec2::new(0.0, config.gravity * dt));

    let nearby = level.index().query_span(player.prev_center(), player.center());
    let motion = SweptCircle {
        prev_center: player.prev_center(),
        center: player.center(),
        velocity: player.velocity(),
        radius: player.radius(),
        tolerance: config.hitbox_tolerance,
    };

    if let Some(contact) = collision::detect(level.tiles(), &nearby, &motion) {
        player.set_center(contact.point);
        let stationary = player.is_stationary(config);
        if stationary && player.is_on_ground() {
            player.rest();
        } else {
            let material = level.tiles()[contact.tile_index].material();
            player.bounce(contact.normal, material, config, stationary);
        }
    }

    player.apply_drag(config);
    player.spin(config);

    let around = level.index().query(player.center());
    let grounded = collision::ground_probe(
        level.tiles(),
        &around,
        player.center(),
        player.radius(),
        config.hitbox_tolerance,
    );
    if grounded != player.is_on_ground() {
        log::debug!("on_ground {} -> {} at {}", player.is_on_ground(), grounded, player.center());
    }
    player.set_on_ground(grounded);
}
