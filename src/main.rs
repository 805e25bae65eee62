//! Tilegolf entry point
//!
//! Headless driver: loads an optional config and level, then plays the
//! course with seeded random shots, taking a new shot each time the ball
//! comes to rest.
//!
//! Usage: `tilegolf [config.json] [level.json]`

#[cfg(not(target_arch = "wasm32"))]
use glam::DVec2;
#[cfg(not(target_arch = "wasm32"))]
use rand::{Rng, SeedableRng};
#[cfg(not(target_arch = "wasm32"))]
use rand_pcg::Pcg32;

#[cfg(not(target_arch = "wasm32"))]
use tilegolf::renderer::LineList;
#[cfg(not(target_arch = "wasm32"))]
use tilegolf::sim::{LevelLayout, SimState, TickInput, tick};
#[cfg(not(target_arch = "wasm32"))]
use tilegolf::{PhysicsConfig, PhysicsError};

/// Ten simulated minutes at the default rate
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS: u64 = 60 * 60 * 10;
#[cfg(not(target_arch = "wasm32"))]
const MAX_SHOTS: u32 = 12;
#[cfg(not(target_arch = "wasm32"))]
const SHOT_SEED: u64 = 0x7117_601f;
/// Largest pointer drag per axis, pixels
#[cfg(not(target_arch = "wasm32"))]
const SHOT_REACH: f64 = 250.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Tilegolf (native, headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on wasm; the host page drives `tilegolf::tick`
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), PhysicsError> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => PhysicsConfig::load(path)?,
        None => PhysicsConfig::default(),
    };
    let layout = match args.next() {
        Some(path) => LevelLayout::load(path)?,
        None => LevelLayout::default(),
    };

    let mut state = SimState::new(config, &layout)?;
    let mut rng = Pcg32::seed_from_u64(SHOT_SEED);
    let mut shots = 0;
    let mut settled = false;

    while state.time_ticks < MAX_TICKS {
        let mut input = TickInput::default();
        let at_rest = state.player.is_on_ground() && state.player.velocity() == DVec2::ZERO;

        if at_rest && !settled {
            log::info!(
                "tick {}: ball at rest at {} (rotation {:.1} deg)",
                state.time_ticks,
                state.player.center(),
                state.player.rotation()
            );
            settled = true;
            if shots == MAX_SHOTS {
                break;
            }
            let drag = DVec2::new(
                rng.random_range(-SHOT_REACH..SHOT_REACH),
                rng.random_range(-SHOT_REACH..0.0),
            );
            input.shoot = Some(state.player.center() + drag);
            shots += 1;
            log::info!("shot {shots} toward {}", state.player.center() + drag);
        } else if !at_rest {
            settled = false;
        }

        tick(&mut state, &input);
    }

    if state.config.draw_hitboxes {
        let mut overlay = LineList::new(16);
        state.debug_draw(&mut overlay);
        log::info!(
            "hitbox overlay: {} vertices, {} bytes",
            overlay.vertices().len(),
            overlay.as_bytes().len()
        );
    }

    log::info!(
        "finished after {} ticks and {shots} shots; ball at {}",
        state.time_ticks,
        state.player.center()
    );
    Ok(())
}
