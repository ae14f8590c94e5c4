//! Color Vacuum entry point
//!
//! Runs a scripted headless session: the pointer sweeps the playfield while
//! vacuuming, then spits everything back out. Pass a settings JSON path as
//! the first argument to override the defaults.

use std::path::PathBuf;
use std::process::ExitCode;

use color_vacuum::{Playground, PointerState, Settings, Vec2};

/// Length of the scripted session in seconds
const SESSION_SECONDS: u32 = 20;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Color Vacuum (headless) starting...");

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = match Settings::load_or_default(path.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut playground = Playground::new(&settings);
    let fps = settings.playground.fps.max(1);
    let dt = 1.0 / fps as f32;
    let total_frames = SESSION_SECONDS * fps;

    for frame in 0..total_frames {
        let pointer = scripted_pointer(&playground, frame, total_frames, fps);
        playground.frame(&pointer, dt);

        if frame % fps == 0 {
            for line in playground.hud_lines().iter().skip(3) {
                log::info!("[{:>3}s] {}", frame / fps, line);
            }
        }
    }

    if let Err(violation) = playground.game().validate_invariants() {
        log::error!("Simulation ended in a bad state: {violation}");
        return ExitCode::FAILURE;
    }

    let tallies = playground.tallies();
    println!(
        "Finished {} frames: {} active, {} stored, {} captured, {} released, {} deleted, {} refilled",
        playground.frames(),
        playground.game().active_count(),
        playground.game().inventory_count(),
        tallies.captured,
        tallies.released,
        tallies.deleted,
        tallies.refilled
    );
    ExitCode::SUCCESS
}

/// Lissajous sweep; vacuum for the first half, spit twice a second after that
fn scripted_pointer(playground: &Playground, frame: u32, total_frames: u32, fps: u32) -> PointerState {
    let game = playground.game();
    let t = frame as f32 / fps as f32;
    let center = Vec2::new(game.width(), game.play_area_height()) / 2.0;
    let position = center + Vec2::new((t * 0.9).sin(), (t * 1.3).cos()) * center * 0.8;

    let vacuuming = frame < total_frames / 2;
    PointerState {
        position,
        capture_held: vacuuming,
        release_clicked: !vacuuming && frame % (fps / 2).max(1) == 0,
    }
}
