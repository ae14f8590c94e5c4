//! Per-frame simulation step
//!
//! One call per rendered frame: vacuum, spit, then advance.

use glam::Vec2;

use super::game::GameLogic;
use crate::consts::MOUSE_INFLUENCE_RADIUS;

/// Spit request for this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleaseInput {
    pub pos: Vec2,
    /// `None` lets the simulation pick (remembered or random velocity)
    pub vel: Option<Vec2>,
}

/// Semantic input for a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    /// Pointer position in playfield coordinates
    pub pointer: Vec2,
    /// Vacuum held down
    pub capture: bool,
    /// Reach of the vacuum beyond a ball's surface
    pub influence_radius: f32,
    /// Spit trigger (one-shot)
    pub release: Option<ReleaseInput>,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            pointer: Vec2::ZERO,
            capture: false,
            influence_radius: MOUSE_INFLUENCE_RADIUS,
            release: None,
        }
    }
}

/// What a tick changed besides movement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub captured: Option<u32>,
    pub released: Option<u32>,
}

/// Apply one frame of input, then advance by `dt` seconds
pub fn tick(game: &mut GameLogic, input: &TickInput, dt: f32) -> TickReport {
    let mut report = TickReport::default();

    if input.capture {
        report.captured = game
            .capture_near(input.pointer, input.influence_radius)
            .map(|ball| ball.id);
    }

    if let Some(release) = input.release {
        report.released = game.release(release.pos, release.vel).map(|ball| ball.id);
    }

    game.advance(dt);
    report
}
