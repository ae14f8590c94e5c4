//! Headless front end
//!
//! Turns raw pointer state into simulation calls once per frame and exposes
//! what a renderer needs: a draw list and HUD text. Window creation and the
//! actual drawing belong to whoever hosts this.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::settings::{PlaygroundConfig, Settings};
use crate::sim::{
    DeleteZone, GameLogic, ReleaseInput, SimEvent, SpawnRanges, TickInput, TickReport,
    random_velocity, random_vivid_color, tick,
};

/// Mixed into the sim seed so the scatter RNG gets its own stream
const SCATTER_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Raw pointer state sampled by the host each frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub position: Vec2,
    /// Vacuum button held
    pub capture_held: bool,
    /// Spit button clicked this frame
    pub release_clicked: bool,
}

/// One ball to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub rgb: [u8; 3],
    /// Drawn in the inventory strip
    pub stored: bool,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    pub width: f32,
    pub height: f32,
    pub play_area_height: f32,
    pub delete_zone: Option<DeleteZone>,
    /// Active balls first, then stored balls in slot order
    pub circles: Vec<Circle>,
    pub pointer: Vec2,
    pub influence_radius: f32,
}

/// Running counts built from simulation events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tallies {
    pub spawned: u64,
    pub refilled: u64,
    pub captured: u64,
    pub released: u64,
    pub deleted: u64,
    pub blends: u64,
}

impl Tallies {
    fn record(&mut self, event: &SimEvent) {
        match event {
            SimEvent::Spawned { refill: true, .. } => self.refilled += 1,
            SimEvent::Spawned { refill: false, .. } => self.spawned += 1,
            SimEvent::Captured { .. } => self.captured += 1,
            SimEvent::Released { .. } => self.released += 1,
            SimEvent::Deleted { .. } => self.deleted += 1,
            SimEvent::Blended { .. } => self.blends += 1,
        }
    }
}

/// A running session: the simulation plus front-end state
#[derive(Debug)]
pub struct Playground {
    game: GameLogic,
    config: PlaygroundConfig,
    /// Saturation/value ranges shared with the refill generator
    spawn: SpawnRanges,
    /// Presentation-only randomness (initial scatter)
    rng: Pcg32,
    last_pointer: Option<Vec2>,
    tallies: Tallies,
    frames: u64,
}

impl Playground {
    /// Build the simulation and scatter the initial balls
    pub fn new(settings: &Settings) -> Self {
        let game = GameLogic::new(&settings.sim);
        let scatter_seed = settings
            .playground
            .seed
            .unwrap_or(game.seed() ^ SCATTER_SEED_MIX);

        let mut playground = Self {
            game,
            config: settings.playground.clone(),
            spawn: settings.sim.spawn.sanitized(),
            rng: Pcg32::seed_from_u64(scatter_seed),
            last_pointer: None,
            tallies: Tallies::default(),
            frames: 0,
        };
        playground.scatter_initial_balls();
        playground
    }

    fn scatter_initial_balls(&mut self) {
        let width = self.game.width().max(1.0);
        let height = self.game.play_area_height();

        for _ in 0..self.config.initial_balls {
            let pos = Vec2::new(
                self.rng.random_range(0.0..width),
                self.rng.random_range(0.0..height),
            );
            let vel = random_velocity(&mut self.rng, self.config.initial_speed);
            let radius = self.config.initial_radius.sample(&mut self.rng);
            let color = random_vivid_color(&mut self.rng, self.spawn.saturation, self.spawn.value);
            self.game.spawn(pos, vel, radius, color);
        }
        self.absorb_events();
        log::info!("Scattered {} initial balls", self.config.initial_balls);
    }

    /// Velocity for a spat ball: pointer travel since last frame, scaled down
    pub fn spit_velocity(&self, position: Vec2, dt: f32) -> Vec2 {
        let dt = if dt > 0.0 { dt } else { self.config.min_dt() };
        let divisor = if self.config.spit_speed_divisor > 0.0 {
            self.config.spit_speed_divisor
        } else {
            1.0
        };
        let last = self.last_pointer.unwrap_or(position);
        (position - last) / dt / divisor
    }

    /// Run one frame of input and simulation
    pub fn frame(&mut self, pointer: &PointerState, dt: f32) -> TickReport {
        let release = pointer.release_clicked.then(|| ReleaseInput {
            pos: pointer.position,
            vel: Some(self.spit_velocity(pointer.position, dt)),
        });
        let input = TickInput {
            pointer: pointer.position,
            capture: pointer.capture_held,
            influence_radius: self.config.influence_radius,
            release,
        };

        let report = tick(&mut self.game, &input, dt);
        self.absorb_events();
        self.last_pointer = Some(pointer.position);
        self.frames += 1;
        report
    }

    fn absorb_events(&mut self) {
        for event in self.game.drain_events() {
            self.tallies.record(&event);
        }
    }

    /// Status lines for the overlay
    pub fn hud_lines(&self) -> Vec<String> {
        vec![
            "Left click / hold - vacuum balls".to_string(),
            "Right click - spit last stored ball".to_string(),
            "Esc or Q - exit".to_string(),
            format!("Active balls: {}", self.game.active_count()),
            format!("Inventory: {}", self.game.inventory_count()),
            format!(
                "Deleted: {}  Refilled: {}",
                self.tallies.deleted, self.tallies.refilled
            ),
        ]
    }

    pub fn draw_list(&self) -> DrawList {
        let active = self.game.active_balls().iter().map(|b| (b, false));
        let stored = self.game.inventory().iter().map(|b| (b, true));
        let circles = active
            .chain(stored)
            .map(|(ball, stored)| Circle {
                id: ball.id,
                pos: ball.pos,
                radius: ball.radius,
                rgb: ball.color.to_rgb8(),
                stored,
            })
            .collect();

        DrawList {
            width: self.game.width(),
            height: self.game.height(),
            play_area_height: self.game.play_area_height(),
            delete_zone: self.game.delete_zone().copied(),
            circles,
            pointer: self.last_pointer.unwrap_or(Vec2::ZERO),
            influence_radius: self.config.influence_radius,
        }
    }

    pub fn game(&self) -> &GameLogic {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameLogic {
        &mut self.game
    }

    pub fn tallies(&self) -> &Tallies {
        &self.tallies
    }

    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimConfig;
    use crate::sim::Color;

    const DT: f32 = 1.0 / 60.0;

    fn settings(initial_balls: usize) -> Settings {
        Settings {
            sim: SimConfig {
                width: 800.0,
                height: 600.0,
                delete_zone: None,
                inventory_strip_height: 100.0,
                refill_on_remove: false,
                seed: Some(11),
                ..SimConfig::default()
            },
            playground: PlaygroundConfig {
                initial_balls,
                seed: Some(22),
                ..PlaygroundConfig::default()
            },
        }
    }

    fn hold(x: f32, y: f32) -> PointerState {
        PointerState {
            position: Vec2::new(x, y),
            capture_held: true,
            release_clicked: false,
        }
    }

    fn click(x: f32, y: f32) -> PointerState {
        PointerState {
            position: Vec2::new(x, y),
            capture_held: false,
            release_clicked: true,
        }
    }

    #[test]
    fn test_scatter_fills_play_area() {
        let playground = Playground::new(&settings(35));
        let game = playground.game();
        assert_eq!(game.active_count(), 35);
        assert_eq!(playground.tallies().spawned, 35);
        for ball in game.active_balls() {
            assert!(ball.pos.x >= 0.0 && ball.pos.x < 800.0);
            assert!(ball.pos.y >= 0.0 && ball.pos.y < 500.0);
            assert!(playground.config().initial_radius.contains(ball.radius));
            assert!(ball.color.is_normalized());
        }
        assert!(game.validate_invariants().is_ok());
    }

    #[test]
    fn test_scatter_is_reproducible() {
        let a = Playground::new(&settings(10));
        let b = Playground::new(&settings(10));
        assert_eq!(a.game().active_balls(), b.game().active_balls());
    }

    #[test]
    fn test_spit_velocity_from_pointer_travel() {
        let mut playground = Playground::new(&settings(0));
        playground.frame(&PointerState::default(), DT);
        // No travel yet: the pointer sat at the origin
        assert_eq!(playground.spit_velocity(Vec2::ZERO, DT), Vec2::ZERO);

        // 16 px in one 1/60 s frame, divided by 8
        let v = playground.spit_velocity(Vec2::new(16.0, 0.0), DT);
        assert!((v.x - 120.0).abs() < 1e-2);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn test_spit_velocity_guards_zero_dt() {
        let mut playground = Playground::new(&settings(0));
        playground.frame(&PointerState::default(), DT);
        let v = playground.spit_velocity(Vec2::new(0.0, 8.0), 0.0);
        assert!(v.is_finite());
        assert!((v.y - 60.0).abs() < 1e-2);
    }

    #[test]
    fn test_vacuum_and_spit_through_frames() {
        let mut playground = Playground::new(&settings(0));
        let ball = playground
            .game_mut()
            .spawn(Vec2::new(300.0, 300.0), Vec2::ZERO, 10.0, Color::RED);

        let report = playground.frame(&hold(300.0, 300.0), DT);
        assert_eq!(report.captured, Some(ball.id));
        assert_eq!(playground.game().inventory_count(), 1);

        let report = playground.frame(&click(400.0, 300.0), DT);
        assert_eq!(report.released, Some(ball.id));
        let out = playground.game().active_balls()[0];
        // Pointer moved 100 px in one frame: 100 * 60 / 8
        assert!((out.vel.x - 750.0).abs() < 0.5);
        assert_eq!(playground.tallies().captured, 1);
        assert_eq!(playground.tallies().released, 1);
        assert_eq!(playground.frames(), 2);
    }

    #[test]
    fn test_hud_reports_counts() {
        let mut playground = Playground::new(&settings(3));
        let target = playground.game().active_balls()[0].pos;
        playground.frame(&hold(target.x, target.y), DT);

        let hud = playground.hud_lines();
        let active = playground.game().active_count();
        assert!(hud.contains(&format!("Active balls: {active}")));
        assert!(hud.contains(&"Inventory: 1".to_string()));
    }

    #[test]
    fn test_draw_list_lists_every_ball() {
        let mut playground = Playground::new(&settings(0));
        let game = playground.game_mut();
        game.spawn(Vec2::new(100.0, 100.0), Vec2::ZERO, 10.0, Color::RED);
        game.spawn(Vec2::new(400.0, 100.0), Vec2::ZERO, 10.0, Color::BLUE);
        game.capture_near(Vec2::new(400.0, 100.0), 1.0);

        let list = playground.draw_list();
        assert_eq!(list.circles.len(), 2);
        assert_eq!(list.play_area_height, 500.0);
        assert!(!list.circles[0].stored);
        assert_eq!(list.circles[0].rgb, [255, 0, 0]);
        assert!(list.circles[1].stored);
        assert!(list.circles[1].pos.y >= 500.0);
    }

    #[test]
    fn test_delete_tally_counts_refills() {
        let mut settings = settings(0);
        settings.sim.delete_zone = Some(DeleteZone::new(0.0, 0.0, 50.0, 50.0));
        settings.sim.refill_on_remove = true;
        let mut playground = Playground::new(&settings);
        playground
            .game_mut()
            .spawn(Vec2::new(25.0, 25.0), Vec2::ZERO, 5.0, Color::RED);
        playground.frame(&PointerState::default(), DT);

        assert_eq!(playground.tallies().deleted, 1);
        assert_eq!(playground.tallies().refilled, 1);
        assert_eq!(playground.game().active_count(), 1);
    }
}
