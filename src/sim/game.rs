//! The simulation engine
//!
//! `GameLogic` owns every ball. A ball is either on the playfield (`active`)
//! or parked in the `inventory`; moving between the two is always a
//! remove-then-push of the same value, so ids are never duplicated.

use std::collections::HashSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::color::{Color, blend};
use super::layout::InventoryLayout;
use super::spawn::{FloatRange, Playfield, Refill, RefillFn, SpawnSpec, random_velocity};
use super::state::{Ball, BallState, DeleteZone, Inventory, SimEvent};
use crate::error::InvariantViolation;
use crate::settings::SimConfig;
use crate::wrap_coord;

/// Oldest events are dropped past this many undrained entries
pub const MAX_PENDING_EVENTS: usize = 1024;

/// Balls, inventory and the rules that move between them
#[derive(Debug)]
pub struct GameLogic {
    layout: InventoryLayout,
    delete_zone: Option<DeleteZone>,
    /// Playfield balls, in spawn/release order
    active: Vec<Ball>,
    inventory: Inventory,
    refill_on_remove: bool,
    refill_on_capture: bool,
    remember_velocity: bool,
    /// Speed range for releases that need a fresh random velocity
    release_speed: FloatRange,
    refill: Refill,
    seed: u64,
    rng: Pcg32,
    next_id: u32,
    events: Vec<SimEvent>,
}

impl GameLogic {
    /// Create an empty simulation from config (no balls yet)
    pub fn new(config: &SimConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let ranges = config.spawn.sanitized();
        let layout = config.layout();

        log::info!(
            "Simulation {}x{} (play area height {}), seed {}, refill {}",
            layout.width,
            layout.height,
            layout.play_area_height(),
            seed,
            config.refill_on_remove
        );

        Self {
            layout,
            delete_zone: config.delete_zone,
            active: Vec::new(),
            inventory: Inventory::new(),
            refill_on_remove: config.refill_on_remove,
            refill_on_capture: config.refill_on_capture,
            remember_velocity: config.remember_velocity,
            release_speed: ranges.speed,
            refill: Refill::Random(ranges),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 0,
            events: Vec::new(),
        }
    }

    /// Replace the built-in refill generator
    pub fn with_refill_generator(mut self, generator: RefillFn) -> Self {
        self.refill = Refill::Custom(generator);
        self
    }

    pub fn set_refill_generator(&mut self, generator: RefillFn) {
        self.refill = Refill::Custom(generator);
    }

    /// Allocate a new ball id (never reused)
    fn next_ball_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Put a new ball on the playfield
    pub fn spawn(&mut self, pos: Vec2, vel: Vec2, radius: f32, color: Color) -> Ball {
        self.spawn_ball(pos, vel, radius, color, false)
    }

    fn spawn_ball(&mut self, pos: Vec2, vel: Vec2, radius: f32, color: Color, refill: bool) -> Ball {
        let id = self.next_ball_id();
        let ball = Ball::new(id, pos, vel, radius, color);
        self.active.push(ball);
        self.push_event(SimEvent::Spawned { id, refill });
        ball
    }

    /// Spawn one replacement ball if refilling is on
    fn spawn_replacement(&mut self) -> Option<Ball> {
        if !self.refill_on_remove {
            return None;
        }
        let field = self.playfield();
        let SpawnSpec {
            pos,
            vel,
            radius,
            color,
        } = self.refill.generate(&field, &mut self.rng);
        let ball = self.spawn_ball(pos, vel, radius, color, true);
        log::debug!("Refilled ball {} at ({:.1}, {:.1})", ball.id, pos.x, pos.y);
        Some(ball)
    }

    /// Advance the simulation by `dt` seconds
    ///
    /// Moves and wraps every ball present at the start of the call, deletes
    /// the ones that land in the delete zone (refilling as configured), then
    /// blends the colors of every touching pair.
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        let width = self.layout.width;
        let height = self.layout.play_area_height();

        // Refills land at the tail, past the balls counted here
        let frame_count = self.active.len();
        let mut cursor = 0;
        for _ in 0..frame_count {
            let ball = &mut self.active[cursor];
            ball.integrate(dt);
            ball.pos = Vec2::new(wrap_coord(ball.pos.x, width), wrap_coord(ball.pos.y, height));

            let doomed = self.delete_zone.is_some_and(|zone| zone.contains(ball.pos));
            if doomed {
                let removed = self.active.remove(cursor);
                log::debug!("Ball {} entered the delete zone", removed.id);
                self.push_event(SimEvent::Deleted { id: removed.id });
                self.spawn_replacement();
            } else {
                cursor += 1;
            }
        }

        self.blend_contacts();
        log::trace!(
            "advance dt={:.4}: {} active, {} stored",
            dt,
            self.active.len(),
            self.inventory.len()
        );
    }

    /// Mix colors of every touching pair
    ///
    /// Pairs are visited in order and each reads the colors present at that
    /// moment, so chains of contacts compound within one frame.
    fn blend_contacts(&mut self) {
        let n = self.active.len();
        for i in 0..n {
            for j in (i + 1)..n {
                if !self.active[i].touches(&self.active[j]) {
                    continue;
                }
                let mixed = blend(self.active[i].color, self.active[j].color);
                self.active[i].color = mixed;
                self.active[j].color = mixed;
                let (a, b) = (self.active[i].id, self.active[j].id);
                self.push_event(SimEvent::Blended { a, b });
            }
        }
    }

    /// Vacuum the active ball whose surface is closest to `pointer`
    ///
    /// Only balls whose surface lies within `influence_radius` qualify; ties
    /// go to the earliest ball. Returns the ball as parked in the inventory.
    pub fn capture_near(&mut self, pointer: Vec2, influence_radius: f32) -> Option<Ball> {
        let mut best: Option<(usize, f32)> = None;
        for (idx, ball) in self.active.iter().enumerate() {
            let dist = ball.surface_distance(pointer);
            if dist > influence_radius {
                continue;
            }
            if best.is_none_or(|(_, best_dist)| dist < best_dist) {
                best = Some((idx, dist));
            }
        }
        let (idx, _) = best?;

        let mut ball = self.active.remove(idx);
        ball.stored_vel = ball.vel;
        let id = ball.id;
        self.inventory.push(ball);
        self.recompute_inventory_layout();
        self.push_event(SimEvent::Captured { id });
        log::debug!("Captured ball {} ({} stored)", id, self.inventory.len());

        if self.refill_on_capture {
            self.spawn_replacement();
        }

        self.inventory.last().copied()
    }

    /// Spit the most recently captured ball back out at `pos`
    ///
    /// Without an explicit velocity the ball reuses its remembered velocity,
    /// or gets a random one if it never moved.
    pub fn release(&mut self, pos: Vec2, vel: Option<Vec2>) -> Option<Ball> {
        let mut ball = self.inventory.pop()?;
        self.recompute_inventory_layout();

        let vel = match vel {
            Some(vel) => vel,
            None if self.remember_velocity && ball.stored_vel.length() > 0.0 => ball.stored_vel,
            None => random_velocity(&mut self.rng, self.release_speed),
        };

        ball.pos = pos;
        ball.vel = vel;
        ball.stored_vel = vel;
        ball.state = BallState::Active;
        self.active.push(ball);
        self.push_event(SimEvent::Released { id: ball.id });
        log::debug!(
            "Released ball {} at ({:.1}, {:.1}) with velocity ({:.1}, {:.1})",
            ball.id,
            pos.x,
            pos.y,
            vel.x,
            vel.y
        );

        Some(ball)
    }

    /// Re-park every stored ball on its slot
    ///
    /// Without a strip there are no slots; stored balls only lose their velocity.
    pub fn recompute_inventory_layout(&mut self) {
        let layout = self.layout;
        for (slot, ball) in self.inventory.iter_mut().enumerate() {
            if layout.has_strip() {
                ball.park(layout.slot_position(slot));
            } else {
                ball.vel = Vec2::ZERO;
            }
        }
    }

    fn push_event(&mut self, event: SimEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Take every event recorded since the last call
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Balls on the playfield
    pub fn active_balls(&self) -> &[Ball] {
        &self.active
    }

    /// Stored balls in capture order
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn inventory_count(&self) -> usize {
        self.inventory.len()
    }

    pub fn width(&self) -> f32 {
        self.layout.width
    }

    pub fn height(&self) -> f32 {
        self.layout.height
    }

    pub fn play_area_height(&self) -> f32 {
        self.layout.play_area_height()
    }

    pub fn layout(&self) -> &InventoryLayout {
        &self.layout
    }

    pub fn delete_zone(&self) -> Option<&DeleteZone> {
        self.delete_zone.as_ref()
    }

    pub fn refill_on_remove(&self) -> bool {
        self.refill_on_remove
    }

    /// Seed of the simulation RNG (random when not configured)
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Snapshot of the playfield for refill generators
    pub fn playfield(&self) -> Playfield {
        Playfield {
            width: self.layout.width,
            height: self.layout.play_area_height(),
            active_count: self.active.len(),
            inventory_count: self.inventory.len(),
        }
    }

    /// Check ownership, id and range rules over every live ball
    pub fn validate_invariants(&self) -> Result<(), InvariantViolation> {
        let mut active_ids = HashSet::with_capacity(self.active.len());
        for ball in &self.active {
            if !active_ids.insert(ball.id) {
                return Err(InvariantViolation::DuplicateId { id: ball.id });
            }
            if ball.state != BallState::Active {
                return Err(InvariantViolation::WrongStateTag { id: ball.id });
            }
            self.validate_ball(ball)?;
        }

        let mut stored_ids = HashSet::with_capacity(self.inventory.len());
        for (slot, ball) in self.inventory.iter().enumerate() {
            if active_ids.contains(&ball.id) {
                return Err(InvariantViolation::DuplicatedBall { id: ball.id });
            }
            if !stored_ids.insert(ball.id) {
                return Err(InvariantViolation::DuplicateId { id: ball.id });
            }
            if ball.state != BallState::Stored {
                return Err(InvariantViolation::WrongStateTag { id: ball.id });
            }
            if ball.vel != Vec2::ZERO {
                return Err(InvariantViolation::StoredBallMoving { id: ball.id });
            }
            if self.layout.has_strip() && ball.pos != self.layout.slot_position(slot) {
                return Err(InvariantViolation::StoredBallOffSlot { id: ball.id, slot });
            }
            self.validate_ball(ball)?;
        }

        Ok(())
    }

    fn validate_ball(&self, ball: &Ball) -> Result<(), InvariantViolation> {
        if ball.id >= self.next_id {
            return Err(InvariantViolation::IdFromFuture {
                id: ball.id,
                next_id: self.next_id,
            });
        }
        if !ball.color.is_normalized() {
            return Err(InvariantViolation::ColorOutOfGamut { id: ball.id });
        }
        if !(ball.radius > 0.0) {
            return Err(InvariantViolation::NonPositiveRadius {
                id: ball.id,
                radius: ball.radius,
            });
        }
        Ok(())
    }
}
