//! Entity records owned by the simulation
//!
//! Balls live either on the playfield or in the inventory, never both.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::color::Color;

/// Where a ball currently lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    /// Moving freely on the playfield
    Active,
    /// Parked in an inventory slot
    Stored,
}

/// A single colored ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    /// Units per second
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    /// Last velocity seen while moving, reused when spat out without an explicit velocity
    pub stored_vel: Vec2,
    pub state: BallState,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32, color: Color) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            color,
            stored_vel: vel,
            state: BallState::Active,
        }
    }

    /// Integrate one step and remember the velocity that moved us
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.stored_vel = self.vel;
    }

    /// Circles overlap or touch
    pub fn touches(&self, other: &Ball) -> bool {
        self.pos.distance(other.pos) <= self.radius + other.radius
    }

    /// Distance from `point` to this ball's surface (negative inside)
    pub fn surface_distance(&self, point: Vec2) -> f32 {
        self.pos.distance(point) - self.radius
    }

    /// Park at a slot: fixed position, no motion
    pub fn park(&mut self, slot: Vec2) {
        self.pos = slot;
        self.vel = Vec2::ZERO;
    }
}

/// Captured balls, last in first out
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    balls: Vec<Ball>,
}

impl Inventory {
    pub fn new() -> Self {
        Self { balls: Vec::new() }
    }

    pub fn push(&mut self, mut ball: Ball) {
        ball.state = BallState::Stored;
        self.balls.push(ball);
    }

    /// Remove the most recently captured ball
    pub fn pop(&mut self) -> Option<Ball> {
        self.balls.pop()
    }

    pub fn last(&self) -> Option<&Ball> {
        self.balls.last()
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    /// Stored balls in capture order
    pub fn iter(&self) -> std::slice::Iter<'_, Ball> {
        self.balls.iter()
    }

    pub fn as_slice(&self) -> &[Ball] {
        &self.balls
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Ball> {
        self.balls.iter_mut()
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a Ball;
    type IntoIter = std::slice::Iter<'a, Ball>;

    fn into_iter(self) -> Self::IntoIter {
        self.balls.iter()
    }
}

/// Axis-aligned rectangle that destroys balls entering it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeleteZone {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl DeleteZone {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Inclusive on every edge
    pub fn contains(&self, p: Vec2) -> bool {
        (self.min_x..=self.max_x).contains(&p.x) && (self.min_y..=self.max_y).contains(&p.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.max_x - self.min_x, self.max_y - self.min_y)
    }
}

/// Things that happened during simulation calls, drained by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    /// New ball on the playfield (`refill` when spawned automatically)
    Spawned { id: u32, refill: bool },
    /// Ball vacuumed into the inventory
    Captured { id: u32 },
    /// Ball spat back onto the playfield
    Released { id: u32 },
    /// Ball destroyed by the delete zone
    Deleted { id: u32 },
    /// Two touching balls mixed colors
    Blended { a: u32, b: u32 },
}
