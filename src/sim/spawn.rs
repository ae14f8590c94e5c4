//! Spawn specifications and the refill strategy
//!
//! Refills either come from the built-in random generator or from a caller
//! supplied closure. Both draw from the simulation's own seeded RNG.

use std::f32::consts::TAU;
use std::fmt;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::color::Color;
use crate::consts::*;
use crate::vec_from_angle;

/// Everything needed to put a new ball on the playfield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnSpec {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// Closed interval sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatRange {
    pub min: f32,
    pub max: f32,
}

impl FloatRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Swap the bounds if they were given backwards
    pub fn sanitized(self) -> Self {
        if self.max < self.min {
            Self::new(self.max, self.min)
        } else {
            self
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let range = self.sanitized();
        rng.random_range(range.min..=range.max)
    }
}

/// Ranges used by the built-in refill generator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnRanges {
    pub radius: FloatRange,
    pub speed: FloatRange,
    pub saturation: FloatRange,
    pub value: FloatRange,
}

impl Default for SpawnRanges {
    fn default() -> Self {
        Self {
            radius: FloatRange::new(REFILL_RADIUS_MIN, REFILL_RADIUS_MAX),
            speed: FloatRange::new(REFILL_SPEED_MIN, REFILL_SPEED_MAX),
            saturation: FloatRange::new(REFILL_SATURATION_MIN, REFILL_SATURATION_MAX),
            value: FloatRange::new(REFILL_VALUE_MIN, REFILL_VALUE_MAX),
        }
    }
}

impl SpawnRanges {
    pub fn sanitized(self) -> Self {
        Self {
            radius: self.radius.sanitized(),
            speed: self.speed.sanitized(),
            saturation: self.saturation.sanitized(),
            value: self.value.sanitized(),
        }
    }
}

/// Read-only snapshot handed to refill generators
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    /// Height of the area balls move in (excludes the inventory strip)
    pub height: f32,
    pub active_count: usize,
    pub inventory_count: usize,
}

/// Caller-supplied refill generator
pub type RefillFn = Box<dyn FnMut(&Playfield, &mut Pcg32) -> SpawnSpec>;

/// How replacement balls are produced
pub enum Refill {
    Random(SpawnRanges),
    Custom(RefillFn),
}

impl Refill {
    pub fn generate(&mut self, field: &Playfield, rng: &mut Pcg32) -> SpawnSpec {
        match self {
            Refill::Random(ranges) => random_spec(rng, field, ranges),
            Refill::Custom(generator) => generator(field, rng),
        }
    }
}

impl fmt::Debug for Refill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Refill::Random(ranges) => f.debug_tuple("Random").field(ranges).finish(),
            Refill::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Uniform direction, speed drawn from `speed`
pub fn random_velocity<R: Rng + ?Sized>(rng: &mut R, speed: FloatRange) -> Vec2 {
    let angle = rng.random_range(0.0..TAU);
    vec_from_angle(angle, speed.sample(rng))
}

/// Any hue, saturation and value from the given (vivid) ranges
pub fn random_vivid_color<R: Rng + ?Sized>(
    rng: &mut R,
    saturation: FloatRange,
    value: FloatRange,
) -> Color {
    let hue = rng.random::<f32>();
    Color::from_hsv(hue, saturation.sample(rng), value.sample(rng))
}

/// Built-in generator: uniform position in the play area, random motion and look
pub fn random_spec<R: Rng + ?Sized>(rng: &mut R, field: &Playfield, ranges: &SpawnRanges) -> SpawnSpec {
    let x = rng.random_range(0.0..field.width.max(1.0));
    let y = rng.random_range(0.0..field.height.max(1.0));
    let radius = ranges.radius.sample(rng);
    let vel = random_velocity(rng, ranges.speed);
    let color = random_vivid_color(rng, ranges.saturation, ranges.value);

    SpawnSpec {
        pos: Vec2::new(x, y),
        vel,
        radius,
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn field() -> Playfield {
        Playfield {
            width: 800.0,
            height: 600.0,
            active_count: 0,
            inventory_count: 0,
        }
    }

    #[test]
    fn test_range_sanitized() {
        let r = FloatRange::new(5.0, 1.0).sanitized();
        assert_eq!(r, FloatRange::new(1.0, 5.0));
        let mut rng = Pcg32::seed_from_u64(1);
        let v = FloatRange::new(3.0, 3.0).sample(&mut rng);
        assert_eq!(v, 3.0);
    }

    #[test]
    fn test_random_spec_within_ranges() {
        let mut rng = Pcg32::seed_from_u64(42);
        let ranges = SpawnRanges::default();
        for _ in 0..200 {
            let spec = random_spec(&mut rng, &field(), &ranges);
            assert!(spec.pos.x >= 0.0 && spec.pos.x < 800.0);
            assert!(spec.pos.y >= 0.0 && spec.pos.y < 600.0);
            assert!(ranges.radius.contains(spec.radius));
            let speed = spec.vel.length();
            assert!(speed >= REFILL_SPEED_MIN - 1e-3 && speed <= REFILL_SPEED_MAX + 1e-3);
            assert!(spec.color.is_normalized());
            let (_, s, v) = spec.color.to_hsv();
            assert!(s >= REFILL_SATURATION_MIN - 1e-3);
            assert!(v >= REFILL_VALUE_MIN - 1e-3);
        }
    }

    #[test]
    fn test_same_seed_same_spec() {
        let mut a = Pcg32::seed_from_u64(7);
        let mut b = Pcg32::seed_from_u64(7);
        let ranges = SpawnRanges::default();
        assert_eq!(
            random_spec(&mut a, &field(), &ranges),
            random_spec(&mut b, &field(), &ranges)
        );
    }

    #[test]
    fn test_custom_refill_is_called() {
        let mut refill = Refill::Custom(Box::new(|field: &Playfield, _rng: &mut Pcg32| SpawnSpec {
            pos: Vec2::new(field.width / 2.0, field.height / 2.0),
            vel: Vec2::ZERO,
            radius: 4.0,
            color: Color::GREEN,
        }));
        let mut rng = Pcg32::seed_from_u64(0);
        let spec = refill.generate(&field(), &mut rng);
        assert_eq!(spec.pos, Vec2::new(400.0, 300.0));
        assert_eq!(format!("{refill:?}"), "Custom(..)");
    }
}
