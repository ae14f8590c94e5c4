//! Color Vacuum - a color-mixing ball playground
//!
//! Core modules:
//! - `sim`: Simulation core (balls, inventory, delete zone, color blending)
//! - `playground`: Headless front end (pointer handling, HUD, draw list)
//! - `settings`: Serde-backed configuration
//! - `error`: Config and invariant errors

pub mod error;
pub mod playground;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, InvariantViolation};
pub use playground::{Playground, PointerState};
pub use settings::{PlaygroundConfig, Settings, SimConfig};

/// 2D vector used for positions and velocities
pub use glam::Vec2;

/// Tuning defaults shared by the simulation and the front end
pub mod consts {
    /// Window dimensions
    pub const WINDOW_WIDTH: f32 = 1100.0;
    pub const WINDOW_HEIGHT: f32 = 720.0;

    /// Inventory strip along the bottom edge
    pub const INVENTORY_STRIP_HEIGHT: f32 = 130.0;
    pub const INVENTORY_SLOT_SIZE: f32 = 56.0;
    pub const INVENTORY_PADDING: f32 = 20.0;

    /// Delete zone size and inset from the bottom-right play-area corner
    pub const DELETE_ZONE_WIDTH: f32 = 150.0;
    pub const DELETE_ZONE_HEIGHT: f32 = 90.0;
    pub const DELETE_ZONE_INSET: f32 = 24.0;

    /// Refill spawn ranges
    pub const REFILL_RADIUS_MIN: f32 = 12.0;
    pub const REFILL_RADIUS_MAX: f32 = 26.0;
    pub const REFILL_SPEED_MIN: f32 = 40.0;
    pub const REFILL_SPEED_MAX: f32 = 140.0;
    /// Saturation/value stay high so refills never look muddy
    pub const REFILL_SATURATION_MIN: f32 = 0.65;
    pub const REFILL_SATURATION_MAX: f32 = 1.0;
    pub const REFILL_VALUE_MIN: f32 = 0.7;
    pub const REFILL_VALUE_MAX: f32 = 1.0;

    /// Front-end scatter and pointer handling
    pub const FPS: u32 = 60;
    pub const INITIAL_BALLS: usize = 35;
    pub const INITIAL_RADIUS_MIN: f32 = 12.0;
    pub const INITIAL_RADIUS_MAX: f32 = 24.0;
    pub const INITIAL_SPEED_MIN: f32 = 50.0;
    pub const INITIAL_SPEED_MAX: f32 = 150.0;
    pub const MOUSE_INFLUENCE_RADIUS: f32 = 80.0;
    /// Pointer speed is divided by this before spitting a ball
    pub const SPIT_SPEED_DIVISOR: f32 = 8.0;
}

/// Wrap a coordinate into [0, extent)
///
/// Non-positive extents leave the value untouched.
#[inline]
pub fn wrap_coord(value: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        return value;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid rounds tiny negatives up to `extent`
    if wrapped >= extent { 0.0 } else { wrapped }
}

/// Unit-length direction at `angle` radians, scaled by `length`
#[inline]
pub fn vec_from_angle(angle: f32, length: f32) -> Vec2 {
    Vec2::new(angle.cos() * length, angle.sin() * length)
}
