//! Simulation and front-end settings
//!
//! Loaded from an optional JSON file; every missing field falls back to the
//! defaults in `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{DeleteZone, FloatRange, InventoryLayout, SpawnRanges};

/// Construction parameters for `GameLogic`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub width: f32,
    pub height: f32,
    pub delete_zone: Option<DeleteZone>,

    // === Inventory strip ===
    pub inventory_strip_height: f32,
    pub inventory_slot_size: f32,
    pub inventory_padding: f32,

    // === Refill ===
    /// Spawn a replacement whenever the delete zone destroys a ball
    pub refill_on_remove: bool,
    /// Also spawn a replacement after each capture (needs `refill_on_remove`)
    pub refill_on_capture: bool,
    /// Reuse a captured ball's last velocity when it is spat out
    pub remember_velocity: bool,
    pub spawn: SpawnRanges,

    /// Simulation RNG seed (random when absent)
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        let play_height = WINDOW_HEIGHT - INVENTORY_STRIP_HEIGHT;
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            delete_zone: Some(Self::corner_delete_zone(WINDOW_WIDTH, play_height)),
            inventory_strip_height: INVENTORY_STRIP_HEIGHT,
            inventory_slot_size: INVENTORY_SLOT_SIZE,
            inventory_padding: INVENTORY_PADDING,
            refill_on_remove: true,
            refill_on_capture: true,
            remember_velocity: true,
            spawn: SpawnRanges::default(),
            seed: None,
        }
    }
}

impl SimConfig {
    /// Delete zone tucked into the bottom-right corner of the play area
    pub fn corner_delete_zone(width: f32, play_height: f32) -> DeleteZone {
        DeleteZone::new(
            width - DELETE_ZONE_WIDTH - DELETE_ZONE_INSET,
            play_height - DELETE_ZONE_HEIGHT - DELETE_ZONE_INSET,
            width - DELETE_ZONE_INSET,
            play_height - DELETE_ZONE_INSET,
        )
    }

    /// Strip geometry with layout parameters clamped
    pub fn layout(&self) -> InventoryLayout {
        InventoryLayout::new(
            self.width,
            self.height,
            self.inventory_strip_height,
            self.inventory_slot_size,
            self.inventory_padding,
        )
    }

    /// The reduced variant: no refills, no velocity memory
    pub fn simple(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            delete_zone: None,
            inventory_strip_height: 0.0,
            refill_on_remove: false,
            refill_on_capture: false,
            remember_velocity: false,
            ..Self::default()
        }
    }
}

/// Front-end tuning (initial scatter and pointer handling)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    pub initial_balls: usize,
    pub initial_radius: FloatRange,
    pub initial_speed: FloatRange,
    /// Vacuum reach beyond a ball's surface
    pub influence_radius: f32,
    /// Pointer speed is divided by this when spitting
    pub spit_speed_divisor: f32,
    pub fps: u32,
    /// Seed for the scatter RNG (derived from the sim seed when absent)
    pub seed: Option<u64>,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            initial_balls: INITIAL_BALLS,
            initial_radius: FloatRange::new(INITIAL_RADIUS_MIN, INITIAL_RADIUS_MAX),
            initial_speed: FloatRange::new(INITIAL_SPEED_MIN, INITIAL_SPEED_MAX),
            influence_radius: MOUSE_INFLUENCE_RADIUS,
            spit_speed_divisor: SPIT_SPEED_DIVISOR,
            fps: FPS,
            seed: None,
        }
    }
}

impl PlaygroundConfig {
    /// Frame time used when the measured one is unusable
    pub fn min_dt(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }
}

/// Everything the native binary reads from disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sim: SimConfig,
    pub playground: PlaygroundConfig,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, otherwise defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }
}
