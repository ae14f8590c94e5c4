//! Simulation core
//!
//! All ball rules live here. This module is UI-agnostic:
//! - Balls are owned by either the playfield or the inventory
//! - Seeded RNG only (refills and random release velocities)
//! - No rendering or platform dependencies

pub mod color;
pub mod game;
pub mod layout;
pub mod spawn;
pub mod state;
pub mod tick;

pub use color::{Color, blend};
pub use game::{GameLogic, MAX_PENDING_EVENTS};
pub use layout::InventoryLayout;
pub use spawn::{
    FloatRange, Playfield, Refill, RefillFn, SpawnRanges, SpawnSpec, random_spec,
    random_velocity, random_vivid_color,
};
pub use state::{Ball, BallState, DeleteZone, Inventory, SimEvent};
pub use tick::{ReleaseInput, TickInput, TickReport, tick};
