//! Error types
//!
//! Simulation calls never fail; these cover loading settings and checking
//! that a simulation still satisfies its ownership and range rules.

use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read settings: {err}"),
            Self::Parse(err) => write!(f, "invalid settings json: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// A broken simulation rule, reported by `GameLogic::validate_invariants`
#[derive(Clone, Debug, PartialEq)]
pub enum InvariantViolation {
    /// The same id is both on the playfield and in the inventory
    DuplicatedBall { id: u32 },
    /// Two live balls share an id
    DuplicateId { id: u32 },
    /// An id at or above the next id to be handed out
    IdFromFuture { id: u32, next_id: u32 },
    ColorOutOfGamut { id: u32 },
    NonPositiveRadius { id: u32, radius: f32 },
    /// A stored ball still has velocity
    StoredBallMoving { id: u32 },
    /// A stored ball is not on its slot
    StoredBallOffSlot { id: u32, slot: usize },
    /// A ball's state tag disagrees with the collection holding it
    WrongStateTag { id: u32 },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicatedBall { id } => {
                write!(f, "ball {id} is both active and stored")
            }
            Self::DuplicateId { id } => write!(f, "ball id {id} appears more than once"),
            Self::IdFromFuture { id, next_id } => {
                write!(f, "ball id {id} was never allocated (next id is {next_id})")
            }
            Self::ColorOutOfGamut { id } => write!(f, "ball {id} has a color outside [0, 1]"),
            Self::NonPositiveRadius { id, radius } => {
                write!(f, "ball {id} has non-positive radius {radius}")
            }
            Self::StoredBallMoving { id } => write!(f, "stored ball {id} has non-zero velocity"),
            Self::StoredBallOffSlot { id, slot } => {
                write!(f, "stored ball {id} is not parked on slot {slot}")
            }
            Self::WrongStateTag { id } => {
                write!(f, "ball {id} state does not match its container")
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}
