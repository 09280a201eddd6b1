//! Validation errors for host-provided state.
//!
//! The tick itself never fails: everything it touches is clamped. These errors
//! are raised at the boundary, when a host hands the simulation a stage or a
//! player snapshot that would break the arithmetic invariants.

use thiserror::Error;

use crate::stats::Attribute;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("stage must be at least 1")]
    ZeroStage,

    #[error("player level must be at least 1")]
    ZeroLevel,

    #[error("player max hp must be greater than zero")]
    ZeroMaxHp,

    #[error("player hp {hp} exceeds max hp {max_hp}")]
    HpExceedsMax { hp: u32, max_hp: u32 },

    #[error("cannot spend {requested} points on {attribute}: only {available} available")]
    NotEnoughStatPoints {
        attribute: Attribute,
        requested: u32,
        available: u32,
    },
}
