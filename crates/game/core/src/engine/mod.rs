//! Battle session and the per-tick pipeline.
//!
//! A [`BattleSession`] is the authoritative reducer for one player's fight.
//! Every tick flows through the same two phases:
//!
//! exchange (monster attacks, player attacks) → progression (reward, level,
//! potion, death)
//!
//! The session never schedules itself. The runtime calls [`BattleSession::tick`]
//! on its timer and decides what to do with the [`TickReport`].

mod session;

pub use session::BattleSession;

use crate::combat::CombatLog;

/// Terminal state of a tick.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum TickOutcome {
    /// The fight goes on.
    Continue,
    /// The player reached 0 hp. The death penalty has already been applied
    /// and the session should not tick again.
    PlayerDead { message: String },
}

impl TickOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::PlayerDead { .. })
    }
}

/// Everything one tick produced, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    /// 1-based index of this tick within the session.
    pub tick: u64,
    pub logs: Vec<CombatLog>,
    pub outcome: TickOutcome,
}
