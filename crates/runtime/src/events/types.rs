//! Event payloads for the session topic.

use idle_core::{MonsterState, PlayerState};
use serde::{Deserialize, Serialize};

/// Lifecycle of the battle session owned by the worker.
///
/// `Idle → Running → (Stopped | Dead)`. Both terminal states accept a new
/// `start`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Idle,
    Running,
    Stopped,
    Dead,
}

impl SessionStatus {
    pub fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Session lifecycle and state-sync notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A session began; the first tick fires one interval later.
    Started { player_id: String, stage: u32 },

    /// Player snapshot after a tick. Published once per tick, last.
    Update { player: PlayerState },

    /// The player died. The snapshot already has the death penalty applied.
    Dead { player: PlayerState, message: String },

    /// The session was stopped by the host.
    Stopped,
}

/// Point-in-time view of the worker, returned by `query_state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    /// Current player, or the last one seen if the session has ended.
    pub player: Option<PlayerState>,
    /// Live monster; `None` unless running.
    pub monster: Option<MonsterState>,
    pub ticks: u64,
}
