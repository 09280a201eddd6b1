//! Loosely-typed host messages.
//!
//! Hosts that relay messages from another process (a web page, a message
//! queue) receive them as `{"type": ..., "data": {...}}` JSON. [`HostCommand`]
//! decodes that shape and [`crate::RuntimeHandle::dispatch`] maps it onto the
//! typed handle methods.

use serde::{Deserialize, Serialize};

use idle_core::PlayerState;

use super::errors::{Result, RuntimeError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum HostCommand {
    /// Both fields are optional on the wire; a start missing either one is
    /// reported as a diagnostic rather than rejected here.
    Start {
        #[serde(rename = "userData", default)]
        player: Option<PlayerState>,
        #[serde(rename = "currentStage", default)]
        stage: Option<u32>,
    },
    Stop,
    UpdateUserData {
        #[serde(rename = "userData")]
        player: PlayerState,
    },
    UpdateStage {
        #[serde(rename = "currentStage")]
        stage: u32,
    },
}

impl HostCommand {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(RuntimeError::MalformedCommand)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Stop => "stop",
            Self::UpdateUserData { .. } => "updateUserData",
            Self::UpdateStage { .. } => "updateStage",
        }
    }
}
