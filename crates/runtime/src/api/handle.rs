//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving the battle session or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use idle_core::{Attribute, PlayerState};

use super::command::HostCommand;
use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, SessionSnapshot, SessionStatus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Send a command built around a fresh reply channel and await the reply.
    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Start a battle session.
    ///
    /// A missing player or stage (or one the rules reject) is reported as a
    /// diagnostic on [`Topic::Combat`]; the returned status is unchanged.
    /// Starting while a session is running replaces it.
    pub async fn start(
        &self,
        player: Option<PlayerState>,
        stage: Option<u32>,
    ) -> Result<SessionStatus> {
        self.request(|reply| Command::Start {
            player,
            stage,
            reply,
        })
        .await
    }

    /// Stop the running session.
    ///
    /// Once this returns, no further tick will run. No-op when nothing is
    /// running.
    pub async fn stop(&self) -> Result<SessionStatus> {
        self.request(|reply| Command::Stop { reply }).await
    }

    /// Swap the player snapshot of the running session between ticks.
    pub async fn update_user_data(&self, player: PlayerState) -> Result<SessionStatus> {
        self.request(|reply| Command::UpdateUserData { player, reply })
            .await
    }

    /// Move the running session to another stage, respawning the monster.
    pub async fn update_stage(&self, stage: u32) -> Result<SessionStatus> {
        self.request(|reply| Command::UpdateStage { stage, reply })
            .await
    }

    /// Spend unallocated stat points on the running session's player.
    ///
    /// Returns the updated player, or `None` when no session is running.
    pub async fn allocate_stat(
        &self,
        attribute: Attribute,
        points: u32,
    ) -> Result<Option<PlayerState>> {
        self.request(|reply| Command::AllocateStat {
            attribute,
            points,
            reply,
        })
        .await?
    }

    /// Query the current session (read-only snapshot)
    pub async fn query_state(&self) -> Result<SessionSnapshot> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Route a loosely-typed host message to the matching operation.
    pub async fn dispatch(&self, command: HostCommand) -> Result<SessionStatus> {
        match command {
            HostCommand::Start { player, stage } => self.start(player, stage).await,
            HostCommand::Stop => self.stop().await,
            HostCommand::UpdateUserData { player } => self.update_user_data(player).await,
            HostCommand::UpdateStage { stage } => self.update_stage(stage).await,
        }
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Combat` - Narration lines and diagnostics
    /// - `Topic::Session` - Started / Update / Dead / Stopped
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use idle_runtime::Topic;
    ///
    /// let mut session_rx = handle.subscribe(Topic::Session);
    /// while let Ok(event) = session_rx.recv().await {
    ///     // persist snapshots
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }
}
