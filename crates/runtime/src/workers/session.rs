//! Session worker that owns the authoritative [`BattleSession`].
//!
//! Receives commands from [`crate::RuntimeHandle`], ticks the session on its
//! interval, and publishes narration and snapshots to the EventBus.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use idle_core::{
    Attribute, BattleSession, CombatLog, GameConfig, PlayerState, RandomSource, TickOutcome,
};

use crate::api::Result;
use crate::events::{Event, EventBus, SessionEvent, SessionSnapshot, SessionStatus};

/// Commands that can be sent to the session worker
pub enum Command {
    /// Start (or restart) a session. Missing inputs become a diagnostic.
    Start {
        player: Option<PlayerState>,
        stage: Option<u32>,
        reply: oneshot::Sender<SessionStatus>,
    },
    /// Cancel the interval and end the session.
    Stop { reply: oneshot::Sender<SessionStatus> },
    /// Replace the running session's player snapshot.
    UpdateUserData {
        player: PlayerState,
        reply: oneshot::Sender<SessionStatus>,
    },
    /// Respawn the running session's monster at a new stage.
    UpdateStage {
        stage: u32,
        reply: oneshot::Sender<SessionStatus>,
    },
    /// Spend stat points on the running session's player.
    AllocateStat {
        attribute: Attribute,
        points: u32,
        reply: oneshot::Sender<Result<Option<PlayerState>>>,
    },
    /// Query the current session (read-only).
    QueryState {
        reply: oneshot::Sender<SessionSnapshot>,
    },
}

/// Background task that runs one battle session at a time.
///
/// Commands and ticks are served from the same `select!` loop, so a command
/// is always applied between two ticks and a tick always runs to completion.
pub struct SessionWorker {
    session: Option<BattleSession>,
    /// Player of the last session that ended, kept for `query_state`.
    last_player: Option<PlayerState>,
    status: SessionStatus,
    ticker: Option<Interval>,
    tick_interval: Duration,
    game_config: GameConfig,
    rng: Box<dyn RandomSource>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SessionWorker {
    /// Creates a new session worker.
    pub fn new(
        game_config: GameConfig,
        tick_interval: Duration,
        rng: Box<dyn RandomSource>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            target: "runtime::session",
            tick_ms = tick_interval.as_millis() as u64,
            stat_resolution = game_config.stat_resolution.as_str(),
            "SessionWorker initialized"
        );

        Self {
            session: None,
            last_player: None,
            status: SessionStatus::Idle,
            ticker: None,
            tick_interval,
            game_config,
            rng,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    ///
    /// Exits once every handle (and so every command sender) is dropped.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                _ = next_tick(&mut self.ticker) => self.handle_tick(),
            }
        }

        debug!(target: "runtime::session", "SessionWorker shut down");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Start {
                player,
                stage,
                reply,
            } => {
                let status = self.handle_start(player, stage);
                if reply.send(status).is_err() {
                    debug!("Start reply channel closed (caller dropped)");
                }
            }
            Command::Stop { reply } => {
                let status = self.handle_stop();
                if reply.send(status).is_err() {
                    debug!("Stop reply channel closed (caller dropped)");
                }
            }
            Command::UpdateUserData { player, reply } => {
                let status = self.handle_update_user_data(player);
                if reply.send(status).is_err() {
                    debug!("UpdateUserData reply channel closed (caller dropped)");
                }
            }
            Command::UpdateStage { stage, reply } => {
                let status = self.handle_update_stage(stage);
                if reply.send(status).is_err() {
                    debug!("UpdateStage reply channel closed (caller dropped)");
                }
            }
            Command::AllocateStat {
                attribute,
                points,
                reply,
            } => {
                let result = self.handle_allocate_stat(attribute, points);
                if reply.send(result).is_err() {
                    debug!("AllocateStat reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.snapshot()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_start(&mut self, player: Option<PlayerState>, stage: Option<u32>) -> SessionStatus {
        let (player, stage) = match (player, stage) {
            (Some(player), Some(stage)) => (player, stage),
            (player, stage) => {
                self.diagnostic(format!(
                    "start ignored: missing {}",
                    match (player.is_none(), stage.is_none()) {
                        (true, true) => "player and stage",
                        (true, false) => "player",
                        _ => "stage",
                    }
                ));
                return self.status;
            }
        };

        let player_id = player.id.clone();
        let session = match BattleSession::new(player, stage, self.game_config.clone()) {
            Ok(session) => session,
            Err(error) => {
                self.diagnostic(format!("start ignored: {error}"));
                return self.status;
            }
        };

        if self.status.is_running() {
            info!(
                target: "runtime::session",
                player = %player_id,
                "Replacing running session"
            );
        }

        self.session = Some(session);
        self.last_player = None;
        self.ticker = Some(self.new_ticker());
        self.status = SessionStatus::Running;

        info!(
            target: "runtime::session",
            player = %player_id,
            stage,
            "Session started"
        );
        self.event_bus
            .publish(Event::Session(SessionEvent::Started { player_id, stage }));

        self.status
    }

    fn handle_stop(&mut self) -> SessionStatus {
        if !self.status.is_running() {
            debug!(target: "runtime::session", status = ?self.status, "Stop ignored: not running");
            return self.status;
        }

        // Dropping the interval is the cancellation: no tick can fire after this.
        self.ticker = None;
        self.last_player = self.session.take().map(BattleSession::into_player);
        self.status = SessionStatus::Stopped;

        info!(target: "runtime::session", "Session stopped");
        self.event_bus.publish(Event::Session(SessionEvent::Stopped));

        self.status
    }

    fn handle_update_user_data(&mut self, player: PlayerState) -> SessionStatus {
        let Some(session) = self.running_session() else {
            debug!(target: "runtime::session", "UpdateUserData ignored: not running");
            return self.status;
        };

        let player_id = player.id.clone();
        match session.update_player(player) {
            Ok(()) => {
                debug!(target: "runtime::session", player = %player_id, "Player snapshot replaced");
            }
            Err(error) => self.diagnostic(format!("updateUserData ignored: {error}")),
        }

        self.status
    }

    fn handle_update_stage(&mut self, stage: u32) -> SessionStatus {
        let Some(session) = self.running_session() else {
            debug!(target: "runtime::session", stage, "UpdateStage ignored: not running");
            return self.status;
        };

        match session.update_stage(stage) {
            Ok(()) => {
                info!(target: "runtime::session", stage, "Stage changed, monster respawned");
            }
            Err(error) => self.diagnostic(format!("updateStage ignored: {error}")),
        }

        self.status
    }

    fn handle_allocate_stat(
        &mut self,
        attribute: Attribute,
        points: u32,
    ) -> Result<Option<PlayerState>> {
        let Some(session) = self.running_session() else {
            return Ok(None);
        };

        let mut player = session.player().clone();
        player.allocate_stat(attribute, points)?;
        session.update_player(player.clone())?;

        debug!(
            target: "runtime::session",
            %attribute,
            points,
            remaining = player.stat_points,
            "Stat points allocated"
        );

        Ok(Some(player))
    }

    /// Runs one tick and publishes its results.
    ///
    /// Order: every log line, then `Dead` if the player died, then `Update`.
    /// On death the interval is dropped before the next `select!`.
    fn handle_tick(&mut self) {
        let Some(session) = self.session.as_mut() else {
            self.ticker = None;
            return;
        };

        let report = session.tick(&mut self.rng);
        let player = session.player().clone();

        debug!(
            target: "runtime::session",
            tick = report.tick,
            logs = report.logs.len(),
            hp = player.hp,
            monster_hp = session.monster().hp,
            "Tick resolved"
        );

        for log in report.logs {
            self.event_bus.publish(Event::Log(log));
        }

        match report.outcome {
            TickOutcome::Continue => {
                self.event_bus
                    .publish(Event::Session(SessionEvent::Update { player }));
            }
            TickOutcome::PlayerDead { message } => {
                self.ticker = None;
                self.status = SessionStatus::Dead;
                self.last_player = self.session.take().map(BattleSession::into_player);

                info!(
                    target: "runtime::session",
                    player = %player.id,
                    tick = report.tick,
                    "Player died, session ended"
                );

                self.event_bus.publish(Event::Session(SessionEvent::Dead {
                    player: player.clone(),
                    message,
                }));
                self.event_bus
                    .publish(Event::Session(SessionEvent::Update { player }));
            }
        }
    }

    fn running_session(&mut self) -> Option<&mut BattleSession> {
        if self.status.is_running() {
            self.session.as_mut()
        } else {
            None
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            player: self
                .session
                .as_ref()
                .map(|session| session.player().clone())
                .or_else(|| self.last_player.clone()),
            monster: self
                .session
                .as_ref()
                .map(|session| session.monster().clone()),
            ticks: self.session.as_ref().map_or(0, BattleSession::ticks),
        }
    }

    /// Log and publish a host-facing diagnostic. Never fails.
    fn diagnostic(&self, message: String) {
        warn!(target: "runtime::session", "{message}");
        self.event_bus
            .publish(Event::Log(CombatLog::diagnostic(message)));
    }

    /// Interval whose first tick fires one full period from now.
    fn new_ticker(&self) -> Interval {
        let period = self.tick_interval.max(Duration::from_millis(1));
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    }
}

/// Resolves on the next interval tick, or never when no session is armed.
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
