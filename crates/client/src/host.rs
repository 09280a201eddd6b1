//! Headless host loop: load, fight, narrate, save.

use anyhow::{Context, Result};
use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};

use idle_core::{CombatLog, PlayerState};
use idle_runtime::{
    Event, FilePlayerRepository, PlayerRepository, Runtime, SessionEvent, Topic,
};

use crate::config::ClientConfig;

/// Why the host loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitReason {
    Interrupted,
    PlayerDied,
    TickLimit,
    ChannelClosed,
}

pub async fn run(config: ClientConfig) -> Result<()> {
    let repo = FilePlayerRepository::new(&config.save_dir)
        .with_context(|| format!("opening save directory {}", config.save_dir.display()))?;
    let player = repo
        .load_or_create(&config.user_id)
        .with_context(|| format!("loading player {}", config.user_id))?;

    tracing::info!(
        player = %player.id,
        level = player.level,
        gold = player.gold,
        stage = config.stage,
        save_dir = %config.save_dir.display(),
        "Player loaded"
    );

    let runtime = Runtime::builder().config(config.runtime_config()).build();
    let handle = runtime.handle();
    let mut combat = handle.subscribe(Topic::Combat);
    let mut session = handle.subscribe(Topic::Session);

    let status = handle.start(Some(player), Some(config.stage)).await?;
    if !status.is_running() {
        anyhow::bail!("session did not start (status: {status:?})");
    }

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut ticks: u64 = 0;
    let mut died = false;

    let reason = loop {
        tokio::select! {
            _ = &mut shutdown => break ExitReason::Interrupted,

            event = combat.recv() => match event {
                Ok(Event::Log(log)) => println!("{log}"),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Combat log lagged");
                }
                Err(RecvError::Closed) => break ExitReason::ChannelClosed,
            },

            event = session.recv() => {
                // A tick's narration is published before its session events.
                print_logs(drain_combat_log(&mut combat));

                match event {
                    Ok(Event::Session(SessionEvent::Update { player })) => {
                        ticks += 1;

                        // Update always follows Dead; the death snapshot is already saved.
                        if died {
                            break ExitReason::PlayerDied;
                        }
                        if config.autosave_ticks.is_some_and(|every| ticks % every == 0) {
                            save(&repo, &player)?;
                        }
                        if config.max_ticks.is_some_and(|max| ticks >= max) {
                            break ExitReason::TickLimit;
                        }
                    }
                    Ok(Event::Session(SessionEvent::Dead { player, message })) => {
                        println!("{message}");
                        save(&repo, &player)?;
                        died = true;
                    }
                    Ok(Event::Session(event)) => tracing::debug!(?event, "Session event"),
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Session events lagged");
                    }
                    Err(RecvError::Closed) => break ExitReason::ChannelClosed,
                }
            }
        }
    };

    print_logs(drain_combat_log(&mut combat));
    tracing::info!(?reason, ticks, "Host loop finished");

    handle.stop().await?;
    let snapshot = handle.query_state().await?;
    if let Some(player) = snapshot.player {
        save(&repo, &player)?;
        tracing::info!(
            player = %player.id,
            level = player.level,
            exp = player.exp,
            gold = player.gold,
            "Final snapshot saved"
        );
    }

    drop(handle);
    runtime.shutdown().await?;
    Ok(())
}

/// Take every combat line already queued without waiting for more.
fn drain_combat_log(combat: &mut broadcast::Receiver<Event>) -> Vec<CombatLog> {
    let mut logs = Vec::new();
    loop {
        match combat.try_recv() {
            Ok(Event::Log(log)) => logs.push(log),
            Ok(_) => {}
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Combat log lagged");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => return logs,
        }
    }
}

fn print_logs(logs: Vec<CombatLog>) {
    for log in logs {
        println!("{log}");
    }
}

fn save(repo: &impl PlayerRepository, player: &PlayerState) -> Result<()> {
    repo.save(player)
        .with_context(|| format!("saving player {}", player.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use idle_runtime::EventBus;

    #[test]
    fn drain_returns_queued_lines_in_order() {
        let bus = EventBus::with_capacity(8);
        let mut combat = bus.subscribe(Topic::Combat);

        bus.publish(Event::Log(CombatLog::MonsterHit {
            damage: 9,
            critical: true,
        }));
        bus.publish(Event::Log(CombatLog::MonsterRemainingHp { hp: 0 }));

        assert_eq!(
            drain_combat_log(&mut combat),
            vec![
                CombatLog::MonsterHit {
                    damage: 9,
                    critical: true
                },
                CombatLog::MonsterRemainingHp { hp: 0 },
            ]
        );
        assert!(drain_combat_log(&mut combat).is_empty());
    }

    #[test]
    fn drain_skips_past_lagged_lines() {
        let bus = EventBus::with_capacity(2);
        let mut combat = bus.subscribe(Topic::Combat);

        bus.publish(Event::Log(CombatLog::PlayerEvaded));
        bus.publish(Event::Log(CombatLog::MonsterEvaded));
        bus.publish(Event::Log(CombatLog::LevelUp { level: 2 }));

        assert_eq!(
            drain_combat_log(&mut combat),
            vec![CombatLog::MonsterEvaded, CombatLog::LevelUp { level: 2 }]
        );
    }
}
