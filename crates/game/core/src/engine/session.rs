use crate::combat::resolve_exchange;
use crate::config::GameConfig;
use crate::engine::{TickOutcome, TickReport};
use crate::env::RandomSource;
use crate::error::StateError;
use crate::monster::{MonsterState, Stage};
use crate::progression::{self, DEATH_MESSAGE};
use crate::state::PlayerState;
use crate::stats::EffectiveStats;

/// One player fighting an endless stream of monsters at a fixed stage.
#[derive(Clone, Debug, PartialEq)]
pub struct BattleSession {
    player: PlayerState,
    monster: MonsterState,
    config: GameConfig,
    ticks: u64,
}

impl BattleSession {
    /// Validate the snapshot and spawn the first monster for `stage`.
    pub fn new(player: PlayerState, stage: u32, config: GameConfig) -> Result<Self, StateError> {
        let stage = Stage::new(stage)?;
        player.validate()?;

        let stats = player.effective_stats(config.stat_resolution);
        let monster = MonsterState::spawn(stage, &stats);

        Ok(Self {
            player,
            monster,
            config,
            ticks: 0,
        })
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn monster(&self) -> &MonsterState {
        &self.monster
    }

    pub fn stage(&self) -> Stage {
        self.monster.stage
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn into_player(self) -> PlayerState {
        self.player
    }

    fn effective_stats(&self) -> EffectiveStats {
        self.player.effective_stats(self.config.stat_resolution)
    }

    /// Run one exchange and settle its consequences.
    ///
    /// Stats are re-resolved at the start of every tick so equipment or
    /// allocation changes pushed through [`Self::update_player`] apply at once.
    pub fn tick(&mut self, rng: &mut impl RandomSource) -> TickReport {
        self.ticks = self.ticks.saturating_add(1);
        let stats = self.effective_stats();

        let exchange = resolve_exchange(&mut self.player, &stats, &mut self.monster, rng);
        let progress = progression::settle(&mut self.player, &mut self.monster, &stats);

        let mut logs = exchange.logs;
        logs.extend(progress.logs);

        let outcome = if progress.player_died {
            TickOutcome::PlayerDead {
                message: DEATH_MESSAGE.to_string(),
            }
        } else {
            TickOutcome::Continue
        };

        TickReport {
            tick: self.ticks,
            logs,
            outcome,
        }
    }

    /// Swap in a new player snapshot.
    ///
    /// The current monster keeps its hp; only its evasion rates, which depend
    /// on the player's stats, are recomputed.
    pub fn update_player(&mut self, player: PlayerState) -> Result<(), StateError> {
        player.validate()?;
        self.player = player;

        let stats = self.effective_stats();
        self.monster.refresh_evasion(&stats);
        Ok(())
    }

    /// Move to another stage, replacing the current monster.
    pub fn update_stage(&mut self, stage: u32) -> Result<(), StateError> {
        let stage = Stage::new(stage)?;
        let stats = self.effective_stats();
        self.monster = MonsterState::spawn(stage, &stats);
        Ok(())
    }
}
