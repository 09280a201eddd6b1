//! Monster defeat rewards and respawn.

use crate::combat::CombatLog;
use crate::config::GameConfig;
use crate::monster::MonsterState;
use crate::state::PlayerState;
use crate::stats::EffectiveStats;

/// Gold and experience granted for one kill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reward {
    pub gold: u64,
    pub exp: u64,
}

impl Reward {
    pub fn for_monster(monster: &MonsterState) -> Self {
        let unit = u64::from(monster.reward_unit);
        Self {
            gold: unit * GameConfig::GOLD_PER_REWARD_UNIT,
            exp: unit * GameConfig::EXP_PER_REWARD_UNIT,
        }
    }
}

/// If the monster is dead, pay out its reward and spawn its replacement at
/// the same stage.
///
/// # Returns
///
/// The reward log, or `None` if the monster is still alive.
pub fn settle_defeat(
    player: &mut PlayerState,
    monster: &mut MonsterState,
    stats: &EffectiveStats,
) -> Option<CombatLog> {
    if monster.is_alive() {
        return None;
    }

    let reward = Reward::for_monster(monster);
    player.gold = player.gold.saturating_add(reward.gold);
    player.exp = player.exp.saturating_add(reward.exp);

    *monster = MonsterState::spawn(monster.stage, stats);

    Some(CombatLog::MonsterDefeated {
        gold: reward.gold,
        exp: reward.exp,
    })
}
