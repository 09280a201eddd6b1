//! Post-exchange progression.
//!
//! After every exchange the session settles the outcome in a fixed order:
//!
//! 1. monster defeat: reward and respawn at the same stage
//! 2. level-ups paid for by the accumulated exp
//! 3. at most one automatic potion
//! 4. death penalty
//!
//! Each step only looks at state, so running the whole pipeline twice on an
//! unchanged snapshot does nothing the second time.

pub mod death;
pub mod level;
pub mod potion;
pub mod reward;

pub use death::{DEATH_MESSAGE, apply_death_penalty};
pub use level::{apply_level_ups, exp_to_next_level};
pub use potion::{select_potion, use_potion};
pub use reward::{Reward, settle_defeat};

use crate::combat::CombatLog;
use crate::monster::MonsterState;
use crate::state::PlayerState;
use crate::stats::EffectiveStats;

/// Result of one progression pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressionReport {
    pub logs: Vec<CombatLog>,
    pub monster_defeated: bool,
    pub player_died: bool,
}

/// Run all progression steps for one tick.
pub fn settle(
    player: &mut PlayerState,
    monster: &mut MonsterState,
    stats: &EffectiveStats,
) -> ProgressionReport {
    let mut report = ProgressionReport::default();

    if let Some(log) = settle_defeat(player, monster, stats) {
        report.monster_defeated = true;
        report.logs.push(log);
    }

    report.logs.extend(apply_level_ups(player));

    if let Some(log) = use_potion(player) {
        report.logs.push(log);
    }

    report.player_died = apply_death_penalty(player);

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monster::Stage;

    #[test]
    fn kill_reward_can_trigger_level_up_in_same_pass() {
        let stats = EffectiveStats::default();
        let mut player = PlayerState::new_character("p");
        player.exp = 95;
        player.hp = 60;
        let mut monster = MonsterState::spawn(Stage::FIRST, &stats);
        monster.hp = 0;

        let report = settle(&mut player, &mut monster, &stats);

        assert_eq!(
            report.logs,
            vec![
                CombatLog::MonsterDefeated { gold: 20, exp: 10 },
                CombatLog::LevelUp { level: 2 },
            ]
        );
        assert!(report.monster_defeated);
        assert!(!report.player_died);
        assert_eq!(player.exp, 5);
        // level-up refilled hp, so no potion was needed
        assert_eq!(player.hp, player.max_hp);
        assert_eq!(player.potions.total(), 4);
        assert_eq!(monster.hp, monster.max_hp);
    }

    #[test]
    fn second_pass_on_settled_state_is_a_no_op() {
        let stats = EffectiveStats::default();
        let mut player = PlayerState::new_character("p");
        player.exp = 250;
        let mut monster = MonsterState::spawn(Stage::FIRST, &stats);

        let first = settle(&mut player, &mut monster, &stats);
        assert_eq!(first.logs, vec![CombatLog::LevelUp { level: 2 }]);

        let snapshot = (player.clone(), monster.clone());
        let second = settle(&mut player, &mut monster, &stats);

        assert!(second.logs.is_empty());
        assert_eq!((player, monster), snapshot);
    }

    #[test]
    fn death_skips_potion_and_applies_penalty() {
        let stats = EffectiveStats::default();
        let mut player = PlayerState::new_character("p");
        player.exp = 50;
        player.hp = 0;
        let mut monster = MonsterState::spawn(Stage::FIRST, &stats);

        let report = settle(&mut player, &mut monster, &stats);

        assert!(report.player_died);
        assert!(report.logs.is_empty());
        assert_eq!(player.exp, 35);
        assert_eq!(player.hp, 100);
        assert_eq!(player.potions.total(), 4);
    }
}
