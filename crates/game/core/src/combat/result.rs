//! One full attack exchange between the player and the monster.

use crate::combat::damage::{crit_multiplier, finalize_damage, mitigation, player_attack};
use crate::combat::hit::{check_crit, check_evasion, player_crit_chance, player_crit_stat};
use crate::combat::log::CombatLog;
use crate::env::RandomSource;
use crate::monster::MonsterState;
use crate::state::PlayerState;
use crate::stats::EffectiveStats;

/// What a single exchange did to both sides.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExchangeOutcome {
    /// Narration in the order it happened.
    pub logs: Vec<CombatLog>,
    /// Damage rolled against the player (0 if evaded).
    pub player_damage_taken: u32,
    /// Damage rolled against the monster (0 if evaded).
    pub monster_damage_taken: u32,
}

/// Resolve one exchange: the monster attacks first, then the player.
///
/// Draw order is fixed so a scripted source replays exactly:
/// 1. player evasion, then (on a hit) monster crit and damage variance
/// 2. monster evasion, then (on a hit) player crit and damage variance
///
/// Both hp values are clamped at 0. A status line with the monster's
/// remaining hp always closes the exchange.
pub fn resolve_exchange(
    player: &mut PlayerState,
    stats: &EffectiveStats,
    monster: &mut MonsterState,
    rng: &mut impl RandomSource,
) -> ExchangeOutcome {
    let mut outcome = ExchangeOutcome::default();

    // Monster → player
    if check_evasion(monster.player_evasion_rate, rng) {
        outcome.logs.push(CombatLog::PlayerEvaded);
    } else {
        let critical = check_crit(f64::from(monster.crit), rng);
        let reduction = mitigation(f64::from(stats.con), player.level);

        let mut raw = f64::from(monster.attack);
        if critical {
            raw = (raw * crit_multiplier(f64::from(monster.crit))).floor();
        }

        let damage = finalize_damage(raw, reduction, rng);
        player.take_damage(damage);
        outcome.player_damage_taken = damage;
        outcome.logs.push(CombatLog::PlayerHit { damage, critical });
    }

    // Player → monster
    if check_evasion(monster.monster_evasion_rate, rng) {
        outcome.logs.push(CombatLog::MonsterEvaded);
    } else {
        let attack = player_attack(player.level, stats.str);
        let crit_stat = player_crit_stat(stats.dex);
        let critical = check_crit(player_crit_chance(crit_stat), rng);
        let reduction = mitigation(monster.defense, player.level);

        let raw = if critical {
            attack * crit_multiplier(crit_stat)
        } else {
            attack
        };

        let damage = finalize_damage(raw, reduction, rng);
        monster.take_damage(damage);
        outcome.monster_damage_taken = damage;
        outcome.logs.push(CombatLog::MonsterHit { damage, critical });
    }

    outcome
        .logs
        .push(CombatLog::MonsterRemainingHp { hp: monster.hp });

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatResolution;
    use crate::env::ScriptedRandom;
    use crate::monster::Stage;
    use crate::stats::BaseStats;

    fn bare_player() -> PlayerState {
        PlayerState::new_character("p")
    }

    #[test]
    fn stage_one_exchange_with_midpoint_rolls() {
        let mut player = bare_player();
        let stats = player.effective_stats(StatResolution::Equipment);
        let mut monster = MonsterState::spawn(Stage::FIRST, &stats);
        let mut rng = ScriptedRandom::constant(0.5);

        let outcome = resolve_exchange(&mut player, &stats, &mut monster, &mut rng);

        // Monster: attack 1, no crit (50 ≥ 1), no mitigation → 1
        // Player: attack 1 × 0.656 → floor 0 → clamped to 1
        assert_eq!(outcome.player_damage_taken, 1);
        assert_eq!(outcome.monster_damage_taken, 1);
        assert_eq!(player.hp, 99);
        assert_eq!(monster.hp, 1);
        assert_eq!(
            outcome.logs,
            vec![
                CombatLog::PlayerHit {
                    damage: 1,
                    critical: false
                },
                CombatLog::MonsterHit {
                    damage: 1,
                    critical: false
                },
                CombatLog::MonsterRemainingHp { hp: 1 },
            ]
        );
        // evasion, crit, variance on each side
        assert_eq!(rng.draws(), 6);
    }

    #[test]
    fn evaded_attacks_skip_crit_and_variance_draws() {
        let mut player = bare_player();
        player.base = BaseStats::new(0, 10, 0);
        let stats = player.effective_stats(StatResolution::Raw);
        let mut monster = MonsterState::spawn(Stage::new(5).unwrap(), &stats);

        // player evasion = 10 / (10 + 35) ≈ 0.222, monster evasion = 4 / 55 ≈ 0.073
        let mut rng = ScriptedRandom::new([0.1, 0.05]);

        let outcome = resolve_exchange(&mut player, &stats, &mut monster, &mut rng);

        assert_eq!(
            outcome.logs,
            vec![
                CombatLog::PlayerEvaded,
                CombatLog::MonsterEvaded,
                CombatLog::MonsterRemainingHp { hp: monster.max_hp },
            ]
        );
        assert_eq!(player.hp, 100);
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn monster_crit_floors_before_mitigation() {
        let mut player = bare_player();
        let stats = player.effective_stats(StatResolution::Raw);
        let mut monster = MonsterState::spawn(Stage::new(20).unwrap(), &stats);
        // attack = floor((5 + 1) × 20) = 120, crit 20%
        assert_eq!(monster.attack, 120);

        // evasion miss, crit hit (0.1 × 100 < 20), variance ±0, then player side
        let mut rng = ScriptedRandom::new([0.9, 0.1, 0.5]).with_fallback(0.5);
        let outcome = resolve_exchange(&mut player, &stats, &mut monster, &mut rng);

        // floor(120 × (20/2000 + 1.1)) = floor(133.2) = 133
        assert_eq!(outcome.player_damage_taken, 133);
        assert_eq!(player.hp, 0);
        assert!(matches!(
            outcome.logs[0],
            CombatLog::PlayerHit {
                damage: 133,
                critical: true
            }
        ));
    }

    #[test]
    fn player_crit_uses_dex_scaled_multiplier() {
        let mut player = bare_player();
        player.base = BaseStats::new(10, 30, 0);
        let stats = player.effective_stats(StatResolution::Raw);
        let mut monster = MonsterState::spawn(Stage::FIRST, &stats);
        monster.hp = 1_000;

        // Monster side: evade (player evasion = 30 / 37)
        // Player side: hit, crit (0.2 × 100 < 50), variance ±0
        let mut rng = ScriptedRandom::new([0.0, 0.5, 0.2, 0.5]);
        let outcome = resolve_exchange(&mut player, &stats, &mut monster, &mut rng);

        // attack = 1 + 1.5 × 10 × 1.5 = 23.5; × (150/2000 + 1.1) = 27.6125
        // × (1 − 1.05 / 3.05) = 18.106… → 18
        assert_eq!(outcome.monster_damage_taken, 18);
        assert_eq!(monster.hp, 982);
        assert!(matches!(
            outcome.logs[1],
            CombatLog::MonsterHit {
                damage: 18,
                critical: true
            }
        ));
    }

    #[test]
    fn monster_hp_never_goes_negative() {
        let mut player = bare_player();
        player.base = BaseStats::new(500, 0, 0);
        let stats = player.effective_stats(StatResolution::Raw);
        let mut monster = MonsterState::spawn(Stage::FIRST, &stats);

        let outcome = resolve_exchange(
            &mut player,
            &stats,
            &mut monster,
            &mut ScriptedRandom::constant(0.5),
        );

        assert!(outcome.monster_damage_taken > monster.max_hp);
        assert_eq!(monster.hp, 0);
        assert_eq!(
            outcome.logs.last(),
            Some(&CombatLog::MonsterRemainingHp { hp: 0 })
        );
    }
}
