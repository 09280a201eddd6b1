//! Stage-scaled monster generation.
//!
//! A monster is a pure function of the stage, plus the two evasion rates that
//! also depend on the player's current dex/str. Everything is derived once at
//! spawn time and held fixed until the monster dies or the stage changes.
//!
//! # Formulas
//!
//! ```text
//! hp                   = floor((stage/7 + 1) × stage × 2)
//! crit                 = stage                      (percent)
//! hit_rating           = stage × 7
//! defense              = (stage/20 + 1) × stage     (unfloored)
//! attack               = floor((stage/4 + 1) × stage)
//! reward_unit          = stage
//! player_evasion_rate  = dex / (dex + hit_rating)
//! monster_evasion      = stage − 1
//! monster_evasion_rate = monster_evasion / (monster_evasion + dex×5 + str×5 + 1)
//! ```

use crate::error::StateError;
use crate::stats::EffectiveStats;

/// Difficulty index, always ≥ 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct Stage(u32);

impl Stage {
    pub const FIRST: Stage = Stage(1);

    pub fn new(stage: u32) -> Result<Self, StateError> {
        if stage == 0 {
            return Err(StateError::ZeroStage);
        }
        Ok(Self(stage))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl TryFrom<u32> for Stage {
    type Error = StateError;

    fn try_from(stage: u32) -> Result<Self, Self::Error> {
        Self::new(stage)
    }
}

impl From<Stage> for u32 {
    fn from(stage: Stage) -> Self {
        stage.0
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The live monster of a battle session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MonsterState {
    pub stage: Stage,
    pub hp: u32,
    pub max_hp: u32,
    /// Percent chance to land a critical hit.
    pub crit: u32,
    pub hit_rating: u32,
    pub defense: f64,
    pub attack: u32,
    pub reward_unit: u32,
    /// Probability that the player evades this monster's attack.
    pub player_evasion_rate: f64,
    pub monster_evasion: u32,
    /// Probability that this monster evades the player's attack.
    pub monster_evasion_rate: f64,
}

impl MonsterState {
    /// Spawn a fresh monster for `stage` against a player with `stats`.
    pub fn spawn(stage: Stage, stats: &EffectiveStats) -> Self {
        let s = stage.as_f64();
        let hp = ((s / 7.0 + 1.0) * s * 2.0).floor() as u32;

        let mut monster = Self {
            stage,
            hp,
            max_hp: hp,
            crit: stage.get(),
            hit_rating: stage.get().saturating_mul(7),
            defense: (s / 20.0 + 1.0) * s,
            attack: ((s / 4.0 + 1.0) * s).floor() as u32,
            reward_unit: stage.get(),
            player_evasion_rate: 0.0,
            monster_evasion: stage.get() - 1,
            monster_evasion_rate: 0.0,
        };
        monster.refresh_evasion(stats);
        monster
    }

    /// Re-derive both evasion rates after the player's stats changed.
    ///
    /// Hp and every other field are left untouched.
    pub fn refresh_evasion(&mut self, stats: &EffectiveStats) {
        let dex = f64::from(stats.dex);
        let str = f64::from(stats.str);
        let hit = f64::from(self.hit_rating);
        let evasion = f64::from(self.monster_evasion);

        // hit_rating ≥ 7 for stage ≥ 1, so the denominator is never zero
        self.player_evasion_rate = dex / (dex + hit);
        self.monster_evasion_rate = evasion / (evasion + dex * 5.0 + str * 5.0 + 1.0);
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Subtract `amount` from hp, clamped at 0. Returns hp actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_stats() -> EffectiveStats {
        EffectiveStats::default()
    }

    #[test]
    fn stage_zero_is_rejected() {
        assert_eq!(Stage::new(0), Err(StateError::ZeroStage));
        assert_eq!(Stage::new(3).map(Stage::get), Ok(3));
    }

    #[test]
    fn stage_one_monster() {
        let monster = MonsterState::spawn(Stage::FIRST, &zero_stats());

        assert_eq!(monster.hp, 2);
        assert_eq!(monster.crit, 1);
        assert_eq!(monster.hit_rating, 7);
        assert_eq!(monster.attack, 1);
        assert_eq!(monster.defense, 1.05);
        assert_eq!(monster.reward_unit, 1);
        assert_eq!(monster.monster_evasion, 0);
        assert_eq!(monster.player_evasion_rate, 0.0);
        assert_eq!(monster.monster_evasion_rate, 0.0);
    }

    #[test]
    fn derived_fields_match_formulas_across_stages() {
        for raw in 1..=200u32 {
            let stage = Stage::new(raw).unwrap();
            let monster = MonsterState::spawn(stage, &zero_stats());
            let s = f64::from(raw);

            assert_eq!(monster.hp, ((s / 7.0 + 1.0) * s * 2.0).floor() as u32);
            assert_eq!(monster.max_hp, monster.hp);
            assert_eq!(monster.crit, raw);
            assert_eq!(monster.hit_rating, raw * 7);
            assert_eq!(monster.defense, (s / 20.0 + 1.0) * s);
            assert_eq!(monster.attack, ((s / 4.0 + 1.0) * s).floor() as u32);
            assert_eq!(monster.reward_unit, raw);
            assert_eq!(monster.monster_evasion, raw - 1);
            assert!(monster.hp > 0);
        }
    }

    #[test]
    fn stage_ten_values() {
        let monster = MonsterState::spawn(Stage::new(10).unwrap(), &zero_stats());

        // floor((10/7 + 1) × 20) = floor(48.57) = 48
        assert_eq!(monster.hp, 48);
        // floor((2.5 + 1) × 10) = 35
        assert_eq!(monster.attack, 35);
        // (0.5 + 1) × 10 = 15
        assert_eq!(monster.defense, 15.0);
        // 9 / (9 + 0 + 0 + 1)
        assert_eq!(monster.monster_evasion_rate, 0.9);
    }

    #[test]
    fn evasion_rates_depend_on_player_stats() {
        let stats = EffectiveStats {
            str: 2,
            dex: 7,
            con: 0,
        };
        let mut monster = MonsterState::spawn(Stage::new(2).unwrap(), &stats);

        // 7 / (7 + 14)
        assert!((monster.player_evasion_rate - 1.0 / 3.0).abs() < 1e-12);
        // 1 / (1 + 35 + 10 + 1)
        assert!((monster.monster_evasion_rate - 1.0 / 47.0).abs() < 1e-12);

        monster.hp = 1;
        monster.refresh_evasion(&zero_stats());
        assert_eq!(monster.player_evasion_rate, 0.0);
        assert_eq!(monster.hp, 1);
    }
}
