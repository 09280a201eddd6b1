//! Evasion and critical-hit rolls.

use crate::env::RandomSource;

/// Roll against an evasion probability in `[0, 1)`.
///
/// # Returns
///
/// `true` if the attack is evaded.
pub fn check_evasion(evasion_rate: f64, rng: &mut impl RandomSource) -> bool {
    rng.next_unit() < evasion_rate
}

/// Roll against a percent chance (`0..=100`).
///
/// # Returns
///
/// `true` if the roll lands a critical hit.
pub fn check_crit(chance_percent: f64, rng: &mut impl RandomSource) -> bool {
    rng.next_unit() * 100.0 < chance_percent
}

/// Player crit stat: `dex × 5`.
pub fn player_crit_stat(dex: u32) -> f64 {
    f64::from(dex) * 5.0
}

/// Player crit chance in percent.
///
/// # Formula
///
/// ```text
/// crit_chance = crit_stat / (crit_stat + 150) × 100
/// ```
pub fn player_crit_chance(crit_stat: f64) -> f64 {
    crit_stat / (crit_stat + 150.0) * 100.0
}
