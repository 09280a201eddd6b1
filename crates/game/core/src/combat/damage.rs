//! Damage calculation.
//!
//! Both directions of an exchange share the same tail:
//!
//! ```text
//! mitigated = floor(raw × mitigation)
//! varied    = floor(mitigated × (1 + U(-0.1, 0.1)))
//! final     = max(varied, 1)
//! ```
//!
//! The variance roll is its own draw for every damage instance.

use crate::config::GameConfig;
use crate::env::RandomSource;

/// Fraction of incoming damage that gets through a defense stat.
///
/// # Formula
///
/// ```text
/// mitigation = 1 − defense / (attacker_level × 2 + defense)
/// ```
pub fn mitigation(defense: f64, level: u32) -> f64 {
    let denominator = f64::from(level) * 2.0 + defense;
    if denominator <= 0.0 {
        return 1.0;
    }
    1.0 - defense / denominator
}

/// Critical multiplier: `crit_stat / 2000 + 1.1`.
pub fn crit_multiplier(crit_stat: f64) -> f64 {
    crit_stat / GameConfig::CRIT_STAT_DIVISOR + GameConfig::CRIT_BASE_MULTIPLIER
}

/// Player attack power before crit and mitigation.
///
/// # Formula
///
/// ```text
/// attack = 1 + (level / 2 + 1) × str × 1.5
/// ```
pub fn player_attack(level: u32, str: u32) -> f64 {
    1.0 + (f64::from(level) / 2.0 + 1.0) * f64::from(str) * 1.5
}

/// Apply the ±10% uniform variance band and floor.
pub fn apply_variance(value: f64, rng: &mut impl RandomSource) -> f64 {
    let swing = rng.next_signed_unit() * GameConfig::DAMAGE_VARIANCE;
    (value * (1.0 + swing)).floor()
}

/// Mitigate, vary and clamp a raw damage value.
///
/// # Returns
///
/// Final damage, never below [`GameConfig::MIN_DAMAGE`].
pub fn finalize_damage(raw: f64, mitigation: f64, rng: &mut impl RandomSource) -> u32 {
    let mitigated = (raw * mitigation).floor();
    let varied = apply_variance(mitigated, rng);
    // `as` saturates and maps NaN to 0
    (varied as u32).max(GameConfig::MIN_DAMAGE)
}
