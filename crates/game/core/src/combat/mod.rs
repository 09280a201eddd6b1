//! Combat resolution system.
//!
//! This module provides pure functions for resolving one tick's exchange
//! between the player and the monster. Randomness comes exclusively from the
//! injected [`crate::env::RandomSource`].
//!
//! # Core Functions
//!
//! - `resolve_exchange`: monster attack, player attack, status line
//! - `check_evasion` / `check_crit`: probability rolls
//! - `mitigation` / `finalize_damage`: defense, variance and the 1-damage floor

pub mod damage;
pub mod hit;
pub mod log;
pub mod result;

pub use damage::{apply_variance, crit_multiplier, finalize_damage, mitigation, player_attack};
pub use hit::{check_crit, check_evasion, player_crit_chance, player_crit_stat};
pub use log::CombatLog;
pub use result::{ExchangeOutcome, resolve_exchange};
