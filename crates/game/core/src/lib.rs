//! Deterministic battle rules for the idle dungeon.
//!
//! `idle-core` defines the canonical combat rules (stat resolution, monster
//! scaling, exchange resolution, rewards and potions) and exposes pure APIs
//! that the runtime drives on a timer. All per-tick state mutation flows
//! through [`engine::BattleSession::tick`], and randomness is always injected
//! through [`env::RandomSource`].
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod monster;
pub mod progression;
pub mod state;
pub mod stats;

pub use combat::{CombatLog, ExchangeOutcome, resolve_exchange};
pub use config::{GameConfig, StatResolution};
pub use engine::{BattleSession, TickOutcome, TickReport};
pub use env::{RandomSource, ScriptedRandom, StdRandom};
pub use error::StateError;
pub use monster::{MonsterState, Stage};
pub use state::{PlayerState, PotionInventory, PotionTier};
pub use stats::{Attribute, BaseStats, EffectiveStats, EquipmentBonus, EquipmentSlot, Loadout};
