//! Stat resolution for combat.
//!
//! - [`core`]: base attributes and [`EffectiveStats`]
//! - [`bonus`]: per-item bonuses and their aggregation
//! - [`loadout`]: one-item-per-slot equipment sets
pub mod bonus;
pub mod core;
pub mod loadout;

pub use bonus::{BonusStack, EquipmentBonus};
pub use self::core::{Attribute, BaseStats, EffectiveStats};
pub use loadout::{EquipmentSlot, EquippedItem, Loadout};
