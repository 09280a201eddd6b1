//! Base attributes and their equipment-resolved totals.
//!
//! Base stats (STR, DEX, CON) are the only combat attributes that are stored.
//! [`EffectiveStats`] is derived from them and the equipped items and is never
//! stored; it is recomputed whenever it is needed.
//!
//! Effective = floor((Base + ΣFlat) × ΠMultiplier)

use strum::Display;

use super::bonus::{BonusStack, EquipmentBonus};

/// The three combat attributes.
/// - **STR** (Strength): player attack power, monster evasion
/// - **DEX** (Dexterity): player evasion, critical chance, monster evasion
/// - **CON** (Constitution): damage mitigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Attribute {
    #[strum(serialize = "str")]
    Str,
    #[strum(serialize = "dex")]
    Dex,
    #[strum(serialize = "con")]
    Con,
}

/// Raw attributes as persisted by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub str: u32,
    pub dex: u32,
    pub con: u32,
}

impl BaseStats {
    pub fn new(str: u32, dex: u32, con: u32) -> Self {
        Self { str, dex, con }
    }

    pub fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Str => self.str,
            Attribute::Dex => self.dex,
            Attribute::Con => self.con,
        }
    }

    pub fn get_mut(&mut self, attribute: Attribute) -> &mut u32 {
        match attribute {
            Attribute::Str => &mut self.str,
            Attribute::Dex => &mut self.dex,
            Attribute::Con => &mut self.con,
        }
    }
}

/// Attributes after equipment bonuses, as used by combat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectiveStats {
    pub str: u32,
    pub dex: u32,
    pub con: u32,
}

impl EffectiveStats {
    /// Resolve totals from base stats and every equipped item's bonus.
    ///
    /// Each attribute is floored independently.
    pub fn compute<'a>(
        base: &BaseStats,
        bonuses: impl IntoIterator<Item = &'a EquipmentBonus> + Clone,
    ) -> Self {
        let resolve = |attribute| {
            BonusStack::collect(attribute, bonuses.clone()).apply(base.get(attribute))
        };

        Self {
            str: resolve(Attribute::Str),
            dex: resolve(Attribute::Dex),
            con: resolve(Attribute::Con),
        }
    }

    /// Compute with no equipment (base stats only).
    pub fn from_base(base: &BaseStats) -> Self {
        Self {
            str: base.str,
            dex: base.dex,
            con: base.con,
        }
    }

    pub fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Str => self.str,
            Attribute::Dex => self.dex,
            Attribute::Con => self.con,
        }
    }
}
