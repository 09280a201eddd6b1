//! Host-owned player snapshot.
//!
//! The host loads a [`PlayerState`] from its store and hands it to a battle
//! session, which mutates it in place tick after tick. The simulation never
//! persists it; the host saves whatever snapshot the session reports.

use crate::config::StatResolution;
use crate::error::StateError;
use crate::state::potion::PotionInventory;
use crate::stats::{Attribute, BaseStats, EffectiveStats, EquipmentBonus, Loadout};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(rename_all = "camelCase", from = "record::PlayerRecord")
)]
pub struct PlayerState {
    /// Opaque identifier, never interpreted by the simulation.
    pub id: String,
    pub level: u32,
    pub exp: u64,
    pub gold: u64,
    pub hp: u32,
    pub max_hp: u32,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub base: BaseStats,
    /// One bonus per equipped item, in equip order.
    pub equipment: Vec<EquipmentBonus>,
    pub potions: PotionInventory,
    /// Unallocated attribute points earned by leveling.
    pub stat_points: u32,
    /// Equipment-resolved totals computed by the host, if it supplied them.
    ///
    /// Under [`StatResolution::Equipment`] a supplied total takes the place of
    /// the value resolved from `base` and `equipment`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub total_str: Option<u32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub total_dex: Option<u32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub total_con: Option<u32>,
}

impl PlayerState {
    pub const STARTING_HP: u32 = 100;
    pub const STARTING_SMALL_POTIONS: u32 = 3;
    pub const STARTING_MEDIUM_POTIONS: u32 = 1;

    /// A freshly created character: level 1, full 100 hp, no attributes,
    /// three small potions and one medium potion.
    pub fn new_character(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            level: 1,
            exp: 0,
            gold: 0,
            hp: Self::STARTING_HP,
            max_hp: Self::STARTING_HP,
            base: BaseStats::default(),
            equipment: Vec::new(),
            potions: PotionInventory::new(
                Self::STARTING_SMALL_POTIONS,
                Self::STARTING_MEDIUM_POTIONS,
                0,
                0,
                0,
            ),
            stat_points: 0,
            total_str: None,
            total_dex: None,
            total_con: None,
        }
    }

    /// Replace the equipped bonus list (builder pattern).
    pub fn with_equipment(mut self, equipment: Vec<EquipmentBonus>) -> Self {
        self.equipment = equipment;
        self
    }

    /// Attach host-resolved totals (builder pattern).
    pub fn with_totals(mut self, totals: EffectiveStats) -> Self {
        self.total_str = Some(totals.str);
        self.total_dex = Some(totals.dex);
        self.total_con = Some(totals.con);
        self
    }

    /// Replace the equipped bonus list with the loadout's, in slot order.
    pub fn equip_loadout(&mut self, loadout: &Loadout) {
        self.equipment = loadout.bonuses();
    }

    /// Check the invariants the combat arithmetic relies on.
    pub fn validate(&self) -> Result<(), StateError> {
        if self.level == 0 {
            return Err(StateError::ZeroLevel);
        }
        if self.max_hp == 0 {
            return Err(StateError::ZeroMaxHp);
        }
        if self.hp > self.max_hp {
            return Err(StateError::HpExceedsMax {
                hp: self.hp,
                max_hp: self.max_hp,
            });
        }
        Ok(())
    }

    /// Combat attributes under the given resolution mode.
    ///
    /// Recomputed on every call. Host-supplied totals win over the resolved
    /// value attribute by attribute; `Raw` ignores them along with equipment.
    pub fn effective_stats(&self, resolution: StatResolution) -> EffectiveStats {
        match resolution {
            StatResolution::Equipment => {
                let resolved = EffectiveStats::compute(&self.base, &self.equipment);
                EffectiveStats {
                    str: self.total_str.unwrap_or(resolved.str),
                    dex: self.total_dex.unwrap_or(resolved.dex),
                    con: self.total_con.unwrap_or(resolved.con),
                }
            }
            StatResolution::Raw => EffectiveStats::from_base(&self.base),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn missing_hp(&self) -> u32 {
        self.max_hp.saturating_sub(self.hp)
    }

    /// Subtract `amount` from hp, clamped at 0. Returns hp actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Add `amount` to hp, clamped at max hp. Returns hp actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.missing_hp());
        self.hp += restored;
        restored
    }

    pub fn restore_full_hp(&mut self) {
        self.hp = self.max_hp;
    }

    /// Move `points` unspent stat points into `attribute`.
    ///
    /// A host-supplied total for the attribute rises by the same amount.
    pub fn allocate_stat(&mut self, attribute: Attribute, points: u32) -> Result<(), StateError> {
        if points > self.stat_points {
            return Err(StateError::NotEnoughStatPoints {
                attribute,
                requested: points,
                available: self.stat_points,
            });
        }

        self.stat_points -= points;
        let value = self.base.get_mut(attribute);
        *value = value.saturating_add(points);

        let total = match attribute {
            Attribute::Str => &mut self.total_str,
            Attribute::Dex => &mut self.total_dex,
            Attribute::Con => &mut self.total_con,
        };
        if let Some(total) = total {
            *total = total.saturating_add(points);
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod record {
    //! Accepted input shapes for a player snapshot.
    //!
    //! Besides the serialized form of [`PlayerState`], this reads the stored
    //! `users` row: `uid` for the id and one `potion_*` column per tier.

    use serde::Deserialize;

    use super::PlayerState;
    use crate::state::potion::PotionInventory;
    use crate::stats::{BaseStats, EquipmentBonus};

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct PlayerRecord {
        #[serde(alias = "uid")]
        id: String,
        level: u32,
        exp: u64,
        gold: u64,
        hp: u32,
        max_hp: u32,
        #[serde(flatten)]
        base: BaseStats,
        #[serde(default)]
        equipment: Vec<EquipmentBonus>,
        #[serde(default)]
        potions: Option<PotionInventory>,
        #[serde(flatten)]
        potion_columns: PotionColumns,
        #[serde(default)]
        stat_points: u32,
        #[serde(default)]
        total_str: Option<u32>,
        #[serde(default)]
        total_dex: Option<u32>,
        #[serde(default)]
        total_con: Option<u32>,
    }

    #[derive(Default, Deserialize)]
    #[serde(default)]
    struct PotionColumns {
        potion_small: u32,
        potion_medium: u32,
        potion_large: u32,
        potion_extralarge: u32,
        potion_quarter: u32,
    }

    impl From<PotionColumns> for PotionInventory {
        fn from(columns: PotionColumns) -> Self {
            PotionInventory::new(
                columns.potion_small,
                columns.potion_medium,
                columns.potion_large,
                columns.potion_extralarge,
                columns.potion_quarter,
            )
        }
    }

    impl From<PlayerRecord> for PlayerState {
        fn from(record: PlayerRecord) -> Self {
            // A nested stash wins over stored columns.
            let potions = record
                .potions
                .unwrap_or_else(|| record.potion_columns.into());

            PlayerState {
                id: record.id,
                level: record.level,
                exp: record.exp,
                gold: record.gold,
                hp: record.hp,
                max_hp: record.max_hp,
                base: record.base,
                equipment: record.equipment,
                potions,
                stat_points: record.stat_points,
                total_str: record.total_str,
                total_dex: record.total_dex,
                total_con: record.total_con,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_character_matches_starting_kit() {
        let player = PlayerState::new_character("uid-1");

        assert_eq!(player.level, 1);
        assert_eq!((player.hp, player.max_hp), (100, 100));
        assert_eq!(player.base, BaseStats::new(0, 0, 0));
        assert_eq!(player.potions.small, 3);
        assert_eq!(player.potions.medium, 1);
        assert_eq!(player.potions.total(), 4);
        assert!(player.validate().is_ok());
    }

    #[test]
    fn validate_rejects_broken_snapshots() {
        let mut player = PlayerState::new_character("p");
        player.hp = 101;
        assert_eq!(
            player.validate(),
            Err(StateError::HpExceedsMax {
                hp: 101,
                max_hp: 100
            })
        );

        player.hp = 0;
        player.max_hp = 0;
        assert_eq!(player.validate(), Err(StateError::ZeroMaxHp));

        player.max_hp = 10;
        player.level = 0;
        assert_eq!(player.validate(), Err(StateError::ZeroLevel));
    }

    #[test]
    fn damage_and_heal_are_clamped() {
        let mut player = PlayerState::new_character("p");

        assert_eq!(player.take_damage(30), 30);
        assert_eq!(player.heal(50), 30);
        assert_eq!(player.hp, 100);
        assert_eq!(player.take_damage(500), 100);
        assert_eq!(player.hp, 0);
        assert!(!player.is_alive());
    }

    #[test]
    fn resolution_mode_selects_stat_source() {
        let mut player = PlayerState::new_character("p")
            .with_equipment(vec![EquipmentBonus::flat(5, 0, 0)]);
        player.base.str = 10;

        assert_eq!(player.effective_stats(StatResolution::Equipment).str, 15);
        assert_eq!(player.effective_stats(StatResolution::Raw).str, 10);
    }

    #[test]
    fn host_totals_replace_resolved_stats() {
        let mut player = PlayerState::new_character("p")
            .with_equipment(vec![EquipmentBonus::flat(5, 5, 5)]);
        player.base = BaseStats::new(10, 10, 10);
        player.total_str = Some(50);
        player.total_dex = Some(40);

        let stats = player.effective_stats(StatResolution::Equipment);
        assert_eq!((stats.str, stats.dex, stats.con), (50, 40, 15));

        let raw = player.effective_stats(StatResolution::Raw);
        assert_eq!((raw.str, raw.dex, raw.con), (10, 10, 10));
    }

    #[test]
    fn allocating_raises_host_total() {
        let mut player = PlayerState::new_character("p").with_totals(EffectiveStats {
            str: 20,
            dex: 8,
            con: 4,
        });
        player.stat_points = 3;

        player.allocate_stat(Attribute::Str, 3).unwrap();

        assert_eq!(player.base.str, 3);
        assert_eq!(player.total_str, Some(23));
        assert_eq!(player.total_dex, Some(8));
    }

    #[test]
    fn loadout_replaces_equipment_bonuses() {
        use crate::stats::{EquipmentSlot, EquippedItem};

        let mut loadout = Loadout::new();
        loadout.equip(
            EquipmentSlot::Weapon,
            EquippedItem::new(1, "Rusty Sword", EquipmentBonus::flat(4, 0, 0)),
        );
        loadout.equip(
            EquipmentSlot::Boots,
            EquippedItem::new(2, "Light Boots", EquipmentBonus::flat(0, 2, 0)),
        );

        let mut player = PlayerState::new_character("p")
            .with_equipment(vec![EquipmentBonus::flat(100, 0, 0)]);
        player.equip_loadout(&loadout);

        let stats = player.effective_stats(StatResolution::Equipment);
        assert_eq!(player.equipment.len(), 2);
        assert_eq!((stats.str, stats.dex), (4, 2));
    }

    #[test]
    fn allocate_stat_spends_points() {
        let mut player = PlayerState::new_character("p");
        player.stat_points = 3;

        player.allocate_stat(Attribute::Dex, 2).unwrap();
        assert_eq!(player.base.dex, 2);
        assert_eq!(player.stat_points, 1);

        let err = player.allocate_stat(Attribute::Str, 2).unwrap_err();
        assert_eq!(
            err,
            StateError::NotEnoughStatPoints {
                attribute: Attribute::Str,
                requested: 2,
                available: 1
            }
        );
        assert_eq!(player.base.str, 0);
    }
}
