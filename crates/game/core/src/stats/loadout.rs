//! Equipped item set, one item per slot.
//!
//! Equipping an item replaces whatever already occupies its slot. The loadout
//! resolves to the ordered bonus list carried on [`crate::PlayerState`].

use std::collections::BTreeMap;

use strum::Display;

use super::bonus::EquipmentBonus;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Helmet,
    Gloves,
    Boots,
    Accessory,
}

/// An item occupying a slot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquippedItem {
    pub item_id: u64,
    pub name: String,
    pub bonus: EquipmentBonus,
}

impl EquippedItem {
    pub fn new(item_id: u64, name: impl Into<String>, bonus: EquipmentBonus) -> Self {
        Self {
            item_id,
            name: name.into(),
            bonus,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loadout {
    slots: BTreeMap<EquipmentSlot, EquippedItem>,
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `item` in `slot`, returning the item it displaced.
    pub fn equip(&mut self, slot: EquipmentSlot, item: EquippedItem) -> Option<EquippedItem> {
        self.slots.insert(slot, item)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<EquippedItem> {
        self.slots.remove(&slot)
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&EquippedItem> {
        self.slots.get(&slot)
    }

    /// Bonus list in slot order, ready to hand to the player.
    pub fn bonuses(&self) -> Vec<EquipmentBonus> {
        self.slots.values().map(|item| item.bonus).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equipping_same_slot_replaces_previous_item() {
        let mut loadout = Loadout::new();
        let sword = EquippedItem::new(1, "Rusty Sword", EquipmentBonus::flat(2, 0, 0));
        let axe = EquippedItem::new(2, "Axe", EquipmentBonus::flat(5, 0, 0));

        assert!(loadout.equip(EquipmentSlot::Weapon, sword.clone()).is_none());
        assert_eq!(loadout.equip(EquipmentSlot::Weapon, axe), Some(sword));
        assert_eq!(loadout.len(), 1);
        assert_eq!(loadout.bonuses(), vec![EquipmentBonus::flat(5, 0, 0)]);
    }

    #[test]
    fn bonuses_follow_slot_order() {
        let mut loadout = Loadout::new();
        loadout.equip(
            EquipmentSlot::Boots,
            EquippedItem::new(7, "Boots", EquipmentBonus::flat(0, 1, 0)),
        );
        loadout.equip(
            EquipmentSlot::Weapon,
            EquippedItem::new(3, "Dagger", EquipmentBonus::flat(1, 0, 0)),
        );

        assert_eq!(
            loadout.bonuses(),
            vec![EquipmentBonus::flat(1, 0, 0), EquipmentBonus::flat(0, 1, 0)]
        );

        assert!(loadout.unequip(EquipmentSlot::Weapon).is_some());
        assert!(loadout.unequip(EquipmentSlot::Weapon).is_none());
        assert!(loadout.get(EquipmentSlot::Weapon).is_none());
        assert_eq!(loadout.get(EquipmentSlot::Boots).map(|item| item.item_id), Some(7));
        assert_eq!(loadout.len(), 1);

        loadout.unequip(EquipmentSlot::Boots);
        assert!(loadout.is_empty());
    }
}
