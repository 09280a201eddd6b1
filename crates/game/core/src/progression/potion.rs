//! Automatic potion consumption.

use crate::combat::CombatLog;
use crate::state::{PlayerState, PotionTier};

/// Tier that would be used right now, if any.
///
/// Tiers are tested strongest first; the first tier with stock whose
/// threshold the missing hp meets wins.
pub fn select_potion(player: &PlayerState) -> Option<PotionTier> {
    let missing = player.missing_hp();
    if missing == 0 {
        return None;
    }

    PotionTier::STRONGEST_FIRST.into_iter().find(|tier| {
        player.potions.count(*tier) > 0 && f64::from(missing) >= tier.threshold(player.max_hp)
    })
}

/// Drink at most one potion.
///
/// A player already at 0 hp does not drink: a potion never rescues a death
/// that the exchange has already caused.
pub fn use_potion(player: &mut PlayerState) -> Option<CombatLog> {
    if !player.is_alive() {
        return None;
    }

    let tier = select_potion(player)?;
    if !player.potions.take(tier) {
        return None;
    }

    let healed = player.heal(tier.heal_amount(player.max_hp));

    Some(CombatLog::PotionUsed {
        tier,
        healed,
        remaining: player.potions.count(tier),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PotionInventory;

    fn wounded(max_hp: u32, hp: u32, potions: PotionInventory) -> PlayerState {
        let mut player = PlayerState::new_character("p");
        player.max_hp = max_hp;
        player.hp = hp;
        player.potions = potions;
        player
    }

    #[test]
    fn full_hp_is_a_no_op() {
        let mut player = wounded(100, 100, PotionInventory::new(5, 5, 5, 5, 5));
        assert!(use_potion(&mut player).is_none());
        assert_eq!(player.potions.total(), 25);
    }

    #[test]
    fn below_smallest_threshold_is_a_no_op() {
        // small threshold = 10 + 1 = 11, missing = 10
        let mut player = wounded(100, 90, PotionInventory::new(5, 0, 0, 0, 0));
        assert!(use_potion(&mut player).is_none());
        assert_eq!(player.potions.small, 5);
    }

    #[test]
    fn strongest_qualifying_tier_wins() {
        // max 1000: small 20, medium 130, large 1070; missing 500 qualifies small + medium
        let mut player = wounded(1000, 500, PotionInventory::new(3, 2, 1, 0, 0));

        let log = use_potion(&mut player);

        assert_eq!(
            log,
            Some(CombatLog::PotionUsed {
                tier: PotionTier::Medium,
                healed: 130,
                remaining: 1,
            })
        );
        assert_eq!(player.hp, 630);
        assert_eq!(player.potions.small, 3);
        assert_eq!(player.potions.large, 1);
    }

    #[test]
    fn empty_tier_falls_through_to_weaker_one() {
        let mut player = wounded(1000, 500, PotionInventory::new(1, 0, 0, 0, 0));

        assert_eq!(select_potion(&player), Some(PotionTier::Small));
        use_potion(&mut player);
        assert_eq!(player.hp, 520);
        assert_eq!(player.potions.small, 0);
    }

    #[test]
    fn missing_exactly_at_threshold_tops_off() {
        // small threshold at max 100 is exactly 11
        let mut player = wounded(100, 89, PotionInventory::new(1, 0, 0, 0, 0));

        let log = use_potion(&mut player);

        assert_eq!(player.hp, 100);
        assert_eq!(
            log,
            Some(CombatLog::PotionUsed {
                tier: PotionTier::Small,
                healed: 11,
                remaining: 0,
            })
        );
    }

    #[test]
    fn only_one_potion_per_call() {
        let mut player = wounded(1000, 100, PotionInventory::new(5, 0, 0, 0, 0));

        use_potion(&mut player);

        assert_eq!(player.hp, 120);
        assert_eq!(player.potions.small, 4);
    }

    #[test]
    fn dead_player_does_not_drink() {
        let mut player = wounded(100, 0, PotionInventory::new(3, 1, 0, 0, 0));
        assert!(use_potion(&mut player).is_none());
        assert_eq!(player.potions.total(), 4);
    }
}
