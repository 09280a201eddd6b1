//! Death penalty.

use crate::config::GameConfig;
use crate::state::PlayerState;

/// Message delivered with the death notification.
pub const DEATH_MESSAGE: &str = "You have died. 30% of your experience was lost.";

/// Apply the death penalty if the player is at 0 hp.
///
/// Experience keeps 70% (floored) and hp refills to max, so the snapshot
/// handed back to the host is immediately playable again.
///
/// # Returns
///
/// `true` if the player had died.
pub fn apply_death_penalty(player: &mut PlayerState) -> bool {
    if player.is_alive() {
        return false;
    }

    player.exp = (player.exp as f64 * GameConfig::DEATH_EXP_RETAINED).floor() as u64;
    player.restore_full_hp();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn death_keeps_seventy_percent_exp_floored() {
        let mut player = PlayerState::new_character("p");
        player.exp = 55;
        player.gold = 300;
        player.hp = 0;

        assert!(apply_death_penalty(&mut player));

        // 55 × 0.7 = 38.5
        assert_eq!(player.exp, 38);
        assert_eq!(player.hp, player.max_hp);
        assert_eq!(player.gold, 300);
    }

    #[test]
    fn living_player_is_untouched() {
        let mut player = PlayerState::new_character("p");
        player.exp = 50;
        player.hp = 1;

        assert!(!apply_death_penalty(&mut player));
        assert_eq!((player.exp, player.hp), (50, 1));
    }
}
