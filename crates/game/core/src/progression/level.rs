//! Level-up processing.

use crate::combat::CombatLog;
use crate::config::GameConfig;
use crate::state::PlayerState;

/// Experience needed to leave `level`.
pub fn exp_to_next_level(level: u32) -> u64 {
    u64::from(level) * GameConfig::EXP_PER_LEVEL
}

/// Apply every level-up the player's experience pays for.
///
/// Each level consumes `level × 100` exp (at the pre-increment level), grants
/// three stat points and refills hp. Loops so one large reward can cross
/// several levels; with exp below the threshold this is a no-op.
pub fn apply_level_ups(player: &mut PlayerState) -> Vec<CombatLog> {
    let mut logs = Vec::new();

    loop {
        let required = exp_to_next_level(player.level);
        if required == 0 || player.exp < required {
            break;
        }

        player.exp -= required;
        player.level = player.level.saturating_add(1);
        player.stat_points = player
            .stat_points
            .saturating_add(GameConfig::STAT_POINTS_PER_LEVEL);
        player.restore_full_hp();

        logs.push(CombatLog::LevelUp {
            level: player.level,
        });
    }

    logs
}
