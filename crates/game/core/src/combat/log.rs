//! Narration entries produced while resolving a tick.

use std::fmt;

use crate::state::PotionTier;

/// One sub-event of a tick, in the order it happened.
///
/// `Display` renders the human-readable narration line the host shows.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum CombatLog {
    /// The player dodged the monster's attack.
    PlayerEvaded,
    /// The monster hit the player.
    PlayerHit { damage: u32, critical: bool },
    /// The monster dodged the player's attack.
    MonsterEvaded,
    /// The player hit the monster.
    MonsterHit { damage: u32, critical: bool },
    /// Monster hp left after the exchange.
    MonsterRemainingHp { hp: u32 },
    /// Rewards granted for killing the monster.
    MonsterDefeated { gold: u64, exp: u64 },
    /// The player reached a new level.
    LevelUp { level: u32 },
    /// A potion was consumed automatically.
    PotionUsed {
        tier: PotionTier,
        healed: u32,
        remaining: u32,
    },
    /// Host-facing diagnostic (rejected command, missing input).
    Diagnostic { message: String },
}

impl CombatLog {
    pub fn diagnostic(message: impl Into<String>) -> Self {
        Self::Diagnostic {
            message: message.into(),
        }
    }
}

impl fmt::Display for CombatLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayerEvaded => write!(f, "You evaded the monster's attack."),
            Self::PlayerHit {
                damage,
                critical: true,
            } => write!(f, "Critical hit from the monster! You took {damage} damage."),
            Self::PlayerHit { damage, .. } => write!(f, "You took {damage} damage."),
            Self::MonsterEvaded => write!(f, "The monster evaded your attack."),
            Self::MonsterHit {
                damage,
                critical: true,
            } => write!(f, "Critical hit! The monster took {damage} damage."),
            Self::MonsterHit { damage, .. } => write!(f, "The monster took {damage} damage."),
            Self::MonsterRemainingHp { hp } => write!(f, "Monster hp remaining: {hp}"),
            Self::MonsterDefeated { gold, exp } => {
                write!(f, "Monster defeated! Gold: {gold} Exp: {exp}")
            }
            Self::LevelUp { level } => write!(f, "Level up! You are now level {level}."),
            Self::PotionUsed {
                tier,
                healed,
                remaining,
            } => write!(f, "Used {tier} potion: +{healed} hp ({remaining} left)."),
            Self::Diagnostic { message } => write!(f, "{message}"),
        }
    }
}
