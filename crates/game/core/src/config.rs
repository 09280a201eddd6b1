/// Selects where the player's combat attributes come from.
///
/// The two historical battle loops differed only here: one fought with
/// equipment-resolved totals, the other with raw attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatResolution {
    /// Base attributes plus every equipped item's bonuses.
    #[default]
    Equipment,
    /// Base attributes only; equipment is ignored.
    Raw,
}

impl StatResolution {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equipment => "equipment",
            Self::Raw => "raw",
        }
    }
}

impl std::str::FromStr for StatResolution {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "equipment" | "equip" => Ok(Self::Equipment),
            "raw" | "base" => Ok(Self::Raw),
            other => Err(format!("unknown stat resolution '{other}'")),
        }
    }
}

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Whether combat uses equipment-resolved or raw attributes.
    pub stat_resolution: StatResolution,
}

impl GameConfig {
    // ===== rewards =====
    /// Gold granted per reward unit when a monster dies.
    pub const GOLD_PER_REWARD_UNIT: u64 = 20;
    /// Experience granted per reward unit when a monster dies.
    pub const EXP_PER_REWARD_UNIT: u64 = 10;

    // ===== leveling =====
    /// Experience required to leave a level is `level * EXP_PER_LEVEL`.
    pub const EXP_PER_LEVEL: u64 = 100;
    pub const STAT_POINTS_PER_LEVEL: u32 = 3;

    // ===== death =====
    /// Fraction of experience kept after dying.
    pub const DEATH_EXP_RETAINED: f64 = 0.7;

    // ===== damage =====
    /// Half-width of the uniform damage variance band (±10%).
    pub const DAMAGE_VARIANCE: f64 = 0.1;
    pub const MIN_DAMAGE: u32 = 1;
    /// Base critical multiplier before the attacker's crit stat contribution.
    pub const CRIT_BASE_MULTIPLIER: f64 = 1.1;
    /// Crit stat divisor for the additional critical multiplier.
    pub const CRIT_STAT_DIVISOR: f64 = 2000.0;

    pub fn new() -> Self {
        Self {
            stat_resolution: StatResolution::Equipment,
        }
    }

    pub fn with_stat_resolution(stat_resolution: StatResolution) -> Self {
        Self { stat_resolution }
    }
}
