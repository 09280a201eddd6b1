//! Potion tiers and the per-player potion stash.

use strum::Display;

/// Potion tiers, weakest to strongest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "title_case")]
pub enum PotionTier {
    Small,
    Medium,
    Large,
    ExtraLarge,
    /// Also called the "quarter" potion in stored data.
    Super,
}

impl PotionTier {
    /// Order in which automatic potion use considers tiers.
    pub const STRONGEST_FIRST: [PotionTier; 5] = [
        PotionTier::Super,
        PotionTier::ExtraLarge,
        PotionTier::Large,
        PotionTier::Medium,
        PotionTier::Small,
    ];

    /// `(flat, fraction of max hp)` for this tier.
    const fn curve(&self) -> (f64, f64) {
        match self {
            Self::Super => (100_000.0, 0.50),
            Self::ExtraLarge => (10_000.0, 0.15),
            Self::Large => (1_000.0, 0.07),
            Self::Medium => (100.0, 0.03),
            Self::Small => (10.0, 0.01),
        }
    }

    /// Missing hp required before this tier is used.
    pub fn threshold(&self, max_hp: u32) -> f64 {
        let (flat, fraction) = self.curve();
        flat + f64::from(max_hp) * fraction
    }

    /// Hp restored by one potion of this tier (before clamping to max hp).
    pub fn heal_amount(&self, max_hp: u32) -> u32 {
        self.threshold(max_hp).floor() as u32
    }
}

/// Potion counts per tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct PotionInventory {
    pub small: u32,
    pub medium: u32,
    pub large: u32,
    #[cfg_attr(feature = "serde", serde(alias = "extralarge"))]
    pub extra_large: u32,
    #[cfg_attr(feature = "serde", serde(alias = "quarter"))]
    pub super_potion: u32,
}

impl PotionInventory {
    pub fn new(small: u32, medium: u32, large: u32, extra_large: u32, super_potion: u32) -> Self {
        Self {
            small,
            medium,
            large,
            extra_large,
            super_potion,
        }
    }

    pub fn count(&self, tier: PotionTier) -> u32 {
        match tier {
            PotionTier::Small => self.small,
            PotionTier::Medium => self.medium,
            PotionTier::Large => self.large,
            PotionTier::ExtraLarge => self.extra_large,
            PotionTier::Super => self.super_potion,
        }
    }

    fn count_mut(&mut self, tier: PotionTier) -> &mut u32 {
        match tier {
            PotionTier::Small => &mut self.small,
            PotionTier::Medium => &mut self.medium,
            PotionTier::Large => &mut self.large,
            PotionTier::ExtraLarge => &mut self.extra_large,
            PotionTier::Super => &mut self.super_potion,
        }
    }

    /// Consume one potion of `tier`. Returns `false` if none were left.
    pub fn take(&mut self, tier: PotionTier) -> bool {
        let count = self.count_mut(tier);
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    pub fn total(&self) -> u64 {
        PotionTier::STRONGEST_FIRST
            .iter()
            .map(|tier| u64::from(self.count(*tier)))
            .sum()
    }
}
