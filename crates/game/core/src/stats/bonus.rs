//! Equipment bonus aggregation.
//!
//! Every equipped item contributes one [`EquipmentBonus`]. Bonuses for an
//! attribute are folded into a [`BonusStack`] in two layers:
//! Flat (summed) → Multiplier (product of every item's factor) → Floor.
//!
//! Multipliers compose by product, never by summing percentages first, so two
//! ×1.5 items give ×2.25.

use super::core::Attribute;

/// Bonuses contributed by a single equipped item.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EquipmentBonus {
    pub add_str: i32,
    pub add_dex: i32,
    pub add_con: i32,
    pub mul_str: f64,
    pub mul_dex: f64,
    pub mul_con: f64,
}

impl EquipmentBonus {
    /// Additive-only bonus.
    pub fn flat(add_str: i32, add_dex: i32, add_con: i32) -> Self {
        Self {
            add_str,
            add_dex,
            add_con,
            ..Self::default()
        }
    }

    /// Multiplicative-only bonus.
    pub fn multiplier(mul_str: f64, mul_dex: f64, mul_con: f64) -> Self {
        Self {
            mul_str,
            mul_dex,
            mul_con,
            ..Self::default()
        }
    }

    /// Flat contribution to `attribute`.
    pub fn add(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Str => self.add_str,
            Attribute::Dex => self.add_dex,
            Attribute::Con => self.add_con,
        }
    }

    /// Multiplicative contribution to `attribute`.
    pub fn mul(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Str => self.mul_str,
            Attribute::Dex => self.mul_dex,
            Attribute::Con => self.mul_con,
        }
    }
}

impl Default for EquipmentBonus {
    fn default() -> Self {
        Self {
            add_str: 0,
            add_dex: 0,
            add_con: 0,
            mul_str: 1.0,
            mul_dex: 1.0,
            mul_con: 1.0,
        }
    }
}

/// Accumulated bonuses for one attribute.
///
/// # Example
/// ```
/// # use idle_core::stats::BonusStack;
/// let stack = BonusStack::new().flat(5).more(1.5).more(2.0);
/// // floor((10 + 5) × 1.5 × 2.0) = 45
/// assert_eq!(stack.apply(10), 45);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BonusStack {
    flat_sum: i64,
    multiplier: f64,
}

impl BonusStack {
    pub fn new() -> Self {
        Self {
            flat_sum: 0,
            multiplier: 1.0,
        }
    }

    /// Collect one attribute's contributions from every item, in order.
    pub fn collect<'a>(
        attribute: Attribute,
        bonuses: impl IntoIterator<Item = &'a EquipmentBonus>,
    ) -> Self {
        bonuses.into_iter().fold(Self::new(), |stack, bonus| {
            stack.flat(bonus.add(attribute)).more(bonus.mul(attribute))
        })
    }

    /// Add a flat bonus (builder pattern)
    pub fn flat(mut self, value: i32) -> Self {
        self.flat_sum += i64::from(value);
        self
    }

    /// Compose a multiplier (builder pattern)
    pub fn more(mut self, factor: f64) -> Self {
        self.multiplier *= factor;
        self
    }

    /// `floor((base + flat_sum) × multiplier)`, clamped to `[0, u32::MAX]`.
    pub fn apply(&self, base: u32) -> u32 {
        let total = ((i64::from(base) + self.flat_sum) as f64 * self.multiplier).floor();
        if total.is_nan() || total <= 0.0 {
            0
        } else {
            total.min(f64::from(u32::MAX)) as u32
        }
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }
}

impl Default for BonusStack {
    fn default() -> Self {
        Self::new()
    }
}
