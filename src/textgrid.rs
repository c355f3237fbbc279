use crate::types::tier::{AnyTier, IntervalTier, PointTier};
use crate::util::is_close;
use crate::{Result, TextgridError};
use std::collections::HashMap;

/// Named tiers sharing one time range. Tier order is kept separately from
/// the name lookup and drives iteration and serialization.
#[derive(Debug, Clone, Default)]
pub struct Textgrid {
    tier_names: Vec<String>,
    tiers: HashMap<String, AnyTier>,
    min_timestamp: f64,
    max_timestamp: f64,
}

impl Textgrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty textgrid with an explicit range. The range is replaced by the
    /// tiers' range as soon as a tier is added.
    pub fn with_bounds(min_timestamp: f64, max_timestamp: f64) -> Self {
        Self {
            min_timestamp,
            max_timestamp,
            ..Self::default()
        }
    }

    pub fn min_timestamp(&self) -> f64 {
        self.min_timestamp
    }

    pub fn max_timestamp(&self) -> f64 {
        self.max_timestamp
    }

    pub fn tier_names(&self) -> &[String] {
        &self.tier_names
    }

    pub fn len(&self) -> usize {
        self.tier_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tier_names.is_empty()
    }

    pub fn contains_tier(&self, name: &str) -> bool {
        self.tiers.contains_key(name)
    }

    pub fn tier(&self, name: &str) -> Option<&AnyTier> {
        self.tiers.get(name)
    }

    pub fn interval_tier(&self, name: &str) -> Option<&IntervalTier> {
        self.tier(name).and_then(AnyTier::as_interval_tier)
    }

    pub fn point_tier(&self, name: &str) -> Option<&PointTier> {
        self.tier(name).and_then(AnyTier::as_point_tier)
    }

    /// Tiers in order.
    pub fn tiers(&self) -> impl Iterator<Item = &AnyTier> + '_ {
        self.tier_names
            .iter()
            .filter_map(|name| self.tiers.get(name))
    }

    pub(crate) fn require_tier(&self, name: &str) -> Result<&AnyTier> {
        self.tiers
            .get(name)
            .ok_or_else(|| TextgridError::TierNotFound(name.to_string()))
    }

    /// Adds a tier at `index`, or at the end. Every tier then takes the
    /// combined range of all tiers.
    pub fn add_tier(&mut self, tier: impl Into<AnyTier>, index: Option<usize>) -> Result<()> {
        let tier = tier.into();
        let name = tier.name().to_string();
        if self.tiers.contains_key(&name) {
            return Err(TextgridError::TierExists(name));
        }

        match index {
            Some(index) if index < self.tier_names.len() => {
                self.tier_names.insert(index, name.clone())
            }
            _ => self.tier_names.push(name.clone()),
        }
        self.tiers.insert(name, tier);

        self.homogenize_bounds();
        Ok(())
    }

    fn homogenize_bounds(&mut self) {
        let min = self
            .tiers
            .values()
            .map(AnyTier::min_timestamp)
            .reduce(f64::min);
        let max = self
            .tiers
            .values()
            .map(AnyTier::max_timestamp)
            .reduce(f64::max);

        if let (Some(min), Some(max)) = (min, max) {
            self.min_timestamp = min;
            self.max_timestamp = max;
            for tier in self.tiers.values_mut() {
                tier.set_bounds(min, max);
            }
        }
    }

    pub fn rename_tier(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        if old_name == new_name {
            return self.require_tier(old_name).map(|_| ());
        }
        if self.tiers.contains_key(new_name) {
            return Err(TextgridError::TierExists(new_name.to_string()));
        }

        let index = self.position(old_name)?;
        let tier = self.remove_tier(old_name)?;
        self.add_tier(tier.renamed(new_name), Some(index))
    }

    pub fn remove_tier(&mut self, name: &str) -> Result<AnyTier> {
        let index = self.position(name)?;
        self.tier_names.remove(index);
        self.tiers
            .remove(name)
            .ok_or_else(|| TextgridError::TierNotFound(name.to_string()))
    }

    /// Puts `tier` in the slot held by `name`.
    pub fn replace_tier(&mut self, name: &str, tier: impl Into<AnyTier>) -> Result<()> {
        let tier = tier.into();
        let index = self.position(name)?;
        if tier.name() != name && self.tiers.contains_key(tier.name()) {
            return Err(TextgridError::TierExists(tier.name().to_string()));
        }

        self.remove_tier(name)?;
        self.add_tier(tier, Some(index))
    }

    /// Swaps in a tier of the same name without touching the shared range.
    pub(crate) fn put_tier_unhomogenized(&mut self, tier: AnyTier) {
        let name = tier.name().to_string();
        if !self.tiers.contains_key(&name) {
            self.tier_names.push(name.clone());
        }
        self.tiers.insert(name, tier);
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.tier_names
            .iter()
            .position(|existing| existing == name)
            .ok_or_else(|| TextgridError::TierNotFound(name.to_string()))
    }

    /// Float-tolerant equality of ranges and tiers, with identical tier order.
    pub fn approx_eq(&self, other: &Textgrid) -> bool {
        is_close(self.min_timestamp, other.min_timestamp)
            && is_close(self.max_timestamp, other.max_timestamp)
            && self.tier_names == other.tier_names
            && self
                .tiers()
                .zip(other.tiers())
                .all(|(a, b)| a.approx_eq(b))
    }
}
