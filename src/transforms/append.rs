use crate::types::entry::TimedEntry;
use crate::types::tier::{AnyTier, Tier};
use crate::{Result, Textgrid, TextgridError};

impl<E: TimedEntry> Tier<E> {
    /// Places `other` after this tier: its entries move by this tier's max,
    /// and the result spans `min..max + other.max`.
    pub fn append_tier(&self, other: &Tier<E>) -> Self {
        let offset = self.max_timestamp();
        let entries = self
            .entries()
            .iter()
            .cloned()
            .chain(other.entries().iter().map(|entry| entry.shifted(offset)))
            .collect();

        Tier::from_parts(
            self.name().to_string(),
            entries,
            self.min_timestamp(),
            self.max_timestamp() + other.max_timestamp(),
        )
    }
}

impl AnyTier {
    pub fn append_tier(&self, other: &AnyTier) -> Result<AnyTier> {
        match (self, other) {
            (AnyTier::Interval(a), AnyTier::Interval(b)) => Ok(a.append_tier(b).into()),
            (AnyTier::Point(a), AnyTier::Point(b)) => Ok(a.append_tier(b).into()),
            _ => Err(TextgridError::NonMatchingTiers),
        }
    }
}

impl Textgrid {
    /// Places `other` after this textgrid.
    ///
    /// Tier names keep this textgrid's order followed by names new in `other`;
    /// with `only_matching_names` only names present in both survive. Tiers
    /// from `other` move by this textgrid's max, and tiers present in both
    /// are joined. The result spans `min..max + other.max`.
    pub fn append_textgrid(&self, other: &Textgrid, only_matching_names: bool) -> Result<Textgrid> {
        let mut names: Vec<&String> = self.tier_names().iter().collect();
        for name in other.tier_names() {
            if !self.contains_tier(name) {
                names.push(name);
            }
        }
        if only_matching_names {
            names.retain(|name| self.contains_tier(name) && other.contains_tier(name));
        }

        let min = self.min_timestamp();
        let max = self.max_timestamp() + other.max_timestamp();
        let offset = self.max_timestamp();

        let mut combined = Textgrid::new();
        for name in names {
            let tier = match (self.tier(name), other.tier(name)) {
                (Some(first), Some(second)) => {
                    let second = second.with_bounds(min, max).edit_timestamps(offset, false)?;
                    join_entries(first, &second)?
                }
                (Some(first), None) => first.clone(),
                (None, Some(second)) => second.with_bounds(min, max).edit_timestamps(offset, false)?,
                (None, None) => continue,
            };
            combined.add_tier(tier.with_bounds(min, max), None)?;
        }
        Ok(combined)
    }
}

fn join_entries(first: &AnyTier, second: &AnyTier) -> Result<AnyTier> {
    match (first, second) {
        (AnyTier::Interval(a), AnyTier::Interval(b)) => {
            Ok(a.with_entries([a.entries(), b.entries()].concat()).into())
        }
        (AnyTier::Point(a), AnyTier::Point(b)) => {
            Ok(a.with_entries([a.entries(), b.entries()].concat()).into())
        }
        _ => Err(TextgridError::NonMatchingTiers),
    }
}
