use crate::types::entry::TimedEntry;
use crate::types::policy::InsertSpacePolicy;
use crate::types::tier::{AnyTier, Tier};
use crate::{Result, Textgrid};

impl<E: TimedEntry> Tier<E> {
    /// Inserts `duration` seconds of blank time at `start`.
    ///
    /// Entries from `start` onward move later. For interval tiers `policy`
    /// decides what happens to an interval straddling `start`; point tiers
    /// ignore it. The range grows by `duration`.
    pub fn insert_space(&self, start: f64, duration: f64, policy: InsertSpacePolicy) -> Self {
        let entries = self
            .entries()
            .iter()
            .flat_map(|entry| entry.with_space_inserted(start, duration, policy))
            .collect();

        Tier::from_parts(
            self.name().to_string(),
            entries,
            self.min_timestamp(),
            self.max_timestamp() + duration,
        )
    }
}

impl AnyTier {
    pub fn insert_space(&self, start: f64, duration: f64, policy: InsertSpacePolicy) -> AnyTier {
        match self {
            AnyTier::Interval(tier) => tier.insert_space(start, duration, policy).into(),
            AnyTier::Point(tier) => tier.insert_space(start, duration, policy).into(),
        }
    }
}

impl Textgrid {
    pub fn insert_space(&self, start: f64, duration: f64, policy: InsertSpacePolicy) -> Result<Textgrid> {
        let mut expanded = Textgrid::with_bounds(self.min_timestamp(), self.max_timestamp() + duration);
        for tier in self.tiers() {
            expanded.add_tier(tier.insert_space(start, duration, policy), None)?;
        }
        Ok(expanded)
    }
}
