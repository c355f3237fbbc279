use crate::types::entry::{Interval, TimedEntry};
use crate::types::policy::{CollisionPolicy, CropMode};
use crate::types::tier::{AnyTier, IntervalTier, Tier};
use crate::{Result, TextgridError};

impl<E: TimedEntry> Tier<E> {
    /// Every entry of both tiers. Overlapping entries are merged into one.
    pub fn union(&self, other: &Tier<E>) -> Result<Self> {
        let mut combined = self.clone();
        for entry in other.entries() {
            combined.insert_entry(entry.clone(), false, Some(CollisionPolicy::Merge))?;
        }
        combined.sort();
        Ok(combined)
    }
}

impl AnyTier {
    pub fn union(&self, other: &AnyTier) -> Result<AnyTier> {
        match (self, other) {
            (AnyTier::Interval(a), AnyTier::Interval(b)) => Ok(a.union(b)?.into()),
            (AnyTier::Point(a), AnyTier::Point(b)) => Ok(a.union(b)?.into()),
            _ => Err(TextgridError::NonMatchingTiers),
        }
    }
}

impl IntervalTier {
    /// This tier with every span covered by `other` erased.
    pub fn difference(&self, other: &IntervalTier) -> Result<IntervalTier> {
        other.entries().iter().try_fold(self.clone(), |tier, entry| {
            tier.erase_region(entry.start, entry.end, false, CropMode::Truncated)
        })
    }

    /// The spans covered by both tiers, labelled `this-other`.
    pub fn intersection(&self, other: &IntervalTier) -> IntervalTier {
        let entries = self
            .entries()
            .iter()
            .flat_map(|entry| {
                other
                    .crop(entry.start, entry.end, CropMode::Truncated, false)
                    .entries()
                    .iter()
                    .map(|fragment| {
                        Interval::new(
                            fragment.start,
                            fragment.end,
                            format!("{}-{}", entry.label, fragment.label),
                        )
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        self.with_entries(entries)
            .renamed(format!("{}-{}", self.name(), other.name()))
    }

    /// The stretches of the range no interval covers, as blank intervals.
    pub fn non_entries(&self) -> Vec<Interval> {
        let entries = self.entries();
        let (Some(first), Some(last)) = (entries.first(), entries.last()) else {
            return vec![Interval::new(self.min_timestamp(), self.max_timestamp(), "")];
        };

        let mut gaps = Vec::new();
        if first.start > self.min_timestamp() {
            gaps.push(Interval::new(self.min_timestamp(), first.start, ""));
        }
        for pair in entries.windows(2) {
            if pair[0].end != pair[1].start {
                gaps.push(Interval::new(pair[0].end, pair[1].start, ""));
            }
        }
        if last.end < self.max_timestamp() {
            gaps.push(Interval::new(last.end, self.max_timestamp(), ""));
        }
        gaps
    }
}
