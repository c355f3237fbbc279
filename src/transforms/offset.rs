use crate::types::entry::TimedEntry;
use crate::types::tier::{AnyTier, Tier};
use crate::{Result, Textgrid, TextgridError};

impl<E: TimedEntry> Tier<E> {
    /// Shifts every entry by `offset` seconds.
    ///
    /// Unless `allow_overshoot` is set, an entry leaving the current range is
    /// an error. The range of the result covers the shifted entries and never
    /// shrinks below the original range.
    pub fn edit_timestamps(&self, offset: f64, allow_overshoot: bool) -> Result<Self> {
        let min = self.min_timestamp();
        let max = self.max_timestamp();

        let mut entries = Vec::with_capacity(self.len());
        for entry in self.entries() {
            let shifted = entry.shifted(offset);
            if !allow_overshoot && (shifted.start() < min || shifted.end() > max) {
                return Err(TextgridError::Overshoot {
                    tier_name: self.name().to_string(),
                    old: entry.clone().into(),
                    new: shifted.into(),
                    min,
                    max,
                });
            }
            entries.push(shifted);
        }

        Ok(Tier::from_parts(self.name().to_string(), entries, min, max))
    }
}

impl AnyTier {
    pub fn edit_timestamps(&self, offset: f64, allow_overshoot: bool) -> Result<AnyTier> {
        Ok(match self {
            AnyTier::Interval(tier) => tier.edit_timestamps(offset, allow_overshoot)?.into(),
            AnyTier::Point(tier) => tier.edit_timestamps(offset, allow_overshoot)?.into(),
        })
    }
}

impl Textgrid {
    /// Shifts every tier; see [`Tier::edit_timestamps`].
    pub fn edit_timestamps(&self, offset: f64, allow_overshoot: bool) -> Result<Textgrid> {
        let mut shifted = Textgrid::new();
        for tier in self.tiers() {
            shifted.add_tier(tier.edit_timestamps(offset, allow_overshoot)?, None)?;
        }
        Ok(shifted)
    }
}
