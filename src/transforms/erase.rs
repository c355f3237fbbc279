use crate::types::entry::TimedEntry;
use crate::types::policy::CropMode;
use crate::types::tier::{AnyTier, Tier};
use crate::{Result, Textgrid, TextgridError};

impl<E: TimedEntry> Tier<E> {
    /// Blanks `start..stop`.
    ///
    /// Entries crossing the region are handled by `mode`, which must be
    /// [`CropMode::Strict`] or [`CropMode::Truncated`]. With `do_shrink` the
    /// later entries move back to close the gap; otherwise the gap stays and
    /// the result keeps the original range.
    pub fn erase_region(&self, start: f64, stop: f64, do_shrink: bool, mode: CropMode) -> Result<Self> {
        if mode == CropMode::Lax {
            return Err(TextgridError::InvalidArgument {
                value: mode.to_string(),
                expected: &["strict", "truncated"],
            });
        }

        let min = self.min_timestamp();
        let max = self.max_timestamp();

        let mut erased = if start > min && stop < max {
            let left = self.crop(min, start, mode, false);
            if do_shrink {
                left.append_tier(&self.crop(stop, max, mode, true))
            } else {
                left.union(&self.crop(stop, max, mode, false))?
            }
        } else if start > min && stop >= max {
            self.crop(min, start, mode, false)
        } else if start <= min && stop < max {
            let right = self.crop(stop, max, mode, false);
            if do_shrink {
                right.edit_timestamps(-stop, true)?
            } else {
                right
            }
        } else {
            self.with_entries(Vec::new())
        };

        if !do_shrink {
            erased.set_bounds(min, max);
        }
        Ok(erased)
    }
}

impl AnyTier {
    pub fn erase_region(&self, start: f64, stop: f64, do_shrink: bool, mode: CropMode) -> Result<AnyTier> {
        Ok(match self {
            AnyTier::Interval(tier) => tier.erase_region(start, stop, do_shrink, mode)?.into(),
            AnyTier::Point(tier) => tier.erase_region(start, stop, do_shrink, mode)?.into(),
        })
    }
}

impl Textgrid {
    /// Erases `start..stop` from every tier, truncating entries that cross it.
    pub fn erase_region(&self, start: f64, stop: f64, do_shrink: bool) -> Result<Textgrid> {
        let max = if do_shrink {
            self.max_timestamp() - (stop - start)
        } else {
            self.max_timestamp()
        };

        let mut erased = Textgrid::with_bounds(self.min_timestamp(), max);
        for tier in self.tiers() {
            erased.add_tier(
                tier.erase_region(start, stop, do_shrink, CropMode::Truncated)?,
                None,
            )?;
        }
        Ok(erased)
    }
}
