use crate::types::entry::TimedEntry;
use crate::types::policy::CropMode;
use crate::types::tier::{AnyTier, Tier};
use crate::{Result, Textgrid};

impl<E: TimedEntry> Tier<E> {
    /// Keeps the entries inside `crop_start..crop_end` according to `mode`.
    ///
    /// The result spans `crop_start..crop_end`, or `0..crop_end - crop_start`
    /// when `rebase_to_zero` shifts the kept entries back by `crop_start`.
    /// Entries kept whole by [`CropMode::Lax`] may widen that range.
    pub fn crop(&self, crop_start: f64, crop_end: f64, mode: CropMode, rebase_to_zero: bool) -> Self {
        let kept = self
            .entries()
            .iter()
            .filter_map(|entry| entry.cropped(crop_start, crop_end, mode));

        let (entries, min, max): (Vec<E>, f64, f64) = if rebase_to_zero {
            (
                kept.map(|entry| entry.shifted(-crop_start)).collect(),
                0.0,
                crop_end - crop_start,
            )
        } else {
            (kept.collect(), crop_start, crop_end)
        };

        Tier::from_parts(self.name().to_string(), entries, min, max)
    }

    /// Entries touching `start..stop`: intervals overlapping it, points inside it.
    pub fn entries_in_interval(&self, start: f64, stop: f64) -> Vec<E> {
        self.entries()
            .iter()
            .filter_map(|entry| entry.cropped(start, stop, CropMode::Lax))
            .collect()
    }
}

impl AnyTier {
    pub fn crop(&self, crop_start: f64, crop_end: f64, mode: CropMode, rebase_to_zero: bool) -> AnyTier {
        match self {
            AnyTier::Interval(tier) => tier.crop(crop_start, crop_end, mode, rebase_to_zero).into(),
            AnyTier::Point(tier) => tier.crop(crop_start, crop_end, mode, rebase_to_zero).into(),
        }
    }
}

impl Textgrid {
    /// Crops every tier; see [`Tier::crop`].
    pub fn crop(
        &self,
        crop_start: f64,
        crop_end: f64,
        mode: CropMode,
        rebase_to_zero: bool,
    ) -> Result<Textgrid> {
        let mut cropped = if rebase_to_zero {
            Textgrid::with_bounds(0.0, crop_end - crop_start)
        } else {
            Textgrid::with_bounds(crop_start, crop_end)
        };

        for tier in self.tiers() {
            cropped.add_tier(tier.crop(crop_start, crop_end, mode, rebase_to_zero), None)?;
        }
        Ok(cropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, interval, point};
    use crate::types::tier::IntervalTier;
    use crate::util::assert_entries_close;
    use pretty_assertions::assert_eq;

    fn tier_with_overlap() -> IntervalTier {
        IntervalTier::new(
            "speaker 1",
            vec![
                interval(0.73, 1.02, "Ichiro"),
                interval(1.02, 1.231, "hit"),
                interval(1.33, 1.44, "a"),
                interval(1.44, 1.54, "great"),
                interval(1.54, 1.91, "homerun"),
            ],
            None,
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_crop_strict() {
        let tier = IntervalTier::new(
            "speaker 1",
            vec![
                interval(0.73, 1.02, "Ichiro"),
                interval(1.02, 1.231, "hit"),
                interval(1.33, 1.44, "a"),
                interval(1.44, 1.54, "great"),
                interval(1.54, 1.91, "homerun"),
            ],
            None,
            None,
        )
        .unwrap();

        let cropped = tier.crop(0.8, 1.6, CropMode::Strict, false);
        assert_entries_close(
            cropped.entries(),
            &[
                interval(1.02, 1.231, "hit"),
                interval(1.33, 1.44, "a"),
                interval(1.44, 1.54, "great"),
            ],
        );
        assert_eq!(cropped.min_timestamp(), 0.8);
        assert_eq!(cropped.max_timestamp(), 1.6);
    }

    #[test]
    fn test_crop_lax_widens_bounds() {
        let cropped = tier_with_overlap().crop(1.1, 1.5, CropMode::Lax, false);
        assert_entries_close(
            cropped.entries(),
            &[
                interval(1.02, 1.231, "hit"),
                interval(1.33, 1.44, "a"),
                interval(1.44, 1.54, "great"),
            ],
        );
        assert_eq!(cropped.min_timestamp(), 1.02);
        assert_eq!(cropped.max_timestamp(), 1.54);
    }

    #[test]
    fn test_crop_truncated() {
        let cropped = tier_with_overlap().crop(1.1, 1.5, CropMode::Truncated, false);
        assert_entries_close(
            cropped.entries(),
            &[
                interval(1.1, 1.231, "hit"),
                interval(1.33, 1.44, "a"),
                interval(1.44, 1.5, "great"),
            ],
        );
        assert_eq!(cropped.min_timestamp(), 1.1);
        assert_eq!(cropped.max_timestamp(), 1.5);
    }

    #[test]
    fn test_crop_rebase_interval_tier() {
        let cropped = fixtures::interval_tier_1().crop(0.6, 2.0, CropMode::Strict, true);
        assert_entries_close(
            cropped.entries(),
            &[
                interval(0.13, 0.42, "Ichiro"),
                interval(0.42, 0.631, "hit"),
                interval(0.73, 0.94, "a"),
                interval(0.94, 1.31, "homerun"),
            ],
        );
        assert_eq!(cropped.min_timestamp(), 0.0);
        assert!((cropped.max_timestamp() - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_crop_rebase_point_tier() {
        let cropped = fixtures::point_tier_1().crop(0.8, 2.0, CropMode::Strict, true);
        assert_entries_close(
            cropped.entries(),
            &[
                point(0.1, "120"),
                point(0.31, "100"),
                point(0.61, "110"),
                point(0.99, "95"),
            ],
        );
        assert_eq!(cropped.min_timestamp(), 0.0);
    }

    #[test]
    fn test_crop_textgrid_rebase() {
        let tg = fixtures::prefab_textgrid();
        let cropped = tg.crop(1.1, 1.6, CropMode::Strict, true).unwrap();
        assert_eq!(cropped.min_timestamp(), 0.0);
        assert!((cropped.max_timestamp() - 0.5).abs() < 1e-9);
        assert_eq!(cropped.tier_names(), tg.tier_names());
        assert_entries_close(
            cropped.interval_tier("speaker 1").unwrap().entries(),
            &[interval(0.23, 0.44, "a")],
        );
        assert!(cropped.interval_tier("speaker 2").unwrap().is_empty());
    }

    #[test]
    fn test_entries_in_interval() {
        let tier = IntervalTier::new(
            "words",
            vec![
                interval(0.4, 0.6, "outside"),
                interval(0.8, 0.9, "partial"),
                interval(1.2, 2.0, "covering"),
                interval(2.0, 3.0, "after"),
            ],
            None,
            None,
        )
        .unwrap();
        assert_entries_close(
            &tier.entries_in_interval(0.85, 1.5),
            &[interval(0.8, 0.9, "partial"), interval(1.2, 2.0, "covering")],
        );

        let points = fixtures::point_tier_1();
        assert_entries_close(
            &points.entries_in_interval(0.9, 1.41),
            &[point(0.9, "120"), point(1.11, "100"), point(1.41, "110")],
        );
    }
}
