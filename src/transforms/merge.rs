use crate::types::tier::AnyTier;
use crate::{Result, Textgrid};

pub const MERGED_INTERVALS_NAME: &str = "merged intervals";
pub const MERGED_POINTS_NAME: &str = "merged points";

impl Textgrid {
    /// Collapses the named tiers (all tiers when `names` is `None`) into one
    /// interval tier and one point tier, folding each kind with
    /// [`Tier::union`](crate::Tier::union).
    ///
    /// The result holds the merged interval tier, then the merged point tier,
    /// then, with `preserve_other_tiers`, the unselected tiers in their
    /// original order. A kind with no selected tiers yields no merged tier.
    pub fn merge_tiers(
        &self,
        names: Option<&[String]>,
        preserve_other_tiers: bool,
        interval_tier_name: &str,
        point_tier_name: &str,
    ) -> Result<Textgrid> {
        let selected = names.unwrap_or(self.tier_names());

        let mut merged_intervals: Option<AnyTier> = None;
        let mut merged_points: Option<AnyTier> = None;
        for name in selected {
            let tier = self.require_tier(name)?;
            let slot = match tier {
                AnyTier::Interval(_) => &mut merged_intervals,
                AnyTier::Point(_) => &mut merged_points,
            };
            *slot = Some(match slot.take() {
                Some(acc) => acc.union(tier)?,
                None => tier.clone(),
            });
        }

        let mut merged = Textgrid::with_bounds(self.min_timestamp(), self.max_timestamp());
        if let Some(tier) = merged_intervals {
            merged.add_tier(tier.renamed(interval_tier_name), None)?;
        }
        if let Some(tier) = merged_points {
            merged.add_tier(tier.renamed(point_tier_name), None)?;
        }

        if preserve_other_tiers {
            for tier in self.tiers() {
                if !selected.iter().any(|name| name == tier.name()) {
                    merged.add_tier(tier.clone(), None)?;
                }
            }
        }
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TextgridError;
    use crate::fixtures;
    use crate::types::entry::Point;
    use crate::util::{assert_entries_close, compare_entries_by_time};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_all_tiers() {
        let tg = fixtures::prefab_textgrid();
        let merged = tg
            .merge_tiers(None, true, MERGED_INTERVALS_NAME, MERGED_POINTS_NAME)
            .unwrap();

        assert_eq!(merged.tier_names(), &["merged intervals", "merged points"]);

        let intervals = [
            tg.interval_tier("speaker 1").unwrap().entries(),
            tg.interval_tier("speaker 2").unwrap().entries(),
        ]
        .concat();
        assert_entries_close(
            merged.interval_tier("merged intervals").unwrap().entries(),
            &intervals,
        );

        let mut points: Vec<Point> = [
            tg.point_tier("pitch vals 1").unwrap().entries(),
            tg.point_tier("pitch vals 2").unwrap().entries(),
            tg.point_tier("noises").unwrap().entries(),
        ]
        .concat();
        points.sort_by(compare_entries_by_time);
        assert_entries_close(merged.point_tier("merged points").unwrap().entries(), &points);

        assert_eq!(merged.min_timestamp(), tg.min_timestamp());
        assert_eq!(merged.max_timestamp(), tg.max_timestamp());
    }

    #[test]
    fn test_merge_selected_tiers() {
        let tg = fixtures::prefab_textgrid();
        let names = tg.tier_names()[..4].to_vec();
        let merged = tg
            .merge_tiers(Some(&names), true, MERGED_INTERVALS_NAME, MERGED_POINTS_NAME)
            .unwrap();

        assert_eq!(
            merged.tier_names(),
            &["merged intervals", "merged points", "noises"]
        );
        assert_eq!(merged.point_tier("merged points").unwrap().len(), 8);
        assert_eq!(
            merged.point_tier("noises").unwrap().entries(),
            tg.point_tier("noises").unwrap().entries()
        );
    }

    #[test]
    fn test_merge_without_preserving_others() {
        let tg = fixtures::prefab_textgrid();
        let names = vec!["speaker 1".to_string(), "speaker 2".to_string()];
        let merged = tg.merge_tiers(Some(&names), false, "words", "unused").unwrap();

        assert_eq!(merged.tier_names(), &["words"]);
        assert_eq!(merged.interval_tier("words").unwrap().len(), 8);
    }

    #[test]
    fn test_merge_missing_tier() {
        let tg = fixtures::prefab_textgrid();
        let names = vec!["speaker 3".to_string()];
        assert!(matches!(
            tg.merge_tiers(Some(&names), true, MERGED_INTERVALS_NAME, MERGED_POINTS_NAME),
            Err(TextgridError::TierNotFound(_))
        ));
    }
}
