use crate::types::entry::Interval;
use crate::types::tier::{AnyTier, IntervalTier};
use crate::util::MIN_INTERVAL_LENGTH;
use crate::{Result, Textgrid, TextgridError};

/// Normalizes a textgrid before it is written.
///
/// Every interval tier has its gaps filled with blank intervals out to
/// `min_timestamp..max_timestamp` (the textgrid's range when `None`). With a
/// `min_interval_length`, intervals shorter than it are folded into the
/// interval before them and near-touching boundaries are snapped together.
/// Point tiers pass through unchanged.
pub fn prep_for_saving(
    tg: &Textgrid,
    min_interval_length: Option<f64>,
    min_timestamp: Option<f64>,
    max_timestamp: Option<f64>,
) -> Result<Textgrid> {
    let min = min_timestamp.unwrap_or(tg.min_timestamp());
    let max = max_timestamp.unwrap_or(tg.max_timestamp());

    let mut prepared = tg.clone();
    for tier in tg.tiers() {
        if let AnyTier::Interval(tier) = tier {
            let mut filled = tier.filled_in_blanks("", min, max)?;
            if let Some(min_length) = min_interval_length {
                filled = filled.without_ultrashort_intervals(min_length, min);
            }
            filled.sort();
            prepared.put_tier_unhomogenized(filled.into());
        }
    }
    Ok(prepared)
}

impl IntervalTier {
    /// Covers every uncovered stretch of `start..end` with a `blank_label`
    /// interval. Data outside `start..end` is an error; nothing is truncated.
    pub fn filled_in_blanks(&self, blank_label: &str, start: f64, end: f64) -> Result<IntervalTier> {
        let out_of_range = |message: &str| TextgridError::OutOfRange {
            tier_name: self.name().to_string(),
            message: message.to_string(),
        };

        let mut entries: Vec<Interval> = Vec::with_capacity(self.len() * 2 + 2);
        for entry in self.entries() {
            let prev_end = entries.last().map(|prev| prev.end);
            if let Some(prev_end) = prev_end.filter(|&prev_end| prev_end < entry.start) {
                entries.push(Interval::new(prev_end, entry.start, blank_label));
            }
            entries.push(entry.clone());
        }

        let (first_start, last_end) = match (entries.first(), entries.last()) {
            (Some(first), Some(last)) => (first.start, last.end),
            _ => return Ok(self.with_entries(vec![Interval::new(start, end, blank_label)])),
        };

        if first_start < start {
            return Err(out_of_range("Tier data is before the tier start time."));
        }
        if last_end > end {
            return Err(out_of_range("Tier data is after the tier end time."));
        }
        if first_start > start {
            entries.insert(0, Interval::new(start, first_start, blank_label));
        }
        if last_end < end {
            entries.push(Interval::new(last_end, end, blank_label));
        }

        Ok(self.with_entries(entries))
    }

    /// Drops intervals shorter than `min_length`, stretching the previous
    /// interval over them, then snaps boundaries that nearly touch and joins
    /// adjacent blank intervals.
    pub fn without_ultrashort_intervals(&self, min_length: f64, min_timestamp: f64) -> IntervalTier {
        let mut entries: Vec<Interval> = Vec::with_capacity(self.len());
        for entry in self.entries() {
            if entry.duration() < min_length {
                if let Some(prev) = entries.last_mut() {
                    prev.end = entry.end;
                }
            } else if entries.is_empty() && entry.start != min_timestamp {
                entries.push(Interval::new(min_timestamp, entry.end, entry.label.clone()));
            } else {
                entries.push(entry.clone());
            }
        }

        for i in 1..entries.len() {
            let next_start = entries[i].start;
            let prev = &mut entries[i - 1];
            let diff = (prev.end - next_start).abs();
            if diff > 0.0 && diff < MIN_INTERVAL_LENGTH {
                prev.end = next_start;
            }
        }

        // blanks that now touch become one, as they would after a reparse
        entries.dedup_by(|next, prev| {
            let touching_blanks =
                prev.label.is_empty() && next.label.is_empty() && prev.end == next.start;
            if touching_blanks {
                prev.end = next.end;
            }
            touching_blanks
        });

        self.with_entries(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, interval};
    use crate::util::assert_entries_close;
    use pretty_assertions::assert_eq;

    fn tier(entries: &[(f64, f64, &str)]) -> IntervalTier {
        IntervalTier::new(
            "words",
            entries.iter().map(|&(s, e, l)| interval(s, e, l)).collect(),
            None,
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_fill_in_blanks() {
        let tg = fixtures::prefab_textgrid();
        let prepared = prep_for_saving(&tg, Some(MIN_INTERVAL_LENGTH), None, None).unwrap();

        assert_entries_close(
            prepared.interval_tier("speaker 1").unwrap().entries(),
            &[
                interval(0.73, 1.02, "Ichiro"),
                interval(1.02, 1.231, "hit"),
                interval(1.231, 1.33, ""),
                interval(1.33, 1.54, "a"),
                interval(1.54, 1.91, "homerun"),
                interval(1.91, 4.53, ""),
            ],
        );
        assert_entries_close(
            prepared.interval_tier("speaker 2").unwrap().entries(),
            &[
                interval(0.73, 3.56, ""),
                interval(3.56, 3.98, "and"),
                interval(3.98, 4.21, "Fred"),
                interval(4.21, 4.44, "caught"),
                interval(4.44, 4.53, "it"),
            ],
        );
        assert_eq!(
            prepared.point_tier("pitch vals 1").unwrap(),
            tg.point_tier("pitch vals 1").unwrap()
        );
    }

    #[test]
    fn test_fill_in_blanks_with_wider_range() {
        let tg = fixtures::prefab_textgrid();
        let prepared = prep_for_saving(&tg, None, Some(0.0), Some(5.0)).unwrap();
        let speaker = prepared.interval_tier("speaker 1").unwrap();

        assert_eq!(speaker.entries()[0], interval(0.0, 0.73, ""));
        assert_eq!(speaker.entries().last(), Some(&interval(1.91, 5.0, "")));
        assert_eq!(speaker.min_timestamp(), 0.0);
        assert_eq!(speaker.max_timestamp(), 5.0);
    }

    #[test]
    fn test_fill_in_blanks_empty_tier() {
        let empty = IntervalTier::new("words", vec![], Some(0.0), Some(2.0)).unwrap();
        let filled = empty.filled_in_blanks("", 0.0, 2.0).unwrap();
        assert_eq!(filled.entries(), &[interval(0.0, 2.0, "")]);
    }

    #[test]
    fn test_fill_in_blanks_rejects_data_out_of_range() {
        let tg = fixtures::prefab_textgrid();

        let err = prep_for_saving(&tg, None, Some(1.0), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Tier 'speaker 1': Tier data is before the tier start time."
        );

        let err = prep_for_saving(&tg, None, None, Some(4.0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Tier 'speaker 2': Tier data is after the tier end time."
        );
    }

    #[test]
    fn test_remove_ultrashort_intervals() {
        let short = tier(&[(0.0, 1.0, "a"), (1.0, 1.05, "b"), (1.05, 2.0, "c")])
            .without_ultrashort_intervals(0.1, 0.0);
        assert_eq!(
            short.entries(),
            &[interval(0.0, 1.05, "a"), interval(1.05, 2.0, "c")]
        );
    }

    #[test]
    fn test_remove_ultrashort_leading_interval() {
        let short = tier(&[(0.0, 0.01, "a"), (0.01, 2.0, "b")]).without_ultrashort_intervals(0.1, 0.0);
        assert_eq!(short.entries(), &[interval(0.0, 2.0, "b")]);
    }

    #[test]
    fn test_snap_near_touching_boundaries() {
        let snapped = tier(&[(0.0, 1.000000005, "a"), (1.0, 2.0, "b")])
            .without_ultrashort_intervals(MIN_INTERVAL_LENGTH, 0.0);
        assert_eq!(
            snapped.entries(),
            &[interval(0.0, 1.0, "a"), interval(1.0, 2.0, "b")]
        );
    }

    #[test]
    fn test_touching_blanks_are_joined() {
        let joined = tier(&[(0.0, 1.0, "a"), (1.0, 1.5, ""), (1.5, 1.52, "x"), (1.52, 2.0, "")])
            .without_ultrashort_intervals(0.1, 0.0);
        assert_eq!(
            joined.entries(),
            &[interval(0.0, 1.0, "a"), interval(1.0, 2.0, "")]
        );

        let snapped = tier(&[(1.0, 1.5000000001, ""), (1.5, 2.0, "")])
            .without_ultrashort_intervals(MIN_INTERVAL_LENGTH, 1.0);
        assert_eq!(snapped.entries(), &[interval(1.0, 2.0, "")]);
    }

    #[test]
    fn test_prep_for_saving_is_idempotent() {
        let tg = fixtures::prefab_textgrid()
            .erase_region(1.1, 1.5, false)
            .unwrap();
        let once = prep_for_saving(&tg, Some(MIN_INTERVAL_LENGTH), None, None).unwrap();
        let twice = prep_for_saving(&once, Some(MIN_INTERVAL_LENGTH), None, None).unwrap();
        assert!(once.approx_eq(&twice));
        assert_eq!(once.tier_names(), tg.tier_names());
    }
}
