use crate::types::entry::{Interval, Point, TierKind, TimedEntry};
use crate::types::policy::{CollisionPolicy, FindMode};
use crate::util::{compare_entries_by_time, is_close};
use crate::{Result, TextgridError};
use regex::Regex;

/// One timeline of annotations. Entries are kept sorted by start time and the
/// declared range `min_timestamp..max_timestamp` always covers every entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Tier<E> {
    name: String,
    entries: Vec<E>,
    min_timestamp: f64,
    max_timestamp: f64,
}

pub type IntervalTier = Tier<Interval>;
pub type PointTier = Tier<Point>;

impl<E: TimedEntry> Tier<E> {
    /// Builds a tier. The range is the span of the entries widened by any
    /// supplied bound; with no entries both bounds are required.
    pub fn new(
        name: impl Into<String>,
        entries: Vec<E>,
        min_timestamp: Option<f64>,
        max_timestamp: Option<f64>,
    ) -> Result<Self> {
        for entry in &entries {
            entry.validate()?;
        }

        let min = entries
            .iter()
            .map(|e| e.start())
            .chain(min_timestamp)
            .reduce(f64::min);
        let max = entries
            .iter()
            .map(|e| e.end())
            .chain(max_timestamp)
            .reduce(f64::max);

        match (min, max) {
            (Some(min), Some(max)) => Ok(Self::from_parts(name.into(), entries, min, max)),
            _ => Err(TextgridError::TierCreation(
                "All textgrid tiers must have a min and max timestamp".to_string(),
            )),
        }
    }

    /// Assembles a tier from trusted parts, widening the bounds to the entries.
    pub(crate) fn from_parts(name: String, mut entries: Vec<E>, min: f64, max: f64) -> Self {
        let min_timestamp = entries.iter().map(|e| e.start()).fold(min, f64::min);
        let max_timestamp = entries.iter().map(|e| e.end()).fold(max, f64::max);
        entries.sort_by(compare_entries_by_time);
        Self {
            name,
            entries,
            min_timestamp,
            max_timestamp,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    pub fn min_timestamp(&self) -> f64 {
        self.min_timestamp
    }

    pub fn max_timestamp(&self) -> f64 {
        self.max_timestamp
    }

    pub fn kind(&self) -> TierKind {
        E::KIND
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A copy with the same name and bounds holding `entries` instead.
    pub fn with_entries(&self, entries: Vec<E>) -> Self {
        Self::from_parts(
            self.name.clone(),
            entries,
            self.min_timestamp,
            self.max_timestamp,
        )
    }

    /// A copy with the same entries and the given bounds, widened if the entries need it.
    pub fn with_bounds(&self, min_timestamp: f64, max_timestamp: f64) -> Self {
        Self::from_parts(
            self.name.clone(),
            self.entries.clone(),
            min_timestamp,
            max_timestamp,
        )
    }

    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Overwrites the declared range. Callers guarantee it still covers the entries.
    pub(crate) fn set_bounds(&mut self, min_timestamp: f64, max_timestamp: f64) {
        self.min_timestamp = min_timestamp;
        self.max_timestamp = max_timestamp;
    }

    pub fn sort(&mut self) {
        self.entries.sort_by(compare_entries_by_time);
    }

    /// Inserts `entry` in place.
    ///
    /// Points collide when their times are close, intervals when they overlap.
    /// A collision is resolved by `policy`, or rejected when there is none.
    /// With `warn` set a resolved collision is reported through `log::warn!`.
    pub fn insert_entry(
        &mut self,
        entry: E,
        warn: bool,
        policy: Option<CollisionPolicy>,
    ) -> Result<()> {
        entry.validate()?;

        let matches: Vec<E> = self
            .entries
            .iter()
            .filter(|existing| existing.collides_with(&entry))
            .cloned()
            .collect();

        if matches.is_empty() {
            self.entries.push(entry);
        } else {
            let Some(policy) = policy else {
                return Err(TextgridError::EntryCollision {
                    tier_name: self.name.clone(),
                    entry: entry.into(),
                    matches: matches.into_iter().map(Into::into).collect(),
                });
            };

            if warn {
                log::warn!(
                    "Collision warning for {} with items {} of tier '{}'",
                    entry,
                    matches
                        .iter()
                        .map(|m| m.to_string())
                        .collect::<Vec<_>>()
                        .join(", "),
                    self.name
                );
            }

            self.entries
                .retain(|existing| !existing.collides_with(&entry));

            match policy {
                CollisionPolicy::Replace => self.entries.push(entry),
                CollisionPolicy::Merge => {
                    let mut group = matches;
                    group.push(entry);
                    group.sort_by(compare_entries_by_time);

                    let start = group.iter().map(|e| e.start()).fold(f64::INFINITY, f64::min);
                    let end = group
                        .iter()
                        .map(|e| e.end())
                        .fold(f64::NEG_INFINITY, f64::max);
                    let label = group
                        .iter()
                        .map(|e| e.label())
                        .collect::<Vec<_>>()
                        .join("-");
                    self.entries.push(E::spanning(start, end, label));
                }
            }
        }

        if let Some(last) = self.entries.last() {
            self.min_timestamp = self.min_timestamp.min(last.start());
            self.max_timestamp = self.max_timestamp.max(last.end());
        }
        self.sort();
        Ok(())
    }

    /// Removes the first entry equal to `entry` in place.
    pub fn delete_entry(&mut self, entry: &E) -> Result<()> {
        let position = self
            .entries
            .iter()
            .position(|existing| existing.approx_eq(entry))
            .ok_or_else(|| TextgridError::EntryNotFound {
                tier_name: self.name.clone(),
                entry: entry.clone().into(),
            })?;
        self.entries.remove(position);
        Ok(())
    }

    /// Indices of the entries whose label matches `label`.
    pub fn find(&self, label: &str, mode: FindMode) -> Result<Vec<usize>> {
        let indices = match mode {
            FindMode::Exact => self.positions(|text| text == label),
            FindMode::Substring => self.positions(|text| text.contains(label)),
            FindMode::Regex => {
                let pattern = Regex::new(label)?;
                self.positions(|text| pattern.is_match(text))
            }
        };
        Ok(indices)
    }

    fn positions(&self, matches: impl Fn(&str) -> bool) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| matches(entry.label()))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn approx_eq(&self, other: &Self) -> bool {
        self.name == other.name
            && is_close(self.min_timestamp, other.min_timestamp)
            && is_close(self.max_timestamp, other.max_timestamp)
            && self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|(a, b)| a.approx_eq(b))
    }
}

/// A tier of either kind, as stored in a [`Textgrid`](crate::Textgrid).
#[derive(Debug, Clone, PartialEq)]
pub enum AnyTier {
    Interval(IntervalTier),
    Point(PointTier),
}

impl From<IntervalTier> for AnyTier {
    fn from(tier: IntervalTier) -> Self {
        AnyTier::Interval(tier)
    }
}

impl From<PointTier> for AnyTier {
    fn from(tier: PointTier) -> Self {
        AnyTier::Point(tier)
    }
}

impl AnyTier {
    pub fn name(&self) -> &str {
        match self {
            AnyTier::Interval(tier) => tier.name(),
            AnyTier::Point(tier) => tier.name(),
        }
    }

    pub fn kind(&self) -> TierKind {
        match self {
            AnyTier::Interval(_) => TierKind::Interval,
            AnyTier::Point(_) => TierKind::Point,
        }
    }

    pub fn min_timestamp(&self) -> f64 {
        match self {
            AnyTier::Interval(tier) => tier.min_timestamp(),
            AnyTier::Point(tier) => tier.min_timestamp(),
        }
    }

    pub fn max_timestamp(&self) -> f64 {
        match self {
            AnyTier::Interval(tier) => tier.max_timestamp(),
            AnyTier::Point(tier) => tier.max_timestamp(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AnyTier::Interval(tier) => tier.len(),
            AnyTier::Point(tier) => tier.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Label of the first entry, if any.
    pub fn first_label(&self) -> Option<&str> {
        match self {
            AnyTier::Interval(tier) => tier.entries().first().map(|e| e.label.as_str()),
            AnyTier::Point(tier) => tier.entries().first().map(|e| e.label.as_str()),
        }
    }

    pub fn as_interval_tier(&self) -> Option<&IntervalTier> {
        match self {
            AnyTier::Interval(tier) => Some(tier),
            AnyTier::Point(_) => None,
        }
    }

    pub fn as_point_tier(&self) -> Option<&PointTier> {
        match self {
            AnyTier::Point(tier) => Some(tier),
            AnyTier::Interval(_) => None,
        }
    }

    pub fn renamed(&self, name: impl Into<String>) -> AnyTier {
        match self {
            AnyTier::Interval(tier) => tier.renamed(name).into(),
            AnyTier::Point(tier) => tier.renamed(name).into(),
        }
    }

    pub fn with_bounds(&self, min_timestamp: f64, max_timestamp: f64) -> AnyTier {
        match self {
            AnyTier::Interval(tier) => tier.with_bounds(min_timestamp, max_timestamp).into(),
            AnyTier::Point(tier) => tier.with_bounds(min_timestamp, max_timestamp).into(),
        }
    }

    pub(crate) fn set_bounds(&mut self, min_timestamp: f64, max_timestamp: f64) {
        match self {
            AnyTier::Interval(tier) => tier.set_bounds(min_timestamp, max_timestamp),
            AnyTier::Point(tier) => tier.set_bounds(min_timestamp, max_timestamp),
        }
    }

    /// Same variant and [`Tier::approx_eq`].
    pub fn approx_eq(&self, other: &AnyTier) -> bool {
        match (self, other) {
            (AnyTier::Interval(a), AnyTier::Interval(b)) => a.approx_eq(b),
            (AnyTier::Point(a), AnyTier::Point(b)) => a.approx_eq(b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::util::assert_entries_close;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_derives_bounds_from_entries() {
        let tier = fixtures::interval_tier_1();
        assert_eq!(tier.min_timestamp(), 0.73);
        assert_eq!(tier.max_timestamp(), 1.91);

        let tier = IntervalTier::new(
            "words",
            vec![Interval::new(1.0, 2.0, "a")],
            Some(0.0),
            Some(1.5),
        )
        .unwrap();
        assert_eq!(tier.min_timestamp(), 0.0);
        assert_eq!(tier.max_timestamp(), 2.0);
    }

    #[test]
    fn test_new_sorts_entries() {
        let tier = PointTier::new(
            "pitch",
            vec![Point::new(2.0, "b"), Point::new(1.0, "a")],
            None,
            None,
        )
        .unwrap();
        assert_eq!(tier.entries()[0], Point::new(1.0, "a"));
    }

    #[test]
    fn test_new_without_range_fails() {
        let err = PointTier::new("empty", vec![], None, None).unwrap_err();
        assert!(matches!(err, TextgridError::TierCreation(_)));

        let tier = PointTier::new("empty", vec![], Some(0.0), Some(1.0)).unwrap();
        assert!(tier.is_empty());
    }

    #[test]
    fn test_new_rejects_degenerate_intervals() {
        let err = IntervalTier::new("bad", vec![Interval::new(1.0, 1.0, "x")], None, None);
        assert!(err.is_err());
    }

    #[test]
    fn test_insert_point() {
        let mut tier = fixtures::point_tier_1();
        tier.insert_entry(Point::new(1.0, "85"), true, None).unwrap();
        assert_eq!(tier.entries()[1], Point::new(1.0, "85"));
        assert_eq!(tier.len(), 5);
    }

    #[test]
    fn test_insert_point_collision_without_policy() {
        let mut tier = fixtures::point_tier_1();
        let err = tier
            .insert_entry(Point::new(0.9, "85"), false, None)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Attempted to insert [0.9,85] into tier 'pitch vals 1' of textgrid but overlapping entries [0.9,120] already exist."
        );
        assert_eq!(tier, fixtures::point_tier_1());
    }

    #[test]
    fn test_insert_point_replace_and_merge() {
        let mut tier = fixtures::point_tier_1();
        tier.insert_entry(Point::new(0.9, "85"), false, Some(CollisionPolicy::Replace))
            .unwrap();
        assert_eq!(tier.entries()[0], Point::new(0.9, "85"));

        let mut tier = fixtures::point_tier_1();
        tier.insert_entry(Point::new(0.9, "85"), false, Some(CollisionPolicy::Merge))
            .unwrap();
        assert_eq!(tier.entries()[0], Point::new(0.9, "120-85"));
        assert_eq!(tier.len(), 4);
    }

    #[test]
    fn test_insert_interval_merge() {
        let mut tier = fixtures::interval_tier_1();
        tier.insert_entry(
            Interval::new(0.9, 1.10, "he"),
            false,
            Some(CollisionPolicy::Merge),
        )
        .unwrap();
        assert_entries_close(
            tier.entries(),
            &[
                Interval::new(0.73, 1.231, "Ichiro-he-hit"),
                Interval::new(1.33, 1.54, "a"),
                Interval::new(1.54, 1.91, "homerun"),
            ],
        );
    }

    #[test]
    fn test_insert_interval_replace() {
        let mut tier = fixtures::interval_tier_1();
        tier.insert_entry(
            Interval::new(0.9, 1.10, "he"),
            false,
            Some(CollisionPolicy::Replace),
        )
        .unwrap();
        assert_entries_close(
            tier.entries(),
            &[
                Interval::new(0.9, 1.10, "he"),
                Interval::new(1.33, 1.54, "a"),
                Interval::new(1.54, 1.91, "homerun"),
            ],
        );
    }

    #[test]
    fn test_insert_touching_interval_is_not_a_collision() {
        let mut tier = fixtures::interval_tier_1();
        tier.insert_entry(Interval::new(1.231, 1.33, "ball"), false, None)
            .unwrap();
        assert_eq!(tier.entries()[2], Interval::new(1.231, 1.33, "ball"));
    }

    #[test]
    fn test_insert_widens_bounds() {
        let mut tier = fixtures::interval_tier_1();
        tier.insert_entry(Interval::new(2.0, 2.5, "late"), false, None)
            .unwrap();
        assert_eq!(tier.max_timestamp(), 2.5);
    }

    #[test]
    fn test_delete_entry() {
        let mut tier = fixtures::interval_tier_1();
        tier.delete_entry(&Interval::new(1.02, 1.231, "hit")).unwrap();
        assert_eq!(tier.len(), 3);

        let err = tier
            .delete_entry(&Interval::new(1.02, 1.231, "hit"))
            .unwrap_err();
        assert!(matches!(err, TextgridError::EntryNotFound { .. }));

        // labels are compared exactly
        assert!(tier.delete_entry(&Interval::new(1.33, 1.54, "A")).is_err());
    }

    #[test]
    fn test_find() {
        let tier = IntervalTier::new(
            "words",
            vec![
                Interval::new(0.0, 1.0, "cat"),
                Interval::new(1.0, 2.0, "catch"),
                Interval::new(2.0, 3.0, "dog"),
                Interval::new(3.0, 4.0, "cat"),
            ],
            None,
            None,
        )
        .unwrap();

        assert_eq!(tier.find("cat", FindMode::Exact).unwrap(), vec![0, 3]);
        assert_eq!(tier.find("cat", FindMode::Substring).unwrap(), vec![0, 1, 3]);
        assert_eq!(tier.find("^(dog|catch)$", FindMode::Regex).unwrap(), vec![1, 2]);
        assert!(matches!(
            tier.find("(", FindMode::Regex),
            Err(TextgridError::InvalidRegex(_))
        ));
    }

    #[test]
    fn test_approx_eq() {
        let tier = fixtures::interval_tier_1();
        let shifted = IntervalTier::new(
            "speaker 1",
            tier.entries()
                .iter()
                .map(|e| Interval::new(e.start + 0.1 - 0.1, e.end, e.label.clone()))
                .collect(),
            None,
            None,
        )
        .unwrap();
        assert!(tier.approx_eq(&shifted));
        assert!(!tier.approx_eq(&tier.renamed("speaker 2")));
        assert!(!AnyTier::from(tier).approx_eq(&fixtures::point_tier_1().into()));
    }
}
