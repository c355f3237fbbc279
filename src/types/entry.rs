use crate::types::policy::{CropMode, InsertSpacePolicy};
use crate::util::{format_time, intervals_overlap, is_close};
use crate::{Result, TextgridError};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TierKind {
    Interval,
    Point,
}

impl TierKind {
    /// Class name used in TextGrid files.
    pub fn class_name(&self) -> &'static str {
        match self {
            TierKind::Interval => "IntervalTier",
            TierKind::Point => "TextTier",
        }
    }

    pub fn article_name(&self) -> &'static str {
        match self {
            TierKind::Interval => "an interval tier",
            TierKind::Point => "a point tier",
        }
    }
}

impl fmt::Display for TierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class_name())
    }
}

impl FromStr for TierKind {
    type Err = TextgridError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "IntervalTier" => Ok(TierKind::Interval),
            "TextTier" => Ok(TierKind::Point),
            _ => Err(TextgridError::InvalidArgument {
                value: s.to_string(),
                expected: &["IntervalTier", "TextTier"],
            }),
        }
    }
}

/// A labelled span of time.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
    pub label: String,
}

impl Interval {
    pub fn new(start: f64, end: f64, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A labelled instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub time: f64,
    pub label: String,
}

impl Point {
    pub fn new(time: f64, label: impl Into<String>) -> Self {
        Self {
            time,
            label: label.into(),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{},{},{}]",
            format_time(self.start),
            format_time(self.end),
            self.label
        )
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", format_time(self.time), self.label)
    }
}

/// Either kind of entry, used where both variants travel together (errors, mixed listings).
#[derive(Debug, Clone, PartialEq)]
pub enum AnyEntry {
    Interval(Interval),
    Point(Point),
}

impl fmt::Display for AnyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyEntry::Interval(interval) => interval.fmt(f),
            AnyEntry::Point(point) => point.fmt(f),
        }
    }
}

impl From<Interval> for AnyEntry {
    fn from(interval: Interval) -> Self {
        AnyEntry::Interval(interval)
    }
}

impl From<Point> for AnyEntry {
    fn from(point: Point) -> Self {
        AnyEntry::Point(point)
    }
}

/// Behaviour shared by the entries of a tier. The tier algorithms are written
/// once against this trait; only the geometry differs between variants.
pub trait TimedEntry: Clone + fmt::Debug + fmt::Display + PartialEq + Into<AnyEntry> {
    const KIND: TierKind;

    /// Start time, or the time of a point.
    fn start(&self) -> f64;

    /// End time, or the time of a point.
    fn end(&self) -> f64;

    fn label(&self) -> &str;

    /// Builds an entry covering `start..end`. Points only use `start`.
    fn spanning(start: f64, end: f64, label: String) -> Self;

    fn shifted(&self, offset: f64) -> Self;

    /// Times compared with [`is_close`], labels exactly.
    fn approx_eq(&self, other: &Self) -> bool;

    /// Whether inserting `other` conflicts with this entry.
    fn collides_with(&self, other: &Self) -> bool;

    /// The part of this entry kept when cropping to `start..end`, or `None`.
    fn cropped(&self, start: f64, end: f64, mode: CropMode) -> Option<Self>;

    /// The entry after `duration` seconds of silence are inserted at `start`.
    fn with_space_inserted(&self, start: f64, duration: f64, policy: InsertSpacePolicy)
    -> Vec<Self>;

    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl TimedEntry for Interval {
    const KIND: TierKind = TierKind::Interval;

    fn start(&self) -> f64 {
        self.start
    }

    fn end(&self) -> f64 {
        self.end
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn spanning(start: f64, end: f64, label: String) -> Self {
        Interval::new(start, end, label)
    }

    fn shifted(&self, offset: f64) -> Self {
        Interval::new(self.start + offset, self.end + offset, self.label.clone())
    }

    fn approx_eq(&self, other: &Self) -> bool {
        is_close(self.start, other.start)
            && is_close(self.end, other.end)
            && self.label == other.label
    }

    fn collides_with(&self, other: &Self) -> bool {
        intervals_overlap((self.start, self.end), (other.start, other.end))
    }

    fn cropped(&self, crop_start: f64, crop_end: f64, mode: CropMode) -> Option<Self> {
        if self.end <= crop_start || self.start >= crop_end {
            return None;
        }

        let starts_inside = self.start >= crop_start;
        let ends_inside = self.end <= crop_end;

        if (starts_inside && ends_inside) || mode == CropMode::Lax {
            return Some(self.clone());
        }
        if mode != CropMode::Truncated {
            return None;
        }

        let start = if starts_inside { self.start } else { crop_start };
        let end = if ends_inside { self.end } else { crop_end };
        Some(Interval::new(start, end, self.label.clone()))
    }

    fn with_space_inserted(
        &self,
        start: f64,
        duration: f64,
        policy: InsertSpacePolicy,
    ) -> Vec<Self> {
        if self.end <= start {
            return vec![self.clone()];
        }
        if self.start >= start {
            return vec![self.shifted(duration)];
        }

        // straddles the insertion point
        match policy {
            InsertSpacePolicy::Stretch => vec![Interval::new(
                self.start,
                self.end + duration,
                self.label.clone(),
            )],
            InsertSpacePolicy::Split => {
                let moved_start = start + duration;
                vec![
                    Interval::new(self.start, start, self.label.clone()),
                    Interval::new(
                        moved_start,
                        moved_start + (self.end - start),
                        self.label.clone(),
                    ),
                ]
            }
            InsertSpacePolicy::NoChange => vec![self.clone()],
        }
    }

    fn validate(&self) -> Result<()> {
        if self.start >= self.end {
            return Err(TextgridError::TierCreation(format!(
                "interval {} must start before it ends",
                self
            )));
        }
        Ok(())
    }
}

impl TimedEntry for Point {
    const KIND: TierKind = TierKind::Point;

    fn start(&self) -> f64 {
        self.time
    }

    fn end(&self) -> f64 {
        self.time
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn spanning(start: f64, _end: f64, label: String) -> Self {
        Point::new(start, label)
    }

    fn shifted(&self, offset: f64) -> Self {
        Point::new(self.time + offset, self.label.clone())
    }

    fn approx_eq(&self, other: &Self) -> bool {
        is_close(self.time, other.time) && self.label == other.label
    }

    fn collides_with(&self, other: &Self) -> bool {
        is_close(self.time, other.time)
    }

    fn cropped(&self, crop_start: f64, crop_end: f64, _mode: CropMode) -> Option<Self> {
        (crop_start <= self.time && self.time <= crop_end).then(|| self.clone())
    }

    fn with_space_inserted(
        &self,
        start: f64,
        duration: f64,
        _policy: InsertSpacePolicy,
    ) -> Vec<Self> {
        if self.time <= start {
            vec![self.clone()]
        } else {
            vec![self.shifted(duration)]
        }
    }
}
