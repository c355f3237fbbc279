//! Reference annotations shared by the unit tests: two speakers saying
//! "Ichiro hit a homerun" and "and Fred caught it", with pitch readings and noises.

use crate::types::entry::{Interval, Point};
use crate::types::tier::{IntervalTier, PointTier};
use crate::Textgrid;

fn interval_tier(name: &str, entries: &[(f64, f64, &str)]) -> IntervalTier {
    IntervalTier::new(
        name,
        entries
            .iter()
            .map(|&(start, end, label)| Interval::new(start, end, label))
            .collect(),
        None,
        None,
    )
    .expect("fixture tier")
}

fn point_tier(name: &str, entries: &[(f64, &str)]) -> PointTier {
    PointTier::new(
        name,
        entries
            .iter()
            .map(|&(time, label)| Point::new(time, label))
            .collect(),
        None,
        None,
    )
    .expect("fixture tier")
}

pub fn interval_tier_1() -> IntervalTier {
    interval_tier(
        "speaker 1",
        &[
            (0.73, 1.02, "Ichiro"),
            (1.02, 1.231, "hit"),
            (1.33, 1.54, "a"),
            (1.54, 1.91, "homerun"),
        ],
    )
}

pub fn interval_tier_2() -> IntervalTier {
    interval_tier(
        "speaker 2",
        &[
            (3.56, 3.98, "and"),
            (3.98, 4.21, "Fred"),
            (4.21, 4.44, "caught"),
            (4.44, 4.53, "it"),
        ],
    )
}

pub fn point_tier_1() -> PointTier {
    point_tier(
        "pitch vals 1",
        &[(0.9, "120"), (1.11, "100"), (1.41, "110"), (1.79, "95")],
    )
}

pub fn point_tier_2() -> PointTier {
    point_tier(
        "pitch vals 2",
        &[(3.78, "140"), (4.11, "131"), (4.32, "135"), (4.49, "120")],
    )
}

pub fn noise_tier() -> PointTier {
    point_tier("noises", &[(2.29, "Door slam"), (2.99, "Cough")])
}

pub fn interval(start: f64, end: f64, label: &str) -> Interval {
    Interval::new(start, end, label)
}

pub fn point(time: f64, label: &str) -> Point {
    Point::new(time, label)
}

/// speaker 1, speaker 2, pitch vals 1, pitch vals 2, noises; bounds 0.73..4.53.
pub fn prefab_textgrid() -> Textgrid {
    let mut tg = Textgrid::new();
    tg.add_tier(interval_tier_1(), None).expect("fixture textgrid");
    tg.add_tier(interval_tier_2(), None).expect("fixture textgrid");
    tg.add_tier(point_tier_1(), None).expect("fixture textgrid");
    tg.add_tier(point_tier_2(), None).expect("fixture textgrid");
    tg.add_tier(noise_tier(), None).expect("fixture textgrid");
    tg
}
