use crate::types::entry::TimedEntry;
use std::cmp::Ordering;

/// Intervals shorter than this are dropped before saving, and adjacent
/// boundaries closer than this are snapped together.
pub const MIN_INTERVAL_LENGTH: f64 = 0.00000001;

/// Tolerant float equality with the default relative tolerance of `1e-14`.
pub fn is_close(a: f64, b: f64) -> bool {
    is_close_with(a, b, 1e-14, 0.0)
}

pub fn is_close_with(a: f64, b: f64, rel_tol: f64, abs_tol: f64) -> bool {
    (a - b).abs() <= (rel_tol * a.abs().max(b.abs())).max(abs_tol)
}

/// Touching endpoints are not an overlap.
pub fn intervals_overlap(first: (f64, f64), second: (f64, f64)) -> bool {
    first.1.min(second.1) - first.0.max(second.0) > 0.0
}

/// Orders entries by their first timestamp. Use with a stable sort.
pub fn compare_entries_by_time<E: TimedEntry>(a: &E, b: &E) -> Ordering {
    a.start().partial_cmp(&b.start()).unwrap_or(Ordering::Equal)
}

/// Renders a timestamp the way Praat-compatible tools print numbers:
/// shortest round-trip digits, exponent form outside `[1e-6, 1e21)`.
pub fn format_time(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude < 1e-6 || magnitude >= 1e21 {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        };
    }

    value.to_string()
}

#[cfg(test)]
pub fn assert_entries_close<E: TimedEntry>(actual: &[E], expected: &[E]) {
    let render = |entries: &[E]| entries.iter().map(|e| e.to_string()).collect::<Vec<_>>();
    assert_eq!(
        actual.len(),
        expected.len(),
        "length mismatch {} != {}, output={:?}",
        actual.len(),
        expected.len(),
        render(actual),
    );
    for (entry, expected_entry) in actual.iter().zip(expected.iter()) {
        let close = |a: f64, b: f64| is_close_with(a, b, 1e-14, 1e-9);
        assert!(
            close(entry.start(), expected_entry.start())
                && close(entry.end(), expected_entry.end())
                && entry.label() == expected_entry.label(),
            "{} != {}, output={:?}",
            entry,
            expected_entry,
            render(actual),
        );
    }
}
