use crate::types::entry::{Interval, Point, TimedEntry};
use crate::util::compare_entries_by_time;

struct Node<'a, E> {
    entry: &'a E,
    left: Option<usize>,
    right: Option<usize>,
}

/// Balanced binary tree over a snapshot of a tier's entries, keyed by start
/// time. Nodes live in an arena and borrow the entries they index.
pub struct SearchTree<'a, E> {
    nodes: Vec<Node<'a, E>>,
    root: Option<usize>,
}

impl<'a, E: TimedEntry> SearchTree<'a, E> {
    pub fn build(entries: &'a [E]) -> Self {
        let mut sorted: Vec<&'a E> = entries.iter().collect();
        sorted.sort_by(|a, b| compare_entries_by_time(*a, *b));

        let mut tree = Self {
            nodes: Vec::with_capacity(sorted.len()),
            root: None,
        };
        tree.root = tree.insert_median(&sorted);
        tree
    }

    fn insert_median(&mut self, slice: &[&'a E]) -> Option<usize> {
        if slice.is_empty() {
            return None;
        }

        let median = slice.len() / 2;
        let index = self.nodes.len();
        self.nodes.push(Node {
            entry: slice[median],
            left: None,
            right: None,
        });

        let left = self.insert_median(&slice[..median]);
        let right = self.insert_median(&slice[median + 1..]);
        self.nodes[index].left = left;
        self.nodes[index].right = right;
        Some(index)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&'a E> {
        self.root.map(|index| self.nodes[index].entry)
    }
}

impl<'a> SearchTree<'a, Interval> {
    /// The interval containing `time`, endpoints included.
    pub fn find_interval_at_time(&self, time: f64) -> Option<&'a Interval> {
        let mut current = self.root;
        while let Some(index) = current {
            let node = &self.nodes[index];
            if node.entry.start <= time && time <= node.entry.end {
                return Some(node.entry);
            }
            current = if node.entry.start > time {
                node.left
            } else {
                node.right
            };
        }
        None
    }
}

impl<'a> SearchTree<'a, Point> {
    /// The point at exactly `time`. With `find_closest`, falls back to the
    /// nearest point seen on the way down, preferring the earlier one on ties.
    pub fn find_point_at_time(&self, time: f64, find_closest: bool) -> Option<&'a Point> {
        let mut closest = self.root()?;
        let mut current = self.root;

        while let Some(index) = current {
            let node = &self.nodes[index];
            let new_diff = (node.entry.time - time).abs();
            let old_diff = (closest.time - time).abs();
            if new_diff < old_diff || (new_diff == old_diff && node.entry.time < closest.time) {
                closest = node.entry;
            }

            if node.entry.time == time {
                return Some(node.entry);
            }
            current = if node.entry.time > time {
                node.left
            } else {
                node.right
            };
        }

        find_closest.then_some(closest)
    }
}
