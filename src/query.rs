use crate::search_tree::SearchTree;
use crate::types::tier::{IntervalTier, PointTier};

impl PointTier {
    /// The `(time, value)` rows whose time is exactly the time of some point.
    pub fn values_at_points<'d, V>(&self, data: &'d [(f64, V)]) -> Vec<&'d (f64, V)> {
        let tree = SearchTree::build(self.entries());
        data.iter()
            .filter(|(time, _)| tree.find_point_at_time(*time, false).is_some())
            .collect()
    }
}

impl IntervalTier {
    /// The `(time, value)` rows whose time falls inside some interval.
    pub fn values_in_intervals<'d, V>(&self, data: &'d [(f64, V)]) -> Vec<&'d (f64, V)> {
        let tree = SearchTree::build(self.entries());
        data.iter()
            .filter(|(time, _)| tree.find_interval_at_time(*time).is_some())
            .collect()
    }
}
