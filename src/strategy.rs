//! Pluggable predicates deciding which key boundaries a merge must not
//! cross.

/// Decides whether two keys lie on opposite sides of a semantic boundary
/// that [`crate::chunk::Chunk::focus`] must not bridge by merging.
pub trait Strategy {
    /// Returns `true` if `a` and `b` must not be merged into the same
    /// output bucket.
    fn cross_border(&self, a: &str, b: &str) -> bool;
}

/// No boundaries: merging is free to combine any adjacent buckets.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveStrategy;

impl Strategy for NaiveStrategy {
    fn cross_border(&self, _a: &str, _b: &str) -> bool {
        false
    }
}

/// Forbids merges across configured zone boundaries (e.g. namespace
/// prefixes). `boundaries` holds the first key of every zone after the
/// first, in ascending order.
#[derive(Debug, Clone, Default)]
pub struct LabelStrategy {
    boundaries: Vec<String>,
}

impl LabelStrategy {
    pub fn new(mut boundaries: Vec<String>) -> Self {
        boundaries.sort();
        Self { boundaries }
    }

    fn zone_of(&self, key: &str) -> usize {
        self.boundaries.partition_point(|b| b.as_str() <= key)
    }
}

impl Strategy for LabelStrategy {
    fn cross_border(&self, a: &str, b: &str) -> bool {
        self.zone_of(a) != self.zone_of(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_strategy_never_crosses() {
        let s = NaiveStrategy;
        assert!(!s.cross_border("a", "z"));
    }

    #[test]
    fn label_strategy_separates_zones() {
        let s = LabelStrategy::new(vec!["m".to_string()]);
        assert!(!s.cross_border("a", "b"));
        assert!(!s.cross_border("m", "z"));
        assert!(s.cross_border("a", "m"));
        assert!(s.cross_border("a", "z"));
    }
}
