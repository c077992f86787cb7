//! A single metric stream over one key partition, the engine's core
//! matrix algebra.

use crate::config::DivideConfig;
use crate::error::MatrixError;
use crate::key::{check_part_of, check_strictly_increasing, keys_equal};
use crate::strategy::Strategy;
use crate::value::Value;

/// `Keys[0..n]` with `Values[0..n-1]`; `Values[i]` is the aggregate
/// metric attached to the half-open key range `[Keys[i], Keys[i+1])`.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk<V> {
    pub keys: Vec<String>,
    pub values: Vec<V>,
}

impl<V: Value> Chunk<V> {
    /// Validates `len(keys) == len(values) + 1`, `len(keys) >= 2`, and
    /// strictly increasing keys under the sentinel rule.
    pub fn new(keys: Vec<String>, values: Vec<V>) -> Result<Self, MatrixError> {
        if keys.len() < 2 {
            return Err(MatrixError::InvalidPartition {
                reason: "chunk requires at least two keys".into(),
            });
        }
        if keys.len() != values.len() + 1 {
            return Err(MatrixError::InvalidPartition {
                reason: format!(
                    "keys length {} must equal values length {} + 1",
                    keys.len(),
                    values.len()
                ),
            });
        }
        check_strictly_increasing(&keys)?;
        Ok(Self::new_unchecked(keys, values))
    }

    /// Builds a chunk without re-validating the partition invariant.
    /// Only used internally once the caller has already established the
    /// invariant (e.g. `reduce`/`focus` outputs whose keys are a
    /// verified sub-partition of an already-valid chunk).
    pub(crate) fn new_unchecked(keys: Vec<String>, values: Vec<V>) -> Self {
        Self { keys, values }
    }

    /// The sum of all bucket values, used to check mass conservation.
    pub fn sum(&self) -> V {
        let mut total = V::zero();
        for v in &self.values {
            total.add_assign(v);
        }
        total
    }

    /// Aggregates onto a coarser partition. `new_keys` must be part-of
    /// `self.keys` (§4.2). Each original bucket accumulates into the
    /// unique new bucket containing it.
    pub fn reduce(&self, new_keys: &[String]) -> Result<Chunk<V>, MatrixError> {
        check_part_of(&self.keys, new_keys)?;
        Ok(self.reduce_unchecked(new_keys))
    }

    /// Same algorithm as [`Self::reduce`] without the `part_of` check, for
    /// call sites that have already established the precondition
    /// structurally (e.g. [`crate::axis::Axis::focus`] reducing its
    /// non-base streams onto a partition it derived from this same
    /// chunk's keys).
    pub(crate) fn reduce_unchecked(&self, new_keys: &[String]) -> Chunk<V> {
        if new_keys.len() == self.keys.len() {
            return Chunk::new_unchecked(new_keys.to_vec(), self.values.clone());
        }

        let mut new_values = vec![V::zero(); new_keys.len() - 1];
        let end_keys = &new_keys[1..];
        let mut j = 0usize;
        for (i, value) in self.values.iter().enumerate() {
            if keys_equal(&self.keys[i], &end_keys[j]) {
                j += 1;
            }
            debug_assert!(
                j < new_values.len(),
                "reduce: new bucket index out of range, new_keys was not part-of self.keys"
            );
            new_values[j].add_assign(value);
        }
        Chunk::new_unchecked(new_keys.to_vec(), new_values)
    }
}

/// Threshold-driven operations. These compare bucket magnitudes against a
/// plain `u64` threshold, so they're only available for value kinds that
/// round-trip through `u64`, the default scalar counter, and anything
/// playing the same role. Richer value kinds (e.g. labeled vectors) keep
/// `new`/`reduce` but opt out of merge-threshold decisions.
impl<V: Value + Into<u64> + From<u64>> Chunk<V> {
    /// Predicts the bucket count `focus` would produce at `threshold`,
    /// ignoring `ratio` and `strategy`.
    pub fn get_focus_rows(&self, threshold: u64) -> usize {
        let mut count = 0usize;
        let mut start = 0usize;
        let mut bucket_sum: u64 = 0;

        for (i, value) in self.values.iter().enumerate() {
            let value: u64 = (*value).into();
            if (value >= threshold || bucket_sum >= threshold) && i > start {
                count += 1;
                start = i;
                bucket_sum = 0;
            }
            bucket_sum = bucket_sum.saturating_add(value);
        }
        if self.values.len() > start {
            count += 1;
        }
        count
    }

    /// Merges adjacent low-traffic buckets. A new bucket closes at
    /// position `i` when the current value or running sum saturates
    /// `threshold`, the merge has swallowed `ratio` originals, or
    /// `strategy` forbids crossing `Keys[i]`. `target` only pre-sizes
    /// the output buffers.
    pub fn focus<S: Strategy>(&self, strategy: &S, threshold: u64, ratio: usize, target: usize) -> Chunk<V> {
        let mut new_keys: Vec<String> = Vec::with_capacity(target + 1);
        let mut new_values: Vec<V> = Vec::with_capacity(target);
        new_keys.push(self.keys[0].clone());

        let mut start = 0usize;
        let mut bucket_sum = V::zero();

        for i in 0..self.values.len() {
            let value = self.values[i];
            let value_u64: u64 = value.into();
            let bucket_sum_u64: u64 = bucket_sum.into();
            let should_close = value_u64 >= threshold
                || bucket_sum_u64 >= threshold
                || i - start >= ratio
                || strategy.cross_border(&self.keys[start], &self.keys[i]);
            if should_close && i > start {
                new_keys.push(self.keys[i].clone());
                new_values.push(bucket_sum);
                start = i;
                bucket_sum = V::zero();
            }
            bucket_sum.add_assign(&value);
        }
        if self.values.len() > start {
            new_keys.push(self.keys[self.values.len()].clone());
            new_values.push(bucket_sum);
        }

        Chunk::new_unchecked(new_keys, new_values)
    }

    /// Picks a threshold (and derived ratio) so that `focus` produces
    /// approximately `target` buckets, via lower-bound binary search
    /// over `threshold ∈ [1, 1 + Σ Values]` on the monotone predicate
    /// `get_focus_rows(threshold) <= target_focus_rows`.
    pub fn divide<S: Strategy>(&self, strategy: &S, target: usize, config: &DivideConfig) -> Vec<String> {
        if target >= self.values.len() {
            return self.keys.clone();
        }

        let mut upper_threshold: u64 = 1;
        for value in &self.values {
            let value_u64: u64 = (*value).into();
            upper_threshold = upper_threshold.saturating_add(value_u64);
        }
        let mut lower_threshold: u64 = 1;
        let target_focus_rows = config.target_focus_rows(target);

        while lower_threshold < upper_threshold {
            let mid = lower_threshold + (upper_threshold - lower_threshold) / 2;
            if self.get_focus_rows(mid) > target_focus_rows {
                lower_threshold = mid + 1;
            } else {
                upper_threshold = mid;
            }
        }

        let threshold = lower_threshold;
        let focus_rows = self.get_focus_rows(threshold);
        let denom = target.saturating_sub(focus_rows).max(1);
        let ratio = self.values.len() / denom + 1;
        self.focus(strategy, threshold, ratio, target).keys
    }
}
