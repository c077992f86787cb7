//! A parallel bundle of chunks sharing one key partition.

use crate::chunk::Chunk;
use crate::config::DivideConfig;
use crate::error::MatrixError;
use crate::key::{at_or_past_end, check_strictly_increasing, last_key};
use crate::strategy::Strategy;
use crate::value::Value;

/// `(Keys, ValuesList)`: `ValuesList[0]` is the base stream and drives
/// merge decisions in [`Axis::focus`]; every other stream follows the
/// same partition choices.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis<V> {
    pub keys: Vec<String>,
    pub values_list: Vec<Vec<V>>,
}

impl<V: Value> Axis<V> {
    /// Validates the shared-partition invariant across every stream.
    pub fn new(keys: Vec<String>, values_list: Vec<Vec<V>>) -> Result<Self, MatrixError> {
        if keys.len() < 2 {
            return Err(MatrixError::InvalidPartition {
                reason: "axis requires at least two keys".into(),
            });
        }
        if values_list.is_empty() {
            return Err(MatrixError::EmptyStreams);
        }
        for values in &values_list {
            if keys.len() != values.len() + 1 {
                return Err(MatrixError::InvalidPartition {
                    reason: format!(
                        "keys length {} must equal values length {} + 1",
                        keys.len(),
                        values.len()
                    ),
                });
            }
        }
        check_strictly_increasing(&keys)?;
        Ok(Self::new_unchecked(keys, values_list))
    }

    pub(crate) fn new_unchecked(keys: Vec<String>, values_list: Vec<Vec<V>>) -> Self {
        Self { keys, values_list }
    }

    /// A `[start_key, end_key)` axis with `n` streams, each holding a
    /// single zero bucket. `n` must be at least one.
    pub fn empty(start_key: &str, end_key: &str, n: usize) -> Result<Self, MatrixError> {
        let keys = vec![start_key.to_string(), end_key.to_string()];
        let values_list = vec![vec![V::zero()]; n];
        Self::new(keys, values_list)
    }

    /// Integer-divides every value of every stream by `ratio`, in place.
    pub fn shrink(&mut self, ratio: u64) -> Result<(), MatrixError> {
        if ratio == 0 {
            return Err(MatrixError::DivByZero);
        }
        for values in &mut self.values_list {
            for value in values.iter_mut() {
                value.scale_div(ratio);
            }
        }
        Ok(())
    }

    /// The sub-axis covering `[start_key, end_key)`. `end_key == ""`
    /// means +∞. Disjoint ranges return an empty axis over the
    /// requested interval.
    pub fn range(&self, start_key: &str, end_key: &str) -> Result<Axis<V>, MatrixError> {
        if !end_key.is_empty() && start_key >= end_key {
            return Err(MatrixError::InvalidInterval {
                start: start_key.to_string(),
                end: end_key.to_string(),
            });
        }

        let stream_count = self.values_list.len();

        if !end_key.is_empty() && end_key <= self.keys[0].as_str() {
            return Axis::empty(start_key, end_key, stream_count);
        }
        let axis_end_key = last_key(&self.keys);
        if !axis_end_key.is_empty() && start_key >= axis_end_key {
            return Axis::empty(start_key, end_key, stream_count);
        }

        let keys_len = self.keys.len();
        let sorted_keys_len = if axis_end_key.is_empty() {
            keys_len - 1
        } else {
            keys_len
        };

        let mut start = self.keys[..sorted_keys_len].partition_point(|k| k.as_str() <= start_key);
        if start > 0 {
            start -= 1;
        }

        let end = if end_key.is_empty() {
            keys_len - 1
        } else {
            let mut e =
                self.keys[..sorted_keys_len].partition_point(|k| !at_or_past_end(k, end_key));
            if e == keys_len {
                e -= 1;
            }
            e
        };

        let keys = self.keys[start..=end].to_vec();
        let values_list = self
            .values_list
            .iter()
            .map(|values| values[start..end].to_vec())
            .collect();
        Axis::new(keys, values_list)
    }
}

/// Merge-threshold operations, available for value kinds that round-trip
/// through `u64`. See [`crate::chunk::Chunk`]'s matching impl block.
impl<V: Value + Into<u64> + From<u64>> Axis<V> {
    /// Coarsens the partition: `Focus`es the base stream, then
    /// re-projects every other stream onto the chosen partition via
    /// [`Chunk::reduce`].
    pub fn focus<S: Strategy>(&self, strategy: &S, threshold: u64, ratio: usize, target: usize) -> Axis<V> {
        if target >= self.keys.len() - 1 {
            return self.clone();
        }

        let base_chunk = Chunk::new_unchecked(self.keys.clone(), self.values_list[0].clone());
        let new_chunk = base_chunk.focus(strategy, threshold, ratio, target);

        let mut new_values_list = Vec::with_capacity(self.values_list.len());
        new_values_list.push(new_chunk.values.clone());
        for stream in &self.values_list[1..] {
            let chunk = Chunk::new_unchecked(self.keys.clone(), stream.clone());
            let reduced = chunk.reduce_unchecked(&new_chunk.keys);
            new_values_list.push(reduced.values);
        }
        Axis::new_unchecked(new_chunk.keys, new_values_list)
    }

    /// Selects a partition of approximately `target` buckets by running
    /// [`Chunk::divide`] on the base stream.
    pub fn divide<S: Strategy>(&self, strategy: &S, target: usize, config: &DivideConfig) -> Vec<String> {
        let base_chunk = Chunk::new_unchecked(self.keys.clone(), self.values_list[0].clone());
        base_chunk.divide(strategy, target, config)
    }
}
