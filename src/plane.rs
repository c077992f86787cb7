//! A time-ordered sequence of axes, folded into one axis by [`Plane::compact`]
//! or re-sampled into a [`crate::matrix::Matrix`] by [`Plane::pixel`].

use std::collections::BTreeSet;
use std::time::{Duration, SystemTime};

use crate::axis::Axis;
use crate::chunk::Chunk;
use crate::config::DivideConfig;
use crate::error::MatrixError;
use crate::matrix::Matrix;
use crate::strategy::Strategy;
use crate::value::Value;

/// One axis of a [`Plane`], valid over `[prev_end, end_time)` where
/// `prev_end` is the plane's `start_time` for the first axis, or the
/// previous axis's `end_time` otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneAxis<V> {
    pub axis: Axis<V>,
    pub end_time: SystemTime,
}

impl<V> PlaneAxis<V> {
    pub fn new(axis: Axis<V>, end_time: SystemTime) -> Self {
        Self { axis, end_time }
    }
}

/// `(StartTime, Axes)`: `Axes[i]` covers `[prev_end, Axes[i].EndTime)`.
/// Times are strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane<V> {
    pub start_time: SystemTime,
    pub axes: Vec<PlaneAxis<V>>,
}

impl<V: Value> Plane<V> {
    /// Validates that the plane has at least one axis, that end times are
    /// strictly increasing, and that every axis carries the same number
    /// of parallel streams.
    pub fn new(start_time: SystemTime, axes: Vec<PlaneAxis<V>>) -> Result<Self, MatrixError> {
        if axes.is_empty() {
            return Err(MatrixError::InvalidPartition {
                reason: "plane requires at least one axis".into(),
            });
        }
        let stream_count = axes[0].axis.values_list.len();
        let mut prev_end = start_time;
        for plane_axis in &axes {
            if plane_axis.axis.values_list.len() != stream_count {
                return Err(MatrixError::InvalidPartition {
                    reason: "every axis in a plane must carry the same number of streams".into(),
                });
            }
            if plane_axis.end_time <= prev_end {
                return Err(MatrixError::InvalidInterval {
                    start: format!("{prev_end:?}"),
                    end: format!("{:?}", plane_axis.end_time),
                });
            }
            prev_end = plane_axis.end_time;
        }
        Ok(Self { start_time, axes })
    }

    /// The ordered union of every axis's key partition: the first key is
    /// `""` if any axis starts at −∞, the last is `""` if any axis ends
    /// at +∞, and the interior keys are the sorted union of every axis's
    /// non-sentinel keys.
    fn union_keys(&self) -> Vec<String> {
        let mut has_neg_inf = false;
        let mut has_pos_inf = false;
        let mut regular: BTreeSet<String> = BTreeSet::new();

        for plane_axis in &self.axes {
            let keys = &plane_axis.axis.keys;
            let last = keys.len() - 1;
            for (idx, key) in keys.iter().enumerate() {
                if idx == 0 && key.is_empty() {
                    has_neg_inf = true;
                    continue;
                }
                if idx == last && key.is_empty() {
                    has_pos_inf = true;
                    continue;
                }
                regular.insert(key.clone());
            }
        }

        let mut result = Vec::with_capacity(regular.len() + 2);
        if has_neg_inf {
            result.push(String::new());
        }
        result.extend(regular);
        if has_pos_inf {
            result.push(String::new());
        }
        result
    }

    /// Folds `axes` onto `union_keys`: every axis bucket contributes its
    /// value, split by floor-division across however many `union_keys`
    /// sub-buckets it spans (the remainder of that division is dropped,
    /// not redistributed. See `DESIGN.md`'s Compact grounding note for
    /// the worked derivation of this rule against the authoritative S1
    /// fixture).
    fn fold_onto(
        axes: &[PlaneAxis<V>],
        union_keys: &[String],
        stream_count: usize,
    ) -> Result<Vec<Vec<V>>, MatrixError> {
        let has_neg_inf = union_keys.first().is_some_and(|k| k.is_empty());
        let has_pos_inf = union_keys.len() > 1 && union_keys.last().is_some_and(|k| k.is_empty());
        let bucket_count = union_keys.len().saturating_sub(1);
        let mut out = vec![vec![V::zero(); bucket_count]; stream_count];

        for plane_axis in axes {
            let axis = &plane_axis.axis;
            for (s, stream) in out.iter_mut().enumerate() {
                let values = &axis.values_list[s];
                for (i, value) in values.iter().enumerate() {
                    let lo = key_index(union_keys, has_neg_inf, has_pos_inf, &axis.keys[i], false)?;
                    let hi = key_index(union_keys, has_neg_inf, has_pos_inf, &axis.keys[i + 1], true)?;
                    if hi <= lo {
                        return Err(MatrixError::InvalidPartition {
                            reason: "axis bucket does not map to a forward span of the union partition".into(),
                        });
                    }
                    let mut share = *value;
                    share.scale_div((hi - lo) as u64);
                    for bucket in stream.iter_mut().take(hi).skip(lo) {
                        bucket.add_assign(&share);
                    }
                }
            }
        }
        Ok(out)
    }

    /// Folds the whole plane into one axis whose partition is the union
    /// of every axis's key partition, and whose values are the
    /// floor-split sums described by [`Self::fold_onto`].
    pub fn compact(&self) -> Result<(Axis<V>, SystemTime), MatrixError> {
        let stream_count = self.axes[0].axis.values_list.len();
        let union_keys = self.union_keys();
        let values = Self::fold_onto(&self.axes, &union_keys, stream_count)?;
        let axis = Axis::new(union_keys, values)?;
        let end_time = self.axes.last().expect("validated non-empty in Plane::new").end_time;
        Ok((axis, end_time))
    }
}

/// Looks up the union-partition index of `key`, treating `key == ""` as
/// the sentinel at the position (`is_end`) determines: the union's
/// first index when used as a bucket start, its last index when used as
/// a bucket end.
fn key_index(
    union_keys: &[String],
    has_neg_inf: bool,
    has_pos_inf: bool,
    key: &str,
    is_end: bool,
) -> Result<usize, MatrixError> {
    if key.is_empty() {
        return Ok(if is_end { union_keys.len() - 1 } else { 0 });
    }
    let lo = usize::from(has_neg_inf);
    let hi = union_keys.len() - usize::from(has_pos_inf);
    let slice = &union_keys[lo..hi];
    slice
        .binary_search_by(|k| k.as_str().cmp(key))
        .map(|pos| lo + pos)
        .map_err(|_| MatrixError::InvalidPartition {
            reason: format!("key {key:?} is not part of the union partition"),
        })
}

/// Merge-threshold operations needed for [`Plane::pixel`]'s key-axis
/// selection.
impl<V: Value + Into<u64> + From<u64>> Plane<V> {
    /// Re-samples the plane into an `N × M` grid.
    ///
    /// Time axis: `n + 1` instants evenly spanning
    /// `[start_time, last axis's end_time]` (equal-width buckets, not
    /// duration-weighted, see `SPEC_FULL.md §I`). Key axis: `Divide`
    /// applied to the full compaction, so every time row shares one key
    /// partition. Weighting is equal: an axis contributes in full to
    /// every time bucket it overlaps at all, and is never fractionally
    /// split across a time boundary.
    pub fn pixel<S: Strategy>(
        &self,
        n: usize,
        m: usize,
        strategy: &S,
        config: &DivideConfig,
    ) -> Result<Matrix<V>, MatrixError> {
        if n == 0 || m == 0 {
            return Err(MatrixError::InvalidPartition {
                reason: "pixel grid must have at least one row and one column".into(),
            });
        }

        let stream_count = self.axes[0].axis.values_list.len();
        let last_end_time = self.axes.last().expect("validated non-empty in Plane::new").end_time;

        let (full_axis, _) = self.compact()?;
        let key_partition = full_axis.divide(strategy, m, config);

        let total = last_end_time
            .duration_since(self.start_time)
            .map_err(|_| MatrixError::InvalidInterval {
                start: format!("{:?}", self.start_time),
                end: format!("{last_end_time:?}"),
            })?;
        let total_nanos = total.as_nanos();
        let times: Vec<SystemTime> = (0..=n)
            .map(|k| {
                let offset_nanos = (total_nanos * k as u128) / n as u128;
                self.start_time + Duration::from_nanos(offset_nanos.min(u64::MAX as u128) as u64)
            })
            .collect();

        let mut axis_starts = Vec::with_capacity(self.axes.len());
        let mut prev_end = self.start_time;
        for plane_axis in &self.axes {
            axis_starts.push(prev_end);
            prev_end = plane_axis.end_time;
        }

        let mut data: Vec<Vec<Vec<V>>> = vec![vec![Vec::new(); n]; stream_count];
        for t in 0..n {
            let bucket_start = times[t];
            let bucket_end = times[t + 1];
            let overlapping: Vec<PlaneAxis<V>> = self
                .axes
                .iter()
                .zip(axis_starts.iter())
                .filter(|(plane_axis, &axis_start)| {
                    axis_start < bucket_end && plane_axis.end_time > bucket_start
                })
                .map(|(plane_axis, _)| plane_axis.clone())
                .collect();

            let bucket_values = if overlapping.is_empty() {
                vec![vec![V::zero(); full_axis.keys.len() - 1]; stream_count]
            } else {
                Self::fold_onto(&overlapping, &full_axis.keys, stream_count)?
            };

            for (s, stream_values) in bucket_values.into_iter().enumerate() {
                let chunk = Chunk::new_unchecked(full_axis.keys.clone(), stream_values);
                let reduced = chunk.reduce(&key_partition)?;
                data[s][t] = reduced.values;
            }
        }

        Matrix::new(key_partition, times, data)
    }
}
