//! Tunable constants for [`crate::chunk::Chunk::divide`] /
//! [`crate::axis::Axis::divide`].
//!
//! The spec's `targetFocusRows = target * 2 / 3` split and the
//! `ratio = len/(target-focusRows) + 1` formula are documented in the
//! original source as heuristics; this struct makes them overridable
//! instead of hard-coded.

use crate::error::MatrixError;

/// Parameters governing how [`crate::chunk::Chunk::divide`] turns a
/// bucket-count target into a merge threshold and ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DivideConfig {
    focus_row_numerator: u64,
    focus_row_denominator: u64,
}

impl DivideConfig {
    /// Numerator and denominator of the fraction of `target` used as the
    /// intermediate `GetFocusRows` ceiling during threshold search.
    /// `denominator` must be non-zero.
    pub fn new(focus_row_numerator: u64, focus_row_denominator: u64) -> Result<Self, MatrixError> {
        if focus_row_denominator == 0 {
            return Err(MatrixError::DivByZero);
        }
        Ok(Self {
            focus_row_numerator,
            focus_row_denominator,
        })
    }

    /// The target row count used to drive the threshold binary search:
    /// `target * numerator / denominator`.
    pub fn target_focus_rows(&self, target: usize) -> usize {
        ((target as u64) * self.focus_row_numerator / self.focus_row_denominator) as usize
    }
}

impl Default for DivideConfig {
    fn default() -> Self {
        Self {
            focus_row_numerator: 2,
            focus_row_denominator: 3,
        }
    }
}
