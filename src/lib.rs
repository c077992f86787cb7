//! # keyviz-matrix
//!
//! A merge/re-sampling engine for sparse, time-varying key-range metrics,
//! the kind of data a region-aware store produces when it reports
//! per-range traffic at staggered split/merge boundaries over time.
//!
//! ## Core types
//!
//! - [`chunk::Chunk`]: one metric stream over one key partition. Supports
//!   `reduce` (coarsen onto a sub-partition), `focus` (merge low-traffic
//!   buckets under a threshold), and `divide` (pick a partition landing
//!   near a target bucket count).
//! - [`axis::Axis`]: several streams sharing one key partition, plus
//!   `range` (clip to a key interval) and `shrink` (down-scale in place).
//! - [`plane::Plane`]: a time-ordered sequence of axes. `compact` folds
//!   them into one axis; `pixel` re-samples the whole plane onto a dense
//!   `time × key` grid.
//! - [`matrix::Matrix`]: the dense grid `pixel` produces.
//!
//! ## Example
//!
//! ```rust
//! use keyviz_matrix::Axis;
//!
//! let axis: Axis<u64> = Axis::new(
//!     vec!["a".into(), "c".into(), "e".into(), "g".into()],
//!     vec![vec![2, 3, 4]],
//! )
//! .unwrap();
//!
//! let clipped = axis.range("b", "f").unwrap();
//! assert_eq!(clipped.keys, vec!["a", "c", "e", "g"]);
//! ```
//!
//! ## Value kinds
//!
//! Every type here is generic over [`value::Value`], an additive monoid.
//! The crate ships one implementation, `u64`, for plain traffic counters.
//! Merge-threshold operations (`focus`, `divide`, `get_focus_rows`) need
//! the tighter `Value + Into<u64> + From<u64>` bound, since they compare
//! bucket magnitudes against a `u64` threshold; plain aggregation
//! (`new`, `reduce`, `sum`, `compact`) only needs `Value`.

pub mod axis;
pub mod chunk;
pub mod config;
pub mod error;
pub mod key;
pub mod matrix;
pub mod plane;
pub mod strategy;
pub mod value;

pub use axis::Axis;
pub use chunk::Chunk;
pub use config::DivideConfig;
pub use error::MatrixError;
pub use matrix::Matrix;
pub use plane::{Plane, PlaneAxis};
pub use strategy::{LabelStrategy, NaiveStrategy, Strategy};
pub use value::Value;
