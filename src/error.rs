use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("invalid partition: {reason}")]
    InvalidPartition { reason: String },

    #[error("invalid interval: start {start:?} must be less than end {end:?}")]
    InvalidInterval { start: String, end: String },

    #[error("axis requires at least one value stream")]
    EmptyStreams,

    #[error("shrink ratio must be non-zero")]
    DivByZero,
}
