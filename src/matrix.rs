//! The output of [`crate::plane::Plane::pixel`]: a dense `stream × time
//! × key` grid ready for rendering.

use std::fmt;
use std::time::SystemTime;

use crate::error::MatrixError;

/// `Keys` (len `M+1`) and `Times` (len `N+1`) bound an `M × N` grid;
/// `Data[stream][time][key]` holds one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<V> {
    pub keys: Vec<String>,
    pub times: Vec<SystemTime>,
    pub data: Vec<Vec<Vec<V>>>,
}

impl<V> Matrix<V> {
    /// Validates that every stream's grid matches `Keys`/`Times` in shape.
    pub fn new(keys: Vec<String>, times: Vec<SystemTime>, data: Vec<Vec<Vec<V>>>) -> Result<Self, MatrixError> {
        if keys.len() < 2 {
            return Err(MatrixError::InvalidPartition {
                reason: "matrix requires at least two keys".into(),
            });
        }
        if times.len() < 2 {
            return Err(MatrixError::InvalidPartition {
                reason: "matrix requires at least two times".into(),
            });
        }
        let rows = times.len() - 1;
        let cols = keys.len() - 1;
        for stream in &data {
            if stream.len() != rows {
                return Err(MatrixError::InvalidPartition {
                    reason: format!("stream has {} time rows, expected {rows}", stream.len()),
                });
            }
            for row in stream {
                if row.len() != cols {
                    return Err(MatrixError::InvalidPartition {
                        reason: format!("row has {} columns, expected {cols}", row.len()),
                    });
                }
            }
        }
        Ok(Self { keys, times, data })
    }
}

impl<V: fmt::Display> fmt::Display for Matrix<V> {
    /// One line of keys, then one row per time bucket, tab-separated.
    /// Just enough structure to eyeball a grid in a test failure or a
    /// terminal demo, not a serialization format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "keys: {}", self.keys.join("\t"))?;
        for (s, stream) in self.data.iter().enumerate() {
            writeln!(f, "stream {s}:")?;
            for (t, row) in stream.iter().enumerate() {
                let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
                writeln!(f, "  t{t}: {}", cells.join("\t"))?;
            }
        }
        Ok(())
    }
}
