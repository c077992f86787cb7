//! Key comparison helpers.
//!
//! Keys are opaque lexicographic byte strings. The empty string is a
//! sentinel meaning "+∞" when it appears as the last key of a partition,
//! and "−∞" when it appears as the first. The latter needs no special
//! casing because `""` already sorts first under plain byte order.

use crate::error::MatrixError;

/// Byte-wise key equality. Sentinel position never matters for equality.
pub fn keys_equal(a: &str, b: &str) -> bool {
    a == b
}

/// Plain lexicographic `a < b`, with no sentinel handling. Use this when
/// neither key can be the terminal key of a partition.
pub fn key_less(a: &str, b: &str) -> bool {
    a < b
}

/// `a < b` where `b` is (or may be) the last key of a partition: an empty
/// `b` is treated as +∞, so any non-sentinel `a` sorts before it. Two
/// sentinels in the last position are equal, not less.
pub fn key_less_as_last(a: &str, b: &str) -> bool {
    if b.is_empty() {
        !a.is_empty()
    } else {
        a < b
    }
}

/// The last key of a partition, with its +∞ meaning intact (empty means
/// unbounded).
pub fn last_key(keys: &[String]) -> &str {
    keys.last().map(String::as_str).unwrap_or("")
}

/// `key >= endKey` under the sentinel rule used for range queries:
/// `endKey == ""` means +∞, so nothing is ever `>=` it except another
/// sentinel.
pub fn at_or_past_end(key: &str, end_key: &str) -> bool {
    if end_key.is_empty() {
        key.is_empty()
    } else {
        key >= end_key
    }
}

/// Validates that `child` is a sub-partition of `parent`: every key in
/// `child` occurs in `parent`, in the same order, and the two share
/// identical first and last keys.
pub fn check_part_of(parent: &[String], child: &[String]) -> Result<(), MatrixError> {
    if parent.len() < 2 {
        return Err(MatrixError::InvalidPartition {
            reason: "parent partition must have at least two keys".into(),
        });
    }
    if child.len() < 2 {
        return Err(MatrixError::InvalidPartition {
            reason: "child partition must have at least two keys".into(),
        });
    }
    if child[0] != parent[0] {
        return Err(MatrixError::InvalidPartition {
            reason: "child and parent must share a first key".into(),
        });
    }
    if child.last() != parent.last() {
        return Err(MatrixError::InvalidPartition {
            reason: "child and parent must share a last key".into(),
        });
    }

    let mut pi = 0;
    for ck in child {
        while pi < parent.len() && parent[pi] != *ck {
            pi += 1;
        }
        if pi == parent.len() {
            return Err(MatrixError::InvalidPartition {
                reason: format!("child key {ck:?} does not occur in parent partition in order"),
            });
        }
        pi += 1;
    }
    Ok(())
}

/// Checks that `keys` is strictly increasing under the sentinel rule
/// (the first key may be `""` meaning −∞; the last key may be `""`
/// meaning +∞; no other key may be empty).
pub fn check_strictly_increasing(keys: &[String]) -> Result<(), MatrixError> {
    let n = keys.len();
    for i in 0..n.saturating_sub(1) {
        if i > 0 && keys[i].is_empty() {
            return Err(MatrixError::InvalidPartition {
                reason: format!("key at index {i} is empty but is not the last key"),
            });
        }
        let ordered = if i + 1 == n - 1 {
            key_less_as_last(&keys[i], &keys[i + 1])
        } else {
            key_less(&keys[i], &keys[i + 1])
        };
        if !ordered {
            return Err(MatrixError::InvalidPartition {
                reason: format!(
                    "keys must be strictly increasing, found {:?} >= {:?} at index {i}",
                    keys[i],
                    keys[i + 1]
                ),
            });
        }
    }
    Ok(())
}
