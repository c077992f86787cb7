//! Black-box invariant and scenario tests driving the crate only through
//! its public API.

use keyviz_matrix::strategy::{LabelStrategy, NaiveStrategy};
use keyviz_matrix::{Axis, Chunk, DivideConfig, MatrixError, Plane, PlaneAxis};
use std::time::{Duration, SystemTime};

fn keys(ks: &[&str]) -> Vec<String> {
    ks.iter().map(|s| s.to_string()).collect()
}

fn t(seconds_ago: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000 - seconds_ago)
}

// ============================================================================
// INVARIANT 1: PARTITION SHAPE
// ============================================================================

#[test]
fn invariant_partition_rejects_length_mismatch() {
    let result: Result<Chunk<u64>, _> = Chunk::new(keys(&["a", "b", "c"]), vec![1]);
    assert!(matches!(result, Err(MatrixError::InvalidPartition { .. })));
}

#[test]
fn invariant_partition_rejects_non_increasing_keys() {
    let result: Result<Chunk<u64>, _> = Chunk::new(keys(&["a", "a", "c"]), vec![1, 2]);
    assert!(result.is_err());
}

// ============================================================================
// INVARIANT 2 & 3: MASS CONSERVATION AND IDEMPOTENCE UNDER REDUCE
// ============================================================================

#[test]
fn invariant_reduce_conserves_mass_across_many_partitions() {
    let c: Chunk<u64> = Chunk::new(keys(&["a", "c", "e", "g", "i", "k"]), vec![2, 3, 4, 1, 7]).unwrap();
    for new_keys in [
        keys(&["a", "e", "k"]),
        keys(&["a", "g", "k"]),
        keys(&["a", "i", "k"]),
        keys(&["a", "k"]),
    ] {
        let reduced = c.reduce(&new_keys).unwrap();
        assert_eq!(reduced.sum(), c.sum());
    }
}

#[test]
fn invariant_reduce_onto_own_keys_is_identity() {
    let c: Chunk<u64> = Chunk::new(keys(&["a", "c", "e", "g"]), vec![2, 3, 4]).unwrap();
    let reduced = c.reduce(&c.keys.clone()).unwrap();
    assert_eq!(reduced, c);
}

// ============================================================================
// INVARIANT 4: FOCUS CONSERVES MASS
// ============================================================================

#[test]
fn invariant_focus_conserves_mass_across_parameters() {
    let c: Chunk<u64> = Chunk::new(keys(&["a", "b", "c", "d", "e", "f", "g"]), vec![3, 0, 6, 0, 9, 2]).unwrap();
    for threshold in [0u64, 1, 5, 20, 1000] {
        for ratio in [1usize, 3, 100] {
            for target in [0usize, 2, 6] {
                let focused = c.focus(&NaiveStrategy, threshold, ratio, target);
                assert_eq!(focused.sum(), c.sum());
            }
        }
    }
}

// ============================================================================
// INVARIANT 5: GETFOCUSROWS IS MONOTONE (NON-INCREASING) IN THRESHOLD
// ============================================================================

#[test]
fn invariant_get_focus_rows_is_monotone() {
    let c: Chunk<u64> = Chunk::new(keys(&["a", "b", "c", "d", "e", "f", "g"]), vec![3, 0, 6, 0, 9, 2]).unwrap();
    let mut prev = c.get_focus_rows(0);
    for threshold in 1..50 {
        let rows = c.get_focus_rows(threshold);
        assert!(rows <= prev, "focus rows rose from {prev} to {rows} as threshold increased");
        prev = rows;
    }
}

// ============================================================================
// INVARIANT 6: DIVIDE LANDS NEAR THE TARGET BUCKET COUNT
// ============================================================================

#[test]
fn invariant_divide_lands_near_target() {
    let cfg = DivideConfig::default();
    for target in [2usize, 4, 6, 10] {
        let values: Vec<u64> = (0..30).map(|i| if i % 7 == 0 { 50 } else { 1 }).collect();
        let key_list: Vec<String> = (0..=values.len()).map(|i| format!("k{i:03}")).collect();
        let c: Chunk<u64> = Chunk::new(key_list, values).unwrap();
        let divided = c.divide(&NaiveStrategy, target, &cfg);
        let buckets = divided.len() - 1;
        assert!(
            buckets <= target + target / 2 + 2,
            "divide({target}) produced {buckets} buckets, too far from target"
        );
        assert!(buckets >= 1);
    }
}

// ============================================================================
// INVARIANT 7: RANGE CLOSURE ON A FULLY-COVERED INTERVAL
// ============================================================================

#[test]
fn invariant_range_closure_on_covered_interval() {
    let axis: Axis<u64> = Axis::new(keys(&["a", "c", "e", "g", "i"]), vec![vec![1, 2, 3, 4]]).unwrap();
    let clipped = axis.range("c", "i").unwrap();
    assert_eq!(clipped.keys, keys(&["c", "e", "g", "i"]));
    assert_eq!(clipped.values_list[0], vec![2, 3, 4]);
}

// ============================================================================
// INVARIANT 8: CROSS-BORDER STRATEGY RESPECTED BY FOCUS
// ============================================================================

#[test]
fn invariant_focus_never_merges_across_a_forbidden_border() {
    let c: Chunk<u64> = Chunk::new(keys(&["a", "b", "c", "d", "e", "f"]), vec![1, 1, 1, 1, 1]).unwrap();
    let strategy = LabelStrategy::new(vec!["d".to_string()]);
    let focused = c.focus(&strategy, 1000, 1000, 1);
    assert!(
        focused.keys.contains(&"d".to_string()),
        "a forbidden border must survive as a bucket boundary: {:?}",
        focused.keys
    );
}

// ============================================================================
// S1: PLANE.COMPACT (AUTHORITATIVE REPOSITORY FIXTURE)
// ============================================================================

#[test]
fn s1_plane_compact_matches_authoritative_fixture() {
    let times = [20u64, 15, 10, 5, 0];
    let rows: [(Vec<&str>, Vec<u64>); 4] = [
        (vec!["a", "z"], vec![0]),
        (vec!["", "b", "f", "h", "i"], vec![1, 5, 4, 10]),
        (vec!["a", "d", "i", "n", "q"], vec![5, 0, 1, 6]),
        (vec!["", "e", "i", "k", "n"], vec![0, 3, 7, 9]),
    ];

    let axes = rows
        .iter()
        .enumerate()
        .map(|(i, (ks, vs))| {
            let axis: Axis<u64> = Axis::new(keys(ks), vec![vs.clone()]).unwrap();
            PlaneAxis::new(axis, t(times[i + 1]))
        })
        .collect();

    let plane: Plane<u64> = Plane::new(t(times[0]), axes).unwrap();
    let (compacted, _) = plane.compact().unwrap();

    assert_eq!(
        compacted.keys,
        keys(&["", "a", "b", "d", "e", "f", "h", "i", "k", "n", "q", "z"])
    );
    assert_eq!(compacted.values_list[0], vec![0, 2, 3, 1, 2, 5, 11, 7, 9, 6, 0]);
}

// ============================================================================
// S2-S6: CORE ALGORITHM SCENARIOS FROM THE SPECIFICATION
// ============================================================================

#[test]
fn s2_chunk_reduce() {
    let c: Chunk<u64> = Chunk::new(keys(&["a", "c", "e", "g"]), vec![2, 3, 4]).unwrap();
    let reduced = c.reduce(&keys(&["a", "e", "g"])).unwrap();
    assert_eq!(reduced.values, vec![5, 4]);
}

#[test]
fn s3_chunk_focus_without_strategy_wall() {
    let c: Chunk<u64> = Chunk::new(keys(&["a", "b", "c", "d", "e"]), vec![1, 1, 1, 10]).unwrap();
    let focused = c.focus(&NaiveStrategy, 10, 10, 2);
    assert_eq!(focused.keys, keys(&["a", "d", "e"]));
    assert_eq!(focused.values, vec![3, 10]);
}

#[test]
fn s4_chunk_get_focus_rows() {
    let c: Chunk<u64> = Chunk::new(keys(&["a", "b", "c", "d", "e"]), vec![1, 1, 1, 10]).unwrap();
    assert_eq!(c.get_focus_rows(10), 2);
    assert_eq!(c.get_focus_rows(1), 4);
    assert_eq!(c.get_focus_rows(100), 1);
}

#[test]
fn s5_axis_range() {
    let axis: Axis<u64> = Axis::new(keys(&["a", "c", "e", "g"]), vec![vec![1, 2, 3]]).unwrap();
    let r = axis.range("b", "f").unwrap();
    assert_eq!(r.keys, keys(&["a", "c", "e", "g"]));
    assert_eq!(r.values_list[0], vec![1, 2, 3]);
}

#[test]
fn s6_axis_range_disjoint() {
    let axis: Axis<u64> = Axis::new(keys(&["a", "c", "e", "g"]), vec![vec![1, 2, 3]]).unwrap();
    let r = axis.range("x", "z").unwrap();
    assert_eq!(r.keys, keys(&["x", "z"]));
    assert_eq!(r.values_list[0], vec![0]);
}

// ============================================================================
// END-TO-END: PLANE -> PIXEL GRID
// ============================================================================

#[test]
fn plane_pixel_produces_a_dense_grid_covering_the_full_interval() {
    let axes = vec![
        PlaneAxis::new(
            Axis::new(keys(&["a", "m", "z"]), vec![vec![4, 6]]).unwrap(),
            t(30),
        ),
        PlaneAxis::new(
            Axis::new(keys(&["", "m", "z"]), vec![vec![2, 8]]).unwrap(),
            t(0),
        ),
    ];
    let plane: Plane<u64> = Plane::new(t(60), axes).unwrap();
    let cfg = DivideConfig::default();
    let matrix = plane.pixel(3, 2, &NaiveStrategy, &cfg).unwrap();

    assert_eq!(matrix.times.len(), 4);
    assert_eq!(matrix.data[0].len(), 3);
    for row in &matrix.data[0] {
        assert_eq!(row.len(), matrix.keys.len() - 1);
    }
}
