use keyviz_matrix::{Axis, Chunk, DivideConfig, NaiveStrategy, Plane, PlaneAxis};
use std::time::{Duration, SystemTime};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("keyviz-matrix - Basic Usage Example");
    println!("====================================");

    // A single stream's traffic over a key partition.
    println!("\nBuilding a chunk:");
    let chunk: Chunk<u64> = Chunk::new(
        vec!["a".into(), "b".into(), "c".into(), "d".into(), "e".into()],
        vec![1, 1, 1, 10],
    )?;
    println!("  sum = {}", chunk.sum());

    // Focus merges low-traffic buckets under a threshold.
    println!("\nFocusing with threshold=10, ratio=10, target=2:");
    let focused = chunk.focus(&NaiveStrategy, 10, 10, 2);
    println!("  keys   = {:?}", focused.keys);
    println!("  values = {:?}", focused.values);

    // Divide picks a partition landing near a target bucket count.
    println!("\nDividing toward target=2 buckets:");
    let cfg = DivideConfig::default();
    let divided = chunk.divide(&NaiveStrategy, 2, &cfg);
    println!("  keys = {divided:?}");

    // An axis bundles several parallel streams over one partition.
    println!("\nBuilding an axis with two streams (reads, writes):");
    let axis: Axis<u64> = Axis::new(
        vec!["a".into(), "c".into(), "e".into(), "g".into(), "i".into()],
        vec![vec![2, 3, 4, 1], vec![0, 5, 5, 0]],
    )?;
    let clipped = axis.range("c", "i")?;
    println!("  range(c, i) keys = {:?}", clipped.keys);

    // A plane folds several axes, sampled at different times, into one.
    println!("\nCompacting two time samples into one axis:");
    let now = SystemTime::now();
    let earlier = PlaneAxis::new(
        Axis::new(vec!["a".into(), "m".into(), "z".into()], vec![vec![4, 6]])?,
        now - Duration::from_secs(30),
    );
    let later = PlaneAxis::new(
        Axis::new(vec!["".into(), "m".into(), "z".into()], vec![vec![2, 8]])?,
        now,
    );
    let plane: Plane<u64> = Plane::new(now - Duration::from_secs(60), vec![earlier, later])?;
    let (compacted, end_time) = plane.compact()?;
    println!("  keys   = {:?}", compacted.keys);
    println!("  values = {:?}", compacted.values_list[0]);
    println!("  end_time = {end_time:?}");

    // Pixel re-samples the whole plane onto a dense time x key grid.
    println!("\nSampling a 2x3 pixel grid:");
    let matrix = plane.pixel(2, 3, &NaiveStrategy, &cfg)?;
    print!("{matrix}");

    println!("\nBasic usage demonstration complete!");
    Ok(())
}
