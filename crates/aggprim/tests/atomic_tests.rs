use aggprim::{
    Accelerator, AtomicAccumulator, AtomicValue, ExecMode, HardwareAtomic, PlainReadModifyWrite,
    Sequential,
};
use std::sync::atomic::AtomicU64;

const N_THREADS: u64 = 8;
const PER_THREAD: u64 = 1000;

#[test]
fn concurrent_adds_are_linearizable() {
    let accum = AtomicAccumulator::new(HardwareAtomic);
    let cell = AtomicU64::new(0);
    let mut prev: Vec<u64> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..N_THREADS)
            .map(|_| {
                s.spawn(|| {
                    (0..PER_THREAD)
                        .map(|_| accum.fetch_and_add(&cell, 1_u64))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    let total = N_THREADS * PER_THREAD;
    assert_eq!(u64::load(&cell), total);
    // every intermediate value was observed by exactly one caller
    prev.sort_unstable();
    assert_eq!(prev, (0..total).collect::<Vec<_>>());
}

fn previous_values<M: ExecMode>(deltas: &[i32]) -> (Vec<i32>, i32) {
    let accum = M::accumulator();
    let cell = i32::new_cell(0);
    let prev = deltas
        .iter()
        .map(|d| accum.fetch_and_add(&cell, *d))
        .collect();
    (prev, i32::load(&cell))
}

#[test]
fn sequential_previous_values() {
    let expected = (vec![0, 3, 2], 6);
    assert_eq!(previous_values::<Sequential>(&[3, -1, 4]), expected);
    assert_eq!(previous_values::<Accelerator>(&[3, -1, 4]), expected);
}

#[test]
fn plain_strategy_is_not_atomic_but_correct_when_alone() {
    let accum = AtomicAccumulator::new(PlainReadModifyWrite);
    let cell = u64::new_cell(10);
    assert_eq!(accum.fetch_and_add(&cell, 5_u64), 10);
    assert_eq!(accum.fetch_and_add(&cell, u64::MAX), 15);
    assert_eq!(u64::load(&cell), 14);
}
