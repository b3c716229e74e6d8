//! Planning and driving 1D kernel launches.
//!
//! [`plan`] turns an input size into [`LaunchDims`] by asking an
//! [`OccupancyModel`] about the kernel. The executors in this module then
//! run a kernel body over every thread of that grid on the host. A real
//! accelerator backend does the equivalent with the runtime's launch call.
//!
//! Kernel bodies should be written as grid-stride loops (see
//! [`ThreadIndex::grid_stride_range`]), since the grid may be clamped well
//! below the number of elements.

use crate::error::{Error, check_runtime};
use aggprim_nostd_internal::{LaunchDims, OccupancyModel};
use std::iter::StepBy;
use std::num::NonZeroUsize;
use std::ops::Range;
use std::sync::atomic::{AtomicU32, Ordering};

/// Compute the launch dimensions for running `kernel` over `size` elements.
///
/// Any failure of the occupancy query is treated as a runtime error.
pub fn plan<K, M>(size: usize, kernel: &K, model: &M) -> Result<LaunchDims, Error>
where
    K: ?Sized,
    M: OccupancyModel<K>,
    M::Error: core::fmt::Display,
{
    let occupancy = check_runtime(
        model.max_potential_block_size(kernel),
        "max potential block size",
    )?;
    let dims = LaunchDims::cover(size, occupancy)?;
    tracing::debug!(
        size,
        min_grid_size = occupancy.min_grid_size,
        grid_size = dims.grid_size,
        block_size = dims.block_size,
        "planned kernel launch"
    );
    Ok(dims)
}

/// Identifies one thread of a launch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThreadIndex {
    pub block_idx: u32,
    pub thread_idx: u32,
    pub dims: LaunchDims,
}

impl ThreadIndex {
    /// the thread's position in the whole grid
    pub fn global_id(&self) -> usize {
        self.block_idx as usize * self.dims.block_size as usize + self.thread_idx as usize
    }

    /// distance between consecutive elements visited by a grid-stride loop
    pub fn grid_stride(&self) -> usize {
        self.dims.n_threads()
    }

    /// The element indices this thread visits in a grid-stride loop over
    /// `size` elements.
    ///
    /// Taken over every thread of the launch, the ranges partition `0..size`.
    pub fn grid_stride_range(&self, size: usize) -> StepBy<Range<usize>> {
        (self.global_id()..size).step_by(self.grid_stride().max(1))
    }
}

/// Runs a kernel body once for every thread of a launch.
///
/// The kernel only receives shared access to its captures. Any output should
/// go through caller-owned cells that are updated with an
/// [`AtomicAccumulator`](aggprim_nostd_internal::AtomicAccumulator) so that
/// the body behaves the same no matter how the threads are scheduled.
pub trait GridExecutor {
    fn launch(
        &mut self,
        dims: LaunchDims,
        kernel: &(impl Fn(ThreadIndex) + Sync),
    ) -> Result<(), Error>;
}

/// Emulates a launch on a single host thread.
///
/// Threads run one at a time in block-major order. This is the executor to
/// pair with sequential mode, since no two threads ever overlap.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialExecutor;

impl GridExecutor for SequentialExecutor {
    fn launch(
        &mut self,
        dims: LaunchDims,
        kernel: &(impl Fn(ThreadIndex) + Sync),
    ) -> Result<(), Error> {
        for block_idx in 0..dims.grid_size {
            tracing::trace!(block_idx, "emulating block");
            for thread_idx in 0..dims.block_size {
                kernel(ThreadIndex {
                    block_idx,
                    thread_idx,
                    dims,
                });
            }
        }
        Ok(())
    }
}

/// Emulates a launch on a bounded pool of OS threads.
///
/// Each worker repeatedly claims the next unvisited block and runs all of its
/// threads, so a grid of thousands of blocks never needs more than
/// `n_workers` OS threads. Threads of different blocks genuinely overlap, so
/// kernels must use hardware atomics (accelerator mode) to update shared
/// cells.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadedExecutor {
    /// defaults to the available parallelism of the host
    n_workers: Option<NonZeroUsize>,
}

impl ThreadedExecutor {
    pub fn with_workers(n_workers: NonZeroUsize) -> Self {
        ThreadedExecutor {
            n_workers: Some(n_workers),
        }
    }

    /// number of OS threads used for a grid of `grid_size` blocks
    pub fn n_workers(&self, grid_size: u32) -> usize {
        let limit = self
            .n_workers
            .or_else(|| std::thread::available_parallelism().ok())
            .map_or(1, NonZeroUsize::get);
        limit.min(grid_size as usize)
    }
}

impl GridExecutor for ThreadedExecutor {
    fn launch(
        &mut self,
        dims: LaunchDims,
        kernel: &(impl Fn(ThreadIndex) + Sync),
    ) -> Result<(), Error> {
        let n_workers = self.n_workers(dims.grid_size);
        tracing::debug!(n_workers, grid_size = dims.grid_size, "starting workers");
        let next_block = AtomicU32::new(0);
        std::thread::scope(|s| {
            for _ in 0..n_workers {
                s.spawn(|| {
                    loop {
                        let block_idx = next_block.fetch_add(1, Ordering::Relaxed);
                        if block_idx >= dims.grid_size {
                            break;
                        }
                        tracing::trace!(block_idx, "emulating block");
                        for thread_idx in 0..dims.block_size {
                            kernel(ThreadIndex {
                                block_idx,
                                thread_idx,
                                dims,
                            });
                        }
                    }
                });
            }
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aggprim_nostd_internal::{FixedOccupancy, Occupancy};
    use std::sync::atomic::AtomicUsize;

    struct Failing;

    impl OccupancyModel<str> for Failing {
        type Error = &'static str;

        fn max_potential_block_size(&self, _kernel: &str) -> Result<Occupancy, Self::Error> {
            Err("no device")
        }
    }

    fn model(min_grid_size: u32, block_size: u32) -> FixedOccupancy {
        FixedOccupancy(Occupancy {
            min_grid_size,
            block_size,
        })
    }

    #[test]
    fn plan_covers_input() {
        let dims = plan(1000, "sum", &model(80, 256)).unwrap();
        assert_eq!(dims.grid_size, 4);
        assert_eq!(dims.block_size, 256);
    }

    #[test]
    fn plan_runtime_failure() {
        let err = plan(1000, "sum", &Failing).unwrap_err();
        assert!(err.is_runtime());
        assert!(err.to_string().contains("max potential block size"));
    }

    #[test]
    fn plan_zero_block_size() {
        let err = plan(1000, "sum", &model(80, 0)).unwrap_err();
        assert!(err.internal().is_some());
    }

    #[test]
    fn sequential_visits_in_block_major_order() {
        let dims = plan(10, "ids", &model(2, 4)).unwrap();
        let seen = std::sync::Mutex::new(Vec::new());
        SequentialExecutor
            .launch(dims, &|idx: ThreadIndex| {
                seen.lock().unwrap().push(idx.global_id())
            })
            .unwrap();
        assert_eq!(seen.into_inner().unwrap(), (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn grid_stride_partitions_input() {
        // the grid is clamped to 2 blocks of 4 threads, far fewer than 29
        let size = 29;
        let dims = plan(size, "count", &model(2, 4)).unwrap();
        let hits: Vec<AtomicUsize> = (0..size).map(|_| AtomicUsize::new(0)).collect();
        ThreadedExecutor::default()
            .launch(dims, &|idx: ThreadIndex| {
                for i in idx.grid_stride_range(size) {
                    hits[i].fetch_add(1, Ordering::Relaxed);
                }
            })
            .unwrap();
        assert!(hits.iter().all(|h| h.load(Ordering::Relaxed) == 1));
    }

    #[test]
    fn empty_launch() {
        let dims = plan(0, "noop", &FixedOccupancy::default()).unwrap();
        let calls = AtomicUsize::new(0);
        SequentialExecutor
            .launch(dims, &|_| {
                calls.fetch_add(1, Ordering::Relaxed);
            })
            .unwrap();
        assert_eq!(calls.into_inner(), 0);
    }

    #[test]
    fn worker_count_is_bounded() {
        let four = NonZeroUsize::new(4).unwrap();
        let executor = ThreadedExecutor::with_workers(four);
        assert_eq!(executor.n_workers(10_000), 4);
        assert_eq!(executor.n_workers(3), 3);
        assert_eq!(executor.n_workers(0), 0);
        assert!(ThreadedExecutor::default().n_workers(u32::MAX) >= 1);
    }

    #[test]
    fn large_grid_on_few_workers() {
        // far more blocks than workers, every block must still run once
        let dims = LaunchDims {
            grid_size: 5000,
            block_size: 2,
        };
        let workers = std::sync::Mutex::new(std::collections::HashSet::new());
        let hits: Vec<AtomicUsize> = (0..dims.n_threads()).map(|_| AtomicUsize::new(0)).collect();
        ThreadedExecutor::with_workers(NonZeroUsize::new(3).unwrap())
            .launch(dims, &|idx: ThreadIndex| {
                workers.lock().unwrap().insert(std::thread::current().id());
                hits[idx.global_id()].fetch_add(1, Ordering::Relaxed);
            })
            .unwrap();
        assert!(hits.iter().all(|h| h.load(Ordering::Relaxed) == 1));
        assert!(workers.into_inner().unwrap().len() <= 3);
    }
}
