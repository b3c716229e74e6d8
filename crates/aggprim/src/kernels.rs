//! Small aggregation kernels built from the primitives.
//!
//! Each kernel is dual: it's generic over [`ExecMode`], and the mode only
//! decides which [`AtomicAccumulator`](aggprim_nostd_internal::AtomicAccumulator)
//! the body uses.

use crate::error::Error;
use crate::launch::{GridExecutor, ThreadIndex};
use aggprim_nostd_internal::{
    AggregateFunction, AtomicValue, ExecMode, InternalError, LaunchDims, identity,
};
use ndarray::ArrayView1;

/// Overwrite every cell with the identity of `func`.
///
/// Output buffers are initialized this way before any element is consumed.
pub fn fill_identity<T: AtomicValue>(
    func: AggregateFunction,
    cells: &[T::Cell],
) -> Result<(), Error> {
    let value = identity::<T>(func)?;
    for cell in cells {
        T::store(cell, value);
    }
    Ok(())
}

/// Add every element of `column` into `out`.
pub fn sum_into<M, T>(
    executor: &mut impl GridExecutor,
    dims: LaunchDims,
    column: ArrayView1<T>,
    out: &T::Cell,
) -> Result<(), Error>
where
    M: ExecMode,
    T: AtomicValue + Sync,
{
    let accum = M::accumulator();
    let size = column.len();
    executor.launch(dims, &|idx: ThreadIndex| {
        for i in idx.grid_stride_range(size) {
            accum.fetch_and_add(out, column[i]);
        }
    })
}

/// Add `values[i]` into `out[groups[i]]` for every row `i`.
///
/// `groups` and `values` must have the same length. The mismatch is reported
/// as [`InternalError::LengthMismatch`] with the length of `groups` first.
///
/// Group indices are validated before the launch, since a kernel has no way
/// to report a bad index.
pub fn scatter_add<M, T>(
    executor: &mut impl GridExecutor,
    dims: LaunchDims,
    groups: ArrayView1<u32>,
    values: ArrayView1<T>,
    out: &[T::Cell],
) -> Result<(), Error>
where
    M: ExecMode,
    T: AtomicValue + Sync,
{
    if groups.len() != values.len() {
        return Err(InternalError::LengthMismatch {
            lhs: groups.len(),
            rhs: values.len(),
        }
        .into());
    }
    if let Some(max_group) = groups.iter().max() {
        let needed = *max_group as usize + 1;
        if needed > out.len() {
            return Err(InternalError::BufferTooShort {
                needed,
                actual: out.len(),
            }
            .into());
        }
    }

    let accum = M::accumulator();
    let size = values.len();
    executor.launch(dims, &|idx: ThreadIndex| {
        for i in idx.grid_stride_range(size) {
            accum.fetch_and_add(&out[groups[i] as usize], values[i]);
        }
    })
}
