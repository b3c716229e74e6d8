/*!
Provides the low-level primitives that a columnar aggregation engine builds
its kernels from (type promotion, aggregate identities, atomic accumulation,
fixed-width value handling, key hashing and launch sizing).

<div class="warning">

Every primitive is written once and compiled for one of two execution modes:
an accelerator mode, where many threads run concurrently, and a sequential
host mode. The mode is chosen when the crate is built (see the Cargo Features
section). Both modes must produce identical results for the same inputs.

</div>

# Cargo Features

- `accelerator`: build for the accelerator. [`AtomicAccumulator`]s use true
  atomics and [`execution_policy`] binds algorithms to a stream.
- `pooled-alloc`: implies `accelerator`. The execution policy also routes
  temporary allocations through a memory pool.
- `cuda`: implies `accelerator`. Provides `CudaOccupancy`, which queries
  the CUDA occupancy API via the `cust` crate.

# Errors

Everything that can fail returns [`Error`]. Out-of-domain inputs (e.g. a
data type without a fixed width) and failures reported by the runtime both
end up there. Nothing is retried.

# Developer Guide

The primitives that may be called from inside a kernel live in
[`aggprim_nostd_internal`], which is `no_std`. This crate layers the host-side
machinery on top.

*/

#![deny(rustdoc::broken_intra_doc_links)]

#[cfg(feature = "cuda")]
mod cuda;
mod error;
mod kernels;
mod launch;
mod policy;

#[cfg(feature = "cuda")]
pub use cuda::CudaOccupancy;
pub use error::{Error, check_runtime};
pub use kernels::{fill_identity, scatter_add, sum_into};
pub use launch::{GridExecutor, SequentialExecutor, ThreadIndex, ThreadedExecutor, plan};
pub use policy::{ExecutionPolicy, StreamHandle, execution_policy, execution_policy_for};

pub use aggprim_nostd_internal::{
    Accelerator, ActiveMode, AggregateFunction, AggregateValue, AtomicAccumulator, AtomicF32,
    AtomicStrategy, AtomicValue, BLOCK_SIZE, Bits, CommonType, DataType, DimWidth, ExecMode,
    FixedOccupancy, FixedWidth, FloatClass, GeoPoint, HardwareAtomic, HashWidth, Int64Class,
    InternalError, JoinClass, LaunchDims, Occupancy, OccupancyModel, PlainReadModifyWrite,
    Promoted, STEP_SIZE, Scalar, Sequential, SignedClass, UnsignedClass, Uuid, WARP_SIZE,
    bytes_equal, copy_dim_rows, copy_dim_value, hash_dim_rows, identity, murmur3_32, murmur3_128,
    murmur3_sum, promote, width_of, width_of_code,
};
