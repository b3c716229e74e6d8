//! The kernel-facing half of `aggprim`.
//!
//! Everything in this crate must be callable from code running on the
//! accelerator as well as from code running on the host, so the crate is
//! `no_std`, never allocates, and never logs. The `aggprim` crate wraps these
//! primitives with the std-only machinery (error type, logging, execution
//! policies, launch planning).
#![no_std]

mod atomic;
mod data_type;
mod dim_rows;
mod error;
mod exec_mode;
mod hash;
mod identity;
mod launch;
mod memory;
mod promote;

pub use atomic::{
    AtomicAccumulator, AtomicF32, AtomicStrategy, AtomicValue, HardwareAtomic,
    PlainReadModifyWrite,
};
pub use data_type::{DataType, DeviceCopy, FixedWidth, GeoPoint, Uuid};
pub use dim_rows::{copy_dim_rows, hash_dim_rows};
pub use error::InternalError;
pub use exec_mode::{Accelerator, ActiveMode, ExecMode, Sequential};
pub use hash::{Bits, HashWidth, murmur3_32, murmur3_128, murmur3_sum};
pub use identity::{AggregateFunction, AggregateValue, identity};
pub use launch::{
    BLOCK_SIZE, FixedOccupancy, LaunchDims, Occupancy, OccupancyModel, STEP_SIZE, WARP_SIZE,
};
pub use memory::{DimWidth, bytes_equal, copy_dim_value, width_of, width_of_code};
pub use promote::{
    CommonType, FloatClass, Int64Class, JoinClass, Promoted, Scalar, SignedClass, UnsignedClass,
    promote,
};
