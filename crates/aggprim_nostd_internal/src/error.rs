// The public crate wraps this type inside of its own `Error` (see the
// `From<InternalError>` impl over there). We keep this one `Copy` and free of
// heap-allocated payloads so that it can be constructed inside of kernels.

use crate::data_type::DataType;
use crate::identity::AggregateFunction;

/// Errors produced by the kernel-facing primitives.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InternalError {
    /// a data type code that doesn't correspond to any known [`DataType`]
    UnknownTypeCode(u32),
    /// a known [`DataType`] that doesn't have a fixed width
    UnsupportedType(DataType),
    /// an aggregate function without a scalar identity value
    UnsupportedAggregate(AggregateFunction),
    /// the pair of types can't be promoted to a common type
    Promotion { lhs: DataType, rhs: DataType },
    /// a dimension width other than 1, 2, 4, 8 or 16 bytes
    DimWidth(u16),
    /// a buffer holds fewer bytes than the operation needs
    BufferTooShort { needed: usize, actual: usize },
    /// two inputs that are consumed element by element differ in length
    LengthMismatch { lhs: usize, rhs: usize },
    /// an occupancy model suggested a block size of 0
    ZeroBlockSize,
}

impl core::fmt::Display for InternalError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            InternalError::UnknownTypeCode(code) => {
                write!(f, "{code:#010x} is not a known data type code")
            }
            InternalError::UnsupportedType(dtype) => {
                write!(f, "unsupported data type for fixed-width access: {dtype:?}")
            }
            InternalError::UnsupportedAggregate(func) => {
                write!(f, "the {func:?} aggregate function has no identity value")
            }
            InternalError::Promotion { lhs, rhs } => {
                write!(f, "{lhs:?} and {rhs:?} have no common type")
            }
            InternalError::DimWidth(width) => write!(
                f,
                "a dimension value can't be {width} bytes wide (expected 1, 2, 4, 8 or 16)"
            ),
            InternalError::BufferTooShort { needed, actual } => write!(
                f,
                "buffer holds {actual} bytes, but at least {needed} are needed"
            ),
            InternalError::LengthMismatch { lhs, rhs } => write!(
                f,
                "paired inputs must have equal lengths, got {lhs} and {rhs}"
            ),
            InternalError::ZeroBlockSize => {
                write!(f, "the occupancy model suggested a block size of 0")
            }
        }
    }
}
