//! Identity values of the aggregate functions.
//!
//! The identity value of an aggregate function is the element that leaves
//! every other value unchanged when the two are combined. Aggregation output
//! buffers get filled with it before any element is consumed.

use crate::error::InternalError;

/// The aggregate functions computed by the aggregation kernels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AggregateFunction {
    SumUnsigned,
    SumSigned,
    SumFloat,
    /// tracked as a running sum (and a separate count)
    AvgFloat,
    MinUnsigned,
    MinSigned,
    MinFloat,
    MaxUnsigned,
    MaxSigned,
    MaxFloat,
    /// HyperLogLog distinct-count sketch. It doesn't reduce to a scalar.
    Hll,
}

/// Numeric types that aggregation results are computed in.
pub trait AggregateValue: Copy + PartialOrd {
    const ZERO: Self;
    /// identity of the min-aggregates
    const MIN_IDENTITY: Self;
    /// identity of the max-aggregates
    const MAX_IDENTITY: Self;

    /// addition that behaves identically in every execution mode (integers
    /// wrap on overflow)
    fn agg_add(self, other: Self) -> Self;
}

macro_rules! impl_aggregate_value_int {
    ($($t:ty),*) => {
        $(
            impl AggregateValue for $t {
                const ZERO: Self = 0;
                const MIN_IDENTITY: Self = <$t>::MAX;
                const MAX_IDENTITY: Self = <$t>::MIN;

                #[inline(always)]
                fn agg_add(self, other: Self) -> Self {
                    self.wrapping_add(other)
                }
            }
        )*
    };
}

impl_aggregate_value_int!(u32, i32, u64, i64);

impl AggregateValue for f32 {
    const ZERO: Self = 0.0;
    const MIN_IDENTITY: Self = f32::MAX;
    // This is the smallest positive normal float, NOT the most negative
    // float. Combining it with a negative value yields the identity.
    const MAX_IDENTITY: Self = f32::MIN_POSITIVE;

    #[inline(always)]
    fn agg_add(self, other: Self) -> Self {
        self + other
    }
}

impl AggregateFunction {
    /// Combine the running aggregate `acc` with `value`.
    ///
    /// Averages are combined like sums (the count is tracked elsewhere).
    pub fn combine<T: AggregateValue>(self, acc: T, value: T) -> Result<T, InternalError> {
        use AggregateFunction::*;
        match self {
            SumUnsigned | SumSigned | SumFloat | AvgFloat => Ok(acc.agg_add(value)),
            MinUnsigned | MinSigned | MinFloat => Ok(if value < acc { value } else { acc }),
            MaxUnsigned | MaxSigned | MaxFloat => Ok(if value > acc { value } else { acc }),
            Hll => Err(InternalError::UnsupportedAggregate(self)),
        }
    }
}

/// Returns the identity value of `func` in the value type `T`.
///
/// Functions without a scalar identity produce
/// [`InternalError::UnsupportedAggregate`].
pub fn identity<T: AggregateValue>(func: AggregateFunction) -> Result<T, InternalError> {
    use AggregateFunction::*;
    match func {
        // a zero average goes together with a zero count
        AvgFloat => Ok(T::ZERO),
        SumUnsigned | SumSigned | SumFloat => Ok(T::ZERO),
        MinUnsigned | MinSigned | MinFloat => Ok(T::MIN_IDENTITY),
        MaxUnsigned | MaxSigned | MaxFloat => Ok(T::MAX_IDENTITY),
        Hll => Err(InternalError::UnsupportedAggregate(func)),
    }
}
