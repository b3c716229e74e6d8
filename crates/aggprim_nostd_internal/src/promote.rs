//! Resolves the common type that two operands get widened to before a binary
//! operation.
//!
//! The rules, in priority order:
//! 1. if either operand is floating point, the result is `f32`
//! 2. else, if either operand is `i64`, the result is `i64`
//! 3. else, if either operand is signed, the result is `i32`
//! 4. else, the result is `u32`
//!
//! `bool` and every unsigned type (including `u64`, which is not "the 64-bit
//! integer" of rule 2) count as unsigned. A [`GeoPoint`] is only ever
//! promoted with another [`GeoPoint`].
//!
//! The rules are available in 2 forms: at compile time through
//! [`CommonType`] (kernels get the promoted type without any runtime cost),
//! and at runtime through [`promote`] (for code that only knows the
//! [`DataType`] of a column).

use crate::data_type::{DataType, FixedWidth, GeoPoint};
use crate::error::InternalError;

/// Promotion class of a type whose rank is dominated by floating point.
pub struct FloatClass;
/// Promotion class of `i64`.
pub struct Int64Class;
/// Promotion class of the narrow signed integers.
pub struct SignedClass;
/// Promotion class of `bool` and the unsigned integers.
pub struct UnsignedClass;

/// Numeric types that take part in arithmetic promotion.
pub trait Scalar: FixedWidth {
    type Class;
}

macro_rules! impl_scalar {
    ($($t:ty => $class:ty),* $(,)?) => {
        $( impl Scalar for $t { type Class = $class; } )*
    };
}

impl_scalar!(
    bool => UnsignedClass,
    i8 => SignedClass,
    u8 => UnsignedClass,
    i16 => SignedClass,
    u16 => UnsignedClass,
    i32 => SignedClass,
    u32 => UnsignedClass,
    f32 => FloatClass,
    i64 => Int64Class,
    u64 => UnsignedClass,
);

/// Combines two promotion classes into the promoted type.
pub trait JoinClass<Rhs> {
    type Output: FixedWidth;
}

macro_rules! impl_join_class {
    ($($lhs:ty, $rhs:ty => $out:ty);* $(;)?) => {
        $( impl JoinClass<$rhs> for $lhs { type Output = $out; } )*
    };
}

impl_join_class!(
    FloatClass, FloatClass => f32;
    FloatClass, Int64Class => f32;
    FloatClass, SignedClass => f32;
    FloatClass, UnsignedClass => f32;
    Int64Class, FloatClass => f32;
    Int64Class, Int64Class => i64;
    Int64Class, SignedClass => i64;
    Int64Class, UnsignedClass => i64;
    SignedClass, FloatClass => f32;
    SignedClass, Int64Class => i64;
    SignedClass, SignedClass => i32;
    SignedClass, UnsignedClass => i32;
    UnsignedClass, FloatClass => f32;
    UnsignedClass, Int64Class => i64;
    UnsignedClass, SignedClass => i32;
    UnsignedClass, UnsignedClass => u32;
);

/// The type that both `Self` and `Rhs` can be converted to.
pub trait CommonType<Rhs> {
    type Output: FixedWidth;
}

impl<A, B> CommonType<B> for A
where
    A: Scalar,
    B: Scalar,
    A::Class: JoinClass<B::Class>,
{
    type Output = <A::Class as JoinClass<B::Class>>::Output;
}

impl CommonType<GeoPoint> for GeoPoint {
    type Output = GeoPoint;
}

/// Shorthand for the promoted type of `A` and `B`
pub type Promoted<A, B> = <A as CommonType<B>>::Output;

/// Runtime counterpart of [`CommonType`].
///
/// Fails for a [`DataType::GeoPoint`] paired with anything else and for any
/// pairing involving a non-numeric type.
pub fn promote(lhs: DataType, rhs: DataType) -> Result<DataType, InternalError> {
    if lhs == DataType::GeoPoint && rhs == DataType::GeoPoint {
        return Ok(DataType::GeoPoint);
    } else if !(lhs.is_numeric() && rhs.is_numeric()) {
        return Err(InternalError::Promotion { lhs, rhs });
    }

    let promoted = if lhs.is_float() || rhs.is_float() {
        DataType::Float32
    } else if lhs == DataType::Int64 || rhs == DataType::Int64 {
        DataType::Int64
    } else if lhs.is_signed() || rhs.is_signed() {
        DataType::Int32
    } else {
        DataType::Uint32
    };
    Ok(promoted)
}
